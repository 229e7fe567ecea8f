use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DetectorConfig;
use crate::error::SessionError;
use crate::session::{Session, SessionReport};
use crate::types::{Activity, ActivityEvent, Frame};

/// Batch-modus: en hel innspilt frame-sekvens for én økt.
#[derive(Clone)]
pub struct AnalyzeInputs<'a> {
    pub activity: Activity,
    pub sample_rate_hz: f64,
    pub frames: &'a [Frame],
    pub config: &'a DetectorConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeOutputs {
    /// Alle hendelser i rekkefølge, med tidspunktet til framen som ga dem.
    pub events: Vec<TimedEvent>,
    pub report: SessionReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedEvent {
    pub timestamp: f64,
    pub event: ActivityEvent,
}

pub fn analyze_session(inputs: AnalyzeInputs) -> Result<AnalyzeOutputs, SessionError> {
    let mut session = Session::start(inputs.activity, inputs.sample_rate_hz, inputs.config);
    let mut events = Vec::new();

    for frame in inputs.frames {
        let outcome = session.push_frame(frame)?;
        if let Some(event) = outcome.event {
            events.push(TimedEvent { timestamp: frame.timestamp, event });
        }
    }

    let report = session.stop()?;
    Ok(AnalyzeOutputs { events, report })
}

// Tolerant inngang: aksepter vanlige alias fra klientene
#[derive(Debug, Deserialize)]
struct AnalyzeJsonIn {
    #[serde(alias = "exercise", alias = "activity_type")]
    activity: String,
    #[serde(default = "default_rate", alias = "fps", alias = "sample_rate")]
    sample_rate_hz: f64,
    #[serde(default)]
    frames: Vec<Frame>,
    #[serde(default, alias = "cfg")]
    config: Option<Value>,
}

fn default_rate() -> f64 {
    30.0
}

/// JSON inn → JSON ut (`{events, report}`). Parse-feil rapporteres med JSON-sti.
pub fn analyze_session_json(payload: &str) -> Result<String, SessionError> {
    let mut de = serde_json::Deserializer::from_str(payload);
    let parsed: AnalyzeJsonIn =
        serde_path_to_error::deserialize(&mut de).map_err(SessionError::from_path_error)?;

    let activity: Activity = parsed.activity.parse()?;
    let config = match parsed.config {
        Some(v) => parse_config_value(v)?,
        None => DetectorConfig::default(),
    };

    let out = analyze_session(AnalyzeInputs {
        activity,
        sample_rate_hz: parsed.sample_rate_hz,
        frames: &parsed.frames,
        config: &config,
    })?;
    Ok(serde_json::to_string(&out)?)
}

pub(crate) fn parse_config_value(v: Value) -> Result<DetectorConfig, SessionError> {
    serde_path_to_error::deserialize(v).map_err(|e| SessionError::Parse {
        path: format!("config.{}", e.path()),
        message: e.inner().to_string(),
    })
}
