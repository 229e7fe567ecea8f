use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::DetectorConfig;
use crate::detectors::{ActivityState, Detector};
use crate::error::{ChannelError, SessionError};
use crate::metrics;
use crate::summary::SummaryRecord;
use crate::types::{Activity, ActivityEvent, Frame};

/// Resultat for én frame. `skipped` betyr at posen ikke kunne brukes denne framen
/// (kaller kan vise "pose ikke funnet"); økten fortsetter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutcome {
    pub event: Option<ActivityEvent>,
    pub skipped: Option<ChannelError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: String,
    pub activity: Activity,
    pub sample_rate_hz: f64,
    pub started_at_utc: DateTime<Utc>,
    pub ended_at_utc: DateTime<Utc>,
    pub frames_seen: u64,
    pub frames_skipped: u64,
    pub summary: SummaryRecord,
}

/// Driver for én økt: eier tilstanden eksklusivt, tar frames i tidsrekkefølge,
/// og oppsummerer nøyaktig én gang.
#[derive(Debug)]
pub struct Session {
    session_id: String,
    activity: Activity,
    sample_rate_hz: f64,
    started_at: DateTime<Utc>,
    /// `None` etter `stop()`
    state: Option<ActivityState>,
    last_timestamp: Option<f64>,
    frames_seen: u64,
    frames_skipped: u64,
}

/// Hull større enn så mange nominelle frame-intervaller logges.
const GAP_FRAMES: f64 = 3.0;

impl Session {
    /// `sample_rate_hz` er bare veiledende: detektorene bruker frame-tidsstemplene.
    /// Raten brukes til hull-logging og står i rapporten. Null, negativ eller NaN
    /// godtas, men slår av hull-loggingen (og gir en advarsel).
    pub fn start(activity: Activity, sample_rate_hz: f64, cfg: &DetectorConfig) -> Self {
        let started_at = Utc::now();
        let session_id = format!("{}-{}", activity.key(), started_at.timestamp_millis());
        if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
            warn!("⚠️ Økt {}: ugyldig sample_rate_hz={}, hull-logging er av", session_id, sample_rate_hz);
        }
        info!("▶️ Økt {} startet ({} @ {:.1} Hz)", session_id, activity, sample_rate_hz);
        metrics::global()
            .sessions_started_total
            .with_label_values(&[activity.key()])
            .inc();
        Self {
            session_id,
            activity,
            sample_rate_hz,
            started_at,
            state: Some(ActivityState::new(activity, cfg)),
            last_timestamp: None,
            frames_seen: 0,
            frames_skipped: 0,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Hull-logging krever en endelig, positiv rate.
    pub fn gap_logging(&self) -> bool {
        self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }

    /// Gjeldende tilstand (for inspeksjon i UI/tester); `None` når økten er lukket.
    pub fn state(&self) -> Option<&ActivityState> {
        self.state.as_ref()
    }

    /// Kjør én frame gjennom geometri → glatting → tilstandsmaskin.
    pub fn push_frame(&mut self, frame: &Frame) -> Result<FrameOutcome, SessionError> {
        let gap_logging = self.gap_logging();
        let state = self.state.as_mut().ok_or(SessionError::SessionClosed)?;
        frame.validate()?;

        if let Some(prev) = self.last_timestamp {
            if frame.timestamp < prev {
                return Err(SessionError::NonMonotonicTimestamp {
                    previous: prev,
                    current: frame.timestamp,
                });
            }
            if gap_logging && frame.timestamp - prev > GAP_FRAMES / self.sample_rate_hz {
                debug!(
                    "{}: hull i frames {:.3}s -> {:.3}s",
                    self.session_id, prev, frame.timestamp
                );
            }
        }
        self.last_timestamp = Some(frame.timestamp);
        self.frames_seen += 1;

        let m = metrics::global();
        let key = self.activity.key();
        m.frames_processed_total.with_label_values(&[key]).inc();

        match state.analyze(frame) {
            Ok(event) => {
                if event.is_some() {
                    m.events_emitted_total.with_label_values(&[key]).inc();
                }
                Ok(FrameOutcome { event, skipped: None })
            }
            Err(reason) => {
                self.frames_skipped += 1;
                m.frames_skipped_total.with_label_values(&[key, reason.reason()]).inc();
                debug!("{}: frame t={:.3} hoppet over: {}", self.session_id, frame.timestamp, reason);
                Ok(FrameOutcome { event: None, skipped: Some(reason) })
            }
        }
    }

    /// Avslutt: oppsummer det som finnes (åpen fase tas ikke med) og slipp tilstanden.
    pub fn stop(&mut self) -> Result<SessionReport, SessionError> {
        let state = self.state.take().ok_or(SessionError::SessionClosed)?;
        let summary = state.summarize();
        let report = SessionReport {
            session_id: self.session_id.clone(),
            activity: self.activity,
            sample_rate_hz: self.sample_rate_hz,
            started_at_utc: self.started_at,
            ended_at_utc: Utc::now(),
            frames_seen: self.frames_seen,
            frames_skipped: self.frames_skipped,
            summary,
        };
        metrics::global()
            .sessions_completed_total
            .with_label_values(&[self.activity.key()])
            .inc();
        info!(
            "⏹️ Økt {} avsluttet: {} frames ({} hoppet over)",
            report.session_id, report.frames_seen, report.frames_skipped
        );
        Ok(report)
    }
}
