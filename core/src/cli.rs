use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analyze_session::{analyze_session, AnalyzeInputs, AnalyzeOutputs};
use crate::session::SessionReport;
use crate::storage::load_config;
use crate::summary::SummaryRecord;
use crate::types::{Activity, Frame};

// Replay-fil: enten en ren liste med frames, eller et objekt med frames + fps
#[derive(Deserialize)]
#[serde(untagged)]
enum ReplayFile {
    Frames(Vec<Frame>),
    Object {
        frames: Vec<Frame>,
        #[serde(default, alias = "fps")]
        sample_rate_hz: Option<f64>,
    },
}

/// Spill av en innspilt frame-fil gjennom én økt.
pub fn run_replay(path: &Path, activity: &str, config_path: Option<&Path>) -> Result<AnalyzeOutputs> {
    let activity: Activity = activity.parse()?;
    let config = match config_path {
        Some(p) => load_config(p).with_context(|| format!("kunne ikke lese konfig {}", p.display()))?,
        None => Default::default(),
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("kunne ikke lese {}", path.display()))?;
    let (frames, rate) = match serde_json::from_str::<ReplayFile>(&raw)
        .with_context(|| format!("ugyldig frame-fil {}", path.display()))?
    {
        ReplayFile::Frames(f) => (f, None),
        ReplayFile::Object { frames, sample_rate_hz } => (frames, sample_rate_hz),
    };

    let out = analyze_session(AnalyzeInputs {
        activity,
        sample_rate_hz: rate.unwrap_or(30.0),
        frames: &frames,
        config: &config,
    })?;
    Ok(out)
}

pub fn print_session_report(report: &SessionReport) {
    println!("--- Session Report ---");
    println!("Økt: {} ({})", report.session_id, report.activity);
    println!(
        "Frames: {} ({} hoppet over)",
        report.frames_seen, report.frames_skipped
    );
    for line in summary_lines(&report.summary) {
        println!("{line}");
    }
}

/// Menneskelesbare linjer for sammendraget.
pub fn summary_lines(summary: &SummaryRecord) -> Vec<String> {
    match summary {
        SummaryRecord::Pushup(s) => vec![
            format!("Reps: {} (gode {}, dårlige {})", s.count, s.good_reps, s.bad_reps),
            format!("Snitt min albuevinkel: {:.1}°", s.avg_min_elbow_angle),
            format!("Snitt dipp: {:.2}s", s.avg_dip_duration),
        ],
        SummaryRecord::Pullup(s) => vec![
            format!("Reps: {}", s.count),
            format!("Snitt varighet: {:.2}s", s.avg_dip_duration),
        ],
        SummaryRecord::Situp(s) => vec![
            format!("Reps: {}", s.count),
            format!("Snitt vinkelutslag: {:.1}°", s.avg_angle_change),
        ],
        SummaryRecord::VerticalJump(s) => vec![
            format!("Hopp: {}", s.count),
            format!("Maks høyde: {:.1} cm", s.max_height_cm),
            format!("Snitt tid i lufta: {:.2}s", s.avg_air_time),
        ],
        SummaryRecord::ShuttleRun(s) => vec![
            format!("Runder: {}", s.runs),
            format!("Distanse: {:.2} m", s.distance_m),
        ],
        SummaryRecord::SitAndReach(s) => vec![
            format!("Maks reach: {:.1} cm", s.max_reach_cm),
            format!("Ved t={:.2}s", s.time_of_max),
        ],
    }
}
