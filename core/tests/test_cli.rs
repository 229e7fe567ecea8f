mod common;

use common::*;
use repsense_core::cli::{run_replay, summary_lines};
use repsense_core::summary::{JumpSummary, PushupSummary};
use repsense_core::SummaryRecord;
use std::fs;

#[test]
fn replay_from_json_file() {
    let frames = vec![hip_frame(0.0, 400.0), hip_frame(1.0, 340.0), hip_frame(1.6, 398.0)];
    let doc = serde_json::json!({ "fps": 30.0, "frames": frames });
    let path = std::env::temp_dir().join(format!("repsense_replay_{}.json", std::process::id()));
    fs::write(&path, doc.to_string()).unwrap();

    let cfg_path = std::env::temp_dir().join(format!("repsense_replay_cfg_{}.json", std::process::id()));
    fs::write(&cfg_path, r#"{"jump": {"window": 1}}"#).unwrap();

    let out = run_replay(&path, "jump", Some(&cfg_path)).expect("replay");
    assert_eq!(out.events.len(), 1);
    assert_eq!(out.report.sample_rate_hz, 30.0);
    assert!(matches!(out.report.summary, SummaryRecord::VerticalJump(ref j) if j.count == 1));

    fs::remove_file(&path).ok();
    fs::remove_file(&cfg_path).ok();
}

#[test]
fn replay_accepts_a_bare_frame_list() {
    let frames = vec![elbow_frame(0.0, 170.0), elbow_frame(0.1, 165.0)];
    let path = std::env::temp_dir().join(format!("repsense_bare_{}.json", std::process::id()));
    fs::write(&path, serde_json::to_string(&frames).unwrap()).unwrap();

    let out = run_replay(&path, "pushup", None).expect("replay");
    assert_eq!(out.report.frames_seen, 2);
    assert_eq!(out.report.sample_rate_hz, 30.0);

    fs::remove_file(&path).ok();
}

#[test]
fn replay_reports_missing_file() {
    let err = run_replay(std::path::Path::new("finnes/ikke.json"), "pushup", None).unwrap_err();
    assert!(err.to_string().contains("kunne ikke lese"));
}

#[test]
fn summary_lines_are_human_readable() {
    let lines = summary_lines(&SummaryRecord::Pushup(PushupSummary {
        count: 3,
        good_reps: 2,
        bad_reps: 1,
        avg_min_elbow_angle: 68.25,
        avg_dip_duration: 0.4,
    }));
    assert_eq!(lines[0], "Reps: 3 (gode 2, dårlige 1)");

    let lines = summary_lines(&SummaryRecord::VerticalJump(JumpSummary {
        count: 1,
        max_height_cm: 15.0,
        avg_air_time: 0.6,
    }));
    assert!(lines.iter().any(|l| l.contains("15.0 cm")));
}
