// core/tests/test_analyze_session.rs
mod common;

use common::*;
use repsense_core::analyze_session::{analyze_session, analyze_session_json, AnalyzeInputs};
use repsense_core::{Activity, ActivityEvent, DetectorConfig, Frame, SessionError, SummaryRecord};
use serde_json::{json, Value};

#[test]
fn batch_replay_returns_timed_events_and_report() {
    let frames: Vec<Frame> = [(170.0, 0.0), (60.0, 0.3), (60.0, 0.5), (170.0, 0.8)]
        .iter()
        .map(|&(a, t)| elbow_frame(t, a))
        .collect();
    let cfg = unsmoothed();

    let out = analyze_session(AnalyzeInputs {
        activity: Activity::Pushup,
        sample_rate_hz: 30.0,
        frames: &frames,
        config: &cfg,
    })
    .expect("analyze_session");

    assert_eq!(out.events.len(), 1);
    assert!((out.events[0].timestamp - 0.8).abs() < 1e-12);
    assert!(matches!(out.events[0].event, ActivityEvent::Rep(_)));
    assert_eq!(out.report.frames_seen, 4);
    assert!(matches!(out.report.summary, SummaryRecord::Pushup(ref p) if p.count == 1));
}

#[test]
fn batch_replay_fails_on_out_of_order_frames() {
    let frames = vec![elbow_frame(1.0, 170.0), elbow_frame(0.9, 170.0)];
    let err = analyze_session(AnalyzeInputs {
        activity: Activity::Pushup,
        sample_rate_hz: 30.0,
        frames: &frames,
        config: &DetectorConfig::default(),
    })
    .unwrap_err();
    assert!(matches!(err, SessionError::NonMonotonicTimestamp { .. }));
}

#[test]
fn json_entry_accepts_aliases() {
    let frames: Vec<Value> = [(0.0, 400.0), (1.0, 340.0), (1.6, 398.0)]
        .iter()
        .map(|&(t, y)| {
            let f = hip_frame(t, y);
            // "t" i stedet for "timestamp", "keypoints" i stedet for "landmarks"
            json!({
                "t": f.timestamp,
                "width": f.width,
                "height": f.height,
                "keypoints": f.landmarks,
            })
        })
        .collect();

    let payload = json!({
        "exercise": "Vertical Jump",
        "fps": 30,
        "frames": frames,
        "config": { "jump": { "window": 1 } }
    });

    let out = analyze_session_json(&payload.to_string()).expect("analyze_session_json");
    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["report"]["activity"], "vertical_jump");
    assert_eq!(v["report"]["summary"]["count"], 1);
    assert_eq!(v["events"][0]["event"]["type"], "jump");
    let h = v["events"][0]["event"]["height_px"].as_f64().unwrap();
    assert!((h - 60.0).abs() < 1e-6);
}

#[test]
fn json_entry_with_no_frames_gives_zero_summary() {
    let out = analyze_session_json(r#"{"activity": "shuttle_run"}"#).unwrap();
    let v: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["report"]["summary"]["runs"], 0);
    assert_eq!(v["report"]["summary"]["distance_m"], 0.0);
    assert_eq!(v["events"].as_array().map(|a| a.len()), Some(0));
}

#[test]
fn json_entry_rejects_unknown_activity() {
    let err = analyze_session_json(r#"{"activity": "burpee", "frames": []}"#).unwrap_err();
    assert!(matches!(err, SessionError::UnknownActivity(ref a) if a == "burpee"));
}

#[test]
fn json_parse_errors_carry_the_path() {
    let bad = r#"{"activity": "pushup", "frames": [{"landmarks": [], "width": "wide", "height": 1, "timestamp": 0}]}"#;
    match analyze_session_json(bad) {
        Err(SessionError::Parse { path, .. }) => assert!(path.starts_with("frames[0]"), "path {path}"),
        other => panic!("forventet Parse, fikk {other:?}"),
    }

    let bad_cfg = r#"{"activity": "pushup", "config": {"pushup": {"window": -1}}}"#;
    match analyze_session_json(bad_cfg) {
        Err(SessionError::Parse { path, .. }) => assert_eq!(path, "config.pushup.window"),
        other => panic!("forventet Parse, fikk {other:?}"),
    }
}
