use repsense_core::{load_config, save_config, DetectorConfig};
use std::fs;

#[test]
fn test_save_and_load_config() {
    let path = std::env::temp_dir().join(format!("repsense_cfg_{}.json", std::process::id()));

    let mut cfg = DetectorConfig::default();
    cfg.min_visibility = 0.3;
    cfg.pushup.down_deg = 70.0;
    cfg.calibration.meters_per_pixel = 0.004;

    // lagre til disk
    save_config(&cfg, &path).expect("kunne ikke lagre konfig");

    // les tilbake
    let loaded = load_config(&path).expect("kunne ikke laste konfig");
    assert_eq!(loaded, cfg);

    // rydde opp
    fs::remove_file(&path).ok();
}

#[test]
fn missing_file_gives_default_config() {
    let path = std::env::temp_dir().join("repsense_finnes_ikke_4711.json");
    fs::remove_file(&path).ok();
    let loaded = load_config(&path).expect("default");
    assert_eq!(loaded, DetectorConfig::default());
}

#[test]
fn broken_file_is_a_parse_error() {
    let path = std::env::temp_dir().join(format!("repsense_broken_{}.json", std::process::id()));
    fs::write(&path, r#"{"jump": {"takeoff_px": "høy"}}"#).unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("jump.takeoff_px"), "{err}");
    fs::remove_file(&path).ok();
}
