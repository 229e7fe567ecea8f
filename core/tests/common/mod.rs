// Felles frame-byggere for integrasjonstestene.
// Bildet er 1000x1000 px, så normaliserte koordinater = px / 1000.
#![allow(dead_code)]

use repsense_core::types::joints;
use repsense_core::{DetectorConfig, Frame, Landmark};

pub const W: f64 = 1000.0;
pub const H: f64 = 1000.0;

pub fn blank() -> Vec<Option<Landmark>> {
    vec![None; 33]
}

pub fn set(lms: &mut [Option<Landmark>], idx: usize, x_px: f64, y_px: f64) {
    lms[idx] = Some(Landmark::new(x_px / W, y_px / H));
}

/// Begge armer med gitt albuevinkel (skulder rett over albuen).
pub fn arms(lms: &mut [Option<Landmark>], elbow_deg: f64) {
    let sides = [
        (joints::LEFT_SHOULDER, joints::LEFT_ELBOW, joints::LEFT_WRIST, 400.0),
        (joints::RIGHT_SHOULDER, joints::RIGHT_ELBOW, joints::RIGHT_WRIST, 600.0),
    ];
    let r = elbow_deg.to_radians();
    for (s, e, w, ex) in sides {
        let ey = 500.0;
        set(lms, s, ex, ey - 100.0);
        set(lms, e, ex, ey);
        set(lms, w, ex + 100.0 * r.sin(), ey - 100.0 * r.cos());
    }
}

pub fn elbow_frame(t: f64, elbow_deg: f64) -> Frame {
    let mut lms = blank();
    arms(&mut lms, elbow_deg);
    Frame::new(lms, W, H, t)
}

pub fn pullup_frame(t: f64, elbow_deg: f64, head_y_px: f64) -> Frame {
    let mut lms = blank();
    arms(&mut lms, elbow_deg);
    set(&mut lms, joints::NOSE, 500.0, head_y_px);
    Frame::new(lms, W, H, t)
}

pub fn hip_frame(t: f64, hip_y_px: f64) -> Frame {
    let mut lms = blank();
    set(&mut lms, joints::LEFT_HIP, 450.0, hip_y_px);
    set(&mut lms, joints::RIGHT_HIP, 550.0, hip_y_px);
    Frame::new(lms, W, H, t)
}

pub fn feet_frame(t: f64, x_px: f64) -> Frame {
    let mut lms = blank();
    for j in joints::LOWER_BODY {
        set(&mut lms, j, x_px, 900.0);
    }
    Frame::new(lms, W, H, t)
}

pub fn reach_frame(t: f64, wrist_x_px: f64, foot_x_px: f64) -> Frame {
    let mut lms = blank();
    set(&mut lms, joints::LEFT_WRIST, wrist_x_px, 600.0);
    set(&mut lms, joints::RIGHT_WRIST, wrist_x_px, 620.0);
    set(&mut lms, joints::LEFT_FOOT, foot_x_px, 900.0);
    set(&mut lms, joints::RIGHT_FOOT, foot_x_px, 910.0);
    Frame::new(lms, W, H, t)
}

/// Konfig uten glatting (vindu 1) for eksakte terskeltester.
pub fn unsmoothed() -> DetectorConfig {
    let mut cfg = DetectorConfig::default();
    cfg.pushup.window = 1;
    cfg.pullup.window = 1;
    cfg.situp.window = 1;
    cfg.jump.window = 1;
    cfg.shuttle.window = 1;
    cfg.reach.window = 1;
    cfg
}

/// Tidsstempler for `n` frames ved `fps`, fra `start`.
pub fn times(start: f64, n: usize, fps: f64) -> impl Iterator<Item = f64> {
    (0..n).map(move |i| start + i as f64 / fps)
}
