use log::debug;

use super::Detector;
use crate::config::JumpConfig;
use crate::error::ChannelError;
use crate::geometry::mean_y;
use crate::ledger::Ledger;
use crate::smoothing::MovingAverage;
use crate::summary::{summarize_jumps, SummaryRecord};
use crate::types::{joints, ActivityEvent, Frame, JumpEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpPhase {
    Grounded,
    /// Hopp i lufta: ikke en ledger-post før landing.
    Airborne { takeoff: f64, apex_y: f64 },
}

/// Hoftehøyde `y` i piksler (mindre = høyere). Baseline er fast.
/// Landing: hoften er tilbake ned i toleransebåndet eller forbi det (nedsvikt i landingen).
pub fn step(phase: JumpPhase, y: f64, baseline: f64, t: f64, cfg: &JumpConfig) -> (JumpPhase, Option<JumpEvent>) {
    match phase {
        JumpPhase::Grounded => {
            if baseline - y > cfg.takeoff_px {
                (JumpPhase::Airborne { takeoff: t, apex_y: y }, None)
            } else {
                (JumpPhase::Grounded, None)
            }
        }
        JumpPhase::Airborne { takeoff, apex_y } => {
            let apex_y = apex_y.min(y);
            if y >= baseline - cfg.landing_tolerance_px {
                let ev = JumpEvent {
                    takeoff_time: takeoff,
                    landing_time: t,
                    height_px: baseline - apex_y,
                    air_time_sec: t - takeoff,
                };
                (JumpPhase::Grounded, Some(ev))
            } else {
                (JumpPhase::Airborne { takeoff, apex_y }, None)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct JumpState {
    cfg: JumpConfig,
    min_visibility: f64,
    meters_per_pixel: f64,
    smoother: MovingAverage,
    baseline_y: Option<f64>,
    phase: JumpPhase,
    ledger: Ledger<JumpEvent>,
}

impl JumpState {
    pub fn new(cfg: JumpConfig, min_visibility: f64, meters_per_pixel: f64) -> Self {
        Self {
            cfg,
            min_visibility,
            meters_per_pixel,
            smoother: MovingAverage::new(cfg.window),
            baseline_y: None,
            phase: JumpPhase::Grounded,
            ledger: Ledger::new(),
        }
    }

    /// Første glattede hoftehøyde blir baseline.
    pub fn observe(&mut self, smoothed_y: f64, t: f64) -> Option<JumpEvent> {
        let baseline = *self.baseline_y.get_or_insert(smoothed_y);
        let (next, landed) = step(self.phase, smoothed_y, baseline, t, &self.cfg);
        if let (JumpPhase::Grounded, JumpPhase::Airborne { .. }) = (self.phase, next) {
            debug!("jump: avsprang ved t={:.2}s (y={:.1}, baseline={:.1})", t, smoothed_y, baseline);
        }
        self.phase = next;
        let ev = landed?;
        self.ledger.append(ev.clone());
        Some(ev)
    }

    pub fn baseline_y(&self) -> Option<f64> {
        self.baseline_y
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn ledger(&self) -> &Ledger<JumpEvent> {
        &self.ledger
    }
}

impl Detector for JumpState {
    fn analyze(&mut self, frame: &Frame) -> Result<Option<ActivityEvent>, ChannelError> {
        let hip_y = mean_y(frame, &joints::HIPS, self.min_visibility)?;
        let smoothed = self.smoother.push(hip_y);
        Ok(self.observe(smoothed, frame.timestamp).map(ActivityEvent::Jump))
    }

    fn summarize(&self) -> SummaryRecord {
        SummaryRecord::VerticalJump(summarize_jumps(self.ledger.as_slice(), self.meters_per_pixel))
    }
}
