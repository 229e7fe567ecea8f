use log::debug;

use super::Detector;
use crate::config::PushupConfig;
use crate::error::ChannelError;
use crate::geometry::mean_joint_angle;
use crate::ledger::Ledger;
use crate::smoothing::MovingAverage;
use crate::summary::{summarize_pushups, SummaryRecord};
use crate::types::{joints, ActivityEvent, Frame, RepEvent};

/// Toleranse for flyttallsstøy i tidsdifferanser (0.3 - 0.1 != 0.2).
pub(crate) const TIME_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PushupPhase {
    Up,
    /// I dippen: starttid og laveste vinkel så langt.
    Down { start: f64, min_angle: f64 },
}

/// En dipp som ble lukket av `down → up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedDip {
    pub start: f64,
    pub end: f64,
    pub min_angle: f64,
}

/// Hysterese: inn i `down` ved <= `down_deg`, ut ved >= `up_deg`.
/// Vinkler mellom tersklene endrer aldri fase.
pub fn step(phase: PushupPhase, angle: f64, t: f64, cfg: &PushupConfig) -> (PushupPhase, Option<ClosedDip>) {
    match phase {
        PushupPhase::Up => {
            if angle <= cfg.down_deg {
                (PushupPhase::Down { start: t, min_angle: angle }, None)
            } else {
                (PushupPhase::Up, None)
            }
        }
        PushupPhase::Down { start, min_angle } => {
            let min_angle = min_angle.min(angle);
            if angle >= cfg.up_deg {
                (PushupPhase::Up, Some(ClosedDip { start, end: t, min_angle }))
            } else {
                (PushupPhase::Down { start, min_angle }, None)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PushupState {
    cfg: PushupConfig,
    min_visibility: f64,
    smoother: MovingAverage,
    phase: PushupPhase,
    ledger: Ledger<RepEvent>,
}

impl PushupState {
    pub fn new(cfg: PushupConfig, min_visibility: f64) -> Self {
        Self {
            cfg,
            min_visibility,
            smoother: MovingAverage::new(cfg.window),
            phase: PushupPhase::Up,
            ledger: Ledger::new(),
        }
    }

    /// Mater én glattet vinkel inn i hysteresen.
    pub fn observe(&mut self, smoothed_angle: f64, t: f64) -> Option<RepEvent> {
        let (next, closed) = step(self.phase, smoothed_angle, t, &self.cfg);
        self.phase = next;
        let dip = closed?;

        let duration = dip.end - dip.start;
        if duration + TIME_EPS < self.cfg.min_dip_sec {
            debug!("pushup: dipp på {:.3}s forkastet (under {:.2}s)", duration, self.cfg.min_dip_sec);
            return None;
        }

        let rep = RepEvent {
            sequence_number: self.ledger.len() as u32 + 1,
            phase_start_time: dip.start,
            phase_end_time: dip.end,
            duration_sec: duration,
            extremum_angle: dip.min_angle,
            is_correct: Some(dip.min_angle <= self.cfg.correct_depth_deg),
        };
        self.ledger.append(rep.clone());
        Some(rep)
    }

    pub fn phase(&self) -> PushupPhase {
        self.phase
    }

    pub fn ledger(&self) -> &Ledger<RepEvent> {
        &self.ledger
    }
}

impl Detector for PushupState {
    fn analyze(&mut self, frame: &Frame) -> Result<Option<ActivityEvent>, ChannelError> {
        let angle = mean_joint_angle(frame, &joints::ELBOW_TRIPLES, self.min_visibility)?;
        let smoothed = self.smoother.push(angle);
        Ok(self.observe(smoothed, frame.timestamp).map(ActivityEvent::Rep))
    }

    fn summarize(&self) -> SummaryRecord {
        SummaryRecord::Pushup(summarize_pushups(self.ledger.as_slice()))
    }
}
