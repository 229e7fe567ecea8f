use super::Detector;
use crate::config::SitupConfig;
use crate::error::ChannelError;
use crate::geometry::mean_joint_angle;
use crate::ledger::Ledger;
use crate::smoothing::MovingAverage;
use crate::summary::{summarize_situps, SummaryRecord};
use crate::types::{joints, ActivityEvent, Frame, RepEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SitupPhase {
    /// Ingen glattet verdi sett ennå.
    Idle,
    /// Følger toppen (største verdi siden forrige bunn).
    Up { top: f64 },
    /// Følger bunnen; `top` er toppen før nedgangen.
    Down { start: f64, top: f64, bottom: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedSwing {
    pub start: f64,
    pub end: f64,
    /// topp − bunn (grader)
    pub swing: f64,
}

/// Ekstremsporing: `down` når verdien faller `swing_deg` under siste topp,
/// `up` igjen når den stiger `swing_deg` over ny bunn. Ingen varighetskrav.
pub fn step(phase: SitupPhase, v: f64, t: f64, cfg: &SitupConfig) -> (SitupPhase, Option<ClosedSwing>) {
    match phase {
        SitupPhase::Idle => (SitupPhase::Up { top: v }, None),
        SitupPhase::Up { top } => {
            let top = top.max(v);
            if v <= top - cfg.swing_deg {
                (SitupPhase::Down { start: t, top, bottom: v }, None)
            } else {
                (SitupPhase::Up { top }, None)
            }
        }
        SitupPhase::Down { start, top, bottom } => {
            let bottom = bottom.min(v);
            if v >= bottom + cfg.swing_deg {
                let closed = ClosedSwing { start, end: t, swing: top - bottom };
                (SitupPhase::Up { top: v }, Some(closed))
            } else {
                (SitupPhase::Down { start, top, bottom }, None)
            }
        }
    }
}

/// Sit-ups bruker albuevinkelen som kanal (samme ledd som push-up). Kun telling,
/// korrekthet klassifiseres ikke.
#[derive(Debug, Clone)]
pub struct SitupState {
    cfg: SitupConfig,
    min_visibility: f64,
    smoother: MovingAverage,
    phase: SitupPhase,
    ledger: Ledger<RepEvent>,
}

impl SitupState {
    pub fn new(cfg: SitupConfig, min_visibility: f64) -> Self {
        Self {
            cfg,
            min_visibility,
            smoother: MovingAverage::new(cfg.window),
            phase: SitupPhase::Idle,
            ledger: Ledger::new(),
        }
    }

    pub fn observe(&mut self, smoothed: f64, t: f64) -> Option<RepEvent> {
        let (next, closed) = step(self.phase, smoothed, t, &self.cfg);
        self.phase = next;
        let swing = closed?;

        let rep = RepEvent {
            sequence_number: self.ledger.len() as u32 + 1,
            phase_start_time: swing.start,
            phase_end_time: swing.end,
            duration_sec: swing.end - swing.start,
            extremum_angle: swing.swing,
            is_correct: None,
        };
        self.ledger.append(rep.clone());
        Some(rep)
    }

    pub fn phase(&self) -> SitupPhase {
        self.phase
    }

    pub fn ledger(&self) -> &Ledger<RepEvent> {
        &self.ledger
    }
}

impl Detector for SitupState {
    fn analyze(&mut self, frame: &Frame) -> Result<Option<ActivityEvent>, ChannelError> {
        let angle = mean_joint_angle(frame, &joints::ELBOW_TRIPLES, self.min_visibility)?;
        let smoothed = self.smoother.push(angle);
        Ok(self.observe(smoothed, frame.timestamp).map(ActivityEvent::Rep))
    }

    fn summarize(&self) -> SummaryRecord {
        SummaryRecord::Situp(summarize_situps(self.ledger.as_slice()))
    }
}
