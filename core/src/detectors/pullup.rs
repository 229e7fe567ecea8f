use log::{debug, info};

use super::pushup::TIME_EPS;
use super::Detector;
use crate::config::PullupConfig;
use crate::error::ChannelError;
use crate::geometry::{mean_joint_angle, pixel_point};
use crate::ledger::Ledger;
use crate::smoothing::MovingAverage;
use crate::summary::{summarize_pullups, SummaryRecord};
use crate::types::{joints, ActivityEvent, Frame, RepEvent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PullupPhase {
    Waiting,
    /// Hodet er over baseline.
    Up { start: f64, min_angle: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedPull {
    pub start: f64,
    pub end: f64,
    pub min_angle: f64,
}

/// `head_y` og `baseline_y` er piksler (y vokser nedover).
/// Starter når hodet er over baseline, lukkes når armene er strake og hodet er tilbake.
pub fn step(
    phase: PullupPhase,
    angle: f64,
    head_y: f64,
    baseline_y: f64,
    t: f64,
    cfg: &PullupConfig,
) -> (PullupPhase, Option<ClosedPull>) {
    match phase {
        PullupPhase::Waiting => {
            if head_y < baseline_y - cfg.head_rise_px {
                (PullupPhase::Up { start: t, min_angle: angle }, None)
            } else {
                (PullupPhase::Waiting, None)
            }
        }
        PullupPhase::Up { start, min_angle } => {
            let min_angle = min_angle.min(angle);
            if angle > cfg.extended_deg && head_y >= baseline_y {
                (PullupPhase::Waiting, Some(ClosedPull { start, end: t, min_angle }))
            } else {
                (PullupPhase::Up { start, min_angle }, None)
            }
        }
    }
}

/// Baseline for hodet fanges én gang (første frame med gyldig nese) og
/// rekalibreres aldri. Flytter kameraet seg midt i økten, blir tellingen feil.
#[derive(Debug, Clone)]
pub struct PullupState {
    cfg: PullupConfig,
    min_visibility: f64,
    smoother: MovingAverage,
    baseline_head_y: Option<f64>,
    phase: PullupPhase,
    ledger: Ledger<RepEvent>,
}

impl PullupState {
    pub fn new(cfg: PullupConfig, min_visibility: f64) -> Self {
        Self {
            cfg,
            min_visibility,
            smoother: MovingAverage::new(cfg.window),
            baseline_head_y: None,
            phase: PullupPhase::Waiting,
            ledger: Ledger::new(),
        }
    }

    /// Mater glattet albuevinkel + hodehøyde. Første kall setter baseline.
    pub fn observe(&mut self, smoothed_angle: f64, head_y: f64, t: f64) -> Option<RepEvent> {
        let baseline = self.capture_baseline(head_y, t);
        let (next, closed) = step(self.phase, smoothed_angle, head_y, baseline, t, &self.cfg);
        self.phase = next;
        let pull = closed?;

        let duration = pull.end - pull.start;
        if duration + TIME_EPS < self.cfg.min_dip_sec {
            debug!("pullup: rep på {:.3}s forkastet", duration);
            return None;
        }

        let rep = RepEvent {
            sequence_number: self.ledger.len() as u32 + 1,
            phase_start_time: pull.start,
            phase_end_time: pull.end,
            duration_sec: duration,
            extremum_angle: pull.min_angle,
            is_correct: None,
        };
        self.ledger.append(rep.clone());
        Some(rep)
    }

    fn capture_baseline(&mut self, head_y: f64, t: f64) -> f64 {
        *self.baseline_head_y.get_or_insert_with(|| {
            info!("pullup: baseline for hode satt til {:.1}px (t={:.2}s)", head_y, t);
            head_y
        })
    }

    pub fn baseline_head_y(&self) -> Option<f64> {
        self.baseline_head_y
    }

    pub fn phase(&self) -> PullupPhase {
        self.phase
    }

    pub fn ledger(&self) -> &Ledger<RepEvent> {
        &self.ledger
    }
}

impl Detector for PullupState {
    fn analyze(&mut self, frame: &Frame) -> Result<Option<ActivityEvent>, ChannelError> {
        let head = pixel_point(frame, joints::NOSE, self.min_visibility);
        // Baseline fanges fra første gyldige nese selv om albuene mangler i samme frame
        if let Ok((_, y)) = head {
            self.capture_baseline(y, frame.timestamp);
        }
        let (_, head_y) = head?;
        let angle = mean_joint_angle(frame, &joints::ELBOW_TRIPLES, self.min_visibility)?;
        let smoothed = self.smoother.push(angle);
        Ok(self.observe(smoothed, head_y, frame.timestamp).map(ActivityEvent::Rep))
    }

    fn summarize(&self) -> SummaryRecord {
        SummaryRecord::Pullup(summarize_pullups(self.ledger.as_slice()))
    }
}
