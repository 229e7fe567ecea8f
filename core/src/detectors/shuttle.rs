use std::collections::VecDeque;

use log::debug;

use super::Detector;
use crate::config::ShuttleConfig;
use crate::error::ChannelError;
use crate::geometry::mean_x;
use crate::smoothing::MovingAverage;
use crate::summary::{summarize_shuttle, SummaryRecord};
use crate::types::{joints, ActivityEvent, Frame, ShuttlePhase, ShuttleStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn phase(self) -> ShuttlePhase {
        match self {
            Direction::Forward => ShuttlePhase::RunningTowards,
            Direction::Backward => ShuttlePhase::Returning,
        }
    }
}

/// Kvalitativ retning for ett steg, eller `None` når |Δx| er innenfor dødbåndet.
pub fn classify_step(dx: f64, step_px: f64) -> Option<Direction> {
    if dx > step_px {
        Some(Direction::Forward)
    } else if dx < -step_px {
        Some(Direction::Backward)
    } else {
        None
    }
}

/// Retningen er bekreftet bare når hele historikken er full og enstemmig.
pub fn confirmed(history: &VecDeque<Direction>, len: usize) -> Option<Direction> {
    let first = *history.front()?;
    if history.len() == len && history.iter().all(|d| *d == first) {
        Some(first)
    } else {
        None
    }
}

/// Løpende status; ingen ledger. Sammendraget trenger bare spennet (min, max) av posisjonene.
#[derive(Debug, Clone)]
pub struct ShuttleState {
    cfg: ShuttleConfig,
    min_visibility: f64,
    meters_per_pixel: f64,
    smoother: MovingAverage,
    last_x: Option<f64>,
    history: VecDeque<Direction>,
    confirmed: Option<Direction>,
    status: ShuttleStatus,
    span: Option<(f64, f64)>,
}

impl ShuttleState {
    pub fn new(cfg: ShuttleConfig, min_visibility: f64, meters_per_pixel: f64) -> Self {
        let confirm_len = cfg.confirm_len.max(1);
        Self {
            cfg: ShuttleConfig { confirm_len, ..cfg },
            min_visibility,
            meters_per_pixel,
            smoother: MovingAverage::new(cfg.window),
            last_x: None,
            history: VecDeque::with_capacity(confirm_len),
            confirmed: None,
            status: ShuttleStatus { run_count: 0, status: ShuttlePhase::Waiting },
            span: None,
        }
    }

    /// Mater én glattet x-posisjon. Returnerer ny status kun når den endrer seg.
    pub fn observe(&mut self, smoothed_x: f64, t: f64) -> Option<ShuttleStatus> {
        self.span = Some(match self.span {
            Some((lo, hi)) => (lo.min(smoothed_x), hi.max(smoothed_x)),
            None => (smoothed_x, smoothed_x),
        });
        let prev = self.last_x.replace(smoothed_x)?;

        if let Some(dir) = classify_step(smoothed_x - prev, self.cfg.step_px) {
            if self.history.len() == self.cfg.confirm_len {
                self.history.pop_front();
            }
            self.history.push_back(dir);
        }

        let dir = confirmed(&self.history, self.cfg.confirm_len)?;
        if self.confirmed == Some(dir) {
            return None;
        }

        let before = self.status;
        let first = self.confirmed.is_none();
        self.confirmed = Some(dir);
        self.status.status = dir.phase();
        // en full legg er fram og tilbake: tell ved bekreftet snu til bakover
        if !first && dir == Direction::Backward {
            self.status.run_count += 1;
        }
        debug!(
            "shuttle: {:?} bekreftet ved t={:.2}s, status={} runs={}",
            dir,
            t,
            self.status.status.label(),
            self.status.run_count
        );

        (self.status != before).then_some(self.status)
    }

    pub fn status(&self) -> ShuttleStatus {
        self.status
    }

    /// Minste og største glattede x-posisjon sett så langt.
    pub fn span(&self) -> Option<(f64, f64)> {
        self.span
    }
}

impl Detector for ShuttleState {
    fn analyze(&mut self, frame: &Frame) -> Result<Option<ActivityEvent>, ChannelError> {
        let x = mean_x(frame, &joints::LOWER_BODY, self.min_visibility)?;
        let smoothed = self.smoother.push(x);
        Ok(self.observe(smoothed, frame.timestamp).map(ActivityEvent::Shuttle))
    }

    fn summarize(&self) -> SummaryRecord {
        SummaryRecord::ShuttleRun(summarize_shuttle(
            self.status.run_count,
            self.span,
            self.meters_per_pixel,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: &mut ShuttleState, xs: &[f64]) -> Vec<ShuttleStatus> {
        xs.iter()
            .enumerate()
            .filter_map(|(i, &x)| state.observe(x, i as f64 * 0.1))
            .collect()
    }

    #[test]
    fn first_confirmation_sets_heading_without_counting() {
        let mut s = ShuttleState::new(ShuttleConfig::default(), 0.5, 0.0025);
        let updates = run(&mut s, &[100.0, 110.0, 120.0, 130.0]);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].status, ShuttlePhase::RunningTowards);
        assert_eq!(updates[0].run_count, 0);
    }

    #[test]
    fn out_and_back_counts_one_run() {
        let mut s = ShuttleState::new(ShuttleConfig::default(), 0.5, 0.0025);
        let xs = [100.0, 110.0, 120.0, 130.0, 140.0, 130.0, 120.0, 110.0, 100.0];
        let updates = run(&mut s, &xs);
        assert_eq!(updates.last().map(|u| u.status), Some(ShuttlePhase::Returning));
        assert_eq!(s.status().run_count, 1);
    }

    #[test]
    fn single_frame_flip_is_debounced() {
        let mut s = ShuttleState::new(ShuttleConfig::default(), 0.5, 0.0025);
        run(&mut s, &[100.0, 110.0, 120.0, 130.0, 120.0, 130.0, 140.0, 150.0]);
        assert_eq!(s.status().status, ShuttlePhase::RunningTowards);
        assert_eq!(s.status().run_count, 0);
    }

    #[test]
    fn small_moves_are_ignored() {
        let mut s = ShuttleState::new(ShuttleConfig::default(), 0.5, 0.0025);
        let updates = run(&mut s, &[100.0, 103.0, 99.0, 104.0, 100.0]);
        assert!(updates.is_empty());
        assert_eq!(s.status().status, ShuttlePhase::Waiting);
    }

    #[test]
    fn span_tracks_extremes_only() {
        let mut s = ShuttleState::new(ShuttleConfig::default(), 0.5, 0.0025);
        assert_eq!(s.span(), None);
        run(&mut s, &[200.0, 150.0, 320.0, 180.0]);
        assert_eq!(s.span(), Some((150.0, 320.0)));
        match s.summarize() {
            SummaryRecord::ShuttleRun(sh) => assert!((sh.distance_m - 0.425).abs() < 1e-9),
            other => panic!("feil sammendrag: {other:?}"),
        }
    }

    #[test]
    fn starting_backwards_then_forward_does_not_count() {
        let mut s = ShuttleState::new(ShuttleConfig::default(), 0.5, 0.0025);
        run(&mut s, &[200.0, 190.0, 180.0, 170.0, 180.0, 190.0, 200.0]);
        assert_eq!(s.status().status, ShuttlePhase::RunningTowards);
        assert_eq!(s.status().run_count, 0);
        run(&mut s, &[190.0, 180.0, 170.0]);
        assert_eq!(s.status().run_count, 1);
    }
}
