use super::Detector;
use crate::config::ReachConfig;
use crate::error::ChannelError;
use crate::geometry::horizontal_offset;
use crate::smoothing::MovingAverage;
use crate::summary::{summarize_reach, SummaryRecord};
use crate::types::{joints, ActivityEvent, Frame, ReachSample};

/// Sit-and-reach: ingen faser, bare en tett serie og løpende maksimum.
#[derive(Debug, Clone)]
pub struct ReachState {
    min_visibility: f64,
    meters_per_pixel: f64,
    smoother: MovingAverage,
    series: Vec<ReachSample>,
    /// (reach_px, tid) for beste verdi så langt
    best: Option<(f64, f64)>,
}

impl ReachState {
    pub fn new(cfg: ReachConfig, min_visibility: f64, meters_per_pixel: f64) -> Self {
        Self {
            min_visibility,
            meters_per_pixel,
            smoother: MovingAverage::new(cfg.window),
            series: Vec::new(),
            best: None,
        }
    }

    /// Legger alltid til ett punkt i serien; oppdaterer maks ved strengt bedre verdi.
    pub fn observe(&mut self, smoothed_px: f64, t: f64) -> ReachSample {
        let sample = ReachSample {
            time_s: t,
            reach_px: smoothed_px,
            reach_m: smoothed_px * self.meters_per_pixel,
        };
        self.series.push(sample);
        if self.best.map_or(true, |(best, _)| smoothed_px > best) {
            self.best = Some((smoothed_px, t));
        }
        sample
    }

    pub fn series(&self) -> &[ReachSample] {
        &self.series
    }

    pub fn best(&self) -> Option<(f64, f64)> {
        self.best
    }
}

impl Detector for ReachState {
    fn analyze(&mut self, frame: &Frame) -> Result<Option<ActivityEvent>, ChannelError> {
        // håndledd foran føttene gir positiv reach
        let reach = horizontal_offset(frame, &joints::WRISTS, &joints::FEET, self.min_visibility)?;
        let smoothed = self.smoother.push(reach);
        self.observe(smoothed, frame.timestamp);
        Ok(None)
    }

    fn summarize(&self) -> SummaryRecord {
        SummaryRecord::SitAndReach(summarize_reach(self.best, self.meters_per_pixel))
    }
}
