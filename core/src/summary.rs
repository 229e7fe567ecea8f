//! Rene reduksjoner fra slutt-tilstand til ett sammendrag per aktivitet.
//! Tom økt gir alltid et sammendrag med nuller.

use serde::{Deserialize, Serialize};

use crate::types::{JumpEvent, RepEvent};

// --- RoundTo trait (avrunding av rapporterte snittverdier) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 {
            return self.round();
        }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Snitt med nulldelingsvakt.
#[inline]
pub(crate) fn mean<I: IntoIterator<Item = f64>>(xs: I) -> f64 {
    let (sum, n) = xs.into_iter().fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PushupSummary {
    pub count: u32,
    pub good_reps: u32,
    pub bad_reps: u32,
    pub avg_min_elbow_angle: f64,
    pub avg_dip_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PullupSummary {
    pub count: u32,
    pub avg_dip_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SitupSummary {
    pub count: u32,
    pub avg_angle_change: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JumpSummary {
    pub count: u32,
    pub max_height_cm: f64,
    pub avg_air_time: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShuttleSummary {
    pub runs: u32,
    pub distance_m: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReachSummary {
    pub max_reach_cm: f64,
    pub time_of_max: f64,
}

/// Ett sammendrag per økt; formen avhenger av aktiviteten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "activity", rename_all = "snake_case")]
pub enum SummaryRecord {
    Pushup(PushupSummary),
    Pullup(PullupSummary),
    Situp(SitupSummary),
    VerticalJump(JumpSummary),
    ShuttleRun(ShuttleSummary),
    SitAndReach(ReachSummary),
}

pub fn summarize_pushups(reps: &[RepEvent]) -> PushupSummary {
    let good = reps.iter().filter(|r| r.is_correct == Some(true)).count() as u32;
    let count = reps.len() as u32;
    PushupSummary {
        count,
        good_reps: good,
        bad_reps: count - good,
        avg_min_elbow_angle: mean(reps.iter().map(|r| r.extremum_angle)).round_to(3),
        avg_dip_duration: mean(reps.iter().map(|r| r.duration_sec)).round_to(3),
    }
}

pub fn summarize_pullups(reps: &[RepEvent]) -> PullupSummary {
    PullupSummary {
        count: reps.len() as u32,
        avg_dip_duration: mean(reps.iter().map(|r| r.duration_sec)).round_to(3),
    }
}

pub fn summarize_situps(reps: &[RepEvent]) -> SitupSummary {
    SitupSummary {
        count: reps.len() as u32,
        avg_angle_change: mean(reps.iter().map(|r| r.extremum_angle)).round_to(3),
    }
}

pub fn summarize_jumps(jumps: &[JumpEvent], meters_per_pixel: f64) -> JumpSummary {
    let max_px = jumps.iter().map(|j| j.height_px).fold(0.0, f64::max);
    JumpSummary {
        count: jumps.len() as u32,
        max_height_cm: (max_px * meters_per_pixel * 100.0).round_to(2),
        avg_air_time: mean(jumps.iter().map(|j| j.air_time_sec)).round_to(3),
    }
}

/// `distance_m` er spennet (maks − min) i posisjonshistorikken, ikke summen av legger.
/// `span_px` er (min, max) av glattede posisjoner; `None` når ingen frame er sett.
pub fn summarize_shuttle(run_count: u32, span_px: Option<(f64, f64)>, meters_per_pixel: f64) -> ShuttleSummary {
    let spread = span_px.map_or(0.0, |(lo, hi)| hi - lo);
    ShuttleSummary {
        runs: run_count,
        distance_m: (spread * meters_per_pixel).round_to(3),
    }
}

pub fn summarize_reach(best: Option<(f64, f64)>, meters_per_pixel: f64) -> ReachSummary {
    match best {
        Some((reach_px, t)) => ReachSummary {
            max_reach_cm: (reach_px * meters_per_pixel * 100.0).round_to(2),
            time_of_max: t,
        },
        None => ReachSummary::default(),
    }
}
