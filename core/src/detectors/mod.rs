//! Én tilstandsmaskin per aktivitet. Hver detektor eier sine glattefiltre og sin ledger,
//! og muteres nøyaktig én gang per frame.

pub mod jump;
pub mod pullup;
pub mod pushup;
pub mod reach;
pub mod shuttle;
pub mod situp;

pub use jump::JumpState;
pub use pullup::PullupState;
pub use pushup::PushupState;
pub use reach::ReachState;
pub use shuttle::ShuttleState;
pub use situp::SitupState;

use crate::config::DetectorConfig;
use crate::error::ChannelError;
use crate::summary::SummaryRecord;
use crate::types::{Activity, ActivityEvent, Frame};

/// Felles kontrakt: konsumerer én frame, gir ut høyst én hendelse.
/// `Err` betyr at framen ble hoppet over for kanalen (lokal feil, økten fortsetter).
pub trait Detector {
    fn analyze(&mut self, frame: &Frame) -> Result<Option<ActivityEvent>, ChannelError>;

    /// Ren funksjon av tilstanden; samme tilstand gir samme sammendrag.
    fn summarize(&self) -> SummaryRecord;
}

/// Lukket sum av detektor-tilstandene. Kun én er levende per økt.
#[derive(Debug, Clone)]
pub enum ActivityState {
    Pushup(PushupState),
    Pullup(PullupState),
    Situp(SitupState),
    VerticalJump(JumpState),
    ShuttleRun(ShuttleState),
    SitAndReach(ReachState),
}

impl ActivityState {
    pub fn new(activity: Activity, cfg: &DetectorConfig) -> Self {
        let vis = cfg.min_visibility;
        let mpp = cfg.calibration.meters_per_pixel;
        match activity {
            Activity::Pushup => ActivityState::Pushup(PushupState::new(cfg.pushup, vis)),
            Activity::Pullup => ActivityState::Pullup(PullupState::new(cfg.pullup, vis)),
            Activity::Situp => ActivityState::Situp(SitupState::new(cfg.situp, vis)),
            Activity::VerticalJump => ActivityState::VerticalJump(JumpState::new(cfg.jump, vis, mpp)),
            Activity::ShuttleRun => ActivityState::ShuttleRun(ShuttleState::new(cfg.shuttle, vis, mpp)),
            Activity::SitAndReach => ActivityState::SitAndReach(ReachState::new(cfg.reach, vis, mpp)),
        }
    }

    pub fn activity(&self) -> Activity {
        match self {
            ActivityState::Pushup(_) => Activity::Pushup,
            ActivityState::Pullup(_) => Activity::Pullup,
            ActivityState::Situp(_) => Activity::Situp,
            ActivityState::VerticalJump(_) => Activity::VerticalJump,
            ActivityState::ShuttleRun(_) => Activity::ShuttleRun,
            ActivityState::SitAndReach(_) => Activity::SitAndReach,
        }
    }
}

impl Detector for ActivityState {
    fn analyze(&mut self, frame: &Frame) -> Result<Option<ActivityEvent>, ChannelError> {
        match self {
            ActivityState::Pushup(s) => s.analyze(frame),
            ActivityState::Pullup(s) => s.analyze(frame),
            ActivityState::Situp(s) => s.analyze(frame),
            ActivityState::VerticalJump(s) => s.analyze(frame),
            ActivityState::ShuttleRun(s) => s.analyze(frame),
            ActivityState::SitAndReach(s) => s.analyze(frame),
        }
    }

    fn summarize(&self) -> SummaryRecord {
        match self {
            ActivityState::Pushup(s) => s.summarize(),
            ActivityState::Pullup(s) => s.summarize(),
            ActivityState::Situp(s) => s.summarize(),
            ActivityState::VerticalJump(s) => s.summarize(),
            ActivityState::ShuttleRun(s) => s.summarize(),
            ActivityState::SitAndReach(s) => s.summarize(),
        }
    }
}
