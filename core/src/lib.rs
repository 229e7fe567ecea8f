//! RepSense core: landmark-strøm fra en pose-modell inn, treningshendelser
//! (reps, hopp, shuttle-status) og øktsammendrag ut.
//!
//! Flyt per frame: geometri → glatting → tilstandsmaskin → (ledger).
//! Ved stopp: sammendrag av slutt-tilstanden.

pub mod analyze_session;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod error;
pub mod geometry;
pub mod ledger;
pub mod metrics;
pub mod session;
pub mod smoothing;
pub mod storage;
pub mod summary;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use analyze_session::{analyze_session, analyze_session_json, AnalyzeInputs, AnalyzeOutputs};
pub use config::DetectorConfig;
pub use detectors::{ActivityState, Detector};
pub use error::{ChannelError, SessionError};
pub use session::{FrameOutcome, Session, SessionReport};
pub use storage::{load_config, save_config};
pub use summary::SummaryRecord;
pub use types::{Activity, ActivityEvent, Frame, JumpEvent, Landmark, ReachSample, RepEvent, ShuttlePhase, ShuttleStatus};
