use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Joint-indekser fra pose-modellen (33 punkter). Dette er en ekstern kontrakt:
/// endres nummereringen må alle detektorene oppdateres.
pub mod joints {
    pub const NOSE: usize = 0;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
    pub const LEFT_FOOT: usize = 31;
    pub const RIGHT_FOOT: usize = 32;

    /// Skulder-albue-håndledd, venstre og høyre side.
    pub const ELBOW_TRIPLES: [(usize, usize, usize); 2] = [
        (LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST),
        (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST),
    ];
    pub const HIPS: [usize; 2] = [LEFT_HIP, RIGHT_HIP];
    pub const WRISTS: [usize; 2] = [LEFT_WRIST, RIGHT_WRIST];
    pub const FEET: [usize; 2] = [LEFT_FOOT, RIGHT_FOOT];
    pub const LOWER_BODY: [usize; 4] = [LEFT_ANKLE, RIGHT_ANKLE, LEFT_FOOT, RIGHT_FOOT];
}

/// Ett normalisert leddpunkt (0..1 relativt til bildets bredde/høyde).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default, alias = "score", alias = "confidence")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None, visibility: None }
    }
}

/// Én frame fra pose-modellen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Indeksert etter `joints`; hull (`null`) betyr at modellen ikke fant punktet.
    #[serde(alias = "keypoints")]
    pub landmarks: Vec<Option<Landmark>>,
    pub width: f64,
    pub height: f64,
    /// sekunder, ikke-synkende innen en økt
    #[serde(alias = "t", alias = "time_s")]
    pub timestamp: f64,
}

impl Frame {
    pub fn new(landmarks: Vec<Option<Landmark>>, width: f64, height: f64, timestamp: f64) -> Self {
        Self { landmarks, width, height, timestamp }
    }

    pub fn landmark(&self, idx: usize) -> Option<&Landmark> {
        self.landmarks.get(idx).and_then(|l| l.as_ref())
    }

    /// Avviser frames som ville gitt NaN i hele kjeden.
    pub fn validate(&self) -> Result<(), SessionError> {
        if !self.timestamp.is_finite() {
            return Err(SessionError::InvalidFrame(format!(
                "timestamp er ikke endelig ({})",
                self.timestamp
            )));
        }
        let dims_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !dims_ok {
            return Err(SessionError::InvalidFrame(format!(
                "ugyldige dimensjoner {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Lukket sett av aktiviteter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Pushup,
    Pullup,
    Situp,
    VerticalJump,
    ShuttleRun,
    SitAndReach,
}

impl Activity {
    pub const ALL: [Activity; 6] = [
        Activity::Pushup,
        Activity::Pullup,
        Activity::Situp,
        Activity::VerticalJump,
        Activity::ShuttleRun,
        Activity::SitAndReach,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Activity::Pushup => "pushup",
            Activity::Pullup => "pullup",
            Activity::Situp => "situp",
            Activity::VerticalJump => "vertical_jump",
            Activity::ShuttleRun => "shuttle_run",
            Activity::SitAndReach => "sit_and_reach",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Activity {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Tolerant: aksepter bindestrek/mellomrom og noen vanlige kortnavn
        let norm = s.trim().to_lowercase().replace(['-', ' '], "_");
        match norm.as_str() {
            "pushup" | "push_up" | "pushups" => Ok(Activity::Pushup),
            "pullup" | "pull_up" | "pullups" => Ok(Activity::Pullup),
            "situp" | "sit_up" | "situps" => Ok(Activity::Situp),
            "vertical_jump" | "verticaljump" | "jump" => Ok(Activity::VerticalJump),
            "shuttle_run" | "shuttlerun" | "shuttle" => Ok(Activity::ShuttleRun),
            "sit_and_reach" | "sitandreach" | "reach" | "flexibility" => Ok(Activity::SitAndReach),
            _ => Err(SessionError::UnknownActivity(s.to_string())),
        }
    }
}

/// Fullført repetisjon (push-up, pull-up, sit-up).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepEvent {
    pub sequence_number: u32,
    pub phase_start_time: f64,
    pub phase_end_time: f64,
    pub duration_sec: f64,
    /// push-up/pull-up: minste albuevinkel i dippen.
    /// sit-up: størrelsen på vinkelutslaget (topp minus bunn).
    pub extremum_angle: f64,
    /// Kun klassifisert for push-ups.
    pub is_correct: Option<bool>,
}

/// Ferdig hopp, lagres først ved landing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpEvent {
    pub takeoff_time: f64,
    pub landing_time: f64,
    pub height_px: f64,
    pub air_time_sec: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuttlePhase {
    #[serde(rename = "Running Towards")]
    RunningTowards,
    #[serde(rename = "Returning")]
    Returning,
    #[serde(rename = "Waiting")]
    Waiting,
}

impl ShuttlePhase {
    pub fn label(&self) -> &'static str {
        match self {
            ShuttlePhase::RunningTowards => "Running Towards",
            ShuttlePhase::Returning => "Returning",
            ShuttlePhase::Waiting => "Waiting",
        }
    }
}

/// Løpende status for shuttle run (ikke en ledger-post).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShuttleStatus {
    pub run_count: u32,
    pub status: ShuttlePhase,
}

/// Ett punkt i den tette reach-serien.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReachSample {
    pub time_s: f64,
    pub reach_px: f64,
    pub reach_m: f64,
}

/// Det en frame kan gi ut. Typen er alltid entydig for en gitt aktivitet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    Rep(RepEvent),
    Jump(JumpEvent),
    Shuttle(ShuttleStatus),
}
