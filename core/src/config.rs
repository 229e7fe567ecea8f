use serde::{Deserialize, Serialize};

/// Terskler og vinduer for alle detektorene. Alle felt har defaults,
/// så en delvis JSON-fil (eller `{}`) er gyldig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Landmarks med lavere visibility regnes som manglende.
    pub min_visibility: f64,
    pub calibration: Calibration,
    pub pushup: PushupConfig,
    pub pullup: PullupConfig,
    pub situp: SitupConfig,
    pub jump: JumpConfig,
    pub shuttle: ShuttleConfig,
    pub reach: ReachConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_visibility: 0.5,
            calibration: Calibration::default(),
            pushup: PushupConfig::default(),
            pullup: PullupConfig::default(),
            situp: SitupConfig::default(),
            jump: JumpConfig::default(),
            shuttle: ShuttleConfig::default(),
            reach: ReachConfig::default(),
        }
    }
}

/// Fast skala piksel → meter. Grov tilnærming uten kamerakalibrering;
/// verdiene er ikke metrisk nøyaktige.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    pub meters_per_pixel: f64,
}

pub const DEFAULT_METERS_PER_PIXEL: f64 = 0.0025; // ~400 px per meter

impl Default for Calibration {
    fn default() -> Self {
        Self { meters_per_pixel: DEFAULT_METERS_PER_PIXEL }
    }
}

impl Calibration {
    #[inline]
    pub fn px_to_m(&self, px: f64) -> f64 {
        px * self.meters_per_pixel
    }

    #[inline]
    pub fn px_to_cm(&self, px: f64) -> f64 {
        self.px_to_m(px) * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushupConfig {
    pub window: usize,
    /// inn i `down` ved vinkel <= denne
    pub down_deg: f64,
    /// tilbake til `up` ved vinkel >= denne
    pub up_deg: f64,
    /// dypeste vinkel må være <= denne for korrekt rep
    pub correct_depth_deg: f64,
    /// kortere dipper regnes som støy og sendes ikke ut
    pub min_dip_sec: f64,
}

impl Default for PushupConfig {
    fn default() -> Self {
        Self {
            window: 3,
            down_deg: 75.0,
            up_deg: 110.0,
            correct_depth_deg: 75.0,
            min_dip_sec: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullupConfig {
    pub window: usize,
    /// repen lukkes når albuevinkelen er over denne
    pub extended_deg: f64,
    /// hodet må være så mange piksler over baseline for å starte en rep
    pub head_rise_px: f64,
    pub min_dip_sec: f64,
}

impl Default for PullupConfig {
    fn default() -> Self {
        Self {
            window: 3,
            extended_deg: 160.0,
            head_rise_px: 0.0,
            min_dip_sec: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitupConfig {
    pub window: usize,
    /// utslag (grader) fra siste ekstrem som trigger faseskifte
    pub swing_deg: f64,
}

impl Default for SitupConfig {
    fn default() -> Self {
        Self { window: 5, swing_deg: 15.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    pub window: usize,
    /// hofta må være mer enn dette over baseline for "i lufta"
    pub takeoff_px: f64,
    /// landet når hofta er kommet ned til minst `baseline - landing_tolerance_px` (lavere teller også)
    pub landing_tolerance_px: f64,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            window: 5,
            takeoff_px: 20.0,
            landing_tolerance_px: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuttleConfig {
    pub window: usize,
    /// minste Δx (piksler) mellom frames som teller som bevegelse
    pub step_px: f64,
    /// antall like retninger på rad før retningen er bekreftet
    pub confirm_len: usize,
}

impl Default for ShuttleConfig {
    fn default() -> Self {
        Self {
            window: 5,
            step_px: 5.0,
            confirm_len: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReachConfig {
    pub window: usize,
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self { window: 5 }
    }
}
