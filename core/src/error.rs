use serde::Serialize;
use thiserror::Error;

/// Lokal feil for én kanal i én frame.
/// Håndteres ved å hoppe over framen for den kanalen, aldri ved å stoppe økten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "joint", rename_all = "snake_case")]
pub enum ChannelError {
    #[error("landmark {0} mangler eller har for lav visibility")]
    MissingLandmark(usize),
    #[error("degenerert geometri rundt joint {0} (vektor med ~0 lengde)")]
    DegenerateGeometry(usize),
}

impl ChannelError {
    /// Kort label for metrics (`reason`-label).
    pub fn reason(&self) -> &'static str {
        match self {
            ChannelError::MissingLandmark(_) => "missing_landmark",
            ChannelError::DegenerateGeometry(_) => "degenerate_geometry",
        }
    }
}

/// Feil som er fatale for kallet. Feil bruk av en økt (rekkefølge, lukket økt)
/// er programmeringsfeil hos kaller og skal ikke svelges.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("frame timestamp {current} er eldre enn forrige frame ({previous})")]
    NonMonotonicTimestamp { previous: f64, current: f64 },

    #[error("økten er allerede avsluttet")]
    SessionClosed,

    #[error("ugyldig frame: {0}")]
    InvalidFrame(String),

    #[error("ukjent aktivitet '{0}'")]
    UnknownActivity(String),

    #[error("parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SessionError {
    pub(crate) fn from_path_error(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        SessionError::Parse {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    }
}
