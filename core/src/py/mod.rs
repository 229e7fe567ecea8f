use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use serde_json as json;
use serde_path_to_error as spte;

use crate::analyze_session::parse_config_value;
use crate::config::DetectorConfig;
use crate::error::SessionError;
use crate::session::Session;
use crate::types::{Activity, Frame};

// ──────────────────────────────────────────────────────────────────────────────
// HJELPERE
// ──────────────────────────────────────────────────────────────────────────────

fn to_py_err(e: SessionError) -> PyErr {
    match e {
        // bruksfeil (rekkefølge, lukket økt) er programmeringsfeil hos kaller
        SessionError::NonMonotonicTimestamp { .. } | SessionError::SessionClosed => {
            PyRuntimeError::new_err(e.to_string())
        }
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn config_from_json(config_json: Option<&str>) -> Result<DetectorConfig, SessionError> {
    match config_json {
        Some(s) => parse_config_value(json::from_str(s)?),
        None => Ok(DetectorConfig::default()),
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// LIVE-ØKT
// ──────────────────────────────────────────────────────────────────────────────

/// Live-modus: kaller mater frames som JSON, én om gangen.
#[pyclass(name = "Session")]
struct PySession {
    inner: Session,
}

#[pymethods]
impl PySession {
    #[new]
    #[pyo3(signature = (activity, sample_rate_hz = 30.0, config_json = None))]
    fn new(activity: &str, sample_rate_hz: f64, config_json: Option<&str>) -> PyResult<Self> {
        let activity: Activity = activity.parse().map_err(to_py_err)?;
        let cfg = config_from_json(config_json).map_err(to_py_err)?;
        Ok(Self { inner: Session::start(activity, sample_rate_hz, &cfg) })
    }

    #[getter]
    fn session_id(&self) -> String {
        self.inner.session_id().to_string()
    }

    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Returnerer FrameOutcome som JSON (`{"event": ..., "skipped": ...}`).
    fn push_frame(&mut self, frame_json: &str) -> PyResult<String> {
        let mut de = json::Deserializer::from_str(frame_json);
        let frame: Frame = spte::deserialize(&mut de).map_err(|e| {
            PyValueError::new_err(format!("parse error (Frame) at {}: {}", e.path(), e))
        })?;
        let outcome = self.inner.push_frame(&frame).map_err(to_py_err)?;
        json::to_string(&outcome).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Avslutter økten og returnerer rapporten som JSON.
    fn stop(&mut self) -> PyResult<String> {
        let report = self.inner.stop().map_err(to_py_err)?;
        json::to_string(&report).map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// FUNKSJONER
// ──────────────────────────────────────────────────────────────────────────────

#[pyfunction]
fn analyze_session_json(payload: &str) -> PyResult<String> {
    crate::analyze_session::analyze_session_json(payload).map_err(to_py_err)
}

#[pyfunction]
fn default_config_json() -> PyResult<String> {
    json::to_string_pretty(&DetectorConfig::default()).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn list_activities() -> Vec<&'static str> {
    Activity::ALL.iter().map(|a| a.key()).collect()
}

#[pyfunction]
fn metrics_text() -> String {
    crate::metrics::gather_text()
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn repsense_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PySession>()?;
    m.add_function(wrap_pyfunction!(analyze_session_json, m)?)?;
    m.add_function(wrap_pyfunction!(default_config_json, m)?)?;
    m.add_function(wrap_pyfunction!(list_activities, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}
