use std::path::Path;

use log::{info, warn};

use crate::config::DetectorConfig;
use crate::error::SessionError;

/// Leser inn detektor-konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DetectorConfig, SessionError> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let mut de = serde_json::Deserializer::from_str(&contents);
        let cfg: DetectorConfig =
            serde_path_to_error::deserialize(&mut de).map_err(SessionError::from_path_error)?;
        info!(
            "📂 Konfig lastet fra {} (min_visibility={})",
            path.display(),
            cfg.min_visibility
        );
        Ok(cfg)
    } else {
        warn!("⚠️ Fant ikke konfig på {}, bruker default", path.display());
        Ok(DetectorConfig::default())
    }
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config<P: AsRef<Path>>(cfg: &DetectorConfig, path: P) -> Result<(), SessionError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(cfg)?;
    std::fs::write(path, json)?;
    info!("✅ Konfig lagret til {}", path.display());
    Ok(())
}
