use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Tellere for frame-pipelinen. Alle er merket med aktivitet.
pub struct Metrics {
    pub registry: Registry,
    pub frames_processed_total: IntCounterVec,
    pub frames_skipped_total: IntCounterVec,
    pub events_emitted_total: IntCounterVec,
    pub sessions_started_total: IntCounterVec,
    pub sessions_completed_total: IntCounterVec,
}

fn counter(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> prometheus::Result<IntCounterVec> {
    let c = IntCounterVec::new(Opts::new(name, help).namespace("repsense"), labels)?;
    registry.register(Box::new(c.clone()))?;
    Ok(c)
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        Ok(Self {
            frames_processed_total: counter(&registry, "frames_processed_total", "Frames analysert", &["activity"])?,
            frames_skipped_total: counter(
                &registry,
                "frames_skipped_total",
                "Frames hoppet over for kanalen",
                &["activity", "reason"],
            )?,
            events_emitted_total: counter(&registry, "events_emitted_total", "Hendelser sendt ut", &["activity"])?,
            sessions_started_total: counter(&registry, "sessions_started_total", "Økter startet", &["activity"])?,
            sessions_completed_total: counter(
                &registry,
                "sessions_completed_total",
                "Økter avsluttet og oppsummert",
                &["activity"],
            )?,
            registry,
        })
    }

    /// Tekstformat (Prometheus exposition) for alle tellere.
    pub fn gather_text(&self) -> String {
        let mut buf = Vec::new();
        let families = self.registry.gather();
        if let Err(e) = TextEncoder::new().encode(&families, &mut buf) {
            log::warn!("metrics: encode feilet: {e}");
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

static GLOBAL: Lazy<Metrics> = Lazy::new(|| Metrics::new().expect("metrics-registry kunne ikke bygges"));

/// Prosess-global instans (tellere er atomiske; ingen deling av økt-tilstand).
pub fn global() -> &'static Metrics {
    &GLOBAL
}

pub fn gather_text() -> String {
    global().gather_text()
}
