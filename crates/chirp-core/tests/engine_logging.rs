//! Engine operations report through the instance's own diagnostics target.

use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};

use chirp_core::{Diagnostics, Dispersion, DurationDomain, PulseParams};
use chirp_materials::MaterialCatalog;

struct CaptureLogger {
    records: Mutex<Vec<(String, Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push((
            record.target().to_string(),
            record.level(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

fn logger() -> &'static CaptureLogger {
    static LOGGER: OnceLock<&'static CaptureLogger> = OnceLock::new();
    LOGGER.get_or_init(|| {
        let logger: &'static CaptureLogger = Box::leak(Box::new(CaptureLogger {
            records: Mutex::new(Vec::new()),
        }));
        log::set_logger(logger).unwrap();
        log::set_max_level(LevelFilter::Trace);
        logger
    })
}

fn messages_for(target: &str) -> Vec<(Level, String)> {
    logger()
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(t, _, _)| t == target)
        .map(|(_, level, msg)| (*level, msg.clone()))
        .collect()
}

fn calculator(diagnostics: Diagnostics) -> Dispersion {
    let mut calc = Dispersion::with_catalog(MaterialCatalog::with_builtins().unwrap())
        .with_diagnostics(diagnostics);
    calc.generate_pulse(&PulseParams::default().with_samples(2048)).unwrap();
    calc
}

#[test]
fn test_analysis_operations_log_entry() {
    logger();
    let calc = calculator(Diagnostics::new("chirp::entry"));
    calc.temporal_intensity(true).unwrap();
    calc.spectral_intensity(true).unwrap();
    calc.temporal_phase(true).unwrap();
    calc.spectral_phase(true).unwrap();
    calc.spectral_phase_expansion(2, 1e12).unwrap();
    calc.pulse_duration(DurationDomain::Temporal).unwrap();

    let messages = messages_for("chirp::entry");
    for op in [
        "temporal_intensity",
        "spectral_intensity",
        "temporal_phase",
        "spectral_phase",
        "spectral_phase_expansion",
        "pulse_duration",
    ] {
        let entry = format!("Entering {}", op);
        assert!(
            messages
                .iter()
                .any(|(level, msg)| *level == Level::Debug && (msg == &entry || msg.starts_with(&format!("{}:", entry)))),
            "missing entry line for {}",
            op
        );
    }
}

#[test]
fn test_unknown_material_warns_on_instance_target() {
    logger();
    let mut calc = calculator(Diagnostics::new("chirp::warn"));
    assert!(calc.propagate_material("unobtainium", 1e-3).is_err());
    assert!(messages_for("chirp::warn")
        .iter()
        .any(|(level, msg)| *level == Level::Warn && msg.contains("unobtainium")));
}

#[test]
fn test_silent_instance_emits_nothing() {
    logger();
    let diagnostics = Diagnostics::new("chirp::quiet").with_max_level(LevelFilter::Off);
    let mut calc = calculator(diagnostics);
    calc.propagate_material("fs", 1e-3).unwrap();
    calc.temporal_phase(false).unwrap();
    assert!(messages_for("chirp::quiet").is_empty());
}
