//! In-memory log capture for unit tests.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Logger that keeps every record in memory
pub(crate) struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl CaptureLogger {
    /// True if any record at `level` contains `needle`
    pub(crate) fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

/// Install the capture logger (once per test binary) and return it
pub(crate) fn capture_logs() -> &'static CaptureLogger {
    // tests run in parallel, only the first install succeeds
    let _ = log::set_logger(&CAPTURE);
    log::set_max_level(LevelFilter::Trace);
    &CAPTURE
}
