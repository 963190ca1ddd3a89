//! Diagnostics sink
//!
//! Components report progress through an injected [`Diagnostics`] value
//! rather than a process-wide logger.

use log::Level;
use std::sync::Mutex;

pub trait Diagnostics: Send + Sync {
    fn report(&self, level: Level, message: &str);
}

/// Forwards every report to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: "photo_booklet", level, "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    pub level: Level,
    pub message: String,
}

/// Keeps reports in memory
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<DiagnosticEntry>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message).collect()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn report(&self, level: Level, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(DiagnosticEntry {
                level,
                message: message.to_string(),
            });
        }
    }
}
