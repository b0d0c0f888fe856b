//! Per-instance diagnostic configuration.
//!
//! Engines log through the `log` facade under their own target and level
//! ceiling, so two engines in one process can be traced independently
//! (`RUST_LOG=chirp::bench=debug`) or silenced without touching global state.

use std::fmt;

use log::{Level, LevelFilter};

/// Where and how verbosely an engine reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    target: String,
    max_level: LevelFilter,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new("chirp")
    }
}

impl Diagnostics {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            max_level: LevelFilter::Trace,
        }
    }

    /// Diagnostics that never emit.
    pub fn silent() -> Self {
        Self::default().with_max_level(LevelFilter::Off)
    }

    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    pub fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            log::log!(target: self.target.as_str(), level, "{}", args);
        }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ceiling() {
        let diag = Diagnostics::new("chirp::test").with_max_level(LevelFilter::Warn);
        assert!(diag.enabled(Level::Error));
        assert!(diag.enabled(Level::Warn));
        assert!(!diag.enabled(Level::Debug));
        assert!(!Diagnostics::silent().enabled(Level::Error));
        assert_eq!(diag.target(), "chirp::test");
    }
}
