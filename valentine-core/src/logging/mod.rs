//! Structured logging
//!
//! Subsystems log through `tracing` macros; this module installs the
//! subscriber once. `RUST_LOG` overrides the configured filter.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Lenient parse for command-line flags; unknown names map to Info.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

/// Our own crates log at `level`; everything else (bevy scheduling
/// included) stays at `dependency_level`.
#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    pub level: LogLevel,
    pub dependency_level: LogLevel,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::with_level(LogLevel::Info)
    }
}

impl TracingConfig {
    pub fn with_level(level: LogLevel) -> Self {
        Self {
            level,
            dependency_level: LogLevel::Warn,
        }
    }

    pub fn to_env_filter_string(&self) -> String {
        let level = self.level.as_str();
        format!(
            "{},valentine_core={level},valentine_sim={level}",
            self.dependency_level.as_str()
        )
    }
}

static TRACING_INIT: Once = Once::new();

/// First call wins; later calls are no-ops.
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        // a global subscriber may already be installed by the host
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .try_init();
    });
}
