//! Runtime settings.
//!
//! Read once at start-up from the environment. Credential variables are not
//! part of the settings; the resolver reads those when it runs.

use std::fmt;
use std::str::FromStr;

use crate::core::constants::{DEBUG_VAR, LOG_FILTER_VAR, LOG_LEVEL_VAR, NO_COLOR_VAR};

/// Verbosity of the diagnostics sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("invalid log level: {}", other)),
        }
    }
}

/// Diagnostics configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Effective log level.
    pub level: LogLevel,
    /// `DEBUG` is on: force debug output and write the debug log file.
    pub debug: bool,
    /// `NO_COLOR` is set.
    pub no_color: bool,
    /// Raw `tracing` filter directive, overriding `level`.
    pub filter: Option<String>,
    /// A `LOG_LEVEL` value that was not recognised.
    pub ignored_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            debug: false,
            no_color: false,
            filter: None,
            ignored_level: None,
        }
    }
}

impl Settings {
    /// Settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = matches!(lookup(DEBUG_VAR).as_deref(), Some("true") | Some("1"));

        let mut settings = Settings {
            debug,
            no_color: lookup(NO_COLOR_VAR).is_some(),
            filter: lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()),
            ..Settings::default()
        };

        if let Some(raw) = lookup(LOG_LEVEL_VAR) {
            match raw.parse::<LogLevel>() {
                Ok(level) => settings.level = level,
                Err(_) => settings.ignored_level = Some(raw),
            }
        }

        if debug {
            settings.level = LogLevel::Debug;
        }

        settings
    }
}
