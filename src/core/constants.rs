//! Constants used throughout the helper.
//!
//! Centralizes environment variable names and protocol strings.

/// Variables holding a path to a private key file, highest priority first.
pub const KEY_FILE_VARS: &[&str] = &["AGE_KEY_FILE", "SOPS_AGE_KEY_FILE"];

/// Variables holding private keys inline, highest priority first.
pub const KEY_VARS: &[&str] = &["AGE_KEY", "SOPS_AGE_KEY"];

/// Variables holding a path to a recipients file, highest priority first.
pub const RECIPIENTS_FILE_VARS: &[&str] = &["AGE_RECIPIENTS_FILE", "SOPS_AGE_RECIPIENTS_FILE"];

/// Variables holding recipients inline, highest priority first.
pub const RECIPIENTS_VARS: &[&str] = &["AGE_RECIPIENTS", "SOPS_AGE_RECIPIENTS"];

/// Toggle for verbose diagnostics and the debug log file (`true` or `1`).
pub const DEBUG_VAR: &str = "DEBUG";

/// Log level override (`error`, `warn`, `info`, `debug`).
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Disables ANSI colours on stderr when set.
pub const NO_COLOR_VAR: &str = "NO_COLOR";

/// Debug log file, appended to in the working directory.
pub const DEBUG_LOG_FILE: &str = "sops-age-helper-debug.log";

/// Header line written before an encrypt or decrypt response.
pub const ENCRYPTION_HEADER: &str = "Encryption";

/// Header line written before a key-provider response.
pub const KEY_PROVIDER_HEADER: &str = "KeyProvider";

/// Prefix of the synthetic keys in `meta.external_data`.
pub const RECIPIENT_META_PREFIX: &str = "recipient-";

/// Full `tracing` filter directive, overriding `LOG_LEVEL` (e.g. `sops_age_helper=trace`).
pub const LOG_FILTER_VAR: &str = "SOPS_AGE_HELPER_LOG";
