//! Error types.
//!
//! Every failure is terminal for the current invocation: the handler logs it
//! and the process exits without writing a response body.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for a helper invocation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a credential lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    PrivateKey,
    Recipients,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::PrivateKey => f.write_str("Private key"),
            Subject::Recipients => f.write_str("Recipients"),
        }
    }
}

/// Failures while resolving private keys or recipients from the environment.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// No credential variable was set (or all were blank).
    #[error(
        "{subject} not found in any of these environment variables (in order): {}",
        quoted(.vars)
    )]
    NotFound {
        subject: Subject,
        vars: Vec<&'static str>,
    },

    /// The chosen source was set but yielded no usable entries.
    #[error("{subject} not present in {}", origin(.var, .path))]
    EmptySource {
        subject: Subject,
        var: &'static str,
        path: Option<PathBuf>,
    },

    /// A private key could not be turned into its recipient.
    #[error("Failed to extract recipient from private key: {0}")]
    DerivationFailed(String),

    /// The file named by a credential variable could not be read.
    #[error("failed to read '{}' (env var: '{var}'): {source}", .path.display())]
    ReadFailed {
        var: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures in the age encryption collaborator and its inputs.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("recipients not found")]
    NoRecipients,

    #[error("Private keys not sent")]
    NoIdentities,

    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("invalid private key: {0}")]
    InvalidIdentity(String),

    #[error("Failed to encrypt data: {0}")]
    EncryptionFailed(String),

    #[error("Failed to decrypt data: {0}")]
    DecryptionFailed(String),
}

/// Failures reading or interpreting a protocol request.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("failed to parse request: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to serialize response: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("request is missing field '{0}'")]
    MissingField(&'static str),

    #[error("invalid base64 in field '{field}': {source}")]
    InvalidBase64 {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("field '{0}' is not valid UTF-8")]
    InvalidUtf8(&'static str),
}

fn quoted(vars: &[&'static str]) -> String {
    vars.iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(",")
}

fn origin(var: &str, path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("'{}' (env var: '{}')", path.display(), var),
        None => format!("env var: '{}'", var),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
