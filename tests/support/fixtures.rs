//! Test fixtures and key helpers.

use age::secrecy::ExposeSecret;
use age::x25519;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Credential and logging variables cleared for every child process.
pub const HELPER_VARS: &[&str] = &[
    "AGE_KEY_FILE",
    "SOPS_AGE_KEY_FILE",
    "AGE_KEY",
    "SOPS_AGE_KEY",
    "AGE_RECIPIENTS_FILE",
    "SOPS_AGE_RECIPIENTS_FILE",
    "AGE_RECIPIENTS",
    "SOPS_AGE_RECIPIENTS",
    "DEBUG",
    "LOG_LEVEL",
    "SOPS_AGE_HELPER_LOG",
];

/// A valid age public key with no known private key.
pub const BOB_PUBLIC_KEY: &str = "age1ql3z7hjy54pw3hyww5ayyfg7zqgvc7w3j2elw8zmrj2kg5sfn9aqmcac8p";

/// A freshly generated age key pair.
pub struct Key {
    pub secret: String,
    pub recipient: String,
}

impl Key {
    pub fn generate() -> Self {
        let identity = x25519::Identity::generate();
        Self {
            secret: identity.to_string().expose_secret().to_string(),
            recipient: identity.to_public().to_string(),
        }
    }
}

/// A key file in the format written by `age-keygen`.
pub fn key_file(keys: &[&Key]) -> String {
    let mut contents = String::new();
    for key in keys {
        contents.push_str("# created: 2024-01-01T00:00:00Z\n");
        contents.push_str(&format!("# public key: {}\n", key.recipient));
        contents.push_str(&key.secret);
        contents.push('\n');
    }
    contents
}

pub fn b64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

pub fn unb64(text: &str) -> String {
    String::from_utf8(STANDARD.decode(text).expect("invalid base64")).expect("invalid utf-8")
}
