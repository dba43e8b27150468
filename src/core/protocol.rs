//! Request/response envelope exchanged with SOPS over stdin/stdout.
//!
//! Every exchange starts with a header line written by the helper, then the
//! whole of stdin is read as one JSON request, and finally one JSON response
//! is written as a single newline-terminated line.

use std::collections::{BTreeMap, HashMap};
use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProtocolError, Result};

/// Request for `encrypt` and `decrypt`.
#[derive(Debug, Clone, Deserialize)]
pub struct EncryptionRequest {
    /// Plaintext (encrypt) or base64 ciphertext (decrypt).
    pub payload: String,
    /// Base64 of comma-separated recipients (encrypt) or private keys (decrypt).
    #[serde(default)]
    pub key: Option<String>,
}

/// Response for `encrypt` and `decrypt`.
#[derive(Debug, Clone, Serialize)]
pub struct EncryptionResponse {
    pub payload: String,
}

/// Request for `key-provider`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyProviderRequest {
    #[serde(default)]
    pub external_data: Option<HashMap<String, String>>,
}

/// Key material handed back to SOPS.
#[derive(Debug, Clone, Serialize)]
pub struct Keys {
    /// Base64 of comma-joined recipients.
    pub encryption_key: String,
    /// Base64 of comma-joined private keys, only when external data was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decryption_key: Option<String>,
}

/// Metadata returned alongside the keys.
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub external_data: BTreeMap<String, String>,
}

/// Response for `key-provider`.
#[derive(Debug, Clone, Serialize)]
pub struct KeyProviderResponse {
    pub keys: Keys,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// Write the protocol header line.
pub fn write_header<W: Write>(output: &mut W, header: &str) -> Result<()> {
    writeln!(output, "{}", header)?;
    output.flush()?;
    Ok(())
}

/// Read all of `input` and parse it as a JSON request.
///
/// # Errors
///
/// Returns `ProtocolError::Parse` if the input is not valid JSON for `T`.
pub fn read_request<T: DeserializeOwned, R: Read>(input: &mut R) -> Result<T> {
    let mut raw = String::new();
    input.read_to_string(&mut raw)?;
    debug!(len = raw.len(), "request read");

    let request = serde_json::from_str(&raw).map_err(ProtocolError::Parse)?;
    Ok(request)
}

/// Serialize `response` as one JSON line.
pub fn write_response<T: Serialize, W: Write>(output: &mut W, response: &T) -> Result<()> {
    let line = serde_json::to_string(response).map_err(ProtocolError::Serialize)?;
    writeln!(output, "{}", line)?;
    output.flush()?;
    Ok(())
}

/// Base64-encode bytes with the standard alphabet.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 field.
///
/// # Errors
///
/// Returns `ProtocolError::InvalidBase64` naming `field`.
pub fn decode(field: &'static str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value.trim())
        .map_err(|source| ProtocolError::InvalidBase64 { field, source }.into())
}

/// Decode a base64 field holding UTF-8 text.
pub fn decode_text(field: &'static str, value: &str) -> Result<String> {
    String::from_utf8(decode(field, value)?).map_err(|_| ProtocolError::InvalidUtf8(field).into())
}
