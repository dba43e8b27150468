//! Decrypt command.
//!
//! Decrypts a base64 age payload with the private keys sent in the request.

use std::io::{Read, Write};

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::cipher;
use crate::core::constants::ENCRYPTION_HEADER;
use crate::core::protocol::{self, EncryptionRequest, EncryptionResponse};
use crate::error::{CipherError, ProtocolError, Result};

/// Handle one decrypt exchange.
///
/// The request's `key` field is base64 of comma-separated private keys; the
/// environment is never consulted.
pub fn run<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    protocol::write_header(output, ENCRYPTION_HEADER)?;

    let request: EncryptionRequest = protocol::read_request(input)?;
    let key = request
        .key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(ProtocolError::MissingField("key"))?;

    let keys = Zeroizing::new(protocol::decode_text("key", key)?);
    let identities = keys
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(cipher::parse_identity)
        .collect::<Result<Vec<_>>>()?;
    if identities.is_empty() {
        return Err(CipherError::NoIdentities.into());
    }
    debug!(identities = identities.len(), "decrypting payload");

    let ciphertext = protocol::decode("payload", &request.payload)?;
    let plaintext = cipher::decrypt(&ciphertext, &identities)?;

    let response = EncryptionResponse {
        payload: String::from_utf8_lossy(&plaintext).into_owned(),
    };
    debug!(len = response.payload.len(), "decrypt output");
    protocol::write_response(output, &response)
}
