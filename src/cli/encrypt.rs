//! Encrypt command.
//!
//! Encrypts the request payload for the resolved recipients and returns the
//! base64 age ciphertext.

use std::io::{Read, Write};

use tracing::debug;

use crate::core::cipher;
use crate::core::constants::ENCRYPTION_HEADER;
use crate::core::protocol::{self, EncryptionRequest, EncryptionResponse};
use crate::core::recipient::Deriver;
use crate::core::resolver::Resolver;
use crate::core::source::Source;
use crate::core::types::Recipient;
use crate::error::{CipherError, Result};

/// Handle one encrypt exchange.
///
/// A non-blank `key` in the request is used as the recipient list and the
/// environment is not consulted.
pub fn run<R, W, S, D>(input: &mut R, output: &mut W, resolver: &Resolver<S, D>) -> Result<()>
where
    R: Read,
    W: Write,
    S: Source,
    D: Deriver,
{
    protocol::write_header(output, ENCRYPTION_HEADER)?;

    let request: EncryptionRequest = protocol::read_request(input)?;

    let entries = match request.key.as_deref().filter(|k| !k.trim().is_empty()) {
        Some(key) => request_recipients(key)?,
        None => resolver.recipients()?,
    };

    let recipients = entries
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(cipher::parse_recipient)
        .collect::<Result<Vec<_>>>()?;
    if recipients.is_empty() {
        return Err(CipherError::NoRecipients.into());
    }
    debug!(recipients = recipients.len(), "encrypting payload");

    let ciphertext = cipher::encrypt(request.payload.as_bytes(), &recipients)?;

    let response = EncryptionResponse {
        payload: protocol::encode(&ciphertext),
    };
    debug!(len = response.payload.len(), "encrypt output");
    protocol::write_response(output, &response)
}

/// Recipients carried in the request's base64 `key` field.
fn request_recipients(key: &str) -> Result<Vec<Recipient>> {
    let decoded = protocol::decode_text("key", key)?;
    Ok(decoded
        .split(',')
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect())
}
