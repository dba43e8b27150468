//! Age encryption backend implementation.
//!
//! Encrypts to binary age ciphertext; decrypts either binary or ASCII-armored
//! input.

use std::io::{Read, Write};

use ::age::x25519;
use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::error::{CipherError, Result};

/// Age-based cryptographic backend using x25519 keys
pub struct Age;

impl Cipher for Age {
    type Recipient = x25519::Recipient;
    type Identity = x25519::Identity;

    fn encrypt(&self, plaintext: &[u8], recipients: &[x25519::Recipient]) -> Result<Vec<u8>> {
        trace!(
            recipients = recipients.len(),
            plaintext_len = plaintext.len(),
            "encrypting"
        );

        if recipients.is_empty() {
            return Err(CipherError::NoRecipients.into());
        }

        let encryptor =
            age::Encryptor::with_recipients(recipients.iter().map(|r| r as &dyn age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(age::armor::ArmoredWriter::wrap_output(
                &mut encrypted,
                age::armor::Format::Binary,
            )?)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        writer.write_all(plaintext)?;
        let armored = writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        armored
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");

        Ok(encrypted)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        identities: &[x25519::Identity],
    ) -> Result<Zeroizing<Vec<u8>>> {
        trace!(
            identities = identities.len(),
            ciphertext_len = ciphertext.len(),
            "decrypting"
        );

        if identities.is_empty() {
            return Err(CipherError::NoIdentities.into());
        }

        let reader = age::armor::ArmoredReader::new(ciphertext);
        let decryptor = age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut decrypted = Zeroizing::new(Vec::new());
        let mut reader = decryptor
            .decrypt(identities.iter().map(|i| i as &dyn age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");

        Ok(decrypted)
    }
}

/// Parse a public key string into an age recipient
///
/// # Errors
///
/// Returns `CipherError::InvalidRecipient` if the key format is invalid.
pub fn parse_recipient(key: &str) -> Result<x25519::Recipient> {
    key.parse::<x25519::Recipient>()
        .map_err(|_| CipherError::InvalidRecipient(key.to_string()).into())
}

/// Parse a private key string into an age identity
///
/// # Errors
///
/// Returns `CipherError::InvalidIdentity` if the key format is invalid. The
/// key text is not included in the error.
pub fn parse_identity(key: &str) -> Result<x25519::Identity> {
    key.parse::<x25519::Identity>()
        .map_err(|e| CipherError::InvalidIdentity(e.to_string()).into())
}
