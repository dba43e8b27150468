//! Recipient derivation.
//!
//! Converts an age private key into the public recipient that encrypts to it.

use std::str::FromStr;

use age::x25519;

use crate::core::types::Recipient;
use crate::error::CredentialError;

/// Turns a private key into its recipient.
pub trait Deriver {
    /// Derive the recipient for `key`.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::DerivationFailed` if `key` is not a valid
    /// private key. The key itself is never part of the error.
    fn derive(&self, key: &str) -> Result<Recipient, CredentialError>;
}

/// Derives x25519 recipients with the age crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct AgeDeriver;

impl Deriver for AgeDeriver {
    fn derive(&self, key: &str) -> Result<Recipient, CredentialError> {
        let identity = x25519::Identity::from_str(key)
            .map_err(|e| CredentialError::DerivationFailed(e.to_string()))?;
        Ok(identity.to_public().to_string())
    }
}
