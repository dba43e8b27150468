//! Cryptographic operations.
//!
//! The helper never implements cryptography itself. Encryption and decryption
//! are delegated to a [`Cipher`] backend; the only backend is [`Age`], which
//! wraps the `age` crate's `Encryptor` and `Decryptor`.

use ::age::x25519;
use zeroize::Zeroizing;

use crate::error::Result;

mod age;

pub use age::{parse_identity, parse_recipient, Age};

/// Cryptographic backend trait.
///
/// Abstracts the external encryption library behind recipient and identity
/// types of the backend's choosing.
pub trait Cipher {
    /// Type representing a recipient public key.
    type Recipient;

    /// Type representing a private identity/key.
    type Identity;

    /// Encrypt plaintext so that any of `recipients` can decrypt it.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if encryption fails.
    fn encrypt(&self, plaintext: &[u8], recipients: &[Self::Recipient]) -> Result<Vec<u8>>;

    /// Decrypt ciphertext with the first matching identity.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if no identity matches or the ciphertext is
    /// malformed.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        identities: &[Self::Identity],
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// Encrypt plaintext for age recipients.
///
/// This is a convenience wrapper around `Age::encrypt`.
pub fn encrypt(plaintext: &[u8], recipients: &[x25519::Recipient]) -> Result<Vec<u8>> {
    Age.encrypt(plaintext, recipients)
}

/// Decrypt age ciphertext (binary or armored) with the given identities.
///
/// This is a convenience wrapper around `Age::decrypt`.
pub fn decrypt(ciphertext: &[u8], identities: &[x25519::Identity]) -> Result<Zeroizing<Vec<u8>>> {
    Age.decrypt(ciphertext, identities)
}
