//! Domain types for resolved credentials.

use std::fmt;

use zeroize::Zeroizing;

/// An age private key string (`AGE-SECRET-KEY-1...`).
pub type PrivateKey = Zeroizing<String>;

/// An age public key string (`age1...`).
pub type Recipient = String;

/// A private key together with the recipient derived from it.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    recipient: Recipient,
    key: PrivateKey,
}

impl KeyPair {
    pub fn new(recipient: impl Into<Recipient>, key: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            key: Zeroizing::new(key.into()),
        }
    }

    /// The public recipient.
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// The private key text.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("recipient", &self.recipient)
            .field("key", &"<redacted>")
            .finish()
    }
}
