//! Credential resolution.
//!
//! Locates private keys and recipients from environment variables and files.
//! Sources are consulted in a fixed order:
//!
//! ```text
//! private keys:  AGE_KEY_FILE, SOPS_AGE_KEY_FILE   (file path)
//!                AGE_KEY, SOPS_AGE_KEY             (inline)
//! recipients:    <derived from private keys>
//!                AGE_RECIPIENTS_FILE, SOPS_AGE_RECIPIENTS_FILE
//!                AGE_RECIPIENTS, SOPS_AGE_RECIPIENTS
//! ```
//!
//! Within a class (file path, inline value) the first variable that is set
//! and non-blank is the only one used: a failure there is returned, not
//! skipped. Fallback only moves between classes.

use std::path::PathBuf;

use tracing::debug;

use crate::core::constants::{KEY_FILE_VARS, KEY_VARS, RECIPIENTS_FILE_VARS, RECIPIENTS_VARS};
use crate::core::normalize;
use crate::core::recipient::{AgeDeriver, Deriver};
use crate::core::source::{Source, SystemSource};
use crate::core::types::{KeyPair, Recipient};
use crate::error::{CredentialError, Subject};

/// Origin of a credential, each with its own candidate variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    KeyFile,
    KeyEnvVar,
    RecipientsFile,
    RecipientsEnvVar,
}

impl SourceKind {
    /// Candidate variables for this origin, highest priority first.
    pub fn vars(self) -> &'static [&'static str] {
        match self {
            SourceKind::KeyFile => KEY_FILE_VARS,
            SourceKind::KeyEnvVar => KEY_VARS,
            SourceKind::RecipientsFile => RECIPIENTS_FILE_VARS,
            SourceKind::RecipientsEnvVar => RECIPIENTS_VARS,
        }
    }

    fn is_file(self) -> bool {
        matches!(self, SourceKind::KeyFile | SourceKind::RecipientsFile)
    }
}

/// Private key lookup order.
const KEY_CHAIN: [SourceKind; 2] = [SourceKind::KeyFile, SourceKind::KeyEnvVar];

/// Recipient lookup order, after the private key chain.
const RECIPIENT_CHAIN: [SourceKind; 2] = [SourceKind::RecipientsFile, SourceKind::RecipientsEnvVar];

/// Variable names consulted by a chain, in order.
fn chain_vars(chain: &[SourceKind]) -> Vec<&'static str> {
    chain.iter().flat_map(|kind| kind.vars().iter().copied()).collect()
}

/// A matched variable and the text it points at.
struct Found {
    var: &'static str,
    path: Option<PathBuf>,
    text: String,
}

/// Resolves private keys and recipients from a [`Source`].
pub struct Resolver<S = SystemSource, D = AgeDeriver> {
    source: S,
    deriver: D,
}

impl Resolver {
    /// Resolver over the process environment and the age crate.
    pub fn system() -> Self {
        Self::new(SystemSource, AgeDeriver)
    }
}

impl<S: Source, D: Deriver> Resolver<S, D> {
    pub fn new(source: S, deriver: D) -> Self {
        Self { source, deriver }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve private keys, each paired with its derived recipient.
    ///
    /// Pairs keep the order of the lines they came from.
    ///
    /// # Errors
    ///
    /// - `CredentialError::ReadFailed` if a key file cannot be read
    /// - `CredentialError::EmptySource` if the chosen source has no keys
    /// - `CredentialError::DerivationFailed` if any key is invalid
    /// - `CredentialError::NotFound` if no key variable is set
    pub fn private_keys(&self) -> Result<Vec<KeyPair>, CredentialError> {
        for kind in KEY_CHAIN {
            let Some(found) = self.lookup(kind)? else {
                continue;
            };

            let keys = normalize::key_lines(&found.text);
            debug!(var = found.var, count = keys.len(), "private key source");
            if keys.is_empty() {
                return Err(CredentialError::EmptySource {
                    subject: Subject::PrivateKey,
                    var: found.var,
                    path: found.path,
                });
            }

            return keys
                .into_iter()
                .map(|key| -> Result<KeyPair, CredentialError> {
                    let recipient = self.deriver.derive(&key)?;
                    Ok(KeyPair::new(recipient, key))
                })
                .collect();
        }

        Err(CredentialError::NotFound {
            subject: Subject::PrivateKey,
            vars: chain_vars(&KEY_CHAIN),
        })
    }

    /// Resolve recipients.
    ///
    /// Recipients derived from private keys win. Only when no private key
    /// resolves are the recipient variables consulted, and those entries are
    /// returned verbatim, empty strings included.
    ///
    /// # Errors
    ///
    /// - `CredentialError::ReadFailed` if a recipients file cannot be read
    /// - `CredentialError::NotFound` if no key or recipient variable is set
    pub fn recipients(&self) -> Result<Vec<Recipient>, CredentialError> {
        match self.private_keys() {
            Ok(pairs) if !pairs.is_empty() => {
                return Ok(pairs.iter().map(|p| p.recipient().to_string()).collect());
            }
            Ok(_) => debug!("no recipients from private keys"),
            Err(e) => debug!(reason = %e, "falling back to recipient variables"),
        }

        for kind in RECIPIENT_CHAIN {
            let Some(found) = self.lookup(kind)? else {
                continue;
            };

            let recipients = if kind.is_file() {
                normalize::file_recipients(&found.text)
            } else {
                normalize::inline_recipients(&found.text)
            };
            debug!(var = found.var, count = recipients.len(), "recipient source");
            return Ok(recipients);
        }

        let mut vars = chain_vars(&KEY_CHAIN);
        vars.extend(chain_vars(&RECIPIENT_CHAIN));
        Err(CredentialError::NotFound {
            subject: Subject::Recipients,
            vars,
        })
    }

    /// First set, non-blank variable of `kind`, with the text it yields.
    ///
    /// File kinds read the named file; a read failure is returned rather
    /// than moving on to the next variable.
    fn lookup(&self, kind: SourceKind) -> Result<Option<Found>, CredentialError> {
        for &var in kind.vars() {
            let Some(value) = self.source.non_blank(var) else {
                continue;
            };

            if !kind.is_file() {
                return Ok(Some(Found {
                    var,
                    path: None,
                    text: value,
                }));
            }

            let path = PathBuf::from(value);
            debug!(var, path = %path.display(), "reading credential file");
            let text = self
                .source
                .read_file(&path)
                .map_err(|source| CredentialError::ReadFailed {
                    var,
                    path: path.clone(),
                    source,
                })?;
            return Ok(Some(Found {
                var,
                path: Some(path),
                text,
            }));
        }

        Ok(None)
    }
}
