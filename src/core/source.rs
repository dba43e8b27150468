//! Credential sources.
//!
//! The resolver never touches `std::env` or the filesystem directly; it asks a
//! [`Source`]. The process-backed implementation is [`SystemSource`].

use std::fs;
use std::io;
use std::path::Path;

/// Where credential variables and files come from.
pub trait Source {
    /// Value of an environment variable, if set.
    fn var(&self, name: &str) -> Option<String>;

    /// Entire contents of a file, as UTF-8 text.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Value of `name` if it is set and not blank.
    ///
    /// The value is returned untrimmed.
    fn non_blank(&self, name: &str) -> Option<String> {
        self.var(name).filter(|value| !value.trim().is_empty())
    }
}

/// Reads the real process environment and filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSource;

impl Source for SystemSource {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}
