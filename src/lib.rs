//! sops-age-helper - age encryption helper for SOPS.
//!
//! SOPS runs the helper once per operation and exchanges one JSON request and
//! one JSON response with it over stdin/stdout.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Commands, one protocol handler each
//! │   ├── encrypt       # Encrypt a payload for resolved recipients
//! │   ├── decrypt       # Decrypt with keys sent by SOPS
//! │   └── key_provider  # Hand key material to SOPS
//! ├── core/             # Core library components
//! │   ├── constants     # Variable names and protocol strings
//! │   ├── normalize     # Comment stripping and line splitting
//! │   ├── source        # Environment/file access (Source trait)
//! │   ├── recipient     # Private key -> recipient derivation
//! │   ├── resolver      # Ordered credential fallback chain
//! │   ├── cipher/       # Encryption backends (age)
//! │   ├── protocol      # Request/response envelope
//! │   └── types         # KeyPair and aliases
//! ├── config            # Settings from the environment
//! ├── diagnostics       # Log sinks with explicit flush
//! ├── shutdown          # Termination signals
//! └── error             # Error taxonomy
//! ```
//!
//! # Credential variables
//!
//! | Purpose                | Variables (priority order)                        |
//! |------------------------|---------------------------------------------------|
//! | private key file       | `AGE_KEY_FILE`, `SOPS_AGE_KEY_FILE`               |
//! | inline private keys    | `AGE_KEY`, `SOPS_AGE_KEY`                         |
//! | recipients file        | `AGE_RECIPIENTS_FILE`, `SOPS_AGE_RECIPIENTS_FILE` |
//! | inline recipients      | `AGE_RECIPIENTS`, `SOPS_AGE_RECIPIENTS`           |

pub mod cli;
pub mod config;
pub mod core;
pub mod diagnostics;
pub mod error;
pub mod shutdown;
