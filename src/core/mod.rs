//! Core library components.
//!
//! Credential resolution, the age cipher wrapper, and the protocol envelope.
//! Nothing here touches stdin/stdout directly.

pub mod cipher;
pub mod constants;
pub mod normalize;
pub mod protocol;
pub mod recipient;
pub mod resolver;
pub mod source;
pub mod types;
