//! Unified hash module.
//!
//! Re-exports the digest traits together with the general Skein engine and
//! its fixed-size presets.

pub use crate::provider::{Digest, HashAlgorithm};

#[cfg(feature = "skein")]
pub use crate::skein::{Skein, Skein1024, Skein224, Skein256, Skein384, Skein512};
