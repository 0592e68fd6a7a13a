//! Block cipher modes of operation over Threefish.
//!
//! [`ModeTransform`] is the streaming engine: ECB, CBC, OFB and CFB with
//! Zeros, PKCS#7, ANSI X9.23 and ISO 10126 padding, usable block by block
//! and reusable after each final block. The `ecb`, `cbc`, `ofb` and `cfb`
//! modules wrap it in one-shot helpers.

pub mod cbc;
pub mod cfb;
pub mod ecb;
pub mod ofb;
pub mod padding;
pub mod transform;

use skeinfish_types::CryptoError;
use std::fmt;
use std::str::FromStr;

pub use padding::Padding;
pub use transform::ModeTransform;

/// Chaining mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    Ecb,
    Cbc,
    /// Output feedback with full-block feedback; a stream mode.
    Ofb,
    /// Cipher feedback with full-block feedback; a stream mode.
    Cfb,
}

impl CipherMode {
    /// Stream modes accept any input length and never pad.
    pub fn is_stream(self) -> bool {
        matches!(self, CipherMode::Ofb | CipherMode::Cfb)
    }

    pub fn needs_iv(self) -> bool {
        self != CipherMode::Ecb
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CipherMode::Ecb => "ecb",
            CipherMode::Cbc => "cbc",
            CipherMode::Ofb => "ofb",
            CipherMode::Cfb => "cfb",
        })
    }
}

impl FromStr for CipherMode {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ecb" => Ok(CipherMode::Ecb),
            "cbc" => Ok(CipherMode::Cbc),
            "ofb" => Ok(CipherMode::Ofb),
            "cfb" => Ok(CipherMode::Cfb),
            _ => Err(CryptoError::InvalidArg),
        }
    }
}

/// Whether a transform encrypts or decrypts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Encrypt,
    Decrypt,
}
