//! Block padding schemes.

use skeinfish_types::CryptoError;
use std::fmt;
use std::str::FromStr;
use subtle::ConstantTimeEq;

/// Padding applied to the final block of ECB and CBC messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Padding {
    /// No padding; the message must be block aligned.
    None,
    /// Zero bytes up to the block boundary; not removed on decryption.
    Zeros,
    /// Every pad byte holds the pad length.
    Pkcs7,
    /// Zero bytes followed by the pad length.
    AnsiX923,
    /// Random bytes followed by the pad length.
    Iso10126,
}

impl Padding {
    /// Whether decryption removes padding (and must hold back the last
    /// block until the message ends).
    pub fn is_removable(self) -> bool {
        matches!(self, Padding::Pkcs7 | Padding::AnsiX923 | Padding::Iso10126)
    }

    /// Fill `block[filled..]` with padding.
    ///
    /// `block` is one cipher block; `filled` may equal 0 (a whole pad
    /// block) but not the block length for removable schemes.
    pub(crate) fn pad(self, block: &mut [u8], filled: usize) -> Result<(), CryptoError> {
        let pad_len = block.len() - filled;
        let tail = &mut block[filled..];
        match self {
            Padding::None => {}
            Padding::Zeros => tail.fill(0),
            Padding::Pkcs7 => tail.fill(pad_len as u8),
            Padding::AnsiX923 => {
                tail.fill(0);
                if let Some(last) = tail.last_mut() {
                    *last = pad_len as u8;
                }
            }
            Padding::Iso10126 => {
                getrandom::getrandom(tail).map_err(|_| CryptoError::RandomFailed)?;
                if let Some(last) = tail.last_mut() {
                    *last = pad_len as u8;
                }
            }
        }
        Ok(())
    }

    /// Validate the padding at the end of `data` and return the unpadded
    /// length. Schemes that are not removable return `data.len()`.
    pub(crate) fn unpadded_len(self, data: &[u8], block_size: usize) -> Result<usize, CryptoError> {
        if !self.is_removable() {
            return Ok(data.len());
        }
        let pad_len = *data.last().ok_or(CryptoError::InvalidPadding)? as usize;
        if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
            tracing::warn!(padding = %self, "rejected padding length");
            return Err(CryptoError::InvalidPadding);
        }
        let body = &data[data.len() - pad_len..data.len() - 1];
        let valid = match self {
            Padding::Pkcs7 => all_equal(body, pad_len as u8),
            Padding::AnsiX923 => all_equal(body, 0),
            _ => 1,
        };
        if valid != 1 {
            tracing::warn!(padding = %self, "rejected padding bytes");
            return Err(CryptoError::InvalidPadding);
        }
        Ok(data.len() - pad_len)
    }
}

fn all_equal(bytes: &[u8], value: u8) -> u8 {
    let mut valid = 1u8;
    for b in bytes {
        valid &= b.ct_eq(&value).unwrap_u8();
    }
    valid
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Padding::None => "none",
            Padding::Zeros => "zeros",
            Padding::Pkcs7 => "pkcs7",
            Padding::AnsiX923 => "ansix923",
            Padding::Iso10126 => "iso10126",
        })
    }
}

impl FromStr for Padding {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Padding::None),
            "zeros" => Ok(Padding::Zeros),
            "pkcs7" => Ok(Padding::Pkcs7),
            "ansix923" => Ok(Padding::AnsiX923),
            "iso10126" => Ok(Padding::Iso10126),
            _ => Err(CryptoError::InvalidArg),
        }
    }
}
