//! CFB (Cipher Feedback) mode of operation.
//!
//! Full-block feedback: each keystream block is the encryption of the
//! previous ciphertext block (the IV for the first one).

use super::{CipherMode, Direction, ModeTransform, Padding};
use skeinfish_types::CryptoError;

/// Encrypt data using CFB mode with Threefish (zero tweak).
///
/// Accepts plaintext of any length; no padding is added.
pub fn cfb_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    ModeTransform::new(key, iv, Direction::Encrypt, CipherMode::Cfb, Padding::None)?
        .transform_final_block(plaintext)
}

/// Decrypt data using CFB mode with Threefish (zero tweak).
pub fn cfb_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    ModeTransform::new(key, iv, Direction::Decrypt, CipherMode::Cfb, Padding::None)?
        .transform_final_block(ciphertext)
}
