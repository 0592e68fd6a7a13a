//! CBC (Cipher Block Chaining) mode of operation.

use super::{CipherMode, Direction, ModeTransform, Padding};
use skeinfish_types::CryptoError;

/// Encrypt data using CBC mode with Threefish (zero tweak) and PKCS#7
/// padding.
pub fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    ModeTransform::new(key, iv, Direction::Encrypt, CipherMode::Cbc, Padding::Pkcs7)?
        .transform_final_block(plaintext)
}

/// Decrypt data using CBC mode with Threefish and remove PKCS#7 padding.
pub fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut transform =
        ModeTransform::new(key, iv, Direction::Decrypt, CipherMode::Cbc, Padding::Pkcs7)?;
    if ciphertext.is_empty() || ciphertext.len() % transform.block_size() != 0 {
        return Err(CryptoError::InvalidArg);
    }
    transform.transform_final_block(ciphertext)
}
