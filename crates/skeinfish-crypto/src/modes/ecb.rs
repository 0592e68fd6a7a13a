//! ECB (Electronic Codebook) mode of operation.
//!
//! **Security warning**: ECB mode does not provide semantic security and
//! should generally not be used. It is provided for completeness and
//! specific low-level use cases only.

use super::{CipherMode, Direction, ModeTransform, Padding};
use skeinfish_types::CryptoError;

/// Encrypt data using ECB mode with Threefish (zero tweak).
/// Input must be a non-empty multiple of the block size (no padding).
pub fn ecb_encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    crypt(key, plaintext, Direction::Encrypt)
}

/// Decrypt data using ECB mode with Threefish (zero tweak).
/// Input must be a non-empty multiple of the block size.
pub fn ecb_decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    crypt(key, ciphertext, Direction::Decrypt)
}

fn crypt(key: &[u8], data: &[u8], direction: Direction) -> Result<Vec<u8>, CryptoError> {
    let mut transform = ModeTransform::new(key, &[], direction, CipherMode::Ecb, Padding::None)?;
    if data.is_empty() || data.len() % transform.block_size() != 0 {
        return Err(CryptoError::InvalidArg);
    }
    transform.transform_final_block(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_ecb_threefish256() {
        let key: Vec<u8> = (0x10u8..0x30).collect();
        let pt = b"Threefish block cipher modes tes";
        let ct = ecb_encrypt(&key, pt).unwrap();
        assert_eq!(
            hex(&ct),
            "9d9943e3e126f246b6edb89f19816b1e00d9132482f31ef54084d1e3b905ff05"
        );
        assert_eq!(ecb_decrypt(&key, &ct).unwrap(), pt);
    }

    #[test]
    fn test_ecb_identical_blocks() {
        let key = [0x33u8; 64];
        let ct = ecb_encrypt(&key, &[0x5au8; 128]).unwrap();
        assert_eq!(ct[..64], ct[64..]);
    }

    #[test]
    fn test_ecb_invalid_length() {
        let key = [0u8; 32];
        assert_eq!(ecb_encrypt(&key, &[0u8; 31]), Err(CryptoError::InvalidArg));
        assert_eq!(ecb_encrypt(&key, &[]), Err(CryptoError::InvalidArg));
        assert_eq!(ecb_decrypt(&key, &[0u8; 33]), Err(CryptoError::InvalidArg));
    }
}
