//! OFB (Output Feedback) mode of operation.

use super::{CipherMode, Direction, ModeTransform, Padding};
use skeinfish_types::CryptoError;

/// Encrypt or decrypt data in place using OFB mode with Threefish
/// (symmetric operation, zero tweak, any length).
pub fn ofb_crypt(key: &[u8], iv: &[u8], data: &mut [u8]) -> Result<(), CryptoError> {
    let mut transform =
        ModeTransform::new(key, iv, Direction::Encrypt, CipherMode::Ofb, Padding::None)?;
    let out = transform.transform_final_block(data)?;
    data.copy_from_slice(&out);
    Ok(())
}
