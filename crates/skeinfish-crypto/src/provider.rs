//! Trait-based provider mechanism for cryptographic algorithms.
//!
//! These traits define the abstract interfaces that the algorithm
//! implementations satisfy, so callers can work with a Skein digest, a
//! Skein-MAC or a Threefish block cipher through static or dynamic dispatch.

use skeinfish_types::CryptoError;

/// A hash / message digest algorithm.
pub trait Digest: Send + Sync {
    /// The output size in bytes.
    fn output_size(&self) -> usize;

    /// The internal block size in bytes.
    fn block_size(&self) -> usize;

    /// Feed data into the hash state.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Finalize the hash and write the digest to `out`.
    /// The length of `out` must be at least `output_size()`.
    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError>;

    /// Reset the hash state to process a new message.
    fn reset(&mut self);
}

/// A convenience wrapper trait for creating digest instances.
pub trait HashAlgorithm: Send + Sync {
    /// Create a new digest context.
    fn new_digest(&self) -> Box<dyn Digest>;

    /// One-shot hash computation.
    fn hash(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut ctx = self.new_digest();
        ctx.update(data)?;
        let mut out = vec![0u8; ctx.output_size()];
        ctx.finish(&mut out)?;
        Ok(out)
    }
}

/// A block cipher.
pub trait BlockCipher: Send + Sync {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Key size in bytes.
    fn key_size(&self) -> usize;

    /// Set the encryption key.
    fn set_encrypt_key(&mut self, key: &[u8]) -> Result<(), CryptoError>;

    /// Set the decryption key.
    fn set_decrypt_key(&mut self, key: &[u8]) -> Result<(), CryptoError>;

    /// Encrypt a single block in-place.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;

    /// Decrypt a single block in-place.
    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;
}

/// A block cipher that additionally takes a per-block tweak.
pub trait TweakableBlockCipher: BlockCipher {
    /// Tweak size in bytes.
    fn tweak_size(&self) -> usize;

    /// Set the tweak used by subsequent block operations.
    fn set_tweak_bytes(&mut self, tweak: &[u8]) -> Result<(), CryptoError>;
}

/// A Message Authentication Code (MAC) algorithm.
pub trait Mac: Send + Sync {
    /// The output size of the MAC in bytes.
    fn output_size(&self) -> usize;

    /// Initialize the MAC with a key.
    fn init(&mut self, key: &[u8]) -> Result<(), CryptoError>;

    /// Feed data into the MAC computation.
    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError>;

    /// Finalize and write the MAC value to `out`.
    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError>;

    /// Reset the MAC state for reuse with the same key.
    fn reset(&mut self);
}

#[cfg(feature = "threefish")]
impl BlockCipher for crate::threefish::Threefish {
    fn block_size(&self) -> usize {
        self.state_size().bytes()
    }

    fn key_size(&self) -> usize {
        self.state_size().bytes()
    }

    fn set_encrypt_key(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        self.set_key_bytes(key)
    }

    fn set_decrypt_key(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        self.set_key_bytes(key)
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        crate::threefish::Threefish::encrypt_block(self, block)
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        crate::threefish::Threefish::decrypt_block(self, block)
    }
}

#[cfg(feature = "threefish")]
impl TweakableBlockCipher for crate::threefish::Threefish {
    fn tweak_size(&self) -> usize {
        crate::threefish::THREEFISH_TWEAK_SIZE
    }

    fn set_tweak_bytes(&mut self, tweak: &[u8]) -> Result<(), CryptoError> {
        crate::threefish::Threefish::set_tweak_bytes(self, tweak)
    }
}
