//! Skein-MAC.
//!
//! The key is absorbed as a Key-typed UBI chain starting from a zero state,
//! and the resulting chaining value keys the configuration block. Message
//! and output processing then proceed as for a plain hash. An empty key
//! leaves the zero state in place, so the MAC equals the unkeyed hash.

use super::{InitializationType, Skein};
use crate::provider::Mac;
use crate::tweak::UbiType;
use skeinfish_types::{CryptoError, StateSize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A keyed Skein context.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SkeinMac {
    engine: Skein,
}

impl std::fmt::Debug for SkeinMac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkeinMac")
            .field("size", &self.engine.state_size())
            .field("output_bits", &self.engine.output_bits())
            .finish_non_exhaustive()
    }
}

impl SkeinMac {
    /// Create a MAC context keyed with `key` (any length, including empty).
    pub fn new(state_bits: usize, output_bits: usize, key: &[u8]) -> Result<Self, CryptoError> {
        let mut mac = SkeinMac {
            engine: Skein::new(state_bits, output_bits)?,
        };
        mac.rekey(key)?;
        Ok(mac)
    }

    pub fn state_size(&self) -> StateSize {
        self.engine.state_size()
    }

    /// Tag length in bytes.
    pub fn output_size(&self) -> usize {
        self.engine.output_bytes()
    }

    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.engine.update(data)
    }

    /// Finalize and return the tag.
    pub fn finish(&mut self) -> Result<Vec<u8>, CryptoError> {
        self.engine.finalize()?.ok_or(CryptoError::InvalidArg)
    }

    /// Start a new message under the same key.
    pub fn reset(&mut self) {
        self.engine.initialize();
    }

    /// One-shot: compute the Skein-MAC of `data` under `key`.
    pub fn mac(
        state_bits: usize,
        output_bits: usize,
        key: &[u8],
        data: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let mut ctx = Self::new(state_bits, output_bits, key)?;
        ctx.update(data)?;
        ctx.finish()
    }

    fn rekey(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        self.engine.initialize_with(InitializationType::ZeroedState);
        self.engine.tweak_mut().start_new_block_type(UbiType::Key);
        self.engine.update(key)?;
        // The key chain's own output is not used; only its chaining state is.
        if let Some(mut unused) = self.engine.finalize()? {
            unused.zeroize();
        }
        self.engine.initialize_with(InitializationType::ChainedConfig);
        tracing::trace!(state_bits = self.engine.state_size().bits(), "skein-mac keyed");
        Ok(())
    }
}

impl Mac for SkeinMac {
    fn output_size(&self) -> usize {
        self.engine.output_bytes()
    }

    fn init(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        self.rekey(key)
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.engine.update(data)
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        if out.len() < self.output_size() {
            return Err(CryptoError::InvalidArg);
        }
        let mut tag = SkeinMac::finish(self)?;
        out[..tag.len()].copy_from_slice(&tag);
        tag.zeroize();
        Ok(())
    }

    fn reset(&mut self) {
        SkeinMac::reset(self);
    }
}
