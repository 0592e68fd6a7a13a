//! Skein configuration block.
//!
//! The configuration string occupies one state-sized block:
//!
//! ```text
//! word 0: schema (bytes 0..4, default "SHA3") | version << 32 (2 bits)
//! word 1: output length in bits
//! word 2: tree leaf size (byte 0) | fan-out (byte 1) | max height (byte 2)
//! ```
//!
//! The configuration value is a single Config-typed UBI compression over
//! that string and seeds the hash state on every `initialize()`.

use crate::threefish::Threefish;
use crate::tweak::{UbiTweak, UbiType};
use skeinfish_types::{CryptoError, StateSize};
use zeroize::Zeroize;

/// Default schema identifier.
pub const SKEIN_SCHEMA: [u8; 4] = *b"SHA3";

/// Default configuration version.
pub const SKEIN_VERSION: u8 = 1;

/// Size in bytes of the meaningful part of the configuration string.
const CONFIG_BYTES: u64 = 32;

const SCHEMA_MASK: u64 = 0xffff_ffff;
const VERSION_SHIFT: u32 = 32;
const VERSION_MASK: u64 = 0x03 << VERSION_SHIFT;

/// Configuration string and derived configuration value.
#[derive(Clone, Zeroize)]
pub struct SkeinConfig {
    #[zeroize(skip)]
    size: StateSize,
    string: Vec<u64>,
    value: Vec<u64>,
}

impl std::fmt::Debug for SkeinConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkeinConfig")
            .field("size", &self.size)
            .field("string", &self.string)
            .finish_non_exhaustive()
    }
}

impl SkeinConfig {
    /// Build the default configuration string (schema "SHA3", version 1, no
    /// tree parameters) for `output_bits` of output.
    ///
    /// The configuration value stays zero until
    /// [`generate_configuration`](Self::generate_configuration) runs.
    pub fn new(size: StateSize, output_bits: usize) -> Result<Self, CryptoError> {
        check_output_bits(output_bits)?;
        Ok(Self::with_output_bits(size, output_bits))
    }

    /// Default configuration for an output length already known to be valid.
    pub(crate) fn with_output_bits(size: StateSize, output_bits: usize) -> Self {
        let mut string = vec![0; size.words()];
        string[0] = u32::from_le_bytes(SKEIN_SCHEMA) as u64 | (SKEIN_VERSION as u64) << VERSION_SHIFT;
        string[1] = output_bits as u64;
        SkeinConfig {
            size,
            string,
            value: vec![0; size.words()],
        }
    }

    pub fn state_size(&self) -> StateSize {
        self.size
    }

    pub fn set_schema(&mut self, schema: &[u8]) -> Result<(), CryptoError> {
        let schema: [u8; 4] = schema
            .try_into()
            .map_err(|_| CryptoError::InvalidSchemaLength(schema.len()))?;
        self.string[0] = (self.string[0] & !SCHEMA_MASK) | u32::from_le_bytes(schema) as u64;
        Ok(())
    }

    pub fn schema(&self) -> [u8; 4] {
        (self.string[0] as u32).to_le_bytes()
    }

    pub fn set_version(&mut self, version: u8) -> Result<(), CryptoError> {
        if version > 3 {
            return Err(CryptoError::InvalidVersion(version));
        }
        self.string[0] = (self.string[0] & !VERSION_MASK) | ((version as u64) << VERSION_SHIFT);
        Ok(())
    }

    pub fn version(&self) -> u8 {
        ((self.string[0] & VERSION_MASK) >> VERSION_SHIFT) as u8
    }

    /// Requested output length; must be positive and a whole number of bytes.
    pub fn set_output_bits(&mut self, bits: usize) -> Result<(), CryptoError> {
        check_output_bits(bits)?;
        self.string[1] = bits as u64;
        Ok(())
    }

    pub fn output_bits(&self) -> usize {
        self.string[1] as usize
    }

    pub fn set_tree_leaf_size(&mut self, size: u8) {
        self.set_tree_byte(0, size);
    }

    pub fn tree_leaf_size(&self) -> u8 {
        self.tree_byte(0)
    }

    pub fn set_tree_fan_out(&mut self, fan_out: u8) {
        self.set_tree_byte(1, fan_out);
    }

    pub fn tree_fan_out(&self) -> u8 {
        self.tree_byte(1)
    }

    /// Maximum tree height. A height of 1 is reserved and rejected.
    pub fn set_tree_max_height(&mut self, height: u8) -> Result<(), CryptoError> {
        if height == 1 {
            return Err(CryptoError::InvalidTreeMaxHeight);
        }
        self.set_tree_byte(2, height);
        Ok(())
    }

    pub fn tree_max_height(&self) -> u8 {
        self.tree_byte(2)
    }

    /// The raw configuration string words.
    pub fn config_string(&self) -> &[u64] {
        &self.string
    }

    /// The configuration value produced by the last generation.
    pub fn config_value(&self) -> &[u64] {
        &self.value
    }

    /// Compress the configuration string into the configuration value.
    ///
    /// With `prior` set, that state is the key instead of all zeros, which
    /// chains an earlier UBI result (e.g. a MAC key) into the configuration.
    /// Panics if `prior` is not the state word count.
    pub fn generate_configuration(&mut self, prior: Option<&[u64]>) {
        let mut cipher = Threefish::with_size(self.size);
        if let Some(state) = prior {
            cipher.set_key(state);
        }

        let mut tweak = UbiTweak::new();
        tweak.start_new_block_type(UbiType::Config);
        tweak.set_final_block(true);
        tweak.add_bytes_processed(CONFIG_BYTES);
        cipher.set_tweak_words(tweak.words());

        cipher.encrypt(&self.string, &mut self.value);
        // Only words 0..3 of the string can be non-zero.
        for i in 0..3 {
            self.value[i] ^= self.string[i];
        }

        tracing::debug!(
            state_bits = self.size.bits(),
            output_bits = self.output_bits(),
            chained = prior.is_some(),
            "generated skein configuration"
        );
    }

    fn set_tree_byte(&mut self, index: u32, value: u8) {
        let shift = index * 8;
        self.string[2] = (self.string[2] & !(0xff << shift)) | ((value as u64) << shift);
    }

    fn tree_byte(&self, index: u32) -> u8 {
        (self.string[2] >> (index * 8)) as u8
    }
}

fn check_output_bits(bits: usize) -> Result<(), CryptoError> {
    if bits == 0 || bits % 8 != 0 {
        return Err(CryptoError::InvalidOutputSize(bits));
    }
    Ok(())
}
