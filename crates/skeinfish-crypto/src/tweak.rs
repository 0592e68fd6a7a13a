//! UBI tweak value.
//!
//! Skein binds every compression to its position, phase and finality by
//! packing those fields into the 128-bit Threefish tweak:
//!
//! ```text
//! word 0: bytes processed so far (position)
//! word 1: bit 63 final | bit 62 first | bits 56..61 block type | bits 48..53 tree level
//! ```

use skeinfish_types::CryptoError;
use zeroize::Zeroize;

const FLAG_FINAL: u64 = 1 << 63;
const FLAG_FIRST: u64 = 1 << 62;
const TYPE_SHIFT: u32 = 56;
const TYPE_MASK: u64 = 0x3f << TYPE_SHIFT;
const TREE_LEVEL_SHIFT: u32 = 48;
const TREE_LEVEL_MASK: u64 = 0x3f << TREE_LEVEL_SHIFT;

/// Largest tree level the tweak can encode.
pub const MAX_TREE_LEVEL: u8 = 63;

/// UBI block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UbiType {
    Key = 0,
    Config = 4,
    Personalization = 8,
    PublicKey = 12,
    KeyIdentifier = 16,
    Nonce = 20,
    Message = 48,
    Out = 63,
}

impl UbiType {
    /// The 6-bit type code stored in the tweak.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(UbiType::Key),
            4 => Some(UbiType::Config),
            8 => Some(UbiType::Personalization),
            12 => Some(UbiType::PublicKey),
            16 => Some(UbiType::KeyIdentifier),
            20 => Some(UbiType::Nonce),
            48 => Some(UbiType::Message),
            63 => Some(UbiType::Out),
            _ => None,
        }
    }
}

/// The two-word tweak driving one UBI chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
pub struct UbiTweak {
    words: [u64; 2],
}

impl UbiTweak {
    /// A zero tweak (Key block type, no flags, position 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new UBI chain: position 0, first-block flag set, type `ty`.
    /// Tree level and the final flag are cleared.
    pub fn start_new_block_type(&mut self, ty: UbiType) {
        self.words = [0, FLAG_FIRST | ((ty.code() as u64) << TYPE_SHIFT)];
    }

    pub fn is_first_block(&self) -> bool {
        self.words[1] & FLAG_FIRST != 0
    }

    pub fn set_first_block(&mut self, first: bool) {
        self.set_flag(FLAG_FIRST, first);
    }

    pub fn is_final_block(&self) -> bool {
        self.words[1] & FLAG_FINAL != 0
    }

    pub fn set_final_block(&mut self, last: bool) {
        self.set_flag(FLAG_FINAL, last);
    }

    pub fn tree_level(&self) -> u8 {
        ((self.words[1] & TREE_LEVEL_MASK) >> TREE_LEVEL_SHIFT) as u8
    }

    pub fn set_tree_level(&mut self, level: u8) -> Result<(), CryptoError> {
        if level > MAX_TREE_LEVEL {
            return Err(CryptoError::InvalidTreeLevel(level));
        }
        self.words[1] = (self.words[1] & !TREE_LEVEL_MASK) | ((level as u64) << TREE_LEVEL_SHIFT);
        Ok(())
    }

    /// Number of bytes fed through the current chain, including the block
    /// being compressed.
    pub fn bytes_processed(&self) -> u64 {
        self.words[0]
    }

    pub fn set_bytes_processed(&mut self, count: u64) {
        self.words[0] = count;
    }

    pub fn add_bytes_processed(&mut self, count: u64) {
        self.words[0] = self.words[0].wrapping_add(count);
    }

    /// The block type, or `None` if the type bits hold an unassigned code.
    pub fn block_type(&self) -> Option<UbiType> {
        UbiType::from_code(((self.words[1] & TYPE_MASK) >> TYPE_SHIFT) as u8)
    }

    pub fn set_block_type(&mut self, ty: UbiType) {
        self.words[1] = (self.words[1] & !TYPE_MASK) | ((ty.code() as u64) << TYPE_SHIFT);
    }

    /// The raw tweak words handed to Threefish.
    pub fn words(&self) -> [u64; 2] {
        self.words
    }

    /// The three-word expanded form used by the Threefish key schedule.
    pub fn expanded(&self) -> [u64; 3] {
        [self.words[0], self.words[1], self.words[0] ^ self.words[1]]
    }

    fn set_flag(&mut self, flag: u64, on: bool) {
        if on {
            self.words[1] |= flag;
        } else {
            self.words[1] &= !flag;
        }
    }
}
