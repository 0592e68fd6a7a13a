use crate::CryptoError;

/// Threefish / Skein internal state sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateSize {
    Bits256,
    Bits512,
    Bits1024,
}

impl StateSize {
    /// Look up the state size for a bit width.
    pub fn from_bits(bits: usize) -> Result<Self, CryptoError> {
        match bits {
            256 => Ok(StateSize::Bits256),
            512 => Ok(StateSize::Bits512),
            1024 => Ok(StateSize::Bits1024),
            _ => Err(CryptoError::InvalidStateSize(bits)),
        }
    }

    /// Look up the state size for a block length in bytes.
    pub fn from_bytes(bytes: usize) -> Result<Self, CryptoError> {
        match bytes {
            32 => Ok(StateSize::Bits256),
            64 => Ok(StateSize::Bits512),
            128 => Ok(StateSize::Bits1024),
            _ => Err(CryptoError::InvalidStateSize(bytes.saturating_mul(8))),
        }
    }

    pub const fn bits(self) -> usize {
        match self {
            StateSize::Bits256 => 256,
            StateSize::Bits512 => 512,
            StateSize::Bits1024 => 1024,
        }
    }

    /// Block size in bytes.
    pub const fn bytes(self) -> usize {
        self.bits() / 8
    }

    /// Block size in 64-bit words.
    pub const fn words(self) -> usize {
        self.bits() / 64
    }
}

/// Hash algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgId {
    Skein224,
    Skein256,
    Skein384,
    Skein512,
    Skein1024,
}

impl HashAlgId {
    pub const fn state_size(self) -> StateSize {
        match self {
            HashAlgId::Skein224 | HashAlgId::Skein256 => StateSize::Bits256,
            HashAlgId::Skein384 | HashAlgId::Skein512 => StateSize::Bits512,
            HashAlgId::Skein1024 => StateSize::Bits1024,
        }
    }

    pub const fn output_bits(self) -> usize {
        match self {
            HashAlgId::Skein224 => 224,
            HashAlgId::Skein256 => 256,
            HashAlgId::Skein384 => 384,
            HashAlgId::Skein512 => 512,
            HashAlgId::Skein1024 => 1024,
        }
    }
}

/// MAC algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacAlgId {
    SkeinMac256,
    SkeinMac512,
    SkeinMac1024,
}

impl MacAlgId {
    pub const fn from_state_size(size: StateSize) -> Self {
        match size {
            StateSize::Bits256 => MacAlgId::SkeinMac256,
            StateSize::Bits512 => MacAlgId::SkeinMac512,
            StateSize::Bits1024 => MacAlgId::SkeinMac1024,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MacAlgId::SkeinMac256 => "Skein-MAC-256",
            MacAlgId::SkeinMac512 => "Skein-MAC-512",
            MacAlgId::SkeinMac1024 => "Skein-MAC-1024",
        }
    }

    pub const fn state_size(self) -> StateSize {
        match self {
            MacAlgId::SkeinMac256 => StateSize::Bits256,
            MacAlgId::SkeinMac512 => StateSize::Bits512,
            MacAlgId::SkeinMac1024 => StateSize::Bits1024,
        }
    }
}

/// Symmetric cipher algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherAlgId {
    Threefish256,
    Threefish512,
    Threefish1024,
}

impl CipherAlgId {
    /// The Threefish variant whose key is `len` bytes long.
    pub fn from_key_len(len: usize) -> Result<Self, CryptoError> {
        Ok(match StateSize::from_bytes(len)? {
            StateSize::Bits256 => CipherAlgId::Threefish256,
            StateSize::Bits512 => CipherAlgId::Threefish512,
            StateSize::Bits1024 => CipherAlgId::Threefish1024,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            CipherAlgId::Threefish256 => "threefish-256",
            CipherAlgId::Threefish512 => "threefish-512",
            CipherAlgId::Threefish1024 => "threefish-1024",
        }
    }

    pub const fn state_size(self) -> StateSize {
        match self {
            CipherAlgId::Threefish256 => StateSize::Bits256,
            CipherAlgId::Threefish512 => StateSize::Bits512,
            CipherAlgId::Threefish1024 => StateSize::Bits1024,
        }
    }

    /// Key length in bytes (always equal to the block length).
    pub const fn key_len(self) -> usize {
        self.state_size().bytes()
    }
}
