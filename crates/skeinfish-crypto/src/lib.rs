#![forbid(unsafe_code)]
#![doc = "Threefish, Skein and Threefish block cipher modes for skeinfish."]

// Core traits
pub mod provider;

// Tweakable block cipher
#[cfg(feature = "threefish")]
pub mod threefish;
#[cfg(feature = "threefish")]
pub(crate) mod words;

// Hash and MAC
#[cfg(feature = "skein")]
pub mod skein;
#[cfg(feature = "skein")]
pub mod tweak;

pub mod hash;

// Modes of operation
#[cfg(feature = "modes")]
pub mod modes;

pub mod cipher {
    //! Unified symmetric cipher interface.
    pub use super::provider::{BlockCipher, TweakableBlockCipher};
}

pub mod mac {
    //! Unified MAC interface.
    pub use super::provider::Mac;

    #[cfg(feature = "skein-mac")]
    pub use crate::skein::SkeinMac;
}
