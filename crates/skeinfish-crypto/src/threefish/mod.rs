//! Threefish tweakable block cipher.
//!
//! Provides Threefish-256, Threefish-512 and Threefish-1024. The key is as
//! wide as the block and every block is processed under a 128-bit tweak.
//! All three variants share one round routine; the per-variant rotation and
//! permutation tables live in [`tables`].
//!
//! Two surfaces are exposed:
//!
//! * a word API (`set_key`, `set_tweak_words`, `encrypt`, `decrypt`) used by
//!   Skein, where a length mismatch is a programming error and panics;
//! * a byte API (`new`, `encrypt_block`, `decrypt_block`) that validates its
//!   inputs and returns [`CryptoError`].

mod tables;

use crate::words::{load_words_le, store_words_le};
use skeinfish_types::{CryptoError, StateSize};
use tables::{Schedule, C240, SCHEDULE_1024, SCHEDULE_256, SCHEDULE_512};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Threefish tweak size in bytes.
pub const THREEFISH_TWEAK_SIZE: usize = 16;

/// Largest block size in 64-bit words (Threefish-1024).
pub(crate) const MAX_WORDS: usize = 16;

/// A keyed and tweaked Threefish instance.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Threefish {
    #[zeroize(skip)]
    size: StateSize,
    /// Key words followed by the parity word.
    key: [u64; MAX_WORDS + 1],
    /// Tweak words followed by their XOR.
    tweak: [u64; 3],
}

impl std::fmt::Debug for Threefish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Threefish")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl Threefish {
    /// Create a Threefish instance from a byte key and tweak.
    ///
    /// The key length (32, 64 or 128 bytes) selects the variant; the tweak
    /// must be exactly 16 bytes.
    pub fn new(key: &[u8], tweak: &[u8]) -> Result<Self, CryptoError> {
        let size = StateSize::from_bytes(key.len())?;
        let mut cipher = Self::with_size(size);
        cipher.set_key_bytes(key)?;
        cipher.set_tweak_bytes(tweak)?;
        Ok(cipher)
    }

    /// Create an instance with an all-zero key and tweak.
    pub fn with_size(size: StateSize) -> Self {
        let mut cipher = Threefish {
            size,
            key: [0; MAX_WORDS + 1],
            tweak: [0; 3],
        };
        cipher.key[size.words()] = C240;
        cipher
    }

    pub fn state_size(&self) -> StateSize {
        self.size
    }

    /// Block (and key) size in bytes.
    pub fn block_size(&self) -> usize {
        self.size.bytes()
    }

    /// Load the key words and recompute the parity word.
    ///
    /// Panics if `key.len()` is not the variant's word count.
    pub fn set_key(&mut self, key: &[u64]) {
        let w = self.size.words();
        assert_eq!(key.len(), w, "threefish: key word count mismatch");
        let mut parity = C240;
        for (dst, &k) in self.key.iter_mut().zip(key) {
            *dst = k;
            parity ^= k;
        }
        self.key[w] = parity;
    }

    /// Load a byte key of exactly one block.
    pub fn set_key_bytes(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        let w = self.size.words();
        if key.len() != self.size.bytes() {
            return Err(CryptoError::InvalidKeyLength {
                expected: self.size.bytes(),
                got: key.len(),
            });
        }
        let mut words = [0u64; MAX_WORDS];
        load_words_le(key, &mut words[..w]);
        self.set_key(&words[..w]);
        words.zeroize();
        Ok(())
    }

    /// Set the tweak from a two-word slice.
    pub fn set_tweak(&mut self, tweak: &[u64]) -> Result<(), CryptoError> {
        match tweak {
            &[t0, t1] => {
                self.set_tweak_words([t0, t1]);
                Ok(())
            }
            _ => Err(CryptoError::InvalidTweakLength {
                expected: 2,
                got: tweak.len(),
            }),
        }
    }

    pub fn set_tweak_words(&mut self, tweak: [u64; 2]) {
        self.tweak = [tweak[0], tweak[1], tweak[0] ^ tweak[1]];
    }

    /// Set the tweak from 16 little-endian bytes.
    pub fn set_tweak_bytes(&mut self, tweak: &[u8]) -> Result<(), CryptoError> {
        if tweak.len() != THREEFISH_TWEAK_SIZE {
            return Err(CryptoError::InvalidTweakLength {
                expected: THREEFISH_TWEAK_SIZE,
                got: tweak.len(),
            });
        }
        let mut words = [0u64; 2];
        load_words_le(tweak, &mut words);
        self.set_tweak_words(words);
        Ok(())
    }

    /// Encrypt one block of words.
    ///
    /// Panics if either slice is not the variant's word count.
    pub fn encrypt(&self, input: &[u64], output: &mut [u64]) {
        let w = self.size.words();
        assert_eq!(input.len(), w, "threefish: block word count mismatch");
        assert_eq!(output.len(), w, "threefish: block word count mismatch");
        let sched = self.schedule();
        let pairs = w / 2;

        let mut v = [0u64; MAX_WORDS];
        let mut f = [0u64; MAX_WORDS];
        v[..w].copy_from_slice(input);

        for d in 0..sched.rounds {
            if d % 4 == 0 {
                self.add_subkey(&mut v[..w], d / 4);
            }
            let rot = sched.rotation_row(d, pairs);
            for j in 0..pairs {
                let a = v[2 * j].wrapping_add(v[2 * j + 1]);
                f[2 * j] = a;
                f[2 * j + 1] = v[2 * j + 1].rotate_left(rot[j]) ^ a;
            }
            for (i, &p) in sched.permutation.iter().enumerate() {
                v[i] = f[p];
            }
        }
        self.add_subkey(&mut v[..w], sched.rounds / 4);

        output.copy_from_slice(&v[..w]);
        v.zeroize();
        f.zeroize();
    }

    /// Decrypt one block of words.
    ///
    /// Panics if either slice is not the variant's word count.
    pub fn decrypt(&self, input: &[u64], output: &mut [u64]) {
        let w = self.size.words();
        assert_eq!(input.len(), w, "threefish: block word count mismatch");
        assert_eq!(output.len(), w, "threefish: block word count mismatch");
        let sched = self.schedule();
        let pairs = w / 2;

        let mut v = [0u64; MAX_WORDS];
        let mut f = [0u64; MAX_WORDS];
        v[..w].copy_from_slice(input);

        self.sub_subkey(&mut v[..w], sched.rounds / 4);
        for d in (0..sched.rounds).rev() {
            for (i, &p) in sched.permutation.iter().enumerate() {
                f[p] = v[i];
            }
            let rot = sched.rotation_row(d, pairs);
            for j in 0..pairs {
                let b = (f[2 * j + 1] ^ f[2 * j]).rotate_right(rot[j]);
                v[2 * j] = f[2 * j].wrapping_sub(b);
                v[2 * j + 1] = b;
            }
            if d % 4 == 0 {
                self.sub_subkey(&mut v[..w], d / 4);
            }
        }

        output.copy_from_slice(&v[..w]);
        v.zeroize();
        f.zeroize();
    }

    /// Encrypt a single block in place.
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        self.process_block(block, Self::encrypt)
    }

    /// Decrypt a single block in place.
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        self.process_block(block, Self::decrypt)
    }

    fn process_block(
        &self,
        block: &mut [u8],
        op: fn(&Self, &[u64], &mut [u64]),
    ) -> Result<(), CryptoError> {
        let w = self.size.words();
        if block.len() != self.size.bytes() {
            return Err(CryptoError::InvalidBlockLength {
                expected: self.size.bytes(),
                got: block.len(),
            });
        }
        let mut input = [0u64; MAX_WORDS];
        let mut output = [0u64; MAX_WORDS];
        load_words_le(block, &mut input[..w]);
        op(self, &input[..w], &mut output[..w]);
        store_words_le(&output[..w], block);
        input.zeroize();
        output.zeroize();
        Ok(())
    }

    fn schedule(&self) -> &'static Schedule {
        match self.size {
            StateSize::Bits256 => &SCHEDULE_256,
            StateSize::Bits512 => &SCHEDULE_512,
            StateSize::Bits1024 => &SCHEDULE_1024,
        }
    }

    #[inline]
    fn subkey_word(&self, s: usize, i: usize) -> u64 {
        let w = self.size.words();
        let k = self.key[(s + i) % (w + 1)];
        if i == w - 3 {
            k.wrapping_add(self.tweak[s % 3])
        } else if i == w - 2 {
            k.wrapping_add(self.tweak[(s + 1) % 3])
        } else if i == w - 1 {
            k.wrapping_add(s as u64)
        } else {
            k
        }
    }

    fn add_subkey(&self, v: &mut [u64], s: usize) {
        for (i, x) in v.iter_mut().enumerate() {
            *x = x.wrapping_add(self.subkey_word(s, i));
        }
    }

    fn sub_subkey(&self, v: &mut [u64], s: usize) {
        for (i, x) in v.iter_mut().enumerate() {
            *x = x.wrapping_sub(self.subkey_word(s, i));
        }
    }
}
