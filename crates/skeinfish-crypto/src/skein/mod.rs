//! Skein hash function (version 1.3).
//!
//! Skein drives Threefish through Unique Block Iteration (UBI): every block
//! is encrypted under the running chaining state as key and a tweak carrying
//! its position and type, and the plaintext is fed forward into the result.
//! A hash is three UBI chains: configuration, message and output.
//!
//! [`Skein`] is the general engine with arbitrary output length and direct
//! access to the configuration and tweak, which is enough to build MACs,
//! personalized hashes and tree modes on top. Fixed-size wrappers live in
//! [`presets`].

pub mod config;
#[cfg(feature = "skein-mac")]
pub mod mac;
pub mod presets;

use crate::provider::Digest;
use crate::threefish::Threefish;
use crate::tweak::{UbiTweak, UbiType};
use crate::words::{load_words_le, store_bytes_le};
use skeinfish_types::{CryptoError, StateSize};
use zeroize::{Zeroize, ZeroizeOnDrop};

pub use config::SkeinConfig;
#[cfg(feature = "skein-mac")]
pub use mac::SkeinMac;
pub use presets::{Skein1024, Skein224, Skein256, Skein384, Skein512};

/// How [`Skein::initialize_with`] prepares the chaining state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitializationType {
    /// State = configuration value; a Message chain is started.
    #[default]
    Normal,
    /// State = all zeros. No block type is started; set one through
    /// [`Skein::tweak_mut`] before feeding data.
    ZeroedState,
    /// State is kept from the previous chain. No block type is started.
    ChainedState,
    /// The configuration is regenerated keyed by the current state, then a
    /// normal initialization follows.
    ChainedConfig,
}

/// An incremental Skein hash context.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Skein {
    #[zeroize(skip)]
    size: StateSize,
    cipher: Threefish,
    config: SkeinConfig,
    tweak: UbiTweak,
    /// Pending input; always holds back the most recent block.
    buffer: Vec<u8>,
    filled: usize,
    cipher_input: Vec<u64>,
    state: Vec<u64>,
    finalized: bool,
}

impl std::fmt::Debug for Skein {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skein")
            .field("size", &self.size)
            .field("output_bits", &self.output_bits())
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

impl Skein {
    /// Create a Skein context with a `state_bits`-wide state (256, 512 or
    /// 1024) producing `output_bits` of output (positive, multiple of 8).
    pub fn new(state_bits: usize, output_bits: usize) -> Result<Self, CryptoError> {
        Self::with_state_size(StateSize::from_bits(state_bits)?, output_bits)
    }

    pub fn with_state_size(size: StateSize, output_bits: usize) -> Result<Self, CryptoError> {
        Ok(Self::from_config(SkeinConfig::new(size, output_bits)?))
    }

    /// Build an initialized context around `config`, generating its value.
    pub(crate) fn from_config(mut config: SkeinConfig) -> Self {
        config.generate_configuration(None);
        let size = config.state_size();
        let mut skein = Skein {
            size,
            cipher: Threefish::with_size(size),
            config,
            tweak: UbiTweak::new(),
            buffer: vec![0; size.bytes()],
            filled: 0,
            cipher_input: vec![0; size.words()],
            state: vec![0; size.words()],
            finalized: false,
        };
        skein.initialize();
        skein
    }

    /// One-shot hash of `data`.
    pub fn digest(
        state_bits: usize,
        output_bits: usize,
        data: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let mut ctx = Self::new(state_bits, output_bits)?;
        ctx.update(data)?;
        ctx.finalize()?.ok_or(CryptoError::InvalidArg)
    }

    pub fn state_size(&self) -> StateSize {
        self.size
    }

    pub fn output_bits(&self) -> usize {
        self.config.output_bits()
    }

    /// Output length in bytes.
    pub fn output_bytes(&self) -> usize {
        self.output_bits().div_ceil(8)
    }

    pub fn config(&self) -> &SkeinConfig {
        &self.config
    }

    /// Mutable access to the configuration. Changes take effect after
    /// `config_mut().generate_configuration(..)` and the next `initialize()`.
    pub fn config_mut(&mut self) -> &mut SkeinConfig {
        &mut self.config
    }

    pub fn tweak(&self) -> &UbiTweak {
        &self.tweak
    }

    pub fn tweak_mut(&mut self) -> &mut UbiTweak {
        &mut self.tweak
    }

    /// Start a new message: state = configuration value, fresh Message chain.
    pub fn initialize(&mut self) {
        self.state.copy_from_slice(self.config.config_value());
        self.tweak.start_new_block_type(UbiType::Message);
        self.filled = 0;
        self.finalized = false;
    }

    pub fn initialize_with(&mut self, ty: InitializationType) {
        match ty {
            InitializationType::Normal => self.initialize(),
            InitializationType::ZeroedState => {
                self.state.fill(0);
                self.filled = 0;
                self.finalized = false;
            }
            InitializationType::ChainedState => {
                self.filled = 0;
                self.finalized = false;
            }
            InitializationType::ChainedConfig => {
                self.config.generate_configuration(Some(&self.state));
                self.initialize();
            }
        }
    }

    /// Alias for [`initialize`](Self::initialize).
    pub fn reset(&mut self) {
        self.initialize();
    }

    /// Feed data into the current UBI chain.
    pub fn update(&mut self, mut data: &[u8]) -> Result<(), CryptoError> {
        if self.finalized {
            return Err(CryptoError::HashFinalized);
        }
        let block = self.size.bytes();
        while !data.is_empty() {
            // A full buffer is only compressed once more input shows up, so
            // the final block is always left for finalize().
            if self.filled == block {
                self.buffer_to_cipher_input();
                self.process_block(block as u64);
                self.tweak.set_first_block(false);
                self.filled = 0;
            }
            let take = (block - self.filled).min(data.len());
            self.buffer[self.filled..self.filled + take].copy_from_slice(&data[..take]);
            self.filled += take;
            data = &data[take..];
        }
        Ok(())
    }

    /// Close the current chain and expand the output.
    ///
    /// Returns `Ok(None)` when the chain is Key-typed and received no bytes:
    /// an empty key contributes nothing and the state is left untouched.
    /// The chaining state after this call is the post-chain state, so a
    /// following `initialize_with(ChainedConfig)` or `ChainedState` picks it
    /// up. Further updates fail with [`CryptoError::HashFinalized`] until
    /// the context is initialized again.
    pub fn finalize(&mut self) -> Result<Option<Vec<u8>>, CryptoError> {
        if self.finalized {
            return Err(CryptoError::HashFinalized);
        }
        self.finalized = true;

        if self.tweak.block_type() == Some(UbiType::Key) && self.filled == 0 {
            return Ok(None);
        }

        self.buffer[self.filled..].fill(0);
        self.buffer_to_cipher_input();
        self.tweak.set_final_block(true);
        self.process_block(self.filled as u64);

        let mut out = vec![0u8; self.output_bytes()];
        self.expand_output(&mut out);
        Ok(Some(out))
    }

    /// Counter-mode output: one Out-typed UBI per state-sized output chunk,
    /// each over the 8-byte counter against the same chaining state.
    fn expand_output(&mut self, out: &mut [u8]) {
        let mut saved = self.state.clone();
        for (counter, chunk) in out.chunks_mut(self.size.bytes()).enumerate() {
            self.cipher_input.fill(0);
            self.cipher_input[0] = counter as u64;
            self.tweak.start_new_block_type(UbiType::Out);
            self.tweak.set_final_block(true);
            self.process_block(8);
            store_bytes_le(&self.state, chunk);
            self.state.copy_from_slice(&saved);
        }
        self.cipher_input.as_mut_slice().zeroize();
        saved.zeroize();
    }

    fn buffer_to_cipher_input(&mut self) {
        load_words_le(&self.buffer, &mut self.cipher_input);
    }

    /// One UBI step over `cipher_input`, counting `bytes` new message bytes.
    fn process_block(&mut self, bytes: u64) {
        self.cipher.set_key(&self.state);
        self.tweak.add_bytes_processed(bytes);
        self.cipher.set_tweak_words(self.tweak.words());
        self.cipher.encrypt(&self.cipher_input, &mut self.state);
        for (s, m) in self.state.iter_mut().zip(&self.cipher_input) {
            *s ^= m;
        }
    }
}

impl Digest for Skein {
    fn output_size(&self) -> usize {
        self.output_bytes()
    }

    fn block_size(&self) -> usize {
        self.size.bytes()
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        Skein::update(self, data)
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        if out.len() < self.output_bytes() {
            return Err(CryptoError::InvalidArg);
        }
        let mut hash = self.finalize()?.ok_or(CryptoError::EmptyMacKey)?;
        out[..hash.len()].copy_from_slice(&hash);
        hash.zeroize();
        Ok(())
    }

    fn reset(&mut self) {
        self.initialize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// 0xFF, 0xFE, 0xFD, ...
    fn descending(len: usize) -> Vec<u8> {
        (0..len).map(|i| 0xFF - i as u8).collect()
    }

    #[test]
    fn test_skein256_256_one_block() {
        let out = Skein::digest(256, 256, &descending(32)).unwrap();
        // 32 bytes is one block; the 64-byte vector below checks chaining.
        assert_eq!(out.len(), 32);

        let out = Skein::digest(256, 256, &descending(64)).unwrap();
        assert_eq!(
            to_hex(&out),
            "df28e916630d0b44c4a849dc9a02f07a07cb30f732318256b15d865ac4ae162f"
        );
    }

    #[test]
    fn test_skein512_512_two_blocks() {
        let out = Skein::digest(512, 512, &descending(128)).unwrap();
        assert_eq!(
            to_hex(&out),
            "91cca510c263c4ddd010530a33073309628631f308747e1bcbaa90e451cab92e\
             5188087af4188773a332303e6667a7a210856f742139000071f48e8ba2a5adb7"
        );
    }

    #[test]
    fn test_skein1024_1024_one_block() {
        let out = Skein::digest(1024, 1024, &descending(128)).unwrap();
        assert_eq!(
            to_hex(&out),
            "1f3e02c46fb80a3fcd2dfbbc7c173800b40c60c2354af551189ebf433c3d85f9\
             ff1803e6d920493179ed7ae7fce69c3581a5a2f82d3e0c7a295574d0cd7d217c\
             484d2f6313d59a7718ead07d0729c24851d7e7d2491b902d489194e6b7d369db\
             0ab7aa106f0ee0a39a42efc54f18d93776080985f907574f995ec6a37153a578"
        );
    }

    #[test]
    fn test_output_longer_than_state() {
        let out = Skein::digest(256, 512, &descending(64)).unwrap();
        assert_eq!(
            to_hex(&out),
            "95de9901c2d7964e4fb9077ccbd55f97a448e773eea14029cdf0221294a0372d\
             d94a5a3f1ece9067c7e1628d6b26f1dd925dcf327497871fd5246de5baef9d83"
        );
    }

    #[test]
    fn test_empty_message() {
        let out = Skein::digest(512, 512, b"").unwrap();
        assert_eq!(
            to_hex(&out),
            "bc5b4c50925519c290cc634277ae3d6257212395cba733bbad37a4af0fa06af4\
             1fca7903d06564fea7a2d3730dbdb80c1f85562dfcc070334ea4d1d9e72cba7a"
        );
    }

    #[test]
    fn test_chunking_is_irrelevant() {
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 7 + 3) as u8).collect();
        for (state_bits, output_bits) in [(256, 256), (512, 384), (1024, 1024)] {
            let expected = Skein::digest(state_bits, output_bits, &data).unwrap();
            for chunk in [1usize, 3, 31, 32, 33, 64, 127, 128, 129, 999] {
                let mut ctx = Skein::new(state_bits, output_bits).unwrap();
                for piece in data.chunks(chunk) {
                    ctx.update(piece).unwrap();
                }
                assert_eq!(ctx.finalize().unwrap().unwrap(), expected, "chunk {chunk}");
            }
        }
    }

    #[test]
    fn test_output_lengths() {
        for (state_bits, output_bits, expected) in [
            (256, 224, 28),
            (256, 8, 1),
            (512, 2056, 257),
            (1024, 1032, 129),
        ] {
            let out = Skein::digest(state_bits, output_bits, b"abc").unwrap();
            assert_eq!(out.len(), expected);
        }
    }

    #[test]
    fn test_long_output_prefix_differs_by_config() {
        // Output length is part of the configuration, so a shorter output is
        // not a prefix of a longer one.
        let short = Skein::digest(512, 256, b"abc").unwrap();
        let long = Skein::digest(512, 512, b"abc").unwrap();
        assert_ne!(&long[..32], &short[..]);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            Skein::new(384, 256).unwrap_err(),
            CryptoError::InvalidStateSize(384)
        );
        assert_eq!(
            Skein::new(256, 0).unwrap_err(),
            CryptoError::InvalidOutputSize(0)
        );
        assert_eq!(
            Skein::new(256, 252).unwrap_err(),
            CryptoError::InvalidOutputSize(252)
        );
    }

    #[test]
    fn test_finalized_state() {
        let mut ctx = Skein::new(256, 256).unwrap();
        ctx.update(b"abc").unwrap();
        let first = ctx.finalize().unwrap().unwrap();
        assert_eq!(ctx.update(b"more"), Err(CryptoError::HashFinalized));
        assert_eq!(ctx.finalize(), Err(CryptoError::HashFinalized));

        ctx.reset();
        ctx.update(b"abc").unwrap();
        assert_eq!(ctx.finalize().unwrap().unwrap(), first);
    }

    #[test]
    fn test_reuse_after_finalize() {
        let msg: Vec<u8> = (0..300u32).map(|i| i as u8).collect();
        for (state_bits, output_bits) in [(256, 256), (512, 1032), (1024, 1024)] {
            let expected = Skein::digest(state_bits, output_bits, &msg).unwrap();
            let mut ctx = Skein::new(state_bits, output_bits).unwrap();
            for _ in 0..3 {
                ctx.update(&msg).unwrap();
                assert_eq!(ctx.finalize().unwrap().unwrap(), expected);
                ctx.reset();
            }
        }
    }

    #[test]
    fn test_empty_key_block_yields_none() {
        let mut ctx = Skein::new(512, 512).unwrap();
        ctx.initialize_with(InitializationType::ZeroedState);
        ctx.tweak_mut().start_new_block_type(UbiType::Key);
        assert_eq!(ctx.finalize().unwrap(), None);

        // Non-empty key chains produce output.
        ctx.initialize_with(InitializationType::ZeroedState);
        ctx.tweak_mut().start_new_block_type(UbiType::Key);
        ctx.update(&[1, 2, 3]).unwrap();
        assert!(ctx.finalize().unwrap().is_some());
    }

    #[test]
    fn test_chained_config_after_empty_key_matches_plain_hash() {
        // Zero state + ChainedConfig reproduces the normal configuration.
        let mut ctx = Skein::new(256, 256).unwrap();
        ctx.initialize_with(InitializationType::ZeroedState);
        ctx.initialize_with(InitializationType::ChainedConfig);
        ctx.update(b"abc").unwrap();
        let chained = ctx.finalize().unwrap().unwrap();
        assert_eq!(chained, Skein::digest(256, 256, b"abc").unwrap());
    }

    #[test]
    fn test_chained_state_continues_from_previous_chain() {
        let mut ctx = Skein::new(256, 256).unwrap();
        ctx.update(b"first").unwrap();
        ctx.finalize().unwrap();

        ctx.initialize_with(InitializationType::ChainedState);
        ctx.tweak_mut().start_new_block_type(UbiType::Nonce);
        ctx.update(b"second").unwrap();
        let chained = ctx.finalize().unwrap().unwrap();

        let mut fresh = Skein::new(256, 256).unwrap();
        fresh.initialize_with(InitializationType::ChainedState);
        fresh.tweak_mut().start_new_block_type(UbiType::Nonce);
        fresh.update(b"second").unwrap();
        assert_ne!(fresh.finalize().unwrap().unwrap(), chained);
    }

    #[test]
    fn test_personalization_changes_hash() {
        let mut ctx = Skein::new(256, 256).unwrap();
        ctx.config_mut().set_schema(b"TEST").unwrap();
        ctx.config_mut().generate_configuration(None);
        ctx.initialize();
        ctx.update(b"abc").unwrap();
        let personalized = ctx.finalize().unwrap().unwrap();
        assert_ne!(personalized, Skein::digest(256, 256, b"abc").unwrap());
    }

    #[test]
    fn test_digest_trait() {
        let mut ctx = Skein::new(512, 384).unwrap();
        assert_eq!(Digest::output_size(&ctx), 48);
        assert_eq!(Digest::block_size(&ctx), 64);

        let mut short = [0u8; 47];
        assert_eq!(Digest::finish(&mut ctx, &mut short), Err(CryptoError::InvalidArg));

        let mut out = [0u8; 48];
        Digest::finish(&mut ctx, &mut out).unwrap();
        assert_eq!(
            to_hex(&out),
            "dd5aaf4589dc227bd1eb7bc68771f5baeaa3586ef6c7680167a023ec8ce26980\
             f06c4082c488b4ac9ef313f8cbe70808"
        );

        Digest::reset(&mut ctx);
        Digest::update(&mut ctx, b"x").unwrap();
        Digest::finish(&mut ctx, &mut out).unwrap();
    }
}
