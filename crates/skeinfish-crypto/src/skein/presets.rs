//! Fixed-size Skein hashes.

use super::{Skein, SkeinConfig};
use crate::provider::{Digest, HashAlgorithm};
use skeinfish_types::{CryptoError, HashAlgId};

/// Skein-224 output size in bytes.
pub const SKEIN224_OUTPUT_SIZE: usize = 28;
/// Skein-256 output size in bytes.
pub const SKEIN256_OUTPUT_SIZE: usize = 32;
/// Skein-384 output size in bytes.
pub const SKEIN384_OUTPUT_SIZE: usize = 48;
/// Skein-512 output size in bytes.
pub const SKEIN512_OUTPUT_SIZE: usize = 64;
/// Skein-1024 output size in bytes.
pub const SKEIN1024_OUTPUT_SIZE: usize = 128;

fn engine_for(alg: HashAlgId) -> Skein {
    Skein::from_config(SkeinConfig::with_output_bits(
        alg.state_size(),
        alg.output_bits(),
    ))
}

macro_rules! skein_preset {
    ($(#[$meta:meta])* $name:ident, $alg:expr, $out:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            inner: Skein,
        }

        impl $name {
            /// Create a new hash context.
            pub fn new() -> Self {
                $name {
                    inner: engine_for($alg),
                }
            }

            /// Feed data into the hash computation.
            pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
                self.inner.update(data)
            }

            /// Finalize the hash and return the digest.
            pub fn finish(&mut self) -> Result<[u8; $out], CryptoError> {
                let hash = self.inner.finalize()?.ok_or(CryptoError::InvalidArg)?;
                let mut out = [0u8; $out];
                out.copy_from_slice(&hash);
                Ok(out)
            }

            /// Reset the hash context for a new computation.
            pub fn reset(&mut self) {
                self.inner.initialize();
            }

            /// One-shot digest of `data`.
            pub fn digest(data: &[u8]) -> Result<[u8; $out], CryptoError> {
                let mut ctx = Self::new();
                ctx.update(data)?;
                ctx.finish()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Digest for $name {
            fn output_size(&self) -> usize {
                $out
            }

            fn block_size(&self) -> usize {
                Digest::block_size(&self.inner)
            }

            fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
                self.inner.update(data)
            }

            fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
                Digest::finish(&mut self.inner, out)
            }

            fn reset(&mut self) {
                self.inner.initialize();
            }
        }
    };
}

skein_preset!(
    /// Skein-256-224.
    Skein224,
    HashAlgId::Skein224,
    SKEIN224_OUTPUT_SIZE
);
skein_preset!(
    /// Skein-256-256.
    Skein256,
    HashAlgId::Skein256,
    SKEIN256_OUTPUT_SIZE
);
skein_preset!(
    /// Skein-512-384.
    Skein384,
    HashAlgId::Skein384,
    SKEIN384_OUTPUT_SIZE
);
skein_preset!(
    /// Skein-512-512.
    Skein512,
    HashAlgId::Skein512,
    SKEIN512_OUTPUT_SIZE
);
skein_preset!(
    /// Skein-1024-1024.
    Skein1024,
    HashAlgId::Skein1024,
    SKEIN1024_OUTPUT_SIZE
);

impl HashAlgorithm for HashAlgId {
    fn new_digest(&self) -> Box<dyn Digest> {
        Box::new(engine_for(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_skein224_empty() {
        assert_eq!(
            to_hex(&Skein224::digest(b"").unwrap()),
            "0fadf1fa39e3837a95b3660b4184d9c2f3cfc94b55d8e7a083278bf8"
        );
    }

    #[test]
    fn test_skein256_empty_and_single_byte() {
        assert_eq!(
            to_hex(&Skein256::digest(b"").unwrap()),
            "c8877087da56e072870daa843f176e9453115929094c3a40c463a196c29bf7ba"
        );
        assert_eq!(
            to_hex(&Skein256::digest(&[0xff]).unwrap()),
            "0b98dcd198ea0e50a7a244c444e25c23da30c10fc9a1f270a6637f1f34e67ed2"
        );
    }

    #[test]
    fn test_skein384_empty() {
        assert_eq!(
            to_hex(&Skein384::digest(b"").unwrap()),
            "dd5aaf4589dc227bd1eb7bc68771f5baeaa3586ef6c7680167a023ec8ce26980\
             f06c4082c488b4ac9ef313f8cbe70808"
        );
    }

    #[test]
    fn test_skein512_fox() {
        assert_eq!(
            to_hex(&Skein512::digest(b"The quick brown fox jumps over the lazy dog").unwrap()),
            "94c2ae036dba8783d0b3f7d6cc111ff810702f5c77707999be7e1c9486ff238a\
             7044de734293147359b4ac7e1d09cd247c351d69826b78dcddd951f0ef912713"
        );
    }

    #[test]
    fn test_skein1024_empty() {
        assert_eq!(
            to_hex(&Skein1024::digest(b"").unwrap()),
            "0fff9563bb3279289227ac77d319b6fff8d7e9f09da1247b72a0a265cd6d2a62\
             645ad547ed8193db48cff847c06494a03f55666d3b47eb4c20456c9373c86297\
             d630d5578ebd34cb40991578f9f52b18003efa35d3da6553ff35db91b81ab890\
             bec1b189b7f52cb2a783ebb7d823d725b0b4a71f6824e88f68f982eefc6d19c6"
        );
    }

    #[test]
    fn test_incremental_and_reset() {
        let mut ctx = Skein512::new();
        ctx.update(b"The quick brown fox ").unwrap();
        ctx.update(b"jumps over the lazy dog").unwrap();
        let first = ctx.finish().unwrap();
        assert_eq!(
            first,
            Skein512::digest(b"The quick brown fox jumps over the lazy dog").unwrap()
        );

        ctx.reset();
        let empty = ctx.finish().unwrap();
        assert_ne!(first, empty);
    }

    #[test]
    fn test_hash_algorithm_ids() {
        let expected = Skein256::digest(b"abc").unwrap();
        assert_eq!(HashAlgId::Skein256.hash(b"abc").unwrap(), expected.to_vec());

        for alg in [
            HashAlgId::Skein224,
            HashAlgId::Skein256,
            HashAlgId::Skein384,
            HashAlgId::Skein512,
            HashAlgId::Skein1024,
        ] {
            let ctx = alg.new_digest();
            assert_eq!(ctx.output_size() * 8, alg.output_bits());
            assert_eq!(ctx.block_size(), alg.state_size().bytes());
        }
    }

    #[test]
    fn test_digest_trait_on_preset() {
        let mut ctx = Skein1024::default();
        assert_eq!(Digest::output_size(&ctx), SKEIN1024_OUTPUT_SIZE);
        assert_eq!(Digest::block_size(&ctx), 128);
        let mut out = [0u8; SKEIN1024_OUTPUT_SIZE];
        Digest::finish(&mut ctx, &mut out).unwrap();
        assert_eq!(out, Skein1024::digest(b"").unwrap());
    }
}
