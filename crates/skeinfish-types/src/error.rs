/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("invalid argument")]
    InvalidArg,
    #[error("random generation failed")]
    RandomFailed,

    // Parameter validation errors
    #[error("unsupported state size: {0} bits (expected 256, 512 or 1024)")]
    InvalidStateSize(usize),
    #[error("invalid output size: {0} bits (must be positive and divisible by 8)")]
    InvalidOutputSize(usize),
    #[error("invalid config version: {0} (must be between 0 and 3)")]
    InvalidVersion(u8),
    #[error("invalid tree level: {0} (must be between 0 and 63)")]
    InvalidTreeLevel(u8),
    #[error("invalid tree max height: 1 is reserved")]
    InvalidTreeMaxHeight,
    #[error("invalid schema length: expected 4 bytes, got {0}")]
    InvalidSchemaLength(usize),
    #[error("invalid tweak length: expected {expected}, got {got}")]
    InvalidTweakLength { expected: usize, got: usize },

    // Symmetric cipher errors
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("invalid iv length")]
    InvalidIvLength,
    #[error("invalid block length: expected {expected}, got {got}")]
    InvalidBlockLength { expected: usize, got: usize },
    #[error("input is not a multiple of the block size")]
    InputNotAligned,
    #[error("invalid padding")]
    InvalidPadding,

    // Hash state errors
    #[error("hash already finalized; initialize before reuse")]
    HashFinalized,
    #[error("mac: empty key produced no output")]
    EmptyMacKey,
}
