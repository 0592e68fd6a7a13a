//! Little-endian conversion between byte buffers and 64-bit word arrays.
//!
//! Threefish and Skein treat every block as an array of `u64` words loaded
//! least-significant byte first.

/// Load `bytes` into `words`, eight bytes per word.
///
/// `bytes.len()` must equal `words.len() * 8`.
pub fn load_words_le(bytes: &[u8], words: &mut [u64]) {
    assert_eq!(bytes.len(), words.len() * 8, "byte/word length mismatch");
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_le_bytes(buf);
    }
}

/// Store `words` into `bytes`, eight bytes per word.
///
/// `bytes.len()` must equal `words.len() * 8`.
pub fn store_words_le(words: &[u64], bytes: &mut [u8]) {
    assert_eq!(bytes.len(), words.len() * 8, "byte/word length mismatch");
    for (chunk, word) in bytes.chunks_exact_mut(8).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

/// Store the first `out.len()` bytes of the little-endian serialization of
/// `words`. The output may end in the middle of a word.
pub fn store_bytes_le(words: &[u64], out: &mut [u8]) {
    assert!(out.len() <= words.len() * 8, "output longer than source words");
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = (words[i / 8] >> (8 * (i % 8))) as u8;
    }
}

/// Decode a byte slice into a freshly allocated word vector.
#[cfg(test)]
pub fn words_from_le_bytes(bytes: &[u8]) -> Vec<u64> {
    let mut words = vec![0u64; bytes.len() / 8];
    load_words_le(bytes, &mut words);
    words
}
