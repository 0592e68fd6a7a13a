//! Streaming Threefish mode transform.

use super::{CipherMode, Direction, Padding};
use crate::threefish::{Threefish, THREEFISH_TWEAK_SIZE};
use skeinfish_types::CryptoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A reusable encryptor or decryptor for one key, IV, mode and padding.
///
/// Feed whole blocks through [`transform_block`](Self::transform_block) and
/// finish each message with
/// [`transform_final_block`](Self::transform_final_block), which pads or
/// unpads and then rewinds the chaining state to the original IV.
///
/// When decrypting ECB or CBC with a removable padding, the most recent
/// ciphertext block is held back: `transform_block` output lags the input
/// by one block, and the held block is released by the final call.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ModeTransform {
    cipher: Threefish,
    #[zeroize(skip)]
    direction: Direction,
    #[zeroize(skip)]
    mode: CipherMode,
    #[zeroize(skip)]
    padding: Padding,
    iv: Vec<u8>,
    /// CBC chaining block, or the OFB/CFB keystream register.
    register: Vec<u8>,
    /// Keystream bytes consumed from `register` (stream modes).
    used: usize,
    /// Held-back ciphertext block awaiting unpadding.
    held: Vec<u8>,
    holding: bool,
}

impl std::fmt::Debug for ModeTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeTransform")
            .field("block_size", &self.block_size())
            .field("direction", &self.direction)
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .finish_non_exhaustive()
    }
}

impl ModeTransform {
    /// Create a transform. The key length (32, 64 or 128 bytes) selects
    /// the Threefish variant; the IV must be one block, except for ECB
    /// where it may be empty. The tweak starts at zero.
    pub fn new(
        key: &[u8],
        iv: &[u8],
        direction: Direction,
        mode: CipherMode,
        padding: Padding,
    ) -> Result<Self, CryptoError> {
        let cipher = Threefish::new(key, &[0u8; THREEFISH_TWEAK_SIZE])?;
        let block = cipher.block_size();

        let iv = match iv.len() {
            n if n == block => iv.to_vec(),
            0 if !mode.needs_iv() => vec![0u8; block],
            _ => return Err(CryptoError::InvalidIvLength),
        };

        let mut transform = ModeTransform {
            cipher,
            direction,
            mode,
            padding,
            iv,
            register: vec![0u8; block],
            used: 0,
            held: vec![0u8; block],
            holding: false,
        };
        transform.rewind();

        tracing::debug!(
            block_bits = block * 8,
            %mode,
            %padding,
            ?direction,
            "created threefish transform"
        );
        Ok(transform)
    }

    /// Set the two-word Threefish tweak used for every block.
    pub fn set_tweak(&mut self, tweak: &[u64]) -> Result<(), CryptoError> {
        self.cipher.set_tweak(tweak)
    }

    /// Set the tweak from 16 little-endian bytes.
    pub fn set_tweak_bytes(&mut self, tweak: &[u8]) -> Result<(), CryptoError> {
        self.cipher.set_tweak_bytes(tweak)
    }

    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Transform a whole number of blocks.
    pub fn transform_block(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let block = self.block_size();
        if input.len() % block != 0 {
            return Err(CryptoError::InputNotAligned);
        }
        if !self.holds_back() || input.is_empty() {
            return self.apply(input);
        }

        let mut out = Vec::with_capacity(input.len());
        if self.holding {
            let held = self.held.clone();
            out.extend(self.apply(&held)?);
        }
        let (body, last) = input.split_at(input.len() - block);
        out.extend(self.apply(body)?);
        self.held.copy_from_slice(last);
        self.holding = true;
        Ok(out)
    }

    /// Transform the last piece of a message and rewind to the original IV.
    ///
    /// Encryption accepts any length and pads according to the padding
    /// scheme (PKCS#7, ANSI X9.23 and ISO 10126 always add at least one
    /// byte; Zeros only completes a partial block; None rejects one).
    /// Decryption requires block-aligned input and strips removable
    /// padding. Stream modes never pad.
    pub fn transform_final_block(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let result = match self.direction {
            Direction::Encrypt => self.encrypt_final(input),
            Direction::Decrypt => self.decrypt_final(input),
        };
        self.rewind();
        result
    }

    /// Restore the chaining state to the original IV and drop any held block.
    pub fn rewind(&mut self) {
        let block = self.block_size();
        self.register.copy_from_slice(&self.iv);
        // Stream modes generate the first keystream block on demand.
        self.used = block;
        self.held.as_mut_slice().zeroize();
        self.holding = false;
    }

    fn holds_back(&self) -> bool {
        self.direction == Direction::Decrypt && !self.mode.is_stream() && self.padding.is_removable()
    }

    fn encrypt_final(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if self.mode.is_stream() {
            return self.apply(input);
        }
        let block = self.block_size();
        let full = input.len() - input.len() % block;
        let (body, rest) = input.split_at(full);

        let pads = match self.padding {
            Padding::None if !rest.is_empty() => return Err(CryptoError::InputNotAligned),
            Padding::None => false,
            Padding::Zeros => !rest.is_empty(),
            _ => true,
        };

        let mut out = self.apply(body)?;
        if pads {
            let mut last = vec![0u8; block];
            last[..rest.len()].copy_from_slice(rest);
            self.padding.pad(&mut last, rest.len())?;
            out.extend(self.apply(&last)?);
            last.zeroize();
        }
        Ok(out)
    }

    fn decrypt_final(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if self.mode.is_stream() {
            return self.apply(input);
        }
        let block = self.block_size();
        if input.len() % block != 0 {
            return Err(CryptoError::InputNotAligned);
        }

        let mut data = Vec::with_capacity(block + input.len());
        if self.holding {
            data.extend_from_slice(&self.held);
        }
        data.extend_from_slice(input);

        let mut out = self.apply(&data)?;
        let len = self.padding.unpadded_len(&out, block)?;
        out.truncate(len);
        Ok(out)
    }

    /// Run the mode over `data`. Block modes require aligned input.
    fn apply(&mut self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = data.to_vec();
        match (self.mode, self.direction) {
            (CipherMode::Ecb, Direction::Encrypt) => {
                for chunk in out.chunks_mut(self.register.len()) {
                    self.cipher.encrypt_block(chunk)?;
                }
            }
            (CipherMode::Ecb, Direction::Decrypt) => {
                for chunk in out.chunks_mut(self.register.len()) {
                    self.cipher.decrypt_block(chunk)?;
                }
            }
            (CipherMode::Cbc, Direction::Encrypt) => {
                for chunk in out.chunks_mut(self.register.len()) {
                    xor_in_place(chunk, &self.register);
                    self.cipher.encrypt_block(chunk)?;
                    self.register.copy_from_slice(chunk);
                }
            }
            (CipherMode::Cbc, Direction::Decrypt) => {
                for chunk in out.chunks_mut(self.register.len()) {
                    let ciphertext = chunk.to_vec();
                    self.cipher.decrypt_block(chunk)?;
                    xor_in_place(chunk, &self.register);
                    self.register.copy_from_slice(&ciphertext);
                }
            }
            (CipherMode::Ofb, _) => {
                for byte in out.iter_mut() {
                    self.refill_keystream()?;
                    *byte ^= self.register[self.used];
                    self.used += 1;
                }
            }
            (CipherMode::Cfb, direction) => {
                for byte in out.iter_mut() {
                    self.refill_keystream()?;
                    let input = *byte;
                    *byte ^= self.register[self.used];
                    // Feed the ciphertext byte back into the register.
                    self.register[self.used] = match direction {
                        Direction::Encrypt => *byte,
                        Direction::Decrypt => input,
                    };
                    self.used += 1;
                }
            }
        }
        Ok(out)
    }

    /// Encrypt the register in place once all its keystream bytes are used.
    fn refill_keystream(&mut self) -> Result<(), CryptoError> {
        if self.used == self.register.len() {
            self.cipher.encrypt_block(&mut self.register)?;
            self.used = 0;
        }
        Ok(())
    }
}

fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    const PLAINTEXT: &[u8] = b"Threefish block cipher modes test vector!!";

    fn key256() -> Vec<u8> {
        (0x10u8..0x30).collect()
    }

    fn iv256() -> Vec<u8> {
        (0xA0u8..0xC0).collect()
    }

    fn transform(direction: Direction, mode: CipherMode, padding: Padding) -> ModeTransform {
        ModeTransform::new(&key256(), &iv256(), direction, mode, padding).unwrap()
    }

    #[test]
    fn test_ecb_pkcs7_vector() {
        let mut enc = transform(Direction::Encrypt, CipherMode::Ecb, Padding::Pkcs7);
        let ct = enc.transform_final_block(PLAINTEXT).unwrap();
        assert_eq!(
            hex(&ct),
            "9d9943e3e126f246b6edb89f19816b1e00d9132482f31ef54084d1e3b905ff05\
             164206850ffd6a31e35a469d521d0abb836c8a4f0071685abb34fe2b7907ee7a"
        );
        let mut dec = transform(Direction::Decrypt, CipherMode::Ecb, Padding::Pkcs7);
        assert_eq!(dec.transform_final_block(&ct).unwrap(), PLAINTEXT);
    }

    #[test]
    fn test_cbc_pkcs7_vector() {
        let mut enc = transform(Direction::Encrypt, CipherMode::Cbc, Padding::Pkcs7);
        let ct = enc.transform_final_block(PLAINTEXT).unwrap();
        assert_eq!(
            hex(&ct),
            "da1e63342a8cdea1b0e82937f5ed592f5d4b1672323153d15ecceef01f0178ee\
             a75bbddea6c5b0828ae8151a559161c89a761c5224955195e064c6d9df977906"
        );
    }

    #[test]
    fn test_cbc_no_padding_vector() {
        let pt: Vec<u8> = (0u8..64).collect();
        let mut enc = transform(Direction::Encrypt, CipherMode::Cbc, Padding::None);
        let ct = enc.transform_block(&pt).unwrap();
        assert_eq!(
            hex(&ct),
            "824ad68b8866e58b286927331279ca7e04cb36b118617e1886ca913dee2e92a9\
             9ba58fb781312b26ada9c564c242086bd6b3a0789a048403975356be07c3d974"
        );
        assert!(enc.transform_final_block(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_ofb_vector() {
        let mut enc = transform(Direction::Encrypt, CipherMode::Ofb, Padding::Pkcs7);
        let ct = enc.transform_final_block(PLAINTEXT).unwrap();
        assert_eq!(ct.len(), PLAINTEXT.len());
        assert_eq!(
            hex(&ct),
            "4b4e0c3478d9a4ad6489e917dc26e4e3e4868f438967d28106fd31afb3506f51f314b1060606d0cb81a2"
        );
        let mut dec = transform(Direction::Decrypt, CipherMode::Ofb, Padding::Pkcs7);
        assert_eq!(dec.transform_final_block(&ct).unwrap(), PLAINTEXT);
    }

    #[test]
    fn test_cfb_vector() {
        let mut enc = transform(Direction::Encrypt, CipherMode::Cfb, Padding::None);
        let ct = enc.transform_final_block(PLAINTEXT).unwrap();
        assert_eq!(
            hex(&ct),
            "4b4e0c3478d9a4ad6489e917dc26e4e3e4868f438967d28106fd31afb3506f518c4d0b874aab9177edf3"
        );
        let mut dec = transform(Direction::Decrypt, CipherMode::Cfb, Padding::None);
        assert_eq!(dec.transform_final_block(&ct).unwrap(), PLAINTEXT);
    }

    #[test]
    fn test_roundtrip_all_modes_and_paddings() {
        let modes = [CipherMode::Ecb, CipherMode::Cbc, CipherMode::Ofb, CipherMode::Cfb];
        let paddings = [
            Padding::None,
            Padding::Zeros,
            Padding::Pkcs7,
            Padding::AnsiX923,
            Padding::Iso10126,
        ];
        for key_len in [32usize, 64, 128] {
            let key: Vec<u8> = (0..key_len).map(|i| i as u8).collect();
            let iv: Vec<u8> = (0..key_len).map(|i| (i * 3) as u8).collect();
            for mode in modes {
                for padding in paddings {
                    // Block-aligned lengths work for every padding; the
                    // unaligned one is skipped where it cannot round-trip.
                    for len in [0usize, key_len, 3 * key_len, key_len + 5] {
                        let unaligned = len % key_len != 0;
                        if !mode.is_stream() && unaligned && padding == Padding::None {
                            continue;
                        }
                        let pt: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
                        let mut enc =
                            ModeTransform::new(&key, &iv, Direction::Encrypt, mode, padding).unwrap();
                        let ct = enc.transform_final_block(&pt).unwrap();
                        let mut dec =
                            ModeTransform::new(&key, &iv, Direction::Decrypt, mode, padding).unwrap();
                        let mut back = dec.transform_final_block(&ct).unwrap();
                        if padding == Padding::Zeros && !mode.is_stream() {
                            back.truncate(len);
                        }
                        assert_eq!(back, pt, "{mode} {padding} len {len} key {key_len}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_padding_lengths() {
        let mut enc = transform(Direction::Encrypt, CipherMode::Cbc, Padding::Pkcs7);
        assert_eq!(enc.transform_final_block(&[0u8; 32]).unwrap().len(), 64);
        assert_eq!(enc.transform_final_block(&[]).unwrap().len(), 32);

        let mut enc = transform(Direction::Encrypt, CipherMode::Cbc, Padding::Zeros);
        assert_eq!(enc.transform_final_block(&[0u8; 32]).unwrap().len(), 32);
        assert_eq!(enc.transform_final_block(&[0u8; 33]).unwrap().len(), 64);
        assert!(enc.transform_final_block(&[]).unwrap().is_empty());

        let mut enc = transform(Direction::Encrypt, CipherMode::Ecb, Padding::None);
        assert_eq!(
            enc.transform_final_block(&[0u8; 33]),
            Err(CryptoError::InputNotAligned)
        );
    }

    #[test]
    fn test_streaming_decrypt_holds_back_last_block() {
        let pt: Vec<u8> = (0..100u8).collect();
        let ct = transform(Direction::Encrypt, CipherMode::Cbc, Padding::AnsiX923)
            .transform_final_block(&pt)
            .unwrap();
        assert_eq!(ct.len(), 128);

        let mut dec = transform(Direction::Decrypt, CipherMode::Cbc, Padding::AnsiX923);
        let mut out = dec.transform_block(&ct[..64]).unwrap();
        // One block is held back.
        assert_eq!(out.len(), 32);
        out.extend(dec.transform_block(&ct[64..96]).unwrap());
        assert_eq!(out.len(), 64);
        out.extend(dec.transform_final_block(&ct[96..]).unwrap());
        assert_eq!(out, pt);

        // The held block alone is enough for the final call.
        let mut dec = transform(Direction::Decrypt, CipherMode::Cbc, Padding::AnsiX923);
        let mut out = dec.transform_block(&ct).unwrap();
        out.extend(dec.transform_final_block(&[]).unwrap());
        assert_eq!(out, pt);
    }

    #[test]
    fn test_streaming_encrypt_matches_one_shot() {
        let pt: Vec<u8> = (0..200u8).collect();
        let one_shot = transform(Direction::Encrypt, CipherMode::Cfb, Padding::None)
            .transform_final_block(&pt)
            .unwrap();

        let mut enc = transform(Direction::Encrypt, CipherMode::Cfb, Padding::None);
        let mut out = enc.transform_block(&pt[..64]).unwrap();
        out.extend(enc.transform_block(&pt[64..192]).unwrap());
        out.extend(enc.transform_final_block(&pt[192..]).unwrap());
        assert_eq!(out, one_shot);
    }

    #[test]
    fn test_transform_is_reusable() {
        let mut enc = transform(Direction::Encrypt, CipherMode::Cbc, Padding::Pkcs7);
        let first = enc.transform_final_block(PLAINTEXT).unwrap();
        let second = enc.transform_final_block(PLAINTEXT).unwrap();
        assert_eq!(first, second);

        let mut dec = transform(Direction::Decrypt, CipherMode::Cbc, Padding::Pkcs7);
        assert_eq!(
            dec.transform_final_block(&first[..32]),
            Err(CryptoError::InvalidPadding)
        );
        // A failed final block still rewinds the transform.
        assert_eq!(dec.transform_final_block(&first).unwrap(), PLAINTEXT);
    }

    #[test]
    fn test_decrypt_rejects_tampered_padding() {
        let mut ct = transform(Direction::Encrypt, CipherMode::Ecb, Padding::Pkcs7)
            .transform_final_block(&[0x41; 10])
            .unwrap();
        // Decrypt with the wrong scheme: PKCS#7 bytes are not ANSI X9.23 zeros.
        let mut dec = transform(Direction::Decrypt, CipherMode::Ecb, Padding::AnsiX923);
        assert_eq!(
            dec.transform_final_block(&ct),
            Err(CryptoError::InvalidPadding)
        );

        ct.truncate(31);
        let mut dec = transform(Direction::Decrypt, CipherMode::Ecb, Padding::Pkcs7);
        assert_eq!(
            dec.transform_final_block(&ct),
            Err(CryptoError::InputNotAligned)
        );
        assert_eq!(dec.transform_final_block(&[]), Err(CryptoError::InvalidPadding));
    }

    #[test]
    fn test_tweak_changes_ciphertext() {
        let mut a = transform(Direction::Encrypt, CipherMode::Ecb, Padding::None);
        let mut b = transform(Direction::Encrypt, CipherMode::Ecb, Padding::None);
        b.set_tweak(&[1, 2]).unwrap();
        let block = [0u8; 32];
        assert_ne!(a.transform_block(&block).unwrap(), b.transform_block(&block).unwrap());
        assert_eq!(
            b.set_tweak(&[1]),
            Err(CryptoError::InvalidTweakLength {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_tweak_bytes_match_words() {
        let mut a = transform(Direction::Encrypt, CipherMode::Ecb, Padding::None);
        let mut b = transform(Direction::Encrypt, CipherMode::Ecb, Padding::None);
        a.set_tweak(&[0x0706050403020100, 0x0F0E0D0C0B0A0908]).unwrap();
        let bytes: Vec<u8> = (0u8..16).collect();
        b.set_tweak_bytes(&bytes).unwrap();
        let block = [0x5Au8; 32];
        assert_eq!(a.transform_block(&block).unwrap(), b.transform_block(&block).unwrap());
        assert_eq!(
            b.set_tweak_bytes(&bytes[..15]),
            Err(CryptoError::InvalidTweakLength {
                expected: 16,
                got: 15
            })
        );
    }

    #[test]
    fn test_invalid_construction() {
        let key = key256();
        assert_eq!(
            ModeTransform::new(&key, &[0u8; 16], Direction::Encrypt, CipherMode::Cbc, Padding::Pkcs7)
                .unwrap_err(),
            CryptoError::InvalidIvLength
        );
        assert_eq!(
            ModeTransform::new(&key, &[], Direction::Encrypt, CipherMode::Ofb, Padding::None)
                .unwrap_err(),
            CryptoError::InvalidIvLength
        );
        assert!(
            ModeTransform::new(&key, &[], Direction::Encrypt, CipherMode::Ecb, Padding::None).is_ok()
        );
        assert_eq!(
            ModeTransform::new(&[0u8; 24], &[], Direction::Encrypt, CipherMode::Ecb, Padding::None)
                .unwrap_err(),
            CryptoError::InvalidStateSize(192)
        );

        let mut enc = transform(Direction::Encrypt, CipherMode::Ecb, Padding::None);
        assert_eq!(enc.transform_block(&[0u8; 31]), Err(CryptoError::InputNotAligned));
    }
}
