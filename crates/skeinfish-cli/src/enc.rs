//! Symmetric encryption/decryption command.
//!
//! Threefish-256/512/1024 (selected by key length) in ECB, CBC, OFB or CFB
//! mode. When no IV is given on the command line, encryption generates a
//! random one and writes it in front of the ciphertext, and decryption reads
//! it back from there.

use crate::hex;
use skeinfish_crypto::modes::{CipherMode, Direction, ModeTransform, Padding};
use skeinfish_types::{CipherAlgId, StateSize};
use std::fs;
use zeroize::Zeroize;

pub struct EncArgs<'a> {
    pub mode: &'a str,
    pub padding: &'a str,
    pub decrypt: bool,
    pub key: Option<&'a str>,
    pub state: usize,
    pub iv: Option<&'a str>,
    pub tweak: Option<&'a str>,
    pub input: &'a str,
    pub output: &'a str,
}

struct CipherParams {
    mode: CipherMode,
    padding: Padding,
    tweak: Option<Vec<u8>>,
}

pub fn run(args: &EncArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let mode: CipherMode = args.mode.parse().map_err(|_| {
        format!("mode '{}' not supported. Supported: ecb, cbc, ofb, cfb", args.mode)
    })?;
    let padding: Padding = args.padding.parse().map_err(|_| {
        format!(
            "padding '{}' not supported. Supported: none, zeros, pkcs7, ansix923, iso10126",
            args.padding
        )
    })?;
    let params = CipherParams {
        mode,
        padding,
        tweak: args.tweak.map(hex::decode).transpose()?,
    };
    let iv = args.iv.map(hex::decode).transpose()?;

    let op = if args.decrypt { "Decrypting" } else { "Encrypting" };
    eprintln!(
        "{op} {} -> {} with threefish-{}/{}",
        args.input, args.output, params.mode, params.padding
    );

    let data = fs::read(args.input)?;

    let (mut key, generated) = match args.key {
        Some(k) => (hex::decode(k)?, false),
        None if args.decrypt => {
            return Err("set SKEINFISH_KEY environment variable or pass --key".into());
        }
        None => {
            let mut key = vec![0u8; StateSize::from_bits(args.state)?.bytes()];
            getrandom::getrandom(&mut key).map_err(|e| format!("random failed: {e}"))?;
            (key, true)
        }
    };

    let result = if args.decrypt {
        decrypt_data(&key, iv.as_deref(), &params, &data)
    } else {
        encrypt_data(&key, iv.as_deref(), &params, &data)
    };
    if generated {
        eprintln!("Key (save this): {}", hex::encode(&key));
    }
    key.zeroize();

    let out = result?;
    fs::write(args.output, &out)?;
    if args.decrypt {
        eprintln!("Decrypted {} bytes", out.len());
    }
    Ok(())
}

fn new_transform(
    key: &[u8],
    iv: &[u8],
    direction: Direction,
    params: &CipherParams,
) -> Result<ModeTransform, Box<dyn std::error::Error>> {
    let alg = CipherAlgId::from_key_len(key.len())?;
    tracing::debug!(cipher = alg.name(), ?direction, "building transform");
    let mut transform = ModeTransform::new(key, iv, direction, params.mode, params.padding)?;
    if let Some(tweak) = &params.tweak {
        transform.set_tweak_bytes(tweak)?;
    }
    Ok(transform)
}

fn encrypt_data(
    key: &[u8],
    iv: Option<&[u8]>,
    params: &CipherParams,
    plaintext: &[u8],
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let block = CipherAlgId::from_key_len(key.len())?.state_size().bytes();

    // Output format: [iv ||] ciphertext
    let mut out = Vec::new();
    let iv = match iv {
        Some(iv) => iv.to_vec(),
        None if params.mode.needs_iv() => {
            let mut iv = vec![0u8; block];
            getrandom::getrandom(&mut iv).map_err(|e| format!("random failed: {e}"))?;
            out.extend_from_slice(&iv);
            iv
        }
        None => Vec::new(),
    };

    let mut transform = new_transform(key, &iv, Direction::Encrypt, params)?;
    out.extend_from_slice(&transform.transform_final_block(plaintext)?);
    Ok(out)
}

fn decrypt_data(
    key: &[u8],
    iv: Option<&[u8]>,
    params: &CipherParams,
    data: &[u8],
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let block = CipherAlgId::from_key_len(key.len())?.state_size().bytes();

    let (iv, ciphertext) = match iv {
        Some(iv) => (iv, data),
        None if params.mode.needs_iv() => {
            if data.len() < block {
                return Err(
                    format!("ciphertext too short (need at least a {block}-byte IV)").into(),
                );
            }
            data.split_at(block)
        }
        None => (&[][..], data),
    };

    let mut transform = new_transform(key, iv, Direction::Decrypt, params)?;
    Ok(transform.transform_final_block(ciphertext)?)
}
