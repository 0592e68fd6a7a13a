//! Skein-MAC command implementation.

use crate::dgst::read_input;
use crate::hex;
use skeinfish_crypto::skein::SkeinMac;
use skeinfish_types::{MacAlgId, StateSize};
use zeroize::Zeroize;

pub fn run(
    state: usize,
    output_bits: usize,
    key_hex: &str,
    file: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let alg = MacAlgId::from_state_size(StateSize::from_bits(state)?);
    let mut key = hex::decode(key_hex)?;
    let data = read_input(file)?;

    let result = compute_mac(alg, output_bits, &key, &data);
    key.zeroize();
    let tag = result?;

    let name = label(alg, output_bits);
    let hex = hex::encode(&tag);
    if file == "-" {
        println!("{name}(stdin)= {hex}");
    } else {
        println!("{name}({file})= {hex}");
    }
    Ok(())
}

fn label(alg: MacAlgId, output_bits: usize) -> String {
    format!("{}-{output_bits}", alg.name())
}

fn compute_mac(
    alg: MacAlgId,
    output_bits: usize,
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if key.is_empty() {
        tracing::warn!(alg = alg.name(), "empty MAC key; tag equals the plain hash");
    }
    Ok(SkeinMac::mac(alg.state_size().bits(), output_bits, key, data)?)
}
