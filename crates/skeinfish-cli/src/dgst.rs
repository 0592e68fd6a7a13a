//! Hash/digest command implementation.

use crate::hex;
use skeinfish_crypto::skein::Skein;
use std::fs;
use std::io::{self, Read};

pub fn run(state: usize, output_bits: usize, file: &str) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(file)?;

    let digest = hash_data(state, output_bits, &data)?;

    let name = format!("Skein-{state}-{output_bits}");
    let hex = hex::encode(&digest);
    if file == "-" {
        println!("{name}(stdin)= {hex}");
    } else {
        println!("{name}({file})= {hex}");
    }
    Ok(())
}

pub(crate) fn read_input(file: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if file == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read(file)?)
    }
}

fn hash_data(
    state: usize,
    output_bits: usize,
    data: &[u8],
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut ctx = Skein::new(state, output_bits)?;
    ctx.update(data)?;
    let digest = ctx.finalize()?.ok_or("skein produced no output")?;
    tracing::debug!(state, output_bits, len = data.len(), "hashed input");
    Ok(digest)
}
