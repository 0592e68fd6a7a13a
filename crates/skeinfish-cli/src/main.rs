use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod dgst;
mod enc;
mod hex;
mod mac;

/// skeinfish command-line tool for Skein and Threefish operations.
#[derive(Parser)]
#[command(name = "skeinfish")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Skein hash of a file.
    Dgst {
        /// Internal state size in bits (256, 512, 1024).
        #[arg(short, long, default_value_t = 512)]
        state: usize,
        /// Output size in bits (a positive multiple of 8).
        #[arg(short, long, default_value_t = 512)]
        output_bits: usize,
        /// Input file (use - for stdin).
        file: String,
    },
    /// Skein-MAC of a file.
    Mac {
        /// Internal state size in bits (256, 512, 1024).
        #[arg(short, long, default_value_t = 512)]
        state: usize,
        /// Tag size in bits.
        #[arg(short, long, default_value_t = 512)]
        output_bits: usize,
        /// Key as hex (may be empty).
        #[arg(short, long)]
        key: String,
        /// Input file (use - for stdin).
        file: String,
    },
    /// Threefish encryption/decryption.
    Enc {
        /// Mode of operation (ecb, cbc, ofb, cfb).
        #[arg(short, long, default_value = "cbc")]
        mode: String,
        /// Padding (none, zeros, pkcs7, ansix923, iso10126).
        #[arg(short, long, default_value = "pkcs7")]
        padding: String,
        /// Decrypt mode.
        #[arg(short, long)]
        decrypt: bool,
        /// Key as hex; its length selects Threefish-256/512/1024.
        #[arg(short, long, env = "SKEINFISH_KEY", hide_env_values = true)]
        key: Option<String>,
        /// State size in bits for a generated key.
        #[arg(short, long, default_value_t = 512)]
        state: usize,
        /// IV as hex. Without it a random IV is prepended to the output.
        #[arg(long)]
        iv: Option<String>,
        /// 16-byte tweak as hex.
        #[arg(long)]
        tweak: Option<String>,
        /// Input file.
        #[arg(short, long)]
        input: String,
        /// Output file.
        #[arg(short, long)]
        output: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SKEINFISH_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Dgst {
            state,
            output_bits,
            file,
        } => dgst::run(*state, *output_bits, file),
        Commands::Mac {
            state,
            output_bits,
            key,
            file,
        } => mac::run(*state, *output_bits, key, file),
        Commands::Enc {
            mode,
            padding,
            decrypt,
            key,
            state,
            iv,
            tweak,
            input,
            output,
        } => enc::run(&enc::EncArgs {
            mode,
            padding,
            decrypt: *decrypt,
            key: key.as_deref(),
            state: *state,
            iv: iv.as_deref(),
            tweak: tweak.as_deref(),
            input,
            output,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
