//! Falcon Key Generation Tool
//!
//! Generates a Falcon key pair from system entropy (or a fixed hex seed for
//! reproducible test keys) and writes it as `secret_key.bin` and
//! `public_key.bin`. With `--rust-arrays` the keys are also printed as Rust
//! byte arrays.
//!
//! Usage:
//!   cargo run --release -p falcon-keygen -- --logn 9 --out-dir keys

use anyhow::{Context, Result};
use clap::Parser;
use falcon_prng::{keygen, Entropy, PrngKind};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Degree parameter: 9 for Falcon-512, 10 for Falcon-1024 (2..=8 for test keys)
    #[arg(short, long, default_value = "9")]
    logn: u32,

    /// Hex seed for reproducible keys (default: system entropy)
    #[arg(short, long)]
    seed: Option<String>,

    /// Engine flavor: keccak256 or shake256
    #[arg(short, long, default_value_t = PrngKind::default())]
    prng: PrngKind,

    /// Directory for secret_key.bin and public_key.bin
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Also print the keys as Rust byte arrays
    #[arg(long)]
    rust_arrays: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    println!("=== Falcon Key Generation Tool ===\n");

    let seed = args
        .seed
        .as_deref()
        .map(hex::decode)
        .transpose()
        .context("Seed is not valid hex")?;
    let entropy = match &seed {
        Some(seed) => {
            println!("Using fixed seed ({} bytes), keys are reproducible", seed.len());
            Entropy::from_seed(seed)
        }
        None => Entropy::system(),
    }
    .with_kind(args.prng);

    println!("Generating key pair (logn = {}, {})...", args.logn, args.prng);
    let keys = keygen(args.logn, &entropy)
        .with_context(|| format!("Key generation failed for logn = {}", args.logn))?;
    info!(logn = args.logn, prng = %args.prng, "key pair generated");

    println!("Falcon-{} key generation complete!\n", 1usize << args.logn);
    println!("Secret key size: {} bytes", keys.private_key.len());
    println!("Public key size: {} bytes", keys.public_key.len());

    if args.rust_arrays {
        println!();
        print_rust_array("SK_BYTES", &keys.private_key);
        print_rust_array("PK_BYTES", &keys.public_key);
    }

    println!("\n=== Saving Binary Files ===");
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let sk_path = args.out_dir.join("secret_key.bin");
    fs::write(&sk_path, &keys.private_key)
        .with_context(|| format!("Failed to write {}", sk_path.display()))?;
    println!("✓ Saved {} ({} bytes)", sk_path.display(), keys.private_key.len());

    let pk_path = args.out_dir.join("public_key.bin");
    fs::write(&pk_path, &keys.public_key)
        .with_context(|| format!("Failed to write {}", pk_path.display()))?;
    println!("✓ Saved {} ({} bytes)", pk_path.display(), keys.public_key.len());

    println!("\nKeep secret_key.bin secret! Do not commit it to public repositories.");
    Ok(())
}

fn print_rust_array(name: &str, bytes: &[u8]) {
    print!("const {}: [u8; {}] = [", name, bytes.len());
    for (i, b) in bytes.iter().enumerate() {
        if i % 16 == 0 {
            println!();
            print!("    ");
        }
        print!("0x{:02X}", b);
        if i < bytes.len() - 1 {
            print!(", ");
        }
    }
    println!("\n];\n");
}
