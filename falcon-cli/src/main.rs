use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use falcon_prng::{
    get_logn, sign, verify, Cached, DomainSeparation, Entropy, KeccakPrng, KeccakPrngConfig,
    PrngKind, Recompute, XofPrng,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Sign, verify and inspect Falcon objects, or dump an engine's output stream
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a message with a secret key file
    Sign {
        /// Path to secret key binary file
        #[arg(short, long)]
        key: PathBuf,

        #[command(flatten)]
        message: MessageArgs,

        #[command(flatten)]
        entropy: EntropyArgs,

        /// Write the signature here instead of printing it as hex
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Verify a signature against a public key file
    Verify {
        /// Path to public key binary file
        #[arg(short, long)]
        key: PathBuf,

        #[command(flatten)]
        message: MessageArgs,

        /// Signature as hex
        #[arg(short, long, conflicts_with = "signature_file")]
        signature: Option<String>,

        /// Signature binary file
        #[arg(long)]
        signature_file: Option<PathBuf>,
    },
    /// Print the degree of an encoded key or signature file
    Logn {
        file: PathBuf,
    },
    /// Seed an engine, finalize it and print extracted bytes as hex
    Prng {
        /// Input to inject, once per occurrence (UTF-8)
        #[arg(short, long)]
        input: Vec<String>,

        /// Input to inject, once per occurrence (hex)
        #[arg(long)]
        hex_input: Vec<String>,

        /// Lengths of the successive reads
        #[arg(short, long, value_delimiter = ',', default_value = "32")]
        reads: Vec<usize>,

        /// Engine flavor: keccak256 or shake256
        #[arg(short, long, default_value_t = PrngKind::default())]
        prng: PrngKind,

        /// Rehash partial blocks instead of caching them (keccak256 only)
        #[arg(long)]
        recompute: bool,

        /// Digest the input without the 0x1F suffix byte (keccak256 only)
        #[arg(long)]
        no_suffix: bool,
    },
}

#[derive(Args, Debug)]
struct MessageArgs {
    /// Message to sign or verify
    #[arg(short, long, conflicts_with = "message_file", required_unless_present = "message_file")]
    message: Option<String>,

    /// Read the message from a file
    #[arg(long)]
    message_file: Option<PathBuf>,
}

impl MessageArgs {
    fn load(&self) -> Result<Vec<u8>> {
        match (&self.message, &self.message_file) {
            (Some(message), _) => Ok(message.as_bytes().to_vec()),
            (None, Some(path)) => read_file(path),
            (None, None) => bail!("No message given. Use --message or --message-file"),
        }
    }
}

#[derive(Args, Debug)]
struct EntropyArgs {
    /// Hex seed for a reproducible signature (default: system entropy)
    #[arg(long)]
    seed: Option<String>,

    /// Engine flavor: keccak256 or shake256
    #[arg(short, long, default_value_t = PrngKind::default())]
    prng: PrngKind,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Sign {
            key,
            message,
            entropy,
            output,
        } => run_sign(&key, &message, &entropy, output.as_deref()),
        Command::Verify {
            key,
            message,
            signature,
            signature_file,
        } => run_verify(&key, &message, signature, signature_file.as_deref()),
        Command::Logn { file } => run_logn(&file),
        Command::Prng {
            input,
            hex_input,
            reads,
            prng,
            recompute,
            no_suffix,
        } => run_prng(&input, &hex_input, &reads, prng, recompute, no_suffix),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn run_sign(
    key: &Path,
    message: &MessageArgs,
    entropy: &EntropyArgs,
    output: Option<&Path>,
) -> Result<()> {
    let private_key = read_file(key)?;
    let message = message.load()?;
    let seed = entropy
        .seed
        .as_deref()
        .map(hex::decode)
        .transpose()
        .context("Seed is not valid hex")?;
    let source = match &seed {
        Some(seed) => Entropy::from_seed(seed),
        None => Entropy::system(),
    }
    .with_kind(entropy.prng);

    let signature = sign(&message, &private_key, &source).context("Signing failed")?;
    debug!(signature_len = signature.len(), "message signed");

    match output {
        Some(path) => {
            fs::write(path, &signature)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Saved {} ({} bytes)", path.display(), signature.len());
        }
        None => println!("{}", hex::encode(&signature)),
    }
    Ok(())
}

fn run_verify(
    key: &Path,
    message: &MessageArgs,
    signature: Option<String>,
    signature_file: Option<&Path>,
) -> Result<()> {
    let public_key = read_file(key)?;
    let message = message.load()?;
    let signature = match (signature, signature_file) {
        (Some(hex_sig), _) => hex::decode(hex_sig.trim()).context("Signature is not valid hex")?,
        (None, Some(path)) => read_file(path)?,
        (None, None) => bail!("No signature given. Use --signature or --signature-file"),
    };

    verify(&signature, &message, &public_key).context("Signature verification failed")?;
    println!("✅ Signature is valid");
    Ok(())
}

fn run_logn(file: &Path) -> Result<()> {
    let encoded = read_file(file)?;
    let logn = get_logn(&encoded)
        .with_context(|| format!("{} is not a Falcon object", file.display()))?;
    println!("logn = {} (degree {})", logn, 1usize << logn);
    Ok(())
}

fn run_prng(
    inputs: &[String],
    hex_inputs: &[String],
    reads: &[usize],
    kind: PrngKind,
    recompute: bool,
    no_suffix: bool,
) -> Result<()> {
    let keccak_config = KeccakPrngConfig {
        domain_separation: if no_suffix {
            DomainSeparation::None
        } else {
            DomainSeparation::default()
        },
        ..KeccakPrngConfig::default()
    };
    let mut prng: Box<dyn XofPrng> = match kind {
        PrngKind::Keccak256 if recompute => {
            Box::new(KeccakPrng::<Recompute>::with_config(keccak_config))
        }
        PrngKind::Keccak256 => Box::new(KeccakPrng::<Cached>::with_config(keccak_config)),
        PrngKind::Shake256 if recompute || no_suffix => {
            bail!("--recompute and --no-suffix only apply to the keccak256 engine")
        }
        PrngKind::Shake256 => Box::new(kind.engine()),
    };

    for input in inputs {
        prng.inject(input.as_bytes())
            .with_context(|| format!("Failed to inject {:?}", input))?;
    }
    for input in hex_inputs {
        let bytes = hex::decode(input).with_context(|| format!("{:?} is not valid hex", input))?;
        prng.inject(&bytes).context("Failed to inject hex input")?;
    }
    prng.finalize().context("Failed to finalize engine")?;

    for &len in reads {
        let out = prng.extract_vec(len).context("Failed to extract")?;
        println!("{}", hex::encode(out));
    }
    Ok(())
}
