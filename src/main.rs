//! wordhuff CLI
//! Usage:
//!   wordhuff [--input <file>] [--output <file>] [--payload raw|bits]
//!            [--empty-blocks skip|mark] [--parallel] [--log-level <level>]

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use wordhuff::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use wordhuff::{Config, EmptyBlockPolicy, PayloadFormat};

#[derive(Parser, Debug)]
#[command(name = "wordhuff")]
#[command(version)]
#[command(about = "Word-level Huffman block compressor", long_about = None)]
struct Args {
    /// Text source; blocks are separated by blank lines
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Report file, truncated on every run
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// How the packed payload is written
    #[arg(long, value_enum, default_value_t = PayloadFormat::Raw)]
    payload: PayloadFormat,

    /// What to write for blocks without tokens
    #[arg(long, value_enum, default_value_t = EmptyBlockPolicy::Skip)]
    empty_blocks: EmptyBlockPolicy,

    /// Encode blocks in parallel
    #[arg(long)]
    parallel: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config::new(args.input, args.output)
            .with_payload_format(args.payload)
            .with_empty_blocks(args.empty_blocks)
            .with_parallel(args.parallel)
    }
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wordhuff={}", args.log_level)));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let config = Config::from(args);
    match wordhuff::run(&config) {
        Ok(summary) => {
            println!(
                "Done. {} blocks ({} skipped) → {} bytes",
                summary.blocks_encoded, summary.blocks_skipped, summary.output_bytes
            );
        }
        Err(e) => {
            error!(error = %e, structural = e.is_structural(), "compression aborted");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
