// src/config.rs
//! Run configuration.

use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "data/input.dat";
pub const DEFAULT_OUTPUT: &str = "data/output.dat";

/// How the packed payload is written into the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PayloadFormat {
    /// Packed bytes, verbatim. Needs the padding count to recover the bit length.
    #[default]
    Raw,
    /// Padded bit string as `0`/`1` text.
    Bits,
}

/// What to do with a block that has no tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EmptyBlockPolicy {
    /// Write nothing for the block.
    #[default]
    Skip,
    /// Write the block header followed by an `EMPTY` line.
    Mark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub payload_format: PayloadFormat,
    pub empty_blocks: EmptyBlockPolicy,
    /// Encode blocks on the rayon pool. Output order is unchanged.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            payload_format: PayloadFormat::default(),
            empty_blocks: EmptyBlockPolicy::default(),
            parallel: false,
        }
    }
}

impl Config {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    pub fn with_payload_format(mut self, format: PayloadFormat) -> Self {
        self.payload_format = format;
        self
    }

    pub fn with_empty_blocks(mut self, policy: EmptyBlockPolicy) -> Self {
        self.empty_blocks = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
