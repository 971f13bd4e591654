// src/lib.rs
//! wordhuff: word-level Huffman block compressor.
//!
//! Each blank-line separated block of the input is compressed on its own:
//!
//!   tokenize -> count -> build tree -> derive codes -> pack bits
//!
//! and written to the report as one self-describing record (see [`report`]).
//! Nothing is shared between blocks.
pub mod codes;
pub mod config;
pub mod error;
pub mod frequency;
pub mod packer;
pub mod reader;
pub mod report;
pub mod tokenizer;
pub mod tree;

#[cfg(test)]
mod bitreader;

use rayon::prelude::*;
use tracing::{debug, error, info, warn};

pub use codes::{generate_codes, Code, CodeTable};
pub use config::{Config, EmptyBlockPolicy, PayloadFormat};
pub use error::{Error, Result};
pub use frequency::{count_tokens, FrequencyTable};
pub use packer::{pack, PackedPayload};
pub use tokenizer::tokenize;
pub use tree::{build_tree, HuffNode};

use report::ReportWriter;

/// One encoded block, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    /// 1-based position of the block in the source.
    pub index: usize,
    pub codes: CodeTable,
    pub payload: PackedPayload,
    pub token_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Encoded(BlockRecord),
    /// The block had no tokens and was not encoded.
    Empty { index: usize },
}

impl BlockOutcome {
    pub fn index(&self) -> usize {
        match self {
            BlockOutcome::Encoded(record) => record.index,
            BlockOutcome::Empty { index } => *index,
        }
    }
}

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub blocks_found: usize,
    pub blocks_encoded: usize,
    pub blocks_skipped: usize,
    pub tokens: usize,
    /// Bytes of block text fed to the encoder.
    pub input_bytes: usize,
    pub payload_bytes: usize,
    pub output_bytes: u64,
}

/// Run the whole pipeline on one block.
///
/// Returns `Ok(None)` for a block without tokens; the tree builder is never
/// reached in that case.
pub fn encode_block(index: usize, text: &str) -> Result<Option<BlockRecord>> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return Ok(None);
    }

    let freq = count_tokens(tokens.iter().copied());
    let tree = build_tree(&freq)?;
    let codes = generate_codes(&tree)?;
    let payload = pack(tokens.iter().copied(), &codes)?;

    debug!(
        block = index,
        tokens = tokens.len(),
        distinct = freq.len(),
        max_code_len = codes.max_code_len(),
        bits = payload.bit_len,
        padding = payload.padding,
        "encoded block"
    );

    Ok(Some(BlockRecord {
        index,
        codes,
        payload,
        token_count: tokens.len(),
    }))
}

fn encode_outcome(index: usize, text: &str) -> Result<BlockOutcome> {
    info!(block = index, "processing block");
    match encode_block(index, text) {
        Ok(Some(record)) => Ok(BlockOutcome::Encoded(record)),
        Ok(None) => Ok(BlockOutcome::Empty { index }),
        Err(e) => {
            error!(block = index, error = %e, "block encoding failed");
            Err(e)
        }
    }
}

/// Encode every block, numbering them from 1. Results are in block order
/// whether or not the work ran in parallel.
pub fn compress(blocks: &[String], parallel: bool) -> Result<Vec<BlockOutcome>> {
    if parallel {
        blocks
            .par_iter()
            .enumerate()
            .map(|(i, text)| encode_outcome(i + 1, text))
            .collect()
    } else {
        blocks
            .iter()
            .enumerate()
            .map(|(i, text)| encode_outcome(i + 1, text))
            .collect()
    }
}

/// Write outcomes to the report in the order the iterator yields them.
/// Stops at the first error; records written before it stay in the writer.
fn write_outcomes<W, I>(
    outcomes: I,
    writer: &mut ReportWriter<W>,
    empty_blocks: EmptyBlockPolicy,
    summary: &mut RunSummary,
) -> Result<()>
where
    W: std::io::Write,
    I: IntoIterator<Item = Result<BlockOutcome>>,
{
    for outcome in outcomes {
        match outcome? {
            BlockOutcome::Encoded(record) => {
                writer.write_record(&record)?;
                summary.blocks_encoded += 1;
                summary.tokens += record.token_count;
                summary.payload_bytes += record.payload.bytes.len();
                info!(
                    block = record.index,
                    bytes = record.payload.bytes.len(),
                    padding = record.payload.padding,
                    "block compressed and saved"
                );
            }
            BlockOutcome::Empty { index } => {
                warn!(block = index, "block has no tokens, skipping");
                if empty_blocks == EmptyBlockPolicy::Mark {
                    writer.write_empty(index)?;
                }
                summary.blocks_skipped += 1;
            }
        }
    }
    Ok(())
}

/// Read the input, encode each block and write the report.
///
/// The output file is truncated before anything is written. A missing input
/// file produces an empty report and a zero-block summary.
pub fn run(config: &Config) -> Result<RunSummary> {
    info!("starting compression");
    let blocks = reader::read_blocks(&config.input)?;
    let mut writer = ReportWriter::create(&config.output, config.payload_format)?;

    info!(blocks = blocks.len(), "found text blocks to compress");

    let mut summary = RunSummary {
        blocks_found: blocks.len(),
        input_bytes: blocks.iter().map(String::len).sum(),
        ..RunSummary::default()
    };

    if config.parallel {
        let outcomes = compress(&blocks, true)?;
        write_outcomes(outcomes.into_iter().map(Ok), &mut writer, config.empty_blocks, &mut summary)?;
    } else {
        // Lazy: each block is encoded, written and dropped before the next one.
        let outcomes = blocks
            .iter()
            .enumerate()
            .map(|(i, text)| encode_outcome(i + 1, text));
        write_outcomes(outcomes, &mut writer, config.empty_blocks, &mut summary)?;
    }

    summary.output_bytes = writer.bytes_written();
    writer.finish()?;

    info!(
        found = summary.blocks_found,
        encoded = summary.blocks_encoded,
        skipped = summary.blocks_skipped,
        input_bytes = summary.input_bytes,
        output_bytes = summary.output_bytes,
        "compression finished"
    );
    Ok(summary)
}
