// src/report.rs
//! Writes block records to the output artifact.
//!
//! Record layout:
//!   --- BLOCK <index> ---
//!   CODES:<json object, token -> bit string>
//!   PADDING:<filler bits in the last payload byte>
//!   BYTES:<packed byte count>
//!   PAYLOAD:<raw bytes | bit string>
//!   <blank line>
//!
//! Raw payload bytes may themselves contain `\n\n`, so records cannot be split
//! on blank lines; read `BYTES` bytes (or `8 * BYTES` bit characters) after
//! `PAYLOAD:` instead.
//!
//! A skipped block written under `EmptyBlockPolicy::Mark` is the header line,
//! an `EMPTY` line and the blank separator.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::PayloadFormat;
use crate::error::Result;
use crate::BlockRecord;

pub struct ReportWriter<W: Write> {
    out: BufWriter<W>,
    format: PayloadFormat,
    bytes_written: u64,
    records: usize,
}

impl ReportWriter<File> {
    /// Open `path` in truncate mode, discarding whatever was there before.
    pub fn create(path: &Path, format: PayloadFormat) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self::new(File::create(path)?, format))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W, format: PayloadFormat) -> Self {
        Self {
            out: BufWriter::new(inner),
            format,
            bytes_written: 0,
            records: 0,
        }
    }

    pub fn write_record(&mut self, record: &BlockRecord) -> Result<()> {
        let mut buf: Vec<u8> = Vec::new();
        writeln!(buf, "--- BLOCK {} ---", record.index)?;
        writeln!(buf, "CODES:{}", record.codes.to_json()?)?;
        writeln!(buf, "PADDING:{}", record.payload.padding)?;
        writeln!(buf, "BYTES:{}", record.payload.bytes.len())?;
        buf.extend_from_slice(b"PAYLOAD:");
        match self.format {
            PayloadFormat::Raw => buf.extend_from_slice(&record.payload.bytes),
            PayloadFormat::Bits => buf.extend_from_slice(record.payload.to_bit_string().as_bytes()),
        }
        buf.extend_from_slice(b"\n\n");
        self.emit(&buf)
    }

    pub fn write_empty(&mut self, index: usize) -> Result<()> {
        let text = format!("--- BLOCK {} ---\nEMPTY\n\n", index);
        self.emit(text.as_bytes())
    }

    /// Bytes handed to the writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.out.into_inner().map_err(|e| e.into_error().into())
    }

    fn emit(&mut self, buf: &[u8]) -> Result<()> {
        self.out.write_all(buf)?;
        self.bytes_written += buf.len() as u64;
        self.records += 1;
        Ok(())
    }
}
