// src/reader.rs
//! Splits an input source into blocks separated by blank lines.
//!
//! A line is blank when it holds nothing but whitespace. Lines of a block are
//! joined with their line breaks kept, `\r\n` normalised to `\n`, and the
//! block is trimmed at both ends.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;

/// Read `path` and split it into blocks.
///
/// A missing file is not an error: it is reported and yields zero blocks.
pub fn read_blocks(path: &Path) -> Result<Vec<String>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "input file not found, continuing with no blocks");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let blocks = split_blocks(&text);
    info!(path = %path.display(), blocks = blocks.len(), "read input");
    Ok(blocks)
}

/// Split in-memory text into blocks.
pub fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            flush(&mut current, &mut blocks);
        } else if let Some(body) = line.strip_suffix("\r\n") {
            current.push_str(body);
            current.push('\n');
        } else {
            current.push_str(line);
        }
    }
    flush(&mut current, &mut blocks);

    blocks
}

fn flush(current: &mut String, blocks: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        blocks.push(trimmed.to_owned());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_blocks() {
        assert_eq!(split_blocks("foo bar\n\nbaz baz\n"), vec!["foo bar", "baz baz"]);
    }

    #[test]
    fn runs_of_blank_lines_are_one_separator() {
        assert_eq!(split_blocks("a\n\n\n  \n\t\nb"), vec!["a", "b"]);
    }

    #[test]
    fn trailing_block_without_blank_line() {
        assert_eq!(split_blocks("one\n\ntwo"), vec!["one", "two"]);
    }

    #[test]
    fn only_blank_lines_give_nothing() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n\n   \n").is_empty());
    }

    #[test]
    fn multi_line_block_keeps_line_breaks() {
        assert_eq!(split_blocks("first line\nsecond line\n\nnext"), vec![
            "first line\nsecond line",
            "next"
        ]);
    }

    #[test]
    fn crlf_blank_lines_separate() {
        assert_eq!(split_blocks("a b\r\n\r\nc d\r\n"), vec!["a b", "c d"]);
    }

    #[test]
    fn crlf_inside_block_becomes_lf() {
        let blocks = split_blocks("a b\r\nc d\r\n\r\ne f");
        assert_eq!(blocks, vec!["a b\nc d", "e f"]);
        assert_eq!(crate::tokenize(&blocks[0]), vec!["a", "b\nc", "d"]);
    }

    #[test]
    fn missing_file_yields_no_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let blocks = read_blocks(&dir.path().join("absent.dat")).unwrap();
        assert!(blocks.is_empty());
    }
}
