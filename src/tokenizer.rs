// src/tokenizer.rs
//! Splits a block into word tokens.
//! Only the space character separates tokens; newlines stay inside tokens.

/// The one and only token separator.
pub const TOKEN_DELIMITER: char = ' ';

/// Split `block` on [`TOKEN_DELIMITER`], dropping the empty pieces that
/// consecutive, leading or trailing delimiters produce.
pub fn tokenize(block: &str) -> Vec<&str> {
    block
        .split(TOKEN_DELIMITER)
        .filter(|t| !t.is_empty())
        .collect()
}
