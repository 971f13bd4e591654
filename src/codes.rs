// src/codes.rs
//! Code table derivation: each leaf's root-to-leaf path, left = 0, right = 1.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::tree::HuffNode;

/// A variable-length bit string, first bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn starts_with(&self, other: &Code) -> bool {
        self.bits.starts_with(&other.bits)
    }

    /// The one-bit code `0` given to a lone leaf.
    fn single_zero() -> Self {
        Code { bits: vec![false] }
    }

    /// Copy of `self` with one more bit on the end.
    fn extended(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Token -> code, in left-first traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: IndexMap<String, Code>,
}

impl CodeTable {
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<&Code> {
        self.codes.get(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Code)> {
        self.codes.iter().map(|(t, c)| (t.as_str(), c))
    }

    /// Longest code in the table, 0 when empty.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// True when no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort_by(|a, b| a.bits.cmp(&b.bits));
        // In lexicographic order a prefix always sorts right before some
        // code it prefixes, so adjacent pairs are enough.
        sorted.windows(2).all(|w| !w[1].starts_with(w[0]))
    }

    /// Render as a single-line JSON object `{"token":"0101",...}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn insert(&mut self, token: &str, code: Code) -> Result<()> {
        if self.codes.insert(token.to_owned(), code).is_some() {
            return Err(Error::invariant(format!(
                "token {:?} appears on more than one leaf",
                token
            )));
        }
        Ok(())
    }
}

impl Serialize for CodeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.codes.len()))?;
        for (token, code) in &self.codes {
            map.serialize_entry(token, &code.to_string())?;
        }
        map.end()
    }
}

/// Walk the tree depth-first, left before right, and collect every leaf's path.
///
/// A lone leaf root has an empty path, so it is given the fixed code `0`.
pub fn generate_codes(root: &HuffNode) -> Result<CodeTable> {
    let mut table = CodeTable::default();

    if let HuffNode::Leaf { token, .. } = root {
        table.insert(token, Code::single_zero())?;
        return Ok(table);
    }

    let mut stack: Vec<(&HuffNode, Code)> = vec![(root, Code::new())];
    while let Some((node, path)) = stack.pop() {
        match node {
            HuffNode::Leaf { token, .. } => {
                if path.is_empty() {
                    return Err(Error::invariant(format!(
                        "leaf {:?} below the root has an empty path",
                        token
                    )));
                }
                table.insert(token, path)?;
            }
            HuffNode::Internal { left, right, .. } => {
                // Right is pushed first so left is visited first.
                stack.push((&**right, path.extended(true)));
                stack.push((&**left, path.extended(false)));
            }
        }
    }

    debug_assert!(table.is_prefix_free());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::count_tokens;
    use crate::tree::build_tree;

    fn codes_for(text: &str) -> CodeTable {
        let freq = count_tokens(text.split(' ').filter(|t| !t.is_empty()));
        generate_codes(&build_tree(&freq).unwrap()).unwrap()
    }

    fn parse(text: &str) -> Code {
        Code {
            bits: text
                .chars()
                .map(|c| match c {
                    '0' => false,
                    '1' => true,
                    other => panic!("not a bit: {:?}", other),
                })
                .collect(),
        }
    }

    fn code_str(table: &CodeTable, token: &str) -> String {
        table.get(token).unwrap().to_string()
    }

    #[test]
    fn lone_leaf_gets_zero() {
        let table = codes_for("hi hi hi");
        assert_eq!(table.len(), 1);
        assert_eq!(code_str(&table, "hi"), "0");
        assert_eq!(table.get("hi").unwrap().bits(), &[false]);
    }

    #[test]
    fn two_tokens_get_one_bit_each() {
        let table = codes_for("aa bb aa");
        assert_eq!(code_str(&table, "bb"), "0");
        assert_eq!(code_str(&table, "aa"), "1");
        assert!(table.is_prefix_free());
    }

    #[test]
    fn skewed_weights_give_short_code_to_common_token() {
        let table = codes_for("a a a a a b c");
        assert_eq!(code_str(&table, "a"), "1");
        assert_eq!(code_str(&table, "b"), "00");
        assert_eq!(code_str(&table, "c"), "01");
    }

    #[test]
    fn traversal_order_is_left_first() {
        let table = codes_for("a b c d");
        let order: Vec<(&str, String)> = table.iter().map(|(t, c)| (t, c.to_string())).collect();
        assert_eq!(
            order,
            vec![
                ("a", "00".to_string()),
                ("b", "01".to_string()),
                ("c", "10".to_string()),
                ("d", "11".to_string()),
            ]
        );
        assert_eq!(table.max_code_len(), 2);
    }

    #[test]
    fn duplicate_leaf_is_invariant_violation() {
        let leaf = |seq| HuffNode::Leaf {
            token: "dup".into(),
            weight: 1,
            seq,
        };
        let root = HuffNode::Internal {
            left: Box::new(leaf(0)),
            right: Box::new(leaf(1)),
            weight: 2,
            seq: 2,
        };
        let err = generate_codes(&root).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn prefix_check_detects_prefix() {
        let mut table = CodeTable::default();
        table.insert("a", parse("0")).unwrap();
        table.insert("b", parse("01")).unwrap();
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn json_keeps_traversal_order_and_case() {
        let table = codes_for("Foo foo foo");
        assert_eq!(table.to_json().unwrap(), r#"{"Foo":"0","foo":"1"}"#);
    }
}
