// src/tree.rs
//! Huffman tree construction over word tokens.
//!
//! Queue entries are ordered by (weight, seq), smallest first. `seq` comes
//! from one counter per build: leaves take 0..n in frequency-table order,
//! every merged node takes the next value. Token text is never compared.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        token: String,
        weight: u64,
        seq: u64,
    },
    Internal {
        left: Box<HuffNode>,
        right: Box<HuffNode>,
        weight: u64,
        seq: u64,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } | HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Creation-order tie-break number.
    pub fn seq(&self) -> u64 {
        match self {
            HuffNode::Leaf { seq, .. } | HuffNode::Internal { seq, .. } => *seq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Longest root-to-leaf edge count. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// `a` was extracted first and becomes the left child.
    fn merge(a: Self, b: Self, seq: u64) -> Self {
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            left: Box::new(a),
            right: Box::new(b),
            weight,
            seq,
        }
    }
}

type QueueKey = (Reverse<u64>, Reverse<u64>, usize);

fn push_node(heap: &mut BinaryHeap<QueueKey>, slots: &mut Vec<Option<HuffNode>>, node: HuffNode) {
    heap.push((Reverse(node.weight()), Reverse(node.seq()), slots.len()));
    slots.push(Some(node));
}

fn pop_node(heap: &mut BinaryHeap<QueueKey>, slots: &mut [Option<HuffNode>]) -> Result<HuffNode> {
    heap.pop()
        .and_then(|(_, _, id)| slots.get_mut(id).and_then(Option::take))
        .ok_or_else(|| Error::invariant("priority queue ran dry during merge"))
}

/// Build the Huffman tree for one block.
///
/// A table with a single entry short-circuits to a lone `Leaf` root; an
/// empty table is rejected before any queue work happens.
pub fn build_tree(freq: &FrequencyTable) -> Result<HuffNode> {
    if freq.is_empty() {
        return Err(Error::EmptyFrequencyTable);
    }

    let mut counter: u64 = 0;
    let mut leaves: Vec<HuffNode> = Vec::with_capacity(freq.len());
    for (token, weight) in freq.iter() {
        leaves.push(HuffNode::Leaf {
            token: token.to_owned(),
            weight,
            seq: counter,
        });
        counter += 1;
    }

    if leaves.len() == 1 {
        return leaves
            .pop()
            .ok_or_else(|| Error::invariant("single-entry table produced no leaf"));
    }

    // Nodes live in `slots`; the heap only carries (weight, seq, slot) keys.
    let mut slots: Vec<Option<HuffNode>> = Vec::with_capacity(2 * leaves.len());
    let mut heap: BinaryHeap<QueueKey> = BinaryHeap::with_capacity(leaves.len());
    for leaf in leaves {
        push_node(&mut heap, &mut slots, leaf);
    }

    while heap.len() > 1 {
        let a = pop_node(&mut heap, &mut slots)?;
        let b = pop_node(&mut heap, &mut slots)?;
        push_node(&mut heap, &mut slots, HuffNode::merge(a, b, counter));
        counter += 1;
    }

    let root = pop_node(&mut heap, &mut slots)?;
    if root.weight() != freq.total() {
        return Err(Error::invariant(format!(
            "root weight {} != token total {}",
            root.weight(),
            freq.total()
        )));
    }

    debug!(
        leaves = root.leaf_count(),
        depth = root.depth(),
        weight = root.weight(),
        "built huffman tree"
    );
    Ok(root)
}
