// src/frequency.rs
//! Token occurrence counting.
//!
//! Entries are kept in first-occurrence order. The tree builder seeds its
//! queue in this order, so equal-weight ties resolve the same way on every run.

use indexmap::IndexMap;

/// Distinct token -> occurrence count, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens in the block.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn get(&self, token: &str) -> Option<u64> {
        self.counts.get(token).copied()
    }

    /// Iterate `(token, count)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }

    fn record(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_owned(), 1);
            }
        }
    }
}

/// Count exact occurrences of each token.
pub fn count_tokens<'a, I>(tokens: I) -> FrequencyTable
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = FrequencyTable::new();
    for token in tokens {
        table.record(token);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_exact_occurrences() {
        let freq = count_tokens(["aa", "bb", "aa"]);
        assert_eq!(freq.len(), 2);
        assert_eq!(freq.get("aa"), Some(2));
        assert_eq!(freq.get("bb"), Some(1));
        assert_eq!(freq.get("cc"), None);
        assert_eq!(freq.total(), 3);
    }

    #[test]
    fn keeps_first_occurrence_order() {
        let freq = count_tokens(["z", "a", "z", "m", "a"]);
        let order: Vec<&str> = freq.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["z", "a", "m"]);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let freq = count_tokens(std::iter::empty());
        assert!(freq.is_empty());
        assert_eq!(freq.total(), 0);
    }
}
