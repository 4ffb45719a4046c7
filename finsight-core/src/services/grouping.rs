//! Insertion-ordered grouping used by the breakdowns
//!
//! Breakdowns list their keys in the order the keys first appear in the
//! input, so a plain `HashMap` is not enough.

use std::collections::HashMap;
use std::hash::Hash;

use rust_decimal::Decimal;

use crate::domain::money;

/// Map that remembers the order in which keys were first inserted
#[derive(Debug, Clone)]
pub(crate) struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, V> OrderedGroups<K, V>
where
    K: Eq + Hash + Clone,
    V: Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulator for `key`, created on first sight
    pub fn entry(&mut self, key: K) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push((key, V::default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K> OrderedGroups<K, Decimal>
where
    K: Eq + Hash + Clone,
{
    pub fn add(&mut self, key: K, amount: Decimal) {
        money::add_into(self.entry(key), amount);
    }
}
