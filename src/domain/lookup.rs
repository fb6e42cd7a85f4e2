//! Clue to suspect lookup table.
//!
//! Fixed number of buckets, djb2 string hash, collisions resolved by chaining.
//! A key maps to at most one suspect; writing an existing key overwrites it.

use itertools::Itertools;
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Bucket count used when none is configured.
pub const DEFAULT_BUCKET_COUNT: usize = 101;

/// One stored clue -> suspect pair, linked to the next pair of its bucket.
#[derive(Debug)]
struct Association {
    clue: String,
    suspect: String,
    next: Option<Box<Association>>,
}

type Chain = Option<Box<Association>>;

/// djb2: `h = h * 33 + byte`, starting at 5381, unsigned wrapping arithmetic.
pub fn djb2(key: &str) -> u64 {
    key.bytes()
        .fold(5381u64, |h, b| h.wrapping_mul(33).wrapping_add(u64::from(b)))
}

#[derive(Debug)]
pub struct LookupTable {
    buckets: Vec<Chain>,
    len: usize,
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupTable {
    pub fn new() -> Self {
        Self {
            buckets: std::iter::repeat_with(|| None).take(DEFAULT_BUCKET_COUNT).collect(),
            len: 0,
        }
    }

    /// Creates a table with `bucket_count` chains.
    pub fn with_buckets(bucket_count: usize) -> DomainResult<Self> {
        if bucket_count == 0 {
            return Err(DomainError::ZeroCapacity);
        }
        Ok(Self {
            buckets: std::iter::repeat_with(|| None).take(bucket_count).collect(),
            len: 0,
        })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Bucket a key hashes to. Equal strings always land in the same bucket.
    pub fn bucket_index(&self, key: &str) -> usize {
        (djb2(key) % self.buckets.len() as u64) as usize
    }

    /// Associates `key` with `value`, replacing any previous value.
    ///
    /// An empty key is silently ignored. New keys are prepended to their chain.
    #[instrument(level = "trace", skip(self))]
    pub fn put(&mut self, key: &str, value: &str) {
        if key.is_empty() {
            return;
        }
        let idx = self.bucket_index(key);

        let mut cursor = self.buckets[idx].as_deref_mut();
        while let Some(entry) = cursor {
            if entry.clue == key {
                trace!(old = %entry.suspect, "overwriting association");
                entry.suspect = value.to_string();
                return;
            }
            cursor = entry.next.as_deref_mut();
        }

        let head = self.buckets[idx].take();
        self.buckets[idx] = Some(Box::new(Association {
            clue: key.to_string(),
            suspect: value.to_string(),
            next: head,
        }));
        self.len += 1;
    }

    /// Suspect associated with `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.chain(self.bucket_index(key))
            .find(|entry| entry.clue == key)
            .map(|entry| entry.suspect.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored associations.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the chain `key` hashes to, whether or not `key` is stored.
    pub fn chain_len(&self, key: &str) -> usize {
        self.chain(self.bucket_index(key)).count()
    }

    /// All `(clue, suspect)` pairs, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        (0..self.buckets.len())
            .flat_map(move |idx| self.chain(idx))
            .map(|entry| (entry.clue.as_str(), entry.suspect.as_str()))
    }

    /// Distinct suspect names, sorted.
    pub fn suspects(&self) -> Vec<&str> {
        self.iter().map(|(_, suspect)| suspect).sorted().dedup().collect()
    }

    /// Drops every association. Calling it on an empty table does nothing.
    #[instrument(level = "trace", skip(self))]
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            let mut cursor = bucket.take();
            while let Some(mut entry) = cursor {
                cursor = entry.next.take();
            }
        }
        self.len = 0;
    }

    fn chain(&self, idx: usize) -> ChainIter<'_> {
        ChainIter {
            cursor: self.buckets[idx].as_deref(),
        }
    }
}

impl Drop for LookupTable {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Extend<(K, V)> for LookupTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key.as_ref(), value.as_ref());
        }
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = LookupTable::new();
        table.extend(iter);
        table
    }
}

struct ChainIter<'a> {
    cursor: Option<&'a Association>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a Association;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor?;
        self.cursor = entry.next.as_deref();
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_djb2_known_values() {
        assert_eq!(djb2(""), 5381);
        assert_eq!(djb2("a"), 5381 * 33 + 97);
        assert_eq!(djb2("ab"), (5381 * 33 + 97) * 33 + 98);
    }

    #[test]
    fn test_put_then_get() {
        let mut table = LookupTable::new();
        table.put("Copo quebrado", "Sra. Pereira");
        assert_eq!(table.get("Copo quebrado"), Some("Sra. Pereira"));
        assert_eq!(table.get("copo quebrado"), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_chain_length() {
        let mut table = LookupTable::new();
        table.put("clue", "first");
        let before = table.chain_len("clue");
        table.put("clue", "second");
        assert_eq!(table.get("clue"), Some("second"));
        assert_eq!(table.chain_len("clue"), before);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_single_bucket_chains_everything() {
        let mut table = LookupTable::with_buckets(1).unwrap();
        table.extend([("a", "x"), ("b", "y"), ("c", "z")]);
        assert_eq!(table.chain_len("anything"), 3);
        assert_eq!(table.get("a"), Some("x"));
        assert_eq!(table.get("b"), Some("y"));
        assert_eq!(table.get("c"), Some("z"));
        // prepend: most recent insert heads the chain
        assert_eq!(table.iter().next(), Some(("c", "z")));
    }

    #[test]
    fn test_empty_key_ignored() {
        let mut table = LookupTable::new();
        table.put("", "nobody");
        assert!(table.is_empty());
        assert_eq!(table.get(""), None);
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert_eq!(LookupTable::with_buckets(0).unwrap_err(), DomainError::ZeroCapacity);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut table: LookupTable = [("a", "x"), ("b", "y")].into_iter().collect();
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.get("a"), None);
        table.clear();
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_suspects_are_distinct_and_sorted() {
        let table: LookupTable = [("a", "Sr. Silva"), ("b", "Dr. Costa"), ("c", "Sr. Silva")]
            .into_iter()
            .collect();
        assert_eq!(table.suspects(), vec!["Dr. Costa", "Sr. Silva"]);
    }
}
