//! ChainedHashMap: the fixed bucket array, its entry chains, and the keyed
//! operations that splice them.

use core::mem;

use slotmap::{DefaultKey, SlotMap};

use crate::bucket_hash::{BucketHash, Modulo};

/// One stored key/value pair, linked into its bucket's chain by arena key.
#[derive(Debug)]
struct Entry<V> {
    key: u64,
    value: V,
    /// Next entry in the same bucket; `None` marks the chain tail.
    next: Option<DefaultKey>,
}

/// A hash map with a bucket count fixed at construction, `u64` keys, and
/// separate chaining for collisions.
///
/// Each bucket holds the head of a singly linked chain of entries; the
/// entries themselves live in a slot map arena and refer to each other by
/// arena key. New keys are inserted at the head of their chain, so a chain
/// reads most-recent-first.
///
/// Routing is delegated to the [`BucketHash`] supplied at construction;
/// [`ChainedHashMap::new`] wires in [`Modulo`] over the bucket count.
pub struct ChainedHashMap<V, H = Modulo> {
    hash: H,
    /// Chain heads, one per bucket.
    buckets: Vec<Option<DefaultKey>>,
    entries: SlotMap<DefaultKey, Entry<V>>,
}

impl<V> ChainedHashMap<V> {
    /// Create a table of `num_buckets` empty buckets routed by
    /// `key % num_buckets`.
    ///
    /// # Panics
    ///
    /// Panics if `num_buckets` is zero.
    pub fn new(num_buckets: usize) -> Self {
        Self::with_hash(Modulo(num_buckets), num_buckets)
    }
}

impl<V, H> ChainedHashMap<V, H>
where
    H: BucketHash,
{
    /// Create a table of `num_buckets` empty buckets routed by `hash`.
    ///
    /// `hash` must map every key into `[0, num_buckets)`; see [`BucketHash`]
    /// for the full contract.
    ///
    /// # Panics
    ///
    /// Panics if `num_buckets` is zero.
    pub fn with_hash(hash: H, num_buckets: usize) -> Self {
        assert!(num_buckets >= 1, "the table needs at least one bucket");
        Self {
            hash,
            buckets: vec![None; num_buckets],
            entries: SlotMap::with_key(),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bucket count fixed at construction.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Store `value` under `key`, taking ownership of it.
    ///
    /// If `key` was already present the entry is reused in place and the
    /// previous value moves back to the caller. Otherwise a new entry
    /// becomes the head of its bucket's chain and `None` is returned.
    pub fn insert(&mut self, key: u64, value: V) -> Option<V> {
        let bucket = self.bucket_of(key);
        if let Some(node) = self.find_node(bucket, key) {
            // Same key: only the payload changes hands.
            return Some(mem::replace(&mut self.entries[node].value, value));
        }
        let head = self.buckets[bucket];
        let node = self.entries.insert(Entry { key, value, next: head });
        self.buckets[bucket] = Some(node);
        None
    }

    /// Borrow the value stored under `key`.
    pub fn get(&self, key: u64) -> Option<&V> {
        let bucket = self.bucket_of(key);
        let node = self.find_node(bucket, key)?;
        Some(&self.entries[node].value)
    }

    /// Mutably borrow the value stored under `key`.
    pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        let bucket = self.bucket_of(key);
        let node = self.find_node(bucket, key)?;
        Some(&mut self.entries[node].value)
    }

    pub fn contains_key(&self, key: u64) -> bool {
        let bucket = self.bucket_of(key);
        self.find_node(bucket, key).is_some()
    }

    /// Take `key`'s value out of the table.
    ///
    /// The entry is unlinked and freed; ownership of the value moves to the
    /// caller. Returns `None` when `key` is absent.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        self.detach_entry(key).map(|entry| entry.value)
    }

    /// Drop `key`'s entry and its value in place.
    ///
    /// Unlike [`ChainedHashMap::remove`], nothing is handed back: the value
    /// is released here. Absent keys are a no-op.
    pub fn delete(&mut self, key: u64) {
        drop(self.detach_entry(key));
    }

    fn bucket_of(&self, key: u64) -> usize {
        let bucket = self.hash.index(key);
        debug_assert!(
            bucket < self.buckets.len(),
            "hash routed key {} to bucket {} of {}",
            key,
            bucket,
            self.buckets.len()
        );
        bucket
    }

    /// Walk `bucket`'s chain from the head, returning the node holding `key`.
    fn find_node(&self, bucket: usize, key: u64) -> Option<DefaultKey> {
        let mut cursor = self.buckets[bucket];
        while let Some(node) = cursor {
            let entry = &self.entries[node];
            if entry.key == key {
                return Some(node);
            }
            cursor = entry.next;
        }
        None
    }

    /// Unlink `key`'s node from its chain and move the whole entry out of
    /// the arena.
    ///
    /// Removing the head redirects the bucket slot; removing mid-chain
    /// splices the predecessor past the node. Either way the chain is fully
    /// rewired before the entry is returned, so the value's drop glue never
    /// observes a half-spliced chain.
    fn detach_entry(&mut self, key: u64) -> Option<Entry<V>> {
        let bucket = self.bucket_of(key);
        let head = self.buckets[bucket]?;

        if self.entries[head].key == key {
            let entry = self.entries.remove(head).expect("chain head must be live");
            self.buckets[bucket] = entry.next;
            return Some(entry);
        }

        let mut prev = head;
        while let Some(node) = self.entries[prev].next {
            if self.entries[node].key == key {
                let entry = self.entries.remove(node).expect("chain link must be live");
                self.entries[prev].next = entry.next;
                return Some(entry);
            }
            prev = node;
        }
        None
    }
}

#[cfg(test)]
impl<V, H> ChainedHashMap<V, H>
where
    H: BucketHash,
{
    /// Keys along `bucket`'s chain, head first.
    pub(crate) fn chain_keys(&self, bucket: usize) -> Vec<u64> {
        let mut keys = Vec::new();
        let mut cursor = self.buckets[bucket];
        while let Some(node) = cursor {
            let entry = &self.entries[node];
            keys.push(entry.key);
            cursor = entry.next;
        }
        keys
    }

    /// Assert the structural invariants: every chain link resolves to a
    /// live arena node, every entry sits in the bucket its key hashes to,
    /// no key is reachable twice, and the chains cover the whole arena.
    pub(crate) fn check_chains(&self) {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut cursor = *head;
            while let Some(node) = cursor {
                let entry = self
                    .entries
                    .get(node)
                    .expect("chain link points at a freed node");
                assert_eq!(
                    self.hash.index(entry.key),
                    bucket,
                    "key {} reachable from the wrong bucket",
                    entry.key
                );
                assert!(seen.insert(entry.key), "key {} reachable twice", entry.key);
                cursor = entry.next;
            }
        }
        assert_eq!(
            seen.len(),
            self.entries.len(),
            "arena holds nodes no chain reaches"
        );
    }
}
