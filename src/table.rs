//! ChainedHashMap: a separate-chaining hash table.
//!
//! The table is a fixed array of [`Chain`] buckets. A key's bucket is
//! `hash_one(key) % bucket_count`; colliding keys coexist as distinct entries
//! in the same chain, found by payload equality after the hash narrows the
//! search. The bucket count is chosen at construction and never changes, so
//! chains grow without bound under load and every operation degrades
//! gracefully to a chain scan rather than reorganizing the table.
//!
//! Hashing is pluggable through `S: BuildHasher`, defaulting to the standard
//! library's `RandomState`. Lookups take any borrowed form of the key
//! (`&str` for `String` keys) through the usual `Borrow` bounds.

use crate::chain::{Chain, Iter as ChainIter};
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::slice;
use thiserror::Error;

/// Bucket count used by the plain constructors.
pub const DEFAULT_BUCKET_COUNT: usize = 8;

/// Failure of a key-addressed operation (`get`, `get_mut`, `delete`) when the
/// key is absent. A miss is reported, never papered over with a default.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[error("key not found in table")]
pub struct KeyNotFound;

#[derive(Clone, Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Hash table mapping `K` to `V` over an array of bucket chains.
///
/// Entries within one bucket keep insertion order; across buckets the order
/// follows the hash and is arbitrary, though stable between mutations.
pub struct ChainedHashMap<K, V, S = RandomState> {
    buckets: Vec<Chain<Entry<K, V>>>,
    hasher: S,
}

impl<K, V> ChainedHashMap<K, V, RandomState> {
    /// Table with [`DEFAULT_BUCKET_COUNT`] buckets and random hashing.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Table with a caller-chosen bucket count, fixed for the table's
    /// lifetime. A count of zero is clamped to one bucket.
    pub fn with_buckets(buckets: usize) -> Self {
        Self::with_buckets_and_hasher(buckets, RandomState::new())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Default bucket count with a caller-supplied hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKET_COUNT, hasher)
    }

    /// Fully explicit constructor; every other one funnels through here.
    pub fn with_buckets_and_hasher(buckets: usize, hasher: S) -> Self {
        // Zero buckets would leave the index computation undefined.
        let count = buckets.max(1);
        let mut table = Vec::with_capacity(count);
        table.resize_with(count, Chain::new);
        Self {
            buckets: table,
            hasher,
        }
    }

    /// Number of buckets. Constant after construction.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entry count: the sum of the chain lengths. Each chain knows its own
    /// length, so this is a walk over buckets, not over entries.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Chain::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Chain::is_empty)
    }

    /// Drop every entry. Bucket count and hasher are untouched.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Borrowing iterator over all entries, bucket by bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Fresh snapshot of all pairs in iteration order, not a live view.
    pub fn items(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Bucket a key routes to: `hash_one(key) % bucket_count`. Deterministic
    /// per table instance; distribution quality is the hasher's.
    pub fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    fn bucket<Q>(&self, key: &Q) -> &Chain<Entry<K, V>>
    where
        Q: ?Sized + Hash,
    {
        &self.buckets[self.bucket_index(key)]
    }

    /// True if `key` has an entry. Hash to the bucket, then scan it.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bucket(key)
            .find(|entry| entry.key.borrow() == key)
            .is_some()
    }

    /// Borrow the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bucket(key)
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
            .ok_or(KeyNotFound)
    }

    /// Mutably borrow the value stored under `key`, for in-place update
    /// without rehashing or moving the entry.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let handle = bucket
            .find_node_by(|entry| entry.key.borrow() == key)
            .ok_or(KeyNotFound)?;
        Ok(&mut handle
            .data_mut(bucket)
            .expect("handle returned by find_node_by is live")
            .value)
    }

    /// Map `key` to `value`, returning the displaced value if the key was
    /// already present.
    ///
    /// Overwrite is remove-then-append: a rewritten entry moves to its
    /// bucket's tail instead of keeping its old chain position. One key never
    /// has two entries.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        let existing = bucket.find_node_by(|entry| entry.key == key);
        let displaced = existing
            .and_then(|handle| bucket.remove_node(handle))
            .map(|entry| entry.value);
        bucket.push_back(Entry { key, value });
        displaced
    }

    /// Remove `key`'s entry and return its value. The entry is unlinked from
    /// its bucket chain; an absent key fails with `KeyNotFound`.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let handle = bucket
            .find_node_by(|entry| entry.key.borrow() == key)
            .ok_or(KeyNotFound)?;
        let entry = bucket
            .remove_node(handle)
            .expect("handle returned by find_node_by is live");
        Ok(entry.value)
    }
}

#[cfg(feature = "random")]
impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Uniformly sample one present key, or `None` when the table is empty.
    /// Every entry is equally likely regardless of how keys spread across
    /// buckets.
    pub fn random_key<R>(&self, rng: &mut R) -> Option<&K>
    where
        R: rand::Rng + ?Sized,
    {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let target = rng.gen_range(0..len);
        self.keys().nth(target)
    }
}

impl<K, V, S: Default> Default for ChainedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKET_COUNT, S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for ChainedHashMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            hasher: self.hasher.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders as `{key: value, ...}` with `Debug`-formatted keys and values, in
/// iteration order. An empty table renders as `{}`.
impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Display for ChainedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {:?}", key, value)?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_buckets_and_hasher(DEFAULT_BUCKET_COUNT, S::default());
        table.extend(iter);
        table
    }
}

/// Borrowing iterator over a table's entries: each bucket's chain in order,
/// buckets in index order.
pub struct Iter<'a, K, V> {
    buckets: slice::Iter<'a, Chain<Entry<K, V>>>,
    current: Option<ChainIter<'a, Entry<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                return Some((&entry.key, &entry.value));
            }
            // Chain exhausted (or not started): move to the next bucket.
            self.current = Some(self.buckets.next()?.iter());
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a table's keys.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Borrowing iterator over a table's values.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}
