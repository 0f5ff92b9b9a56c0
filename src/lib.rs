//! chained-hashmap: a separate-chaining hash table built on an explicit
//! doubly-linked list, with stable node handles.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build ChainedHashMap in safe, verifiable layers so each piece
//!   can be reasoned about independently.
//! - Layers:
//!   - Chain<T>: ordered doubly-linked list over a slotmap arena; owns
//!     the link-maintenance invariants and hands out stable
//!     `NodeHandle`s for O(1) unlink and in-place mutation.
//!   - ChainedHashMap<K, V, S>: fixed array of Chain buckets; owns the
//!     hashing and key-equality invariants and resolves collisions by
//!     letting keys coexist in one chain.
//!
//! Constraints
//! - Fixed geometry: the bucket count is chosen at construction and
//!   never changes; chains absorb all growth. There is no rehashing, so
//!   an entry's bucket is decided once, by `hash_one(key) % buckets`.
//! - Stable, generational keys behind the small `NodeHandle` wrapper: a
//!   handle to a removed node goes inert, it never aliases a later
//!   occupant of the same slot.
//! - Misses are explicit: key-addressed table operations fail with
//!   `KeyNotFound`, value-addressed chain operations with
//!   `ItemNotFound`. Searches (`find`, `find_node`) observe absence as
//!   `None` instead.
//! - Single-threaded use is the target; there is no interior
//!   mutability and no locking anywhere.
//!
//! Why this split?
//! - Localize invariants: link symmetry (`prev` mirrors `next` after
//!   every mutation, head/tail track the real ends) lives entirely in
//!   `chain`; bucket selection and single-entry-per-key live entirely
//!   in `table`. Neither layer can break the other's contract.
//! - No unsafe: nodes live in a `SlotMap` arena and refer to their
//!   neighbors by key, so the classic doubly-linked ownership cycle
//!   never arises.
//! - Clear failure boundaries: user code runs only through `K: Hash`,
//!   `Eq`/`PartialEq`, and caller-supplied predicates, always while the
//!   structure is consistent.
//!
//! Collision and overwrite semantics
//! - Colliding keys are ordinary neighbors in one bucket chain; lookup
//!   narrows by hash and then compares keys along the chain.
//! - Overwriting a present key removes its entry and appends a fresh
//!   one, so the rewritten key moves to its bucket's tail. A key never
//!   has more than one entry.
//!
//! Notes and non-goals
//! - No resizing or rehashing: under load, performance degrades
//!   smoothly toward a chain scan. Callers who know their workload can
//!   pick the bucket count up front.
//! - No persistence; the table is an in-memory structure only.
//! - `random_key` (uniform sampling with a caller-supplied RNG) is
//!   behind the `random` feature, on by default.
//! - Both layers are public: `Chain` is useful on its own, and the
//!   table's tests and benches lean on its observability.

pub mod chain;
mod chain_proptest;
pub mod table;

// Public surface
pub use chain::{Chain, ItemNotFound, NodeHandle};
pub use table::{ChainedHashMap, KeyNotFound, DEFAULT_BUCKET_COUNT};
