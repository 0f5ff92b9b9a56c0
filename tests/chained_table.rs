// ChainedHashMap integration suite (consolidated).
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Addressing: every key-addressed operation lands in the bucket
//   chosen by hash % bucket_count and then resolves by key equality.
// - Uniqueness: a key never has more than one entry; overwrite
//   displaces the old value and re-appends at the bucket tail.
// - Count: len is the sum of the chain lengths and tracks every
//   insert, overwrite, and delete.
// - Geometry: the bucket count is fixed at construction; collisions
//   extend chains instead of reorganizing the table.
// - Errors: get/get_mut/delete report a missing key explicitly.
use chained_hashmap::{ChainedHashMap, KeyNotFound, DEFAULT_BUCKET_COUNT};
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

// Routes every key to bucket zero, turning the whole table into one chain.
#[derive(Clone, Default)]
struct OneBucket;

struct OneBucketHasher;

impl Hasher for OneBucketHasher {
    fn finish(&self) -> u64 {
        0
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

impl BuildHasher for OneBucket {
    type Hasher = OneBucketHasher;

    fn build_hasher(&self) -> OneBucketHasher {
        OneBucketHasher
    }
}

// Test: the basic set/get/delete walkthrough.
// Assumes: distinct keys round-trip independently.
// Verifies: count follows deletes; missing keys error on get and delete.
#[test]
fn set_get_delete_walkthrough() {
    let mut numerals = ChainedHashMap::new();
    numerals.set('I', 1);
    numerals.set('V', 5);
    numerals.set('X', 10);
    assert_eq!(numerals.len(), 3);
    assert_eq!(numerals.get(&'V'), Ok(&5));

    assert_eq!(numerals.delete(&'I'), Ok(1));
    assert_eq!(numerals.len(), 2);
    assert_eq!(numerals.get(&'I'), Err(KeyNotFound));
    assert_eq!(numerals.delete(&'I'), Err(KeyNotFound));

    assert!(numerals.contains(&'X'));
    assert!(!numerals.contains(&'I'));
}

// Test: overwrite semantics in a deterministic single-bucket table.
// Assumes: a one-bucket table makes chain order fully observable.
// Verifies: the displaced value comes back, the key moves to the bucket
// tail, and the table does not grow.
#[test]
fn overwrite_reappends_at_bucket_tail() {
    let mut table: ChainedHashMap<&str, i32> = ChainedHashMap::with_buckets(1);
    table.set("a", 1);
    table.set("b", 2);
    table.set("c", 3);

    assert_eq!(table.set("a", 9), Some(1));
    let keys: Vec<&str> = table.keys().copied().collect();
    assert_eq!(keys, vec!["b", "c", "a"]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("a"), Ok(&9));
}

// Test: correctness under a fully degraded hasher.
// Assumes: a constant hash sends all traffic into one chain of an
// otherwise multi-bucket table.
// Verifies: operations still address the right keys; iteration order is
// insertion order because only one chain is populated.
#[test]
fn degraded_hasher_still_correct() {
    let mut table = ChainedHashMap::with_buckets_and_hasher(8, OneBucket);
    for (k, v) in [("one", 1), ("two", 2), ("three", 3)] {
        table.set(k.to_string(), v);
    }
    let keys: Vec<&str> = table.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["one", "two", "three"]);

    assert_eq!(table.get("two"), Ok(&2));
    assert_eq!(table.delete("two"), Ok(2));
    assert_eq!(table.get("two"), Err(KeyNotFound));
    assert_eq!(table.len(), 2);

    // The hasher is reusable for sibling tables with default geometry.
    let copy: ChainedHashMap<String, i32, OneBucket> =
        ChainedHashMap::with_hasher(table.hasher().clone());
    assert_eq!(copy.bucket_count(), DEFAULT_BUCKET_COUNT);
}

// Test: counting words with get_mut-or-set.
// Assumes: String keys answer &str lookups; get_mut distinguishes hit
// from miss.
// Verifies: in-place increments accumulate; misses stay explicit.
#[test]
fn word_counts_via_get_mut() {
    let mut counts: ChainedHashMap<String, u32> = ChainedHashMap::with_buckets(4);
    let text = "the quick fox jumps over the lazy dog the end";
    for word in text.split_whitespace() {
        match counts.get_mut(word) {
            Ok(n) => *n += 1,
            Err(KeyNotFound) => {
                counts.set(word.to_string(), 1);
            }
        }
    }
    assert_eq!(counts.get("the"), Ok(&3));
    assert_eq!(counts.get("fox"), Ok(&1));
    assert_eq!(counts.get("cat"), Err(KeyNotFound));
    assert_eq!(counts.len(), 8);
}

// Test: sustained churn against the standard HashMap.
// Assumes: a small key space forces overwrites, deletes, and collisions
// within 16 buckets.
// Verifies: per-step results, running length, and the final contents all
// agree with the std model.
#[test]
fn churn_agrees_with_std_hashmap() {
    let mut table: ChainedHashMap<u64, u64> = ChainedHashMap::with_buckets(16);
    let mut mirror: HashMap<u64, u64> = HashMap::new();

    let mut s = 0x243f_6a88_85a3_08d3_u64;
    let mut next = || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        s
    };

    for round in 0..2_000u64 {
        let k = next() % 64;
        if round % 3 == 0 {
            assert_eq!(table.delete(&k).ok(), mirror.remove(&k));
        } else {
            assert_eq!(table.set(k, round), mirror.insert(k, round));
        }
        assert_eq!(table.len(), mirror.len());
    }

    for (k, v) in &mirror {
        assert_eq!(table.get(k), Ok(v));
    }
    let snapshot: HashMap<u64, u64> = table.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(snapshot, mirror);
}

// Test: clear empties the table without changing its geometry.
// Assumes: clear drops entries only.
// Verifies: the table is immediately reusable with the same buckets.
#[test]
fn clear_then_reuse() {
    let mut table: ChainedHashMap<u32, u32> = ChainedHashMap::with_buckets(4);
    for n in 0..32 {
        table.set(n, n);
    }
    table.clear();
    assert!(table.is_empty());
    assert_eq!(table.bucket_count(), 4);
    assert_eq!(table.get(&3), Err(KeyNotFound));

    table.set(3, 33);
    assert_eq!(table.get(&3), Ok(&33));
    assert_eq!(table.len(), 1);
}

// Test: building from pair sources.
// Assumes: FromIterator and Extend funnel through set.
// Verifies: duplicate keys collapse to the last write; items() snapshots
// every surviving pair.
#[test]
fn build_from_pairs_last_write_wins() {
    let mut table: ChainedHashMap<&str, i32> =
        [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("a"), Ok(&3));

    table.extend([("b", 20), ("c", 30)]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("b"), Ok(&20));

    let mut items = table.items();
    items.sort_unstable();
    assert_eq!(items, vec![("a", 3), ("b", 20), ("c", 30)]);

    // Borrowing for-loop form agrees with the snapshot.
    let mut looped: Vec<(&str, i32)> = Vec::new();
    for (k, v) in &table {
        looped.push((*k, *v));
    }
    looped.sort_unstable();
    assert_eq!(looped, items);
}

// Test: text rendering.
// Assumes: a one-bucket table renders in insertion order.
// Verifies: Display shows `{key: value, ...}` with Debug-formatted keys
// and values; the empty table is bare braces.
#[test]
fn display_matches_insertion_order_in_one_bucket() {
    let mut table: ChainedHashMap<String, i32> = ChainedHashMap::with_buckets(1);
    table.set("I".to_string(), 1);
    table.set("V".to_string(), 5);
    assert_eq!(format!("{table}"), r#"{"I": 1, "V": 5}"#);
    assert_eq!(format!("{table:?}"), r#"{"I": 1, "V": 5}"#);

    let empty: ChainedHashMap<i32, i32> = ChainedHashMap::with_buckets(1);
    assert_eq!(empty.to_string(), "{}");
}

// Test: uniform sampling surface.
// Assumes: the caller supplies the RNG; sampling never invents keys.
// Verifies: with a seeded RNG, every present key is reachable and absent
// tables yield None.
#[cfg(feature = "random")]
#[test]
fn random_key_reaches_every_key() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    let mut rng = StdRng::seed_from_u64(1);

    let empty: ChainedHashMap<&str, i32> = ChainedHashMap::new();
    assert_eq!(empty.random_key(&mut rng), None);

    let mut table = ChainedHashMap::new();
    table.set("a", 1);
    table.set("b", 2);
    table.set("c", 3);

    let seen: HashSet<&str> = (0..200)
        .filter_map(|_| table.random_key(&mut rng).copied())
        .collect();
    assert_eq!(seen.len(), 3);
}
