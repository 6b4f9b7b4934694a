#![cfg(test)]

// Property tests for StrHashMap kept inside the crate so they can check the
// cached hashes and chain layout directly.

use crate::hasher::{KeyHasher, MurmurMix};
use crate::str_hash_map::StrHashMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Unset(usize),
    Get(usize),
    Absent(String),
    Resize,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=8, proptest::collection::vec("[a-z]{0,5}", 1..=8)).prop_flat_map(
        |(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
                2 => idx.clone().prop_map(OpI::Unset),
                2 => idx.clone().prop_map(OpI::Get),
                1 => "[A-Z]{1,4}".prop_map(OpI::Absent),
                1 => Just(OpI::Resize),
                1 => Just(OpI::Iterate),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

// Model: each key maps to the values set for it, oldest first. This is the
// observable behaviour of append-without-dedup chains.
type Model = BTreeMap<String, Vec<i32>>;

fn model_len(model: &Model) -> usize {
    model.values().map(Vec::len).sum()
}

// Layout invariants that must hold after every operation:
// - every entry sits in `cached_hash % capacity` and its cached hash is the
//   hasher's output for its key;
// - chain lengths sum to `len`.
fn check_layout(sut: &StrHashMap<i32>) -> Result<(), TestCaseError> {
    let capacity = sut.capacity();
    for (bucket, chain) in sut.buckets().iter().enumerate() {
        for e in chain {
            prop_assert_eq!(e.hash, MurmurMix.hash(e.key.as_bytes()));
            prop_assert_eq!(e.hash as usize % capacity, bucket);
        }
    }
    prop_assert_eq!(sut.chain_lengths().sum::<usize>(), sut.len());
    Ok(())
}

// Property: State-machine equivalence against a multimap model.
// Invariants exercised across random operation sequences:
// - `set` always succeeds and appends; `get` returns the oldest value.
// - `unset` returns the oldest value and exposes the next one.
// - Absent keys leave `len` untouched.
// - `resize` doubles capacity and preserves the multiset of entries.
// - `iter` yields exactly `len` entries; per key, values come oldest first.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let mut sut: StrHashMap<i32> = StrHashMap::new(capacity).unwrap();
        let mut model = Model::new();

        for op in ops {
            match op {
                OpI::Set(i, v) => {
                    let k = &pool[i];
                    prop_assert!(sut.set(k, v).is_ok());
                    model.entry(k.clone()).or_default().push(v);
                }
                OpI::Unset(i) => {
                    let k = &pool[i];
                    let expected = match model.get_mut(k) {
                        Some(vs) if !vs.is_empty() => Some(vs.remove(0)),
                        _ => None,
                    };
                    prop_assert_eq!(sut.unset(k), expected);
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    let expected = model.get(k).and_then(|vs| vs.first());
                    prop_assert_eq!(sut.get(k), expected);
                    prop_assert_eq!(sut.contains_key(k), expected.is_some());
                }
                OpI::Absent(k) => {
                    let before = sut.len();
                    prop_assert!(sut.get(&k).is_none());
                    prop_assert!(sut.unset(&k).is_none());
                    prop_assert_eq!(sut.len(), before);
                }
                OpI::Resize if sut.capacity() >= 1 << 12 => {}
                OpI::Resize => {
                    let before = sut.capacity();
                    prop_assert!(sut.resize().is_ok());
                    prop_assert_eq!(sut.capacity(), before * 2);
                }
                OpI::Iterate => {
                    let mut seen = Model::new();
                    for e in sut.iter() {
                        seen.entry(e.key().to_string()).or_default().push(*e.value());
                    }
                    // Duplicates share a chain, so per-key order is insertion order.
                    let mut expected = model.clone();
                    expected.retain(|_, vs| !vs.is_empty());
                    prop_assert_eq!(seen, expected);
                }
            }

            prop_assert_eq!(sut.len(), model_len(&model));
            prop_assert_eq!(sut.is_empty(), model_len(&model) == 0);
            check_layout(&sut)?;
        }
    }
}

// Property: `load()` is the exact floating-point ratio for any fill level.
proptest! {
    #[test]
    fn prop_load_is_ratio(capacity in 1usize..64, n in 0usize..200) {
        let mut sut = StrHashMap::new(capacity).unwrap();
        for i in 0..n {
            sut.set(&format!("k{}", i), i).unwrap();
        }
        prop_assert_eq!(sut.load(), n as f64 / capacity as f64);
        prop_assert_eq!(sut.needs_resize(0.8), n as f64 / capacity as f64 >= 0.8);
    }
}
