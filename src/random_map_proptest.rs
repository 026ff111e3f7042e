#![cfg(test)]

// Property tests for RandomMap kept inside the crate so they can inspect the
// dense index directly.

use crate::error::InsertError;
use crate::random_map::RandomMap;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Operations name keys by index into a small generated pool so inserts,
// removals and lookups keep colliding on the same few keys.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    TryInsert(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Sample,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryInsert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            2 => Just(OpI::Sample),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `insert` overwrites in place and reports the previous value.
// - `try_insert` fails exactly when the model already holds the key.
// - `remove` returns the model's value and the key is gone afterwards.
// - `random_key` only yields live keys and is `None` iff the model is empty.
// - Value map, dense order and slot index stay consistent after every op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(seed in any::<u64>(), (pool, ops) in arb_scenario()) {
        let mut sut: RandomMap<String, i32> = RandomMap::with_seed(seed);
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i].clone();
                    let prev = sut.insert(k.clone(), v);
                    prop_assert_eq!(prev, model.insert(k, v));
                }
                OpI::TryInsert(i, v) => {
                    let k = pool[i].clone();
                    let already = model.contains_key(&k);
                    match sut.try_insert(k.clone(), v) {
                        Ok(()) => {
                            prop_assert!(!already, "try_insert must fail on duplicate");
                            model.insert(k, v);
                        }
                        Err(InsertError::DuplicateKey) => {
                            prop_assert!(already, "duplicate error only when key exists");
                        }
                    }
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k.as_str()), model.remove(k));
                    prop_assert!(!sut.contains_key(k.as_str()));
                    prop_assert!(sut.keys().all(|live| live != k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k.as_str()), model.get(k));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    if let Some(v) = sut.get_mut(k.as_str()) {
                        *v = v.saturating_add(d);
                        let mv = model.get_mut(k).expect("present in model");
                        *mv = mv.saturating_add(d);
                    } else {
                        prop_assert!(!model.contains_key(k));
                    }
                }
                OpI::Sample => {
                    match sut.random_key() {
                        Some(k) => prop_assert!(model.contains_key(k)),
                        None => prop_assert!(model.is_empty()),
                    }
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            // Post-conditions after each op
            prop_assert!(sut.check_invariants().is_ok(), "{:?}", sut.check_invariants());
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            let s_keys: BTreeSet<&String> = sut.keys().collect();
            let m_keys: BTreeSet<&String> = model.keys().collect();
            prop_assert_eq!(s_keys, m_keys);
        }
    }
}

// Property: after any insert/remove sequence, enough samples observe every
// live key and nothing else.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_sampling_covers_exactly_live_keys(
        seed in any::<u64>(),
        ops in proptest::collection::vec((any::<bool>(), 0u8..12), 1..60),
    ) {
        let mut sut: RandomMap<u8, ()> = RandomMap::with_seed(seed);
        let mut live: BTreeSet<u8> = BTreeSet::new();
        for (insert, k) in ops {
            if insert {
                sut.insert(k, ());
                live.insert(k);
            } else {
                sut.remove(&k);
                live.remove(&k);
            }
        }

        // At most 12 keys; 2000 draws miss a given key with probability
        // below (11/12)^2000.
        let mut seen = BTreeSet::new();
        for _ in 0..2_000 {
            match sut.random_key() {
                Some(k) => { seen.insert(*k); }
                None => break,
            }
        }
        prop_assert_eq!(seen, live);
    }
}
