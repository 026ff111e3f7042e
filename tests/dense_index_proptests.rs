use proptest::prelude::*;
use random_map::{DenseIndex, InsertError};
use std::collections::BTreeSet;

// Model push/swap_remove on DenseIndex against a BTreeSet of live keys and
// assert the slot index stays dense and exact after every step.
proptest! {
    #[test]
    fn prop_dense_index_matches_set(ops in proptest::collection::vec((any::<bool>(), 0u16..32), 1..200)) {
        let mut d: DenseIndex<u16> = DenseIndex::new();
        let mut live: BTreeSet<u16> = BTreeSet::new();

        for (push, k) in ops {
            if push {
                let before = d.len();
                match d.push(k) {
                    Ok(slot) => {
                        prop_assert!(live.insert(k), "push accepted a live key");
                        prop_assert_eq!(slot, before);
                        prop_assert_eq!(d.get(slot), Some(&k));
                    }
                    Err(InsertError::DuplicateKey) => {
                        prop_assert!(live.contains(&k));
                        prop_assert_eq!(d.len(), before);
                    }
                }
            } else {
                let before = d.len();
                let last = if before > 0 { d.get(before - 1).copied() } else { None };
                match d.swap_remove(&k) {
                    Some(slot) => {
                        prop_assert!(live.remove(&k));
                        prop_assert_eq!(d.len(), before - 1);
                        // The former last key now occupies the freed slot,
                        // unless the removed key was itself last.
                        if last != Some(k) {
                            let moved = last.expect("non-empty before removal");
                            prop_assert_eq!(d.position(&moved), Some(slot));
                        }
                    }
                    None => prop_assert!(!live.contains(&k)),
                }
            }

            prop_assert!(d.check_invariants().is_ok());
            prop_assert_eq!(d.len(), live.len());
            let keys: BTreeSet<u16> = d.iter().copied().collect();
            prop_assert_eq!(&keys, &live);
            for k in &live {
                let p = d.position(k).expect("live key indexed");
                prop_assert_eq!(d.get(p), Some(k));
            }
        }
    }
}
