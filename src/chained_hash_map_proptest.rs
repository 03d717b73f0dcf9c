#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so each step
// can call the crate-internal chain-integrity checks alongside the
// public API.

use std::collections::HashMap;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use crate::bucket_hash::BucketHash;
use crate::chained_hash_map::ChainedHashMap;

/// Operations refer to keys by pool index so shrinking collapses toward a
/// small pool and short op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Get(usize),
    Mutate(usize, i32),
    Remove(usize),
    Delete(usize),
    Contains(usize),
}

/// A pool of keys plus a sequence of operations over pool indices. The
/// pool may contain duplicates; that only makes key reuse more likely.
fn arb_scenario() -> impl Strategy<Value = (Vec<u64>, Vec<OpI>)> {
    proptest::collection::vec(any::<u64>(), 1..=8).prop_flat_map(|pool| {
        let indices: Vec<usize> = (0..pool.len()).collect();
        let index = proptest::sample::select(indices);
        let op = prop_oneof![
            (index.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            index.clone().prop_map(OpI::Get),
            (index.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            index.clone().prop_map(OpI::Remove),
            index.clone().prop_map(OpI::Delete),
            index.prop_map(OpI::Contains),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Drive the table and a `HashMap` model through the same operations,
/// comparing observable results and re-checking the chain invariants after
/// every step.
fn run_scenario<H: BucketHash>(
    mut table: ChainedHashMap<i32, H>,
    pool: &[u64],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<u64, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, value) => {
                let key = pool[i];
                prop_assert_eq!(table.insert(key, value), model.insert(key, value));
            }
            OpI::Get(i) => {
                let key = pool[i];
                prop_assert_eq!(table.get(key), model.get(&key));
            }
            OpI::Mutate(i, delta) => {
                let key = pool[i];
                prop_assert_eq!(table.contains_key(key), model.contains_key(&key));
                if let Some(value) = table.get_mut(key) {
                    *value = value.wrapping_add(delta);
                }
                if let Some(value) = model.get_mut(&key) {
                    *value = value.wrapping_add(delta);
                }
            }
            OpI::Remove(i) => {
                let key = pool[i];
                prop_assert_eq!(table.remove(key), model.remove(&key));
            }
            OpI::Delete(i) => {
                let key = pool[i];
                table.delete(key);
                model.remove(&key);
                prop_assert!(table.get(key).is_none());
            }
            OpI::Contains(i) => {
                let key = pool[i];
                prop_assert_eq!(table.contains_key(key), model.contains_key(&key));
            }
        }

        table.check_chains();
        prop_assert_eq!(table.len(), model.len());
        prop_assert_eq!(table.is_empty(), model.is_empty());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    // Property: state-machine equivalence against std's HashMap across
    // inserts, overwrites, lookups, in-place mutation, removes, and
    // deletes, with chains re-validated after every operation.
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::new(16), &pool, ops)?;
    }

    // Property: the same equivalence when every key is forced into a
    // single bucket, so each operation works on one long chain.
    #[test]
    fn prop_state_machine_single_bucket((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashMap::new(1), &pool, ops)?;
    }

    // Property: inserting a fresh key and removing it restores the exact
    // observable state the table had before the insert.
    #[test]
    fn prop_insert_remove_roundtrip(
        prefill in proptest::collection::btree_map(0u64..64, any::<i32>(), 0..16),
        probe in 0u64..64,
        value in any::<i32>(),
    ) {
        let mut table: ChainedHashMap<i32> = ChainedHashMap::new(3);
        // Prefilled keys are even, the probe key odd, so the probe is
        // always fresh.
        for (&key, &prefill_value) in &prefill {
            table.insert(key * 2, prefill_value);
        }
        let probe = probe * 2 + 1;

        let before: Vec<Option<i32>> = (0..130).map(|key| table.get(key).copied()).collect();
        prop_assert_eq!(table.insert(probe, value), None);
        prop_assert_eq!(table.remove(probe), Some(value));
        let after: Vec<Option<i32>> = (0..130).map(|key| table.get(key).copied()).collect();

        prop_assert_eq!(before, after);
        table.check_chains();
    }
}
