// Value ownership accounting for ChainedHashMap.
//
// The table owns stored values until an operation transfers them out:
// - remove and overwrite-insert hand the value back to the caller
//   un-dropped;
// - delete drops the value in place;
// - dropping the table drops every value still stored.
// A drop-counting payload asserts each value is dropped exactly once, on
// whichever side of the boundary owns it at the time.
use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use chained_hashmap::ChainedHashMap;

/// Payload that bumps a shared counter when dropped.
struct Counted {
    drops: Rc<Cell<usize>>,
}

impl Counted {
    fn new(drops: &Rc<Cell<usize>>) -> Self {
        Counted {
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

// Test: teardown releases everything still stored.
// Assumes: keys 0..5 over three buckets leave at least one multi-entry
// chain.
// Verifies: dropping the table drops each remaining value exactly once.
#[test]
fn teardown_drops_every_remaining_value() {
    let drops = Rc::new(Cell::new(0));
    let mut table = ChainedHashMap::new(3);
    for key in 0..5 {
        assert!(table.insert(key, Counted::new(&drops)).is_none());
    }
    assert_eq!(drops.get(), 0);
    drop(table);
    assert_eq!(drops.get(), 5);
}

// Test: remove transfers ownership instead of dropping.
// Assumes: nothing.
// Verifies: the removed value stays alive in the caller's hands, drops
// when the caller lets go, and teardown does not touch it again.
#[test]
fn remove_transfers_ownership_to_caller() {
    let drops = Rc::new(Cell::new(0));
    let mut table = ChainedHashMap::new(3);
    assert!(table.insert(7, Counted::new(&drops)).is_none());

    let held = table.remove(7).expect("entry was present");
    assert_eq!(drops.get(), 0);
    drop(held);
    assert_eq!(drops.get(), 1);

    drop(table);
    assert_eq!(drops.get(), 1);
}

// Test: overwrite hands the displaced value back un-dropped.
// Assumes: nothing.
// Verifies: the previous value drops only when the caller drops it; the
// replacement drops at teardown.
#[test]
fn overwrite_returns_old_value_undropped() {
    let drops = Rc::new(Cell::new(0));
    let mut table = ChainedHashMap::new(3);
    assert!(table.insert(7, Counted::new(&drops)).is_none());

    let previous = table.insert(7, Counted::new(&drops));
    assert_eq!(drops.get(), 0);
    drop(previous);
    assert_eq!(drops.get(), 1);

    drop(table);
    assert_eq!(drops.get(), 2);
}

// Test: delete disposes of the value immediately.
// Assumes: nothing.
// Verifies: the drop happens inside delete, deleting an absent key drops
// nothing, and teardown sees no leftover.
#[test]
fn delete_drops_value_in_place() {
    let drops = Rc::new(Cell::new(0));
    let mut table = ChainedHashMap::new(3);
    assert!(table.insert(7, Counted::new(&drops)).is_none());

    table.delete(7);
    assert_eq!(drops.get(), 1);
    table.delete(7); // absent now
    assert_eq!(drops.get(), 1);

    drop(table);
    assert_eq!(drops.get(), 1);
}

// Test: mixed removals never double-drop at teardown.
// Assumes: keys 0..4 with one removed-and-held and one deleted.
// Verifies: teardown accounts only for the entries still stored; the
// held value drops on its own schedule.
#[test]
fn removed_entries_not_double_dropped_at_teardown() {
    let drops = Rc::new(Cell::new(0));
    let mut table = ChainedHashMap::new(3);
    for key in 0..4 {
        assert!(table.insert(key, Counted::new(&drops)).is_none());
    }

    let held = table.remove(0).expect("entry was present");
    table.delete(1);
    assert_eq!(drops.get(), 1); // only the deleted value so far

    drop(table); // keys 2 and 3 remain
    assert_eq!(drops.get(), 3);

    drop(held);
    assert_eq!(drops.get(), 4);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    // Property: across any operation sequence, every created value is in
    // exactly one place: in the table, in the caller's hands, or dropped.
    // The balance created = stored + held + dropped holds after each
    // step, and every value is dropped exactly once by the end.
    #[test]
    fn prop_every_value_drops_exactly_once(
        ops in proptest::collection::vec((0u8..4, 0u64..8), 1..200),
    ) {
        let drops = Rc::new(Cell::new(0));
        let mut created = 0usize;
        let mut held: Vec<Counted> = Vec::new();
        let mut table: ChainedHashMap<Counted> = ChainedHashMap::new(3);

        for (op, key) in ops {
            match op {
                0 => {
                    created += 1;
                    if let Some(previous) = table.insert(key, Counted::new(&drops)) {
                        held.push(previous);
                    }
                }
                1 => {
                    if let Some(value) = table.remove(key) {
                        held.push(value);
                    }
                }
                2 => table.delete(key),
                _ => {
                    let _ = table.get(key);
                }
            }
            prop_assert_eq!(drops.get(), created - table.len() - held.len());
        }

        drop(table);
        prop_assert_eq!(drops.get(), created - held.len());
        drop(held);
        prop_assert_eq!(drops.get(), created);
    }
}
