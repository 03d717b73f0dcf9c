//! chained-hashmap: A single-threaded hash map with a bucket count fixed
//! at construction, `u64` keys, and separately chained entries.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, fully safe chained hash table whose ownership of
//!   stored values is explicit at every boundary.
//! - Pieces:
//!   - BucketHash: the routing capability. The table stores one
//!     implementation and asks it for `key -> bucket index` once per
//!     keyed operation; `Modulo` is the stock remainder router and any
//!     `Fn(u64) -> usize` closure participates directly.
//!   - ChainedHashMap<V, H>: the container. A `Vec` of chain heads plus
//!     a slot map arena of entries; each entry links to the next one in
//!     its bucket by arena key, so chain surgery rewrites indices and
//!     never juggles owning pointers.
//!
//! Ownership of stored values
//! - `insert` moves the value in; inserting over an existing key hands
//!   the previous value back to the caller and reuses the entry.
//! - `get`/`get_mut` borrow; ownership stays with the table.
//! - `remove` frees the entry and moves the value out to the caller.
//! - `delete` frees the entry and drops the value in place; nothing is
//!   left for the caller to release.
//! - Dropping the table drops every remaining entry and value.
//!
//! Chain discipline
//! - New keys become the head of their bucket's chain, so each chain
//!   reads most-recent-first. No other order is guaranteed.
//! - Removal special-cases the head (redirect the bucket slot) and
//!   otherwise splices the predecessor past the node. The chain is fully
//!   rewired before the detached value can drop, so drop glue never
//!   observes a half-spliced chain.
//!
//! Routing contract
//! - `BucketHash::index` must be pure and land in `[0, num_buckets)`.
//!   The table never clamps the result; an out-of-range index stops on a
//!   debug assertion, or failing that on the bucket array's bounds
//!   check, instead of silently touching another chain.
//!
//! Absent entry vs. empty payload
//! - A raw-pointer rendition of this structure has one null sentinel for
//!   both "no entry" and "entry holding a null payload". Here the two
//!   cannot be confused: absence is `None` at the table boundary, and a
//!   caller who needs a nullable payload stores `V = Option<T>` and sees
//!   `Some(&None)` for a present-but-empty entry.
//!
//! Notes and non-goals
//! - Single-threaded: no locking, no interior mutability. Mutation takes
//!   `&mut self`, so unsynchronized sharing is rejected at compile time.
//! - The bucket count never changes: no resizing or rehashing, and no
//!   load-factor tracking. Chains simply grow.
//! - No iteration or enumeration API.
//! - Keys are `u64` only. Values are opaque: never inspected or compared,
//!   only moved and dropped.

mod bucket_hash;
mod chained_hash_map;
mod chained_hash_map_proptest;

// Public surface
pub use bucket_hash::{BucketHash, Modulo};
pub use chained_hash_map::ChainedHashMap;
