//! str-hashmap: a single-threaded, string-keyed hash table with separate
//! chaining, an explicit doubling resize and a bucket-ordered cursor.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container whose every moving part (hash,
//!   bucket selection, chain order, rehash, traversal) is observable and
//!   deterministic, so it can be embedded and reasoned about directly.
//! - Pieces:
//!   - `KeyHasher`: strategy trait mapping key bytes to a `u32`. The
//!     default `MurmurMix` is a seeded multiplicative mix.
//!   - `StrHashMap<V, H>`: `Vec` of buckets, each bucket a `Vec` chain of
//!     entries. Bucket = `hash % capacity`.
//!   - `Iter`/`Cursor`: walk buckets ascending, chains head to tail.
//!
//! Constraints
//! - Single-threaded: no locks, no atomics.
//! - Keys are copied into the table; values are held as given and returned
//!   on removal. The table never clones or inspects values.
//! - Every allocation is fallible (`try_reserve`); a failed operation
//!   leaves the table unchanged.
//!
//! Chain semantics
//! - `set` always appends to the tail of the key's chain, even when the key
//!   is already present. `get`/`find_entry`/`unset` act on the first match
//!   from the head, so a duplicate becomes visible only once the earlier
//!   entry is removed.
//! - `unset` removes by position; later entries in the chain move up.
//!
//! Hashing and rehashing invariants
//! - Each entry caches its `u32` hash. Resize rebuckets by the cached
//!   hash and never calls the hasher.
//! - Resize sizes every new chain before moving any entry, so it either
//!   completes or leaves the old layout in place.
//!
//! Notes and non-goals
//! - No automatic growth: `set` never resizes. Callers watch `load()` (or
//!   `needs_resize(RECOMMENDED_MAX_LOAD)`) and call `resize` themselves.
//! - `Iter` borrows the table, so mutation during iteration is a compile
//!   error. `Cursor` is detached and takes the table on each step; mutating
//!   between steps gives unspecified traversal results.
//! - `MurmurMix` is not collision resistant. Use `BuildHasherKeys` with a
//!   randomized `BuildHasher` for untrusted keys.

mod error;
pub mod hasher;
mod iter;
pub mod str_hash_map;
mod str_hash_map_proptest;

// Public surface
pub use error::TableError;
pub use hasher::{BuildHasherKeys, KeyHasher, MurmurMix};
pub use iter::{Cursor, IntoValues, Iter};
pub use str_hash_map::{Entry, StrHashMap, DEFAULT_CAPACITY, RECOMMENDED_MAX_LOAD};
