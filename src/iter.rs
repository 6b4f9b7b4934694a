//! Traversal over a table's buckets and chains.
//!
//! Both [`Iter`] and [`Cursor`] walk buckets in ascending order and each
//! chain from head to tail. `Iter` borrows the table, so it always sees a
//! consistent layout. `Cursor` only remembers a position and takes the table
//! on every step; the caller may mutate the table between steps, but the
//! traversal is then unspecified: entries may be skipped or seen twice.

use crate::hasher::KeyHasher;
use crate::str_hash_map::{Chain, Entry, StrHashMap};
use core::iter::FusedIterator;

/// Detached, single-pass traversal position.
///
/// A cursor is not restartable: once [`next`](Self::next) returns `None` it
/// keeps returning `None`. Obtain a new one from
/// [`StrHashMap::cursor`] to walk again.
///
/// ```
/// use str_hashmap::StrHashMap;
///
/// let mut map = StrHashMap::new(1).unwrap();
/// for k in ["a", "b", "c"] {
///     map.set(k, ()).unwrap();
/// }
/// let mut cursor = map.cursor();
/// assert_eq!(cursor.next(&map).map(|e| e.key()), Some("a"));
/// // Removing the entry under the cursor shifts the chain: "b" is skipped.
/// map.unset("a");
/// assert_eq!(cursor.next(&map).map(|e| e.key()), Some("c"));
/// assert!(cursor.next(&map).is_none());
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    /// Next bucket to scan.
    bucket: usize,
    /// Slot of the last returned entry, inside bucket `bucket - 1`.
    slot: Option<usize>,
}

impl Cursor {
    pub(crate) const fn new() -> Self {
        Self {
            bucket: 0,
            slot: None,
        }
    }

    /// Advances to the next entry of `map`.
    ///
    /// The successor in the current chain comes first; otherwise empty
    /// buckets are skipped and the next chain head is returned.
    pub fn next<'a, V, H>(&mut self, map: &'a StrHashMap<V, H>) -> Option<&'a Entry<V>>
    where
        H: KeyHasher,
    {
        self.advance(map.buckets())
    }

    pub(crate) fn advance<'a, V>(&mut self, buckets: &'a [Chain<V>]) -> Option<&'a Entry<V>> {
        if let Some(slot) = self.slot {
            let successor = self
                .bucket
                .checked_sub(1)
                .and_then(|b| buckets.get(b))
                .and_then(|chain| chain.get(slot + 1));
            if let Some(entry) = successor {
                self.slot = Some(slot + 1);
                return Some(entry);
            }
        }

        while let Some(chain) = buckets.get(self.bucket) {
            self.bucket += 1;
            if let Some(head) = chain.first() {
                self.slot = Some(0);
                return Some(head);
            }
        }
        self.slot = None;
        None
    }
}

/// Borrowing iterator returned by [`StrHashMap::iter`].
pub struct Iter<'a, V, H> {
    map: &'a StrHashMap<V, H>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, V, H> Iter<'a, V, H>
where
    H: KeyHasher,
{
    pub(crate) fn new(map: &'a StrHashMap<V, H>) -> Self {
        Self {
            map,
            cursor: Cursor::new(),
            remaining: map.len(),
        }
    }
}

impl<'a, V, H> Iterator for Iter<'a, V, H>
where
    H: KeyHasher,
{
    type Item = &'a Entry<V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.next(self.map)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, H: KeyHasher> ExactSizeIterator for Iter<'_, V, H> {}

impl<V, H: KeyHasher> FusedIterator for Iter<'_, V, H> {}

/// Owning iterator over values, returned by [`StrHashMap::into_values`].
pub struct IntoValues<V> {
    it: core::iter::Flatten<std::vec::IntoIter<Chain<V>>>,
}

impl<V> IntoValues<V> {
    pub(crate) fn new(buckets: Vec<Chain<V>>) -> Self {
        Self {
            it: buckets.into_iter().flatten(),
        }
    }
}

impl<V> Iterator for IntoValues<V> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<V> {
        self.it.next().map(|e| e.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(capacity: usize, keys: &[&str]) -> StrHashMap<usize> {
        let mut m = StrHashMap::new(capacity).unwrap();
        for (i, k) in keys.iter().enumerate() {
            m.set(k, i).unwrap();
        }
        m
    }

    /// Invariant: an empty table yields nothing, however many buckets it has.
    #[test]
    fn empty_table_yields_nothing() {
        let m: StrHashMap<()> = StrHashMap::new(32).unwrap();
        assert_eq!(m.iter().count(), 0);
        let mut c = m.cursor();
        assert!(c.next(&m).is_none());
    }

    /// Invariant: every entry is visited once, in bucket then chain order.
    #[test]
    fn visits_bucket_then_chain_order() {
        let m = map_of(6, &["k1", "k2", "k3"]);
        let keys: Vec<&str> = m.iter().map(Entry::key).collect();
        assert_eq!(keys, vec!["k2", "k1", "k3"]);
    }

    /// Invariant: a single long chain is walked head to tail.
    #[test]
    fn single_chain_in_insertion_order() {
        let keys = ["e", "d", "c", "b", "a"];
        let m = map_of(1, &keys);
        let seen: Vec<&str> = m.iter().map(Entry::key).collect();
        assert_eq!(seen, keys);
    }

    /// Invariant: exhausted traversals stay exhausted.
    #[test]
    fn traversal_is_single_pass() {
        let m = map_of(4, &["a", "b"]);
        let mut it = m.iter();
        assert_eq!(it.len(), 2);
        assert!(it.next().is_some());
        assert_eq!(it.len(), 1);
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());

        let mut c = m.cursor();
        while c.next(&m).is_some() {}
        assert!(c.next(&m).is_none());
        assert_eq!(c, Cursor { bucket: 4, slot: None });
    }

    /// Invariant: a cursor past the end of a shrunk layout returns `None`
    /// instead of indexing out of bounds.
    #[test]
    fn cursor_survives_foreign_layout() {
        let big = map_of(16, &["a", "b", "c", "d", "e", "f"]);
        let small = map_of(1, &["a"]);
        let mut c = big.cursor();
        while c.next(&big).is_some() {}
        assert!(c.next(&small).is_none());
    }

    #[test]
    fn into_values_in_iteration_order() {
        let m = map_of(6, &["k1", "k2", "k3"]);
        let values: Vec<usize> = m.into_values().collect();
        // k2 (1) sits in bucket 3, k1 (0) and k3 (2) chain in bucket 4.
        assert_eq!(values, vec![1, 0, 2]);
    }
}
