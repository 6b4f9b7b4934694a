//! StrHashMap: string-keyed table with separate chaining and manual resize.

use crate::error::TableError;
use crate::hasher::{KeyHasher, MurmurMix};
use crate::iter::{Cursor, IntoValues, Iter};
use core::fmt;

/// Bucket count used by [`StrHashMap::with_default_capacity`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor past which callers are advised to call [`StrHashMap::resize`].
/// The table never acts on it by itself.
pub const RECOMMENDED_MAX_LOAD: f64 = 0.8;

/// One stored association: an owned copy of the key and the caller's value.
#[derive(Debug)]
pub struct Entry<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) hash: u32,
}

impl<V> Entry<V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }
}

pub(crate) type Chain<V> = Vec<Entry<V>>;

/// A fixed-width array of collision chains keyed by strings.
///
/// Keys are copied on insert. Values are held as given and handed back on
/// [`unset`](Self::unset); the table never clones or inspects them. With
/// `V = &T` the table behaves like a map of borrowed, caller-owned values.
///
/// `set` does not look for an existing entry with the same key: it always
/// appends to the tail of the key's chain. Lookups return the first match
/// from the head, so a later duplicate stays hidden until the earlier one is
/// removed.
pub struct StrHashMap<V, H = MurmurMix> {
    hasher: H,
    buckets: Vec<Chain<V>>,
    len: usize,
}

impl<V> StrHashMap<V> {
    /// Creates a table with `capacity` buckets and the default hasher.
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_hasher(capacity, MurmurMix)
    }

    pub fn with_default_capacity() -> Result<Self, TableError> {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V, H> StrHashMap<V, H>
where
    H: KeyHasher,
{
    pub fn with_hasher(capacity: usize, hasher: H) -> Result<Self, TableError> {
        let capacity = capacity.max(1);
        let buckets = alloc_buckets(capacity)?;
        log::debug!("str-hashmap: allocated {} buckets", capacity);
        Ok(Self {
            hasher,
            buckets,
            len: 0,
        })
    }

    #[inline]
    fn make_hash(&self, key: &str) -> u32 {
        self.hasher.hash(key.as_bytes())
    }

    #[inline]
    fn bucket_of(&self, hash: u32) -> usize {
        bucket_index(hash, self.buckets.len())
    }

    /// Position of the first entry matching `key`: `(bucket, slot)`.
    fn locate(&self, key: &str) -> Option<(usize, usize)> {
        let hash = self.make_hash(key);
        let bucket = self.bucket_of(hash);
        let slot = self.buckets[bucket]
            .iter()
            .position(|e| e.hash == hash && e.key == key)?;
        Some((bucket, slot))
    }

    /// Number of live entries, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// `len / capacity` as a floating-point ratio.
    pub fn load(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// True once `load()` has reached `threshold`. Only reports; call
    /// [`resize`](Self::resize) to act on it.
    pub fn needs_resize(&self, threshold: f64) -> bool {
        self.load() >= threshold
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Appends `key -> value` to the tail of the key's chain.
    ///
    /// On error nothing has been stored and `len` is unchanged.
    pub fn set(&mut self, key: &str, value: V) -> Result<(), TableError> {
        let hash = self.make_hash(key);
        let bucket = self.bucket_of(hash);

        let mut owned = String::new();
        owned.try_reserve_exact(key.len())?;
        owned.push_str(key);

        let chain = &mut self.buckets[bucket];
        chain.try_reserve(1)?;
        if !chain.is_empty() {
            log::trace!(
                "str-hashmap: bucket {} chain grows to {}",
                bucket,
                chain.len() + 1
            );
        }
        chain.push(Entry {
            key: owned,
            value,
            hash,
        });
        self.len += 1;
        Ok(())
    }

    /// First entry matching `key`, scanning its chain from the head.
    pub fn find_entry(&self, key: &str) -> Option<&Entry<V>> {
        let (bucket, slot) = self.locate(key)?;
        self.buckets[bucket].get(slot)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find_entry(key).map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let (bucket, slot) = self.locate(key)?;
        self.buckets[bucket].get_mut(slot).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Removes the first entry matching `key` and returns its value.
    ///
    /// Later entries in the same chain move up one place, so a removed head
    /// is replaced by its successor.
    pub fn unset(&mut self, key: &str) -> Option<V> {
        let (bucket, slot) = self.locate(key)?;
        let entry = self.buckets[bucket].remove(slot);
        self.len -= 1;
        log::trace!("str-hashmap: removed slot {} of bucket {}", slot, bucket);
        Some(entry.value)
    }

    /// Length of the chain `key` hashes into, whether or not `key` is present.
    pub fn chain_len(&self, key: &str) -> usize {
        let bucket = self.bucket_of(self.make_hash(key));
        self.buckets[bucket].len()
    }

    /// Chain length of every bucket, in bucket order.
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Vec::len)
    }

    /// Doubles the bucket count and rehashes every entry into it.
    ///
    /// Entries are moved in iteration order and appended to their new
    /// chains, so entries that still share a bucket keep their relative
    /// order. Every allocation happens before the first entry moves: on
    /// error the table is untouched.
    pub fn resize(&mut self) -> Result<(), TableError> {
        let capacity = self.buckets.len();
        let doubled = capacity
            .checked_mul(2)
            .ok_or(TableError::CapacityOverflow { capacity })?;
        self.rehash(doubled)?;
        log::debug!(
            "str-hashmap: resized {} -> {} buckets, {} entries rehashed",
            capacity,
            doubled,
            self.len
        );
        Ok(())
    }

    pub(crate) fn rehash(&mut self, capacity: usize) -> Result<(), TableError> {
        let mut sizes: Vec<usize> = Vec::new();
        sizes.try_reserve_exact(capacity)?;
        sizes.resize(capacity, 0);
        for entry in self.iter() {
            sizes[bucket_index(entry.hash, capacity)] += 1;
        }

        let mut buckets = alloc_buckets(capacity)?;
        for (chain, &size) in buckets.iter_mut().zip(&sizes) {
            chain.try_reserve_exact(size)?;
        }

        let old = core::mem::replace(&mut self.buckets, buckets);
        for entry in old.into_iter().flatten() {
            let bucket = bucket_index(entry.hash, capacity);
            self.buckets[bucket].push(entry);
        }
        Ok(())
    }

    /// Borrowing iterator in bucket order, head to tail within each chain.
    ///
    /// The borrow keeps the table from being mutated mid-traversal:
    ///
    /// ```compile_fail
    /// use str_hashmap::StrHashMap;
    ///
    /// let mut map = StrHashMap::new(4).unwrap();
    /// map.set("a", 1).unwrap();
    /// for entry in map.iter() {
    ///     map.unset(entry.key());
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, V, H> {
        Iter::new(self)
    }

    /// Detached traversal position; see [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        Cursor::new()
    }

    /// Consumes the table, handing every value back in iteration order.
    pub fn into_values(self) -> IntoValues<V> {
        IntoValues::new(self.buckets)
    }

    pub(crate) fn buckets(&self) -> &[Chain<V>] {
        &self.buckets
    }
}

impl<'a, V, H> IntoIterator for &'a StrHashMap<V, H>
where
    H: KeyHasher,
{
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, H> fmt::Debug for StrHashMap<V, H>
where
    V: fmt::Debug,
    H: KeyHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|e| (e.key(), e.value())))
            .finish()
    }
}

#[inline]
fn bucket_index(hash: u32, capacity: usize) -> usize {
    hash as usize % capacity
}

fn alloc_buckets<V>(capacity: usize) -> Result<Vec<Chain<V>>, TableError> {
    let mut buckets = Vec::new();
    buckets.try_reserve_exact(capacity)?;
    buckets.resize_with(capacity, Vec::new);
    Ok(buckets)
}
