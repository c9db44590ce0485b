use log::debug;

use ivshard_core::models::{Entry, Interval};

use crate::index::{IntervalIndex, IterFind};

/// One shard of a larger interval-keyed collection.
///
/// A `Partition` is the sole owner of an [`IntervalIndex`] and exposes the operations a
/// collection runtime performs on a shard. Every operation that changes the contents
/// returns a new `Partition`; the receiver and its index stay valid and unchanged, so
/// readers holding an older snapshot never observe a partial update.
///
/// # Examples
///
/// ```
/// use ivshard_core::models::{Entry, Span};
/// use ivshard_index::Partition;
///
/// let shard = Partition::build(
///     vec![
///         Entry::new(Span::from((0u32, 10)), "a"),
///         Entry::new(Span::from((5, 15)), "b"),
///         Entry::new(Span::from((20, 25)), "c"),
///     ],
///     false,
/// );
/// let other = Partition::build(vec![Entry::new(Span::from((30u32, 40)), "d")], true);
///
/// let merged = shard.merge_partitions(&other);
/// assert_eq!(merged.len(), 4);
/// assert_eq!(merged.max_width(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<K, V>
where
    K: Interval,
{
    index: IntervalIndex<K, V>,
}

impl<K, V> Partition<K, V>
where
    K: Interval,
{
    /// Create a shard from its initial batch. See [`IntervalIndex::build`] for the
    /// meaning of `sorted`.
    pub fn build<E>(entries: E, sorted: bool) -> Self
    where
        E: IntoIterator<Item = Entry<K, V>>,
    {
        Partition {
            index: IntervalIndex::build(entries, sorted),
        }
    }

    /// All entries overlapping `range`, in key order.
    #[inline]
    pub fn get<'a, Q>(&'a self, range: &Q) -> IterFind<'a, K, V>
    where
        Q: Interval<Coord = K::Coord> + ?Sized,
    {
        self.index.query(range)
    }

    /// All entries, in key order.
    #[inline]
    pub fn get_all(&self) -> std::slice::Iter<'_, Entry<K, V>> {
        self.index.iter()
    }

    /// A new shard with only the entries satisfying `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
        K: Clone,
        V: Clone,
    {
        Partition {
            index: self.index.filter(predicate),
        }
    }

    /// Like [`filter`](Partition::filter), returning the predicate's first error.
    pub fn try_filter<P, E>(&self, predicate: P) -> Result<Self, E>
    where
        P: FnMut(&K, &V) -> Result<bool, E>,
        K: Clone,
        V: Clone,
    {
        Ok(Partition {
            index: self.index.try_filter(predicate)?,
        })
    }

    /// A new shard with `f` applied to every value. Keys are untouched.
    pub fn map_values<V2, F>(&self, f: F) -> Partition<K, V2>
    where
        F: FnMut(&V) -> V2,
        K: Clone,
    {
        Partition {
            index: self.index.map_values(f),
        }
    }

    /// Like [`map_values`](Partition::map_values), returning the mapping's first error.
    pub fn try_map_values<V2, F, E>(&self, f: F) -> Result<Partition<K, V2>, E>
    where
        F: FnMut(&V) -> Result<V2, E>,
        K: Clone,
    {
        Ok(Partition {
            index: self.index.try_map_values(f)?,
        })
    }

    /// A new shard with one more entry. This rebuilds the whole index; prefer
    /// [`multiput`](Partition::multiput) for more than one entry.
    pub fn put(&self, entry: Entry<K, V>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        self.multiput(std::iter::once(entry))
    }

    /// A new shard with all of `entries` added, rebuilt once.
    pub fn multiput<E>(&self, entries: E) -> Self
    where
        E: IntoIterator<Item = Entry<K, V>>,
        K: Clone,
        V: Clone,
    {
        Partition {
            index: self.index.insert(entries),
        }
    }

    /// Combine two shards into one, rebuilding once over the union.
    ///
    /// The result holds every entry of both inputs, duplicates included.
    pub fn merge_partitions(&self, other: &Self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        debug!(
            "Merging partitions of {} and {} entries",
            self.len(),
            other.len()
        );
        Partition {
            index: self.index.insert(other.index.iter().cloned()),
        }
    }

    /// Narrow the shard to the entries overlapping `range`.
    ///
    /// Query results come out in key order, so the new index skips the sort.
    pub fn filter_by_interval<Q>(&self, range: &Q) -> Self
    where
        Q: Interval<Coord = K::Coord> + ?Sized,
        K: Clone,
        V: Clone,
    {
        Partition {
            index: IntervalIndex::build(self.get(range).cloned(), true),
        }
    }

    /// The width of the widest key in the shard.
    #[inline]
    pub fn max_width(&self) -> K::Coord {
        self.index.max_width()
    }

    /// Number of entries in the shard.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the shard has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<K, V> Default for Partition<K, V>
where
    K: Interval,
{
    fn default() -> Self {
        Partition {
            index: IntervalIndex::default(),
        }
    }
}

impl<K, V> FromIterator<Entry<K, V>> for Partition<K, V>
where
    K: Interval,
{
    fn from_iter<T: IntoIterator<Item = Entry<K, V>>>(iter: T) -> Self {
        Self::build(iter, false)
    }
}
