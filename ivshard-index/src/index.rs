use log::debug;
use num_traits::{Bounded, Zero};

use ivshard_core::models::{Coordinate, Entry, Interval};

/// An immutable, sorted interval index for overlap queries.
///
/// Entries are kept sorted by key together with the width of the widest key
/// (`max_width`). A query binary searches for the first entry that could reach the
/// query range, which is any entry starting at or after `range.start - max_width`,
/// then scans forward until entries start past the range, checking the exact overlap
/// predicate on the way. This is the BITS approach from
/// <https://academic.oup.com/bioinformatics/article/29/1/1/273289>, without the
/// separate start/end arrays.
///
/// No operation mutates an index in place. [`insert`](IntervalIndex::insert),
/// [`filter`](IntervalIndex::filter) and [`map_values`](IntervalIndex::map_values)
/// each return a new index, and every rebuild re-sorts from scratch. Callers should
/// batch inserts: inserting one entry at a time costs `O(n log n)` per call.
///
/// # Examples
///
/// ```
/// use ivshard_core::models::{Entry, Span};
/// use ivshard_index::IntervalIndex;
///
/// let index = IntervalIndex::build(
///     vec![
///         Entry::new(Span::from((0u32, 10)), "a"),
///         Entry::new(Span::from((20, 25)), "c"),
///         Entry::new(Span::from((5, 15)), "b"),
///     ],
///     false,
/// );
/// assert_eq!(index.max_width(), 10);
///
/// let hits: Vec<&str> = index.query(&Span::from((8, 12))).map(|e| e.val).collect();
/// assert_eq!(hits, vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalIndex<K, V>
where
    K: Interval,
{
    /// Entries sorted by key
    entries: Vec<Entry<K, V>>,
    /// The width of the widest key
    max_width: K::Coord,
}

impl<K, V> IntervalIndex<K, V>
where
    K: Interval,
{
    /// Create a new index from any collection of entries.
    ///
    /// With `sorted == false` the entries are stably sorted by key first. With
    /// `sorted == true` the caller guarantees they already are: this is not checked,
    /// and queries over unsorted entries return unspecified results.
    /// ```
    /// use ivshard_core::models::{Entry, Span};
    /// use ivshard_index::IntervalIndex;
    ///
    /// let data = (0u32..20).step_by(5)
    ///     .map(|x| Entry::new(Span::from((x, x + 10)), true))
    ///     .collect::<Vec<_>>();
    /// let index = IntervalIndex::build(data, true);
    /// assert_eq!(index.len(), 4);
    /// ```
    pub fn build<E>(entries: E, sorted: bool) -> Self
    where
        E: IntoIterator<Item = Entry<K, V>>,
    {
        let mut entries: Vec<Entry<K, V>> = entries.into_iter().collect();
        if !sorted {
            entries.sort_by(|a, b| a.key.cmp(&b.key));
        }
        Self::from_sorted(entries)
    }

    /// The only constructor. `entries` must already be sorted by key.
    fn from_sorted(entries: Vec<Entry<K, V>>) -> Self {
        let max_width = Self::widest(&entries);
        debug!(
            "Built interval index over {} entries (max width {:?})",
            entries.len(),
            max_width
        );
        IntervalIndex { entries, max_width }
    }

    fn widest(entries: &[Entry<K, V>]) -> K::Coord {
        let mut max_width = K::Coord::zero();
        for entry in entries {
            let width = entry.key.width();
            if width > max_width {
                max_width = width;
            }
        }
        max_width
    }

    /// Find all entries whose key overlaps `range`, in key order.
    ///
    /// The returned iterator is lazy and can be cloned to restart the scan. Calling
    /// `query` again produces a fresh scan.
    /// ```
    /// use ivshard_core::models::{Entry, Span};
    /// use ivshard_index::IntervalIndex;
    ///
    /// let index = IntervalIndex::build((0u32..100).step_by(5)
    ///     .map(|x| Entry::new(Span::from((x, x + 2)), true)), true);
    /// assert_eq!(index.query(&Span::from((5, 11))).count(), 2);
    /// ```
    #[inline]
    pub fn query<'a, Q>(&'a self, range: &Q) -> IterFind<'a, K, V>
    where
        Q: Interval<Coord = K::Coord> + ?Sized,
    {
        let off = self.lower_bound(range.start());
        IterFind {
            inner: self.entries[off..].iter(),
            start: range.start(),
            stop: range.end(),
        }
    }

    /// Count all entries whose key overlaps `range`.
    #[inline]
    pub fn count<Q>(&self, range: &Q) -> usize
    where
        Q: Interval<Coord = K::Coord> + ?Sized,
    {
        self.query(range).count()
    }

    /// Find all entries that overlap `range`, for queries issued in ascending start
    /// order. Instead of binary searching every time, it walks forward from the
    /// position reached by the previous call. A reference to a cursor must be passed
    /// in and reused for the next query; the index itself stays shared and immutable.
    /// ```
    /// use ivshard_core::models::{Entry, Span};
    /// use ivshard_index::IntervalIndex;
    ///
    /// let index = IntervalIndex::build((0u32..100).step_by(5)
    ///     .map(|x| Entry::new(Span::from((x, x + 2)), true)), true);
    /// let mut cursor = 0;
    /// for entry in index.iter() {
    ///     assert_eq!(index.seek(&entry.key, &mut cursor).count(), 1);
    /// }
    /// ```
    pub fn seek<'a, Q>(&'a self, range: &Q, cursor: &mut usize) -> IterFind<'a, K, V>
    where
        Q: Interval<Coord = K::Coord> + ?Sized,
    {
        let Some(floor) = self.floor(range.start()) else {
            *cursor = 0;
            return IterFind {
                inner: self.entries.iter(),
                start: range.start(),
                stop: range.end(),
            };
        };

        // the cursor may not skip past any entry starting at or after `floor`
        if *cursor == 0
            || *cursor > self.entries.len()
            || self.entries[*cursor - 1].key.start() >= floor
        {
            *cursor = self.lower_bound(range.start());
        }

        while *cursor < self.entries.len() && self.entries[*cursor].key.start() < floor {
            *cursor += 1;
        }

        IterFind {
            inner: self.entries[*cursor..].iter(),
            start: range.start(),
            stop: range.end(),
        }
    }

    /// The smallest start a key overlapping a range beginning at `start` can have,
    /// or `None` when every entry has to be scanned.
    ///
    /// A key starting before `start - max_width` ends before `start`. That only
    /// holds while `max_width` is exact: once it reaches `Coord::max_value()` the
    /// widest key may have been clamped.
    #[inline]
    fn floor(&self, start: K::Coord) -> Option<K::Coord> {
        if self.max_width >= K::Coord::max_value() {
            return None;
        }
        Some(start.saturating_sub(self.max_width))
    }

    /// Index of the first entry that could overlap a range beginning at `start`.
    #[inline]
    fn lower_bound(&self, start: K::Coord) -> usize {
        match self.floor(start) {
            Some(floor) => self.entries.partition_point(|e| e.key.start() < floor),
            None => 0,
        }
    }

    /// Return a new index holding the existing entries plus `new_entries`.
    ///
    /// This is a full rebuild: the concatenation is re-sorted and `max_width`
    /// recomputed. Among equal keys, existing entries stay ahead of new ones.
    pub fn insert<E>(&self, new_entries: E) -> Self
    where
        E: IntoIterator<Item = Entry<K, V>>,
        K: Clone,
        V: Clone,
    {
        let new_entries = new_entries.into_iter();
        let mut entries = Vec::with_capacity(self.entries.len() + new_entries.size_hint().0);
        entries.extend(self.entries.iter().cloned());
        let existing = entries.len();
        entries.extend(new_entries);
        debug!(
            "Rebuilding interval index: {} existing + {} new entries",
            existing,
            entries.len() - existing
        );
        Self::build(entries, false)
    }

    /// Return a new index with only the entries satisfying `predicate`.
    ///
    /// Order is preserved and `max_width` is recomputed over what remains.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&K, &V) -> bool,
        K: Clone,
        V: Clone,
    {
        let entries = self
            .entries
            .iter()
            .filter(|e| predicate(&e.key, &e.val))
            .cloned()
            .collect();
        Self::from_sorted(entries)
    }

    /// Like [`filter`](IntervalIndex::filter) with a fallible predicate. The first
    /// error stops the scan and is returned unchanged.
    pub fn try_filter<P, E>(&self, mut predicate: P) -> Result<Self, E>
    where
        P: FnMut(&K, &V) -> Result<bool, E>,
        K: Clone,
        V: Clone,
    {
        let mut entries = Vec::new();
        for entry in &self.entries {
            if predicate(&entry.key, &entry.val)? {
                entries.push(entry.clone());
            }
        }
        Ok(Self::from_sorted(entries))
    }

    /// Return a new index with `f` applied to every value. Keys, order and
    /// `max_width` are untouched.
    pub fn map_values<V2, F>(&self, mut f: F) -> IntervalIndex<K, V2>
    where
        F: FnMut(&V) -> V2,
        K: Clone,
    {
        let entries = self
            .entries
            .iter()
            .map(|e| Entry::new(e.key.clone(), f(&e.val)))
            .collect();
        IntervalIndex {
            entries,
            max_width: self.max_width,
        }
    }

    /// Like [`map_values`](IntervalIndex::map_values) with a fallible mapping. The
    /// first error is returned unchanged.
    pub fn try_map_values<V2, F, E>(&self, mut f: F) -> Result<IntervalIndex<K, V2>, E>
    where
        F: FnMut(&V) -> Result<V2, E>,
        K: Clone,
    {
        let entries = self
            .entries
            .iter()
            .map(|e| Ok(Entry::new(e.key.clone(), f(&e.val)?)))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(IntervalIndex {
            entries,
            max_width: self.max_width,
        })
    }

    /// All entries, in key order.
    pub fn collect(&self) -> Vec<Entry<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.entries.clone()
    }

    /// Borrow all entries, in key order.
    #[inline]
    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// Return an iterator over all entries, in key order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<K, V>> {
        self.entries.iter()
    }

    /// Consume the index, returning its entries in key order.
    #[inline]
    pub fn into_entries(self) -> Vec<Entry<K, V>> {
        self.entries
    }

    /// The width of the widest key, or zero for an empty index. Saturates at
    /// `Coord::max_value()`.
    #[inline]
    pub fn max_width(&self) -> K::Coord {
        self.max_width
    }

    /// Get the number of entries in the index
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty (i.e. has no entries)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for IntervalIndex<K, V>
where
    K: Interval,
{
    fn default() -> Self {
        IntervalIndex {
            entries: Vec::new(),
            max_width: K::Coord::zero(),
        }
    }
}

impl<K, V> FromIterator<Entry<K, V>> for IntervalIndex<K, V>
where
    K: Interval,
{
    fn from_iter<T: IntoIterator<Item = Entry<K, V>>>(iter: T) -> Self {
        Self::build(iter, false)
    }
}

/// An iterator over the entries of an [`IntervalIndex`] that overlap a query range.
///
/// This struct is created by [`query`](IntervalIndex::query) and
/// [`seek`](IntervalIndex::seek). Cloning it restarts from the same position.
#[derive(Debug)]
pub struct IterFind<'a, K, V>
where
    K: Interval,
{
    inner: std::slice::Iter<'a, Entry<K, V>>,
    start: K::Coord,
    stop: K::Coord,
}

impl<K, V> Clone for IterFind<'_, K, V>
where
    K: Interval,
{
    fn clone(&self) -> Self {
        IterFind {
            inner: self.inner.clone(),
            start: self.start,
            stop: self.stop,
        }
    }
}

impl<'a, K, V> Iterator for IterFind<'a, K, V>
where
    K: Interval,
{
    type Item = &'a Entry<K, V>;

    #[inline]
    // entry.start < stop && entry.end > start
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.inner.next() {
            if entry.key.start() >= self.stop {
                self.inner = Default::default();
                break;
            }
            if self.start < entry.key.end() {
                return Some(entry);
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<K, V> IntoIterator for IntervalIndex<K, V>
where
    K: Interval,
{
    type Item = Entry<K, V>;
    type IntoIter = ::std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a IntervalIndex<K, V>
where
    K: Interval,
{
    type Item = &'a Entry<K, V>;
    type IntoIter = std::slice::Iter<'a, Entry<K, V>>;

    fn into_iter(self) -> std::slice::Iter<'a, Entry<K, V>> {
        self.entries.iter()
    }
}
