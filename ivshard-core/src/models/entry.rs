/// One `(key, value)` pair stored in an index.
///
/// Entries are not deduplicated anywhere: several entries may carry the same key,
/// or the same key and value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    pub key: K,
    pub val: V,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub fn new(key: K, val: V) -> Self {
        Entry { key, val }
    }

    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.val)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    #[inline]
    fn from((key, val): (K, V)) -> Self {
        Entry { key, val }
    }
}
