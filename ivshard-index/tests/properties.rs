use ivshard_core::models::{Coordinate, Entry, Interval, Span};
use ivshard_index::{IntervalIndex, Partition};
use proptest::prelude::*;

type Key = Span<u32>;

fn arb_span() -> impl Strategy<Value = Key> {
    (0u32..1_000, 0u32..120).prop_map(|(start, width)| Span {
        start,
        end: start + width,
    })
}

fn arb_entries() -> impl Strategy<Value = Vec<Entry<Key, u8>>> {
    prop::collection::vec((arb_span(), any::<u8>()), 0..64)
        .prop_map(|pairs| pairs.into_iter().map(Entry::from).collect())
}

fn sorted_pairs(entries: impl IntoIterator<Item = Entry<Key, u8>>) -> Vec<(Key, u8)> {
    let mut pairs: Vec<(Key, u8)> = entries.into_iter().map(Entry::into_parts).collect();
    pairs.sort();
    pairs
}

fn ordered<C: Coordinate>(a: C, b: C) -> Span<C> {
    if a <= b {
        Span { start: a, end: b }
    } else {
        Span { start: b, end: a }
    }
}

// covers negative spans and spans wider than i64::MAX
fn arb_signed_span() -> impl Strategy<Value = Span<i64>> {
    prop_oneof![
        (any::<i64>(), any::<i64>()).prop_map(|(a, b)| ordered(a, b)),
        (-1_000i64..1_000, 0i64..120).prop_map(|(start, width)| Span {
            start,
            end: start + width,
        }),
    ]
}

// quarter steps stay exact in an f64
fn arb_float_span() -> impl Strategy<Value = Span<f64>> {
    (-4_000i32..4_000, 0i32..480).prop_map(|(start, width)| Span {
        start: f64::from(start) / 4.0,
        end: f64::from(start + width) / 4.0,
    })
}

fn check_linear_scan<C: Coordinate>(
    entries: Vec<Entry<Span<C>, u8>>,
    range: Span<C>,
) -> Result<(), TestCaseError> {
    let index = IntervalIndex::build(entries.clone(), false);

    let found: Vec<(Span<C>, u8)> = index.query(&range).map(|e| (e.key, e.val)).collect();
    let mut expected: Vec<(Span<C>, u8)> = entries
        .into_iter()
        .filter(|e| e.key.start < range.end && range.start < e.key.end)
        .map(Entry::into_parts)
        .collect();
    expected.sort();

    let mut got = found.clone();
    got.sort();
    prop_assert_eq!(got, expected);
    prop_assert!(found.windows(2).all(|w| w[0].0 <= w[1].0));
    Ok(())
}

fn widest(entries: &[Entry<Key, u8>]) -> u32 {
    entries.iter().map(|e| e.key.width()).max().unwrap_or(0)
}

proptest! {
    #[test]
    fn query_matches_linear_scan(entries in arb_entries(), range in arb_span()) {
        let index = IntervalIndex::build(entries.clone(), false);

        let found: Vec<(Key, u8)> = index
            .query(&range)
            .map(|e| (e.key, e.val))
            .collect();
        let expected = sorted_pairs(
            entries
                .into_iter()
                .filter(|e| e.key.start < range.end && range.start < e.key.end),
        );

        prop_assert_eq!(sorted_pairs(found.iter().map(|&(k, v)| Entry::new(k, v))), expected);
        prop_assert!(found.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn query_matches_linear_scan_signed(
        entries in prop::collection::vec((arb_signed_span(), any::<u8>()), 0..64),
        range in arb_signed_span(),
    ) {
        check_linear_scan(entries.into_iter().map(Entry::from).collect(), range)?;
    }

    #[test]
    fn query_matches_linear_scan_i8(
        entries in prop::collection::vec(((any::<i8>(), any::<i8>()), any::<u8>()), 0..64),
        range in (any::<i8>(), any::<i8>()),
    ) {
        let entries = entries
            .into_iter()
            .map(|((a, b), val)| Entry::new(ordered(a, b), val))
            .collect();
        check_linear_scan(entries, ordered(range.0, range.1))?;
    }

    #[test]
    fn query_matches_linear_scan_float(
        entries in prop::collection::vec((arb_float_span(), any::<u8>()), 0..64),
        range in arb_float_span(),
    ) {
        check_linear_scan(entries.into_iter().map(Entry::from).collect(), range)?;
    }

    #[test]
    fn seek_matches_query_signed(
        entries in prop::collection::vec((arb_signed_span(), any::<u8>()), 0..64),
        starts in prop::collection::vec(-1_100i64..1_100, 1..16),
    ) {
        let index = IntervalIndex::build(entries.into_iter().map(Entry::from), false);
        let mut starts = starts;
        starts.sort();

        let mut cursor = 0;
        for start in starts {
            let range = Span { start, end: start + 10 };
            let sought: Vec<&Entry<Span<i64>, u8>> = index.seek(&range, &mut cursor).collect();
            let queried: Vec<&Entry<Span<i64>, u8>> = index.query(&range).collect();
            prop_assert_eq!(sought, queried);
        }
    }

    #[test]
    fn query_ignores_insertion_order(entries in arb_entries(), range in arb_span()) {
        let mut reversed = entries.clone();
        reversed.reverse();

        let a = IntervalIndex::build(entries, false);
        let b = IntervalIndex::build(reversed, false);

        prop_assert_eq!(
            sorted_pairs(a.query(&range).cloned()),
            sorted_pairs(b.query(&range).cloned())
        );
    }

    #[test]
    fn sorted_flag_is_equivalent(entries in arb_entries()) {
        let mut sorted = entries.clone();
        sorted.sort_by(|a, b| a.key.cmp(&b.key));

        prop_assert_eq!(
            IntervalIndex::build(entries, false).collect(),
            IntervalIndex::build(sorted, true).collect()
        );
    }

    #[test]
    fn max_width_tracks_entries(
        entries in arb_entries(),
        more in arb_entries(),
        threshold in 0u32..120,
    ) {
        let index = IntervalIndex::build(entries, false);
        prop_assert_eq!(index.max_width(), widest(index.entries()));

        let inserted = index.insert(more);
        prop_assert_eq!(inserted.max_width(), widest(inserted.entries()));

        let filtered = inserted.filter(|key, _| key.width() < threshold);
        prop_assert_eq!(filtered.max_width(), widest(filtered.entries()));
    }

    #[test]
    fn map_values_composes(entries in arb_entries()) {
        let index = IntervalIndex::build(entries, false);
        let f = |v: &u8| u16::from(*v) * 3;
        let g = |v: &u16| v.to_string();

        prop_assert_eq!(
            index.map_values(f).map_values(g),
            index.map_values(|v| g(&f(v)))
        );
    }

    #[test]
    fn merge_is_multiset_union(a in arb_entries(), b in arb_entries()) {
        let left = Partition::build(a.clone(), false);
        let right = Partition::build(b.clone(), false);
        let merged = left.merge_partitions(&right);

        prop_assert_eq!(merged.len(), a.len() + b.len());
        prop_assert_eq!(
            sorted_pairs(merged.get_all().cloned()),
            sorted_pairs(a.into_iter().chain(b))
        );
    }

    #[test]
    fn filter_is_idempotent(entries in arb_entries(), modulus in 1u8..8) {
        let index = IntervalIndex::build(entries, false);
        let pred = |_: &Key, v: &u8| v % modulus == 0;

        let once = index.filter(pred);
        prop_assert_eq!(once.filter(pred), once);
    }

    #[test]
    fn seek_matches_query(
        entries in arb_entries(),
        starts in prop::collection::vec(0u32..1_100, 1..16),
    ) {
        let index = IntervalIndex::build(entries, false);
        let mut starts = starts;
        starts.sort();

        let mut cursor = 0;
        for start in starts {
            let range = Span { start, end: start + 10 };
            let sought: Vec<&Entry<Key, u8>> = index.seek(&range, &mut cursor).collect();
            let queried: Vec<&Entry<Key, u8>> = index.query(&range).collect();
            prop_assert_eq!(sought, queried);
        }
    }

    #[test]
    fn filter_by_interval_matches_query(entries in arb_entries(), range in arb_span()) {
        let shard = Partition::build(entries, false);
        let window = shard.filter_by_interval(&range);

        let expected: Vec<&Entry<Key, u8>> = shard.get(&range).collect();
        let got: Vec<&Entry<Key, u8>> = window.get_all().collect();
        prop_assert_eq!(got, expected);
    }
}
