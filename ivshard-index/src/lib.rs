//! Interval index and shard partition for interval-keyed collections.
//!
//! This crate provides the per-shard indexing primitive beneath a partitioned collection
//! of interval-keyed records (e.g. genomic coordinate ranges). Each shard holds one
//! [`Partition`], which owns one immutable [`IntervalIndex`] and answers overlap queries
//! independently of every other shard.
//!
//! ## Features
//!
//! - **Overlap queries**: find every entry whose key overlaps a half-open range, in key order
//! - **Copy-on-write updates**: inserts, filters, value maps and merges return new instances
//! - **Thread-safe**: indices are plain immutable values and are `Send + Sync` whenever
//!   their keys and values are
//!
//! ## Quick Start
//!
//! ```rust
//! use ivshard_core::models::{Entry, Span};
//! use ivshard_index::Partition;
//!
//! let peaks = Partition::build(
//!     vec![
//!         Entry::new(Span::from((100u32, 200)), "peak1"),
//!         Entry::new(Span::from((150, 300)), "peak2"),
//!         Entry::new(Span::from((400, 500)), "peak3"),
//!     ],
//!     false,
//! );
//!
//! let hits: Vec<&str> = peaks.get(&Span::from((180, 250))).map(|e| e.val).collect();
//! assert_eq!(hits, vec!["peak1", "peak2"]);
//!
//! // updates produce a new shard and leave the old one intact
//! let more = peaks.put(Entry::new(Span::from((450, 460)), "peak4"));
//! assert_eq!(more.len(), 4);
//! assert_eq!(peaks.len(), 3);
//! ```

/// Sorted interval index with a max-width query bound.
///
/// See [`IntervalIndex`] for details.
pub mod index;

/// Shard wrapper around one index.
///
/// See [`Partition`] for details.
pub mod partition;

// re-exports
pub use self::index::{IntervalIndex, IterFind};
pub use self::partition::Partition;
