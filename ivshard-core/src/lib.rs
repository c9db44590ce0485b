//! Core models shared by the ivshard crates.
//!
//! This crate defines the [`Interval`](models::Interval) capability every index key must
//! provide, a concrete half-open key type ([`Span`](models::Span)), the `(key, value)`
//! [`Entry`](models::Entry) pair stored by an index, and the BED-like
//! [`Region`](models::Region) record used when loading shards from files.
//!
//! ```rust
//! use ivshard_core::models::{Interval, Span};
//!
//! let a = Span::new(0u32, 10).unwrap();
//! let b = Span::new(5u32, 15).unwrap();
//!
//! assert_eq!(a.width(), 10);
//! assert!(a.overlaps(&b));
//! ```

pub mod errors;
pub mod models;
pub mod utils;
