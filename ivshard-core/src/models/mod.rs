pub mod entry;
pub mod interval;
pub mod region;
pub mod span;

// re-export for cleaner imports
pub use self::entry::Entry;
pub use self::interval::{Coordinate, Interval};
pub use self::region::Region;
pub use self::span::Span;
