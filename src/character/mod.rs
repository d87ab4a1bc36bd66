//! Character attributes, stats, leveling, and persistence.

pub mod attributes;
pub mod derived_stats;
pub mod progression;
pub mod save;

pub use attributes::*;
pub use derived_stats::*;
pub use progression::*;
pub use save::*;
