//! Item system: catalog, loot tables, equipment and inventory.

pub mod catalog;
pub mod drops;
pub mod equipment;
pub mod inventory;
pub mod types;

pub use catalog::*;
pub use drops::*;
pub use equipment::*;
pub use inventory::*;
pub use types::*;
