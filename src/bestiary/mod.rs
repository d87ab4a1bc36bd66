//! Enemy types and the weighted encounter tables that spawn them.

mod data;

pub use data::{Bestiary, EnemyTag, EnemyType};
