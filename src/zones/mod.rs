//! Areas the player roams, with their level gates and encounter tables.

mod data;
mod progression;

pub use data::*;
pub use progression::{area_by_id, destination, unlocks_next_area, AreaMove};
