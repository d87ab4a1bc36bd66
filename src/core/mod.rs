//! Core game state, tables, configuration and the session loop.

pub mod combat_math;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game_data;
pub mod game_state;
pub mod session;
pub mod text;
pub mod weighted;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use game_data::*;
pub use game_state::*;
pub use session::*;
pub use text::*;
