//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One synchronous tick per display frame, run to completion
//! - Seeded RNG only
//! - Stable iteration order (world order = spawn order)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod collision;
pub mod generate;
pub mod state;
pub mod tick;

pub use catalog::{weighted_item, FloorChoice, FloorKind, ItemKind, ITEM_WEIGHTS};
pub use collision::{dropping_through, overlaps_x, overlaps_y, resolve_step};
pub use generate::{floor_row_y, generate_slice, initial_layout};
pub use state::{
    ground_y, Animation, GameEvent, GamePhase, GameState, Player, Tile, TileKind, World,
};
pub use tick::{death_message, jump, tick, TickInput};
