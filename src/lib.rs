//! Tile Runner - a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collision, world generation)
//! - `tuning`: Data-driven game balance
//! - `settings`: User preferences
//! - `audio`: Procedural sound effects mapped from sim events

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Fixed geometry constants
///
/// Everything tunable for balance lives in [`tuning::Tuning`]; these are the
/// scene/sprite dimensions the asset pack was authored against.
pub mod consts {
    /// Scene dimensions in pixels
    pub const SCENE_WIDTH: f32 = 1280.0;
    pub const SCENE_HEIGHT: f32 = 640.0;

    /// Source tile size before render scaling
    pub const BLOCK_SIZE: f32 = 32.0;
    /// Render scale applied to all sprites
    pub const SCALE: f32 = 2.0;
    /// World-space block size
    pub const BLOCK_PX: f32 = BLOCK_SIZE * SCALE;

    /// Columns per generated slice
    pub const SLICE_COLUMNS: u32 = 4;
    /// World-space width of one slice
    pub const SLICE_WIDTH: f32 = BLOCK_PX * SLICE_COLUMNS as f32;
    /// Vertical spacing between the three floor levels
    pub const LEVEL_SPACING: f32 = 160.0;

    /// Item sprite size (scaled)
    pub const ITEM_SIZE: f32 = 48.0;

    /// The runner's fixed horizontal center; the world scrolls, not the player
    pub const PLAYER_X: f32 = 120.0;
    /// Normal hitbox
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 74.0;
    /// Special-mode hitbox (wider, lower)
    pub const SPECIAL_WIDTH: f32 = 96.0;
    pub const SPECIAL_HEIGHT: f32 = 58.0;

    /// Background scroll fraction relative to tile scroll
    pub const PARALLAX: f32 = 0.2;
}

/// Horizontal scroll delta for one tick at the given speed
#[inline]
pub fn scroll_delta(speed: f32) -> f32 {
    consts::BLOCK_SIZE * consts::SCALE * speed
}
