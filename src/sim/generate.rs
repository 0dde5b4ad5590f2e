//! Platform generator
//!
//! Produces one horizontal slice of the world at a time: up to three floor
//! rows (ground/mid/high) plus a sparse scattering of floating items. Pure
//! with respect to the world: the caller appends the returned tiles.

use rand::Rng;
use rand_pcg::Pcg32;

use super::catalog::{weighted_item, FloorChoice};
use super::state::Tile;
use crate::consts::*;
use crate::tuning::Tuning;

/// Bottom y of a floor row at the given level (0 = ground, 2 = high)
pub fn floor_row_y(level: u32) -> f32 {
    SCENE_HEIGHT - level as f32 * LEVEL_SPACING
}

/// Generate one slice starting at `x_offset`.
///
/// `floor_config` fixes the three level choices; `None` draws each level
/// uniformly from the floor catalog. Each non-empty level emits
/// [`SLICE_COLUMNS`] adjacent block-width floor tiles. `max_items`
/// independent draws then place weighted items above random floor rows;
/// items may float where no floor was emitted.
pub fn generate_slice(
    x_offset: f32,
    floor_config: Option<[FloorChoice; 3]>,
    max_items: u32,
    rng: &mut Pcg32,
) -> Vec<Tile> {
    let mut tiles = Vec::new();

    let config =
        floor_config.unwrap_or_else(|| std::array::from_fn(|_| FloorChoice::sample(rng)));

    for (level, choice) in config.iter().enumerate() {
        let Some(kind) = choice.kind() else { continue };
        let y = floor_row_y(level as u32);
        for col in 0..SLICE_COLUMNS {
            tiles.push(Tile::floor(kind, x_offset + col as f32 * BLOCK_PX, y));
        }
    }

    for _ in 0..max_items {
        let level = rng.random_range(0..3u32);
        let col = rng.random_range(0..SLICE_COLUMNS);
        let Some(kind) = weighted_item(rng) else { continue };
        // Anchored one block above the floor row, centered in its column
        let x = x_offset + col as f32 * BLOCK_PX + (BLOCK_PX - ITEM_SIZE) / 2.0;
        let y = floor_row_y(level) - BLOCK_PX;
        tiles.push(Tile::item(kind, x, y));
    }

    tiles
}

/// The deterministic floor-only layout every run starts from: solid ground,
/// no hazards, no items, covering the viewport plus the generation threshold.
pub fn initial_layout(tuning: &Tuning) -> Vec<Tile> {
    let span = SCENE_WIDTH + tuning.generation_threshold;
    let slices = (span / SLICE_WIDTH).ceil() as u32;
    let config = [FloorChoice::Solid, FloorChoice::Empty, FloorChoice::Empty];

    let mut tiles = Vec::new();
    for i in 0..slices {
        let x = i as f32 * SLICE_WIDTH;
        for col in 0..SLICE_COLUMNS {
            for (level, choice) in config.iter().enumerate() {
                let Some(kind) = choice.kind() else { continue };
                tiles.push(Tile::floor(
                    kind,
                    x + col as f32 * BLOCK_PX,
                    floor_row_y(level as u32),
                ));
            }
        }
    }
    tiles
}
