//! Physics and collision resolver
//!
//! The tricky part of the runner: one axis-aligned sweep per tick that
//! integrates gravity, lands the player on floor tiles without tunneling at
//! high fall speeds, and applies item/hazard side effects to the run state.

use super::catalog::{FloorKind, ItemKind};
use super::state::{Animation, GameEvent, GameState, Tile, TileKind};
use crate::consts::SCENE_HEIGHT;
use crate::tuning::Tuning;

/// Horizontal span overlap
#[inline]
pub fn overlaps_x(tile_left: f32, tile_right: f32, left: f32, right: f32) -> bool {
    tile_left < right && tile_right > left
}

/// Vertical span overlap against the tentative player extent
#[inline]
pub fn overlaps_y(tile_top: f32, tile_bottom: f32, next_top: f32, next_bottom: f32) -> bool {
    tile_top < next_bottom && tile_bottom > next_top
}

/// Single-tick crossing of a tile's top surface. Catches the landing even
/// when the fall speed would step straight through the tile.
#[inline]
pub fn dropping_through(current_bottom: f32, next_bottom: f32, tile_top: f32) -> bool {
    current_bottom <= tile_top && next_bottom >= tile_top
}

/// Advance the player one tick against the current tile stream.
///
/// Mutates player position/velocity, score, speed, special mode, and removes
/// consumed items. Tiles are evaluated in world order; every overlapping
/// effect tile applies, and the last solid tile wins the landing clamp.
pub fn resolve_step(state: &mut GameState, tuning: &Tuning) {
    let current_bottom = state.player.y;
    let tentative_bottom = current_bottom + state.player.velocity + tuning.gravity;
    let next_top = tentative_bottom - state.player.height;
    let (left, right) = (state.player.left(), state.player.right());

    let mut next_bottom = tentative_bottom;
    let mut landed = false;
    let mut consumed: Vec<usize> = Vec::new();

    for i in 0..state.world.tiles.len() {
        let tile = state.world.tiles[i].clone();
        if !overlaps_x(tile.left(), tile.right(), left, right) {
            continue;
        }

        let hit = overlaps_y(tile.top(), tile.bottom(), next_top, tentative_bottom);
        let dropping = dropping_through(current_bottom, tentative_bottom, tile.top());
        if !hit && !dropping {
            continue;
        }

        // Floors only stop the player when crossed from above; jumping up
        // through one from below passes clean.
        if tile.kind.is_floor() && dropping {
            next_bottom = tile.top();
            landed = true;
        }

        if hit {
            apply_effect(state, &tile, tuning);
            if tile.one_shot {
                consumed.push(i);
            }
        }
    }

    for i in consumed.into_iter().rev() {
        state.world.tiles.remove(i);
    }

    state.player.y = next_bottom;
    if landed {
        state.player.velocity = 0.0;
        state.player.jumping = false;
        state.player.double_jumping = false;
        if matches!(state.player.animation, Animation::Jump | Animation::DoubleJump) {
            state.player.animation = Animation::Run;
        }
    } else {
        state.player.velocity += tuning.gravity;
    }

    // Fell off the screen, or the score went negative: the run is over.
    if state.player.top() > SCENE_HEIGHT || state.score < 0 {
        state.player.alive = false;
        state.push_event(GameEvent::Died);
    }
}

/// Apply one tile's gameplay effect to the run state
fn apply_effect(state: &mut GameState, tile: &Tile, tuning: &Tuning) {
    match tile.kind {
        TileKind::Floor(FloorKind::Solid) => {}
        TileKind::Floor(FloorKind::Hazard) => {
            // Special mode grants immunity to floor damage
            if !state.special_active() {
                state.score -= tuning.floor_damage;
                state.push_event(GameEvent::Damage);
            }
        }
        TileKind::Item(kind) => {
            let delta = kind.score_delta(tuning, state.score, state.special_active());
            state.score += delta;
            if delta > 0 {
                state.push_event(GameEvent::Bonus);
            } else if delta < 0 {
                state.push_event(GameEvent::Damage);
            }

            match kind {
                ItemKind::Snail => {
                    state.speed = (state.speed - tuning.speed_step).max(tuning.min_speed);
                    state.player.animation_speed = (state.player.animation_speed
                        - tuning.animation_step)
                        .max(tuning.min_animation_speed);
                    state.push_event(GameEvent::Damage);
                }
                ItemKind::Bolt => {
                    state.speed = (state.speed + tuning.speed_step).min(tuning.max_speed);
                    state.player.animation_speed = (state.player.animation_speed
                        + tuning.animation_step)
                        .min(tuning.max_animation_speed);
                    state.push_event(GameEvent::Bonus);
                }
                ItemKind::Star => state.enter_special(tuning),
                _ => {}
            }
        }
    }
}
