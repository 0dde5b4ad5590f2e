//! Data-driven game balance
//!
//! Every gameplay number that designers might want to nudge lives here, with
//! defaults matching the shipped balance. A JSON override can be loaded at
//! startup (LocalStorage or a bundled file on the host side).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration per tick (screen y grows downward)
    pub gravity: f32,

    /// Scroll speed at the start of a run
    pub base_speed: f32,
    /// Scroll speed ceiling reached by the difficulty ramp
    pub max_speed: f32,
    /// Scroll speed floor that slow-down items cannot go below
    pub min_speed: f32,
    /// Speed added at every ramp step
    pub speed_ramp: f32,
    /// Ticks between difficulty ramp steps
    pub ramp_interval: u64,

    /// Animation speed at the start of a run
    pub base_animation_speed: f32,
    pub max_animation_speed: f32,
    pub min_animation_speed: f32,
    /// Animation speed added at every ramp step
    pub animation_ramp: f32,

    /// Upward impulse for a simple jump (negative = up)
    pub jump_velocity: f32,
    /// Upward impulse for a double jump
    pub double_jump_velocity: f32,
    /// Reduced jump impulse while special mode is active
    pub special_jump_velocity: f32,
    /// Impulse applied once when special mode expires
    pub special_exit_velocity: f32,
    /// Special mode duration in ticks
    pub special_duration: u32,
    /// Calm scroll/animation baseline while special mode is active
    pub special_speed: f32,
    pub special_animation_speed: f32,

    /// Damage per tick while standing on a hazard floor
    pub floor_damage: i64,
    /// Damage for eating a hamburger
    pub hamburger_damage: i64,
    /// Bonus for a hamburger eaten during special mode
    pub hamburger_special_bonus: i64,
    /// Fixed bonus for a coin
    pub coin_bonus: i64,
    /// Base bonus for a gem; gems also scale with the current score
    pub gem_base_bonus: i64,

    /// Scroll/animation delta applied by snail and bolt items
    pub speed_step: f32,
    pub animation_step: f32,

    /// Item draws per generated slice
    pub max_items_per_slice: u32,
    /// Generate a new slice once the rightmost tile edge is closer than this
    /// to the viewport's right edge
    pub generation_threshold: f32,
    /// Tiles this far past the left edge are removed
    pub cull_margin: f32,

    /// Night/day blend advance per tick (ping-pongs between 0 and 1)
    pub night_blend_rate: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.4,

            base_speed: 0.1,
            max_speed: 0.5,
            min_speed: 0.05,
            speed_ramp: 1.0 / 64.0,
            ramp_interval: 200,

            base_animation_speed: 0.1,
            max_animation_speed: 0.25,
            min_animation_speed: 0.05,
            animation_ramp: 0.005,

            jump_velocity: -9.0,
            double_jump_velocity: -13.0,
            special_jump_velocity: -6.0,
            special_exit_velocity: -10.0,
            special_duration: 500,
            special_speed: 0.1,
            special_animation_speed: 0.1,

            floor_damage: 2,
            hamburger_damage: 200,
            hamburger_special_bonus: 100,
            coin_bonus: 50,
            gem_base_bonus: 100,

            speed_step: 0.05,
            animation_step: 0.025,

            max_items_per_slice: 4,
            generation_threshold: 256.0,
            cull_margin: 128.0,

            night_blend_rate: 0.0005,
        }
    }
}

impl Tuning {
    /// Parse a JSON override; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load an override from JSON, falling back to defaults on parse errors.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Bad tuning JSON ({e}), using defaults");
                Self::default()
            }
        }
    }
}
