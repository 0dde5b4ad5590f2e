//! Game state and core simulation types
//!
//! Everything a run needs to be reproduced from a seed lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{FloorKind, ItemKind};
use super::generate::initial_layout;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first input; physics is frozen
    Ready,
    /// Active gameplay
    Running,
    /// Run ended; waits for input to reset
    Dead,
}

/// Player animation modes the host maps onto spritesheet animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Idle,
    Run,
    Jump,
    DoubleJump,
    Special,
}

/// Audio/HUD triggers emitted by the simulation, drained by the host each
/// frame. Fire-and-forget: the sim never depends on their completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Jump,
    DoubleJump,
    Bonus,
    Damage,
    SpecialEnter,
    SpecialExit,
    Died,
}

/// The runner. X is fixed; the world scrolls underneath.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom edge in screen coordinates (y grows downward)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity; negative = rising
    pub velocity: f32,
    pub alive: bool,
    /// Airborne from a jump (cleared on landing)
    pub jumping: bool,
    pub double_jumping: bool,
    pub animation: Animation,
    pub animation_speed: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            y: ground_y(),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            velocity: 0.0,
            alive: true,
            jumping: false,
            double_jumping: false,
            animation: Animation::Idle,
            animation_speed: tuning.base_animation_speed,
        }
    }

    pub fn top(&self) -> f32 {
        self.y - self.height
    }

    pub fn left(&self) -> f32 {
        PLAYER_X - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        PLAYER_X + self.width / 2.0
    }

    /// Swap between the normal and special-mode hitbox, keeping the bottom
    /// edge anchored.
    pub fn set_special_hitbox(&mut self, special: bool) {
        if special {
            self.width = SPECIAL_WIDTH;
            self.height = SPECIAL_HEIGHT;
        } else {
            self.width = PLAYER_WIDTH;
            self.height = PLAYER_HEIGHT;
        }
    }
}

/// The runner's resting bottom edge on the ground floor row
pub fn ground_y() -> f32 {
    SCENE_HEIGHT - BLOCK_PX
}

/// Tile category tag, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Floor(FloorKind),
    Item(ItemKind),
}

impl TileKind {
    /// Floor tiles (solid and hazard alike) stop downward motion
    pub fn is_floor(self) -> bool {
        matches!(self, TileKind::Floor(_))
    }

    pub fn asset_key(self) -> &'static str {
        match self {
            TileKind::Floor(f) => f.asset_key(),
            TileKind::Item(i) => i.asset_key(),
        }
    }
}

/// One world tile, anchored at its bottom-left corner
/// (top = y - height, bottom = y).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Consumable: removed from the world on contact
    pub one_shot: bool,
}

impl Tile {
    pub fn floor(kind: FloorKind, x: f32, y: f32) -> Self {
        Self {
            kind: TileKind::Floor(kind),
            pos: Vec2::new(x, y),
            size: Vec2::new(BLOCK_PX, BLOCK_PX),
            one_shot: false,
        }
    }

    pub fn item(kind: ItemKind, x: f32, y: f32) -> Self {
        Self {
            kind: TileKind::Item(kind),
            pos: Vec2::new(x, y),
            size: Vec2::new(ITEM_SIZE, ITEM_SIZE),
            one_shot: true,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Ordered tile stream; insertion order is spawn order, which also serves as
/// the approximate x-order used by the rightmost-edge lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub tiles: Vec<Tile>,
}

impl World {
    /// Right edge of the tile nearest the viewport's right side
    /// (0.0 while empty, so generation kicks in immediately).
    pub fn rightmost_edge(&self) -> f32 {
        self.tiles.iter().map(Tile::right).fold(0.0, f32::max)
    }

    /// Shift every tile left by `dx`
    pub fn scroll(&mut self, dx: f32) {
        for tile in &mut self.tiles {
            tile.pos.x -= dx;
        }
    }

    /// Drop tiles whose right edge has scrolled past `min_x`
    pub fn cull(&mut self, min_x: f32) {
        self.tiles.retain(|t| t.right() >= min_x);
    }

    pub fn append(&mut self, tiles: Vec<Tile>) {
        self.tiles.extend(tiles);
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Generator RNG; all randomness flows through here
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Score; may go negative, at which point the run ends
    pub score: i64,
    /// Tick counter for the current run
    pub loop_count: u64,
    pub difficulty: u32,
    /// Scroll speed, in blocks per tick before scaling
    pub speed: f32,
    /// Ticks of special mode remaining (0 = inactive)
    pub special_ticks: u32,
    /// Speed/animation restored when special mode expires
    saved_speed: f32,
    saved_animation_speed: f32,
    /// Night/day crossfade factor, ping-pongs in [0, 1]
    pub night_blend: f32,
    night_rising: bool,
    /// Background parallax scroll offset
    pub bg_offset: f32,
    pub player: Player,
    pub world: World,
    /// Pending audio/HUD triggers, drained by the host
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state in the Ready phase, world pre-seeded with the
    /// deterministic safe layout.
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut world = World::default();
        world.append(initial_layout(tuning));
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            score: 0,
            loop_count: 0,
            difficulty: 0,
            speed: tuning.base_speed,
            special_ticks: 0,
            saved_speed: tuning.base_speed,
            saved_animation_speed: tuning.base_animation_speed,
            night_blend: 0.0,
            night_rising: true,
            bg_offset: 0.0,
            player: Player::new(tuning),
            world,
            events: Vec::new(),
        }
    }

    pub fn special_active(&self) -> bool {
        self.special_ticks > 0
    }

    /// Enter special mode, remembering the baselines to restore on exit.
    /// Re-entry only refreshes the countdown.
    pub fn enter_special(&mut self, tuning: &Tuning) {
        if !self.special_active() {
            self.saved_speed = self.speed;
            self.saved_animation_speed = self.player.animation_speed;
            self.speed = tuning.special_speed;
            self.player.animation_speed = tuning.special_animation_speed;
            self.player.set_special_hitbox(true);
            self.player.animation = Animation::Special;
            self.push_event(GameEvent::SpecialEnter);
        }
        self.special_ticks = tuning.special_duration;
    }

    /// The single flip back from special mode: upward impulse plus restored
    /// baselines.
    pub fn exit_special(&mut self, tuning: &Tuning) {
        self.speed = self.saved_speed;
        self.player.animation_speed = self.saved_animation_speed;
        self.player.set_special_hitbox(false);
        self.player.animation = Animation::Run;
        self.player.velocity = tuning.special_exit_velocity;
        self.push_event(GameEvent::SpecialExit);
    }

    /// Advance the night/day crossfade one tick
    pub fn advance_night_blend(&mut self, rate: f32) {
        if self.night_rising {
            self.night_blend += rate;
            if self.night_blend >= 1.0 {
                self.night_blend = 1.0;
                self.night_rising = false;
            }
        } else {
            self.night_blend -= rate;
            if self.night_blend <= 0.0 {
                self.night_blend = 0.0;
                self.night_rising = true;
            }
        }
    }

    /// Reset the run after death: deterministic safe layout, zeroed score and
    /// counters, baseline speeds, re-centered player. Returns straight to
    /// Running, never back to Ready. A repaired state indistinguishable from a
    /// brand new run (seed aside).
    pub fn reset_run(&mut self, tuning: &Tuning) {
        self.world.tiles.clear();
        self.world.append(initial_layout(tuning));
        self.score = 0;
        self.loop_count = 0;
        self.difficulty = 0;
        self.speed = tuning.base_speed;
        self.special_ticks = 0;
        self.saved_speed = tuning.base_speed;
        self.saved_animation_speed = tuning.base_animation_speed;
        self.night_blend = 0.0;
        self.night_rising = true;
        self.bg_offset = 0.0;
        self.player = Player::new(tuning);
        self.player.animation = Animation::Run;
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::Started);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending triggers (host calls once per frame)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_anchoring() {
        // Bottom-left anchor: top = y - height, bottom = y
        let tile = Tile::floor(FloorKind::Solid, 100.0, 576.0);
        assert_eq!(tile.top(), 576.0 - BLOCK_PX);
        assert_eq!(tile.bottom(), 576.0);
        assert_eq!(tile.left(), 100.0);
        assert_eq!(tile.right(), 100.0 + BLOCK_PX);
    }

    #[test]
    fn test_world_scroll_and_cull() {
        let mut world = World::default();
        world.append(vec![
            Tile::floor(FloorKind::Solid, 0.0, 576.0),
            Tile::floor(FloorKind::Solid, 500.0, 576.0),
        ]);
        world.scroll(200.0);
        assert_eq!(world.tiles[0].pos.x, -200.0);
        world.cull(-128.0);
        assert_eq!(world.tiles.len(), 1);
        assert_eq!(world.tiles[0].pos.x, 300.0);
    }

    #[test]
    fn test_rightmost_edge() {
        let mut world = World::default();
        assert_eq!(world.rightmost_edge(), 0.0);
        world.append(vec![Tile::floor(FloorKind::Solid, 1000.0, 576.0)]);
        assert_eq!(world.rightmost_edge(), 1000.0 + BLOCK_PX);
    }

    #[test]
    fn test_special_mode_saves_and_restores_baselines() {
        let t = Tuning::default();
        let mut state = GameState::new(1, &t);
        state.speed = 0.3;
        state.player.animation_speed = 0.2;

        state.enter_special(&t);
        assert!(state.special_active());
        assert_eq!(state.speed, t.special_speed);
        assert_eq!(state.player.width, SPECIAL_WIDTH);

        // Re-entry refreshes the countdown without clobbering the saved values
        state.special_ticks = 10;
        state.enter_special(&t);
        assert_eq!(state.special_ticks, t.special_duration);

        state.special_ticks = 0;
        state.exit_special(&t);
        assert_eq!(state.speed, 0.3);
        assert_eq!(state.player.animation_speed, 0.2);
        assert_eq!(state.player.width, PLAYER_WIDTH);
        assert_eq!(state.player.velocity, t.special_exit_velocity);
    }

    #[test]
    fn test_night_blend_ping_pong() {
        let t = Tuning::default();
        let mut state = GameState::new(1, &t);
        for _ in 0..3000 {
            state.advance_night_blend(0.001);
            assert!((0.0..=1.0).contains(&state.night_blend));
        }
    }
}
