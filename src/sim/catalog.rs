//! Tile and item catalog
//!
//! Category tags are explicit enums fixed at construction time; nothing is
//! ever inferred from asset identifiers. Spawn probabilities live in a single
//! weight table consumed by [`weighted_item`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Floor tile categories; both kinds stop downward motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorKind {
    /// Plain ground, safe to land on
    Solid,
    /// Spike row: lands like solid floor but damages on contact
    Hazard,
}

impl FloorKind {
    pub fn asset_key(self) -> &'static str {
        match self {
            FloorKind::Solid => "tile-grass",
            FloorKind::Hazard => "tile-spikes",
        }
    }
}

/// One entry of the floor catalog a slice level indexes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorChoice {
    Empty,
    Solid,
    Hazard,
}

impl FloorChoice {
    pub const ALL: [FloorChoice; 3] = [FloorChoice::Empty, FloorChoice::Solid, FloorChoice::Hazard];

    /// Uniform draw from the floor catalog
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn kind(self) -> Option<FloorKind> {
        match self {
            FloorChoice::Empty => None,
            FloorChoice::Solid => Some(FloorKind::Solid),
            FloorChoice::Hazard => Some(FloorKind::Hazard),
        }
    }
}

/// Collectible/hazard item categories. All items are one-shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Fixed score bonus
    Coin,
    /// Score bonus that scales with the current score
    Gem,
    /// Junk food: heavy damage, but a treat during special mode
    Hamburger,
    /// Slows scroll and animation speed (floored)
    Snail,
    /// Speeds up scroll and animation speed (capped)
    Bolt,
    /// Enters special mode
    Star,
}

impl ItemKind {
    pub fn asset_key(self) -> &'static str {
        match self {
            ItemKind::Coin => "item-coin",
            ItemKind::Gem => "item-gem",
            ItemKind::Hamburger => "item-hamburger",
            ItemKind::Snail => "item-snail",
            ItemKind::Bolt => "item-bolt",
            ItemKind::Star => "item-star",
        }
    }

    /// Score delta when collected. Positive = bonus, negative = damage.
    /// Hamburgers flip to bonus-only while special mode is active.
    pub fn score_delta(self, tuning: &Tuning, score: i64, special: bool) -> i64 {
        match self {
            ItemKind::Coin => tuning.coin_bonus,
            ItemKind::Gem => tuning.gem_base_bonus + score.max(0) / 10,
            ItemKind::Hamburger => {
                if special {
                    tuning.hamburger_special_bonus
                } else {
                    -tuning.hamburger_damage
                }
            }
            ItemKind::Snail | ItemKind::Bolt | ItemKind::Star => 0,
        }
    }
}

/// Spawn weights for one item draw. The dominant `None` weight keeps items
/// sparse.
pub const ITEM_WEIGHTS: [(Option<ItemKind>, u32); 7] = [
    (None, 400),
    (Some(ItemKind::Coin), 20),
    (Some(ItemKind::Hamburger), 10),
    (Some(ItemKind::Gem), 6),
    (Some(ItemKind::Snail), 5),
    (Some(ItemKind::Bolt), 5),
    (Some(ItemKind::Star), 2),
];

/// Weighted draw from [`ITEM_WEIGHTS`].
pub fn weighted_item<R: Rng>(rng: &mut R) -> Option<ItemKind> {
    let total: u32 = ITEM_WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut roll = rng.random_range(0..total);
    for (item, weight) in ITEM_WEIGHTS {
        if roll < weight {
            return item;
        }
        roll -= weight;
    }
    // Unreachable: roll < total by construction
    None
}
