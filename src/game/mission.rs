//! Secret missions and their victory predicates.
//!
//! A mission is drawn once per session from a fixed catalog and bound to the
//! player's color. Evaluation is pure: it only reads the registry.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::game::Registry;

/// Run length needed for [`MissionKind::Consecutive3`].
pub const CONSECUTIVE_TARGET: usize = 3;

/// Territories needed for [`MissionKind::MinTerritories4`].
pub const MIN_TERRITORIES_TARGET: usize = 4;

/// Troop total that must be exceeded for [`MissionKind::TroopThreshold`].
pub const TROOP_THRESHOLD: u64 = 2000;

/// Territories needed for [`MissionKind::ThreeColors`].
pub const THREE_COLORS_TARGET: usize = 3;

/// The color every player can be asked to wipe out.
pub const ELIMINATION_TARGET: &str = "Vermelho";

/// The catalog of missions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissionKind {
    /// Own three territories in a row, by index.
    #[serde(rename = "consecutive-3")]
    Consecutive3,
    /// No territory left under the red color.
    EliminateRed,
    /// Own at least four territories.
    #[serde(rename = "min-territories-4")]
    MinTerritories4,
    /// Hold more than 2000 troops in total.
    TroopThreshold,
    /// Conquer territories of three different colors.
    ///
    /// Scored as "own at least three territories"; the colors are not
    /// inspected.
    ThreeColors,
    /// Control a whole region.
    ///
    /// Scored as "own at least half of the map, rounded down".
    HalfMap,
}

impl MissionKind {
    /// All missions, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Consecutive3,
        Self::EliminateRed,
        Self::MinTerritories4,
        Self::TroopThreshold,
        Self::ThreeColors,
        Self::HalfMap,
    ];

    /// Stable kebab-case key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Consecutive3 => "consecutive-3",
            Self::EliminateRed => "eliminate-red",
            Self::MinTerritories4 => "min-territories-4",
            Self::TroopThreshold => "troop-threshold",
            Self::ThreeColors => "three-colors",
            Self::HalfMap => "half-map",
        }
    }

    /// Text shown to the player.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Consecutive3 => "Conquer 3 consecutive territories",
            Self::EliminateRed => "Eliminate every red (Vermelho) army from the map",
            Self::MinTerritories4 => "Control at least 4 territories",
            Self::TroopThreshold => "Hold more than 2000 troops in total",
            Self::ThreeColors => "Conquer territories of 3 different colors",
            Self::HalfMap => "Control every territory of a region",
        }
    }

    /// 1-based position in the catalog.
    #[must_use]
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).map_or(0, |i| i + 1)
    }

    /// Draw a mission uniformly from the catalog.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Whether the predicate holds for `player` on the current map.
    #[must_use]
    pub fn is_fulfilled(self, player: &str, registry: &Registry) -> bool {
        match self {
            Self::Consecutive3 => longest_run(player, registry) >= CONSECUTIVE_TARGET,
            Self::EliminateRed => !registry.territories().iter().any(|t| is_red(&t.owner)),
            Self::MinTerritories4 => registry.count_owned(player) >= MIN_TERRITORIES_TARGET,
            Self::TroopThreshold => registry.total_troops(player) > TROOP_THRESHOLD,
            Self::ThreeColors => registry.count_owned(player) >= THREE_COLORS_TARGET,
            Self::HalfMap => registry.count_owned(player) >= registry.len() / 2,
        }
    }
}

impl fmt::Display for MissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Error for an unrecognized mission key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mission '{0}' (expected 1-6 or one of: consecutive-3, eliminate-red, min-territories-4, troop-threshold, three-colors, half-map)")]
pub struct UnknownMission(pub String);

impl FromStr for MissionKind {
    type Err = UnknownMission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if let Ok(number) = wanted.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| UnknownMission(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|k| k.key() == wanted)
            .ok_or_else(|| UnknownMission(s.to_string()))
    }
}

/// A mission bound to one player's color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mission {
    /// Which objective.
    pub kind: MissionKind,
    /// The color it is evaluated for.
    pub player: String,
}

impl Mission {
    /// Bind a specific mission to `player`.
    #[must_use]
    pub fn new(kind: MissionKind, player: impl Into<String>) -> Self {
        Self {
            kind,
            player: player.into(),
        }
    }

    /// Draw a random mission for `player`.
    pub fn assign<R: Rng + ?Sized>(player: impl Into<String>, rng: &mut R) -> Self {
        let mission = Self::new(MissionKind::draw(rng), player);
        info!(player = %mission.player, mission = mission.kind.key(), "mission assigned");
        mission
    }

    /// Whether the mission is currently fulfilled. Never mutates.
    #[must_use]
    pub fn evaluate(&self, registry: &Registry) -> bool {
        self.kind.is_fulfilled(&self.player, registry)
    }

    /// Text shown to the player.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.kind.description()
    }
}

/// Only the two spellings the game has always accepted.
fn is_red(owner: &str) -> bool {
    owner == ELIMINATION_TARGET || owner == "vermelho"
}

/// Longest run of consecutive territories owned by `player`.
fn longest_run(player: &str, registry: &Registry) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for territory in registry.territories() {
        if territory.owner == player {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
