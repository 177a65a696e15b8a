//! Territory records.

use serde::{Deserialize, Serialize};

/// Longest territory name kept, in characters.
pub const MAX_NAME_LEN: usize = 29;

/// Longest owner color kept, in characters.
pub const MAX_COLOR_LEN: usize = 9;

/// Minimum troops a territory needs to launch an attack.
pub const MIN_ATTACK_TROOPS: u32 = 2;

/// A named unit of the map, owned by a color and holding troops.
///
/// Owner comparison is exact and case-sensitive: two territories with the
/// same owner string are allies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    /// Display name.
    pub name: String,
    /// Controlling color.
    pub owner: String,
    /// Troops stationed here.
    pub troops: u32,
}

impl Territory {
    /// Build a territory, trimming and bounding its text fields.
    ///
    /// Returns `None` when the name or the owner is empty after trimming.
    #[must_use]
    pub fn new(name: &str, owner: &str, troops: u32) -> Option<Self> {
        let name = bounded(name, MAX_NAME_LEN);
        let owner = bounded(owner, MAX_COLOR_LEN);
        if name.is_empty() || owner.is_empty() {
            return None;
        }
        Some(Self {
            name,
            owner,
            troops,
        })
    }

    /// Whether both territories answer to the same color.
    #[must_use]
    pub fn is_allied_with(&self, other: &Self) -> bool {
        self.owner == other.owner
    }

    /// Whether this territory holds enough troops to attack.
    #[must_use]
    pub const fn can_attack(&self) -> bool {
        self.troops >= MIN_ATTACK_TROOPS
    }
}

/// Trim and truncate user text to at most `max` characters.
#[must_use]
pub fn bounded(text: &str, max: usize) -> String {
    text.trim().chars().take(max).collect()
}
