//! Error types for the conquest engine.

use thiserror::Error;

/// Why an attack was refused before any dice were rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackRejection {
    /// Attacker and defender are the same territory.
    SelfAttack,
    /// Both territories belong to the same color.
    AlliedTerritories,
    /// The attacker holds fewer than two troops.
    InsufficientTroops {
        /// Troops on the attacking territory.
        troops: u32,
    },
}

impl std::fmt::Display for AttackRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfAttack => write!(f, "a territory cannot attack itself"),
            Self::AlliedTerritories => write!(f, "allied territories cannot attack each other"),
            Self::InsufficientTroops { troops } => {
                write!(f, "the attacker needs at least 2 troops (has {troops})")
            }
        }
    }
}

/// Errors produced by the engine.
#[derive(Debug, Error)]
pub enum WarError {
    /// Registry requested with a non-positive territory count.
    #[error("territory count must be greater than zero (got {0})")]
    InvalidSize(i64),

    /// A territory index outside `0..len`.
    #[error("territory {index} is out of range (valid: 0..{len})")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of territories in the registry.
        len: usize,
    },

    /// A 1-based territory selection outside `1..=len`.
    #[error("invalid selection {selection}: choose between 1 and {len}")]
    InvalidSelection {
        /// The rejected selection, as typed.
        selection: i64,
        /// Number of territories in the registry.
        len: usize,
    },

    /// The attack failed validation; nothing was mutated.
    #[error("invalid attack: {0}")]
    InvalidAttack(AttackRejection),

    /// Storage for the registry could not be reserved.
    #[error("could not allocate storage for {0} territories")]
    AllocationFailure(usize),

    /// A territory record could not be registered.
    #[error("invalid territory record #{}: {reason}", .index + 1)]
    InvalidRecord {
        /// 0-based position of the record.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The player's color was blank after trimming.
    #[error("player color must not be empty")]
    BlankPlayer,

    /// The input/output collaborator failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A roster file could not be parsed.
    #[error("roster error: {0}")]
    Roster(#[from] serde_json::Error),
}

impl WarError {
    /// Whether the battle loop can re-prompt after this error.
    ///
    /// Recoverable errors never mutate state and never consume a turn.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::InvalidSelection { .. } | Self::InvalidAttack(_)
        )
    }
}

impl From<AttackRejection> for WarError {
    fn from(reason: AttackRejection) -> Self {
        Self::InvalidAttack(reason)
    }
}

/// Result alias used throughout the crate.
pub type WarResult<T> = Result<T, WarError>;
