//! Game layer for the conquest engine.
//!
//! Implements the rules:
//! - Territories and the fixed-size registry that owns them
//! - Dice combat between two territories
//! - Secret missions and their victory predicates
//! - The session context and its battle loop

mod combat;
mod invariants;
mod mission;
mod registry;
mod session;
mod territory;

pub use combat::{
    AttackOutcome, DIE_FACES, Rolls, Side, resolve_attack, resolve_with_rolls, validate_attack,
};
pub use invariants::{InvariantViolation, check_invariants, check_outcome};
pub use mission::{
    CONSECUTIVE_TARGET, ELIMINATION_TARGET, MIN_TERRITORIES_TARGET, Mission, MissionKind,
    THREE_COLORS_TARGET, TROOP_THRESHOLD, UnknownMission,
};
pub use registry::Registry;
pub use session::{
    BattleEnd, BattleIo, BattlePhase, BattleReport, GameMode, Role, Session, SessionConfig,
};
pub use territory::{MAX_COLOR_LEN, MAX_NAME_LEN, MIN_ATTACK_TROOPS, Territory, bounded};
