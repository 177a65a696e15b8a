// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! War: a deterministic territorial-conquest engine.
//!
//! Territories owned by colored armies fight with a pair of dice until the
//! player fulfills a secret mission or gives up.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Battle loop (Session + BattleIo)  │
//! ├──────────────────┬──────────────────┤
//! │  Attack resolver │  Mission engine  │
//! ├──────────────────┴──────────────────┤
//! │        Territory registry           │
//! └─────────────────────────────────────┘
//! ```
//!
//! All randomness comes from one seeded generator owned by the session, so
//! a seed plus the player's selections replays a game exactly.

pub mod error;
pub mod game;
pub mod roster;

pub use error::{AttackRejection, WarError, WarResult};

// Re-export key game types at crate root for convenience
pub use game::{
    AttackOutcome, BattleEnd, BattleIo, BattleReport, GameMode, Mission, MissionKind, Registry,
    Rolls, Session, SessionConfig, Side, Territory,
};
