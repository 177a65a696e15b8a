//! Attack resolution.
//!
//! One attack is one pair of six-sided dice. A strictly higher attack roll
//! conquers the defender and moves half of the attacking troops in; anything
//! else costs the attacker a single troop, never dropping it below one.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{AttackRejection, WarError, WarResult};
use crate::game::Registry;

/// Faces on a combat die.
pub const DIE_FACES: u8 = 6;

/// The two dice thrown for one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rolls {
    /// Attacker's die, 1-6.
    pub attack: u8,
    /// Defender's die, 1-6.
    pub defense: u8,
}

impl Rolls {
    /// Fixed rolls, for replaying or forcing an outcome.
    #[must_use]
    pub const fn new(attack: u8, defense: u8) -> Self {
        Self { attack, defense }
    }

    /// Throw both dice.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            attack: rng.gen_range(1..=DIE_FACES),
            defense: rng.gen_range(1..=DIE_FACES),
        }
    }

    /// Ties go to the defender.
    #[must_use]
    pub const fn attacker_wins(self) -> bool {
        self.attack > self.defense
    }
}

/// Which side won an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The attacking territory.
    Attacker,
    /// The defending territory.
    Defender,
}

/// Everything a caller needs to display one resolved attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackOutcome {
    /// Attacking territory index (0-based).
    pub attacker: usize,
    /// Defending territory index (0-based).
    pub defender: usize,
    /// Dice thrown.
    pub rolls: Rolls,
    /// Winning side.
    pub winner: Side,
    /// Color of the attacker.
    pub attacker_owner: String,
    /// Color that held the defender before the attack.
    pub previous_owner: String,
    /// Attacker troops before the attack.
    pub attacker_troops_before: u32,
    /// Attacker troops after the attack.
    pub attacker_troops_after: u32,
    /// Defender troops before the attack.
    pub defender_troops_before: u32,
    /// Defender troops after the attack.
    pub defender_troops_after: u32,
    /// Troops moved into the conquered territory (0 on defense).
    pub transferred: u32,
}

impl AttackOutcome {
    /// Whether the defender changed hands.
    #[must_use]
    pub fn conquered(&self) -> bool {
        self.winner == Side::Attacker
    }

    /// Troops the attacker lost in a failed attack (0 or 1).
    #[must_use]
    pub const fn attacker_losses(&self) -> u32 {
        match self.winner {
            Side::Attacker => 0,
            Side::Defender => self.attacker_troops_before - self.attacker_troops_after,
        }
    }
}

/// Check that an attack is allowed without touching the registry.
///
/// # Errors
///
/// Returns `IndexOutOfRange` for a bad index, otherwise `InvalidAttack`
/// with the first failed rule: self-attack, allied territories, then
/// insufficient troops.
pub fn validate_attack(registry: &Registry, attacker: usize, defender: usize) -> WarResult<()> {
    let from = registry.get(attacker)?;
    let to = registry.get(defender)?;

    if attacker == defender {
        return Err(AttackRejection::SelfAttack.into());
    }
    if from.is_allied_with(to) {
        return Err(AttackRejection::AlliedTerritories.into());
    }
    if !from.can_attack() {
        return Err(AttackRejection::InsufficientTroops {
            troops: from.troops,
        }
        .into());
    }

    Ok(())
}

/// Validate and resolve one attack, throwing dice from `rng`.
///
/// # Errors
///
/// See [`validate_attack`]. A rejected attack leaves the registry untouched
/// and consumes no randomness.
pub fn resolve_attack<R: Rng + ?Sized>(
    registry: &mut Registry,
    attacker: usize,
    defender: usize,
    rng: &mut R,
) -> WarResult<AttackOutcome> {
    validate_attack(registry, attacker, defender)?;
    let rolls = Rolls::roll(rng);
    apply_rolls(registry, attacker, defender, rolls)
}

/// Validate and resolve one attack with predetermined dice.
///
/// # Errors
///
/// See [`validate_attack`].
pub fn resolve_with_rolls(
    registry: &mut Registry,
    attacker: usize,
    defender: usize,
    rolls: Rolls,
) -> WarResult<AttackOutcome> {
    validate_attack(registry, attacker, defender)?;
    apply_rolls(registry, attacker, defender, rolls)
}

/// Mutate both territories according to `rolls`. Assumes a validated attack.
fn apply_rolls(
    registry: &mut Registry,
    attacker: usize,
    defender: usize,
    rolls: Rolls,
) -> WarResult<AttackOutcome> {
    let len = registry.len();
    let (from, to) = registry
        .pair_mut(attacker, defender)
        .ok_or(WarError::IndexOutOfRange {
            index: attacker.max(defender),
            len,
        })?;

    debug!(
        attacker = %from.name,
        defender = %to.name,
        attack = rolls.attack,
        defense = rolls.defense,
        "dice thrown"
    );

    let attacker_troops_before = from.troops;
    let defender_troops_before = to.troops;
    let previous_owner = to.owner.clone();

    let (winner, transferred) = if rolls.attacker_wins() {
        let transferred = from.troops / 2;
        to.owner.clone_from(&from.owner);
        to.troops = transferred;
        from.troops -= transferred;
        info!(
            territory = %to.name,
            from = %previous_owner,
            to = %to.owner,
            transferred,
            "territory conquered"
        );
        (Side::Attacker, transferred)
    } else {
        if from.troops > 1 {
            from.troops -= 1;
        }
        debug!(territory = %to.name, "defense held");
        (Side::Defender, 0)
    };

    Ok(AttackOutcome {
        attacker,
        defender,
        rolls,
        winner,
        attacker_owner: from.owner.clone(),
        previous_owner,
        attacker_troops_before,
        attacker_troops_after: from.troops,
        defender_troops_before,
        defender_troops_after: to.troops,
        transferred,
    })
}
