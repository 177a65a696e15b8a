//! Game invariants - sanity checks that detect bugs.
//!
//! Combat must never create troops out of thin air or strand an attacker at
//! zero. Every territory in play is named, owned and holds at least one
//! troop. A registered map may still break the last rule, since zero is a
//! valid entry; such maps are reported, not refused.

use crate::game::{AttackOutcome, Registry, Side};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check the registry after registration or any attack.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(registry: &Registry) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (index, territory) in registry.iter() {
        if territory.name.is_empty() {
            violations.push(InvariantViolation {
                message: format!("Territory {} has no name", index + 1),
            });
        }
        if territory.owner.is_empty() {
            violations.push(InvariantViolation {
                message: format!("Territory {} ({}) has no owner", index + 1, territory.name),
            });
        }
        if territory.troops == 0 {
            violations.push(InvariantViolation {
                message: format!("Territory {} ({}) has no troops", index + 1, territory.name),
            });
        }
    }

    violations
}

/// Check one resolved attack against the combat rules.
#[must_use]
pub fn check_outcome(outcome: &AttackOutcome) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut fail = |message: String| violations.push(InvariantViolation { message });

    if outcome.attacker == outcome.defender {
        fail(format!("Territory {} attacked itself", outcome.attacker + 1));
    }
    if outcome.attacker_troops_after == 0 {
        fail("Attacker was left with zero troops".to_string());
    }

    match outcome.winner {
        Side::Attacker => {
            let half = outcome.attacker_troops_before / 2;
            if outcome.transferred != half {
                fail(format!(
                    "Transferred {} troops, expected half of {}",
                    outcome.transferred, outcome.attacker_troops_before
                ));
            }
            if outcome.defender_troops_after != outcome.transferred {
                fail(format!(
                    "Conquered territory holds {} troops, expected {}",
                    outcome.defender_troops_after, outcome.transferred
                ));
            }
            let moved = outcome.attacker_troops_after + outcome.defender_troops_after;
            if moved != outcome.attacker_troops_before {
                fail(format!(
                    "Attacker troops not conserved: {} before, {} after",
                    outcome.attacker_troops_before, moved
                ));
            }
        }
        Side::Defender => {
            let expected = outcome.attacker_troops_before.saturating_sub(1).max(1);
            if outcome.attacker_troops_after != expected {
                fail(format!(
                    "Defeated attacker holds {} troops, expected {expected}",
                    outcome.attacker_troops_after
                ));
            }
            if outcome.defender_troops_after != outcome.defender_troops_before {
                fail("Defender troops changed on a successful defense".to_string());
            }
        }
    }

    violations
}
