//! Output formatting utilities for CLI.

use serde::Serialize;
use war::game::MAX_NAME_LEN;
use war::{
    AttackOutcome, BattleEnd, BattleReport, Mission, MissionKind, Registry, Session, Side,
    Territory, WarError,
};

/// Horizontal rule used around headings.
const RULE: &str = "=================================================";

/// JSON-serializable session summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonSummary<'a> {
    /// Seed the dice started from.
    pub(super) seed: u64,
    /// The player's color.
    pub(super) player: &'a str,
    /// Bound mission (null in free play).
    pub(super) mission: Option<&'a Mission>,
    /// How the session ended.
    pub(super) end: &'a BattleEnd,
    /// Attacks resolved.
    pub(super) turns: u32,
    /// Every resolved attack.
    pub(super) attacks: &'a [AttackOutcome],
    /// Final map.
    pub(super) territories: &'a [Territory],
}

impl<'a> JsonSummary<'a> {
    /// Create from a finished session.
    pub(super) fn new(session: &'a Session, report: &'a BattleReport) -> Self {
        Self {
            seed: session.seed(),
            player: session.player(),
            mission: session.mission(),
            end: &report.end,
            turns: report.turns,
            attacks: &report.log,
            territories: session.registry().territories(),
        }
    }
}

/// A heading between two rules.
pub(super) fn heading(title: &str) -> String {
    format!("\n{RULE}\n{title:^49}\n{RULE}\n")
}

/// Format the map as a table.
pub(super) fn format_map(registry: &Registry) -> String {
    let mut output = heading("TERRITORY MAP");

    output.push_str(&format!(
        "{:>3}  {:<width$}  {:<9}  {:>6}\n",
        "#",
        "Territory",
        "Owner",
        "Troops",
        width = MAX_NAME_LEN
    ));
    for (index, territory) in registry.iter() {
        output.push_str(&format!(
            "{:>3}  {:<width$}  {:<9}  {:>6}\n",
            index + 1,
            territory.name,
            territory.owner,
            territory.troops,
            width = MAX_NAME_LEN
        ));
    }
    output.push_str(RULE);
    output.push('\n');

    output
}

/// Format one resolved attack.
pub(super) fn format_outcome(registry: &Registry, outcome: &AttackOutcome) -> String {
    let name = |index: usize| registry.get(index).map_or("?", |t| t.name.as_str());
    let attacker = name(outcome.attacker);
    let defender = name(outcome.defender);

    let mut output = heading("BATTLE");
    output.push_str(&format!(
        "Attacker: {attacker} ({}) - die: {}\n",
        outcome.attacker_owner, outcome.rolls.attack
    ));
    output.push_str(&format!(
        "Defender: {defender} ({}) - die: {}\n",
        outcome.previous_owner, outcome.rolls.defense
    ));
    output.push_str("-------------------------------------------------\n");

    match outcome.winner {
        Side::Attacker => {
            output.push_str("ATTACKER WINS!\n");
            output.push_str(&format!(
                "'{defender}' was conquered by {}!\n",
                outcome.attacker_owner
            ));
            output.push_str(&format!("Troops moved in: {}\n", outcome.transferred));
            output.push_str(&format!(
                "Troops left with the attacker: {}\n",
                outcome.attacker_troops_after
            ));
        }
        Side::Defender => {
            output.push_str("DEFENDER WINS!\n");
            output.push_str(&format!("'{defender}' held the line!\n"));
            if outcome.attacker_losses() > 0 {
                output.push_str(&format!(
                    "The attacker lost 1 troop. Troops left: {}\n",
                    outcome.attacker_troops_after
                ));
            } else {
                output.push_str("The attacker cannot lose more troops (minimum: 1).\n");
            }
        }
    }
    output.push_str(RULE);
    output.push('\n');

    output
}

/// Format the mission briefing shown at session start.
pub(super) fn format_mission(mission: &Mission) -> String {
    format!(
        "\n=== YOUR SECRET MISSION ===\nObjective: {}\n===========================\n",
        mission.description()
    )
}

/// Format the victory banner.
pub(super) fn format_victory(mission: &Mission) -> String {
    let mut output = String::from("\nMISSION ACCOMPLISHED!\n");
    output.push_str(&heading("VICTORY!"));
    output.push_str(&format!(
        "You completed your mission: {}\n",
        mission.description()
    ));
    output.push_str(RULE);
    output.push('\n');
    output
}

/// Format a recoverable error.
pub(super) fn format_error(error: &WarError) -> String {
    format!("Error: {error}\n")
}

/// Format the end-of-session summary.
pub(super) fn format_summary(session: &Session, report: &BattleReport) -> String {
    let mut output = format!("Session summary (seed: {})\n", session.seed());
    output.push_str(&format!("  Player: {}\n", session.player()));
    match session.mission() {
        Some(mission) => output.push_str(&format!("  Mission: {}\n", mission.description())),
        None => output.push_str("  Mission: none (free play)\n"),
    }
    match &report.end {
        BattleEnd::Victory { .. } => output.push_str("  Result: victory\n"),
        BattleEnd::UserStopped => output.push_str("  Result: stopped by the player\n"),
    }
    let conquests = report.log.iter().filter(|o| o.conquered()).count();
    output.push_str(&format!(
        "  Attacks: {} ({conquests} conquests)\n",
        report.turns
    ));

    output
}

/// Format the mission catalog.
pub(super) fn format_catalog() -> String {
    let mut output = heading("MISSION CATALOG");
    for kind in MissionKind::ALL {
        output.push_str(&format!(
            "{}. {:<18} {}\n",
            kind.number(),
            kind.key(),
            kind.description()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use war::{Rolls, game::resolve_with_rolls};

    fn registry() -> Registry {
        Registry::from_territories(vec![
            Territory::new("Brasil", "Azul", 10).unwrap(),
            Territory::new("Chile", "Vermelho", 5).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_format_map_lists_every_territory() {
        let text = format_map(&registry());
        assert!(text.contains("TERRITORY MAP"));
        assert!(text.lines().any(|l| l.trim_start().starts_with("1  Brasil")));
        assert!(text.lines().any(|l| l.contains("Chile") && l.trim_end().ends_with('5')));
    }

    #[test]
    fn test_format_outcome_conquest() {
        let mut map = registry();
        let outcome = resolve_with_rolls(&mut map, 0, 1, Rolls::new(6, 1)).unwrap();
        let text = format_outcome(&map, &outcome);
        assert!(text.contains("ATTACKER WINS!"));
        assert!(text.contains("'Chile' was conquered by Azul!"));
        assert!(text.contains("Troops moved in: 5"));
    }

    #[test]
    fn test_format_outcome_defense() {
        let mut map = registry();
        let outcome = resolve_with_rolls(&mut map, 0, 1, Rolls::new(2, 2)).unwrap();
        let text = format_outcome(&map, &outcome);
        assert!(text.contains("DEFENDER WINS!"));
        assert!(text.contains("Troops left: 9"));
    }

    #[test]
    fn test_format_summary_lines() {
        let config = war::SessionConfig {
            seed: Some(3),
            mode: war::GameMode::Free,
            forced_mission: None,
        };
        let session = Session::new(registry(), "Azul", &config).unwrap();
        let report = session.declined();
        assert_eq!(
            format_summary(&session, &report),
            "Session summary (seed: 3)\n  Player: Azul\n  Mission: none (free play)\n  \
             Result: stopped by the player\n  Attacks: 0 (0 conquests)\n"
        );
    }

    #[test]
    fn test_format_catalog_numbers() {
        let text = format_catalog();
        assert!(text.contains("1. consecutive-3"));
        assert!(text.contains("6. half-map"));
    }
}
