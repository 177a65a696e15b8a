//! End-to-end battle loop tests with scripted players.
//!
//! These tests drive whole sessions through the public `BattleIo` seam and
//! check termination, turn accounting and determinism.
//!
//! Run with: cargo test battle_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::io;

use war::game::{BattlePhase, Role, check_invariants};
use war::{
    AttackOutcome, BattleEnd, BattleIo, GameMode, Mission, MissionKind, Registry, Session,
    SessionConfig, Territory, WarError,
};

/// Build a registry from `(name, owner, troops)` triples.
fn map(cells: &[(&str, &str, u32)]) -> Registry {
    Registry::from_territories(
        cells
            .iter()
            .map(|(name, owner, troops)| Territory::new(name, owner, *troops).unwrap())
            .collect(),
    )
    .unwrap()
}

fn mission_config(seed: u64, kind: MissionKind) -> SessionConfig {
    SessionConfig {
        seed: Some(seed),
        mode: GameMode::Mission,
        forced_mission: Some(kind),
    }
}

/// Replays fixed selections and answers.
#[derive(Default)]
struct Scripted {
    selections: VecDeque<i64>,
    answers: VecDeque<bool>,
    errors: Vec<String>,
    outcomes: Vec<AttackOutcome>,
}

impl BattleIo for Scripted {
    fn show_map(&mut self, _registry: &Registry) -> io::Result<()> {
        Ok(())
    }

    fn select(&mut self, _role: Role, _len: usize) -> io::Result<i64> {
        self.selections
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }

    fn report_error(&mut self, error: &WarError) -> io::Result<()> {
        self.errors.push(error.to_string());
        Ok(())
    }

    fn show_outcome(&mut self, _registry: &Registry, outcome: &AttackOutcome) -> io::Result<()> {
        self.outcomes.push(outcome.clone());
        Ok(())
    }

    fn announce_victory(&mut self, _mission: &Mission) -> io::Result<()> {
        Ok(())
    }

    fn confirm_continue(&mut self) -> io::Result<bool> {
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

/// Always attacks the first enemy of `target` color with its strongest territory.
struct Hunter {
    player: String,
    target: Vec<String>,
    snapshot: Option<Registry>,
    attacks_left: u32,
}

impl Hunter {
    fn new(player: &str, target: &[&str], max_attacks: u32) -> Self {
        Self {
            player: player.to_string(),
            target: target.iter().map(ToString::to_string).collect(),
            snapshot: None,
            attacks_left: max_attacks,
        }
    }

    fn has_targets(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|r| r.iter().any(|(_, t)| self.target.contains(&t.owner)))
    }

    fn pick(&self, role: Role) -> i64 {
        let registry = self.snapshot.as_ref().unwrap();
        let index = match role {
            Role::Attacker => registry
                .iter()
                .filter(|(_, t)| t.owner == self.player)
                .max_by_key(|(_, t)| t.troops)
                .map(|(i, _)| i),
            Role::Defender => registry
                .iter()
                .find(|(_, t)| self.target.contains(&t.owner))
                .map(|(i, _)| i),
        };
        i64::try_from(index.unwrap()).unwrap() + 1
    }
}

impl BattleIo for Hunter {
    fn show_map(&mut self, registry: &Registry) -> io::Result<()> {
        self.snapshot = Some(registry.clone());
        Ok(())
    }

    fn select(&mut self, role: Role, _len: usize) -> io::Result<i64> {
        Ok(self.pick(role))
    }

    fn report_error(&mut self, error: &WarError) -> io::Result<()> {
        panic!("hunter made an invalid move: {error}");
    }

    fn show_outcome(&mut self, registry: &Registry, _outcome: &AttackOutcome) -> io::Result<()> {
        assert!(check_invariants(registry).is_empty());
        self.snapshot = Some(registry.clone());
        Ok(())
    }

    fn announce_victory(&mut self, _mission: &Mission) -> io::Result<()> {
        Ok(())
    }

    fn confirm_continue(&mut self) -> io::Result<bool> {
        self.attacks_left = self.attacks_left.saturating_sub(1);
        Ok(self.attacks_left > 0 && self.has_targets())
    }
}

#[test]
fn test_first_attack_from_documented_scenario() {
    let mut session = Session::new(
        map(&[("A", "Azul", 10), ("B", "Vermelho", 5), ("C", "Azul", 1)]),
        "Azul",
        &SessionConfig {
            seed: Some(1),
            mode: GameMode::Free,
            forced_mission: None,
        },
    )
    .unwrap();
    let mut io = Scripted {
        selections: [1, 2].into_iter().collect(),
        ..Scripted::default()
    };

    let report = session.run(&mut io).unwrap();
    assert_eq!(report.end, BattleEnd::UserStopped);
    assert_eq!(report.turns, 1);

    let outcome = &io.outcomes[0];
    let a = session.registry().get(0).unwrap();
    let b = session.registry().get(1).unwrap();
    if outcome.conquered() {
        assert_eq!(b.owner, "Azul");
        assert_eq!(b.troops, 5);
        assert_eq!(a.troops, 5);
    } else {
        assert_eq!(b.owner, "Vermelho");
        assert_eq!(b.troops, 5);
        assert_eq!(a.troops, 9);
    }
}

#[test]
fn test_eliminate_red_hunt_reaches_victory() {
    let registry = map(&[
        ("Brasil", "Azul", 100),
        ("Chile", "Vermelho", 3),
        ("Peru", "Verde", 3),
        ("Bolivia", "vermelho", 3),
    ]);
    let mut session = Session::new(
        registry,
        "Azul",
        &mission_config(2024, MissionKind::EliminateRed),
    )
    .unwrap();
    assert!(!session.mission_fulfilled());

    let mut hunter = Hunter::new("Azul", &["Vermelho", "vermelho"], 90);
    let report = session.run(&mut hunter).unwrap();

    assert!(matches!(report.end, BattleEnd::Victory { .. }));
    assert!(session.mission_fulfilled());
    assert_eq!(report.log.len(), usize::try_from(report.turns).unwrap());
    assert_eq!(report.log.iter().filter(|o| o.conquered()).count(), 2);
    // Green was never a target.
    assert_eq!(session.registry().get(2).unwrap().owner, "Verde");
}

#[test]
fn test_min_territories_hunt_reaches_victory() {
    let registry = map(&[
        ("Brasil", "Azul", 400),
        ("Chile", "Vermelho", 3),
        ("Peru", "Verde", 3),
        ("Bolivia", "Amarelo", 3),
        ("Uruguai", "Roxo", 3),
    ]);
    let mut session = Session::new(
        registry,
        "Azul",
        &mission_config(7, MissionKind::MinTerritories4),
    )
    .unwrap();

    let mut hunter = Hunter::new("Azul", &["Vermelho", "Verde", "Amarelo", "Roxo"], 200);
    let report = session.run(&mut hunter).unwrap();

    assert!(matches!(report.end, BattleEnd::Victory { .. }));
    assert_eq!(session.registry().count_owned("Azul"), 4);
}

#[test]
fn test_invalid_moves_never_consume_turns() {
    let mut session = Session::new(
        map(&[("A", "Azul", 10), ("B", "Vermelho", 5), ("C", "Azul", 1)]),
        "Azul",
        &SessionConfig {
            seed: Some(3),
            mode: GameMode::Free,
            forced_mission: None,
        },
    )
    .unwrap();
    let before = session.registry().clone();
    let mut io = Scripted {
        // self-attack, allied, weak attacker, out of range twice
        selections: [1, 1, 1, 3, 3, 2, 0, -5].into_iter().collect(),
        ..Scripted::default()
    };

    let err = session.run(&mut io).unwrap_err();
    assert!(matches!(err, WarError::Io(_)));
    assert_eq!(io.errors.len(), 5);
    assert_eq!(session.turns(), 0);
    assert_eq!(session.registry(), &before);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let registry = map(&[
            ("Brasil", "Azul", 100),
            ("Chile", "Vermelho", 3),
            ("Peru", "Vermelho", 3),
        ]);
        let mut session = Session::new(
            registry,
            "Azul",
            &SessionConfig {
                seed: Some(seed),
                ..SessionConfig::default()
            },
        )
        .unwrap();
        let mut hunter = Hunter::new("Azul", &["Vermelho"], 50);
        let report = session.run(&mut hunter).unwrap();
        (session.mission().cloned(), report)
    };

    assert_eq!(play(99), play(99));
}

#[test]
fn test_terminated_phase_is_stable() {
    let mut session = Session::new(
        map(&[("A", "Azul", 10), ("B", "Vermelho", 5)]),
        "Azul",
        &mission_config(1, MissionKind::HalfMap),
    )
    .unwrap();
    let mut io = Scripted::default();

    let phase = session.step(BattlePhase::Surveying, &mut io).unwrap();
    assert!(matches!(
        phase,
        BattlePhase::Terminated(BattleEnd::Victory { .. })
    ));
    let again = session.step(phase.clone(), &mut io).unwrap();
    assert_eq!(phase, again);
}
