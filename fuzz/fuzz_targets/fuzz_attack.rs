#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use war::game::{check_invariants, check_outcome, resolve_with_rolls};
use war::{Mission, MissionKind, Registry, Rolls, Territory};

/// Colors the fuzzer picks from; two spellings of red on purpose.
const COLORS: [&str; 4] = ["Azul", "Vermelho", "vermelho", "Verde"];

/// One territory on the fuzzed map.
#[derive(Arbitrary, Debug)]
struct Cell {
    color: u8,
    troops: u32,
}

/// Structured input for attack fuzzing.
#[derive(Arbitrary, Debug)]
struct AttackInput {
    /// The map.
    cells: Vec<Cell>,
    /// Attacks to apply in order: (attacker, defender, attack die, defense die).
    attacks: Vec<(u8, u8, u8, u8)>,
}

fuzz_target!(|input: AttackInput| {
    // Cap inputs to keep runs short
    if input.cells.is_empty() || input.cells.len() > 64 || input.attacks.len() > 256 {
        return;
    }

    let territories = input
        .cells
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| {
            let color = COLORS[usize::from(cell.color) % COLORS.len()];
            Territory::new(&format!("T{i}"), color, cell.troops.max(1))
        })
        .collect();
    let Ok(mut registry) = Registry::from_territories(territories) else {
        return;
    };
    let len = registry.len();

    for &(attacker, defender, attack, defense) in &input.attacks {
        let before = registry.clone();
        let rolls = Rolls::new(attack % 6 + 1, defense % 6 + 1);
        let attacker = usize::from(attacker) % (len + 1);
        let defender = usize::from(defender) % (len + 1);

        match resolve_with_rolls(&mut registry, attacker, defender, rolls) {
            Ok(outcome) => {
                let violations = check_outcome(&outcome);
                assert!(violations.is_empty(), "violations: {violations:?}");
            }
            Err(_) => assert_eq!(before, registry, "rejected attack mutated the map"),
        }

        let violations = check_invariants(&registry);
        assert!(violations.is_empty(), "violations: {violations:?}");

        for kind in MissionKind::ALL {
            let mission = Mission::new(kind, "Azul");
            assert_eq!(mission.evaluate(&registry), mission.evaluate(&registry));
        }
    }
});
