//! Session context and the battle loop.
//!
//! A [`Session`] owns everything one game needs: the registry, the player's
//! color, the bound mission and the only random generator. The battle loop
//! is an explicit state machine driven by [`Session::step`]; all talking to
//! the player goes through a [`BattleIo`] collaborator.

use std::io;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{WarError, WarResult};
use crate::game::{
    AttackOutcome, MAX_COLOR_LEN, Mission, MissionKind, Registry, bounded, check_outcome,
    resolve_attack, validate_attack,
};

/// Whether the player is chasing a mission or just fighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Battles without a mission; only the player can end the game.
    Free,
    /// Battles until the secret mission is fulfilled.
    #[default]
    Mission,
}

/// Configuration for one session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Random seed (None: derived from the clock).
    pub seed: Option<u64>,
    /// Free play or mission play.
    pub mode: GameMode,
    /// Bind this mission instead of drawing one.
    pub forced_mission: Option<MissionKind>,
}

/// Which territory the collaborator is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The territory launching the attack.
    Attacker,
    /// The territory under attack.
    Defender,
}

/// How a battle session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BattleEnd {
    /// The mission was fulfilled.
    Victory {
        /// The fulfilled mission.
        mission: Mission,
    },
    /// The player declined to continue.
    UserStopped,
}

/// States of the battle loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattlePhase {
    /// Top of an iteration: show the map, check the mission before attacking.
    Surveying,
    /// Waiting for attacker and defender selections.
    AwaitingSelection,
    /// Selections received; attack rules not yet checked.
    Validating {
        /// Attacker index (0-based).
        attacker: usize,
        /// Defender index (0-based).
        defender: usize,
    },
    /// Attack accepted; dice about to be thrown.
    Resolving {
        /// Attacker index (0-based).
        attacker: usize,
        /// Defender index (0-based).
        defender: usize,
    },
    /// An attack just landed; check the mission again.
    CheckingVictory,
    /// The loop is over.
    Terminated(BattleEnd),
}

/// Result of running the battle loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleReport {
    /// Why the loop stopped.
    pub end: BattleEnd,
    /// Attacks resolved.
    pub turns: u32,
    /// Every resolved attack, in order.
    pub log: Vec<AttackOutcome>,
}

/// The console (or test script) side of the battle loop.
pub trait BattleIo {
    /// Render the whole map.
    ///
    /// # Errors
    ///
    /// Any I/O failure ends the session.
    fn show_map(&mut self, registry: &Registry) -> io::Result<()>;

    /// Ask for a territory, 1-based as the player sees it.
    ///
    /// # Errors
    ///
    /// Any I/O failure ends the session.
    fn select(&mut self, role: Role, len: usize) -> io::Result<i64>;

    /// Report a recoverable error before re-prompting.
    ///
    /// # Errors
    ///
    /// Any I/O failure ends the session.
    fn report_error(&mut self, error: &WarError) -> io::Result<()>;

    /// Render one resolved attack.
    ///
    /// # Errors
    ///
    /// Any I/O failure ends the session.
    fn show_outcome(&mut self, registry: &Registry, outcome: &AttackOutcome) -> io::Result<()>;

    /// Announce a fulfilled mission.
    ///
    /// # Errors
    ///
    /// Any I/O failure ends the session.
    fn announce_victory(&mut self, mission: &Mission) -> io::Result<()>;

    /// Ask whether to attack again.
    ///
    /// # Errors
    ///
    /// Any I/O failure ends the session.
    fn confirm_continue(&mut self) -> io::Result<bool>;
}

/// One game: registry, player, mission and dice.
#[derive(Debug, Clone)]
pub struct Session {
    /// The map.
    registry: Registry,
    /// The player's color.
    player: String,
    /// Bound mission (None in free play).
    mission: Option<Mission>,
    /// Seed the generator started from.
    seed: u64,
    /// Sole source of randomness.
    rng: ChaCha8Rng,
    /// Attacks resolved so far.
    turns: u32,
    /// Resolved attacks, in order.
    log: Vec<AttackOutcome>,
}

impl Session {
    /// Start a session, drawing the mission when playing for one.
    ///
    /// # Errors
    ///
    /// Returns [`WarError::BlankPlayer`] if the color is blank once trimmed.
    pub fn new(registry: Registry, player: &str, config: &SessionConfig) -> WarResult<Self> {
        let player = bounded(player, MAX_COLOR_LEN);
        if player.is_empty() {
            return Err(WarError::BlankPlayer);
        }
        let seed = config.seed.unwrap_or_else(clock_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mission = match (config.mode, config.forced_mission) {
            (GameMode::Free, _) => None,
            (GameMode::Mission, Some(kind)) => Some(Mission::new(kind, player.clone())),
            (GameMode::Mission, None) => Some(Mission::assign(player.clone(), &mut rng)),
        };

        info!(seed, player = %player, mode = ?config.mode, "session started");

        Ok(Self {
            registry,
            player,
            mission,
            seed,
            rng,
            turns: 0,
            log: Vec::new(),
        })
    }

    /// The map.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The player's color.
    #[must_use]
    pub fn player(&self) -> &str {
        &self.player
    }

    /// The bound mission, if any.
    #[must_use]
    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    /// Seed the dice started from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Attacks resolved so far.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Resolved attacks, in order.
    #[must_use]
    pub fn log(&self) -> &[AttackOutcome] {
        &self.log
    }

    /// Whether the bound mission currently holds. Always false in free play.
    #[must_use]
    pub fn mission_fulfilled(&self) -> bool {
        self.mission
            .as_ref()
            .is_some_and(|mission| mission.evaluate(&self.registry))
    }

    /// Resolve one attack with the session dice and record it.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error; nothing is recorded on failure.
    pub fn attack(&mut self, attacker: usize, defender: usize) -> WarResult<AttackOutcome> {
        let outcome = resolve_attack(&mut self.registry, attacker, defender, &mut self.rng)?;

        for violation in check_outcome(&outcome) {
            warn!(%violation, "combat invariant broken");
        }

        self.turns += 1;
        self.log.push(outcome.clone());
        Ok(outcome)
    }

    /// Report for a session whose player never entered battle mode.
    #[must_use]
    pub fn declined(&self) -> BattleReport {
        info!("battle mode declined");
        self.report(BattleEnd::UserStopped)
    }

    /// Advance the battle loop by one phase.
    ///
    /// # Errors
    ///
    /// Fails on collaborator I/O errors or a non-recoverable engine error.
    /// Recoverable errors are reported to `io` and loop back to surveying.
    pub fn step<I: BattleIo + ?Sized>(
        &mut self,
        phase: BattlePhase,
        io: &mut I,
    ) -> WarResult<BattlePhase> {
        debug!(?phase, "battle phase");
        let already_over = matches!(phase, BattlePhase::Terminated(_));

        let next = match phase {
            BattlePhase::Surveying => {
                io.show_map(&self.registry)?;
                self.victory_or(BattlePhase::AwaitingSelection)
            }
            BattlePhase::AwaitingSelection => {
                let len = self.registry.len();
                let attacker = to_index(io.select(Role::Attacker, len)?, len);
                let defender = match attacker {
                    Ok(_) => to_index(io.select(Role::Defender, len)?, len),
                    Err(_) => Ok(0),
                };
                match (attacker, defender) {
                    (Ok(attacker), Ok(defender)) => BattlePhase::Validating { attacker, defender },
                    (Err(e), _) | (_, Err(e)) => recover(e, io)?,
                }
            }
            BattlePhase::Validating { attacker, defender } => {
                match validate_attack(&self.registry, attacker, defender) {
                    Ok(()) => BattlePhase::Resolving { attacker, defender },
                    Err(e) => recover(e, io)?,
                }
            }
            BattlePhase::Resolving { attacker, defender } => {
                match self.attack(attacker, defender) {
                    Ok(outcome) => {
                        io.show_outcome(&self.registry, &outcome)?;
                        BattlePhase::CheckingVictory
                    }
                    Err(e) => recover(e, io)?,
                }
            }
            BattlePhase::CheckingVictory => {
                let next = self.victory_or(BattlePhase::Surveying);
                if next == BattlePhase::Surveying && !io.confirm_continue()? {
                    BattlePhase::Terminated(BattleEnd::UserStopped)
                } else {
                    next
                }
            }
            BattlePhase::Terminated(end) => BattlePhase::Terminated(end),
        };

        if let BattlePhase::Terminated(BattleEnd::Victory { mission }) = &next {
            if !already_over {
                io.announce_victory(mission)?;
            }
        }

        Ok(next)
    }

    /// Run the battle loop until victory or the player stops.
    ///
    /// # Errors
    ///
    /// See [`Session::step`].
    pub fn run<I: BattleIo + ?Sized>(&mut self, io: &mut I) -> WarResult<BattleReport> {
        let mut phase = BattlePhase::Surveying;
        loop {
            phase = match self.step(phase, io)? {
                BattlePhase::Terminated(end) => {
                    info!(turns = self.turns, end = ?end, "battle mode ended");
                    return Ok(self.report(end));
                }
                next => next,
            };
        }
    }

    /// Terminate with victory if the mission holds, otherwise go to `next`.
    fn victory_or(&self, next: BattlePhase) -> BattlePhase {
        match &self.mission {
            Some(mission) if mission.evaluate(&self.registry) => {
                BattlePhase::Terminated(BattleEnd::Victory {
                    mission: mission.clone(),
                })
            }
            _ => next,
        }
    }

    fn report(&self, end: BattleEnd) -> BattleReport {
        BattleReport {
            end,
            turns: self.turns,
            log: self.log.clone(),
        }
    }
}

/// Convert a 1-based selection to an index.
fn to_index(selection: i64, len: usize) -> WarResult<usize> {
    usize::try_from(selection)
        .ok()
        .filter(|&s| (1..=len).contains(&s))
        .map(|s| s - 1)
        .ok_or(WarError::InvalidSelection { selection, len })
}

/// Report a recoverable error and go back to the top of the loop.
fn recover<I: BattleIo + ?Sized>(error: WarError, io: &mut I) -> WarResult<BattlePhase> {
    if !error.is_recoverable() {
        return Err(error);
    }
    debug!(%error, "selection rejected");
    io.report_error(&error)?;
    Ok(BattlePhase::Surveying)
}

/// Seed from the wall clock when none was given.
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
        .unwrap_or(42)
}
