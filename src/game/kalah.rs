use std::fmt;
use std::ops::RangeInclusive;

use crate::ai::{CancelToken, Searcher};
use crate::error::{ConfigError, MoveError};

use super::{Board, GameSettings, Player, SearchOutcome};

/// A simulated move: the board it leads to and the seeds it captured from
/// the opposite pit (the sowing seed itself is not counted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEvent {
    pub board: Kalah,
    pub seeds_captured: u32,
}

/// Standard Kalah board: counter-clockwise sowing, capture into the mover's
/// store, and an extra turn when the last seed lands in the own store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Kalah {
    pits_per_player: usize,
    seeds_per_pit: u32,
    opening_player: Player,
    next_player: Player,
    level: usize,
    /// Index `i` holds pit `i + 1`.
    pits: Vec<u32>,
    source_pit_of_last_move: Option<usize>,
    target_pit_of_last_move: Option<usize>,
}

impl Kalah {
    /// Create the initial board of a new game.
    pub fn new(settings: GameSettings, opening_player: Player) -> Result<Self, ConfigError> {
        settings.validate()?;
        let n = settings.pits_per_player;
        let mut pits = vec![settings.seeds_per_pit; 2 * (n + 1)];
        pits[n] = 0;
        pits[2 * n + 1] = 0;
        Self::from_position(settings, opening_player, opening_player, pits)
    }

    /// Build a board from an explicit layout, ordered from pit 1 to the
    /// computer store.
    pub fn from_position(
        settings: GameSettings,
        opening_player: Player,
        next_player: Player,
        pits: Vec<u32>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        if opening_player == Player::Nobody || next_player == Player::Nobody {
            return Err(ConfigError::Validation(
                "players must be human or computer".into(),
            ));
        }
        let expected = 2 * (settings.pits_per_player + 1);
        if pits.len() != expected {
            return Err(ConfigError::Validation(format!(
                "expected {expected} pits, got {}",
                pits.len()
            )));
        }
        Ok(Kalah {
            pits_per_player: settings.pits_per_player,
            seeds_per_pit: settings.seeds_per_pit,
            opening_player,
            next_player,
            level: settings.level,
            pits,
            source_pit_of_last_move: None,
            target_pit_of_last_move: None,
        })
    }

    /// Number of pits including both stores.
    pub fn total_pits(&self) -> usize {
        self.pits.len()
    }

    /// All pit contents, ordered from pit 1.
    pub fn pits(&self) -> &[u32] {
        &self.pits
    }

    pub fn total_seeds(&self) -> u32 {
        self.pits.iter().sum()
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings::new(self.level, self.seeds_per_pit, self.pits_per_player)
    }

    /// Index of the player's store.
    pub fn store_of(&self, player: Player) -> Option<usize> {
        match player {
            Player::Human => Some(self.pits_per_player + 1),
            Player::Computer => Some(self.total_pits()),
            Player::Nobody => None,
        }
    }

    /// The player's ordinary pits. Empty for `Player::Nobody`.
    pub fn pits_of(&self, player: Player) -> RangeInclusive<usize> {
        let n = self.pits_per_player;
        match player {
            Player::Human => 1..=n,
            Player::Computer => n + 2..=2 * n + 1,
            #[allow(clippy::reversed_empty_ranges)]
            Player::Nobody => 1..=0,
        }
    }

    /// True if `pit` is one of the player's ordinary pits.
    pub fn owns(&self, player: Player, pit: usize) -> bool {
        self.pits_of(player).contains(&pit)
    }

    /// The pit facing `pit` across the board; the two stores face each other.
    pub fn opposite(&self, pit: usize) -> usize {
        let human_store = self.pits_per_player + 1;
        let computer_store = self.total_pits();
        if pit == human_store {
            computer_store
        } else if pit == computer_store {
            human_store
        } else {
            self.total_pits() - pit
        }
    }

    /// Simulate sowing `pit` for the player whose turn it is.
    pub fn simulate_move(&self, pit: usize) -> Result<MoveEvent, MoveError> {
        self.simulate_move_as(self.next_player, pit)
    }

    /// Simulate sowing `pit` as if it were `mover`'s turn.
    pub fn simulate_move_as(&self, mover: Player, pit: usize) -> Result<MoveEvent, MoveError> {
        let store = self
            .store_of(mover)
            .ok_or(MoveError::NotYourTurn { player: mover })?;
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.owns(mover, pit) {
            return Err(MoveError::InvalidPit { pit, player: mover });
        }
        let seeds = self.seeds(pit);
        if seeds == 0 {
            return Err(MoveError::EmptyPit(pit));
        }

        let skipped = self.opposite(store);
        let mut pits = self.pits.clone();
        pits[pit - 1] = 0;

        let mut current = pit;
        for _ in 1..seeds {
            current = self.advance(current, skipped);
            pits[current - 1] += 1;
        }
        let target = self.advance(current, skipped);

        let opposite = self.opposite(target);
        let seeds_captured =
            if self.owns(mover, target) && pits[target - 1] == 0 && pits[opposite - 1] > 0 {
                let captured = std::mem::take(&mut pits[opposite - 1]);
                pits[store - 1] += captured + 1;
                captured
            } else {
                pits[target - 1] += 1;
                0
            };

        let next_player = if target == store {
            mover
        } else {
            mover.opposite()
        };

        Ok(MoveEvent {
            board: Kalah {
                pits_per_player: self.pits_per_player,
                seeds_per_pit: self.seeds_per_pit,
                opening_player: self.opening_player,
                next_player,
                level: self.level,
                pits,
                source_pit_of_last_move: Some(pit),
                target_pit_of_last_move: Some(target),
            },
            seeds_captured,
        })
    }

    /// Next pit in sowing order, never landing on `skipped`.
    fn advance(&self, pit: usize, skipped: usize) -> usize {
        let next = pit % self.total_pits() + 1;
        if next == skipped {
            next % self.total_pits() + 1
        } else {
            next
        }
    }

    fn side_is_empty(&self, player: Player) -> bool {
        self.pits_of(player).all(|pit| self.seeds(pit) == 0)
    }
}

impl Board for Kalah {
    fn opening_player(&self) -> Player {
        self.opening_player
    }

    fn next(&self) -> Player {
        self.next_player
    }

    fn level(&self) -> usize {
        self.level
    }

    fn set_level(&mut self, level: usize) {
        self.level = level;
    }

    fn pits_per_player(&self) -> usize {
        self.pits_per_player
    }

    fn seeds_per_pit(&self) -> u32 {
        self.seeds_per_pit
    }

    fn seeds(&self, pit: usize) -> u32 {
        self.pits[pit - 1]
    }

    fn seeds_of(&self, player: Player) -> Result<u32, MoveError> {
        let store = self.store_of(player).ok_or(MoveError::NoSeedsForNobody)?;
        let in_pits: u32 = self.pits_of(player).map(|pit| self.seeds(pit)).sum();
        Ok(in_pits + self.seeds(store))
    }

    fn is_over(&self) -> bool {
        self.side_is_empty(Player::Human) || self.side_is_empty(Player::Computer)
    }

    fn human_move(&self, pit: usize) -> Result<Self, MoveError> {
        if self.next_player != Player::Human {
            return Err(MoveError::NotYourTurn {
                player: Player::Human,
            });
        }
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.owns(Player::Human, pit) {
            return Err(MoveError::InvalidPit {
                pit,
                player: Player::Human,
            });
        }
        self.simulate_move(pit).map(|event| event.board)
    }

    fn machine_move(&self, cancel: &CancelToken) -> Result<SearchOutcome<Self>, MoveError> {
        Searcher::new().best_move(self, cancel)
    }

    fn source_pit_of_last_move(&self) -> Option<usize> {
        self.source_pit_of_last_move
    }

    fn target_pit_of_last_move(&self) -> Option<usize> {
        self.target_pit_of_last_move
    }
}

/// Two rows: the computer side read right to left on top with its store
/// first, the human side underneath with its store last.
impl fmt::Display for Kalah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .pits
            .iter()
            .max()
            .map_or(1, |most| most.to_string().len());
        let computer_store = self.total_pits();
        let human_store = self.pits_per_player + 1;

        let top: Vec<String> = (self.pits_per_player + 2..=computer_store)
            .rev()
            .map(|pit| format!("{:>width$}", self.seeds(pit)))
            .collect();
        let bottom: Vec<String> = (1..=human_store)
            .map(|pit| format!("{:>width$}", self.seeds(pit)))
            .collect();

        writeln!(f, "{}", top.join(" "))?;
        write!(f, "{:width$} {}", "", bottom.join(" "))
    }
}
