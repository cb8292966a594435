use std::collections::BTreeMap;

use crate::game::{Board, Kalah, Player};

/// Weight applied to every human-side term. Values above 1 make the machine
/// player play aggressively.
pub const HUMAN_WEIGHT: f64 = 1.5;

/// Weight of the store difference in the node value.
pub const STORE_WEIGHT: f64 = 3.0;

/// Value of a won game at depth 1, divided by the depth it occurs at.
pub const VICTORY_SCORE: f64 = 500.0;

/// Trait for evaluating a single search node from the computer's point of
/// view. `depth` is the 1-based ply of the node inside the search.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Kalah, depth: usize) -> f64;
}

/// Default heuristic: stores, capture chances, exposed pits and game result.
#[derive(Debug, Clone, Copy, Default)]
pub struct KalahHeuristic;

impl KalahHeuristic {
    /// Difference of the two stores.
    pub fn score_stores(board: &Kalah) -> f64 {
        let seeds_in_store = |player| {
            board
                .store_of(player)
                .map_or(0.0, |store| f64::from(board.seeds(store)))
        };
        weighted(
            seeds_in_store(Player::Computer),
            seeds_in_store(Player::Human),
        )
    }

    /// Seeds each side could capture with its next move, counting the best
    /// capture per landing pit only once.
    pub fn score_captures(board: &Kalah) -> f64 {
        weighted(
            f64::from(Self::capture_potential(board, Player::Computer)),
            f64::from(Self::capture_potential(board, Player::Human)),
        )
    }

    /// Empty own pits facing at least twice the initial seed count, which the
    /// opponent can later capture.
    pub fn score_traps(board: &Kalah) -> f64 {
        let threshold = 2 * board.seeds_per_pit();
        let exposed = |player| {
            board
                .pits_of(player)
                .filter(|&pit| board.seeds(pit) == 0 && board.seeds(board.opposite(pit)) >= threshold)
                .count() as f64
        };
        weighted(exposed(Player::Computer), exposed(Player::Human))
    }

    /// Result of a finished game, worth less the deeper it is found.
    pub fn score_victory(board: &Kalah, depth: usize) -> f64 {
        let value = VICTORY_SCORE / depth as f64;
        match board.winner() {
            Some(Player::Computer) => value,
            Some(Player::Human) => -HUMAN_WEIGHT * value,
            Some(Player::Nobody) | None => 0.0,
        }
    }

    fn capture_potential(board: &Kalah, player: Player) -> u32 {
        let mut best_by_target: BTreeMap<usize, u32> = BTreeMap::new();
        for pit in board.pits_of(player) {
            let Ok(event) = board.simulate_move_as(player, pit) else {
                continue;
            };
            if let Some(target) = event.board.target_pit_of_last_move() {
                let best = best_by_target.entry(target).or_insert(0);
                *best = (*best).max(event.seeds_captured);
            }
        }
        best_by_target.values().sum()
    }
}

impl Heuristic for KalahHeuristic {
    fn evaluate(&self, board: &Kalah, depth: usize) -> f64 {
        STORE_WEIGHT * Self::score_stores(board)
            + Self::score_captures(board)
            + Self::score_traps(board)
            + Self::score_victory(board, depth)
    }
}

fn weighted(computer: f64, human: f64) -> f64 {
    computer - HUMAN_WEIGHT * human
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSettings;

    fn position(next: Player, pits: Vec<u32>) -> Kalah {
        Kalah::from_position(GameSettings::new(2, 3, 6), Player::Human, next, pits).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn initial_board_is_neutral() {
        let board = Kalah::new(GameSettings::default(), Player::Human).unwrap();
        let score = KalahHeuristic.evaluate(&board, 1);
        assert!(approx(score, 0.0), "expected 0, got {score}");
    }

    #[test]
    fn store_score_favours_computer() {
        let board = position(
            Player::Human,
            vec![3, 3, 3, 3, 3, 1, 2, 3, 3, 3, 3, 3, 1, 4],
        );
        assert!(approx(KalahHeuristic::score_stores(&board), 1.0));
        let equal = position(
            Player::Human,
            vec![3, 3, 3, 3, 3, 1, 2, 3, 3, 3, 3, 3, 3, 2],
        );
        assert!(approx(KalahHeuristic::score_stores(&equal), -1.0));
    }

    #[test]
    fn capture_score_counts_human_threats() {
        let board = position(
            Player::Computer,
            vec![2, 3, 0, 3, 3, 3, 4, 3, 3, 3, 5, 3, 3, 0],
        );
        // human pit 1 lands on empty pit 3 facing 5 seeds
        assert!(approx(KalahHeuristic::score_captures(&board), -7.5));
    }

    #[test]
    fn capture_score_keeps_best_capture_per_target() {
        // Pits 1 and 2 both end on empty pit 4, which faces 6 seeds in pit 10.
        let board = position(
            Player::Human,
            vec![3, 2, 0, 0, 3, 3, 0, 3, 3, 6, 3, 3, 3, 0],
        );
        let score = KalahHeuristic::score_captures(&board);
        assert!(approx(score, -1.5 * 6.0), "got {score}");
    }

    #[test]
    fn trap_score_counts_exposed_pits() {
        let board = position(
            Player::Human,
            vec![3, 3, 0, 3, 3, 3, 0, 3, 3, 3, 6, 3, 3, 0],
        );
        assert!(approx(KalahHeuristic::score_traps(&board), -1.5));

        let below_threshold = position(
            Player::Human,
            vec![3, 3, 0, 3, 3, 3, 0, 3, 3, 3, 5, 3, 3, 0],
        );
        assert!(approx(KalahHeuristic::score_traps(&below_threshold), 0.0));
    }

    #[test]
    fn victory_score_scales_with_depth() {
        let computer_won = position(
            Player::Human,
            vec![0, 0, 0, 0, 0, 0, 5, 1, 0, 0, 0, 0, 0, 10],
        );
        assert!(approx(KalahHeuristic::score_victory(&computer_won, 2), 250.0));

        let human_won = position(
            Player::Human,
            vec![0, 0, 0, 0, 0, 0, 10, 1, 0, 0, 0, 0, 0, 5],
        );
        assert!(approx(KalahHeuristic::score_victory(&human_won, 1), -750.0));

        let running = Kalah::new(GameSettings::default(), Player::Human).unwrap();
        assert!(approx(KalahHeuristic::score_victory(&running, 1), 0.0));
    }

    #[test]
    fn finished_game_has_no_capture_potential() {
        let board = position(
            Player::Human,
            vec![0, 0, 0, 0, 0, 0, 5, 1, 0, 0, 0, 0, 0, 10],
        );
        assert!(approx(KalahHeuristic::score_captures(&board), 0.0));
    }
}
