use log::debug;

use crate::error::MoveError;
use crate::game::{Board, Kalah, Player, SearchOutcome};

use super::cancel::CancelToken;
use super::heuristic::{Heuristic, KalahHeuristic};

/// Marker returned through the recursion once the cancel token is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Depth-limited search for the computer player.
///
/// Scores are additive along the explored line: every node contributes its
/// own heuristic value on top of the best (computer to move) or worst
/// (human to move) value among its children.
pub struct Searcher {
    heuristic: Box<dyn Heuristic>,
}

impl Searcher {
    pub fn new() -> Self {
        Searcher {
            heuristic: Box::new(KalahHeuristic),
        }
    }

    pub fn with_heuristic(heuristic: Box<dyn Heuristic>) -> Self {
        Searcher { heuristic }
    }

    /// Choose the computer's move on `board`, searching `board.level()` plies.
    ///
    /// Ties go to the lowest-numbered pit.
    pub fn best_move(
        &self,
        board: &Kalah,
        cancel: &CancelToken,
    ) -> Result<SearchOutcome<Kalah>, MoveError> {
        if board.next() != Player::Computer {
            return Err(MoveError::NotYourTurn {
                player: Player::Computer,
            });
        }
        if board.is_over() {
            return Err(MoveError::GameOver);
        }

        let level = board.level().max(1);
        let mut best: Option<(Kalah, f64)> = None;

        for pit in board.pits_of(Player::Computer) {
            if cancel.is_cancelled() {
                debug!("search cancelled before pit {pit}");
                return Ok(SearchOutcome::Cancelled);
            }
            if board.seeds(pit) == 0 {
                continue;
            }
            let candidate = board.simulate_move(pit)?.board;
            let score = match self.score(&candidate, 1, level, cancel) {
                Ok(score) => score,
                Err(Cancelled) => {
                    debug!("search cancelled while scoring pit {pit}");
                    return Ok(SearchOutcome::Cancelled);
                }
            };
            debug!("level {level}: pit {pit} scores {score:.2}");

            if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
                best = Some((candidate, score));
            }
        }

        match best {
            Some((board, score)) => {
                debug!(
                    "level {level}: chose pit {:?} with score {score:.2}",
                    board.source_pit_of_last_move()
                );
                Ok(SearchOutcome::Moved(board))
            }
            // unreachable while the game is not over
            None => Err(MoveError::GameOver),
        }
    }

    /// Score `board` found at ply `depth` of a search bounded by `level`.
    pub fn score(
        &self,
        board: &Kalah,
        depth: usize,
        level: usize,
        cancel: &CancelToken,
    ) -> Result<f64, Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }

        let local = self.heuristic.evaluate(board, depth);
        if depth >= level {
            return Ok(local);
        }

        let mover = board.next();
        let mut children = Vec::with_capacity(board.pits_per_player());
        for pit in board.pits_of(mover) {
            // illegal moves (empty pits, finished game) are skipped
            let Ok(event) = board.simulate_move(pit) else {
                continue;
            };
            children.push(self.score(&event.board, depth + 1, level, cancel)?);
        }

        let combined = match mover {
            _ if children.is_empty() => 0.0,
            Player::Human => children.into_iter().fold(f64::INFINITY, f64::min),
            Player::Computer => children.into_iter().fold(f64::NEG_INFINITY, f64::max),
            Player::Nobody => 0.0,
        };

        Ok(combined + local)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameSettings;

    /// Every node is worth the same, so a line's score is its length.
    struct Constant;

    impl Heuristic for Constant {
        fn evaluate(&self, _board: &Kalah, _depth: usize) -> f64 {
            1.0
        }
    }

    /// Node value equals its ply.
    struct Ply;

    impl Heuristic for Ply {
        fn evaluate(&self, _board: &Kalah, depth: usize) -> f64 {
            depth as f64
        }
    }

    /// Raises the token the first time a node is evaluated.
    struct CancelOnFirstNode(CancelToken);

    impl Heuristic for CancelOnFirstNode {
        fn evaluate(&self, _board: &Kalah, _depth: usize) -> f64 {
            self.0.cancel();
            0.0
        }
    }

    /// Rewards the computer store and nothing else.
    struct ComputerStore;

    impl Heuristic for ComputerStore {
        fn evaluate(&self, board: &Kalah, _depth: usize) -> f64 {
            f64::from(board.seeds(board.total_pits()))
        }
    }

    fn computer_opens(level: usize) -> Kalah {
        Kalah::new(GameSettings::new(level, 3, 6), Player::Computer).unwrap()
    }

    fn position(level: usize, next: Player, pits: Vec<u32>) -> Kalah {
        Kalah::from_position(GameSettings::new(level, 3, 6), Player::Human, next, pits).unwrap()
    }

    #[test]
    fn scores_are_additive_along_the_line() {
        let board = computer_opens(3);
        let searcher = Searcher::with_heuristic(Box::new(Constant));
        let candidate = board.simulate_move(8).unwrap().board;
        let score = searcher.score(&candidate, 1, 3, &CancelToken::new()).unwrap();
        assert_eq!(score, 3.0);

        let searcher = Searcher::with_heuristic(Box::new(Ply));
        let score = searcher.score(&candidate, 1, 3, &CancelToken::new()).unwrap();
        assert_eq!(score, 6.0);
    }

    #[test]
    fn leaf_is_local_value() {
        let board = computer_opens(1);
        let searcher = Searcher::new();
        let candidate = board.simulate_move(8).unwrap().board;
        let score = searcher.score(&candidate, 1, 1, &CancelToken::new()).unwrap();
        assert_eq!(score, KalahHeuristic.evaluate(&candidate, 1));
    }

    #[test]
    fn ties_go_to_first_pit() {
        let board = computer_opens(2);
        let searcher = Searcher::with_heuristic(Box::new(Constant));
        let next = searcher
            .best_move(&board, &CancelToken::new())
            .unwrap()
            .into_board()
            .unwrap();
        assert_eq!(next.source_pit_of_last_move(), Some(8));
    }

    #[test]
    fn node_without_moves_contributes_zero() {
        // Human to move on a finished board: no children, only the local value.
        let board = position(
            3,
            Player::Human,
            vec![0, 0, 0, 0, 0, 0, 5, 1, 0, 0, 0, 0, 0, 10],
        );
        let searcher = Searcher::with_heuristic(Box::new(Constant));
        assert_eq!(searcher.score(&board, 1, 3, &CancelToken::new()), Ok(1.0));
    }

    #[test]
    fn human_replies_are_minimised() {
        // Human moves never change the computer store, so the minimum over
        // human replies equals the store after the computer move.
        let board = position(
            2,
            Player::Computer,
            vec![3, 3, 3, 3, 3, 3, 0, 3, 3, 3, 3, 3, 3, 0],
        );
        let searcher = Searcher::with_heuristic(Box::new(ComputerStore));
        // pit 12 sows 13, 14 and 1, leaving one seed in the store
        let candidate = board.simulate_move(12).unwrap().board;
        assert_eq!(candidate.next(), Player::Human);
        assert_eq!(candidate.seeds(14), 1);
        let store = f64::from(candidate.seeds(14));
        assert_eq!(
            searcher.score(&candidate, 1, 2, &CancelToken::new()),
            Ok(2.0 * store)
        );
    }

    #[test]
    fn level_one_prefers_the_big_capture() {
        // Pit 8 captures 6 seeds from pit 5; pit 13 only reaches the store.
        let board = position(
            1,
            Player::Computer,
            vec![1, 1, 1, 1, 6, 1, 0, 1, 0, 0, 0, 0, 1, 0],
        );
        let next = Searcher::new()
            .best_move(&board, &CancelToken::new())
            .unwrap()
            .into_board()
            .unwrap();
        assert_eq!(next.source_pit_of_last_move(), Some(8));
        assert_eq!(next.seeds(14), 7);
    }

    #[test]
    fn level_one_picks_best_leaf() {
        let board = position(
            1,
            Player::Computer,
            vec![2, 0, 4, 1, 3, 0, 5, 0, 2, 5, 1, 0, 4, 3],
        );
        let heuristic = KalahHeuristic;
        let expected = board
            .pits_of(Player::Computer)
            .filter_map(|pit| board.simulate_move(pit).ok())
            .map(|event| {
                let score = heuristic.evaluate(&event.board, 1);
                (event.board, score)
            })
            .fold(None::<(Kalah, f64)>, |best, (candidate, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((candidate, score)),
            })
            .map(|(board, _)| board);

        let chosen = Searcher::new()
            .best_move(&board, &CancelToken::new())
            .unwrap()
            .into_board();
        assert_eq!(chosen, expected);
    }

    #[test]
    fn rejects_human_turn_and_finished_game() {
        let human_turn = Kalah::new(GameSettings::default(), Player::Human).unwrap();
        assert_eq!(
            Searcher::new().best_move(&human_turn, &CancelToken::new()),
            Err(MoveError::NotYourTurn {
                player: Player::Computer
            })
        );

        let finished = position(
            2,
            Player::Computer,
            vec![0, 0, 0, 0, 0, 0, 5, 1, 0, 0, 0, 0, 0, 10],
        );
        assert_eq!(
            Searcher::new().best_move(&finished, &CancelToken::new()),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn cancelled_before_start_returns_no_board() {
        let board = computer_opens(4);
        let snapshot = board.clone();
        let token = CancelToken::new();
        token.cancel();

        let outcome = board.machine_move(&token).unwrap();
        assert!(outcome.is_cancelled());
        assert_eq!(board, snapshot);
    }

    #[test]
    fn cancelled_mid_search_returns_no_board() {
        let board = computer_opens(3);
        let snapshot = board.clone();
        let token = CancelToken::new();
        let searcher = Searcher::with_heuristic(Box::new(CancelOnFirstNode(token.clone())));

        let outcome = searcher.best_move(&board, &token).unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn machine_move_conserves_seeds() {
        let board = computer_opens(3);
        let next = board
            .machine_move(&CancelToken::new())
            .unwrap()
            .into_board()
            .unwrap();
        assert_eq!(next.total_seeds(), board.total_seeds());
        assert!(board.owns(Player::Computer, next.source_pit_of_last_move().unwrap()));
    }
}
