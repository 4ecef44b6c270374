use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SimulatorConfig;
use crate::card::Card;
use crate::constants::{BOARD_CARDS, CARD_COUNT, HOLE_CARDS_USED};
use crate::deck::{Deck, DeckError};
use crate::hand_evaluator::{EvalError, Evaluator, Hand, Strength};

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("at least one iteration is required")]
    ZeroIterations,
    #[error("at least one worker thread is required")]
    ZeroThreads,
    #[error("too many board cards ({0})")]
    TooManyBoardCards(usize),
    #[error("hole hands need at least two cards, got {0}")]
    TooFewHoleCards(usize),
    #[error("not enough cards in the deck for {0} opponents")]
    TooManyOpponents(usize),
    #[error("card {0} is dealt twice")]
    ConflictingCards(Card),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("failed to seed worker rng: {0}")]
    Rng(#[from] rand::Error),
    #[error("invalid simulator config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("simulation worker panicked")]
    WorkerPanicked,
}

/// Estimate the percentage of games won against random opponents
///
/// Uses the shared rank tables and the default config
///
/// # Arguments
///
/// * `hole` Private cards of the player
/// * `board` Public cards dealt so far
/// * `n_opponents` Number of opponents with random hole cards
/// * `iterations` Number of games to simulate
///
/// # Example
/// ```
/// use poker_odds::constants::DEFAULT_ITERATIONS;
/// use poker_odds::hand_evaluator::Hand;
/// use poker_odds::equity_calculator::estimate_win_probability;
/// let hole: Hand = "[Ah,Kh]".parse().unwrap();
/// let board: Hand = "[Qh,Jh,Th]".parse().unwrap();
/// let percent = estimate_win_probability(&hole, &board, 1, DEFAULT_ITERATIONS).unwrap();
/// assert_eq!(percent, 100);
/// ```
pub fn estimate_win_probability(
    hole: &Hand,
    board: &Hand,
    n_opponents: usize,
    iterations: u32,
) -> Result<u8, SimulatorError> {
    let results = Simulator::default().run(hole, board, n_opponents, iterations)?;
    Ok(results.win_percentage())
}

/// Totals of a simulation
///
/// A game counts as won unless some opponent holds a strictly stronger hand,
/// ties go to the player
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub wins: u64,
    pub trials: u64,
}

impl SimulationResults {
    /// Won games as a whole percentage, rounded down
    pub fn win_percentage(&self) -> u8 {
        if self.trials == 0 {
            return 0;
        }
        (100 * self.wins / self.trials) as u8
    }

    fn merge(&mut self, other: &SimulationResults) {
        self.wins += other.wins;
        self.trials += other.trials;
    }
}

/// Find the first card held twice across both hands
fn find_conflict(hole: &Hand, board: &Hand) -> Option<Card> {
    let mut used = 0u64;
    for &card in hole.iter().chain(board.iter()) {
        if used & card.mask() != 0 {
            return Some(card);
        }
        used |= card.mask();
    }
    None
}

/// Monte carlo win probability calculator
#[derive(Debug, Clone)]
pub struct Simulator<'t> {
    evaluator: Evaluator<'t>,
    config: SimulatorConfig,
}

impl Default for Simulator<'static> {
    fn default() -> Self {
        Simulator::new(Evaluator::default(), SimulatorConfig::default())
    }
}

impl<'t> Simulator<'t> {
    pub fn new(evaluator: Evaluator<'t>, config: SimulatorConfig) -> Self {
        Simulator { evaluator, config }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Play `iterations` random games
    ///
    /// Every game completes the board and deals each opponent
    /// `opponent_hole_cards` cards from a freshly shuffled deck,
    /// skipping the cards already held by the player or on the board
    pub fn run(
        &self,
        hole: &Hand,
        board: &Hand,
        n_opponents: usize,
        iterations: u32,
    ) -> Result<SimulationResults, SimulatorError> {
        self.validate(hole, board, n_opponents, iterations)?;
        log::debug!(
            "simulating {} vs {} opponents on {} ({} games, {} threads)",
            hole,
            n_opponents,
            board,
            iterations,
            self.config.n_threads
        );

        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let n_threads = u32::from(self.config.n_threads);
        let results = if n_threads == 1 || iterations < n_threads {
            self.run_trials(hole, board, n_opponents, iterations, &mut rng)?
        } else {
            self.run_parallel(hole, board, n_opponents, iterations, &mut rng)?
        };

        log::debug!(
            "won {} of {} games ({}%)",
            results.wins,
            results.trials,
            results.win_percentage()
        );
        Ok(results)
    }

    fn validate(
        &self,
        hole: &Hand,
        board: &Hand,
        n_opponents: usize,
        iterations: u32,
    ) -> Result<(), SimulatorError> {
        if iterations == 0 {
            return Err(SimulatorError::ZeroIterations);
        }
        if self.config.n_threads == 0 {
            return Err(SimulatorError::ZeroThreads);
        }
        if board.len() > BOARD_CARDS {
            return Err(SimulatorError::TooManyBoardCards(board.len()));
        }
        if hole.len() < HOLE_CARDS_USED {
            return Err(SimulatorError::TooFewHoleCards(hole.len()));
        }
        if n_opponents > 0 && self.config.opponent_hole_cards < HOLE_CARDS_USED {
            return Err(SimulatorError::TooFewHoleCards(
                self.config.opponent_hole_cards,
            ));
        }
        if let Some(card) = find_conflict(hole, board) {
            return Err(SimulatorError::ConflictingCards(card));
        }
        // every dealt card plus every skipped known card must fit in one deck
        let needed = BOARD_CARDS + hole.len() + n_opponents * self.config.opponent_hole_cards;
        if needed > usize::from(CARD_COUNT) {
            return Err(SimulatorError::TooManyOpponents(n_opponents));
        }
        Ok(())
    }

    /// Split the games between crossbeam scoped workers
    ///
    /// Each worker owns its deck and rng, totals are summed once all
    /// workers have joined
    fn run_parallel(
        &self,
        hole: &Hand,
        board: &Hand,
        n_opponents: usize,
        iterations: u32,
        rng: &mut SmallRng,
    ) -> Result<SimulationResults, SimulatorError> {
        let n_threads = u32::from(self.config.n_threads);
        let mut workers = Vec::with_capacity(n_threads as usize);
        for i in 0..n_threads {
            let share = iterations / n_threads + u32::from(i < iterations % n_threads);
            workers.push((share, SmallRng::from_rng(&mut *rng)?));
        }

        let outcomes = crossbeam::scope(|scope| {
            let handles: Vec<_> = workers
                .into_iter()
                .map(|(share, mut worker_rng)| {
                    let hole = hole.clone();
                    let board = board.clone();
                    scope.spawn(move |_| {
                        let batch =
                            self.run_trials(&hole, &board, n_opponents, share, &mut worker_rng);
                        log::trace!("worker finished {} games", share);
                        batch
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join())
                .collect::<Vec<_>>()
        })
        .map_err(|_| SimulatorError::WorkerPanicked)?;

        let mut results = SimulationResults::default();
        for outcome in outcomes {
            let batch = outcome.map_err(|_| SimulatorError::WorkerPanicked)??;
            results.merge(&batch);
        }
        Ok(results)
    }

    fn run_trials<R: Rng>(
        &self,
        hole: &Hand,
        board: &Hand,
        n_opponents: usize,
        trials: u32,
        rng: &mut R,
    ) -> Result<SimulationResults, SimulatorError> {
        let mut deck = Deck::new();
        let mut results = SimulationResults::default();
        // with a complete board the player's hand never changes
        let board_complete = board.len() == BOARD_CARDS;
        let mut fixed_score: Option<Strength> = None;

        for _ in 0..trials {
            deck.shuffle(rng);
            let mut table = board.clone();
            while table.len() < BOARD_CARDS {
                table.add_card(deck.deal_excluding(&[hole, board])?);
            }

            let score = match fixed_score {
                Some(score) if board_complete => score,
                _ => {
                    let score = self.evaluator.evaluate_best(hole, &table)?;
                    fixed_score = Some(score);
                    score
                }
            };

            if self.player_wins(&mut deck, hole, board, &table, score, n_opponents)? {
                results.wins += 1;
            }
            results.trials += 1;
        }
        Ok(results)
    }

    /// Deal the opponents one by one, stopping at the first stronger hand
    fn player_wins(
        &self,
        deck: &mut Deck,
        hole: &Hand,
        board: &Hand,
        table: &Hand,
        score: Strength,
        n_opponents: usize,
    ) -> Result<bool, SimulatorError> {
        for _ in 0..n_opponents {
            let mut opponent = Hand::empty();
            for _ in 0..self.config.opponent_hole_cards {
                opponent.add_card(deck.deal_excluding(&[hole, board])?);
            }
            if self.evaluator.evaluate_best(&opponent, table)? > score {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(codes: &str) -> Hand {
        codes.parse().unwrap()
    }

    fn seeded(seed: u64) -> Simulator<'static> {
        Simulator::new(
            Evaluator::default(),
            SimulatorConfig::default().with_seed(seed),
        )
    }

    #[test]
    fn test_zero_iterations() {
        let result = estimate_win_probability(&hand("[Ah,Ad]"), &Hand::empty(), 1, 0);
        assert!(matches!(result, Err(SimulatorError::ZeroIterations)));
    }

    #[test]
    fn test_invalid_input() {
        let sim = seeded(0);
        let aces = hand("[Ah,Ad]");
        assert!(matches!(
            sim.run(&aces, &hand("[2c,3c,4c,5c,6c,7c]"), 1, 10),
            Err(SimulatorError::TooManyBoardCards(6))
        ));
        assert!(matches!(
            sim.run(&hand("[Ah]"), &Hand::empty(), 1, 10),
            Err(SimulatorError::TooFewHoleCards(1))
        ));
        assert!(matches!(
            sim.run(&aces, &hand("[Ah,2c,3c]"), 1, 10),
            Err(SimulatorError::ConflictingCards(_))
        ));
        // 5 board + 2 hole + 12 * 4 opponent cards
        assert!(matches!(
            sim.run(&aces, &Hand::empty(), 12, 10),
            Err(SimulatorError::TooManyOpponents(12))
        ));
        assert!(sim.run(&aces, &Hand::empty(), 11, 10).is_ok());

        let no_threads = Simulator::new(
            Evaluator::default(),
            SimulatorConfig::default().with_threads(0),
        );
        assert!(matches!(
            no_threads.run(&aces, &Hand::empty(), 1, 10),
            Err(SimulatorError::ZeroThreads)
        ));
    }

    #[test]
    fn test_unbeatable_hand() {
        // royal flush, opponents can only tie
        let hole = hand("[Ah,Kh]");
        for board in ["[Qh,Jh,Th]", "[Qh,Jh,Th,2c]", "[Qh,Jh,Th,2c,3d]"].iter() {
            let percent = estimate_win_probability(&hole, &hand(board), 3, 300).unwrap();
            assert_eq!(percent, 100);
        }
    }

    #[test]
    fn test_no_opponents() {
        let results = seeded(5)
            .run(&hand("[2c,7d]"), &Hand::empty(), 0, 50)
            .unwrap();
        assert_eq!(results, SimulationResults { wins: 50, trials: 50 });
    }

    #[test]
    fn test_pocket_aces_against_two_cards() {
        const ERROR: i32 = 5;
        let sim = Simulator::new(
            Evaluator::default(),
            SimulatorConfig::default()
                .with_opponent_hole_cards(2)
                .with_seed(11),
        );
        let results = sim.run(&hand("[Ah,Ad]"), &Hand::empty(), 1, 5000).unwrap();
        let percent = i32::from(results.win_percentage());
        // ties are counted as wins, which lifts the usual 85%
        assert!((percent - 86).abs() <= ERROR, "{}", percent);
    }

    #[test]
    fn test_pocket_aces_against_four_cards() {
        const ERROR: i32 = 5;
        let results = seeded(12)
            .run(&hand("[Ah,Ad]"), &Hand::empty(), 1, 5000)
            .unwrap();
        let percent = i32::from(results.win_percentage());
        assert!((percent - 59).abs() <= ERROR, "{}", percent);
    }

    #[test]
    fn test_more_opponents_win_less() {
        // roughly 56, 32, 14 and 5 percent, far apart for any rng stream
        const ERROR: u8 = 5;
        let hole = hand("[Ah,Ad]");
        let board = hand("[7c,8d,2s]");
        let mut last = 100 + ERROR;
        for &n_opponents in [1, 2, 4, 8].iter() {
            let percent = seeded(13)
                .run(&hole, &board, n_opponents, 4000)
                .unwrap()
                .win_percentage();
            assert!(
                percent + ERROR < last,
                "{} opponents: {} after {}",
                n_opponents,
                percent,
                last
            );
            last = percent;
        }
    }

    #[test]
    fn test_ties_go_to_player() {
        let sim = Simulator::new(
            Evaluator::default(),
            SimulatorConfig::default().with_opponent_hole_cards(2),
        );
        // an unshuffled deck deals 2d then 3d to the first opponent
        let board = hand("[Ah,Ks,Qh,Jc,9s]");
        let hole = hand("[2c,3c]");
        let score = sim.evaluator.evaluate_best(&hole, &board).unwrap();
        assert_eq!(
            score,
            sim.evaluator
                .evaluate_best(&hand("[2d,3d]"), &board)
                .unwrap()
        );
        let mut deck = Deck::new();
        assert_eq!(
            sim.player_wins(&mut deck, &hole, &board, &board, score, 1).unwrap(),
            true
        );

        // 2d 3d pair the deuce on this board
        let board = hand("[2h,7s,9s,Jc,Kh]");
        let hole = hand("[4c,5c]");
        let score = sim.evaluator.evaluate_best(&hole, &board).unwrap();
        let mut deck = Deck::new();
        assert_eq!(
            sim.player_wins(&mut deck, &hole, &board, &board, score, 1).unwrap(),
            false
        );
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let hole = hand("[9c,9d]");
        let board = hand("[Ks,4h,4c]");
        let a = seeded(21).run(&hole, &board, 2, 500).unwrap();
        let b = seeded(21).run(&hole, &board, 2, 500).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.trials, 500);
    }

    #[test]
    fn test_parallel_trials() {
        let config = SimulatorConfig::default()
            .with_threads(4)
            .with_opponent_hole_cards(2)
            .with_seed(31);
        let sim = Simulator::new(Evaluator::default(), config);
        let hole = hand("[Ah,Ad]");
        let results = sim.run(&hole, &Hand::empty(), 1, 4001).unwrap();
        assert_eq!(results.trials, 4001);
        assert!(results.wins <= results.trials);
        let percent = i32::from(results.win_percentage());
        assert!((percent - 86).abs() <= 5, "{}", percent);
        // same seed, same split, same totals
        assert_eq!(sim.run(&hole, &Hand::empty(), 1, 4001).unwrap(), results);
        // fewer games than workers runs on the calling thread
        assert_eq!(sim.run(&hole, &Hand::empty(), 1, 3).unwrap().trials, 3);
    }

    #[test]
    fn test_win_percentage_rounds_down() {
        let results = SimulationResults { wins: 2, trials: 3 };
        assert_eq!(results.win_percentage(), 66);
        assert_eq!(SimulationResults::default().win_percentage(), 0);
        let json = serde_json::to_string(&results).unwrap();
        assert_eq!(json, r#"{"wins":2,"trials":3}"#);
    }
}
