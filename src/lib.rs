//! # Poker Odds
//! A bit packed poker hand strength library
//!
//! Currently supports
//!  - bit packed five card hand evaluation
//!  - best hand built from exactly two hole cards and three board cards,
//!    as in omaha, so the board alone never plays
//!  - monte carlo win probability against random opponents
//!
//! ## Hand Evaluator
//!
//! ```
//! use poker_odds::hand_evaluator::{evaluate_five, evaluate_best, Hand, HandCategory};
//! // cards are written as rank then suit: 2-9, T, J, Q, K, A and d, c, h, s
//! let hand: Hand = "[Ah,Kh,Qh,Jh,Th]".parse().unwrap();
//! let score = evaluate_five(hand.mask()).unwrap();
//! assert_eq!(HandCategory::from_strength(score), HandCategory::StraightFlush);
//!
//! let hole: Hand = "[7c,7d]".parse().unwrap();
//! let board: Hand = "[7h,2s,9c,Kd]".parse().unwrap();
//! let best = evaluate_best(&hole, &board).unwrap();
//! assert_eq!(HandCategory::from_strength(best), HandCategory::ThreeOfAKind);
//! ```
//!
//! ## Equity Calculator
//!
//! ```
//! use poker_odds::hand_evaluator::Hand;
//! use poker_odds::equity_calculator::{Simulator, SimulatorConfig};
//! use poker_odds::hand_evaluator::Evaluator;
//! let hole: Hand = "[Ah,Ad]".parse().unwrap();
//! let board = Hand::empty();
//! let config = SimulatorConfig::default().with_threads(2).with_seed(7);
//! let sim = Simulator::new(Evaluator::default(), config);
//! let results = sim.run(&hole, &board, 1, 1000).unwrap();
//! assert!(results.win_percentage() > 40);
//! ```

#[macro_use]
extern crate lazy_static;
extern crate crossbeam;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub use rank_tables;

pub mod card;
pub mod constants;
pub mod deck;
pub mod hand_evaluator;

pub mod equity_calculator;
