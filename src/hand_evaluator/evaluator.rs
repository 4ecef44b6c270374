use rank_tables::{RankTables, TableError};
use thiserror::Error;

use super::hand::Hand;
use super::strength::*;
use crate::card::Rank;
use crate::constants::{RANK_MASK, SUIT_SHIFTS};

/// Every five consecutive ranks from 2-6 up to T-A
const STRAIGHTS: [u64; 9] = [
    0x001f, 0x003e, 0x007c, 0x00f8, 0x01f0, 0x03e0, 0x07c0, 0x0f80, 0x1f00,
];
/// A-2-3-4-5
const WHEEL: u64 = 0x100f;

lazy_static! {
    /// Rank tables shared by the default evaluator
    pub static ref RANK_TABLES: RankTables = RankTables::build();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Score a five card mask with the shared tables
///
/// # Example
///
/// ```
/// use poker_odds::hand_evaluator::{evaluate_five, Hand, HandCategory};
/// let hand: Hand = "[Ah,Ad,Ac,Kh,Ks]".parse().unwrap();
/// let strength = evaluate_five(hand.mask()).unwrap();
/// assert_eq!(HandCategory::from_strength(strength), HandCategory::FullHouse);
/// ```
pub fn evaluate_five(mask: u64) -> Result<Strength, EvalError> {
    Evaluator::default().evaluate_five(mask)
}

/// Score a two card mask with the shared tables
pub fn evaluate_two(mask: u64) -> Result<Strength, EvalError> {
    Evaluator::default().evaluate_two(mask)
}

/// Best five card score using two hole cards and three board cards
///
/// # Example
///
/// ```
/// use poker_odds::hand_evaluator::{evaluate_best, Hand, HandCategory};
/// let hole: Hand = "[Ah,Ad]".parse().unwrap();
/// let board: Hand = "[Ac,As,Kd,2c,3h]".parse().unwrap();
/// let strength = evaluate_best(&hole, &board).unwrap();
/// assert_eq!(HandCategory::from_strength(strength), HandCategory::FourOfAKind);
/// ```
pub fn evaluate_best(hole: &Hand, board: &Hand) -> Result<Strength, EvalError> {
    Evaluator::default().evaluate_best(hole, board)
}

/// Split a card mask into its diamond, club, heart and spade rank masks
fn split_lanes(mask: u64) -> [u64; 4] {
    [
        (mask >> SUIT_SHIFTS[0]) & RANK_MASK,
        (mask >> SUIT_SHIFTS[1]) & RANK_MASK,
        (mask >> SUIT_SHIFTS[2]) & RANK_MASK,
        (mask >> SUIT_SHIFTS[3]) & RANK_MASK,
    ]
}

/// true when the lowest two ranks of `ranks` are adjacent
fn is_connected(ranks: u64) -> bool {
    if ranks == 0 {
        return false;
    }
    let run = ranks >> ranks.trailing_zeros();
    run & 0b11 == 0b11
}

/// Hand evaluator over a set of rank tables
#[derive(Debug, Copy, Clone)]
pub struct Evaluator<'t> {
    tables: &'t RankTables,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Evaluator::new(&RANK_TABLES)
    }
}

impl<'t> Evaluator<'t> {
    pub fn new(tables: &'t RankTables) -> Self {
        Evaluator { tables }
    }

    pub fn tables(&self) -> &'t RankTables {
        self.tables
    }

    fn count(&self, ranks: u64) -> Result<u8, EvalError> {
        Ok(self.tables.rank_count(ranks as usize)?)
    }

    fn high(&self, ranks: u64) -> Result<Strength, EvalError> {
        Ok(Strength::from(self.tables.highest_rank(ranks as usize)?))
    }

    fn top(&self, ranks: u64) -> Result<Strength, EvalError> {
        Ok(self.tables.top_five_ranks(ranks as usize)?)
    }

    /// Score exactly five cards
    ///
    /// Ranks shared between suit lanes give away the hand shape:
    /// a rank held in an odd number of suits survives the xor of all lanes,
    /// a rank held in an even number of suits cancels out.
    pub fn evaluate_five(&self, mask: u64) -> Result<Strength, EvalError> {
        let lanes = split_lanes(mask);
        let [d, c, h, s] = lanes;
        let ranks = d | c | h | s;
        let odd = d ^ c ^ h ^ s;

        let strength = match self.count(ranks)? {
            2 => {
                if c & d & h & s == 0 {
                    // trips survive the xor, the pair cancels
                    FULL_HOUSE
                        | self.high(odd)? << RANK_SHIFT_4
                        | self.high(odd ^ ranks)? << RANK_SHIFT_3
                } else {
                    // the kicker sits in a single lane
                    let quads = c & d;
                    FOUR_OF_A_KIND
                        | self.high(quads)? << RANK_SHIFT_4
                        | self.high(quads ^ ranks)? << RANK_SHIFT_3
                }
            }
            3 => {
                if odd == ranks {
                    // any three lanes contain one of these intersections
                    let trips = [c & d, c & h, d & h]
                        .iter()
                        .copied()
                        .find(|&i| i != 0)
                        .unwrap_or(0);
                    THREE_OF_A_KIND
                        | self.high(trips)? << RANK_SHIFT_4
                        | self.top(trips ^ ranks)? << RANK_SHIFT_2
                } else {
                    // only the kicker survives the xor
                    TWO_PAIR
                        | self.top(odd ^ ranks)? << RANK_SHIFT_3
                        | self.high(odd)? << RANK_SHIFT_2
                }
            }
            4 => {
                PAIR | self.high(ranks ^ odd)? << RANK_SHIFT_4 | self.top(odd)? << RANK_SHIFT_1
            }
            _ => self.evaluate_distinct(ranks, &lanes)?,
        };
        Ok(strength)
    }

    /// Five distinct ranks: straight, flush, straight flush or high card
    fn evaluate_distinct(&self, ranks: u64, lanes: &[u64; 4]) -> Result<Strength, EvalError> {
        let straight = self.straight_value(ranks)?;
        let value = if straight != 0 {
            straight
        } else {
            self.top(ranks)?
        };
        if !lanes.contains(&ranks) {
            return Ok(value);
        }
        if straight != 0 {
            Ok(STRAIGHT_FLUSH - STRAIGHT + value)
        } else {
            Ok(FLUSH | value)
        }
    }

    /// Straight value of a rank mask, 0 when it is not a straight
    ///
    /// The wheel is a five high straight
    pub fn straight_value(&self, ranks: u64) -> Result<Strength, EvalError> {
        if STRAIGHTS.contains(&ranks) {
            Ok(STRAIGHT | self.high(ranks)? << RANK_SHIFT_4)
        } else if ranks == WHEEL {
            Ok(STRAIGHT | self.high(Rank::Five.bit())? << RANK_SHIFT_4)
        } else {
            Ok(0)
        }
    }

    /// Score the texture of two cards
    ///
    /// Pocket pairs rank above everything else, then suited connectors,
    /// suited cards and connectors. Both ranks break ties.
    pub fn evaluate_two(&self, mask: u64) -> Result<Strength, EvalError> {
        let lanes = split_lanes(mask);
        let ranks = lanes.iter().fold(0, |acc, lane| acc | lane);

        if self.count(ranks)? == 1 {
            return Ok(COUPLE_PAIR | self.high(ranks)? << RANK_SHIFT_4);
        }

        let suited = lanes.iter().filter(|&&lane| lane != 0).count() == 1;
        let category = match (suited, is_connected(ranks)) {
            (true, true) => COUPLE_CONSECUTIVE_COLOR,
            (true, false) => COUPLE_COLOR,
            (false, true) => COUPLE_CONSECUTIVE,
            (false, false) => COUPLE_NONE,
        };
        Ok(category | self.top(ranks)? << RANK_SHIFT_3)
    }

    /// Best score over every couple of `hole` joined with every trio of `board`
    ///
    /// Works for any hole size, each candidate uses exactly two hole cards.
    /// Returns `NO_PAIR` when either hand is too small.
    pub fn evaluate_best(&self, hole: &Hand, board: &Hand) -> Result<Strength, EvalError> {
        let mut best = NO_PAIR;
        for couple in hole.couples() {
            for trio in board.trios() {
                let score = self.evaluate_five(couple | trio)?;
                if score > best {
                    best = score;
                }
            }
        }
        Ok(best)
    }
}
