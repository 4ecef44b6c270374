use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparable score of a hand, higher is stronger
///
/// Bits 24-31: hand category
/// Bits 0-23: kicker ranks in 4 bit groups, most significant first
pub type Strength = u32;

// divide value by 0x01000000 to obtain the hand category
pub const HAND_CATEGORY_SHIFT: u8 = 24;

// Hand Categories
pub const NO_PAIR: Strength = 0;
pub const PAIR: Strength = 0x0100_0000;
pub const TWO_PAIR: Strength = 0x0200_0000;
pub const THREE_OF_A_KIND: Strength = 0x0300_0000;
pub const STRAIGHT: Strength = 0x0400_0000;
pub const FLUSH: Strength = 0x0500_0000;
pub const FULL_HOUSE: Strength = 0x0600_0000;
pub const FOUR_OF_A_KIND: Strength = 0x0700_0000;
pub const STRAIGHT_FLUSH: Strength = 0x0800_0000;

// Two card categories
pub const COUPLE_NONE: Strength = 0;
pub const COUPLE_CONSECUTIVE: Strength = 0x0100_0000;
pub const COUPLE_COLOR: Strength = 0x0200_0000;
pub const COUPLE_CONSECUTIVE_COLOR: Strength = 0x0300_0000;
pub const COUPLE_PAIR: Strength = 0x0400_0000;

// kicker field offsets
pub const RANK_SHIFT_1: u32 = 4;
pub const RANK_SHIFT_2: u32 = 8;
pub const RANK_SHIFT_3: u32 = 12;
pub const RANK_SHIFT_4: u32 = 16;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    /// Decode the category of a five card strength
    pub fn from_strength(strength: Strength) -> HandCategory {
        match strength >> HAND_CATEGORY_SHIFT {
            0 => HandCategory::HighCard,
            1 => HandCategory::Pair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            _ => HandCategory::StraightFlush,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "high card",
            HandCategory::Pair => "pair",
            HandCategory::TwoPair => "two pair",
            HandCategory::ThreeOfAKind => "three of a kind",
            HandCategory::Straight => "straight",
            HandCategory::Flush => "flush",
            HandCategory::FullHouse => "full house",
            HandCategory::FourOfAKind => "four of a kind",
            HandCategory::StraightFlush => "straight flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Texture of a two card hand
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CoupleCategory {
    Unconnected,
    Connector,
    Suited,
    SuitedConnector,
    PocketPair,
}

impl CoupleCategory {
    /// Decode the category of a two card strength
    pub fn from_strength(strength: Strength) -> CoupleCategory {
        match strength >> HAND_CATEGORY_SHIFT {
            0 => CoupleCategory::Unconnected,
            1 => CoupleCategory::Connector,
            2 => CoupleCategory::Suited,
            3 => CoupleCategory::SuitedConnector,
            _ => CoupleCategory::PocketPair,
        }
    }
}
