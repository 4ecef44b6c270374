/// Number of cards in standard deck
pub const CARD_COUNT: u8 = 52;

/// u8 rank to char table
pub const RANK_TO_CHAR: &[char; 13] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// u8 suit to char table
pub const SUIT_TO_CHAR: &[char; 4] = &['d', 'c', 'h', 's'];

/// Bit offset of each suit's 16 bit lane in a card mask
pub const SUIT_SHIFTS: &[u8; 4] = &[0, 16, 32, 48];

/// Mask of the 13 rank bits inside a suit lane
pub const RANK_MASK: u64 = 0x1fff;

/// Number of public cards on a complete board
pub const BOARD_CARDS: usize = 5;

/// Cards used from the private hand in a scored five card combination
pub const HOLE_CARDS_USED: usize = 2;

/// Hole cards dealt to each simulated opponent
pub const DEFAULT_OPPONENT_HOLE_CARDS: usize = 4;

/// Simulated games used for one betting decision
pub const DEFAULT_ITERATIONS: u32 = 200;
