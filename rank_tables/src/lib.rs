//! Lookup tables over 13-bit rank masks
//!
//! Bit `i` of a rank mask is set when the rank with index `i` is present,
//! index 0 being a deuce and index 12 an ace.
//!
//! Three tables are generated, each covering every possible mask:
//!  - `rank_count`: number of set bits
//!  - `highest_rank`: index of the highest set bit
//!  - `top_five_ranks`: the five highest set indices packed in 4 bit groups,
//!    highest rank in the most significant group

use thiserror::Error;

/// Number of distinct ranks
pub const RANK_COUNT: u8 = 13;

/// Every 13 bit mask has an entry
pub const TABLE_SIZE: usize = 1 << RANK_COUNT;

/// Number of ranks packed into `top_five_ranks`
const MAX_PACKED_RANKS: u8 = 5;
/// Width of one packed rank
const RANK_SHIFT: u32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("rank mask {mask:#x} is outside of the table (size {size})")]
    OutOfBounds { mask: usize, size: usize },
}

/// Read only rank mask lookup tables
///
/// Built once and shared by every evaluator
#[derive(Debug, Clone)]
pub struct RankTables {
    rank_count: Vec<u8>,
    highest_rank: Vec<u8>,
    top_five_ranks: Vec<u32>,
}

impl RankTables {
    /// Generate all three tables
    ///
    /// # Example
    ///
    /// ```
    /// use rank_tables::RankTables;
    /// let tables = RankTables::build();
    /// // ace, king and deuce
    /// assert_eq!(tables.rank_count(0x1801).unwrap(), 3);
    /// assert_eq!(tables.highest_rank(0x1801).unwrap(), 12);
    /// assert_eq!(tables.top_five_ranks(0x1801).unwrap(), 0xcb0);
    /// ```
    pub fn build() -> Self {
        let mut tables = RankTables {
            rank_count: vec![0u8; TABLE_SIZE],
            highest_rank: vec![0u8; TABLE_SIZE],
            top_five_ranks: vec![0u32; TABLE_SIZE],
        };
        // mask 0 keeps all zero entries
        for mask in 1..TABLE_SIZE {
            tables.populate(mask);
        }
        log::debug!("{:<32}{:<32}", "built rank tables", TABLE_SIZE);
        tables
    }

    fn populate(&mut self, mask: usize) {
        let mut count = 0u8;
        let mut packed = 0u32;
        // scan from ace down to deuce
        for r in (0..RANK_COUNT).rev() {
            if mask & (1 << r) == 0 {
                continue;
            }
            count += 1;
            if count == 1 {
                self.highest_rank[mask] = r;
            }
            if count <= MAX_PACKED_RANKS {
                packed = (packed << RANK_SHIFT) + u32::from(r);
            }
        }
        self.rank_count[mask] = count;
        self.top_five_ranks[mask] = packed;
    }

    /// Number of entries in each table
    pub fn len(&self) -> usize {
        self.rank_count.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rank_count.is_empty()
    }

    /// Number of distinct ranks in `mask`
    pub fn rank_count(&self, mask: usize) -> Result<u8, TableError> {
        self.check(mask)?;
        Ok(self.rank_count[mask])
    }

    /// Index of the highest rank in `mask`, 0 for the empty mask
    pub fn highest_rank(&self, mask: usize) -> Result<u8, TableError> {
        self.check(mask)?;
        Ok(self.highest_rank[mask])
    }

    /// Up to five highest ranks of `mask`, packed 4 bits each
    pub fn top_five_ranks(&self, mask: usize) -> Result<u32, TableError> {
        self.check(mask)?;
        Ok(self.top_five_ranks[mask])
    }

    fn check(&self, mask: usize) -> Result<(), TableError> {
        if mask >= self.len() {
            return Err(TableError::OutOfBounds {
                mask,
                size: self.len(),
            });
        }
        Ok(())
    }
}

impl Default for RankTables {
    fn default() -> Self {
        RankTables::build()
    }
}
