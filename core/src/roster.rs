//! Roster specification and eligible pool construction.

use crate::types::SeatNumber;
use std::collections::BTreeSet;

/// Roster size plus the numbers to leave out of the draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSpec {
    pub last_number: SeatNumber,
    pub excluded:    BTreeSet<SeatNumber>,
}

impl RosterSpec {
    pub fn new(last_number: SeatNumber, excluded: impl IntoIterator<Item = SeatNumber>) -> Self {
        Self {
            last_number,
            excluded: excluded.into_iter().collect(),
        }
    }

    /// Ascending `1..=last_number` without the excluded numbers.
    /// A non-positive last number yields an empty pool.
    pub fn eligible_pool(&self) -> Vec<SeatNumber> {
        (1..=self.last_number)
            .filter(|n| !self.excluded.contains(n))
            .collect()
    }

    /// Size of the eligible pool, without building it.
    pub fn pool_size(&self) -> usize {
        if self.last_number < 1 {
            return 0;
        }
        let total = usize::try_from(self.last_number).unwrap_or(usize::MAX);
        let excluded_in_range = self.excluded.range(1..=self.last_number).count();
        total - excluded_in_range
    }
}
