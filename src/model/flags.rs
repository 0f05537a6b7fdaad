//! Per-person boolean flags over days or weeks.

/// Dense `rows x people` boolean grid.
///
/// Rows are day indices for day-level flags (holidays, invalid or disliked
/// on call days) and week indices for week-level flags (invalid or disliked
/// ward weeks). Reads outside the grid return `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagGrid {
    rows: usize,
    people: usize,
    bits: Vec<bool>,
}

impl FlagGrid {
    /// Creates an all-clear grid.
    pub fn new(rows: usize, people: usize) -> Self {
        Self {
            rows,
            people,
            bits: vec![false; rows * people],
        }
    }

    /// Whether the flag is set for `person` at `row`.
    #[inline]
    pub fn get(&self, row: usize, person: usize) -> bool {
        row < self.rows && person < self.people && self.bits[row * self.people + person]
    }

    /// Sets the flag. Out-of-range writes are ignored; callers range-check first.
    #[inline]
    pub fn set(&mut self, row: usize, person: usize) {
        if row < self.rows && person < self.people {
            self.bits[row * self.people + person] = true;
        }
    }
}

/// Day-indexed set of days, e.g. bank holidays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySet {
    bits: Vec<bool>,
}

impl DaySet {
    pub fn new(days: usize) -> Self {
        Self {
            bits: vec![false; days],
        }
    }

    #[inline]
    pub fn contains(&self, day: usize) -> bool {
        self.bits.get(day).copied().unwrap_or(false)
    }

    /// Inserts a day, returning `true` if it was not present.
    pub fn insert(&mut self, day: usize) -> bool {
        match self.bits.get_mut(day) {
            Some(bit) if !*bit => {
                *bit = true;
                true
            }
            _ => false,
        }
    }

    /// Number of days in the set.
    pub(crate) fn len(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut grid = FlagGrid::new(14, 3);
        grid.set(3, 1);
        assert!(grid.get(3, 1));
        assert!(!grid.get(3, 0));
        assert!(!grid.get(4, 1));
        assert!(!grid.get(3, 2));
    }

    #[test]
    fn test_out_of_range_reads_are_clear() {
        let mut grid = FlagGrid::new(7, 2);
        grid.set(6, 1);
        assert!(!grid.get(7, 1));
        assert!(!grid.get(6, 2));
        grid.set(7, 0);
        assert!((0..7).all(|row| !grid.get(row, 0)));
    }

    #[test]
    fn test_day_set() {
        let mut set = DaySet::new(7);
        assert_eq!(set.len(), 0);
        assert!(set.insert(2));
        assert!(!set.insert(2));
        assert!(!set.insert(9));
        assert!(set.contains(2));
        assert!(!set.contains(9));
        assert_eq!(set.len(), 1);
    }
}
