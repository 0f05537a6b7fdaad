//! Weekly calendar layout and shift slots.
//!
//! Every rota week starts on a Monday. Day indices count from the first
//! Monday of the rota, so `day / 7` is the week and `day % 7` the weekday
//! (0 = Monday, 5 = Saturday, 6 = Sunday).

/// Days in a rota week.
pub const DAYS_PER_WEEK: usize = 7;

/// Monday to Friday.
pub const WEEKDAYS: usize = 5;

/// Shift slots per week: five weekday on calls, one weekend on call, one ward week.
pub const SHIFTS_PER_WEEK: usize = 7;

/// Weekday index of Saturday.
pub const SATURDAY: usize = 5;

/// One of the seven duty slots of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shift {
    OnCallMon,
    OnCallTue,
    OnCallWed,
    OnCallThu,
    OnCallFri,
    /// Saturday and Sunday, covered by one person.
    OnCallWeekend,
    /// Monday to Friday on the ward.
    Ward,
}

impl Shift {
    /// All slots in storage order.
    pub const ALL: [Shift; SHIFTS_PER_WEEK] = [
        Shift::OnCallMon,
        Shift::OnCallTue,
        Shift::OnCallWed,
        Shift::OnCallThu,
        Shift::OnCallFri,
        Shift::OnCallWeekend,
        Shift::Ward,
    ];

    /// The five weekday on call slots.
    pub const WEEKDAY_ON_CALL: [Shift; WEEKDAYS] = [
        Shift::OnCallMon,
        Shift::OnCallTue,
        Shift::OnCallWed,
        Shift::OnCallThu,
        Shift::OnCallFri,
    ];

    /// Storage index of this slot within a week.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Slot for a storage index, `None` when `index >= 7`.
    pub fn from_index(index: usize) -> Option<Shift> {
        Self::ALL.get(index).copied()
    }

    /// Whether this is one of the Monday to Friday on call slots.
    pub fn is_weekday_on_call(self) -> bool {
        self.index() < WEEKDAYS
    }

    /// The on call slot covering a weekday index (0..7).
    ///
    /// Saturday and Sunday both map to [`Shift::OnCallWeekend`].
    pub fn on_call_for_weekday(weekday: usize) -> Option<Shift> {
        if weekday < WEEKDAYS {
            Some(Self::ALL[weekday])
        } else if weekday < DAYS_PER_WEEK {
            Some(Shift::OnCallWeekend)
        } else {
            None
        }
    }
}

/// Whether a weekday index falls on Saturday or Sunday.
pub fn is_weekend(weekday: usize) -> bool {
    weekday >= WEEKDAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for shift in Shift::ALL {
            assert_eq!(Shift::from_index(shift.index()), Some(shift));
        }
        assert_eq!(Shift::from_index(7), None);
    }

    #[test]
    fn test_on_call_for_weekday() {
        assert_eq!(Shift::on_call_for_weekday(0), Some(Shift::OnCallMon));
        assert_eq!(Shift::on_call_for_weekday(4), Some(Shift::OnCallFri));
        assert_eq!(Shift::on_call_for_weekday(5), Some(Shift::OnCallWeekend));
        assert_eq!(Shift::on_call_for_weekday(6), Some(Shift::OnCallWeekend));
        assert_eq!(Shift::on_call_for_weekday(7), None);
    }

    #[test]
    fn test_weekday_on_call_classification() {
        let weekday_slots = Shift::ALL
            .iter()
            .filter(|s| s.is_weekday_on_call())
            .count();
        assert_eq!(weekday_slots, WEEKDAYS);
        assert!(!Shift::Ward.is_weekday_on_call());
        assert!(!Shift::OnCallWeekend.is_weekday_on_call());
    }
}
