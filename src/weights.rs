//! Named objective coefficients.
//!
//! The scorer adds each coefficient as-is to a value that the search
//! maximizes. Whether a term acts as a penalty or a bonus depends only on
//! the sign chosen by the caller.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::error::RotaError;

/// One term of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Weight {
    ShiftOverlap,
    WorkOnHoliday,
    OnCallOnInvalidDay,
    OnWardOnInvalidWeek,
    NotOnCallWhenForced,
    WorkFollowingOnCall,
    OnCallOnDislikedDay,
    WardWeekOnDislikedWeek,
    OnCallDayDifference,
    OnCallBankHolidayDifference,
    OnCallWeekendDifference,
    WardWeekDifference,
    OnCallWeekendFollowsWardWeek,
    MultipleOnCallsPerWeek,
    WardWeekOneWeekAgo,
    WardWeekTwoWeeksAgo,
    DayOff,
    DayOffDecay,
    NoWardWeek,
    NoWardWeekDecay,
}

impl Weight {
    pub const COUNT: usize = 20;

    pub const ALL: [Weight; Weight::COUNT] = [
        Weight::ShiftOverlap,
        Weight::WorkOnHoliday,
        Weight::OnCallOnInvalidDay,
        Weight::OnWardOnInvalidWeek,
        Weight::NotOnCallWhenForced,
        Weight::WorkFollowingOnCall,
        Weight::OnCallOnDislikedDay,
        Weight::WardWeekOnDislikedWeek,
        Weight::OnCallDayDifference,
        Weight::OnCallBankHolidayDifference,
        Weight::OnCallWeekendDifference,
        Weight::WardWeekDifference,
        Weight::OnCallWeekendFollowsWardWeek,
        Weight::MultipleOnCallsPerWeek,
        Weight::WardWeekOneWeekAgo,
        Weight::WardWeekTwoWeeksAgo,
        Weight::DayOff,
        Weight::DayOffDecay,
        Weight::NoWardWeek,
        Weight::NoWardWeekDecay,
    ];

    /// Name used in weight files.
    pub fn name(self) -> &'static str {
        match self {
            Weight::ShiftOverlap => "shift_overlap",
            Weight::WorkOnHoliday => "work_on_holiday",
            Weight::OnCallOnInvalidDay => "on_call_on_invalid_day",
            Weight::OnWardOnInvalidWeek => "on_ward_on_invalid_week",
            Weight::NotOnCallWhenForced => "not_on_call_when_forced",
            Weight::WorkFollowingOnCall => "work_following_on_call",
            Weight::OnCallOnDislikedDay => "on_call_on_disliked_day",
            Weight::WardWeekOnDislikedWeek => "ward_week_on_disliked_week",
            Weight::OnCallDayDifference => "on_call_day_difference",
            Weight::OnCallBankHolidayDifference => "on_call_bank_holiday_difference",
            Weight::OnCallWeekendDifference => "on_call_weekend_difference",
            Weight::WardWeekDifference => "ward_week_difference",
            Weight::OnCallWeekendFollowsWardWeek => "on_call_weekend_follows_ward_week",
            Weight::MultipleOnCallsPerWeek => "multiple_on_calls_per_week",
            Weight::WardWeekOneWeekAgo => "ward_week_one_week_ago",
            Weight::WardWeekTwoWeeksAgo => "ward_week_two_weeks_ago",
            Weight::DayOff => "day_off",
            Weight::DayOffDecay => "day_off_decay",
            Weight::NoWardWeek => "no_ward_week",
            Weight::NoWardWeekDecay => "no_ward_week_decay",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weight {
    type Err = RotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weight::ALL
            .iter()
            .copied()
            .find(|w| w.name() == s)
            .ok_or_else(|| RotaError::UnknownWeight(s.to_string()))
    }
}

/// Coefficient table, one value per [`Weight`]. Missing terms are zero.
///
/// # Examples
///
/// ```
/// use u_rota::weights::{Weight, Weights};
///
/// let weights = Weights::from_csv_str("shift_overlap,-100\nday_off,0.5\n").unwrap();
/// assert_eq!(weights[Weight::ShiftOverlap], -100.0);
/// assert_eq!(weights[Weight::DayOff], 0.5);
/// assert_eq!(weights[Weight::WardWeekDifference], 0.0);
///
/// assert!(Weights::from_csv_str("no_such_term,1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BTreeMap<String, f64>",
        into = "BTreeMap<String, f64>"
    )
)]
pub struct Weights {
    values: [f64; Weight::COUNT],
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            values: [0.0; Weight::COUNT],
        }
    }
}

impl Weights {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, weight: Weight) -> f64 {
        self.values[weight.index()]
    }

    pub fn set(&mut self, weight: Weight, value: f64) {
        self.values[weight.index()] = value;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, weight: Weight, value: f64) -> Self {
        self.set(weight, value);
        self
    }

    /// Every term with its value, in [`Weight::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Weight, f64)> + '_ {
        Weight::ALL.iter().map(move |&w| (w, self.get(w)))
    }

    /// Reads `name,value` lines. Blank lines are skipped; an unknown name or
    /// a value that is not a finite number is an error.
    pub fn from_csv_str(text: &str) -> Result<Self, RotaError> {
        let mut weights = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (name, value) = line.split_once(',').unwrap_or((line, ""));
            let weight: Weight = name.trim().parse()?;
            let value = value.trim();
            let parsed = value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RotaError::InvalidWeightValue {
                    name: weight.name().to_string(),
                    value: value.to_string(),
                })?;
            weights.set(weight, parsed);
        }
        Ok(weights)
    }
}

impl Index<Weight> for Weights {
    type Output = f64;

    fn index(&self, weight: Weight) -> &f64 {
        &self.values[weight.index()]
    }
}

impl TryFrom<BTreeMap<String, f64>> for Weights {
    type Error = RotaError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut weights = Self::default();
        for (name, value) in map {
            let weight: Weight = name.parse()?;
            if !value.is_finite() {
                return Err(RotaError::InvalidWeightValue {
                    name,
                    value: value.to_string(),
                });
            }
            weights.set(weight, value);
        }
        Ok(weights)
    }
}

impl From<Weights> for BTreeMap<String, f64> {
    fn from(weights: Weights) -> Self {
        weights
            .iter()
            .map(|(w, v)| (w.name().to_string(), v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique_and_roundtrip() {
        let mut names: Vec<&str> = Weight::ALL.iter().map(|w| w.name()).collect();
        for w in Weight::ALL {
            assert_eq!(w.name().parse::<Weight>().unwrap(), w);
        }
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Weight::COUNT);
    }

    #[test]
    fn test_defaults_to_zero() {
        let weights = Weights::default();
        assert!(weights.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_parse_csv() {
        let text = "shift_overlap,-1000\n\n  day_off_decay , 0.9 \r\nno_ward_week,2\n";
        let weights = Weights::from_csv_str(text).unwrap();
        assert_eq!(weights[Weight::ShiftOverlap], -1000.0);
        assert_eq!(weights[Weight::DayOffDecay], 0.9);
        assert_eq!(weights[Weight::NoWardWeek], 2.0);
        assert_eq!(weights[Weight::DayOff], 0.0);
    }

    #[test]
    fn test_parse_unknown_name() {
        assert_eq!(
            Weights::from_csv_str("shift_overlapp,1").unwrap_err(),
            RotaError::UnknownWeight("shift_overlapp".into())
        );
    }

    #[test]
    fn test_parse_bad_value() {
        assert!(matches!(
            Weights::from_csv_str("day_off,lots"),
            Err(RotaError::InvalidWeightValue { .. })
        ));
        assert!(matches!(
            Weights::from_csv_str("day_off"),
            Err(RotaError::InvalidWeightValue { .. })
        ));
        for text in ["day_off,NaN", "shift_overlap,-inf", "no_ward_week,inf"] {
            assert!(matches!(
                Weights::from_csv_str(text),
                Err(RotaError::InvalidWeightValue { .. })
            ));
        }
    }

    #[test]
    fn test_map_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut map = BTreeMap::new();
            map.insert("day_off".to_string(), value);
            match Weights::try_from(map) {
                Err(RotaError::InvalidWeightValue { name, .. }) => assert_eq!(name, "day_off"),
                other => panic!("expected InvalidWeightValue, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_map_conversion() {
        let weights = Weights::new().with(Weight::WardWeekDifference, -3.0);
        let map: BTreeMap<String, f64> = weights.into();
        assert_eq!(map.len(), Weight::COUNT);
        assert_eq!(map["ward_week_difference"], -3.0);
        assert_eq!(Weights::try_from(map).unwrap(), weights);

        let mut bad = BTreeMap::new();
        bad.insert("bogus".to_string(), 1.0);
        assert!(Weights::try_from(bad).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_json() {
        let weights: Weights = serde_json::from_str(r#"{"day_off": 1.5}"#).unwrap();
        assert_eq!(weights[Weight::DayOff], 1.5);
        assert!(serde_json::from_str::<Weights>(r#"{"nope": 1.0}"#).is_err());
    }
}
