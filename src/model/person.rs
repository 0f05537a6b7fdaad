//! People on the rota.

/// Carry-over debt (positive) or credit (negative) from earlier rotas.
///
/// A bias is added to a person's running count before it is compared with
/// their fair-share target, and is also included in the pool totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bias {
    pub on_call_days: f64,
    pub on_call_weekends: f64,
    pub ward_weeks: f64,
    pub bank_holidays: f64,
}

/// Input description of one person, before validation.
///
/// # Examples
///
/// ```
/// use u_rota::model::PersonSpec;
///
/// let spec = PersonSpec::new("alice")
///     .with_full_time(0.6)
///     .with_active_days(7, 27)
///     .with_ward_week_bias(-1.0);
/// assert_eq!(spec.name, "alice");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PersonSpec {
    pub name: String,
    /// Fraction of full time worked, in `[0, 1]`.
    pub full_time: f64,
    /// First active day; `None` means the first day of the rota.
    pub first_day: Option<usize>,
    /// Last active day; `None` means the last day of the rota.
    pub last_day: Option<usize>,
    pub no_ward_weeks: bool,
    pub bias: Bias,
}

impl PersonSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_time: 1.0,
            first_day: None,
            last_day: None,
            no_ward_weeks: false,
            bias: Bias::default(),
        }
    }

    pub fn with_full_time(mut self, amount: f64) -> Self {
        self.full_time = amount;
        self
    }

    /// Restricts the person to the inclusive day range `first..=last`.
    pub fn with_active_days(mut self, first: usize, last: usize) -> Self {
        self.first_day = Some(first);
        self.last_day = Some(last);
        self
    }

    pub fn with_start_day(mut self, first: usize) -> Self {
        self.first_day = Some(first);
        self
    }

    pub fn with_end_day(mut self, last: usize) -> Self {
        self.last_day = Some(last);
        self
    }

    pub fn with_no_ward_weeks(mut self) -> Self {
        self.no_ward_weeks = true;
        self
    }

    pub fn with_on_call_day_bias(mut self, bias: f64) -> Self {
        self.bias.on_call_days = bias;
        self
    }

    pub fn with_on_call_weekend_bias(mut self, bias: f64) -> Self {
        self.bias.on_call_weekends = bias;
        self
    }

    pub fn with_ward_week_bias(mut self, bias: f64) -> Self {
        self.bias.ward_weeks = bias;
        self
    }

    pub fn with_bank_holiday_bias(mut self, bias: f64) -> Self {
        self.bias.bank_holidays = bias;
        self
    }
}

/// Fair-share targets of one person, bias inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Targets {
    pub on_call_days: f64,
    pub on_call_weekends: f64,
    pub ward_weeks: f64,
    pub on_call_bank_holidays: f64,
}

/// Informational spacing targets derived from the fair share.
///
/// A field is `None` when its denominator (expected shift occurrences or
/// expected ward weeks) is not positive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spacing {
    pub day_off_block_size: Option<f64>,
    pub ward_week_spacing: Option<f64>,
}

/// A validated person of a [`RotaConfig`](super::RotaConfig).
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub(crate) name: String,
    pub(crate) first_day: usize,
    pub(crate) last_day: usize,
    pub(crate) non_holiday_days: usize,
    pub(crate) full_time: f64,
    pub(crate) effective_full_time: f64,
    pub(crate) no_ward_weeks: bool,
    pub(crate) bias: Bias,
    pub(crate) targets: Targets,
    pub(crate) spacing: Spacing,
}

impl Person {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn first_day(&self) -> usize {
        self.first_day
    }

    pub fn last_day(&self) -> usize {
        self.last_day
    }

    /// Active days that are not holidays.
    pub fn non_holiday_days(&self) -> usize {
        self.non_holiday_days
    }

    pub fn full_time(&self) -> f64 {
        self.full_time
    }

    /// Full-time fraction scaled by the share of the rota the person is active.
    pub fn effective_full_time(&self) -> f64 {
        self.effective_full_time
    }

    pub fn no_ward_weeks(&self) -> bool {
        self.no_ward_weeks
    }

    pub fn bias(&self) -> &Bias {
        &self.bias
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn spacing(&self) -> &Spacing {
        &self.spacing
    }
}
