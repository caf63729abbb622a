// src/duration.rs
//! Fixed duration-unit table used by the schedule evaluator.

/// Seconds in one day.
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Seconds in one display month (30 days), the denominator convention for the
/// "amount per month" accrual rate.
pub const SECONDS_PER_MONTH: u64 = 30 * SECONDS_PER_DAY;

/// Named duration units and their lengths in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Hour,
    Day,
    Week,
    Biweek,
    Month,
    Year,
}

impl DurationUnit {
    /// Length of the unit in seconds.
    pub const fn seconds(self) -> u64 {
        match self {
            DurationUnit::Hour => 60 * 60,
            DurationUnit::Day => SECONDS_PER_DAY,
            DurationUnit::Week => 7 * SECONDS_PER_DAY,
            DurationUnit::Biweek => 2 * 7 * SECONDS_PER_DAY,
            DurationUnit::Month => SECONDS_PER_MONTH,
            DurationUnit::Year => 365 * SECONDS_PER_DAY,
        }
    }

    /// Look a unit up by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hour" => Some(DurationUnit::Hour),
            "day" => Some(DurationUnit::Day),
            "week" => Some(DurationUnit::Week),
            "biweek" => Some(DurationUnit::Biweek),
            "month" => Some(DurationUnit::Month),
            "year" => Some(DurationUnit::Year),
            _ => None,
        }
    }
}
