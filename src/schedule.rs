// src/schedule.rs
//! Schedule evaluator: pure derivation of phase, status text, claimable
//! amount and chart series from a vesting record and one evaluation instant.
//!
//! The evaluation instant is passed in explicitly and used for every
//! comparison, so a single status never mixes two wall-clock readings.
//!
//! The "amount per month" rate assumes linear vesting across the whole
//! `[start_time, end_time]` window and deliberately ignores `cliff_length`
//! and `disabled_at`; the actually claimable amount always comes from the
//! record's externally reported `unclaimed` field, never from this rate.

use crate::amount::{parse_amount, round_display, AmountError};
use crate::duration::{SECONDS_PER_DAY, SECONDS_PER_MONTH};
use crate::format::format_days;
use crate::types::VestingRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// `end_time == start_time`: the accrual rate has no defined value.
    #[error("degenerate schedule: end time equals start time ({0})")]
    DegenerateSchedule(u64),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Where a grant sits in its lifecycle at the evaluation instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    BeforeCliff,
    Accruing,
    Ended,
}

/// Derived, display-ready view of one record at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleStatus {
    pub phase: Phase,
    /// Human-readable summary: cliff countdown, monthly rate or end marker.
    pub status_text: String,
    /// The record's reported `unclaimed` amount in human units. Claims are
    /// driven by this value; accrual is never recomputed locally.
    pub claimable: Decimal,
}

/// Evaluate a record at `now` (Unix seconds).
pub fn evaluate(record: &VestingRecord, now: u64) -> Result<ScheduleStatus, ScheduleError> {
    if record.end_time == record.start_time {
        return Err(ScheduleError::DegenerateSchedule(record.start_time));
    }

    let total_locked = parse_amount(&record.total_locked)?;
    let total_claimed = parse_amount(&record.total_claimed)?;
    let claimable = parse_amount(&record.unclaimed)?;

    // A fully claimed or disabled-and-elapsed grant is over no matter what
    // the cliff says.
    if total_claimed == total_locked || now >= record.effective_end_time() {
        return Ok(ScheduleStatus {
            phase: Phase::Ended,
            status_text: "Vesting ended".to_string(),
            claimable,
        });
    }

    if now < record.cliff_end() {
        let days = Decimal::from(record.cliff_end() - now) / Decimal::from(SECONDS_PER_DAY);
        return Ok(ScheduleStatus {
            phase: Phase::BeforeCliff,
            status_text: format!("Cliff ends in {} days", format_days(days)),
            claimable,
        });
    }

    let duration = Decimal::from(record.end_time - record.start_time);
    let per_month = round_display(total_locked / duration * Decimal::from(SECONDS_PER_MONTH));
    Ok(ScheduleStatus {
        phase: Phase::Accruing,
        status_text: format!("Vesting {per_month:.2} / month"),
        claimable,
    })
}

/// One chart sample: seconds since `start_time` and the accrued fraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub elapsed_secs: u64,
    pub fraction: f64,
}

/// Finite, restartable accrual curve for one record: flat zero through the
/// cliff, linear to 1.0 at `end_time`, sampled once per day. Pure data -
/// `points()` yields an identical sequence every call.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    total_secs: u64,
    cliff_secs: u64,
}

impl ChartSeries {
    pub fn for_record(record: &VestingRecord) -> Result<Self, ScheduleError> {
        if record.end_time == record.start_time {
            return Err(ScheduleError::DegenerateSchedule(record.start_time));
        }
        Ok(Self {
            total_secs: record.end_time - record.start_time,
            cliff_secs: record.cliff_length,
        })
    }

    /// Number of points the series yields.
    pub fn len(&self) -> usize {
        (self.total_secs.div_ceil(SECONDS_PER_DAY) + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lazy walk over the curve, one sample per day plus the exact endpoint.
    pub fn points(&self) -> impl Iterator<Item = ChartPoint> + '_ {
        let days = self.total_secs.div_ceil(SECONDS_PER_DAY);
        (0..=days).map(move |day| {
            let elapsed_secs = (day * SECONDS_PER_DAY).min(self.total_secs);
            let fraction = if elapsed_secs < self.cliff_secs {
                0.0
            } else {
                elapsed_secs as f64 / self.total_secs as f64
            };
            ChartPoint {
                elapsed_secs,
                fraction,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::DurationUnit;

    fn record() -> VestingRecord {
        VestingRecord {
            contract: "0xgrant".into(),
            recipient: "0xme".into(),
            admin: "0xadmin".into(),
            token: "0xtoken".into(),
            token_name: "Morph Token".into(),
            token_symbol: "MPX".into(),
            token_decimals: 18,
            total_locked: "1200".into(),
            total_claimed: "0".into(),
            unclaimed: "100".into(),
            start_time: 1_000,
            end_time: 1_000 + DurationUnit::Year.seconds(),
            cliff_length: 0,
            timestamp: 1_000,
            disabled_at: None,
        }
    }

    #[test]
    fn test_before_cliff_reports_fractional_days() {
        let mut r = record();
        r.cliff_length = 10 * SECONDS_PER_DAY;
        let now = r.start_time + 3 * SECONDS_PER_DAY;

        let status = evaluate(&r, now).unwrap();
        assert_eq!(status.phase, Phase::BeforeCliff);
        assert_eq!(status.status_text, "Cliff ends in 7.00 days");

        // Half a day into day 3: (cliff_end - now) / 86400 = 6.50
        let status = evaluate(&r, now + SECONDS_PER_DAY / 2).unwrap();
        assert_eq!(status.status_text, "Cliff ends in 6.50 days");
    }

    #[test]
    fn test_fully_claimed_is_ended_regardless_of_now() {
        let mut r = record();
        r.total_claimed = "1200".into();
        r.cliff_length = 10 * SECONDS_PER_DAY;

        for now in [0, r.start_time, r.start_time + SECONDS_PER_DAY, r.end_time + 1] {
            let status = evaluate(&r, now).unwrap();
            assert_eq!(status.phase, Phase::Ended, "now={now}");
            assert_eq!(status.status_text, "Vesting ended");
        }
    }

    #[test]
    fn test_elapsed_end_time_is_ended() {
        let r = record();
        let status = evaluate(&r, r.end_time).unwrap();
        assert_eq!(status.phase, Phase::Ended);
    }

    #[test]
    fn test_disabled_at_caps_the_end() {
        let mut r = record();
        r.disabled_at = Some(r.start_time + 100);

        let status = evaluate(&r, r.start_time + 100).unwrap();
        assert_eq!(status.phase, Phase::Ended);

        // Just before the disable point the grant still accrues.
        let status = evaluate(&r, r.start_time + 99).unwrap();
        assert_eq!(status.phase, Phase::Accruing);
    }

    #[test]
    fn test_degenerate_schedule_never_divides() {
        let mut r = record();
        r.end_time = r.start_time;
        r.cliff_length = 0;
        assert_eq!(
            evaluate(&r, r.start_time + 5),
            Err(ScheduleError::DegenerateSchedule(1_000))
        );
        assert!(ChartSeries::for_record(&r).is_err());
    }

    #[test]
    fn test_mid_period_monthly_rate() {
        // 1200 over one year, evaluated mid-period:
        // 1200 / 31536000 * 2592000 = 98.6301... -> 98.63
        let r = record();
        let now = r.start_time + DurationUnit::Year.seconds() / 2;

        let status = evaluate(&r, now).unwrap();
        assert_eq!(status.phase, Phase::Accruing);
        assert_eq!(status.status_text, "Vesting 98.63 / month");
        assert_eq!(status.claimable, parse_amount("100").unwrap());
    }

    #[test]
    fn test_rate_ignores_cliff_by_design() {
        let mut r = record();
        r.cliff_length = 30 * SECONDS_PER_DAY;
        let now = r.cliff_end() + 1;
        let status = evaluate(&r, now).unwrap();
        // Same denominator as the cliff-free schedule.
        assert_eq!(status.status_text, "Vesting 98.63 / month");
    }

    #[test]
    fn test_invalid_amount_string_surfaces() {
        let mut r = record();
        r.total_locked = "12,00".into();
        assert!(matches!(
            evaluate(&r, r.start_time + 1),
            Err(ScheduleError::Amount(AmountError::InvalidNumericString(_)))
        ));
    }

    #[test]
    fn test_chart_series_shape() {
        let mut r = record();
        r.cliff_length = 2 * SECONDS_PER_DAY;
        let series = ChartSeries::for_record(&r).unwrap();
        let points: Vec<_> = series.points().collect();

        assert_eq!(points.len(), series.len());
        assert_eq!(points.first().unwrap().fraction, 0.0);
        // Flat zero strictly inside the cliff window.
        assert_eq!(points[1].fraction, 0.0);
        // First sample at the cliff boundary jumps onto the linear ramp.
        assert!(points[2].fraction > 0.0);
        // Monotone thereafter, ending exactly at 1.0.
        assert!(points.windows(2).all(|w| w[0].fraction <= w[1].fraction));
        let last = points.last().unwrap();
        assert_eq!(last.elapsed_secs, r.end_time - r.start_time);
        assert_eq!(last.fraction, 1.0);
        assert!(points.iter().all(|p| p.fraction.is_finite()));
    }

    #[test]
    fn test_chart_series_is_restartable_and_idempotent() {
        let r = record();
        let series = ChartSeries::for_record(&r).unwrap();
        let first: Vec<_> = series.points().collect();
        let second: Vec<_> = series.points().collect();
        assert_eq!(first, second);

        let rebuilt = ChartSeries::for_record(&r).unwrap();
        let third: Vec<_> = rebuilt.points().collect();
        assert_eq!(first, third);
    }
}
