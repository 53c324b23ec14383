//! Calendar stepping for recurrences.
//!
//! Month and year steps clamp to the last day of the target month, so
//! Jan 31 + 1 month is Feb 28 (or 29). Chained steps are always recomputed
//! from the start date, which keeps a 31st recurrence on the 31st whenever
//! the month has one.

use chrono::{Days, Months, NaiveDate};

use super::recurrences_model::Frequency;
use crate::utils::time_utils::month_index_of;
use crate::{Error, Result};

fn out_of_range() -> Error {
    Error::invalid("Date is outside the supported range")
}

fn step(date: NaiveDate, frequency: Frequency, times: u32) -> Option<NaiveDate> {
    match frequency {
        Frequency::Daily => date.checked_add_days(Days::new(u64::from(times))),
        Frequency::Weekly => date.checked_add_days(Days::new(7 * u64::from(times))),
        Frequency::Monthly => date.checked_add_months(Months::new(times)),
        Frequency::Yearly => date.checked_add_months(Months::new(12 * times)),
    }
}

/// Moves `date` forward by one frequency step.
pub fn advance(date: NaiveDate, frequency: Frequency) -> Result<NaiveDate> {
    step(date, frequency, 1).ok_or_else(out_of_range)
}

/// The `n`-th occurrence after `start` (`n = 0` is `start` itself).
pub fn occurrence_date(start: NaiveDate, frequency: Frequency, n: u32) -> Result<NaiveDate> {
    step(start, frequency, n).ok_or_else(out_of_range)
}

/// The occurrence following `current` in a series that began on `start`.
///
/// Daily and weekly steps never drift, so they just advance `current`.
/// Monthly and yearly steps count whole months since `start` and step from
/// there, undoing any earlier month-end clamp.
pub fn advance_anchored(
    start: NaiveDate,
    current: NaiveDate,
    frequency: Frequency,
) -> Result<NaiveDate> {
    match frequency {
        Frequency::Daily | Frequency::Weekly => advance(current, frequency),
        Frequency::Monthly | Frequency::Yearly => {
            let elapsed = month_index_of(current) - month_index_of(start);
            let stride = if frequency == Frequency::Monthly { 1 } else { 12 };
            let months = u32::try_from(elapsed + stride).map_err(|_| {
                Error::invalid("Occurrence date precedes the recurrence start date")
            })?;
            start
                .checked_add_months(Months::new(months))
                .ok_or_else(out_of_range)
        }
    }
}
