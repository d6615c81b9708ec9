//! Utility date and time equations for extended timestamps
//!
//! Every equation in this module is closed form: nothing iterates over
//! years or centuries, so the cost is the same for year 1970 as it is for
//! year 39,121,901,036.
//!
//! Day counts are computed in `i128`. An `i64` year multiplied out to days
//! and then seconds cannot overflow an `i128`, so callers only need to check
//! the final narrowing to `i64`.

use crate::{timestamp_assert, TimestampResult};

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub(crate) const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
pub(crate) const NANOSECONDS_PER_SECOND: i128 = 1_000_000_000;

/// Days elapsed in a common year before the first of each month.
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

// ==== Begin Calendar Equations ====

/// Returns whether `year` is a leap year in the proleptic Gregorian calendar.
///
/// The rule is applied uniformly to negative years, so year 0, -4 and -400
/// are leap years while -100 is not.
#[inline]
pub(crate) const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Mathematically determine the days in a year.
#[cfg(test)]
#[inline]
pub(crate) const fn mathematical_days_in_year(year: i64) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the number of days in `month` of `year`, or `None` if the month
/// is outside of 1-12.
#[inline]
pub(crate) const fn iso_days_in_month(year: i64, month: u8) -> Option<u8> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

// ==== End Calendar Equations ====

// ==== Begin Date Equations ====

/// Returns the epoch day number of January 1st of `year`.
///
/// The leap days between 1970 and `year` are counted by the 4/100/400
/// divide-and-correct rule. Floor division keeps the count exact on both
/// sides of the epoch, so no branch on the sign of the year is needed.
#[inline]
pub(crate) const fn epoch_day_number_for_year(year: i64) -> i128 {
    let y = year as i128;
    365 * (y - 1970) + (y - 1969).div_euclid(4) - (y - 1901).div_euclid(100)
        + (y - 1601).div_euclid(400)
}

/// Returns the zero based day of the year for `month` and `day`.
///
/// `month` and `day` must already be validated.
pub(crate) fn day_of_year(year: i64, month: u8, day: u8) -> TimestampResult<u16> {
    timestamp_assert!(
        (1..=12).contains(&month) && day >= 1,
        "day_of_year called with month {month} and day {day}"
    );
    let leap_day = u16::from(month > 2 && is_leap_year(year));
    Ok(DAYS_BEFORE_MONTH[usize::from(month - 1)] + leap_day + u16::from(day) - 1)
}

/// Returns the number of days between the epoch and the given date.
pub(crate) fn epoch_days_for_date(year: i64, month: u8, day: u8) -> TimestampResult<i128> {
    Ok(epoch_day_number_for_year(year) + i128::from(day_of_year(year, month, day)?))
}

/// Returns the number of seconds elapsed since midnight.
#[inline]
pub(crate) fn seconds_into_day(hour: u8, minute: u8, second: u8) -> i64 {
    i64::from(hour) * SECONDS_PER_HOUR + i64::from(minute) * SECONDS_PER_MINUTE + i64::from(second)
}

/// Combines an epoch day count with a time of day into epoch seconds.
#[inline]
pub(crate) fn epoch_days_to_epoch_seconds(days: i128, seconds_into_day: i64) -> i128 {
    days * i128::from(SECONDS_PER_DAY) + i128::from(seconds_into_day)
}

// ==== End Date Equations ====

// ==== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1600));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(is_leap_year(-400));
        assert!(is_leap_year(-7024));
        assert!(is_leap_year(39_121_901_036));

        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(-100));
        assert!(!is_leap_year(-7025));
    }

    #[test]
    fn days_in_month() {
        assert_eq!(iso_days_in_month(2023, 2), Some(28));
        assert_eq!(iso_days_in_month(2024, 2), Some(29));
        assert_eq!(iso_days_in_month(1900, 2), Some(28));
        assert_eq!(iso_days_in_month(-400, 2), Some(29));
        assert_eq!(iso_days_in_month(2023, 4), Some(30));
        assert_eq!(iso_days_in_month(2023, 12), Some(31));
        assert_eq!(iso_days_in_month(2023, 0), None);
        assert_eq!(iso_days_in_month(2023, 13), None);
        assert_eq!(mathematical_days_in_year(2000), 366);
        assert_eq!(mathematical_days_in_year(2100), 365);
    }

    #[test]
    fn epoch_day_number_near_epoch() {
        assert_eq!(epoch_day_number_for_year(1970), 0);
        assert_eq!(epoch_day_number_for_year(1971), 365);
        assert_eq!(epoch_day_number_for_year(1969), -365);
        assert_eq!(epoch_day_number_for_year(1968), -731);
        assert_eq!(epoch_day_number_for_year(2000), 10_957);
        assert_eq!(epoch_day_number_for_year(0), -719_528);
        assert_eq!(epoch_day_number_for_year(-1), -719_893);
    }

    #[test]
    fn consecutive_years_differ_by_year_length() {
        for year in [-801, -401, -400, -101, -100, -5, -1, 0, 1, 1899, 1900, 1999, 2000, 2099] {
            let this = epoch_day_number_for_year(year);
            let next = epoch_day_number_for_year(year + 1);
            assert_eq!(
                next - this,
                i128::from(mathematical_days_in_year(year)),
                "length of year {year} is wrong"
            );
        }
    }

    #[test]
    fn four_hundred_year_cycle() {
        // Every 400 years the calendar repeats with 146,097 days.
        for year in [-7024, -400, 0, 1601, 1970, 39_121_901_036] {
            assert_eq!(
                epoch_day_number_for_year(year + 400) - epoch_day_number_for_year(year),
                146_097
            );
        }
    }

    #[test]
    fn day_of_year_respects_leap_day() {
        assert_eq!(day_of_year(2023, 1, 1), Ok(0));
        assert_eq!(day_of_year(2023, 3, 1), Ok(59));
        assert_eq!(day_of_year(2024, 2, 29), Ok(59));
        assert_eq!(day_of_year(2024, 3, 1), Ok(60));
        assert_eq!(day_of_year(2023, 12, 31), Ok(364));
        assert_eq!(day_of_year(2024, 12, 31), Ok(365));
        assert!(day_of_year(2024, 13, 1).is_err());
    }

    #[test]
    fn seconds_for_day_and_time() {
        assert_eq!(seconds_into_day(0, 0, 0), 0);
        assert_eq!(seconds_into_day(23, 59, 59), SECONDS_PER_DAY - 1);
        assert_eq!(epoch_days_to_epoch_seconds(-1, seconds_into_day(23, 59, 50)), -10);
    }
}
