//! This module implements the internal ISO field slots.
//!
//! The two slot records are:
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! An `IsoDate` holds a proleptic Gregorian year, month and day. The year is
//! a signed 64-bit value so that extended years such as `+39121901036` or
//! `-7025` are represented exactly.
//!
//! An `IsoTime` holds the hour, minute, second and nanosecond of a UTC time
//! of day. Leap seconds are not representable.

use crate::{
    error::{ErrorMessage, TimestampError},
    utils, TimestampResult,
};

// ==== `IsoDate` section ====

/// `IsoDate` serves as a record for the year, month, and day fields of an
/// extended timestamp.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i64,
    pub month: u8,
    pub day: u8,
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i64, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new `IsoDate`, rejecting months outside of 1-12 and days
    /// that do not exist in the given month.
    pub fn try_new(year: i64, month: u8, day: u8) -> TimestampResult<Self> {
        let Some(days_in_month) = utils::iso_days_in_month(year, month) else {
            return Err(TimestampError::malformed().with_enum(ErrorMessage::MonthOutOfRange));
        };
        if !(1..=days_in_month).contains(&day) {
            return Err(TimestampError::malformed().with_enum(ErrorMessage::DayOutOfRange));
        }
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Returns if the current `IsoDate` is valid.
    pub fn is_valid(self) -> bool {
        utils::iso_days_in_month(self.year, self.month)
            .is_some_and(|days_in_month| (1..=days_in_month).contains(&self.day))
    }

    /// Returns whether this date's year is a leap year.
    #[inline]
    pub fn in_leap_year(self) -> bool {
        utils::is_leap_year(self.year)
    }

    /// Returns the one based ordinal day of the year.
    pub fn day_of_year(self) -> TimestampResult<u16> {
        Ok(utils::day_of_year(self.year, self.month, self.day)? + 1)
    }

    /// Returns the number of days from 1970-01-01 to this date.
    ///
    /// The value is negative for dates before the epoch.
    #[inline]
    pub(crate) fn to_epoch_days(self) -> TimestampResult<i128> {
        utils::epoch_days_for_date(self.year, self.month, self.day)
    }
}

// ==== `IsoTime` section ====

/// An `IsoTime` record that contains the time of day slots.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,        // 0..=23
    pub minute: u8,      // 0..=59
    pub second: u8,      // 0..=59
    pub nanosecond: u32, // 0..=999_999_999
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Creates a new validated `IsoTime`.
    pub fn try_new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> TimestampResult<Self> {
        if hour > 23 {
            return Err(TimestampError::malformed().with_enum(ErrorMessage::HourOutOfRange));
        }
        if minute > 59 {
            return Err(TimestampError::malformed().with_enum(ErrorMessage::MinuteOutOfRange));
        }
        if second > 59 {
            return Err(TimestampError::malformed().with_enum(ErrorMessage::SecondOutOfRange));
        }
        if nanosecond > 999_999_999 {
            return Err(TimestampError::malformed().with_enum(ErrorMessage::NanosecondOutOfRange));
        }
        Ok(Self::new_unchecked(hour, minute, second, nanosecond))
    }

    /// Returns an `IsoTime` set to 00:00:00
    pub const fn midnight() -> Self {
        Self::new_unchecked(0, 0, 0, 0)
    }

    /// Checks if the time is a valid `IsoTime`
    pub fn is_valid(&self) -> bool {
        self.hour <= 23 && self.minute <= 59 && self.second <= 59 && self.nanosecond <= 999_999_999
    }

    /// Returns the whole seconds elapsed since midnight.
    #[inline]
    pub fn seconds_into_day(&self) -> i64 {
        utils::seconds_into_day(self.hour, self.minute, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::{IsoDate, IsoTime};
    use crate::error::{ErrorKind, ErrorMessage};

    #[test]
    fn date_validation() {
        assert!(IsoDate::try_new(2024, 2, 29).is_ok());
        assert!(IsoDate::try_new(-400, 2, 29).is_ok());
        assert!(IsoDate::try_new(0, 2, 29).is_ok());
        assert!(IsoDate::try_new(39_121_901_036, 2, 29).is_ok());

        let err = IsoDate::try_new(2023, 2, 29).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedTimestamp);
        assert_eq!(err.message_enum(), ErrorMessage::DayOutOfRange);

        let err = IsoDate::try_new(1900, 2, 29).unwrap_err();
        assert_eq!(err.message_enum(), ErrorMessage::DayOutOfRange);

        let err = IsoDate::try_new(-100, 2, 29).unwrap_err();
        assert_eq!(err.message_enum(), ErrorMessage::DayOutOfRange);

        let err = IsoDate::try_new(2024, 2, 30).unwrap_err();
        assert_eq!(err.message_enum(), ErrorMessage::DayOutOfRange);

        let err = IsoDate::try_new(2024, 4, 31).unwrap_err();
        assert_eq!(err.message_enum(), ErrorMessage::DayOutOfRange);

        let err = IsoDate::try_new(2024, 1, 0).unwrap_err();
        assert_eq!(err.message_enum(), ErrorMessage::DayOutOfRange);

        let err = IsoDate::try_new(2024, 13, 1).unwrap_err();
        assert_eq!(err.message_enum(), ErrorMessage::MonthOutOfRange);

        let err = IsoDate::try_new(2024, 0, 1).unwrap_err();
        assert_eq!(err.message_enum(), ErrorMessage::MonthOutOfRange);
    }

    #[test]
    fn date_ordinals() {
        let date = IsoDate::try_new(2024, 12, 31).unwrap();
        assert!(date.is_valid());
        assert!(date.in_leap_year());
        assert_eq!(date.day_of_year(), Ok(366));

        let date = IsoDate::try_new(-7025, 12, 23).unwrap();
        assert!(!date.in_leap_year());
        assert_eq!(date.day_of_year(), Ok(357));

        assert!(!IsoDate::new_unchecked(2023, 2, 29).is_valid());
    }

    #[test]
    fn date_epoch_days() {
        assert_eq!(IsoDate::try_new(1970, 1, 1).unwrap().to_epoch_days(), Ok(0));
        assert_eq!(IsoDate::try_new(1969, 12, 31).unwrap().to_epoch_days(), Ok(-1));
        assert_eq!(IsoDate::try_new(2000, 3, 1).unwrap().to_epoch_days(), Ok(11_017));
        assert_eq!(
            IsoDate::try_new(-7025, 12, 23).unwrap().to_epoch_days(),
            Ok(-3_285_000)
        );
    }

    #[test]
    fn time_validation() {
        assert!(IsoTime::try_new(23, 59, 59, 999_999_999).is_ok());
        assert_eq!(
            IsoTime::try_new(24, 0, 0, 0).unwrap_err().message_enum(),
            ErrorMessage::HourOutOfRange
        );
        assert_eq!(
            IsoTime::try_new(0, 60, 0, 0).unwrap_err().message_enum(),
            ErrorMessage::MinuteOutOfRange
        );
        assert_eq!(
            IsoTime::try_new(0, 0, 60, 0).unwrap_err().message_enum(),
            ErrorMessage::SecondOutOfRange
        );
        assert_eq!(
            IsoTime::try_new(0, 0, 0, 1_000_000_000).unwrap_err().message_enum(),
            ErrorMessage::NanosecondOutOfRange
        );
    }

    #[test]
    fn time_seconds_into_day() {
        assert_eq!(IsoTime::midnight().seconds_into_day(), 0);
        let time = IsoTime::try_new(15, 30, 22, 500).unwrap();
        assert!(time.is_valid());
        assert_eq!(time.seconds_into_day(), 55_822);
    }
}
