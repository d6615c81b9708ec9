//! This module implements `ParsedTimestamp` and its epoch conversions.

use core::str::FromStr;

use num_traits::ToPrimitive;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::{ErrorMessage, TimestampError},
    iso::{IsoDate, IsoTime},
    options::ParseOptions,
    parsers::TimestampParser,
    time::{EpochNanoseconds, EpochSeconds},
    utils, Sign, TimestampResult,
};

/// A validated extended ISO-8601 UTC timestamp.
///
/// `ParsedTimestamp` is the output of the lexical parser. It always names an
/// instant that exists in the proleptic Gregorian calendar, and the year sign
/// is kept as written so the record can be written back out.
///
/// ```rust
/// use extended_timestamp::ParsedTimestamp;
///
/// let ts: ParsedTimestamp = "+39121901036-03-29T15:30:22Z".parse().unwrap();
/// assert_eq!(ts.year(), 39_121_901_036);
/// assert_eq!(ts.to_epoch_seconds(0).unwrap().as_i64(), 1_234_567_890_982_222_222);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedTimestamp {
    sign: Sign,
    date: IsoDate,
    time: IsoTime,
}

// ==== Constructors ====

impl ParsedTimestamp {
    /// Creates a new `ParsedTimestamp` from already validated slots.
    ///
    /// The sign must agree with the year: a `Negative` sign requires a year
    /// that is zero or below, any other sign a year that is zero or above.
    pub fn try_new(sign: Sign, date: IsoDate, time: IsoTime) -> TimestampResult<Self> {
        let agrees = if sign.is_negative() {
            date.year <= 0
        } else {
            date.year >= 0
        };
        if !agrees {
            return Err(TimestampError::malformed().with_enum(ErrorMessage::InvalidSign));
        }
        let date = IsoDate::try_new(date.year, date.month, date.day)?;
        let time = IsoTime::try_new(time.hour, time.minute, time.second, time.nanosecond)?;
        Ok(Self { sign, date, time })
    }

    /// Creates a new `ParsedTimestamp` from its fields.
    ///
    /// Negative years are written with a `-` sign, others without a sign.
    pub fn from_fields(
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> TimestampResult<Self> {
        let sign = if year < 0 {
            Sign::Negative
        } else {
            Sign::Implicit
        };
        let date = IsoDate::try_new(year, month, day)?;
        let time = IsoTime::try_new(hour, minute, second, 0)?;
        Self::try_new(sign, date, time)
    }

    /// Parses an extended timestamp with the strict grammar.
    #[inline]
    pub fn parse(source: &str) -> TimestampResult<Self> {
        TimestampParser::new().parse(source)
    }

    /// Parses an extended timestamp with the provided options.
    #[inline]
    pub fn parse_with(source: &str, options: ParseOptions) -> TimestampResult<Self> {
        TimestampParser::with_options(options).parse(source)
    }
}

// ==== Accessors ====

impl ParsedTimestamp {
    /// Returns the year sign as written.
    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns the date slots.
    #[inline]
    pub fn iso_date(&self) -> IsoDate {
        self.date
    }

    /// Returns the time slots.
    #[inline]
    pub fn iso_time(&self) -> IsoTime {
        self.time
    }

    /// Returns the signed year.
    #[inline]
    pub fn year(&self) -> i64 {
        self.date.year
    }

    #[inline]
    pub fn month(&self) -> u8 {
        self.date.month
    }

    #[inline]
    pub fn day(&self) -> u8 {
        self.date.day
    }

    #[inline]
    pub fn hour(&self) -> u8 {
        self.time.hour
    }

    #[inline]
    pub fn minute(&self) -> u8 {
        self.time.minute
    }

    #[inline]
    pub fn second(&self) -> u8 {
        self.time.second
    }

    /// Returns the parsed fraction of a second in nanoseconds.
    #[inline]
    pub fn nanosecond(&self) -> u32 {
        self.time.nanosecond
    }
}

// ==== Epoch conversions ====

impl ParsedTimestamp {
    /// Converts this timestamp into seconds since the epoch and adds
    /// `offset` to the result.
    ///
    /// The fraction of a second is not included. `offset` is an opaque
    /// caller supplied term; it is added as is.
    ///
    /// Fails with `RangeExceeded` when the instant, or the instant plus
    /// `offset`, cannot be represented as an `i64`.
    pub fn to_epoch_seconds(&self, offset: i64) -> TimestampResult<EpochSeconds> {
        let seconds = self.epoch_seconds_wide()?.to_i64().ok_or_else(|| {
            TimestampError::range().with_enum(ErrorMessage::EpochSecondsOutOfRange)
        })?;
        let seconds = seconds
            .checked_add(offset)
            .ok_or_else(|| TimestampError::range().with_enum(ErrorMessage::OffsetOutOfRange))?;
        Ok(EpochSeconds::from(seconds))
    }

    /// Converts this timestamp, including its fraction of a second, into
    /// nanoseconds since the epoch.
    pub fn to_epoch_nanoseconds(&self) -> TimestampResult<EpochNanoseconds> {
        let nanos = self.epoch_seconds_wide()? * utils::NANOSECONDS_PER_SECOND
            + i128::from(self.time.nanosecond);
        Ok(EpochNanoseconds::from(nanos))
    }

    /// Returns the whole epoch seconds without narrowing.
    fn epoch_seconds_wide(&self) -> TimestampResult<i128> {
        let days = self.date.to_epoch_days()?;
        Ok(utils::epoch_days_to_epoch_seconds(
            days,
            self.time.seconds_into_day(),
        ))
    }
}

impl FromStr for ParsedTimestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ==== Writing ====

impl Writeable for ParsedTimestamp {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if let Some(sign) = self.sign.as_char() {
            sink.write_char(sign)?;
        }
        let magnitude = self.date.year.unsigned_abs();
        for _ in year_width(magnitude)..4 {
            sink.write_char('0')?;
        }
        magnitude.write_to(sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.date.month, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.date.day, sink)?;
        sink.write_char('T')?;
        write_padded_u8(self.time.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.time.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.time.second, sink)?;
        if self.time.nanosecond != 0 {
            sink.write_char('.')?;
            write_fraction(self.time.nanosecond, sink)?;
        }
        sink.write_char('Z')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let sign = usize::from(self.sign.as_char().is_some());
        let year = year_width(self.date.year.unsigned_abs()).max(4);
        // "-MM-DDTHH:MM:SS" and the trailing "Z"
        let base = sign + year + 16;
        if self.time.nanosecond == 0 {
            return LengthHint::exact(base);
        }
        LengthHint::between(base + 2, base + 10)
    }
}

impl_display_with_writeable!(ParsedTimestamp);

/// Returns the number of decimal digits in `magnitude`.
fn year_width(magnitude: u64) -> usize {
    magnitude.checked_ilog10().map_or(1, |log| log as usize + 1)
}

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

/// Writes a non-zero nanosecond value as a fraction without trailing zeros.
fn write_fraction<W: core::fmt::Write + ?Sized>(
    mut nanosecond: u32,
    sink: &mut W,
) -> core::fmt::Result {
    let mut width = 9;
    while nanosecond % 10 == 0 && width > 1 {
        nanosecond /= 10;
        width -= 1;
    }
    let digits = nanosecond.checked_ilog10().map_or(1, |log| log + 1);
    for _ in digits..width {
        sink.write_char('0')?;
    }
    nanosecond.write_to(sink)
}
