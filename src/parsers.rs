//! This module implements extended timestamp parsing functionality.
//!
//! The grammar is fixed:
//!
//! ```text
//! Timestamp  ::= Sign? YearDigits "-" MM "-" DD "T" hh ":" mm ":" ss Fraction? "Z"
//! Sign       ::= "+" | "-"
//! YearDigits ::= [0-9]+
//! Fraction   ::= ("." | ",") [0-9]{1,9}
//! ```
//!
//! Unlike RFC 3339 or the Temporal grammar, the year may have any number of
//! digits, with or without a sign. `ParseOptions` can relax the letter case
//! of the designators, the treatment of trailing input, and the minimum year
//! width.

use crate::{
    components::ParsedTimestamp,
    error::{ErrorMessage, TimestampError},
    iso::{IsoDate, IsoTime},
    options::{ParseOptions, TrailingInput},
    Sign, TimestampResult,
};
use num_traits::ToPrimitive;

/// A byte cursor over the source being parsed.
#[derive(Debug)]
struct Cursor<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a [u8]) -> Self {
        Self { source, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn is_done(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Consumes the next byte if `predicate` holds for it.
    fn next_if(&mut self, predicate: impl FnOnce(u8) -> bool) -> Option<u8> {
        let byte = self.peek().filter(|b| predicate(*b))?;
        self.pos += 1;
        Some(byte)
    }

    /// Consumes the next byte, which must satisfy `predicate`.
    fn expect(
        &mut self,
        predicate: impl FnOnce(u8) -> bool,
        msg: ErrorMessage,
    ) -> TimestampResult<()> {
        match self.next_byte() {
            Some(byte) if predicate(byte) => Ok(()),
            Some(_) => Err(TimestampError::malformed().with_enum(msg)),
            None => Err(TimestampError::malformed().with_enum(ErrorMessage::AbruptEnd)),
        }
    }

    /// Consumes exactly two ASCII digits.
    fn two_digits(&mut self, msg: ErrorMessage) -> TimestampResult<u8> {
        let mut value = 0;
        for _ in 0..2 {
            match self.next_byte() {
                Some(byte) if byte.is_ascii_digit() => value = value * 10 + (byte - b'0'),
                Some(_) => return Err(TimestampError::malformed().with_enum(msg)),
                None => {
                    return Err(TimestampError::malformed().with_enum(ErrorMessage::AbruptEnd))
                }
            }
        }
        Ok(value)
    }
}

/// The year as read from the source.
#[derive(Debug, Clone, Copy)]
struct YearRecord {
    sign: Sign,
    /// `None` when the digits do not fit a `u64`.
    magnitude: Option<u64>,
}

impl YearRecord {
    /// Resolves the signed year, reporting years that do not fit an `i64`.
    fn resolve(self) -> TimestampResult<i64> {
        let year = self.magnitude.and_then(|magnitude| {
            let magnitude = i128::from(magnitude);
            if self.sign.is_negative() {
                (-magnitude).to_i64()
            } else {
                magnitude.to_i64()
            }
        });
        year.ok_or_else(|| TimestampError::range().with_enum(ErrorMessage::YearOutOfRange))
    }
}

/// Public parser for extended timestamps.
///
/// The parser only carries its options; it is `Copy` and can be shared
/// freely between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampParser {
    options: ParseOptions,
}

impl TimestampParser {
    /// Creates a new `TimestampParser` for the strict grammar.
    #[inline]
    pub const fn new() -> Self {
        Self {
            options: ParseOptions::STRICT,
        }
    }

    /// Creates a new `TimestampParser` with the provided options.
    #[inline]
    pub const fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Returns the options of this parser.
    #[inline]
    pub const fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses and validates an extended timestamp.
    pub fn parse(&self, source: &str) -> TimestampResult<ParsedTimestamp> {
        let result = self.parse_inner(source.as_bytes());
        #[cfg(feature = "log")]
        if let Err(err) = &result {
            log::debug!("rejected timestamp {source:?}: {err}");
        }
        result
    }

    fn parse_inner(&self, source: &[u8]) -> TimestampResult<ParsedTimestamp> {
        let mut cursor = Cursor::new(source);
        let options = &self.options;

        let year = parse_year(&mut cursor, options.resolved_min_year_digits())?;
        cursor.expect(|b| b == b'-', ErrorMessage::DateSeparator)?;
        let month = cursor.two_digits(ErrorMessage::MonthDigits)?;
        cursor.expect(|b| b == b'-', ErrorMessage::DateSeparator)?;
        let day = cursor.two_digits(ErrorMessage::DayDigits)?;

        cursor.expect(
            |b| options.designators.matches(b, b'T'),
            ErrorMessage::TimeDesignator,
        )?;

        let hour = cursor.two_digits(ErrorMessage::HourDigits)?;
        cursor.expect(|b| b == b':', ErrorMessage::TimeSeparator)?;
        let minute = cursor.two_digits(ErrorMessage::MinuteDigits)?;
        cursor.expect(|b| b == b':', ErrorMessage::TimeSeparator)?;
        let second = cursor.two_digits(ErrorMessage::SecondDigits)?;

        let nanosecond = match options.trailing {
            TrailingInput::Reject => {
                let nanosecond = parse_fraction(&mut cursor)?;
                cursor.expect(
                    |b| options.designators.matches(b, b'Z'),
                    ErrorMessage::UtcDesignator,
                )?;
                if !cursor.is_done() {
                    return Err(TimestampError::malformed().with_enum(ErrorMessage::TrailingInput));
                }
                nanosecond
            }
            // Whatever follows the seconds is ignored, except that a well
            // formed fraction is still read.
            TrailingInput::Ignore => parse_fraction_prefix(&mut cursor),
        };

        // The whole grammar has been read; only now can a year that is too
        // large be reported as a range error rather than a malformed input.
        let sign = year.sign;
        let year = year.resolve()?;
        let date = IsoDate::try_new(year, month, day)?;
        let time = IsoTime::try_new(hour, minute, second, nanosecond)?;

        ParsedTimestamp::try_new(sign, date, time)
    }
}

fn parse_year(cursor: &mut Cursor<'_>, min_digits: usize) -> TimestampResult<YearRecord> {
    let sign = match cursor.next_if(|b| b == b'+' || b == b'-') {
        Some(b'-') => Sign::Negative,
        Some(_) => Sign::Positive,
        None => Sign::Implicit,
    };

    let mut magnitude = Some(0u64);
    let mut digits = 0usize;
    while let Some(byte) = cursor.next_if(|b| b.is_ascii_digit()) {
        magnitude = magnitude
            .and_then(|m| m.checked_mul(10))
            .and_then(|m| m.checked_add(u64::from(byte - b'0')));
        digits += 1;
    }

    if digits < min_digits {
        let msg = if cursor.is_done() {
            ErrorMessage::AbruptEnd
        } else {
            ErrorMessage::YearDigits
        };
        return Err(TimestampError::malformed().with_enum(msg));
    }

    Ok(YearRecord { sign, magnitude })
}

/// Parses an optional fraction of a second into nanoseconds.
fn parse_fraction(cursor: &mut Cursor<'_>) -> TimestampResult<u32> {
    if cursor.next_if(is_decimal_separator).is_none() {
        return Ok(0);
    }

    let mut nanosecond = 0u32;
    let mut digits = 0u32;
    while let Some(byte) = cursor.next_if(|b| b.is_ascii_digit()) {
        digits += 1;
        if digits > 9 {
            return Err(TimestampError::malformed().with_enum(ErrorMessage::FractionDigits));
        }
        nanosecond = nanosecond * 10 + u32::from(byte - b'0');
    }

    if digits == 0 {
        return Err(TimestampError::malformed().with_enum(ErrorMessage::FractionDigits));
    }

    Ok(nanosecond * 10u32.pow(9 - digits))
}

/// Reads the longest fraction prefix, truncating to nanosecond precision.
///
/// Returns zero if no digits follow the separator.
fn parse_fraction_prefix(cursor: &mut Cursor<'_>) -> u32 {
    if cursor.next_if(is_decimal_separator).is_none() {
        return 0;
    }

    let mut nanosecond = 0u32;
    let mut digits = 0u32;
    while let Some(byte) = cursor.next_if(|b| b.is_ascii_digit()) {
        if digits < 9 {
            nanosecond = nanosecond * 10 + u32::from(byte - b'0');
            digits += 1;
        }
    }

    if digits == 0 {
        return 0;
    }
    nanosecond * 10u32.pow(9 - digits)
}

#[inline]
fn is_decimal_separator(byte: u8) -> bool {
    byte == b'.' || byte == b','
}

/// Parses an extended timestamp with the strict grammar.
#[inline]
pub fn parse_timestamp(source: &str) -> TimestampResult<ParsedTimestamp> {
    TimestampParser::new().parse(source)
}
