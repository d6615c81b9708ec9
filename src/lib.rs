//! The `extended_timestamp` crate parses extended ISO-8601 UTC timestamps
//! and converts them to exact Unix epoch seconds.
//!
//! ```rust
//! use extended_timestamp::{epoch_seconds, ParsedTimestamp};
//!
//! // Years of any width, with or without a sign.
//! assert_eq!(epoch_seconds("+2021-11-21T07:24:10Z", 0), Ok(1_637_479_450));
//! assert_eq!(epoch_seconds("-7025-12-23T00:00:00Z", 0), Ok(-283_824_000_000));
//!
//! let ts = ParsedTimestamp::parse("+39121901036-03-29T15:30:22Z").unwrap();
//! assert_eq!(ts.to_epoch_seconds(0).unwrap().as_i64(), 1_234_567_890_982_222_222);
//! ```
//!
//! Calendar libraries usually cap the year at four or six digits, or at
//! the range of some fixed width day count. This crate accepts a year digit
//! run of any length, validates the date against the proleptic Gregorian
//! calendar, and computes the epoch offset with closed form leap year
//! arithmetic in 128-bit intermediates. The only failure after parsing is a
//! result that does not fit in an `i64`, which is reported as
//! [`ErrorKind::RangeExceeded`] rather than wrapping.
//!
//! The conversion is a pure function. There is no global configuration;
//! parser behaviour is chosen with an explicit [`ParseOptions`] value.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

pub mod error;
pub mod iso;
pub mod options;
pub mod parsers;

#[cfg(feature = "serde")]
pub mod serde;

mod components;
mod epoch_seconds;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::{ErrorKind, TimestampError};

#[doc(inline)]
pub use options::{DesignatorCase, ParseOptions, TrailingInput};

pub use crate::components::ParsedTimestamp;
pub use crate::parsers::TimestampParser;

/// The `extended_timestamp` result type
pub type TimestampResult<T> = Result<T, TimestampError>;

pub mod time {
    pub use crate::epoch_seconds::{EpochNanoseconds, EpochSeconds};
}

/// Seconds per day constant: 86,400
pub const SECONDS_PER_DAY: i64 = utils::SECONDS_PER_DAY;

#[doc(hidden)]
#[macro_export]
macro_rules! timestamp_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::TimestampError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::TimestampError::assert());
        }
    };
}

/// The sign written in front of a year.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// No sign was written; the year is not negative.
    #[default]
    Implicit,
    /// A `+` was written.
    Positive,
    /// A `-` was written.
    Negative,
}

impl Sign {
    /// Returns whether this sign marks a negative year.
    #[inline]
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::Negative)
    }

    /// Returns the character written for this sign, if any.
    #[inline]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Implicit => None,
            Self::Positive => Some('+'),
            Self::Negative => Some('-'),
        }
    }
}

// ==== Entry points ====

/// Parses an extended timestamp and returns its epoch seconds plus
/// `offset`.
///
/// `offset` is an opaque term added to the result as is.
#[inline]
pub fn epoch_seconds(source: &str, offset: i64) -> TimestampResult<i64> {
    epoch_seconds_with(source, offset, ParseOptions::STRICT)
}

/// Parses an extended timestamp with the provided options and returns its
/// epoch seconds plus `offset`.
pub fn epoch_seconds_with(
    source: &str,
    offset: i64,
    options: ParseOptions,
) -> TimestampResult<i64> {
    let result = TimestampParser::with_options(options)
        .parse(source)?
        .to_epoch_seconds(offset);
    #[cfg(feature = "log")]
    if let Err(err) = &result {
        log::debug!("timestamp {source:?} is out of range: {err}");
    }
    result.map(i64::from)
}

/// Parses a timestamp with the lenient grammar and returns its epoch
/// seconds, or `default` if it cannot be parsed or represented.
///
/// This mirrors how response deserializers treat timestamp fields that
/// should never abort decoding of the surrounding object.
pub fn epoch_seconds_or(source: &str, default: i64) -> i64 {
    match epoch_seconds_with(source, 0, ParseOptions::LENIENT) {
        Ok(seconds) => seconds,
        Err(_err) => {
            #[cfg(feature = "log")]
            log::debug!("falling back to {default} for timestamp {source:?}: {_err}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{epoch_seconds, epoch_seconds_or, epoch_seconds_with, ErrorKind, ParseOptions};

    #[test]
    fn entry_points() {
        assert_eq!(epoch_seconds("1969-12-31T23:59:50Z", 0), Ok(-10));
        assert_eq!(epoch_seconds("1969-12-31T23:59:50Z", 10), Ok(0));
        assert_eq!(
            epoch_seconds("1969-12-31T23:59:50", 0).map_err(|e| e.kind()),
            Err(ErrorKind::MalformedTimestamp)
        );
        assert_eq!(
            epoch_seconds_with("1969-12-31t23:59:50z", 0, ParseOptions::LENIENT),
            Ok(-10)
        );
    }

    #[test]
    fn lenient_fallback() {
        assert_eq!(epoch_seconds_or("+2021-11-21T07:24:10Z", -1), 1_637_479_450);
        assert_eq!(epoch_seconds_or("2021-11-21T07:24:10+01:00", -1), 1_637_479_450);
        assert_eq!(epoch_seconds_or("2021-11-21", -1), -1);
        assert_eq!(epoch_seconds_or("21-11-21T07:24:10Z", -1), -1);
        assert_eq!(epoch_seconds_or("+292277026597-01-01T00:00:00Z", 7), 7);
    }
}
