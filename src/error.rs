//! This module implements `TimestampError`.

use core::fmt;

/// `TimestampError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input does not follow the extended timestamp grammar, or one of
    /// its fields is outside of its valid range.
    #[default]
    MalformedTimestamp,
    /// The value is well formed but cannot be represented as a signed
    /// 64-bit count of seconds.
    RangeExceeded,
    /// An internal invariant did not hold.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTimestamp => "MalformedTimestamp",
            Self::RangeExceeded => "RangeExceeded",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `extended_timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampError {
    kind: ErrorKind,
    msg: ErrorMessage,
}

impl TimestampError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: ErrorMessage::None,
        }
    }

    /// Create a malformed timestamp error.
    #[inline]
    #[must_use]
    pub fn malformed() -> Self {
        Self::new(ErrorKind::MalformedTimestamp)
    }

    /// Create a range exceeded error.
    #[inline]
    #[must_use]
    pub fn range() -> Self {
        Self::new(ErrorKind::RangeExceeded)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    pub(crate) fn assert() -> Self {
        Self::new(ErrorKind::Assert).with_enum(ErrorMessage::Assertion)
    }

    /// Add a message enum to the error.
    #[inline]
    #[must_use]
    pub fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = msg;
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.msg.to_str()
    }

    /// Returns the message enum of this error.
    #[inline]
    #[must_use]
    pub fn message_enum(&self) -> ErrorMessage {
        self.msg
    }

    /// Returns whether this error was raised by the parser.
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.kind == ErrorKind::MalformedTimestamp
    }

    /// Returns whether this error reports an unrepresentable value.
    #[inline]
    #[must_use]
    pub fn is_range_exceeded(&self) -> bool {
        self.kind == ErrorKind::RangeExceeded
    }
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.to_str();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for TimestampError {}

/// The error message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorMessage {
    // Parser
    AbruptEnd,
    InvalidSign,
    YearDigits,
    DateSeparator,
    MonthDigits,
    DayDigits,
    TimeDesignator,
    HourDigits,
    MinuteDigits,
    SecondDigits,
    TimeSeparator,
    FractionDigits,
    UtcDesignator,
    TrailingInput,

    // Field validation
    MonthOutOfRange,
    DayOutOfRange,
    HourOutOfRange,
    MinuteOutOfRange,
    SecondOutOfRange,
    NanosecondOutOfRange,

    // Range
    YearOutOfRange,
    EpochSecondsOutOfRange,
    OffsetOutOfRange,

    // Internal
    Assertion,

    None,
}

impl ErrorMessage {
    pub fn to_str(self) -> &'static str {
        match self {
            Self::AbruptEnd => "timestamp ended before all fields were read.",
            Self::InvalidSign => "year sign does not agree with the year value.",
            Self::YearDigits => "year must contain at least the required number of ASCII digits.",
            Self::DateSeparator => "expected '-' between date fields.",
            Self::MonthDigits => "month must be exactly two ASCII digits.",
            Self::DayDigits => "day must be exactly two ASCII digits.",
            Self::TimeDesignator => "expected 'T' between date and time.",
            Self::HourDigits => "hour must be exactly two ASCII digits.",
            Self::MinuteDigits => "minute must be exactly two ASCII digits.",
            Self::SecondDigits => "second must be exactly two ASCII digits.",
            Self::TimeSeparator => "expected ':' between time fields.",
            Self::FractionDigits => "fractional seconds must have between one and nine digits.",
            Self::UtcDesignator => "timestamp must end with the 'Z' UTC designator.",
            Self::TrailingInput => "unexpected characters after the 'Z' UTC designator.",
            Self::MonthOutOfRange => "month is outside of the range 1-12.",
            Self::DayOutOfRange => "day is not valid for the given month and year.",
            Self::HourOutOfRange => "hour is outside of the range 0-23.",
            Self::MinuteOutOfRange => "minute is outside of the range 0-59.",
            Self::SecondOutOfRange => "second is outside of the range 0-59.",
            Self::NanosecondOutOfRange => "nanosecond is outside of the range 0-999999999.",
            Self::YearOutOfRange => "year cannot be represented as a signed 64-bit integer.",
            Self::EpochSecondsOutOfRange => {
                "epoch seconds cannot be represented as a signed 64-bit integer."
            }
            Self::OffsetOutOfRange => "applying the offset exceeds the signed 64-bit range.",
            Self::Assertion => "implementation error: an internal assertion failed.",
            Self::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ErrorMessage, TimestampError};
    use alloc::string::ToString;

    #[test]
    fn display_includes_kind_and_message() {
        let err = TimestampError::malformed().with_enum(ErrorMessage::MonthOutOfRange);
        assert_eq!(
            err.to_string(),
            "MalformedTimestamp: month is outside of the range 1-12."
        );

        let err = TimestampError::range();
        assert_eq!(err.to_string(), "RangeExceeded");

        let err = TimestampError::malformed().with_enum(ErrorMessage::InvalidSign);
        assert_eq!(
            err.to_string(),
            "MalformedTimestamp: year sign does not agree with the year value."
        );
    }

    #[test]
    fn kind_predicates() {
        let err = TimestampError::range().with_enum(ErrorMessage::EpochSecondsOutOfRange);
        assert!(err.is_range_exceeded());
        assert!(!err.is_malformed());
        assert_eq!(err.kind(), ErrorKind::RangeExceeded);
        assert_eq!(err.message_enum(), ErrorMessage::EpochSecondsOutOfRange);

        let err = TimestampError::assert();
        assert_eq!(err.kind(), ErrorKind::Assert);
        assert!(!err.message().is_empty());
    }
}
