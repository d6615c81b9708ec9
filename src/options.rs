//! Native implementation of the extended timestamp parsing options.
//!
//! The defaults describe the strict grammar: an optionally signed year, a
//! fixed width date and time, an optional fraction and a terminating
//! upper case `Z`. The options only ever relax that grammar; they are
//! passed explicitly to the parser and never read from global state.

use core::{fmt, str::FromStr};

/// Options that control how permissive the extended timestamp parser is.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Which letter cases are accepted for the `T` and `Z` designators.
    pub designators: DesignatorCase,
    /// What to do with input following the seconds field.
    pub trailing: TrailingInput,
    /// The minimum number of digits the year field must have.
    ///
    /// A value of zero is treated as one.
    pub min_year_digits: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::STRICT
    }
}

impl ParseOptions {
    /// The strict grammar.
    pub const STRICT: Self = Self {
        designators: DesignatorCase::Upper,
        trailing: TrailingInput::Reject,
        min_year_digits: 1,
    };

    /// The permissive grammar accepted by older response deserializers: a
    /// year of at least four digits, designators in any case, and anything
    /// at all after the seconds field.
    pub const LENIENT: Self = Self {
        designators: DesignatorCase::AnyCase,
        trailing: TrailingInput::Ignore,
        min_year_digits: 4,
    };

    /// Returns these options with the provided designator case.
    #[inline]
    #[must_use]
    pub const fn with_designators(mut self, designators: DesignatorCase) -> Self {
        self.designators = designators;
        self
    }

    /// Returns these options with the provided trailing input handling.
    #[inline]
    #[must_use]
    pub const fn with_trailing(mut self, trailing: TrailingInput) -> Self {
        self.trailing = trailing;
        self
    }

    /// Returns these options with the provided minimum year width.
    #[inline]
    #[must_use]
    pub const fn with_min_year_digits(mut self, min_year_digits: u8) -> Self {
        self.min_year_digits = min_year_digits;
        self
    }

    /// Returns the minimum year width with zero resolved to one.
    #[inline]
    pub(crate) fn resolved_min_year_digits(&self) -> usize {
        usize::from(self.min_year_digits.max(1))
    }
}

// ==== DesignatorCase ====

/// The accepted letter case of the `T` date/time separator and the `Z`
/// UTC designator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DesignatorCase {
    /// Only `T` and `Z`.
    #[default]
    Upper,
    /// `T`/`t` and `Z`/`z`, as RFC 3339 allows.
    AnyCase,
}

impl DesignatorCase {
    /// Returns whether `byte` matches the upper case `designator`.
    #[inline]
    pub(crate) fn matches(self, byte: u8, designator: u8) -> bool {
        match self {
            Self::Upper => byte == designator,
            Self::AnyCase => byte.eq_ignore_ascii_case(&designator),
        }
    }
}

/// A parsing error for `DesignatorCase`
#[derive(Debug, Clone, Copy)]
pub struct ParseDesignatorCaseError;

impl fmt::Display for ParseDesignatorCaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid designator case value")
    }
}

impl core::error::Error for ParseDesignatorCaseError {}

impl FromStr for DesignatorCase {
    type Err = ParseDesignatorCaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Self::Upper),
            "any" => Ok(Self::AnyCase),
            _ => Err(ParseDesignatorCaseError),
        }
    }
}

impl fmt::Display for DesignatorCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upper => "upper",
            Self::AnyCase => "any",
        }
        .fmt(f)
    }
}

// ==== TrailingInput ====

/// Handling of the input that follows the seconds field and its optional
/// fraction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TrailingInput {
    /// A single `Z` must follow, and nothing after it.
    #[default]
    Reject,
    /// Everything after the seconds field is ignored, including a missing
    /// or different UTC designator.
    Ignore,
}

/// A parsing error for `TrailingInput`
#[derive(Debug, Clone, Copy)]
pub struct ParseTrailingInputError;

impl fmt::Display for ParseTrailingInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid trailing input value")
    }
}

impl core::error::Error for ParseTrailingInputError {}

impl FromStr for TrailingInput {
    type Err = ParseTrailingInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(Self::Reject),
            "ignore" => Ok(Self::Ignore),
            _ => Err(ParseTrailingInputError),
        }
    }
}

impl fmt::Display for TrailingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => "reject",
            Self::Ignore => "ignore",
        }
        .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::{DesignatorCase, ParseOptions, TrailingInput};
    use alloc::string::ToString;
    use core::str::FromStr;

    #[test]
    fn defaults_are_strict() {
        let options = ParseOptions::default();
        assert_eq!(options, ParseOptions::STRICT);
        assert_eq!(options.designators, DesignatorCase::Upper);
        assert_eq!(options.trailing, TrailingInput::Reject);
        assert_eq!(options.resolved_min_year_digits(), 1);
    }

    #[test]
    fn zero_year_digits_resolves_to_one() {
        let options = ParseOptions::default().with_min_year_digits(0);
        assert_eq!(options.resolved_min_year_digits(), 1);
        assert_eq!(ParseOptions::LENIENT.resolved_min_year_digits(), 4);
    }

    #[test]
    fn designator_matching() {
        assert!(DesignatorCase::Upper.matches(b'Z', b'Z'));
        assert!(!DesignatorCase::Upper.matches(b'z', b'Z'));
        assert!(DesignatorCase::AnyCase.matches(b'z', b'Z'));
        assert!(DesignatorCase::AnyCase.matches(b't', b'T'));
        assert!(!DesignatorCase::AnyCase.matches(b'x', b'Z'));
    }

    #[test]
    fn option_strings() {
        assert_eq!(DesignatorCase::from_str("any").ok(), Some(DesignatorCase::AnyCase));
        assert_eq!(TrailingInput::from_str("ignore").ok(), Some(TrailingInput::Ignore));
        assert!(TrailingInput::from_str("IGNORE").is_err());
        assert_eq!(DesignatorCase::Upper.to_string(), "upper");
        assert_eq!(TrailingInput::Reject.to_string(), "reject");
    }
}
