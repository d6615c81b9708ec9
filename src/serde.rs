//! [`serde`](::serde) support for extended timestamps.
//!
//! Response objects usually carry timestamps as strings while callers want
//! a number. The [`epoch_seconds`] and [`option`] modules are meant for
//! `#[serde(deserialize_with = "...")]` on such fields:
//!
//! ```rust
//! #[derive(serde::Deserialize)]
//! struct Ledger {
//!     #[serde(deserialize_with = "extended_timestamp::serde::epoch_seconds::deserialize")]
//!     closed_at: i64,
//!     #[serde(default, deserialize_with = "extended_timestamp::serde::option::deserialize")]
//!     last_modified_time: Option<i64>,
//! }
//!
//! let ledger: Ledger = serde_json::from_str(
//!     r#"{ "closed_at": "+2021-11-21T07:24:10Z", "last_modified_time": null }"#,
//! ).unwrap();
//! assert_eq!(ledger.closed_at, 1_637_479_450);
//! assert_eq!(ledger.last_modified_time, None);
//! ```
//!
//! `ParsedTimestamp` itself also implements `Serialize` and `Deserialize`
//! as its canonical string form.

use core::fmt;

use ::serde::de::{self, Deserialize, Deserializer, Visitor};
use ::serde::ser::{Serialize, Serializer};

use crate::ParsedTimestamp;

struct ParsedTimestampVisitor;

impl Visitor<'_> for ParsedTimestampVisitor {
    type Value = ParsedTimestamp;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a string with an extended ISO-8601 UTC timestamp")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        ParsedTimestamp::parse(value).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for ParsedTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ParsedTimestampVisitor)
    }
}

impl Serialize for ParsedTimestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Deserializes a timestamp string into epoch seconds.
pub mod epoch_seconds {
    use ::serde::de::{Deserialize, Deserializer, Error};

    use crate::ParsedTimestamp;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        ParsedTimestamp::deserialize(deserializer)?
            .to_epoch_seconds(0)
            .map(i64::from)
            .map_err(D::Error::custom)
    }
}

/// Deserializes a nullable timestamp string into epoch seconds.
pub mod option {
    use core::fmt;

    use ::serde::de::{Deserializer, Visitor};

    struct OptionVisitor;

    impl<'de> Visitor<'de> for OptionVisitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("null or a string with an extended ISO-8601 UTC timestamp")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: ::serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: ::serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            super::epoch_seconds::deserialize(deserializer).map(Some)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::ParsedTimestamp;
    use ::serde::Deserialize;
    use alloc::string::ToString;

    #[derive(Debug, Deserialize)]
    struct ClaimableBalance {
        #[serde(deserialize_with = "crate::serde::epoch_seconds::deserialize")]
        last_modified_time: i64,
        #[serde(default, deserialize_with = "crate::serde::option::deserialize")]
        expires_at: Option<i64>,
    }

    #[test]
    fn deserialize_epoch_seconds_field() {
        let balance: ClaimableBalance = serde_json::from_str(
            r#"{ "last_modified_time": "-7024-12-22T00:00:00Z", "expires_at": "+2024-06-21T23:59:50Z" }"#,
        )
        .unwrap();
        assert_eq!(balance.last_modified_time, -283_792_464_000);
        assert_eq!(balance.expires_at, Some(1_719_014_390));

        let balance: ClaimableBalance =
            serde_json::from_str(r#"{ "last_modified_time": "1969-12-31T23:59:50Z" }"#).unwrap();
        assert_eq!(balance.last_modified_time, -10);
        assert_eq!(balance.expires_at, None);

        let balance: ClaimableBalance = serde_json::from_str(
            r#"{ "last_modified_time": "1968-12-31T23:59:50Z", "expires_at": null }"#,
        )
        .unwrap();
        assert_eq!(balance.last_modified_time, -31_536_010);
        assert_eq!(balance.expires_at, None);
    }

    #[test]
    fn deserialize_rejects_malformed_field() {
        let err = serde_json::from_str::<ClaimableBalance>(
            r#"{ "last_modified_time": "2021-02-30T00:00:00Z" }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("MalformedTimestamp"));

        let err = serde_json::from_str::<ClaimableBalance>(
            r#"{ "last_modified_time": "+292277026597-01-01T00:00:00Z" }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("RangeExceeded"));
    }

    #[test]
    fn parsed_timestamp_string_form() {
        let ts: ParsedTimestamp =
            serde_json::from_str(r#""+39121901036-03-29T15:30:22Z""#).unwrap();
        assert_eq!(ts.year(), 39_121_901_036);
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            r#""+39121901036-03-29T15:30:22Z""#
        );
    }
}
