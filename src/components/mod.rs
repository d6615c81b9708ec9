//! The primary date-time components provided by `extended_timestamp`.

mod timestamp;

#[doc(inline)]
pub use timestamp::ParsedTimestamp;
