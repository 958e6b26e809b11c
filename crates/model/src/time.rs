//! Timestamps on the public record are serialized as RFC 3339 with
//! nanosecond precision in UTC so every endorser produces the same bytes.

use {
    chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc},
    serde::{Deserializer, Serializer, de},
    std::fmt,
};

/// Layout of the timestamps handed out by the external time recorder.
pub const RECORDER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// RFC 3339 layouts for a `Z` suffix (stripped before parsing) and for a
/// numeric offset. Only an upper case `T` separates date and time.
const RFC3339_UTC: &str = "%Y-%m-%dT%H:%M:%S%.f";
const RFC3339_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Parses an RFC 3339 instant with optional fractional seconds. The offset is
/// either an upper case `Z` or `+hh:mm`/`-hh:mm`.
pub fn parse_rfc3339_nano(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match value.strip_suffix('Z') {
        Some(utc) => NaiveDateTime::parse_from_str(utc, RFC3339_UTC).map(|time| time.and_utc()),
        None => {
            DateTime::parse_from_str(value, RFC3339_OFFSET).map(|time| time.with_timezone(&Utc))
        }
    }
}

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp as UTC.
pub fn parse_recorder_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, RECORDER_FORMAT).map(|time| time.and_utc())
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor {}
    impl de::Visitor<'_> for Visitor {
        type Value = DateTime<Utc>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            write!(formatter, "an RFC 3339 timestamp")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            parse_rfc3339_nano(s).map_err(|err| {
                de::Error::custom(format!("failed to decode {s:?} as RFC 3339 timestamp: {err}"))
            })
        }
    }

    deserializer.deserialize_str(Visitor {})
}
