//! GitHub-style timestamps: UTC, second precision, `Z` suffix.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format used for every persisted and returned timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Current time truncated to whole seconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Render a timestamp the way GitHub does (`2024-01-15T10:30:00Z`).
pub fn format_iso(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_iso<E: serde::de::Error>(raw: &str) -> Result<DateTime<Utc>, E> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(E::custom)
}

/// `#[serde(with = "iso_seconds")]` for `DateTime<Utc>` fields.
pub mod iso_seconds {
    use super::{format_iso, parse_iso, DateTime, Deserialize, Deserializer, Serializer, Utc};

    /// Write as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_iso(ts))
    }

    /// Read any RFC 3339 timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_iso(&raw)
    }
}

/// `#[serde(with = "iso_seconds_option")]` for nullable timestamp fields.
pub mod iso_seconds_option {
    use super::{format_iso, parse_iso, DateTime, Deserialize, Deserializer, Serializer, Utc};

    /// Write a timestamp or null.
    pub fn serialize<S: Serializer>(
        ts: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match ts {
            Some(ts) => serializer.serialize_str(&format_iso(ts)),
            None => serializer.serialize_none(),
        }
    }

    /// Read a timestamp or null.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_iso(&raw))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_iso_uses_z_suffix() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_iso(&ts), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(now().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_iso_strings_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        assert!(format_iso(&earlier) < format_iso(&later));
    }
}
