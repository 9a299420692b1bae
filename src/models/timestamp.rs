//! Timestamp handling for the ledger wire format
//!
//! The snapshot file stores timestamps as `DD.MM.YYYY HH:MM:SS` in local
//! time. These serde adapters keep `chrono` types on the Rust side while
//! preserving that format on disk.

use chrono::{Local, NaiveDateTime, Timelike};

/// strftime pattern for the on-disk timestamp format
pub const STAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Current local time, truncated to whole seconds
///
/// Truncation keeps in-memory values identical to what a reload from disk
/// would produce, since the wire format has no sub-second precision.
pub fn now() -> NaiveDateTime {
    Local::now()
        .naive_local()
        .with_nanosecond(0)
        .expect("zero nanoseconds is always in range")
}

/// Serde adapter for `NaiveDateTime` fields in the stamp format
pub mod stamp {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::STAMP_FORMAT;

    pub fn serialize<S>(stamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&stamp.format(STAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, STAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<NaiveDateTime>` fields in the stamp format
pub mod stamp_opt {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::STAMP_FORMAT;

    pub fn serialize<S>(stamp: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match stamp {
            Some(stamp) => serializer.serialize_some(&stamp.format(STAMP_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => NaiveDateTime::parse_from_str(&s, STAMP_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "stamp")]
        at: NaiveDateTime,
        #[serde(default, with = "stamp_opt", skip_serializing_if = "Option::is_none")]
        maybe: Option<NaiveDateTime>,
    }

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn test_format() {
        let json = serde_json::to_string(&Stamped {
            at: sample(),
            maybe: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"at":"07.03.2024 14:30:05"}"#);
    }

    #[test]
    fn test_round_trip() {
        let json = serde_json::to_string(&Stamped {
            at: sample(),
            maybe: Some(sample()),
        })
        .unwrap();
        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back.at, sample());
        assert_eq!(back.maybe, Some(sample()));
    }

    #[test]
    fn test_missing_optional_field() {
        let back: Stamped = serde_json::from_str(r#"{"at":"07.03.2024 14:30:05"}"#).unwrap();
        assert_eq!(back.maybe, None);
    }

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(now().nanosecond(), 0);
    }
}
