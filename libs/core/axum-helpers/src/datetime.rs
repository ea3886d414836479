//! Wire format for timestamps: `yyyy-MM-dd HH:mm:ss`, interpreted as UTC.
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Draft {
//!     #[serde(with = "axum_helpers::datetime::format")]
//!     event_date: DateTime<Utc>,
//!     #[serde(default, with = "axum_helpers::datetime::option")]
//!     published_on: Option<DateTime<Utc>>,
//! }
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};

pub const PATTERN: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), PATTERN).map(|naive| naive.and_utc())
}

pub fn to_string(value: &DateTime<Utc>) -> String {
    value.format(PATTERN).to_string()
}

pub mod format {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_string(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(|e| D::Error::custom(format!("invalid date '{raw}': {e}")))
    }
}

pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&super::to_string(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => super::parse(&raw)
                .map(Some)
                .map_err(|e| D::Error::custom(format!("invalid date '{raw}': {e}"))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "format")]
        at: DateTime<Utc>,
        #[serde(default, with = "option")]
        maybe: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_wire_format() {
        let parsed = parse("2024-12-31 15:10:05").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 12, 31));
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (15, 10, 5));
    }

    #[test]
    fn test_rejects_iso_format() {
        assert!(parse("2024-12-31T15:10:05Z").is_err());
    }

    #[test]
    fn test_serde_with_missing_optional() {
        let stamped: Stamped = serde_json::from_str(r#"{"at":"2030-01-01 00:00:00"}"#).unwrap();
        assert!(stamped.maybe.is_none());
        let json = serde_json::to_value(&stamped).unwrap();
        assert_eq!(json["at"], "2030-01-01 00:00:00");
        assert!(json["maybe"].is_null());
    }
}
