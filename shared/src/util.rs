//! Time helpers
//!
//! Storage only ever sees `i64` Unix millis. Conversion to and from
//! calendar dates happens here so the API layer and the store agree on one
//! representation.

use chrono::{DateTime, NaiveDate, Utc};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Midnight UTC of `date` as Unix millis
pub fn date_to_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Calendar date (UTC) of a Unix millis timestamp
pub fn millis_to_date(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// Format a Unix millis timestamp as `YYYY-MM-DD`
pub fn format_date(millis: i64) -> Option<String> {
    millis_to_date(millis).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Parse either `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp into millis
pub fn parse_date_or_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date_to_millis(date));
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp_millis())
}

/// Serde adapter: `i64` millis <-> `"YYYY-MM-DD"`
///
/// Deserialization also accepts RFC 3339 timestamps.
pub mod date_millis {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(millis: &i64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match super::format_date(*millis) {
            Some(date) => s.serialize_str(&date),
            None => Err(serde::ser::Error::custom(format!(
                "timestamp out of range: {millis}"
            ))),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        super::parse_date_or_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {raw}, expected YYYY-MM-DD")))
    }
}

/// Serde adapter for `Option<i64>` millis, same wire format as [`date_millis`]
pub mod option_date_millis {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(millis: &Option<i64>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match millis {
            Some(m) => super::date_millis::serialize(m, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(d)? {
            Some(raw) => super::parse_date_or_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date: {raw}, expected YYYY-MM-DD"))),
            None => Ok(None),
        }
    }
}
