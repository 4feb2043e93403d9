//! Deserialization helpers for client-supplied values.
//!
//! Form-driven clients submit numbers as strings and dates in whatever shape
//! their date picker produces; these helpers coerce both without widening
//! the domain model types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use std::fmt;

struct CoercedInt;

impl Visitor<'_> for CoercedInt {
    type Value = i32;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer, or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
        i32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
        i32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
        if v.is_finite() && (i32::MIN as f64..=i32::MAX as f64).contains(&v) {
            Ok(v.trunc() as i32)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
        let trimmed = v.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return self.visit_i64(n);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return self.visit_f64(f);
        }
        Err(E::invalid_value(Unexpected::Str(v), &self))
    }
}

/// Deserialize an optional integer from a JSON number or a numeric string.
/// Fractional values are truncated toward zero.
pub(crate) fn opt_coerced_int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptVisitor;

    impl<'de> Visitor<'de> for OptVisitor {
        type Value = Option<i32>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an optional integer, or a numeric string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(CoercedInt).map(Some)
        }
    }

    deserializer.deserialize_option(OptVisitor)
}

struct LenientDateTime;

impl Visitor<'_> for LenientDateTime {
    type Value = DateTime<Utc>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a datetime string or epoch milliseconds")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        DateTime::<Utc>::from_timestamp_millis(v)
            .ok_or_else(|| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let millis =
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))?;
        self.visit_i64(millis)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let trimmed = v.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
        }

        Err(E::invalid_value(Unexpected::Str(v), &self))
    }
}

/// Deserialize an optional timestamp leniently: RFC 3339, naive datetime,
/// bare date (midnight UTC), or epoch milliseconds.
pub(crate) fn opt_lenient_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptVisitor;

    impl<'de> Visitor<'de> for OptVisitor {
        type Value = Option<DateTime<Utc>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an optional datetime")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(LenientDateTime).map(Some)
        }
    }

    deserializer.deserialize_option(OptVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct IntProbe {
        #[serde(default, deserialize_with = "opt_coerced_int")]
        value: Option<i32>,
    }

    #[derive(Deserialize)]
    struct DateProbe {
        #[serde(default, deserialize_with = "opt_lenient_datetime")]
        value: Option<DateTime<Utc>>,
    }

    fn int_of(json: &str) -> Result<Option<i32>, serde_json::Error> {
        serde_json::from_str::<IntProbe>(json).map(|p| p.value)
    }

    fn date_of(json: &str) -> Result<Option<DateTime<Utc>>, serde_json::Error> {
        serde_json::from_str::<DateProbe>(json).map(|p| p.value)
    }

    #[test]
    fn coerces_numbers_and_strings() {
        assert_eq!(int_of(r#"{"value":330}"#).unwrap(), Some(330));
        assert_eq!(int_of(r#"{"value":"330"}"#).unwrap(), Some(330));
        assert_eq!(int_of(r#"{"value":" 12 "}"#).unwrap(), Some(12));
        assert_eq!(int_of(r#"{"value":6.9}"#).unwrap(), Some(6));
        assert_eq!(int_of(r#"{"value":"6.9"}"#).unwrap(), Some(6));
        assert_eq!(int_of(r#"{"value":-5}"#).unwrap(), Some(-5));
    }

    #[test]
    fn missing_and_null_are_none() {
        assert_eq!(int_of("{}").unwrap(), None);
        assert_eq!(int_of(r#"{"value":null}"#).unwrap(), None);
        assert_eq!(date_of("{}").unwrap(), None);
        assert_eq!(date_of(r#"{"value":null}"#).unwrap(), None);
    }

    #[test]
    fn non_numeric_strings_are_rejected() {
        assert!(int_of(r#"{"value":"a lot"}"#).is_err());
        assert!(int_of(r#"{"value":""}"#).is_err());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(int_of(r#"{"value":4294967296}"#).is_err());
    }

    #[test]
    fn dates_parse_leniently() {
        let bare = date_of(r#"{"value":"2024-01-01"}"#).unwrap().unwrap();
        assert_eq!(bare.to_rfc3339(), "2024-01-01T00:00:00+00:00");

        let rfc = date_of(r#"{"value":"2024-01-01T20:30:00+02:00"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-01-01T18:30:00+00:00");

        let naive = date_of(r#"{"value":"2024-01-01T20:30:00"}"#).unwrap().unwrap();
        assert_eq!(naive.to_rfc3339(), "2024-01-01T20:30:00+00:00");

        let millis = date_of(r#"{"value":1704067200000}"#).unwrap().unwrap();
        assert_eq!(millis.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert!(date_of(r#"{"value":"yesterday"}"#).is_err());
        assert!(date_of(r#"{"value":"2024-13-01"}"#).is_err());
    }
}
