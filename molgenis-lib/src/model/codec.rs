//! JSON codec and date convention
//!
//! Every entity and envelope is decoded with [`decode`] and encoded with
//! [`encode`]. Dates use a single ISO-8601 convention everywhere: encoded as
//! `2020-03-16T00:00:00Z` (UTC, whole seconds), decoded from any RFC 3339
//! timestamp and normalized to UTC.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decodes a response body.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::decode_with_body(e.to_string(), bytes))
}

/// Encodes a request body.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(|e| ApiError::decode(format!("failed to encode body: {e}")))
}

/// Serde helpers for `DateTime<Utc>` fields.
///
/// ```
/// use chrono::{DateTime, Utc};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Sample {
///     #[serde(with = "molgenis_lib::model::codec::iso8601")]
///     collected: DateTime<Utc>,
/// }
/// ```
pub mod iso8601 {
    use chrono::DateTime;
    use chrono::SecondsFormat;
    use chrono::Utc;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serializer;

    /// Formats a timestamp the way the API expects it.
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Parses any RFC 3339 timestamp into UTC.
    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid ISO-8601 date '{raw}': {e}")))
    }

    /// The same convention for optional fields.
    pub mod option {
        use chrono::DateTime;
        use chrono::Utc;
        use serde::Deserialize;
        use serde::Deserializer;
        use serde::Serializer;

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_str(&super::format(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) => super::parse(&raw).map(Some).map_err(|e| {
                    serde::de::Error::custom(format!("invalid ISO-8601 date '{raw}': {e}"))
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::TimeZone;
    use chrono::Utc;
    use serde::Deserialize;
    use serde::Serialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "iso8601")]
        collected: DateTime<Utc>,
        #[serde(default, with = "iso8601::option")]
        shipped: Option<DateTime<Utc>>,
    }

    #[test]
    fn encodes_whole_seconds_with_z() {
        let sample = Sample {
            collected: Utc.with_ymd_and_hms(2020, 3, 16, 0, 0, 0).unwrap(),
            shipped: None,
        };
        let json = String::from_utf8(encode(&sample).unwrap()).unwrap();
        assert_eq!(json, r#"{"collected":"2020-03-16T00:00:00Z","shipped":null}"#);
    }

    #[test]
    fn decodes_offsets_into_utc() {
        let sample: Sample = decode(
            br#"{"collected":"2020-03-16T02:00:00+02:00","shipped":"2020-03-17T10:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(sample.collected, Utc.with_ymd_and_hms(2020, 3, 16, 0, 0, 0).unwrap());
        assert_eq!(
            sample.shipped,
            Some(Utc.with_ymd_and_hms(2020, 3, 17, 10, 30, 0).unwrap())
        );
    }

    #[test]
    fn missing_optional_date_is_none() {
        let sample: Sample = decode(br#"{"collected":"2020-03-16T00:00:00Z"}"#).unwrap();
        assert!(sample.shipped.is_none());
    }

    #[test]
    fn malformed_date_is_a_decode_error() {
        let err = decode::<Sample>(br#"{"collected":"16-03-2020"}"#).unwrap_err();
        match err {
            ApiError::Decode { message, body } => {
                assert!(message.contains("16-03-2020"));
                assert!(body.unwrap().contains("collected"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
