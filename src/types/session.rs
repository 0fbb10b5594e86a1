//! Session payloads returned by the token exchange and renewal endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Payload of a successful `POST /session/token`.
///
/// Only `access_token` is guaranteed; the profile fields depend on the
/// account and app permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub access_token: String,
    #[serde(default)]
    pub public_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_shortname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub broker: Option<String>,
    #[serde(default)]
    pub exchanges: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub order_types: Vec<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Login timestamp, exchange local time.
    #[serde(default, with = "api_datetime")]
    pub login_time: Option<NaiveDateTime>,
}

/// Payload of a successful `POST /session/refresh_token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRenewal {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// `YYYY-MM-DD HH:MM:SS` timestamps, tolerating `null` and empty strings.
pub(crate) mod api_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => NaiveDateTime::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_full_session_payload() {
        let json = r#"{
            "user_type": "individual",
            "email": "xxxyyy@gmail.com",
            "user_name": "AxAx Bxx",
            "user_shortname": "AxAx",
            "broker": "ZERODHA",
            "exchanges": ["NSE", "NFO", "BSE"],
            "products": ["CNC", "NRML", "MIS"],
            "order_types": ["MARKET", "LIMIT", "SL", "SL-M"],
            "avatar_url": null,
            "user_id": "XX0000",
            "api_key": "xxxxxx",
            "access_token": "yyyyyy",
            "public_token": "zzzzzz",
            "refresh_token": "",
            "login_time": "2021-01-01 16:15:14"
        }"#;
        let data: SessionData = serde_json::from_str(json).unwrap();
        assert_eq!(data.access_token, "yyyyyy");
        assert_eq!(data.public_token.as_deref(), Some("zzzzzz"));
        assert_eq!(data.user_id.as_deref(), Some("XX0000"));
        assert_eq!(data.exchanges.len(), 3);
        assert!(data.avatar_url.is_none());

        let login = data.login_time.unwrap();
        assert_eq!((login.year(), login.month(), login.day()), (2021, 1, 1));
        assert_eq!((login.hour(), login.minute(), login.second()), (16, 15, 14));
    }

    #[test]
    fn access_token_only() {
        let data: SessionData = serde_json::from_str(r#"{"access_token":"tok"}"#).unwrap();
        assert_eq!(data.access_token, "tok");
        assert!(data.login_time.is_none());
        assert!(data.exchanges.is_empty());
    }

    #[test]
    fn missing_access_token_is_rejected() {
        assert!(serde_json::from_str::<SessionData>(r#"{"user_id":"XX0000"}"#).is_err());
    }

    #[test]
    fn empty_login_time_is_none() {
        let data: SessionData =
            serde_json::from_str(r#"{"access_token":"tok","login_time":""}"#).unwrap();
        assert!(data.login_time.is_none());
    }

    #[test]
    fn login_time_serializes_back_to_api_format() {
        let data: SessionData =
            serde_json::from_str(r#"{"access_token":"tok","login_time":"2024-03-05 09:15:00"}"#)
                .unwrap();
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["login_time"], "2024-03-05 09:15:00");
    }
}
