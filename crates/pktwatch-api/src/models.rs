// Wire types for the packet monitoring REST API.
//
// Response shapes are kept close to the server's JSON; conversion into
// display-ready domain types happens in `pktwatch-core`.

use std::fmt;

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── PacketId ────────────────────────────────────────────────────────

/// Identifier of a single packet record.
///
/// The server emits numeric ids, but string ids are accepted too so a
/// schema change on the backend doesn't break decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PacketId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for PacketId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<&str> for PacketId {
    fn from(s: &str) -> Self {
        s.parse::<u64>()
            .map_or_else(|_| Self::Text(s.to_owned()), Self::Numeric)
    }
}

impl From<String> for PacketId {
    fn from(s: String) -> Self {
        s.parse::<u64>().map_or(Self::Text(s), Self::Numeric)
    }
}

// ── Query ───────────────────────────────────────────────────────────

/// Filter criteria shared by the count and list endpoints.
///
/// Each category carries only the values of *selected* options; an empty
/// vector means "no restriction" and contributes no parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PacketQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub regions: Vec<String>,
    pub locations: Vec<String>,
    pub models: Vec<String>,
    pub types: Vec<String>,
}

impl PacketQuery {
    /// Encode as query pairs.
    ///
    /// Arrays use the bracketed repeated-key convention
    /// (`regions[]=a&regions[]=b`); empty arrays contribute no pairs.
    pub fn to_params(&self, access_token: Option<&SecretString>) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(token) = access_token {
            params.push(("access_token".to_owned(), token.expose_secret().to_owned()));
        }
        if let Some(start) = self.start {
            params.push(("start".to_owned(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end {
            params.push(("end".to_owned(), end.format("%Y-%m-%d").to_string()));
        }
        for (key, values) in [
            ("regions[]", &self.regions),
            ("locations[]", &self.locations),
            ("models[]", &self.models),
            ("types[]", &self.types),
        ] {
            params.extend(values.iter().map(|v| (key.to_owned(), v.clone())));
        }
        params
    }
}

// ── Responses ───────────────────────────────────────────────────────

/// `GET /packets/count`
#[derive(Debug, Clone, Deserialize)]
pub struct PacketCountResponse {
    pub count: u64,
}

/// `GET /packets`
#[derive(Debug, Clone, Deserialize)]
pub struct PacketListResponse {
    pub info: PacketInfoResponse,
    #[serde(default)]
    pub list: Vec<PacketRecord>,
}

/// Aggregate counters shown above the packet table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PacketInfoResponse {
    #[serde(default)]
    pub today: u64,
    #[serde(default)]
    pub cycle: u64,
    #[serde(default)]
    pub capture: u64,
    #[serde(default)]
    pub error: u64,
}

/// A packet record exactly as the server returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct PacketRecord {
    /// `YYMMDDHHmm`, ten digits.
    #[serde(deserialize_with = "string_or_number")]
    pub created_at: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub model_name: String,
    /// `"5"` cycle, `"4"` warning, anything else an error report.
    #[serde(rename = "type", deserialize_with = "string_or_number")]
    pub packet_type: String,
    pub packet_id: PacketId,
    #[serde(default)]
    pub packet: Value,
    #[serde(default, deserialize_with = "truthy")]
    pub is_read: bool,
}

/// `GET /dashboards/devices/status`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceStatusResponse {
    #[serde(default)]
    pub normal: u64,
    #[serde(default)]
    pub replacement: u64,
    #[serde(default)]
    pub error: u64,
}

// ── Lenient field decoders ──────────────────────────────────────────

fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    match Value::deserialize(de)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// `is_read` has been seen as a bool, a 0/1 integer and null.
fn truthy<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && s != "false",
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_query_sends_only_token() {
        let token = SecretString::from("tok".to_owned());
        let params = PacketQuery::default().to_params(Some(&token));
        assert_eq!(params, vec![("access_token".to_owned(), "tok".to_owned())]);
    }

    #[test]
    fn arrays_use_bracketed_keys() {
        let query = PacketQuery {
            start: NaiveDate::from_ymd_opt(2024, 3, 1),
            end: NaiveDate::from_ymd_opt(2024, 3, 15),
            regions: vec!["Seoul".into(), "Busan".into()],
            types: vec!["5".into()],
            ..PacketQuery::default()
        };
        let params = query.to_params(None);
        assert_eq!(
            params,
            vec![
                ("start".to_owned(), "2024-03-01".to_owned()),
                ("end".to_owned(), "2024-03-15".to_owned()),
                ("regions[]".to_owned(), "Seoul".to_owned()),
                ("regions[]".to_owned(), "Busan".to_owned()),
                ("types[]".to_owned(), "5".to_owned()),
            ]
        );
    }

    #[test]
    fn record_accepts_loose_field_types() {
        let record: PacketRecord = serde_json::from_value(json!({
            "created_at": 2403151230_u64,
            "region": "Seoul",
            "location": "Gangnam",
            "model_name": "PM-100",
            "type": 5,
            "packet_id": 42,
            "packet": {"temp": 21},
            "is_read": 0
        }))
        .unwrap();
        assert_eq!(record.created_at, "2403151230");
        assert_eq!(record.packet_type, "5");
        assert_eq!(record.packet_id, PacketId::Numeric(42));
        assert!(!record.is_read);
    }

    #[test]
    fn packet_id_from_str_prefers_numeric() {
        assert_eq!(PacketId::from("17"), PacketId::Numeric(17));
        assert_eq!(PacketId::from("pkt-9"), PacketId::Text("pkt-9".into()));
        assert_eq!(PacketId::Text("pkt-9".into()).to_string(), "pkt-9");
    }
}
