use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One USD-BRL snapshot as served by the upstream API and by `/cotacao`.
///
/// The four rate fields travel as JSON strings (`"5.05"`) and are kept as
/// `f64` in memory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Quotation {
    pub code: String,
    pub codein: String,
    pub name: String,
    #[serde(with = "string_float")]
    pub high: f64,
    #[serde(with = "string_float")]
    pub low: f64,
    #[serde(rename = "varBid", with = "string_float")]
    pub var_bid: f64,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
    #[serde(with = "string_float")]
    pub bid: f64,
    pub ask: String,
    pub timestamp: String,
    pub create_date: String,
}

/// What the local client keeps from a `/cotacao` response.
#[derive(Debug, Deserialize, PartialEq)]
pub struct BidQuotation {
    pub bid: String,
}

/// Decodes an upstream body of the form `{"USDBRL": {...}}`.
pub fn unwrap_envelope(body: &[u8]) -> Result<Quotation> {
    let envelope: Map<String, Value> = serde_json::from_slice(body)?;
    single_value(envelope)
}

fn single_value<T: DeserializeOwned>(envelope: Map<String, Value>) -> Result<T> {
    let keys = envelope.len();
    let mut entries = envelope.into_iter();
    match (entries.next(), entries.next()) {
        (Some((_, inner)), None) => Ok(serde_json::from_value(inner)?),
        _ => Err(Error::Decode(format!(
            "expected an envelope with exactly one key, got {keys}"
        ))),
    }
}

mod string_float {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        let text = serde_json::to_string(value).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Only JSON number literals are accepted inside the string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let not_decimal = || D::Error::custom(format!("`{raw}` is not a decimal number"));
        if raw.trim() != raw {
            return Err(not_decimal());
        }
        let value: f64 = serde_json::from_str(&raw).map_err(|_| not_decimal())?;
        if !value.is_finite() {
            return Err(D::Error::custom(format!("`{raw}` is not a finite number")));
        }
        Ok(value)
    }
}
