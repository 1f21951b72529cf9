//! Jolokia `read` response model.

use crate::Result;
use ohno::{IntoAppError, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute name to value, for one bean.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Status Jolokia reports for a successful request.
const STATUS_OK: i64 = 200;

/// The request Jolokia echoes back alongside the result.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RequestInfo {
    #[serde(default)]
    pub mbean: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A decoded Jolokia response to a wildcard `read` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseDocument {
    #[serde(default)]
    pub request: RequestInfo,

    pub status: i64,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub error_type: Option<String>,

    #[serde(default)]
    pub stacktrace: Option<String>,

    /// Seconds since the epoch at which the agent sampled the beans.
    #[serde(default)]
    pub timestamp: i64,

    /// Bean name to attribute map. Only meaningful when the status is 200 and there is no error.
    /// A `null` bean decodes as an empty map.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: BTreeMap<String, AttributeMap>,
}

/// A single JMX attribute value, as loosely typed as Jolokia serializes it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum AttributeValue {
    Null,
    Integer(i128),
    Float(f64),
    Text(String),
    Sequence(Vec<Value>),
    Unrecognized(Value),
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    Self::Integer(i128::from(u))
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::Unrecognized(Value::Number(n))
                }
            }
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Sequence(items),
            other @ (Value::Bool(_) | Value::Object(_)) => Self::Unrecognized(other),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, AttributeMap>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let beans = Option::<BTreeMap<String, Option<AttributeMap>>>::deserialize(deserializer)?;
    Ok(beans
        .unwrap_or_default()
        .into_iter()
        .map(|(key, attrs)| (key, attrs.unwrap_or_default()))
        .collect())
}

impl ResponseDocument {
    /// Decode a response body and reject documents the agent flagged as failed.
    pub fn decode(body: &[u8]) -> Result<Self> {
        let doc: Self = serde_json::from_slice(body).into_app_err("could not decode Jolokia response")?;
        doc.check()?;
        Ok(doc)
    }

    /// Fail if the agent reported an error for the request.
    pub fn check(&self) -> Result<()> {
        if let Some(stacktrace) = &self.stacktrace {
            log::debug!(target: super::LOG_TARGET, "Jolokia stacktrace: {stacktrace}");
        }

        match (&self.error, &self.error_type) {
            (Some(error), Some(error_type)) => bail!("Jolokia reported {error_type} (status {}): {error}", self.status),
            (Some(error), None) => bail!("Jolokia reported an error (status {}): {error}", self.status),
            (None, _) if self.status != STATUS_OK => bail!("Jolokia reported status {}", self.status),
            (None, _) => Ok(()),
        }
    }
}
