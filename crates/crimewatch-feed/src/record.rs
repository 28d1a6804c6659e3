use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One crime report as served by the incidents API.
///
/// Field names follow the upstream Berkeley PD dataset. Strings are trimmed
/// on the way in; blank optional fields become `None`, so render code never
/// has to check for whitespace-only values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Incident {
    /// Stable unique identifier; used as the render key.
    #[serde(rename = "OBJECTID")]
    pub id: u64,

    #[serde(rename = "Incident_Type", default, deserialize_with = "trimmed")]
    pub incident_type: String,

    #[serde(rename = "Occurred_Datetime", default)]
    pub occurred: OccurredAt,

    #[serde(rename = "Block_Address", default, deserialize_with = "trimmed")]
    pub block_address: String,

    #[serde(rename = "Case_Number", default, deserialize_with = "trimmed")]
    pub case_number: String,

    #[serde(
        rename = "Description",
        alias = "Statute_Description",
        alias = "description",
        default,
        deserialize_with = "non_blank"
    )]
    pub description: Option<String>,

    /// Statute category (e.g. "PC", "VC") when the dataset provides it.
    #[serde(rename = "Statute_Type", default, deserialize_with = "non_blank")]
    pub statute_type: Option<String>,
}

/// When an incident occurred, as the API sent it.
///
/// ArcGIS feeds send epoch milliseconds; the JSON API normally sends an
/// ISO-8601 string. Strings are kept verbatim and parsed at render time.
/// Any other JSON value is kept as its JSON text in `Other`; it and
/// unparseable strings render as [`INVALID_DATE`](crate::timestamp::INVALID_DATE).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OccurredAt {
    EpochMillis(i64),
    Text(String),
    Other(String),
    #[default]
    Missing,
}

impl<'de> Deserialize<'de> for OccurredAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => OccurredAt::Missing,
            Value::String(text) => OccurredAt::Text(text),
            Value::Number(n) => match n.as_i64().or_else(|| whole_millis(n.as_f64())) {
                Some(ms) => OccurredAt::EpochMillis(ms),
                None => OccurredAt::Other(n.to_string()),
            },
            other => OccurredAt::Other(other.to_string()),
        })
    }
}

/// `1704103200000.0` is still a millisecond count; `1.5` is not.
fn whole_millis(value: Option<f64>) -> Option<i64> {
    value
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .filter(|v| (i64::MIN as f64..=i64::MAX as f64).contains(v))
        .map(|v| v as i64)
}

impl Incident {
    /// Convenience constructor with the required display fields.
    pub fn new(
        id: u64,
        incident_type: impl Into<String>,
        occurred: OccurredAt,
        block_address: impl Into<String>,
        case_number: impl Into<String>,
    ) -> Self {
        Self {
            id,
            incident_type: incident_type.into(),
            occurred,
            block_address: block_address.into(),
            case_number: case_number.into(),
            description: None,
            statute_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        let description = description.trim();
        self.description = (!description.is_empty()).then(|| description.to_string());
        self
    }
}

impl From<&str> for OccurredAt {
    fn from(text: &str) -> Self {
        OccurredAt::Text(text.to_string())
    }
}

/// Text of a scalar JSON value. Numbers and booleans are stringified;
/// null, arrays and objects have no display text.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).filter(|s| !s.is_empty()))
}
