//! Per-agent records for the monthly summary and the daily breakdown

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One agent's figures for the whole month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMonthlyRecord {
    #[serde(
        rename = "empId",
        alias = "employeeId",
        default,
        deserialize_with = "lenient_text"
    )]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub agent_name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub silver: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gold: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub platinum: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub standard: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub target: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub achieved: f64,
    /// As supplied by the source; expected to equal `target - achieved`
    #[serde(default, deserialize_with = "lenient_number")]
    pub remaining: f64,
}

impl AgentMonthlyRecord {
    /// `target - achieved`, for checking the supplied `remaining`
    pub fn expected_remaining(&self) -> f64 {
        self.target - self.achieved
    }
}

/// One agent's figures for a single day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDailyRecord {
    #[serde(
        rename = "empId",
        alias = "employeeId",
        default,
        deserialize_with = "lenient_text"
    )]
    pub employee_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub agent_name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub silver: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub gold: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub platinum: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub standard: f64,
    /// As supplied by the source; expected to equal the tier sum
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: f64,
}

impl AgentDailyRecord {
    pub fn tier_sum(&self) -> f64 {
        self.silver + self.gold + self.platinum + self.standard
    }
}

/// Strings pass through, numbers and booleans are stringified,
/// anything else becomes empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Coerce any JSON value into a finite number, falling back to 0.
///
/// Numbers pass through, numeric strings are parsed, booleans map to 1/0,
/// everything else (null, objects, garbage strings, NaN/inf) becomes 0.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_number).unwrap_or(0.0))
}

pub(crate) fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}
