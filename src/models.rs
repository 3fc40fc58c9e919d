use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SupportStatus {
    Yes,
    No,
    #[default]
    Unknown,
}

impl SupportStatus {
    pub const ALL: [SupportStatus; 3] = [Self::Yes, Self::No, Self::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Unknown => "Unknown",
        }
    }

    /// Lenient parse: anything that is not a yes/no answer counts as unknown.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            v if v.eq_ignore_ascii_case("yes") => Self::Yes,
            v if v.eq_ignore_ascii_case("no") => Self::No,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SupportStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SupportStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Self::parse).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlumniRecord {
    #[serde(deserialize_with = "lenient_sr_no")]
    pub sr_no: u32,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub batch: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub alumni_state_chapter: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub big_bet: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub work_status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub org_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub designation: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub college: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub university: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub linkedin: String,
    pub support_status: SupportStatus,
}

/// Any JSON scalar as text; numbers and bools keep their literal form,
/// arrays, objects and null read as absent.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// Integers, integral floats (`1.0`) and numeric strings; anything else
/// reads as 0.
fn lenient_sr_no<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().map(|v| v as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(number
        .filter(|v| v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(v))
        .map(|v| v as u32)
        .unwrap_or_default())
}

/// One row of a precomputed breakdown. The label comes from whichever of
/// `batch`, `state` or `status` the source document uses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DistributionEntry {
    #[serde(alias = "batch", alias = "state", alias = "status")]
    pub label: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl DistributionEntry {
    pub fn new(label: &str, count: u32, percentage: Option<f64>) -> Self {
        Self {
            label: label.to_string(),
            count,
            percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryStats {
    pub total_alumni: u32,
    pub total_batches: u32,
    pub support_yes: u32,
    pub support_no: u32,
    pub support_unknown: u32,
    pub states_represented: u32,
    pub colleges_represented: u32,
    pub work_status_categories: u32,
}

/// The record store: loaded once, read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub alumni_data: Vec<AlumniRecord>,
    pub batch_distribution: Vec<DistributionEntry>,
    pub state_distribution: Vec<DistributionEntry>,
    pub work_status_distribution: Vec<DistributionEntry>,
    pub summary_stats: SummaryStats,
}

impl Dataset {
    pub fn distinct_batches(&self) -> Vec<&str> {
        distinct(self.alumni_data.iter().map(|a| a.batch.as_str()))
    }

    pub fn distinct_states(&self) -> Vec<&str> {
        distinct(self.alumni_data.iter().map(|a| a.alumni_state_chapter.as_str()))
    }

    pub fn distinct_work_statuses(&self) -> Vec<&str> {
        distinct(self.alumni_data.iter().map(|a| a.work_status.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
