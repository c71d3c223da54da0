#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::de::Error;
use serde::Deserialize as _;
use serde::Deserializer;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ConfidenceItem;

#[derive(Serialize)]
struct ConfidenceBlock<'a> {
    items: &'a [ConfidenceItem],
}

/// A response payload split into its readable markdown and the optional
/// confidence breakdown that was embedded in it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedAnalysis {
    pub prose: String,
    pub items: Option<Vec<ConfidenceItem>>,
}

impl ParsedAnalysis {
    pub fn new(prose: &str, items: Option<Vec<ConfidenceItem>>) -> ParsedAnalysis {
        return ParsedAnalysis {
            prose: prose.to_string(),
            items,
        };
    }

    /// Recomposes a payload in the shape the diagnosis service produces: the
    /// prose followed by a single `json` fence holding the items.
    pub fn to_markdown(&self) -> String {
        let items = match &self.items {
            Some(items) => items,
            None => return self.prose.to_string(),
        };

        let block = serde_json::to_string_pretty(&ConfidenceBlock { items })
            .unwrap_or_else(|_| return "{}".to_string());
        let fence = format!("```json\n{block}\n```");

        if self.prose.is_empty() {
            return fence;
        }

        return format!("{}\n\n{fence}", self.prose);
    }
}

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepts RFC 3339 timestamps as well as ones without an offset, which the
/// service sends when it stores local time. The latter are read as UTC.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(timestamp) = raw.parse::<DateTime<Utc>>() {
        return Ok(timestamp);
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    return Err(D::Error::custom(format!("invalid timestamp: {raw}")));
}

/// A stored analysis as listed by the backend. Read-only on this side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: i64,
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
    pub symptoms: String,
    #[serde(default)]
    pub result_md: String,
    #[serde(default)]
    pub confidence_json: Option<serde_json::Value>,
}
