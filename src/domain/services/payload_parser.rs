#[cfg(test)]
#[path = "payload_parser_test.rs"]
mod tests;

use std::ops::Range;

use serde_json::Value;

use crate::domain::models::ConfidenceItem;
use crate::domain::models::ParsedAnalysis;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Byte offsets of a located fence within the scanned payload.
#[derive(Debug, PartialEq, Eq)]
struct FenceSpan {
    start: usize,
    body: Range<usize>,
    end: usize,
}

struct FenceScanner<'a> {
    text: &'a str,
}

impl<'a> FenceScanner<'a> {
    fn new(text: &'a str) -> FenceScanner<'a> {
        return FenceScanner { text };
    }

    /// Finds the first `json` opener and the first terminator after it. An
    /// opener without a terminator is not a fence.
    fn first_json_fence(&self) -> Option<FenceSpan> {
        let start = self.text.find(JSON_FENCE_OPEN)?;
        let body_start = start + JSON_FENCE_OPEN.len();
        let body_end = body_start + self.text[body_start..].find(FENCE_CLOSE)?;

        return Some(FenceSpan {
            start,
            body: body_start..body_end,
            end: body_end + FENCE_CLOSE.len(),
        });
    }
}

// `null`, `false`, `0` and `""` count as absent and fall through to the next
// candidate field.
fn is_present(value: &Value) -> bool {
    return match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| return f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
}

fn locate_items(value: &Value) -> Option<&Value> {
    if let Some(items) = value.get("items").filter(|v| return is_present(v)) {
        return Some(items);
    }

    return value
        .get("confidence")
        .and_then(|confidence| return confidence.get("items"))
        .filter(|v| return is_present(v));
}

fn decode_items(body: &str) -> Option<Vec<ConfidenceItem>> {
    let value = match serde_json::from_str::<Value>(body.trim()) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = ?err, "Confidence block is not valid JSON, ignoring it");
            return None;
        }
    };

    let items = locate_items(&value)?;
    match serde_json::from_value::<Vec<ConfidenceItem>>(items.clone()) {
        Ok(items) => return Some(items),
        Err(err) => {
            tracing::warn!(error = ?err, "Confidence items have an unexpected shape, ignoring them");
            return None;
        }
    }
}

pub struct ResponsePayloadParser {}

impl ResponsePayloadParser {
    /// Splits a markdown payload into its prose and the confidence items held
    /// in the first fenced `json` block. Never fails: anything that can't be
    /// decoded leaves `items` empty while the prose is still returned.
    pub fn parse(raw: &str) -> ParsedAnalysis {
        let span = match FenceScanner::new(raw).first_json_fence() {
            Some(span) => span,
            None => return ParsedAnalysis::new(raw.trim(), None),
        };

        let items = decode_items(&raw[span.body.clone()]);
        let prose = format!("{}{}", &raw[..span.start], &raw[span.end..]);

        return ParsedAnalysis::new(prose.trim(), items);
    }
}
