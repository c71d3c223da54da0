#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use chrono::Local;
use yansi::Paint;

use crate::domain::models::AnalysisRecord;
use crate::domain::models::ConfidenceBar;
use crate::domain::models::Message;
use crate::domain::models::ParsedAnalysis;
use crate::domain::models::RenderableConfidence;
use crate::domain::models::Role;
use crate::domain::models::Tier;
use crate::domain::services::ConfidenceModel;
use crate::domain::services::OpenAnalysis;

const BAR_WIDTH: usize = 20;
const MAX_BAR_CELLS: usize = BAR_WIDTH * 2;

pub const CONFIDENCE_PLACEHOLDER: &str = "No diagnosis confidence data.";
pub const EMPTY_ANALYSIS_PLACEHOLDER: &str = "Your analysis will appear here.";
pub const EMPTY_HISTORY_TEXT: &str = "No saved analyses.";
pub const DISCLAIMER: &str =
    "This is not medical advice. Consult a doctor to get a proper diagnosis.";

fn paint_tier(tier: Tier, text: String) -> String {
    let painted = match tier {
        Tier::High => Paint::green(text),
        Tier::Medium => Paint::yellow(text),
        Tier::Low => Paint::red(text),
    };

    return painted.to_string();
}

/// A negative width draws nothing, anything past 100% spills over the
/// nominal bar width up to twice its size.
fn render_bar(bar: &ConfidenceBar) -> String {
    let filled = (bar.width / 100.0 * BAR_WIDTH as f64)
        .round()
        .clamp(0.0, MAX_BAR_CELLS as f64) as usize;
    let empty = BAR_WIDTH.saturating_sub(filled);

    let track = format!("{}{}", "█".repeat(filled), "░".repeat(empty));
    return format!(
        "{} {:>5}  {}",
        paint_tier(bar.tier, track),
        bar.label,
        bar.name
    );
}

pub fn render_confidence(confidence: &RenderableConfidence) -> String {
    let bars = match confidence {
        RenderableConfidence::Bars(bars) => bars,
        RenderableConfidence::NoData => return Paint::new(CONFIDENCE_PLACEHOLDER).italic().to_string(),
    };

    return bars
        .iter()
        .map(|bar| return render_bar(bar))
        .collect::<Vec<String>>()
        .join("\n");
}

pub fn render_analysis(parsed: &ParsedAnalysis) -> String {
    let mut prose = parsed.prose.to_string();
    if prose.is_empty() {
        prose = Paint::new(EMPTY_ANALYSIS_PLACEHOLDER).italic().to_string();
    }

    let confidence = ConfidenceModel::normalize(parsed.items.as_deref());

    return [
        Paint::new("AI analysis").bold().to_string(),
        prose,
        Paint::new("Diagnosis confidence").bold().to_string(),
        render_confidence(&confidence),
        Paint::red(DISCLAIMER).to_string(),
    ]
    .join("\n\n");
}

pub fn render_record_line(record: &AnalysisRecord) -> String {
    let mut line = record
        .symptoms
        .split('\n')
        .next()
        .unwrap_or_default()
        .to_string();

    if line.chars().count() >= 70 {
        line = format!("{}...", line.chars().take(67).collect::<String>());
    }

    return format!(
        "- (ID: {}) {}, {line}",
        record.id,
        record
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    );
}

pub fn render_record_list(records: &[AnalysisRecord]) -> String {
    if records.is_empty() {
        return EMPTY_HISTORY_TEXT.to_string();
    }

    return records
        .iter()
        .map(|record| return render_record_line(record))
        .collect::<Vec<String>>()
        .join("\n");
}

/// Detail view of a stored analysis: its list line, then the analysis.
pub fn render_open_analysis(open: &OpenAnalysis) -> String {
    return format!(
        "{}\n\n{}",
        Paint::new(render_record_line(&open.record)).bold(),
        render_analysis(&open.parsed)
    );
}

pub fn render_message(message: &Message) -> String {
    let author = match message.role() {
        Role::User => Paint::cyan("You").bold(),
        Role::Assistant => Paint::blue("Assistant").bold(),
    };

    return format!("{author}: {}", message.content());
}
