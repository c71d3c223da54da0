#[cfg(test)]
#[path = "history_browser_test.rs"]
mod tests;

use super::ResponsePayloadParser;
use crate::domain::models::AnalysisRecord;
use crate::domain::models::BackendBox;
use crate::domain::models::ParsedAnalysis;

pub struct OpenAnalysis {
    pub record: AnalysisRecord,
    pub parsed: ParsedAnalysis,
}

/// Past analyses as listed by the backend, with at most one of them opened
/// at a time. Only the opened record's payload is ever parsed.
pub struct HistoryBrowser {
    backend: BackendBox,
    records: Vec<AnalysisRecord>,
    selected: Option<OpenAnalysis>,
}

impl HistoryBrowser {
    pub fn new(backend: BackendBox) -> HistoryBrowser {
        return HistoryBrowser {
            backend,
            records: vec![],
            selected: None,
        };
    }

    /// Failures are logged and leave the list empty.
    pub async fn load(&mut self) {
        match self.backend.list_analyses().await {
            Ok(records) => {
                tracing::debug!(count = records.len(), "Loaded analysis history");
                self.records = records;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to load analysis history");
                self.records = vec![];
            }
        }
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        return &self.records;
    }

    pub fn select(&mut self, record: &AnalysisRecord) -> &ParsedAnalysis {
        let parsed = ResponsePayloadParser::parse(&record.result_md);
        let open = self.selected.insert(OpenAnalysis {
            record: record.clone(),
            parsed,
        });

        return &open.parsed;
    }

    pub fn select_by_id(&mut self, id: i64) -> Option<&ParsedAnalysis> {
        let record = self.records.iter().find(|e| return e.id == id)?.clone();
        return Some(self.select(&record));
    }

    pub fn selected(&self) -> Option<&OpenAnalysis> {
        return self.selected.as_ref();
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
