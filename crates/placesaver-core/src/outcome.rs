/// What happened to the memo of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoStatus {
    /// The record carried no memo.
    NotRequested,
    /// The memo was written to the list entry.
    Written,
    /// A memo already existed on the entry, or the list kind has no note
    /// editor. The existing content is left untouched and the record still
    /// counts as saved; the reason is kept for the end-of-run summary.
    Conflict(String),
}

/// Per-record result of one save attempt.
///
/// Produced by the save sequencer, consumed by the importer for logging and
/// the run summary. Never persisted.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub title: String,
    pub saved: bool,
    pub failure: Option<String>,
    pub memo: MemoStatus,
}

impl SaveOutcome {
    pub fn saved(title: impl Into<String>, memo: MemoStatus) -> Self {
        Self {
            title: title.into(),
            saved: true,
            failure: None,
            memo,
        }
    }

    pub fn failed(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            saved: false,
            failure: Some(reason.into()),
            memo: MemoStatus::NotRequested,
        }
    }

    pub fn memo_conflict(&self) -> bool {
        matches!(self.memo, MemoStatus::Conflict(_))
    }
}
