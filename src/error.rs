//! Error type shared by the store, editor, and refresh task.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::card::CardId;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown card: {0}")]
    UnknownCard(CardId),
    #[error("layout is not in edit mode")]
    NotEditing,
    #[error("item source failed: {0}")]
    Source(String),
}

impl LayoutError {
    /// Stable machine-readable code for host UIs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_STORE_IO",
            Self::Json(_) => "E_STORE_JSON",
            Self::UnknownCard(_) => "E_UNKNOWN_CARD",
            Self::NotEditing => "E_NOT_EDITING",
            Self::Source(_) => "E_SOURCE",
        }
    }
}
