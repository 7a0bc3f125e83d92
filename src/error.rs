//! Toolkit error types.

use thiserror::Error;

use crate::widgets::WidgetId;

#[derive(Debug, Error)]
pub enum Error {
    /// A run-encoded row whose run lengths do not cover its characters exactly.
    #[error("row {row}: colour runs cover {actual} cells, row has {expected}")]
    ContractViolation {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("widget produced {rows} rows but {colors} colour annotations")]
    RowCountMismatch { rows: usize, colors: usize },

    #[error("no widget registered as {0}")]
    UnknownWidget(WidgetId),

    #[error("widget {id} is not a {expected}")]
    WidgetKindMismatch { id: WidgetId, expected: &'static str },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
