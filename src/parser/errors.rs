use thiserror::Error;

/// Structural problems that abort the whole import.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Input is empty, expected a header line")]
    MissingHeader,
    #[error("Required column [{column}] is missing from the header")]
    MissingColumn {
        column: &'static str
    },
    #[error("Invalid row, expected {expected} columns but found {found}: {row}")]
    ColumnCount {
        expected: usize,
        found: usize,
        row: String
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error)
}
