use crate::types::Money;
use thiserror::Error;

/// Why a single row was rejected. The row is skipped, parsing goes on.
///
/// Every message carries the offending raw value and the whole source row.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum RowError {
    #[error("Invalid date {value} in row [{row}]")]
    InvalidDate {
        value: String,
        row: String
    },
    #[error("Invalid year {year} in row [{row}]")]
    InvalidYear {
        year: i32,
        row: String
    },
    #[error("Invalid status {value} in row [{row}]")]
    InvalidStatus {
        value: String,
        row: String
    },
    #[error("Invalid asset type {value} in row [{row}]")]
    InvalidAssetType {
        value: String,
        row: String
    },
    #[error("Invalid transaction type {value} in row [{row}]")]
    InvalidType {
        value: String,
        row: String
    },
    #[error("Invalid shares {value} in row [{row}]")]
    InvalidShares {
        value: String,
        row: String
    },
    #[error("Invalid price {value} in row [{row}]")]
    InvalidPrice {
        value: String,
        row: String
    },
    #[error("Invalid amount {value} in row [{row}]")]
    InvalidAmount {
        value: String,
        row: String
    },
    #[error("Invalid fee {value} in row [{row}]")]
    InvalidFee {
        value: String,
        row: String
    },
    #[error("Invalid tax {value} in row [{row}]")]
    InvalidTax {
        value: String,
        row: String
    },
    #[error("Expecting only {expected} but got {value} in row [{row}]")]
    UnexpectedCurrency {
        expected: String,
        value: String,
        row: String
    },
    #[error("Invalid amount {value} - expected {expected} in row [{row}]")]
    AmountMismatch {
        value: String,
        expected: Money,
        row: String
    }
}

impl RowError {
    pub fn invalid_date(value: &str, row: &str) -> Self {
        Self::InvalidDate { value: value.to_string(), row: row.to_string() }
    }

    pub fn invalid_year(year: i32, row: &str) -> Self {
        Self::InvalidYear { year, row: row.to_string() }
    }

    pub fn invalid_status(value: &str, row: &str) -> Self {
        Self::InvalidStatus { value: value.to_string(), row: row.to_string() }
    }

    pub fn invalid_asset_type(value: &str, row: &str) -> Self {
        Self::InvalidAssetType { value: value.to_string(), row: row.to_string() }
    }

    pub fn invalid_type(value: &str, row: &str) -> Self {
        Self::InvalidType { value: value.to_string(), row: row.to_string() }
    }

    pub fn invalid_shares(value: &str, row: &str) -> Self {
        Self::InvalidShares { value: value.to_string(), row: row.to_string() }
    }

    pub fn invalid_price(value: &str, row: &str) -> Self {
        Self::InvalidPrice { value: value.to_string(), row: row.to_string() }
    }

    pub fn invalid_amount(value: &str, row: &str) -> Self {
        Self::InvalidAmount { value: value.to_string(), row: row.to_string() }
    }

    pub fn invalid_fee(value: &str, row: &str) -> Self {
        Self::InvalidFee { value: value.to_string(), row: row.to_string() }
    }

    pub fn invalid_tax(value: &str, row: &str) -> Self {
        Self::InvalidTax { value: value.to_string(), row: row.to_string() }
    }

    pub fn unexpected_currency(expected: &str, value: &str, row: &str) -> Self {
        Self::UnexpectedCurrency {
            expected: expected.to_string(),
            value: value.to_string(),
            row: row.to_string()
        }
    }

    pub fn amount_mismatch(value: &str, expected: Money, row: &str) -> Self {
        Self::AmountMismatch {
            value: value.to_string(),
            expected,
            row: row.to_string()
        }
    }

    /// The source row the error refers to.
    pub fn row(&self) -> &str {
        match self {
            Self::InvalidDate { row, .. }
            | Self::InvalidYear { row, .. }
            | Self::InvalidStatus { row, .. }
            | Self::InvalidAssetType { row, .. }
            | Self::InvalidType { row, .. }
            | Self::InvalidShares { row, .. }
            | Self::InvalidPrice { row, .. }
            | Self::InvalidAmount { row, .. }
            | Self::InvalidFee { row, .. }
            | Self::InvalidTax { row, .. }
            | Self::UnexpectedCurrency { row, .. }
            | Self::AmountMismatch { row, .. } => row
        }
    }
}
