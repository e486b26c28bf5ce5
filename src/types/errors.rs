use thiserror::Error;

#[derive(Debug, Error)]
pub enum NumberError {
    #[error("Number error: '{0}' is not a decimal number")]
    InvalidFormat(String),
    #[error("Number error: '{value}' could not be represented: {source}")]
    Decimal {
        value: String,
        source: rust_decimal::Error
    }
}
