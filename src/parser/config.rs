use rust_decimal::Decimal;

use crate::types::{Money, NumberFormat};

/// Format and acceptance rules for an export.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Field separator.
    pub delimiter: u8,
    pub number_format: NumberFormat,
    /// The only currency rows may be denominated in.
    pub base_currency: String,
    pub min_year: i32,
    pub max_year: i32,
    /// Allowed absolute difference between `price * shares` and `amount`.
    pub amount_tolerance: Money
}

impl ParserConfig {
    pub fn with_base_currency(mut self, currency: impl Into<String>) -> Self {
        self.base_currency = currency.into();
        self
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            number_format: NumberFormat::DECIMAL_COMMA,
            base_currency: "EUR".to_string(),
            min_year: 2000,
            max_year: 2100,
            amount_tolerance: Decimal::new(1, 2)
        }
    }
}
