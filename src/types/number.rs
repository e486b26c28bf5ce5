use crate::types::errors::NumberError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Describes how numbers are written in an export.
///
/// Brokers localise their exports, so the separators are injected rather than
/// assumed. Parsing removes every thousands separator, turns the decimal
/// separator into `.` and reads the remainder as a plain decimal literal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct NumberFormat {
    pub thousands_separator: Option<char>,
    pub decimal_separator: char
}

impl NumberFormat {
    /// `2.690,452` style.
    pub const DECIMAL_COMMA: NumberFormat = NumberFormat {
        thousands_separator: Some('.'),
        decimal_separator: ','
    };

    /// `2690.452` style, without grouping.
    pub const DECIMAL_POINT: NumberFormat = NumberFormat {
        thousands_separator: None,
        decimal_separator: '.'
    };

    /// Parses a single field. An empty (or blank) field is exactly zero.
    pub fn parse(&self, value: &str) -> Result<Decimal, NumberError> {
        let value = value.trim();

        if value.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let normalized: String = value.chars()
            .filter(|c| Some(*c) != self.thousands_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();

        let (negative, digits) = match normalized.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, normalized.strip_prefix('+').unwrap_or(&normalized))
        };

        let well_formed = digits.chars().any(|c| c.is_ascii_digit())
            && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
            && digits.matches('.').count() <= 1;

        if !well_formed {
            return Err(NumberError::InvalidFormat(value.to_string()));
        }

        let magnitude = Decimal::from_str(digits).map_err(|source| NumberError::Decimal {
            value: value.to_string(),
            source
        })?;

        Ok(if negative { -magnitude } else { magnitude })
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::DECIMAL_COMMA
    }
}
