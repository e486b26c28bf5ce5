mod errors;
mod number;
#[cfg(test)]
mod tests;

use rust_decimal::Decimal;

pub use errors::NumberError;
pub use number::NumberFormat;

/// Number of shares, possibly fractional.
pub type Quantity = Decimal;
/// A value in the base currency.
pub type Money = Decimal;
