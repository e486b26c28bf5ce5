mod filter;
mod grouping;
mod prepared;

pub use filter::{IsinFilter, CRYPTO_ISINS};
pub use grouping::{group_key, GroupKey, TransactionGroup};
pub use prepared::{Report, YearlyGain};
