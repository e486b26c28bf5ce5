//! Realized capital gains for broker exports.
//!
//! A semicolon delimited export is parsed into validated transactions
//! (`parser`), executed sales are matched against purchases of the same
//! security in FIFO order (`matcher`) and the result is prepared for display
//! (`report`).

pub mod matcher;
pub mod models;
pub mod parser;
pub mod report;
pub mod types;

pub use matcher::{match_lots, remaining_open_shares, LotLedger, MatchError};
pub use models::{AssetType, RowError, Transaction, TransactionStatus, TransactionType};
pub use parser::{parse, ParseError, ParserConfig, TransactionFile, TransactionParser};
pub use report::{IsinFilter, Report};
pub use types::NumberFormat;
