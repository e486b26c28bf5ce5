use chrono::{Datelike, NaiveDateTime};

use crate::models::{AssetType, TransactionStatus, TransactionType};
use crate::types::{Money, Quantity};

/// A single validated row of a broker export.
///
/// Values are immutable once parsed. Lot consumption and realized gains are
/// not stored here; they live in the `LotLedger` produced by `match_lots`,
/// keyed by the transaction's position in the matched slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The source line, verbatim.
    pub raw: String,
    /// Date and time of day taken literally from the export, no timezone applied.
    pub time: NaiveDateTime,
    pub status: TransactionStatus,
    /// Broker reference. Not guaranteed to be unique.
    pub reference: String,
    pub description: String,
    pub asset_type: AssetType,
    pub transaction_type: TransactionType,
    /// Empty for cash transactions.
    pub isin: String,
    pub shares: Quantity,
    pub price: Money,
    pub amount: Money,
    pub fee: Money,
    pub tax: Money,
    pub currency: String
}

impl Transaction {
    pub fn is_buy(&self) -> bool {
        self.transaction_type == TransactionType::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.transaction_type == TransactionType::Sell
    }

    pub fn is_executed(&self) -> bool {
        self.status == TransactionStatus::Executed
    }

    pub fn year(&self) -> i32 {
        self.time.year()
    }
}
