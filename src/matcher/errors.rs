use crate::models::{Transaction, TransactionStatus};
use crate::types::Quantity;
use thiserror::Error;

/// Conditions under which no valid cost basis can be produced. Any of these
/// aborts the matching pass.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Not enough shares to sell for [{reference}]:[{isin}], {missing} of {requested} shares have no matching purchase")]
    InsufficientShares {
        reference: String,
        isin: String,
        requested: Quantity,
        missing: Quantity
    },
    #[error("Transaction [{reference}] has status [{status}], only executed transactions can be matched")]
    NotExecuted {
        reference: String,
        status: TransactionStatus
    },
    #[error("Transaction [{reference}] is earlier than its predecessor, input must be sorted by time")]
    OutOfOrder {
        reference: String
    },
    #[error("Amounts of [{reference}] exceed the representable range")]
    Overflow {
        reference: String
    }
}

impl MatchError {
    pub fn insufficient_shares(sale: &Transaction, missing: Quantity) -> Self {
        Self::InsufficientShares {
            reference: sale.reference.clone(),
            isin: sale.isin.clone(),
            requested: sale.shares,
            missing
        }
    }

    pub fn not_executed(tx: &Transaction) -> Self {
        Self::NotExecuted {
            reference: tx.reference.clone(),
            status: tx.status
        }
    }

    pub fn out_of_order(tx: &Transaction) -> Self {
        Self::OutOfOrder {
            reference: tx.reference.clone()
        }
    }

    pub fn overflow(tx: &Transaction) -> Self {
        Self::Overflow {
            reference: tx.reference.clone()
        }
    }
}
