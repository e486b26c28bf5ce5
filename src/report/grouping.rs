use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::{Transaction, TransactionType};
use crate::types::{Money, Quantity};

/// How executed transactions are bucketed for display.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum GroupKey {
    /// Everything that happened to one security.
    Security(String),
    /// Cash moved in or out of the account.
    DepositWithdrawal,
    /// Remaining cash transactions, one group per type.
    Type(TransactionType)
}

impl Display for GroupKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Security(isin) => formatter.write_str(isin),
            Self::DepositWithdrawal => formatter.write_str("Deposit/Withdrawal"),
            Self::Type(transaction_type) => formatter.write_str(transaction_type.as_str())
        }
    }
}

pub fn group_key(transaction: &Transaction) -> GroupKey {
    if !transaction.isin.is_empty() {
        return GroupKey::Security(transaction.isin.clone());
    }

    match transaction.transaction_type {
        TransactionType::Deposit | TransactionType::Withdrawal => GroupKey::DepositWithdrawal,
        other => GroupKey::Type(other)
    }
}

/// One group with its totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionGroup {
    pub key: GroupKey,
    pub title: String,
    /// Positions in `Report::executed`, ascending by time.
    pub indices: Vec<usize>,
    pub open_shares: Quantity,
    pub amount: Money,
    pub fee: Money,
    pub tax: Money,
    pub gain_or_loss: Money
}

impl TransactionGroup {
    pub fn is_security(&self) -> bool {
        matches!(self.key, GroupKey::Security(_))
    }
}
