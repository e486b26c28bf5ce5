mod errors;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

pub use errors::RowError;
pub use transaction::Transaction;

/// Raised when a field does not name a member of one of the closed enumerations.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("Unrecognized {kind} '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String
}

impl UnknownValue {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

/// Lifecycle state of an order as reported by the broker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TransactionStatus {
    Executed,
    Cancelled,
    Expired,
    Pending,
    Rejected
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Executed => "Executed",
            Self::Cancelled => "Cancelled",
            Self::Expired => "Expired",
            Self::Pending => "Pending",
            Self::Rejected => "Rejected"
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Executed" => Ok(Self::Executed),
            "Cancelled" => Ok(Self::Cancelled),
            "Expired" => Ok(Self::Expired),
            "Pending" => Ok(Self::Pending),
            "Rejected" => Ok(Self::Rejected),
            _ => Err(UnknownValue::new("status", value))
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AssetType {
    Security,
    Cash
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Cash => "Cash"
        }
    }
}

impl FromStr for AssetType {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Security" => Ok(Self::Security),
            "Cash" => Ok(Self::Cash),
            _ => Err(UnknownValue::new("asset type", value))
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum TransactionType {
    Buy,
    Sell,
    Distribution,
    Interest,
    Taxes,
    Fee,
    Deposit,
    Withdrawal,
    CorporateAction
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Distribution => "Distribution",
            Self::Interest => "Interest",
            Self::Taxes => "Taxes",
            Self::Fee => "Fee",
            Self::Deposit => "Deposit",
            Self::Withdrawal => "Withdrawal",
            Self::CorporateAction => "Corporate action"
        }
    }
}

impl FromStr for TransactionType {
    type Err = UnknownValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Buy" => Ok(Self::Buy),
            "Sell" => Ok(Self::Sell),
            "Distribution" => Ok(Self::Distribution),
            "Interest" => Ok(Self::Interest),
            "Taxes" => Ok(Self::Taxes),
            "Fee" => Ok(Self::Fee),
            "Deposit" => Ok(Self::Deposit),
            "Withdrawal" => Ok(Self::Withdrawal),
            "Corporate action" => Ok(Self::CorporateAction),
            _ => Err(UnknownValue::new("transaction type", value))
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Display for AssetType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
