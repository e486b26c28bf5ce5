use rust_decimal::Decimal;

use crate::models::Transaction;
use crate::types::{Money, Quantity};

/// Shares taken from one purchase lot to cover a sale.
#[derive(Debug, Clone, PartialEq)]
pub struct LotAllocation {
    /// Position of the purchase in the matched slice.
    pub lot: usize,
    pub shares: Quantity,
    /// `shares * price` of the purchase.
    pub cost: Money
}

/// Bookkeeping for one transaction of the matched slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LotEntry {
    /// Buys only: shares of this lot already allocated to sales.
    pub shares_sold: Quantity,
    /// Sells only: proceeds minus cost basis, fee and tax.
    pub gain_or_loss: Money,
    /// Sells only: lots consumed, oldest first.
    pub allocations: Vec<LotAllocation>
}

impl LotEntry {
    pub fn cost_basis(&self) -> Money {
        self.allocations.iter().map(|allocation| allocation.cost).sum()
    }
}

/// Result of a matching pass, indexed by position in the matched slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LotLedger {
    entries: Vec<LotEntry>
}

impl LotLedger {
    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            entries: vec![LotEntry::default(); len]
        }
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> &mut LotEntry {
        &mut self.entries[index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&LotEntry> {
        self.entries.get(index)
    }

    pub fn shares_sold(&self, index: usize) -> Quantity {
        self.entry(index).map_or(Decimal::ZERO, |entry| entry.shares_sold)
    }

    pub fn gain_or_loss(&self, index: usize) -> Money {
        self.entry(index).map_or(Decimal::ZERO, |entry| entry.gain_or_loss)
    }

    pub fn allocations(&self, index: usize) -> &[LotAllocation] {
        self.entry(index)
            .map(|entry| entry.allocations.as_slice())
            .unwrap_or(&[])
    }

    /// Unsold shares of the purchase at `index`.
    pub fn open_shares(&self, transaction: &Transaction, index: usize) -> Quantity {
        transaction.shares - self.shares_sold(index)
    }

    /// Sum over all sales. `None` if it does not fit into a `Decimal`.
    pub fn total_gain_or_loss(&self) -> Option<Money> {
        self.entries.iter().try_fold(Decimal::ZERO, |total, entry| total.checked_add(entry.gain_or_loss))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &LotEntry)> {
        self.entries.iter().enumerate()
    }
}
