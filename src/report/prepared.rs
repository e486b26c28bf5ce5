use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::info;

use crate::matcher::{match_lots, remaining_open_shares_of, LotLedger, MatchError};
use crate::models::Transaction;
use crate::parser::TransactionFile;
use crate::report::{group_key, GroupKey, IsinFilter, TransactionGroup};
use crate::types::Money;

/// Realized result of one security within one calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyGain {
    pub isin: String,
    pub title: String,
    pub gain_or_loss: Money
}

/// Executed transactions of an import together with their lot ledger.
#[derive(Debug, Clone)]
pub struct Report {
    executed: Vec<Transaction>,
    ledger: LotLedger,
    titles: HashMap<String, String>
}

impl Report {
    /// Keeps the executed transactions, orders them by time and matches lots.
    ///
    /// # Errors
    /// Returns `MatchError` if any sale cannot be covered by purchases, or if
    /// its gain does not fit into a `Decimal`.
    pub fn prepare(file: &TransactionFile) -> Result<Self, MatchError> {
        let executed = file.executed();
        let ledger = match_lots(&executed)?;

        let mut titles = HashMap::new();
        for transaction in &executed {
            if !transaction.isin.is_empty() && !transaction.description.is_empty() {
                titles.insert(transaction.isin.clone(), transaction.description.clone());
            }
        }

        info!("Prepared report of {} executed transactions", executed.len());

        Ok(Self { executed, ledger, titles })
    }

    pub fn executed(&self) -> &[Transaction] {
        &self.executed
    }

    pub fn ledger(&self) -> &LotLedger {
        &self.ledger
    }

    /// Latest description seen for `isin`.
    pub fn title(&self, isin: &str) -> Option<&str> {
        self.titles.get(isin).map(String::as_str)
    }

    /// Cash groups first, then securities, each ordered by title.
    ///
    /// # Errors
    /// Returns `MatchError::Overflow` if a group total does not fit into a
    /// `Decimal`.
    pub fn groups(&self) -> Result<Vec<TransactionGroup>, MatchError> {
        let mut order: Vec<GroupKey> = Vec::new();
        let mut members: HashMap<GroupKey, Vec<usize>> = HashMap::new();

        for (index, transaction) in self.executed.iter().enumerate() {
            let key = group_key(transaction);
            if !members.contains_key(&key) {
                order.push(key.clone());
            }
            members.entry(key).or_default().push(index);
        }

        let mut groups = order.into_iter()
            .map(|key| {
                let indices = members.remove(&key).unwrap_or_default();
                self.group(key, indices)
            })
            .collect::<Result<Vec<_>, _>>()?;

        groups.sort_by(|a, b| {
            a.is_security().cmp(&b.is_security()).then_with(|| a.title.cmp(&b.title))
        });

        Ok(groups)
    }

    fn group(&self, key: GroupKey, indices: Vec<usize>) -> Result<TransactionGroup, MatchError> {
        let transactions: Vec<&Transaction> = indices.iter().map(|&index| &self.executed[index]).collect();

        let title = match &key {
            GroupKey::Security(isin) => transactions.first()
                .map(|first| first.description.clone())
                .filter(|description| !description.is_empty())
                .unwrap_or_else(|| isin.clone()),
            other => other.to_string()
        };

        Ok(TransactionGroup {
            title,
            open_shares: remaining_open_shares_of(transactions.iter().copied())?,
            amount: checked_total(transactions.iter().map(|&t| (t, t.amount)))?,
            fee: checked_total(transactions.iter().map(|&t| (t, t.fee)))?,
            tax: checked_total(transactions.iter().map(|&t| (t, t.tax)))?,
            gain_or_loss: checked_total(indices.iter().map(|&index| (&self.executed[index], self.ledger.gain_or_loss(index))))?,
            key,
            indices
        })
    }

    /// Realized gain or loss per calendar year and security, limited to the
    /// securities `filter` admits. Sales that realized exactly zero are left
    /// out.
    ///
    /// # Errors
    /// Returns `MatchError::Overflow` if a yearly total does not fit into a
    /// `Decimal`.
    pub fn realized_by_year(&self, filter: &IsinFilter) -> Result<BTreeMap<i32, Vec<YearlyGain>>, MatchError> {
        let mut totals: BTreeMap<i32, BTreeMap<&str, Money>> = BTreeMap::new();

        for (index, transaction) in self.executed.iter().enumerate() {
            let gain_or_loss = self.ledger.gain_or_loss(index);
            if gain_or_loss.is_zero() || !filter.matches(&transaction.isin) {
                continue;
            }

            let total = totals.entry(transaction.year())
                .or_default()
                .entry(transaction.isin.as_str())
                .or_insert(Decimal::ZERO);

            *total = total.checked_add(gain_or_loss)
                .ok_or_else(|| MatchError::overflow(transaction))?;
        }

        let years = totals.into_iter()
            .map(|(year, securities)| {
                let mut gains: Vec<YearlyGain> = securities.into_iter()
                    .map(|(isin, gain_or_loss)| YearlyGain {
                        title: self.title(isin).unwrap_or(isin).to_string(),
                        isin: isin.to_string(),
                        gain_or_loss
                    })
                    .collect();

                gains.sort_by(|a, b| a.title.cmp(&b.title));
                (year, gains)
            })
            .collect();

        Ok(years)
    }
}

/// Sums amounts, naming the transaction whose amount overflows the total.
fn checked_total<'a, I>(amounts: I) -> Result<Money, MatchError>
where
    I: IntoIterator<Item = (&'a Transaction, Money)>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, (transaction, amount)| {
        total.checked_add(amount).ok_or_else(|| MatchError::overflow(transaction))
    })
}
