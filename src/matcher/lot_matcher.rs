use std::collections::{HashMap, VecDeque};

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::matcher::{LotAllocation, LotLedger, MatchError};
use crate::models::{Transaction, TransactionType};
use crate::types::Quantity;

/// Computes realized gain or loss for every sale using FIFO lot matching.
///
/// `transactions` must contain executed transactions only, ascending by time.
/// Both are checked, nothing is filtered or re-sorted. Every purchase of the
/// same ISIN with unsold shares is a candidate lot, oldest first, so a sale
/// listed before a purchase with the same timestamp is still covered. The
/// input is never modified, so matching the same slice twice yields the same
/// ledger rather than consuming lots twice.
///
/// # Errors
/// Returns `MatchError` if:
/// - A transaction is not executed.
/// - A transaction is earlier than the one before it.
/// - A sale is larger than the unsold shares purchased of its ISIN.
/// - A cost basis or gain does not fit into a `Decimal`.
pub fn match_lots(transactions: &[Transaction]) -> Result<LotLedger, MatchError> {
    let mut open_lots = collect_lots(transactions)?;
    let mut ledger = LotLedger::with_len(transactions.len());
    let mut sales = 0usize;

    for (index, transaction) in transactions.iter().enumerate() {
        match transaction.transaction_type {
            TransactionType::Sell => {
                let lots = open_lots.entry(transaction.isin.as_str()).or_default();
                sell(transactions, index, lots, &mut ledger)?;
                sales += 1;
            }
            TransactionType::Buy
            | TransactionType::Distribution
            | TransactionType::Interest
            | TransactionType::Taxes
            | TransactionType::Fee
            | TransactionType::Deposit
            | TransactionType::Withdrawal
            | TransactionType::CorporateAction => {}
        }
    }

    info!("Matched {sales} sales against {} transactions", transactions.len());

    Ok(ledger)
}

/// Checks the preconditions and queues every purchase per ISIN, oldest first.
fn collect_lots(transactions: &[Transaction]) -> Result<HashMap<&str, VecDeque<usize>>, MatchError> {
    let mut open_lots = HashMap::<&str, VecDeque<usize>>::new();
    let mut previous: Option<&Transaction> = None;

    for (index, transaction) in transactions.iter().enumerate() {
        if !transaction.is_executed() {
            return Err(MatchError::not_executed(transaction));
        }

        if previous.is_some_and(|previous| previous.time > transaction.time) {
            return Err(MatchError::out_of_order(transaction));
        }

        previous = Some(transaction);

        if transaction.is_buy() && transaction.shares > Decimal::ZERO {
            open_lots.entry(transaction.isin.as_str()).or_default().push_back(index);
        }
    }

    Ok(open_lots)
}

/// Allocates the sale at `sale_index` to the front of `lots`.
fn sell(transactions: &[Transaction], sale_index: usize, lots: &mut VecDeque<usize>, ledger: &mut LotLedger) -> Result<(), MatchError> {
    let sale = &transactions[sale_index];
    let mut needed = sale.shares;
    let mut cost_basis = Decimal::ZERO;
    let mut allocations = Vec::new();

    while needed > Decimal::ZERO {
        let Some(&lot_index) = lots.front() else {
            return Err(MatchError::insufficient_shares(sale, needed));
        };

        let lot = &transactions[lot_index];
        let entry = ledger.entry_mut(lot_index);
        let shares = (lot.shares - entry.shares_sold).min(needed);

        entry.shares_sold += shares;
        needed -= shares;

        if entry.shares_sold >= lot.shares {
            lots.pop_front();
        }

        let cost = shares.checked_mul(lot.price)
            .ok_or_else(|| MatchError::overflow(sale))?;
        cost_basis = cost_basis.checked_add(cost)
            .ok_or_else(|| MatchError::overflow(sale))?;

        debug!("Sale [{}] takes {shares} shares of [{}] at {} for {cost}", sale.reference, lot.reference, lot.price);
        allocations.push(LotAllocation { lot: lot_index, shares, cost });
    }

    // Purchase fees are not capitalised, only the sale side pays fee and tax.
    let gain_or_loss = sale.amount.checked_sub(cost_basis)
        .and_then(|gain| gain.checked_sub(sale.fee))
        .and_then(|gain| gain.checked_sub(sale.tax))
        .ok_or_else(|| MatchError::overflow(sale))?;

    let entry = ledger.entry_mut(sale_index);
    entry.gain_or_loss = gain_or_loss;
    entry.allocations = allocations;

    debug!("Sale [{}] realized {gain_or_loss}", sale.reference);

    Ok(())
}

/// Shares bought minus shares sold. Independent of any ledger.
///
/// # Errors
/// Returns `MatchError::Overflow` naming the transaction at which the count
/// leaves the range of a `Decimal`.
pub fn remaining_open_shares(transactions: &[Transaction]) -> Result<Quantity, MatchError> {
    remaining_open_shares_of(transactions)
}

/// Like `remaining_open_shares`, for any selection of transactions.
pub fn remaining_open_shares_of<'a, I>(transactions: I) -> Result<Quantity, MatchError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().try_fold(Decimal::ZERO, |open, transaction| {
        let open = match transaction.transaction_type {
            TransactionType::Buy => open.checked_add(transaction.shares),
            TransactionType::Sell => open.checked_sub(transaction.shares),
            _ => Some(open)
        };

        open.ok_or_else(|| MatchError::overflow(transaction))
    })
}
