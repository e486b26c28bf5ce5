mod errors;
mod lot_ledger;
mod lot_matcher;

pub use errors::MatchError;
pub use lot_ledger::{LotAllocation, LotEntry, LotLedger};
pub use lot_matcher::{match_lots, remaining_open_shares, remaining_open_shares_of};
