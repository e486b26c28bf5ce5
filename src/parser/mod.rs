mod config;
mod errors;
mod transaction_parser;

use crate::models::{RowError, Transaction};

pub use config::ParserConfig;
pub use errors::ParseError;
pub use transaction_parser::TransactionParser;

/// The result of importing one export: the accepted rows, ordered by time,
/// and the rejected ones in the order they were encountered.
#[derive(Debug, Clone, Default)]
pub struct TransactionFile {
    pub transactions: Vec<Transaction>,
    pub errors: Vec<RowError>
}

impl TransactionFile {
    /// Human readable rejection messages, in source order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Executed transactions only, ascending by time.
    pub fn executed(&self) -> Vec<Transaction> {
        let mut executed: Vec<Transaction> = self.transactions.iter()
            .filter(|transaction| transaction.is_executed())
            .cloned()
            .collect();

        executed.sort_by_key(|transaction| transaction.time);
        executed
    }
}

/// Parses an export with the default configuration.
pub fn parse(input: &str) -> Result<TransactionFile, ParseError> {
    TransactionParser::default().parse(input)
}
