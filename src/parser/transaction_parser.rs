use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::models::{AssetType, RowError, Transaction, TransactionStatus, TransactionType};
use crate::parser::{ParseError, ParserConfig, TransactionFile};
use crate::types::Money;

const REQUIRED_COLUMNS: [&str; 14] = [
    "date", "time", "status", "reference", "description", "assetType", "type",
    "isin", "shares", "price", "amount", "fee", "tax", "currency"
];

/// One data row, with fields looked up by header name and quotes stripped.
#[derive(Debug, Deserialize)]
struct TransactionRecord {
    date: String,
    time: String,
    status: String,
    reference: String,
    description: String,
    #[serde(rename = "assetType")]
    asset_type: String,
    #[serde(rename = "type")]
    transaction_type: String,
    isin: String,
    shares: String,
    price: String,
    amount: String,
    fee: String,
    tax: String,
    currency: String
}

/// Turns delimited export text into validated transactions.
///
/// Quoted fields only have one leading and one trailing `"` removed. There is
/// no escaping, so a delimiter inside quotes still splits the field.
#[derive(Debug, Clone, Default)]
pub struct TransactionParser {
    config: ParserConfig
}

impl TransactionParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a whole export.
    ///
    /// # Errors
    /// Returns `ParseError` if the header is missing or incomplete, or if any
    /// row has a different number of fields than the header. Rows that are
    /// well formed but semantically invalid do not fail the import; they are
    /// collected in `TransactionFile::errors`.
    pub fn parse(&self, input: &str) -> Result<TransactionFile, ParseError> {
        let lines: Vec<&str> = input.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(ParseError::MissingHeader);
        }

        let text = lines.join("\n");
        let mut reader = ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quoting(false)
            .flexible(true)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers = strip_quotes(reader.headers()?);

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(ParseError::MissingColumn { column });
            }
        }

        let mut file = TransactionFile::default();

        for (raw, result) in lines.iter().skip(1).zip(reader.records()) {
            let record = result?;

            if record.len() != headers.len() {
                return Err(ParseError::ColumnCount {
                    expected: headers.len(),
                    found: record.len(),
                    row: raw.to_string()
                });
            }

            let record: TransactionRecord = strip_quotes(&record).deserialize(Some(&headers))?;

            match self.build(record, raw) {
                Ok(transaction) => {
                    debug!("Accepted [{}]:[{}] at {}", transaction.reference, transaction.transaction_type, transaction.time);
                    file.transactions.push(transaction);
                }
                Err(error) => {
                    warn!("{error}");
                    file.errors.push(error);
                }
            }
        }

        // Stable, so equal timestamps keep their file order.
        file.transactions.sort_by_key(|transaction| transaction.time);

        info!("Parsed {} transactions, rejected {} rows", file.transactions.len(), file.errors.len());

        Ok(file)
    }

    /// Validates in a fixed order and reports only the first failure.
    fn build(&self, record: TransactionRecord, raw: &str) -> Result<Transaction, RowError> {
        let time = parse_time(&record.date, &record.time)
            .ok_or_else(|| RowError::invalid_date(&format!("{} {}", record.date, record.time), raw))?;

        if !(self.config.min_year..=self.config.max_year).contains(&time.year()) {
            return Err(RowError::invalid_year(time.year(), raw));
        }

        let status: TransactionStatus = record.status.parse()
            .map_err(|_| RowError::invalid_status(&record.status, raw))?;

        let asset_type: AssetType = record.asset_type.parse()
            .map_err(|_| RowError::invalid_asset_type(&record.asset_type, raw))?;

        let transaction_type: TransactionType = record.transaction_type.parse()
            .map_err(|_| RowError::invalid_type(&record.transaction_type, raw))?;

        let shares = self.number(&record.shares)
            .ok_or_else(|| RowError::invalid_shares(&record.shares, raw))?;

        let price = self.number(&record.price)
            .filter(|price| *price >= Decimal::ZERO)
            .ok_or_else(|| RowError::invalid_price(&record.price, raw))?;

        let amount = self.number(&record.amount)
            .ok_or_else(|| RowError::invalid_amount(&record.amount, raw))?;

        let fee = self.number(&record.fee)
            .filter(|fee| *fee >= Decimal::ZERO)
            .ok_or_else(|| RowError::invalid_fee(&record.fee, raw))?;

        let tax = self.number(&record.tax)
            .filter(|tax| *tax >= Decimal::ZERO)
            .ok_or_else(|| RowError::invalid_tax(&record.tax, raw))?;

        if record.currency != self.config.base_currency {
            return Err(RowError::unexpected_currency(&self.config.base_currency, &record.currency, raw));
        }

        if !shares.is_zero() {
            let expected = expected_amount(transaction_type, price, shares)
                .ok_or_else(|| RowError::invalid_amount(&record.amount, raw))?;

            if (expected - amount).abs() > self.config.amount_tolerance {
                return Err(RowError::amount_mismatch(&record.amount, expected, raw));
            }
        }

        Ok(Transaction {
            raw: raw.to_string(),
            time,
            status,
            reference: record.reference,
            description: record.description,
            asset_type,
            transaction_type,
            isin: record.isin,
            shares,
            price,
            amount,
            fee,
            tax,
            currency: record.currency
        })
    }

    fn number(&self, value: &str) -> Option<Decimal> {
        self.config.number_format.parse(value)
            .inspect_err(|error| debug!("{error}"))
            .ok()
    }
}

/// `price * shares`, negated for purchases. `None` on overflow.
fn expected_amount(transaction_type: TransactionType, price: Money, shares: Decimal) -> Option<Money> {
    let value = price.checked_mul(shares)?;

    Some(match transaction_type {
        TransactionType::Buy => -value,
        _ => value
    })
}

fn parse_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S").ok()?;

    Some(date.and_time(time))
}

fn strip_quotes(record: &StringRecord) -> StringRecord {
    record.iter()
        .map(|value| {
            if value.starts_with('"') && value.ends_with('"') {
                // A lone `"` is both opening and closing quote.
                value.get(1..value.len() - 1).unwrap_or("")
            } else {
                value
            }
        })
        .collect()
}
