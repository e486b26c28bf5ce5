use std::fs;
use std::io::{stderr, stdout, StdoutLock};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use realized_gains::{IsinFilter, ParserConfig, Report, TransactionFile, TransactionParser};

/// Computes realized gains per sale from a broker transaction export using FIFO lot matching.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Semicolon delimited transaction export.
    input: PathBuf,
    /// The only currency rows may be denominated in.
    #[arg(long, default_value = "EUR")]
    currency: String,
    /// What to write to stdout.
    #[arg(long, value_enum, default_value_t = View::Gains)]
    view: View,
    /// Which securities the gains view covers.
    #[arg(long, value_enum, default_value_t = Section::All)]
    section: Section,
    /// error, warn, info, debug or trace.
    #[arg(long, default_value = "warn")]
    log_level: String
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum View {
    /// Realized gain or loss per year and security.
    Gains,
    /// Totals per security or cash transaction kind.
    Groups,
    /// Rows rejected during parsing.
    Errors
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Section {
    /// Every security.
    All,
    /// Everything except crypto exchange traded products.
    Securities,
    /// Crypto exchange traded products only.
    Crypto
}

impl Section {
    fn filter(self) -> IsinFilter {
        match self {
            Section::All => IsinFilter::all(),
            Section::Securities => IsinFilter::without_crypto(),
            Section::Crypto => IsinFilter::crypto()
        }
    }
}

#[derive(Debug, Serialize)]
struct GainRow<'a> {
    year: i32,
    isin: &'a str,
    title: &'a str,
    gain_or_loss: Decimal
}

#[derive(Debug, Serialize)]
struct GroupRow<'a> {
    group: String,
    title: &'a str,
    open_shares: Decimal,
    amount: Decimal,
    fee: Decimal,
    tax: Decimal,
    gain_or_loss: Decimal
}

#[derive(Debug, Serialize)]
struct ErrorRow {
    error: String
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("Error reading {}", cli.input.display()))?;

    let parser = TransactionParser::new(ParserConfig::default().with_base_currency(&cli.currency));
    let file = parser.parse(&text)
        .with_context(|| format!("Error parsing {}", cli.input.display()))?;

    info!("Imported {} transactions with {} rejected rows", file.transactions.len(), file.errors.len());

    match cli.view {
        View::Errors => write_errors(&file),
        View::Gains => write_gains(&prepare(&file)?, &cli.section.filter()),
        View::Groups => write_groups(&prepare(&file)?)
    }
}

fn prepare(file: &TransactionFile) -> Result<Report> {
    if !file.errors.is_empty() {
        warn!("{} rows were rejected and are not part of the report", file.errors.len());
    }

    Report::prepare(file).context("Realized gains cannot be computed")
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the CSV output, logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn csv_writer(headers: &[&str]) -> Result<csv::Writer<StdoutLock<'static>>> {
    //NOTE: headers are written up front so an empty report still has them
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(stdout().lock());

    writer.write_record(headers)?;

    Ok(writer)
}

fn write_gains(report: &Report, filter: &IsinFilter) -> Result<()> {
    let years = report.realized_by_year(filter).context("Realized gains cannot be totalled")?;
    let mut writer = csv_writer(&["year", "isin", "title", "gain_or_loss"])?;

    for (year, gains) in years {
        for gain in &gains {
            writer.serialize(GainRow {
                year,
                isin: &gain.isin,
                title: &gain.title,
                gain_or_loss: gain.gain_or_loss
            })?;
        }
    }

    writer.flush()?;

    Ok(())
}

fn write_groups(report: &Report) -> Result<()> {
    let groups = report.groups().context("Group totals cannot be computed")?;
    let mut writer = csv_writer(&["group", "title", "open_shares", "amount", "fee", "tax", "gain_or_loss"])?;

    for group in groups {
        writer.serialize(GroupRow {
            group: group.key.to_string(),
            title: &group.title,
            open_shares: group.open_shares,
            amount: group.amount,
            fee: group.fee,
            tax: group.tax,
            gain_or_loss: group.gain_or_loss
        })?;
    }

    writer.flush()?;

    Ok(())
}

fn write_errors(file: &TransactionFile) -> Result<()> {
    let mut writer = csv_writer(&["error"])?;

    for error in file.error_messages() {
        writer.serialize(ErrorRow { error })?;
    }

    writer.flush()?;

    Ok(())
}
