use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use std::str::FromStr;

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

fn run(input: &Path, args: &[&str]) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_realized-gains");

    Ok(Command::new(binary_path).arg(input).args(args).output()?)
}

fn create_temporary_export(rows: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "date;time;status;reference;description;assetType;type;isin;shares;price;amount;fee;tax;currency")?;

    for row in rows {
        writeln!(file, "{row}")?;
    }

    Ok(file)
}

fn decimal(value: &str) -> Result<Decimal> {
    Ok(Decimal::from_str(value)?)
}

#[test]
fn test_cli_reports_realized_gains_per_year() -> Result<()> {
    let output = run(&Path::new("samples").join("portfolio.csv"), &[])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("year,isin,title,gain_or_loss"));

    let rows: Vec<Vec<&str>> = lines.map(|line| line.split(',').collect()).collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][..3], &["2023", "US0000000001", "Acme Corp"]);
    assert_eq!(decimal(rows[0][3])?, decimal("82")?);
    assert_eq!(&rows[1][..3], &["2024", "DE0000000002", "Globex AG"]);
    assert_eq!(decimal(rows[1][3])?, decimal("-10")?);

    Ok(())
}

#[test]
fn test_cli_logs_rejected_rows_to_stderr() -> Result<()> {
    let output = run(&Path::new("samples").join("portfolio.csv"), &[])?;

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("Expecting only EUR but got USD"));

    Ok(())
}

#[test]
fn test_cli_lists_rejected_rows() -> Result<()> {
    let output = run(&Path::new("samples").join("portfolio.csv"), &["--view", "errors", "--log-level", "error"])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "error");
    assert!(lines[1].contains("Expecting only EUR but got USD"));
    assert!(lines[1].contains("X1"));

    Ok(())
}

#[test]
fn test_cli_accepts_another_base_currency() -> Result<()> {
    let output = run(&Path::new("samples").join("portfolio.csv"), &["--view", "errors", "--currency", "USD", "--log-level", "error"])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    // Every EUR row is rejected now, the single USD row is accepted.
    assert_eq!(stdout.lines().count(), 1 + 8);

    Ok(())
}

#[test]
fn test_cli_summarises_groups() -> Result<()> {
    let output = run(&Path::new("samples").join("portfolio.csv"), &["--view", "groups"])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("group,title,open_shares,amount,fee,tax,gain_or_loss"));

    let rows: Vec<Vec<&str>> = lines.map(|line| line.split(',').collect()).collect();
    let titles: Vec<&str> = rows.iter().map(|row| row[1]).collect();

    assert_eq!(titles, vec!["Deposit/Withdrawal", "Interest", "Acme Corp", "Globex"]);

    let acme = rows.iter().find(|row| row[0] == "US0000000001").ok_or_else(|| anyhow!("Acme group missing"))?;

    assert_eq!(decimal(acme[2])?, decimal("3")?);
    assert_eq!(decimal(acme[6])?, decimal("82")?);

    Ok(())
}

#[test]
fn test_cli_fails_when_sale_has_no_purchase() -> Result<()> {
    let output = run(&Path::new("samples").join("sample.csv"), &[])?;

    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("Not enough shares to sell for [SCALXiJuhi2MqSy]"));
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_cli_sample_has_no_rejected_rows() -> Result<()> {
    let output = run(&Path::new("samples").join("sample.csv"), &["--view", "errors"])?;

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "error\n");

    Ok(())
}

#[test]
fn test_cli_fails_on_structurally_broken_file() -> Result<()> {
    let file = create_temporary_export(&[
        "2024-01-02;10:00:00;Executed;B1;Acme;Security;Buy;US0000000001;1;10,00;-10,00;0,00;0,00;EUR",
        "2024-01-03;10:00:00;Executed;B2;Acme;Security;Buy"
    ])?;

    let output = run(file.path(), &["--view", "errors"])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("expected 14 columns but found 7"));

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_file() -> Result<()> {
    let output = run(Path::new("samples/does-not-exist.csv"), &[])?;

    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Error reading"));

    Ok(())
}

#[test]
fn test_cli_prints_only_header_without_sales() -> Result<()> {
    let file = create_temporary_export(&[
        "2024-01-02;10:00:00;Executed;D1;Deposit;Cash;Deposit;;;;100,00;0,00;;EUR"
    ])?;

    let output = run(file.path(), &[])?;

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "year,isin,title,gain_or_loss\n");

    Ok(())
}

#[test]
fn test_cli_splits_gains_into_crypto_and_securities() -> Result<()> {
    let file = create_temporary_export(&[
        "2024-01-02;10:00:00;Executed;B1;Acme;Security;Buy;US0000000001;1;10,00;-10,00;0,00;0,00;EUR",
        "2024-01-03;10:00:00;Executed;S1;Acme;Security;Sell;US0000000001;1;15,00;15,00;0,00;0,00;EUR",
        "2024-01-04;10:00:00;Executed;C1;Bitcoin;Security;Buy;GB00BLD4ZL17;1;20,00;-20,00;0,00;0,00;EUR",
        "2024-01-05;10:00:00;Executed;C2;Bitcoin;Security;Sell;GB00BLD4ZL17;1;18,00;18,00;0,00;0,00;EUR"
    ])?;

    let crypto = String::from_utf8(run(file.path(), &["--section", "crypto"])?.stdout)?;
    let securities = String::from_utf8(run(file.path(), &["--section", "securities"])?.stdout)?;
    let all = String::from_utf8(run(file.path(), &[])?.stdout)?;

    assert_eq!(crypto.lines().skip(1).collect::<Vec<_>>(), vec!["2024,GB00BLD4ZL17,Bitcoin,-2.00"]);
    assert_eq!(securities.lines().skip(1).collect::<Vec<_>>(), vec!["2024,US0000000001,Acme,5.00"]);
    assert_eq!(all.lines().count(), 3);

    Ok(())
}

#[test]
fn test_cli_sale_and_purchase_in_the_same_second() -> Result<()> {
    let file = create_temporary_export(&[
        "2024-01-01;10:00:00;Executed;S1;Acme;Security;Sell;US0000000001;1;10,00;10,00;0,00;0,00;EUR",
        "2024-01-01;10:00:00;Executed;B1;Acme;Security;Buy;US0000000001;1;8,00;-8,00;0,00;0,00;EUR"
    ])?;

    let output = run(file.path(), &[])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let row: Vec<&str> = stdout.lines().nth(1).ok_or_else(|| anyhow!("gain row missing"))?.split(',').collect();

    assert_eq!(decimal(row[3])?, decimal("2")?);

    Ok(())
}
