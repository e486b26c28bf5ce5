use super::{NumberError, NumberFormat};
use anyhow::Result;
use rust_decimal_macros::dec;

#[test]
fn test_decimal_comma_parses_broker_values() -> Result<()> {
    let format = NumberFormat::DECIMAL_COMMA;

    let test_cases = vec![
        ("-7.104,00", dec!(-7104)),
        ("220,87", dec!(220.87)),
        ("0,00", dec!(0)),
        ("0", dec!(0)),
        ("1", dec!(1)),
        ("2.690,452", dec!(2690.452)),
        ("1.234.567,8", dec!(1234567.8)),
        ("  43,80 ", dec!(43.80)),
        ("+5", dec!(5)),
    ];

    for (input, expected) in test_cases {
        assert_eq!(format.parse(input)?, expected, "input {input:?}");
    }

    Ok(())
}

#[test]
fn test_empty_field_is_exactly_zero() -> Result<()> {
    assert_eq!(NumberFormat::DECIMAL_COMMA.parse("")?, dec!(0));
    assert_eq!(NumberFormat::DECIMAL_COMMA.parse("   ")?, dec!(0));
    assert_eq!(NumberFormat::DECIMAL_POINT.parse("")?, dec!(0));

    Ok(())
}

#[test]
fn test_decimal_point_format_reads_plain_literals() -> Result<()> {
    let format = NumberFormat::DECIMAL_POINT;

    assert_eq!(format.parse("2690.452")?, dec!(2690.452));
    assert_eq!(format.parse("-0.01")?, dec!(-0.01));
    assert!(format.parse("2,5").is_err());

    Ok(())
}

#[test]
fn test_malformed_values_are_rejected() {
    let format = NumberFormat::default();

    assert!(matches!(format.parse("abc"), Err(NumberError::InvalidFormat(_))));
    assert!(matches!(format.parse("1,2,3"), Err(NumberError::InvalidFormat(_))));
    assert!(matches!(format.parse("12abc"), Err(NumberError::InvalidFormat(_))));
    assert!(matches!(format.parse("-"), Err(NumberError::InvalidFormat(_))));
    assert!(matches!(format.parse("1_000"), Err(NumberError::InvalidFormat(_))));
}
