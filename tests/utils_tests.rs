// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caja::utils::{clean_decimal, parse_date_flexible, parse_yes_no};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn clean_decimal_handles_currency_symbols_and_separators() {
    assert_eq!(clean_decimal(Some("$1.234,56")), dec("1234.56"));
    assert_eq!(clean_decimal(Some("1234.56")), dec("1234.56"));
    assert_eq!(clean_decimal(Some("$ 1 234,56")), dec("1234.56"));
    assert_eq!(clean_decimal(Some("1,234.56")), dec("1234.56"));
    assert_eq!(clean_decimal(Some("1234,56")), dec("1234.56"));
    assert_eq!(clean_decimal(Some("1.234")), dec("1.234"));
}

#[test]
fn clean_decimal_defaults_to_zero() {
    assert_eq!(clean_decimal(None), Decimal::ZERO);
    assert_eq!(clean_decimal(Some("")), Decimal::ZERO);
    assert_eq!(clean_decimal(Some("$")), Decimal::ZERO);
    assert_eq!(clean_decimal(Some("garbage")), Decimal::ZERO);
}

#[test]
fn flexible_dates_accept_both_formats() {
    assert_eq!(
        parse_date_flexible(Some("25/12/2024")),
        NaiveDate::from_ymd_opt(2024, 12, 25)
    );
    assert_eq!(
        parse_date_flexible(Some("2024-12-25")),
        NaiveDate::from_ymd_opt(2024, 12, 25)
    );
}

#[test]
fn flexible_dates_never_error() {
    assert_eq!(parse_date_flexible(None), None);
    assert_eq!(parse_date_flexible(Some("")), None);
    assert_eq!(parse_date_flexible(Some("garbage")), None);
    assert_eq!(parse_date_flexible(Some("31/02/2024")), None);
    assert_eq!(parse_date_flexible(Some("12/25/2024")), None);
}

#[test]
fn yes_no_parsing_defaults_to_true() {
    assert!(!parse_yes_no(Some("no")));
    assert!(!parse_yes_no(Some("N")));
    assert!(!parse_yes_no(Some("FALSE")));
    assert!(!parse_yes_no(Some("0")));
    assert!(parse_yes_no(Some("sí")));
    assert!(parse_yes_no(Some("yes")));
    assert!(parse_yes_no(Some("")));
    assert!(parse_yes_no(None));
}
