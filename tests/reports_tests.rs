// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caja::cli;
use caja::commands::reports::{query_items, summarize, ExpenseItem};
use caja::db;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn item(month: &str, category: &str, amount: i64) -> ExpenseItem {
    ExpenseItem {
        month: month.into(),
        category: category.into(),
        amount: Decimal::new(amount, 0),
    }
}

#[test]
fn empty_input_is_zero_not_an_error() {
    let s = summarize(&[]);
    assert_eq!(s.total, Decimal::ZERO);
    assert!(s.by_month.is_empty());
    assert!(s.by_category.is_empty());
}

#[test]
fn totals_are_exact_decimal_sums() {
    let s = summarize(&[
        item("2024-12", "Marketing", 100),
        item("2024-12", "Otros", 250),
    ]);
    assert_eq!(s.total, Decimal::new(350, 0));
}

#[test]
fn fractional_cents_do_not_drift() {
    // 0.1 + 0.2 must be exactly 0.3
    let s = summarize(&[
        item("2024-12", "A", 0),
        ExpenseItem {
            month: "2024-12".into(),
            category: "A".into(),
            amount: "0.1".parse().unwrap(),
        },
        ExpenseItem {
            month: "2024-12".into(),
            category: "A".into(),
            amount: "0.2".parse().unwrap(),
        },
    ]);
    assert_eq!(s.total, "0.3".parse::<Decimal>().unwrap());
}

#[test]
fn by_month_keeps_three_most_recent_first() {
    let s = summarize(&[
        item("2024-09", "A", 1),
        item("2024-10", "A", 2),
        item("2024-11", "A", 4),
        item("2024-12", "A", 8),
        item("2024-12", "B", 16),
    ]);
    assert_eq!(
        s.by_month,
        vec![
            ("2024-12".to_string(), Decimal::new(24, 0)),
            ("2024-11".to_string(), Decimal::new(4, 0)),
            ("2024-10".to_string(), Decimal::new(2, 0)),
        ]
    );
}

#[test]
fn by_category_orders_by_descending_sum() {
    let s = summarize(&[
        item("2024-12", "Marketing", 10),
        item("2024-12", "Salarios", 500),
        item("2024-11", "Marketing", 20),
        item("2024-12", "Otros", 100),
    ]);
    assert_eq!(
        s.by_category,
        vec![
            ("Salarios".to_string(), Decimal::new(500, 0)),
            ("Otros".to_string(), Decimal::new(100, 0)),
            ("Marketing".to_string(), Decimal::new(30, 0)),
        ]
    );
}

#[test]
fn query_items_applies_filters() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO expenses(date, expense_type_id, amount, observations)
        SELECT '2024-12-01', id, '100.00', 'facebook ads' FROM expense_types WHERE code='MKT';
        INSERT INTO expenses(date, expense_type_id, amount, observations)
        SELECT '2024-11-15', id, '40.00', 'correo' FROM expense_types WHERE code='SHI';
        "#,
    )
    .unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "caja", "report", "summary", "--from", "2024-12-01", "--type", "mkt",
    ]);
    let (_, report_m) = matches.subcommand().unwrap();
    let (_, sub) = report_m.subcommand().unwrap();

    let items = query_items(&conn, sub).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "Marketing");
    let s = summarize(&items);
    assert_eq!(s.total, Decimal::new(10000, 2));
}
