// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caja::cli;
use caja::commands::exporter;
use caja::db;
use rusqlite::Connection;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO expenses(date, expense_type_id, amount, observations)
        SELECT '2024-12-01', id, '150.00', 'facebook ads' FROM expense_types WHERE code='MKT';
        INSERT INTO incomes(order_number, email, date, product_subtotal, total, buyer_name, order_id)
        VALUES ('1001', 'ana@example.com', '2024-12-25', '1000.00', '1000.00', 'Ana', 'ORD-1');
        "#,
    )
    .unwrap();
    conn
}

fn run_export(conn: &Connection, entity: &str, format: &str, out: &str) {
    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["caja", "export", entity, "--format", format, "--out", out]);
    let (_, sub) = matches.subcommand().unwrap();
    exporter::handle(conn, sub).unwrap();
}

#[test]
fn expenses_export_csv_has_header_and_rows() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("expenses.csv");
    run_export(&conn, "expenses", "csv", out.to_str().unwrap());

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,type_code,type_name,amount,fixed,observations"
    );
    assert!(lines.next().unwrap().contains("MKT"));
}

#[test]
fn incomes_export_json_is_an_array_of_objects() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out = dir.path().join("incomes.json");
    run_export(&conn, "incomes", "json", out.to_str().unwrap());

    let content = std::fs::read_to_string(&out).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["order_id"], "ORD-1");
    assert_eq!(arr[0]["buyer_name"], "Ana");
}
