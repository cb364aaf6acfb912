// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caja::cli;
use caja::commands::expenses;
use caja::db;
use rusqlite::Connection;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn add(conn: &Connection, date: &str, code: &str, amount: &str, obs: &str) {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "caja", "expense", "add", "--date", date, "--type", code, "--amount", amount, "--obs", obs,
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    expenses::handle(conn, sub).unwrap();
}

fn list_rows(conn: &Connection, args: &[&str]) -> Vec<expenses::ExpenseRow> {
    let mut full = vec!["caja", "expense", "list"];
    full.extend_from_slice(args);
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(full);
    let (_, exp_m) = matches.subcommand().unwrap();
    let (_, list_m) = exp_m.subcommand().unwrap();
    expenses::query_rows(conn, list_m).unwrap()
}

#[test]
fn add_resolves_type_code_case_insensitively() {
    let conn = base_conn();
    add(&conn, "2024-12-01", "mkt", "150.00", "facebook ads");

    let rows = list_rows(&conn, &[]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].type_code, "MKT");
    assert_eq!(rows[0].amount, "150.00");
}

#[test]
fn unknown_type_code_is_rejected() {
    let conn = base_conn();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "caja", "expense", "add", "--date", "2024-12-01", "--type", "ZZZ", "--amount", "1",
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    assert!(expenses::handle(&conn, sub).is_err());
}

#[test]
fn list_filters_compose() {
    let conn = base_conn();
    add(&conn, "2024-12-01", "MKT", "100.00", "facebook ads");
    add(&conn, "2024-12-15", "MKT", "200.00", "google ads");
    add(&conn, "2024-11-30", "MKT", "300.00", "flyers");
    add(&conn, "2024-12-02", "SAL", "400.00", "sueldo diciembre");

    assert_eq!(list_rows(&conn, &["--month", "2024-12"]).len(), 3);
    assert_eq!(
        list_rows(&conn, &["--month", "2024-12", "--type", "MKT"]).len(),
        2
    );
    assert_eq!(list_rows(&conn, &["--search", "ads"]).len(), 2);

    let limited = list_rows(&conn, &["--limit", "2"]);
    assert_eq!(limited.len(), 2);
    // most recent first
    assert_eq!(limited[0].date, "2024-12-15");
}

#[test]
fn rm_deletes_by_id() {
    let conn = base_conn();
    add(&conn, "2024-12-01", "OTH", "10.00", "");
    let rows = list_rows(&conn, &[]);
    let id = rows[0].id;

    let cli = cli::build_cli();
    let matches =
        cli.get_matches_from(["caja", "expense", "rm", "--id", &id.to_string()]);
    let (_, sub) = matches.subcommand().unwrap();
    expenses::handle(&conn, sub).unwrap();

    assert!(list_rows(&conn, &[]).is_empty());
}
