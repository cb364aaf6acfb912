// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caja::cli;
use caja::commands::suppliers;
use caja::db;
use rusqlite::Connection;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(args);
    let (_, sub) = matches.subcommand().unwrap();
    suppliers::handle(conn, sub)
}

#[test]
fn names_are_uppercased_on_save() {
    let conn = base_conn();
    run(
        &conn,
        &[
            "caja", "supplier", "add",
            "--business-name", "Textil del Sur srl",
            "--commercial-name", "telas sur",
            "--tax-id", "30-12345678-9",
            "--city", "Rosario",
            "--country", "Argentina",
        ],
    )
    .unwrap();

    let (business, commercial): (String, String) = conn
        .query_row(
            "SELECT business_name, commercial_name FROM suppliers WHERE tax_id='30-12345678-9'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(business, "TEXTIL DEL SUR SRL");
    assert_eq!(commercial, "TELAS SUR");
}

#[test]
fn tax_id_is_unique() {
    let conn = base_conn();
    run(
        &conn,
        &["caja", "supplier", "add", "--business-name", "A", "--tax-id", "30-1-1"],
    )
    .unwrap();
    let err = run(
        &conn,
        &["caja", "supplier", "add", "--business-name", "B", "--tax-id", "30-1-1"],
    );
    assert!(err.is_err());
}

#[test]
fn activation_flag_round_trips() {
    let conn = base_conn();
    run(
        &conn,
        &["caja", "supplier", "add", "--business-name", "A", "--tax-id", "30-1-1"],
    )
    .unwrap();

    run(&conn, &["caja", "supplier", "deactivate", "--tax-id", "30-1-1"]).unwrap();
    let active: bool = conn
        .query_row(
            "SELECT is_active FROM suppliers WHERE tax_id='30-1-1'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(!active);

    run(&conn, &["caja", "supplier", "activate", "--tax-id", "30-1-1"]).unwrap();
    let active: bool = conn
        .query_row(
            "SELECT is_active FROM suppliers WHERE tax_id='30-1-1'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(active);
}

#[test]
fn list_filters_by_active_and_search() {
    let conn = base_conn();
    run(
        &conn,
        &[
            "caja", "supplier", "add",
            "--business-name", "Textil del Sur",
            "--tax-id", "30-1-1",
            "--contact", "Carla Gómez",
        ],
    )
    .unwrap();
    run(
        &conn,
        &["caja", "supplier", "add", "--business-name", "Imprenta Norte", "--tax-id", "30-2-2"],
    )
    .unwrap();
    run(&conn, &["caja", "supplier", "deactivate", "--tax-id", "30-2-2"]).unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["caja", "supplier", "list", "--active"]);
    let (_, sup_m) = matches.subcommand().unwrap();
    let (_, list_m) = sup_m.subcommand().unwrap();
    let rows = suppliers::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].business_name, "TEXTIL DEL SUR");

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["caja", "supplier", "list", "--search", "Gómez"]);
    let (_, sup_m) = matches.subcommand().unwrap();
    let (_, list_m) = sup_m.subcommand().unwrap();
    let rows = suppliers::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tax_id, "30-1-1");
}
