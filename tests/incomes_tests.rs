// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caja::commands::incomes::{insert_income, upsert_income};
use caja::db;
use caja::models::Income;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn sample(order_id: &str) -> Income {
    Income {
        order_number: "1001".into(),
        order_id: order_id.into(),
        email: "ana@example.com".into(),
        date: NaiveDate::from_ymd_opt(2024, 12, 25),
        order_status: "abierta".into(),
        payment_status: "pendiente".into(),
        shipping_status: "no_empaquetado".into(),
        currency: "ARS".into(),
        product_subtotal: Decimal::new(100000, 2), // 1000.00
        discount: Decimal::new(5000, 2),           // 50.00
        shipping_cost: Decimal::new(3000, 2),      // 30.00
        total: Decimal::new(999999, 2),            // deliberately wrong
        buyer_name: "Ana".into(),
        product_name: "Remera".into(),
        product_price: Decimal::new(100000, 2),
        product_quantity: 1,
        is_physical_product: true,
        ..Default::default()
    }
}

#[test]
fn stored_total_is_always_derived() {
    let conn = base_conn();
    insert_income(&conn, &sample("ORD-1")).unwrap();

    let total: String = conn
        .query_row(
            "SELECT total FROM incomes WHERE order_id='ORD-1'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(total, "980.00"); // 1000 - 50 + 30
}

#[test]
fn upsert_creates_then_overwrites() {
    let conn = base_conn();

    let created = upsert_income(&conn, &sample("ORD-1")).unwrap();
    assert!(created);

    let mut second = sample("ORD-1");
    second.buyer_name = "Ana María".into();
    second.product_subtotal = Decimal::new(200000, 2);
    second.payment_status = "pagado".into();
    let created = upsert_income(&conn, &second).unwrap();
    assert!(!created);

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM incomes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let (buyer, total, payment): (String, String, String) = conn
        .query_row(
            "SELECT buyer_name, total, payment_status FROM incomes WHERE order_id='ORD-1'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(buyer, "Ana María");
    assert_eq!(total, "1980.00"); // 2000 - 50 + 30
    assert_eq!(payment, "pagado");
}

#[test]
fn upserting_distinct_order_ids_keeps_both() {
    let conn = base_conn();
    upsert_income(&conn, &sample("ORD-1")).unwrap();
    upsert_income(&conn, &sample("ORD-2")).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM incomes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 2);
}
