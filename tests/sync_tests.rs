// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use caja::api::{parse_vendor_datetime, OrderDetail};
use caja::commands::incomes::upsert_income;
use caja::commands::sync::income_from_order;
use caja::db;
use caja::models::{OrderStatus, PaymentStatus, ShippingStatus};
use rusqlite::Connection;

fn order_json(status: &str, payment: &str, shipping: &str) -> String {
    format!(
        r#"{{
            "id": 987654,
            "number": 1001,
            "status": "{}",
            "payment_status": "{}",
            "shipping_status": "{}",
            "currency": "ARS",
            "subtotal": "1000.00",
            "discount": "50.00",
            "shipping_cost": "30.00",
            "total": "123.45",
            "customer": {{
                "name": "Ana",
                "lastname": "Muñoz",
                "email": "ana@example.com",
                "identification": "30123456",
                "phone": "+54 11 5555-5555"
            }},
            "shipping_address": {{
                "name": "Ana Muñoz",
                "address": "Av. Siempre Viva",
                "number": "742",
                "floor": "2",
                "apartment": "B",
                "city": "Buenos Aires",
                "zipcode": "C1414",
                "province": "CABA",
                "country": "Argentina"
            }},
            "shipping_option_name": "Correo Argentino",
            "payment_details": {{"method": "credit_card", "transaction_id": "tx-1"}},
            "products": [
                {{"name": "Remera", "price": "800.00", "quantity": 2, "sku": "REM-01"}},
                {{"name": "Gorra", "price": "200.00", "quantity": 1}}
            ],
            "created_at": "2024-12-20T14:30:00+0000",
            "paid_at": "2024-12-21T10:00:00Z",
            "source": "store",
            "tracking_number": "TRK-9"
        }}"#,
        status, payment, shipping
    )
}

#[test]
fn vendor_statuses_map_onto_local_enums() {
    assert_eq!(OrderStatus::from_vendor("closed"), OrderStatus::Closed);
    assert_eq!(OrderStatus::from_vendor("cancelled"), OrderStatus::Cancelled);
    assert_eq!(PaymentStatus::from_vendor("paid"), PaymentStatus::Paid);
    assert_eq!(
        ShippingStatus::from_vendor("fulfilled"),
        ShippingStatus::Shipped
    );
    assert_eq!(
        ShippingStatus::from_vendor("delivered"),
        ShippingStatus::Delivered
    );
}

#[test]
fn unmapped_vendor_states_fall_back_to_defaults() {
    assert_eq!(OrderStatus::from_vendor("weird"), OrderStatus::Open);
    assert_eq!(PaymentStatus::from_vendor("weird"), PaymentStatus::Pending);
    assert_eq!(
        ShippingStatus::from_vendor("weird"),
        ShippingStatus::NotPackaged
    );
}

#[test]
fn order_detail_maps_onto_income_fields() {
    let detail: OrderDetail =
        serde_json::from_str(&order_json("closed", "paid", "fulfilled")).unwrap();
    let income = income_from_order(&detail);

    assert_eq!(income.order_id, "987654");
    assert_eq!(income.order_number, "1001");
    assert_eq!(income.buyer_name, "Ana Muñoz");
    assert_eq!(income.order_status, "cerrada");
    assert_eq!(income.payment_status, "pagado");
    assert_eq!(income.shipping_status, "enviado");
    assert_eq!(income.product_name, "Remera, Gorra");
    assert_eq!(income.product_quantity, 3);
    assert_eq!(income.sku.as_deref(), Some("REM-01"));
    assert_eq!(income.floor_apt.as_deref(), Some("2 B"));
    assert_eq!(
        income.date,
        chrono::NaiveDate::from_ymd_opt(2024, 12, 20)
    );
    assert_eq!(
        income.payment_date,
        chrono::NaiveDate::from_ymd_opt(2024, 12, 21)
    );
    // derived, not the vendor's 123.45
    assert_eq!(income.computed_total().to_string(), "980.00");
}

#[test]
fn synced_orders_upsert_by_order_id() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();

    let first: OrderDetail =
        serde_json::from_str(&order_json("open", "pending", "unpacked")).unwrap();
    assert!(upsert_income(&conn, &income_from_order(&first)).unwrap());

    let second: OrderDetail =
        serde_json::from_str(&order_json("closed", "paid", "delivered")).unwrap();
    assert!(!upsert_income(&conn, &income_from_order(&second)).unwrap());

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM incomes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
    let (status, shipping): (String, String) = conn
        .query_row(
            "SELECT order_status, shipping_status FROM incomes WHERE order_id='987654'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(status, "cerrada");
    assert_eq!(shipping, "entregado");
}

#[test]
fn vendor_timestamps_tolerate_both_offset_styles() {
    assert_eq!(
        parse_vendor_datetime(Some("2024-12-20T14:30:00+0000")),
        chrono::NaiveDate::from_ymd_opt(2024, 12, 20)
    );
    assert_eq!(
        parse_vendor_datetime(Some("2024-12-21T10:00:00Z")),
        chrono::NaiveDate::from_ymd_opt(2024, 12, 21)
    );
    assert_eq!(parse_vendor_datetime(Some("")), None);
    assert_eq!(parse_vendor_datetime(Some("not a date")), None);
    assert_eq!(parse_vendor_datetime(None), None);
}
