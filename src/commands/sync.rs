// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Store API import. Pages through the order listing until a short page,
//! pulls each order's detail, maps the vendor vocabularies onto the local
//! status enums and upserts by the vendor's order id. A failed order is
//! logged and skipped; a failed page fetch ends the run but keeps what was
//! already written.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::api::{OrderDetail, StoreApi, PAGE_SIZE};
use crate::commands::incomes::upsert_income;
use crate::models::{Income, OrderStatus, PaymentStatus, ShippingStatus};
use crate::utils::{get_store_config, parse_date, pretty_table};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("orders", sub)) => orders(conn, sub),
        Some(("products", sub)) => products(conn, sub),
        _ => Ok(()),
    }
}

fn orders(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let days = sub.get_one::<i64>("days").copied().unwrap_or(30);
    let status = sub.get_one::<String>("status").map(|s| s.as_str());
    let api = StoreApi::new(&get_store_config(conn)?)?;

    let since = Utc::now().date_naive() - chrono::Duration::days(days);
    let (created, updated, errors) = import_orders(conn, &api, since, status)?;
    println!(
        "Sync finished: {} created, {} updated, {} errors",
        created, updated, errors
    );
    Ok(())
}

pub fn import_orders(
    conn: &Connection,
    api: &StoreApi,
    since: chrono::NaiveDate,
    status: Option<&str>,
) -> Result<(usize, usize, usize)> {
    let mut created = 0usize;
    let mut updated = 0usize;
    let mut errors = 0usize;

    let mut page = 1u32;
    loop {
        let orders = match api.get_orders(Some(since), status, page, PAGE_SIZE) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Page {}: {:#}", page, anyhow::Error::from(e));
                errors += 1;
                break;
            }
        };
        if orders.is_empty() {
            break;
        }

        for order in &orders {
            let outcome = api
                .get_order_details(order.id)
                .map_err(anyhow::Error::from)
                .and_then(|detail| {
                    let income = income_from_order(&detail);
                    upsert_income(conn, &income)
                });
            match outcome {
                Ok(true) => created += 1,
                Ok(false) => updated += 1,
                Err(e) => {
                    errors += 1;
                    eprintln!("Order {}: {:#}", order.id, e);
                }
            }
        }

        if orders.len() < PAGE_SIZE as usize {
            break;
        }
        page += 1;
    }
    Ok((created, updated, errors))
}

/// Map a vendor order detail onto a local income record. Unknown vendor
/// states land on the default Open/Pending/NotPackaged variants.
pub fn income_from_order(detail: &OrderDetail) -> Income {
    let order_status = OrderStatus::from_vendor(&detail.status);
    let payment_status = PaymentStatus::from_vendor(&detail.payment_status);
    let shipping_status = ShippingStatus::from_vendor(&detail.shipping_status);

    let buyer_name = format!("{} {}", detail.customer.name, detail.customer.lastname)
        .trim()
        .to_string();
    let floor_apt = format!(
        "{} {}",
        detail.shipping_address.floor.as_deref().unwrap_or(""),
        detail.shipping_address.apartment.as_deref().unwrap_or("")
    )
    .trim()
    .to_string();
    let product_name = detail
        .products
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let product_price = detail
        .products
        .first()
        .map(|p| p.price)
        .unwrap_or(Decimal::ZERO);
    let product_quantity = detail.products.iter().map(|p| p.quantity).sum();
    let sku = detail.products.first().and_then(|p| p.sku.clone());

    Income {
        order_number: detail.number.to_string(),
        email: detail.customer.email.clone(),
        date: crate::api::parse_vendor_datetime(detail.created_at.as_deref()),
        order_status: order_status.as_str().to_string(),
        payment_status: payment_status.as_str().to_string(),
        shipping_status: shipping_status.as_str().to_string(),
        currency: detail.currency.clone(),
        product_subtotal: detail.subtotal,
        discount: detail.discount,
        shipping_cost: detail.shipping_cost,
        total: detail.total,
        buyer_name,
        tax_id: detail.customer.identification.clone(),
        phone: detail.customer.phone.clone(),
        shipping_name: detail.shipping_address.name.clone(),
        shipping_phone: detail.shipping_address.phone.clone(),
        address: detail.shipping_address.address.clone(),
        address_number: detail.shipping_address.number.clone(),
        floor_apt: if floor_apt.is_empty() {
            None
        } else {
            Some(floor_apt)
        },
        locality: detail.shipping_address.locality.clone(),
        city: detail.shipping_address.city.clone(),
        postal_code: detail.shipping_address.zipcode.clone(),
        state_province: detail.shipping_address.province.clone(),
        country: detail.shipping_address.country.clone(),
        shipping_method: detail.shipping_option_name.clone(),
        payment_method: detail.payment_details.method.clone(),
        discount_coupon: None,
        buyer_notes: None,
        seller_notes: None,
        payment_date: crate::api::parse_vendor_datetime(detail.paid_at.as_deref()),
        shipping_date: crate::api::parse_vendor_datetime(detail.shipped_at.as_deref()),
        product_name,
        product_price,
        product_quantity,
        sku,
        channel: detail.source.clone(),
        tracking_code: detail.tracking_number.clone(),
        payment_transaction_id: detail.payment_details.transaction_id.clone(),
        order_id: detail.id.to_string(),
        // Physical by default; the store has no digital goods flag.
        is_physical_product: true,
        registered_by: None,
        sales_branch: None,
        seller: None,
    }
}

fn products(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let page = sub.get_one::<u32>("page").copied().unwrap_or(1);
    let per_page = sub.get_one::<u32>("per-page").copied().unwrap_or(PAGE_SIZE);
    let updated_since = sub
        .get_one::<String>("updated-since")
        .map(|s| parse_date(s))
        .transpose()?;
    let api = StoreApi::new(&get_store_config(conn)?)?;

    let items = api.get_products(page, per_page, updated_since)?;
    let rows = items
        .iter()
        .map(|p| {
            vec![
                p.get("id")
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                product_text(p, "name"),
                product_text(p, "price"),
                product_text(p, "stock"),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Id", "Name", "Price", "Stock"], rows));
    println!("{} products on page {}", items.len(), page);
    Ok(())
}

/// Product fields vary per store: plain strings, numbers, or a map of
/// language -> string. Render whatever is there.
fn product_text(p: &serde_json::Value, key: &str) -> String {
    match p.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Object(m)) => m
            .values()
            .find_map(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        Some(v) if !v.is_null() => v.to_string(),
        _ => String::new(),
    }
}
