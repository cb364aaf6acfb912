// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use rusqlite::{named_params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Income;
use crate::render;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub.get_one::<String>("order").unwrap())?,
        _ => {}
    }
    Ok(())
}

/// Insert a new income row. The stored total is recomputed from
/// subtotal/discount/shipping_cost; whatever `income.total` holds is
/// ignored.
pub fn insert_income(conn: &Connection, income: &Income) -> Result<()> {
    write_income(conn, income, false).map(|_| ())
}

/// Insert or overwrite the income row keyed by the store's immutable order
/// id. Returns true when a new row was created.
pub fn upsert_income(conn: &Connection, income: &Income) -> Result<bool> {
    write_income(conn, income, true)
}

fn write_income(conn: &Connection, income: &Income, upsert: bool) -> Result<bool> {
    let exists: Option<i64> = conn
        .query_row(
            "SELECT id FROM incomes WHERE order_id=?1",
            [&income.order_id],
            |r| r.get(0),
        )
        .optional()?;

    let total = income.computed_total();
    let mut sql = String::from(
        "INSERT INTO incomes(
            order_number, email, date, order_status, payment_status, shipping_status,
            currency, product_subtotal, discount, shipping_cost, total,
            buyer_name, tax_id, phone,
            shipping_name, shipping_phone, address, address_number, floor_apt,
            locality, city, postal_code, state_province, country,
            shipping_method, payment_method, discount_coupon,
            buyer_notes, seller_notes, payment_date, shipping_date,
            product_name, product_price, product_quantity, sku,
            channel, tracking_code, payment_transaction_id, order_id,
            is_physical_product, registered_by, sales_branch, seller
        ) VALUES (
            :order_number, :email, :date, :order_status, :payment_status, :shipping_status,
            :currency, :product_subtotal, :discount, :shipping_cost, :total,
            :buyer_name, :tax_id, :phone,
            :shipping_name, :shipping_phone, :address, :address_number, :floor_apt,
            :locality, :city, :postal_code, :state_province, :country,
            :shipping_method, :payment_method, :discount_coupon,
            :buyer_notes, :seller_notes, :payment_date, :shipping_date,
            :product_name, :product_price, :product_quantity, :sku,
            :channel, :tracking_code, :payment_transaction_id, :order_id,
            :is_physical_product, :registered_by, :sales_branch, :seller
        )",
    );
    if upsert {
        sql.push_str(
            " ON CONFLICT(order_id) DO UPDATE SET
                order_number=excluded.order_number, email=excluded.email, date=excluded.date,
                order_status=excluded.order_status, payment_status=excluded.payment_status,
                shipping_status=excluded.shipping_status, currency=excluded.currency,
                product_subtotal=excluded.product_subtotal, discount=excluded.discount,
                shipping_cost=excluded.shipping_cost, total=excluded.total,
                buyer_name=excluded.buyer_name, tax_id=excluded.tax_id, phone=excluded.phone,
                shipping_name=excluded.shipping_name, shipping_phone=excluded.shipping_phone,
                address=excluded.address, address_number=excluded.address_number,
                floor_apt=excluded.floor_apt, locality=excluded.locality, city=excluded.city,
                postal_code=excluded.postal_code, state_province=excluded.state_province,
                country=excluded.country, shipping_method=excluded.shipping_method,
                payment_method=excluded.payment_method, discount_coupon=excluded.discount_coupon,
                buyer_notes=excluded.buyer_notes, seller_notes=excluded.seller_notes,
                payment_date=excluded.payment_date, shipping_date=excluded.shipping_date,
                product_name=excluded.product_name, product_price=excluded.product_price,
                product_quantity=excluded.product_quantity, sku=excluded.sku,
                channel=excluded.channel, tracking_code=excluded.tracking_code,
                payment_transaction_id=excluded.payment_transaction_id,
                is_physical_product=excluded.is_physical_product,
                registered_by=excluded.registered_by, sales_branch=excluded.sales_branch,
                seller=excluded.seller, updated_at=datetime('now')",
        );
    }

    conn.execute(
        &sql,
        named_params! {
            ":order_number": income.order_number,
            ":email": income.email,
            ":date": income.date.map(|d| d.to_string()),
            ":order_status": income.order_status,
            ":payment_status": income.payment_status,
            ":shipping_status": income.shipping_status,
            ":currency": income.currency,
            ":product_subtotal": income.product_subtotal.to_string(),
            ":discount": income.discount.to_string(),
            ":shipping_cost": income.shipping_cost.to_string(),
            ":total": total.to_string(),
            ":buyer_name": income.buyer_name,
            ":tax_id": income.tax_id,
            ":phone": income.phone,
            ":shipping_name": income.shipping_name,
            ":shipping_phone": income.shipping_phone,
            ":address": income.address,
            ":address_number": income.address_number,
            ":floor_apt": income.floor_apt,
            ":locality": income.locality,
            ":city": income.city,
            ":postal_code": income.postal_code,
            ":state_province": income.state_province,
            ":country": income.country,
            ":shipping_method": income.shipping_method,
            ":payment_method": income.payment_method,
            ":discount_coupon": income.discount_coupon,
            ":buyer_notes": income.buyer_notes,
            ":seller_notes": income.seller_notes,
            ":payment_date": income.payment_date.map(|d| d.to_string()),
            ":shipping_date": income.shipping_date.map(|d| d.to_string()),
            ":product_name": income.product_name,
            ":product_price": income.product_price.to_string(),
            ":product_quantity": income.product_quantity,
            ":sku": income.sku,
            ":channel": income.channel,
            ":tracking_code": income.tracking_code,
            ":payment_transaction_id": income.payment_transaction_id,
            ":order_id": income.order_id,
            ":is_physical_product": income.is_physical_product,
            ":registered_by": income.registered_by,
            ":sales_branch": income.sales_branch,
            ":seller": income.seller,
        },
    )?;
    Ok(exists.is_none())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let subtotal = parse_decimal(sub.get_one::<String>("subtotal").unwrap())?;
    let discount = sub
        .get_one::<String>("discount")
        .map(|s| parse_decimal(s))
        .transpose()?
        .unwrap_or(Decimal::ZERO);
    let shipping_cost = sub
        .get_one::<String>("shipping-cost")
        .map(|s| parse_decimal(s))
        .transpose()?
        .unwrap_or(Decimal::ZERO);

    let income = Income {
        order_number: sub.get_one::<String>("order-number").unwrap().clone(),
        order_id: sub.get_one::<String>("order-id").unwrap().clone(),
        email: sub.get_one::<String>("email").cloned().unwrap_or_default(),
        date: Some(date),
        order_status: "abierta".into(),
        payment_status: "pendiente".into(),
        shipping_status: "no_empaquetado".into(),
        currency: sub
            .get_one::<String>("currency")
            .cloned()
            .unwrap_or_else(|| "ARS".into()),
        product_subtotal: subtotal,
        discount,
        shipping_cost,
        buyer_name: sub.get_one::<String>("buyer").unwrap().clone(),
        product_name: sub.get_one::<String>("product").cloned().unwrap_or_default(),
        product_price: subtotal,
        product_quantity: sub.get_one::<u32>("quantity").copied().unwrap_or(1),
        is_physical_product: true,
        seller: sub.get_one::<String>("seller").cloned(),
        seller_notes: sub.get_one::<String>("notes").cloned(),
        ..Default::default()
    };

    insert_income(conn, &income)?;
    println!(
        "Recorded order #{} for {} ({})",
        income.order_number,
        income.buyer_name,
        render::fmt_money(&income.computed_total())
    );
    Ok(())
}

#[derive(Serialize)]
pub struct IncomeRow {
    pub order_number: String,
    pub buyer_name: String,
    pub date: String,
    pub total: String,
    pub currency: String,
    pub order_status: String,
    pub payment_status: String,
    pub shipping_status: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<IncomeRow>> {
    let mut sql = String::from(
        "SELECT order_number, buyer_name, date, total, currency,
                order_status, payment_status, shipping_status
         FROM incomes WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        parse_month(month)?;
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(s) = sub.get_one::<String>("status") {
        sql.push_str(" AND order_status=?");
        params_vec.push(s.into());
    }
    if let Some(s) = sub.get_one::<String>("payment-status") {
        sql.push_str(" AND payment_status=?");
        params_vec.push(s.into());
    }
    if let Some(s) = sub.get_one::<String>("shipping-status") {
        sql.push_str(" AND shipping_status=?");
        params_vec.push(s.into());
    }
    if let Some(q) = sub.get_one::<String>("search") {
        sql.push_str(
            " AND (order_number LIKE '%' || ? || '%'
               OR buyer_name LIKE '%' || ? || '%'
               OR email LIKE '%' || ? || '%')",
        );
        params_vec.push(q.into());
        params_vec.push(q.into());
        params_vec.push(q.into());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(IncomeRow {
            order_number: r.get(0)?,
            buyer_name: r.get(1)?,
            date: r.get(2)?,
            total: r.get(3)?,
            currency: r.get(4)?,
            order_status: r.get(5)?,
            payment_status: r.get(6)?,
            shipping_status: r.get(7)?,
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }

    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(["Order", "Buyer", "Date", "Total", "Status", "Payment", "Shipping"]);
    for r in &data {
        let total = parse_decimal(&r.total)?;
        t.add_row(vec![
            Cell::new(&r.order_number),
            Cell::new(&r.buyer_name),
            Cell::new(&r.date),
            Cell::new(format!("{} {}", render::fmt_money(&total), r.currency)).fg(Color::Green),
            Cell::new(&r.order_status),
            Cell::new(&r.payment_status),
            Cell::new(&r.shipping_status),
        ]);
    }
    println!("{}", t);
    Ok(())
}

fn show(conn: &Connection, order: &str) -> Result<()> {
    let mut stmt = conn.prepare("SELECT * FROM incomes WHERE order_number=?1 OR order_id=?1")?;
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    let row: Vec<String> = stmt
        .query_row([order], |r| {
            (0..names.len())
                .map(|i| {
                    r.get_ref(i).map(|v| match v {
                        rusqlite::types::ValueRef::Null => String::new(),
                        rusqlite::types::ValueRef::Integer(i) => i.to_string(),
                        rusqlite::types::ValueRef::Real(f) => f.to_string(),
                        rusqlite::types::ValueRef::Text(t) => {
                            String::from_utf8_lossy(t).into_owned()
                        }
                        rusqlite::types::ValueRef::Blob(_) => "<blob>".into(),
                    })
                })
                .collect()
        })
        .optional()?
        .with_context(|| format!("No income with order number or order id '{}'", order))?;

    let data = names
        .into_iter()
        .zip(row)
        .map(|(k, v)| vec![k, v])
        .collect();
    println!("{}", pretty_table(&["Field", "Value"], data));
    Ok(())
}
