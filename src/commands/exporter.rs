// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        Some(("incomes", sub)) => export_incomes(conn, sub),
        _ => Ok(()),
    }
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT e.date, t.code, t.name, e.amount, e.is_fixed, e.observations
         FROM expenses e JOIN expense_types t ON e.expense_type_id=t.id
         ORDER BY e.date, e.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, bool>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type_code", "type_name", "amount", "fixed", "observations"])?;
            for row in rows {
                let (d, code, name, amount, fixed, obs) = row?;
                wtr.write_record([
                    d,
                    code,
                    name,
                    amount,
                    if fixed { "yes".into() } else { "no".into() },
                    obs,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, code, name, amount, fixed, obs) = row?;
                items.push(json!({
                    "date": d, "type_code": code, "type_name": name,
                    "amount": amount, "fixed": fixed, "observations": obs
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported expenses to {}", out);
    Ok(())
}

fn export_incomes(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT order_number, order_id, date, buyer_name, email, currency,
                product_subtotal, discount, shipping_cost, total,
                order_status, payment_status, shipping_status, product_name
         FROM incomes ORDER BY date, id",
    )?;
    let rows = stmt.query_map([], |r| {
        let mut v = Vec::with_capacity(14);
        for i in 0..14 {
            v.push(r.get::<_, Option<String>>(i)?.unwrap_or_default());
        }
        Ok(v)
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "order_number",
                "order_id",
                "date",
                "buyer_name",
                "email",
                "currency",
                "product_subtotal",
                "discount",
                "shipping_cost",
                "total",
                "order_status",
                "payment_status",
                "shipping_status",
                "product_name",
            ])?;
            for row in rows {
                wtr.write_record(row?)?;
            }
            wtr.flush()?;
        }
        "json" => {
            let keys = [
                "order_number",
                "order_id",
                "date",
                "buyer_name",
                "email",
                "currency",
                "product_subtotal",
                "discount",
                "shipping_cost",
                "total",
                "order_status",
                "payment_status",
                "shipping_status",
                "product_name",
            ];
            let mut items = Vec::new();
            for row in rows {
                let row = row?;
                let obj: serde_json::Map<String, serde_json::Value> = keys
                    .iter()
                    .zip(row)
                    .map(|(k, v)| (k.to_string(), json!(v)))
                    .collect();
                items.push(serde_json::Value::Object(obj));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported incomes to {}", out);
    Ok(())
}
