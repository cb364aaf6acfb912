// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::utils::pretty_table;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Expenses whose type reference no longer resolves
    let mut stmt = conn.prepare(
        "SELECT e.id FROM expenses e LEFT JOIN expense_types t ON e.expense_type_id=t.id
         WHERE t.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        rows.push(vec!["expense_missing_type".into(), format!("expense {}", id)]);
    }

    // 2) Incomes whose stored total disagrees with the recomputed one
    let mut stmt2 = conn.prepare(
        "SELECT order_number, product_subtotal, discount, shipping_cost, total FROM incomes",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let order: String = r.get(0)?;
        let subtotal: String = r.get(1)?;
        let discount: String = r.get(2)?;
        let shipping: String = r.get(3)?;
        let total: String = r.get(4)?;
        let expected = subtotal.parse::<Decimal>().unwrap_or(Decimal::ZERO)
            - discount.parse::<Decimal>().unwrap_or(Decimal::ZERO)
            + shipping.parse::<Decimal>().unwrap_or(Decimal::ZERO);
        let stored = total.parse::<Decimal>().unwrap_or(Decimal::ZERO);
        if stored != expected {
            rows.push(vec![
                "income_total_mismatch".into(),
                format!("order {} stored {} expected {}", order, stored, expected),
            ]);
        }
    }

    // 3) Suppliers with a blank tax id
    let mut stmt3 = conn.prepare("SELECT business_name FROM suppliers WHERE trim(tax_id)=''")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let name: String = r.get(0)?;
        rows.push(vec!["supplier_blank_tax_id".into(), name]);
    }

    // 4) Duplicate order numbers (order_id is unique by schema, order_number
    //    is only conventionally unique)
    let mut stmt4 = conn.prepare(
        "SELECT order_number, COUNT(*) FROM incomes GROUP BY order_number HAVING COUNT(*) > 1",
    )?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let order: String = r.get(0)?;
        let n: i64 = r.get(1)?;
        rows.push(vec![
            "duplicate_order_number".into(),
            format!("{} ({} rows)", order, n),
        ]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
