// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::render;
use crate::utils::{
    get_alert_threshold, id_for_expense_type, maybe_print_json, parse_date, parse_decimal,
    parse_month,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id: i64 = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
            if n == 0 {
                println!("No expense with id {}", id);
            } else {
                println!("Removed expense {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let code = sub.get_one::<String>("type").unwrap().to_uppercase();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let obs = sub
        .get_one::<String>("obs")
        .map(|s| s.as_str())
        .unwrap_or("");
    let is_fixed = sub.get_flag("fixed");

    let type_id = id_for_expense_type(conn, &code)?;
    conn.execute(
        "INSERT INTO expenses(date, expense_type_id, amount, observations, is_fixed)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![date.to_string(), type_id, amount.to_string(), obs, is_fixed],
    )?;
    println!("Recorded {} {} on {}", code, render::fmt_money(&amount), date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }

    let threshold = get_alert_threshold(conn)?;
    let mut total = Decimal::ZERO;
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(["Date", "Type", "Amount", "Fixed", "Observations"]);
    for r in &data {
        let amount = parse_decimal(&r.amount)?;
        total += amount;
        let (bg, fg) = render::type_cell_colors(&r.type_code);
        t.add_row(vec![
            Cell::new(&r.date),
            Cell::new(format!("{} {}", r.type_code, r.type_name))
                .bg(bg)
                .fg(fg),
            Cell::new(render::fmt_money(&amount)).fg(render::amount_color(&amount, &threshold)),
            Cell::new(if r.is_fixed { "yes" } else { "" }),
            Cell::new(&r.observations),
        ]);
    }
    println!("{}", t);
    println!("Total: {}", render::fmt_money(&total));
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub type_code: String,
    pub type_name: String,
    pub amount: String,
    pub is_fixed: bool,
    pub observations: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let mut sql = String::from(
        "SELECT e.id, e.date, t.code, t.name, e.amount, e.is_fixed, e.observations
         FROM expenses e JOIN expense_types t ON e.expense_type_id=t.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        parse_month(month)?;
        sql.push_str(" AND substr(e.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(code) = sub.get_one::<String>("type") {
        sql.push_str(" AND t.code=?");
        params_vec.push(code.to_uppercase());
    }
    if let Some(q) = sub.get_one::<String>("search") {
        sql.push_str(" AND e.observations LIKE '%' || ? || '%'");
        params_vec.push(q.into());
    }
    sql.push_str(" ORDER BY e.date DESC, e.id DESC");
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
        data.push(ExpenseRow {
            id: r.get(0)?,
            date: r.get(1)?,
            type_code: r.get(2)?,
            type_name: r.get(3)?,
            amount: r.get(4)?,
            is_fixed: r.get(5)?,
            observations: r.get(6)?,
        });
    }
    Ok(data)
}
