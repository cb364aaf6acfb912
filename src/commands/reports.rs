// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::render::fmt_money;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseItem {
    pub month: String, // YYYY-MM
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: Decimal,
    /// (month, sum) for the 3 most recent months present, most recent first.
    pub by_month: Vec<(String, Decimal)>,
    /// (category, sum) ordered by descending sum.
    pub by_category: Vec<(String, Decimal)>,
}

/// Aggregate an already-filtered expense collection. Sums are exact decimal
/// arithmetic; empty input is a zero total and empty groupings.
pub fn summarize(items: &[ExpenseItem]) -> Summary {
    let mut total = Decimal::ZERO;
    let mut months: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut categories: BTreeMap<String, Decimal> = BTreeMap::new();

    for item in items {
        total += item.amount;
        *months.entry(item.month.clone()).or_insert(Decimal::ZERO) += item.amount;
        *categories
            .entry(item.category.clone())
            .or_insert(Decimal::ZERO) += item.amount;
    }

    let by_month: Vec<(String, Decimal)> = months
        .into_iter()
        .rev()
        .take(3)
        .collect();

    let mut by_category: Vec<(String, Decimal)> = categories.into_iter().collect();
    by_category.sort_by(|a, b| b.1.cmp(&a.1));

    Summary {
        total,
        by_month,
        by_category,
    }
}

pub fn query_items(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ExpenseItem>> {
    let mut sql = String::from(
        "SELECT substr(e.date,1,7), t.name, e.amount
         FROM expenses e JOIN expense_types t ON e.expense_type_id=t.id WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(from) = sub.get_one::<String>("from") {
        parse_date(from)?;
        sql.push_str(" AND e.date>=?");
        params_vec.push(from.into());
    }
    if let Some(to) = sub.get_one::<String>("to") {
        parse_date(to)?;
        sql.push_str(" AND e.date<=?");
        params_vec.push(to.into());
    }
    if let Some(code) = sub.get_one::<String>("type") {
        sql.push_str(" AND t.code=?");
        params_vec.push(code.to_uppercase());
    }
    if let Some(q) = sub.get_one::<String>("search") {
        sql.push_str(" AND e.observations LIKE '%' || ? || '%'");
        params_vec.push(q.into());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut items = Vec::new();
    while let Some(r) = rows.next()? {
        let month: String = r.get(0)?;
        let category: String = r.get(1)?;
        let amount: String = r.get(2)?;
        items.push(ExpenseItem {
            month,
            category,
            amount: parse_decimal(&amount)?,
        });
    }
    Ok(items)
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let items = query_items(conn, sub)?;
    let s = summarize(&items);

    if maybe_print_json(json_flag, jsonl_flag, &s)? {
        return Ok(());
    }

    println!("Total: {}", fmt_money(&s.total));

    let month_rows = s
        .by_month
        .iter()
        .map(|(m, v)| vec![m.clone(), fmt_money(v)])
        .collect();
    println!("{}", pretty_table(&["Month", "Total"], month_rows));

    let cat_rows = s
        .by_category
        .iter()
        .map(|(c, v)| vec![c.clone(), fmt_money(v)])
        .collect();
    println!("{}", pretty_table(&["Category", "Total"], cat_rows));
    Ok(())
}
