// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::render;
use crate::utils::maybe_print_json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("activate", sub)) => set_active(conn, sub, true)?,
        Some(("deactivate", sub)) => set_active(conn, sub, false)?,
        _ => {}
    }
    Ok(())
}

fn opt(sub: &clap::ArgMatches, key: &str) -> String {
    sub.get_one::<String>(key).cloned().unwrap_or_default()
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    // Names are stored uppercased to keep the list consistent.
    let business_name = sub.get_one::<String>("business-name").unwrap().to_uppercase();
    let commercial_name = opt(sub, "commercial-name").to_uppercase();
    let tax_id = sub.get_one::<String>("tax-id").unwrap();

    conn.execute(
        "INSERT INTO suppliers(
            business_name, commercial_name, tax_id, contact_person, email, phone,
            address, city, country, bank_name, bank_cbu_alias, notes
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            business_name,
            commercial_name,
            tax_id,
            opt(sub, "contact"),
            opt(sub, "email"),
            opt(sub, "phone"),
            opt(sub, "address"),
            opt(sub, "city"),
            opt(sub, "country"),
            opt(sub, "bank"),
            opt(sub, "cbu-alias"),
            opt(sub, "notes"),
        ],
    )?;
    println!("Added supplier {} ({})", business_name, tax_id);
    Ok(())
}

fn set_active(conn: &Connection, sub: &clap::ArgMatches, active: bool) -> Result<()> {
    let tax_id = sub.get_one::<String>("tax-id").unwrap();
    let n = conn.execute(
        "UPDATE suppliers SET is_active=?1, updated_at=datetime('now') WHERE tax_id=?2",
        params![active, tax_id],
    )?;
    if n == 0 {
        println!("No supplier with tax id {}", tax_id);
    } else {
        println!(
            "Supplier {} is now {}",
            tax_id,
            if active { "active" } else { "inactive" }
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct SupplierRow {
    pub business_name: String,
    pub tax_id: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub is_active: bool,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<SupplierRow>> {
    let mut sql = String::from(
        "SELECT business_name, tax_id, contact_person, email, phone, city, country, is_active
         FROM suppliers WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if sub.get_flag("active") {
        sql.push_str(" AND is_active=1");
    }
    if sub.get_flag("inactive") {
        sql.push_str(" AND is_active=0");
    }
    if let Some(c) = sub.get_one::<String>("country") {
        sql.push_str(" AND country=?");
        params_vec.push(c.into());
    }
    if let Some(q) = sub.get_one::<String>("search") {
        sql.push_str(
            " AND (business_name LIKE '%' || ? || '%'
               OR commercial_name LIKE '%' || ? || '%'
               OR tax_id LIKE '%' || ? || '%'
               OR contact_person LIKE '%' || ? || '%'
               OR email LIKE '%' || ? || '%')",
        );
        for _ in 0..5 {
            params_vec.push(q.into());
        }
    }
    sql.push_str(" ORDER BY business_name");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(SupplierRow {
            business_name: r.get(0)?,
            tax_id: r.get(1)?,
            contact_person: r.get(2)?,
            email: r.get(3)?,
            phone: r.get(4)?,
            city: r.get(5)?,
            country: r.get(6)?,
            is_active: r.get(7)?,
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
    t.set_header(["Business name", "Tax id", "Contact", "Location", "Status"]);
    for r in &data {
        let contact = format!("{}\n{}\n{}", r.contact_person, r.email, r.phone);
        let location = format!("{}, {}", r.city, r.country);
        t.add_row(vec![
            Cell::new(&r.business_name),
            Cell::new(&r.tax_id),
            Cell::new(contact.trim()),
            Cell::new(location.trim_matches(|c| c == ',' || c == ' ')),
            Cell::new(if r.is_active { "Activo" } else { "Inactivo" })
                .fg(render::active_color(r.is_active)),
        ]);
    }
    println!("{}", t);
    Ok(())
}
