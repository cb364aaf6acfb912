// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

use crate::models::BUILTIN_EXPENSE_TYPES;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("ar.com.caja", "Caja", "caja"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("caja.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS expense_types(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        expense_type_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        observations TEXT NOT NULL DEFAULT '',
        is_fixed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(expense_type_id) REFERENCES expense_types(id) ON DELETE RESTRICT
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

    CREATE TABLE IF NOT EXISTS incomes(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_number TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT '',
        date TEXT NOT NULL,
        order_status TEXT NOT NULL DEFAULT 'abierta',
        payment_status TEXT NOT NULL DEFAULT 'pendiente',
        shipping_status TEXT NOT NULL DEFAULT 'no_empaquetado',
        currency TEXT NOT NULL DEFAULT 'ARS',
        product_subtotal TEXT NOT NULL DEFAULT '0',
        discount TEXT NOT NULL DEFAULT '0',
        shipping_cost TEXT NOT NULL DEFAULT '0',
        total TEXT NOT NULL DEFAULT '0',
        buyer_name TEXT NOT NULL DEFAULT '',
        tax_id TEXT,
        phone TEXT,
        shipping_name TEXT,
        shipping_phone TEXT,
        address TEXT,
        address_number TEXT,
        floor_apt TEXT,
        locality TEXT,
        city TEXT,
        postal_code TEXT,
        state_province TEXT,
        country TEXT,
        shipping_method TEXT,
        payment_method TEXT,
        discount_coupon TEXT,
        buyer_notes TEXT,
        seller_notes TEXT,
        payment_date TEXT,
        shipping_date TEXT,
        product_name TEXT NOT NULL DEFAULT '',
        product_price TEXT NOT NULL DEFAULT '0',
        product_quantity INTEGER NOT NULL DEFAULT 0,
        sku TEXT,
        channel TEXT,
        tracking_code TEXT,
        payment_transaction_id TEXT,
        order_id TEXT NOT NULL UNIQUE,
        is_physical_product INTEGER NOT NULL DEFAULT 1,
        registered_by TEXT,
        sales_branch TEXT,
        seller TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_incomes_date ON incomes(date);
    CREATE INDEX IF NOT EXISTS idx_incomes_order_number ON incomes(order_number);
    CREATE INDEX IF NOT EXISTS idx_incomes_buyer_name ON incomes(buyer_name);

    CREATE TABLE IF NOT EXISTS suppliers(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        business_name TEXT NOT NULL,
        commercial_name TEXT NOT NULL DEFAULT '',
        tax_id TEXT NOT NULL UNIQUE,
        contact_person TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT '',
        city TEXT NOT NULL DEFAULT '',
        country TEXT NOT NULL DEFAULT '',
        bank_name TEXT NOT NULL DEFAULT '',
        bank_cbu_alias TEXT NOT NULL DEFAULT '',
        is_active INTEGER NOT NULL DEFAULT 1,
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_suppliers_business_name ON suppliers(business_name);
    "#,
    )?;
    seed_expense_types(conn)?;
    Ok(())
}

/// Seed the expense type lookup with the built-in codes on a fresh database.
pub fn seed_expense_types(conn: &Connection) -> Result<()> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM expense_types", [], |r| r.get(0))?;
    if count > 0 {
        return Ok(());
    }
    let mut stmt = conn.prepare("INSERT INTO expense_types(code, name) VALUES (?1, ?2)")?;
    for (code, name) in BUILTIN_EXPENSE_TYPES {
        stmt.execute([*code, *name])?;
    }
    Ok(())
}
