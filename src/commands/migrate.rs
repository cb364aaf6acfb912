// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One-off data migrations. The only one so far moves the inline 3-letter
//! expense type code into the `expense_types` lookup table.

use anyhow::{bail, Result};
use rusqlite::{Connection, TransactionBehavior};

use crate::models::BUILTIN_EXPENSE_TYPES;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expense-types", _)) => migrate_expense_types(conn),
        _ => Ok(()),
    }
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name=?2",
        [table, column],
        |r| r.get(0),
    )?;
    Ok(n > 0)
}

/// Normalize `expenses.expense_type` (inline code) into a foreign key on
/// `expense_types`. Runs in one transaction: a code that matches no lookup
/// row aborts the whole transform and the database is left untouched.
pub fn migrate_expense_types(conn: &mut Connection) -> Result<()> {
    if !column_exists(conn, "expenses", "expense_type")? {
        println!("Expense types already normalized; nothing to do.");
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense_types(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;
    {
        let mut stmt =
            tx.prepare("INSERT OR IGNORE INTO expense_types(code, name) VALUES (?1, ?2)")?;
        for (code, name) in BUILTIN_EXPENSE_TYPES {
            stmt.execute([*code, *name])?;
        }
    }

    if !column_exists(&tx, "expenses", "expense_type_id")? {
        tx.execute_batch(
            "ALTER TABLE expenses ADD COLUMN expense_type_id INTEGER REFERENCES expense_types(id);",
        )?;
    }
    tx.execute(
        "UPDATE expenses SET expense_type_id=(
            SELECT id FROM expense_types t WHERE t.code=expenses.expense_type
         )",
        [],
    )?;

    let unmatched: i64 = tx.query_row(
        "SELECT COUNT(*) FROM expenses WHERE expense_type_id IS NULL",
        [],
        |r| r.get(0),
    )?;
    if unmatched > 0 {
        let mut stmt = tx.prepare(
            "SELECT DISTINCT expense_type FROM expenses WHERE expense_type_id IS NULL",
        )?;
        let codes: Vec<String> = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<std::result::Result<_, _>>()?;
        drop(stmt);
        bail!(
            "{} expense rows have codes with no matching expense type ({}); aborting",
            unmatched,
            codes.join(", ")
        );
    }

    tx.execute_batch("ALTER TABLE expenses DROP COLUMN expense_type;")?;
    tx.commit()?;

    println!("Expense types normalized into the lookup table.");
    Ok(())
}
