// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection};

use crate::render;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let code = sub.get_one::<String>("code").unwrap().to_uppercase();
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute(
                "INSERT INTO expense_types(code, name) VALUES (?1, ?2)",
                params![code, name],
            )?;
            println!("Added expense type {} '{}'", code, name);
        }
        Some(("rename", sub)) => {
            let code = sub.get_one::<String>("code").unwrap().to_uppercase();
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute(
                "UPDATE expense_types SET name=?1, updated_at=datetime('now') WHERE code=?2",
                params![name, code],
            )?;
            if n == 0 {
                println!("No expense type with code {}", code);
            } else {
                println!("Renamed {} to '{}'", code, name);
            }
        }
        Some(("list", _)) | None => list(conn)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let mut stmt =
        conn.prepare("SELECT code, name, created_at FROM expense_types ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(["Code", "Name", "Created"]);
    for row in rows {
        let (code, name, created) = row?;
        let (bg, fg) = render::type_cell_colors(&code);
        t.add_row(vec![
            Cell::new(&code).bg(bg).fg(fg),
            Cell::new(name),
            Cell::new(created),
        ]);
    }
    println!("{}", t);
    Ok(())
}
