// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::render::fmt_money;
use crate::utils::{
    get_alert_threshold, get_store_config, parse_decimal, pretty_table, set_alert_threshold,
    set_store_config,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-threshold", sub)) => {
            let threshold = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            set_alert_threshold(conn, &threshold)?;
            println!("Alert threshold set to {}", fmt_money(&threshold));
        }
        Some(("set-store", sub)) => {
            let store_id = sub.get_one::<String>("store-id").unwrap();
            let token = sub.get_one::<String>("token").unwrap();
            let base_url = sub.get_one::<String>("base-url").map(|s| s.as_str());
            set_store_config(conn, store_id, token, base_url)?;
            println!("Store API credentials saved for store {}", store_id);
        }
        Some(("show", _)) | None => show(conn)?,
        _ => {}
    }
    Ok(())
}

fn mask(token: &str) -> String {
    if token.len() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", &token[token.len() - 4..])
    }
}

fn show(conn: &Connection) -> Result<()> {
    let threshold = get_alert_threshold(conn)?;
    let mut rows = vec![vec![
        "alert_threshold".to_string(),
        fmt_money(&threshold),
    ]];
    match get_store_config(conn) {
        Ok(cfg) => {
            rows.push(vec!["store_id".into(), cfg.store_id]);
            rows.push(vec!["store_access_token".into(), mask(&cfg.access_token)]);
            rows.push(vec!["store_api_url".into(), cfg.base_url]);
        }
        Err(_) => {
            rows.push(vec!["store".into(), "(not configured)".into()]);
        }
    }
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
