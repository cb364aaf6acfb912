// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

const UA: &str = concat!("caja/", env!("CARGO_PKG_VERSION"));

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Tolerant monetary parser for the sales CSV. Strips a currency symbol and
/// embedded spaces, then normalizes the decimal separator: when both '.'
/// and ',' appear the last occurrence is the decimal point and the other is
/// grouping; a lone ',' is a decimal point. Empty or unparsable input is
/// zero, never an error.
pub fn clean_decimal(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };
    let s: String = raw.chars().filter(|c| *c != '$' && *c != ' ').collect();
    if s.is_empty() {
        return Decimal::ZERO;
    }
    let dot = s.rfind('.');
    let comma = s.rfind(',');
    let normalized = match (dot, comma) {
        (Some(d), Some(c)) => {
            let decimal_sep = if d > c { '.' } else { ',' };
            let mut out = String::with_capacity(s.len());
            for ch in s.chars() {
                match ch {
                    '.' | ',' if ch != decimal_sep => {}
                    ',' => out.push('.'),
                    _ => out.push(ch),
                }
            }
            out
        }
        (None, Some(_)) => s.replace(',', "."),
        _ => s,
    };
    normalized.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Date parser for the sales CSV: dd/mm/yyyy or yyyy-mm-dd. Anything else
/// (including empty input) is None, never an error.
pub fn parse_date_flexible(raw: Option<&str>) -> Option<NaiveDate> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    if s.contains('/') {
        NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
    } else if s.contains('-') {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else {
        None
    }
}

/// "no"/"n"/"false"/"0" in any case mean false; everything else (including
/// a missing column) is true.
pub fn parse_yes_no(raw: Option<&str>) -> bool {
    match raw {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "no" | "n" | "false" | "0"
        ),
        None => true,
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_expense_type(conn: &Connection, code: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM expense_types WHERE code=?1")?;
    let id: i64 = stmt
        .query_row(params![code], |r| r.get(0))
        .with_context(|| format!("Expense type '{}' not found", code))?;
    Ok(id)
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Expense amounts strictly above this render red in lists. The default
/// tracks what the back office has historically used.
pub fn get_alert_threshold(conn: &Connection) -> Result<Decimal> {
    match get_setting(conn, "alert_threshold")? {
        Some(s) => parse_decimal(&s),
        None => Ok(Decimal::new(1000, 0)),
    }
}

pub fn set_alert_threshold(conn: &Connection, threshold: &Decimal) -> Result<()> {
    set_setting(conn, "alert_threshold", &threshold.to_string())
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub store_id: String,
    pub access_token: String,
}

pub const DEFAULT_STORE_API_URL: &str = "https://api.tiendanube.com/v1";

pub fn get_store_config(conn: &Connection) -> Result<StoreConfig> {
    let store_id =
        get_setting(conn, "store_id")?.context("Store id not configured; run 'caja config set-store'")?;
    let access_token = get_setting(conn, "store_access_token")?
        .context("Store access token not configured; run 'caja config set-store'")?;
    let base_url =
        get_setting(conn, "store_api_url")?.unwrap_or_else(|| DEFAULT_STORE_API_URL.to_string());
    Ok(StoreConfig {
        base_url,
        store_id,
        access_token,
    })
}

pub fn set_store_config(
    conn: &Connection,
    store_id: &str,
    access_token: &str,
    base_url: Option<&str>,
) -> Result<()> {
    set_setting(conn, "store_id", store_id)?;
    set_setting(conn, "store_access_token", access_token)?;
    if let Some(url) = base_url {
        set_setting(conn, "store_api_url", url.trim_end_matches('/'))?;
    }
    Ok(())
}
