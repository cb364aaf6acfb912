// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Sales CSV import. The store's export uses Spanish column names and a
//! Windows-1252 encoding. Field-level oddities (currency symbols, comma
//! decimals, two date formats) degrade to safe defaults; a row that still
//! fails is logged and skipped, never aborting the run.

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use std::collections::HashMap;
use std::fs;

use crate::commands::incomes::insert_income;
use crate::models::Income;
use crate::utils::{clean_decimal, parse_date_flexible, parse_yes_no};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("sales", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let (imported, failed) = import_sales(conn, path)?;
            println!(
                "Import finished: {} rows imported, {} rows failed",
                imported, failed
            );
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn import_sales(conn: &Connection, path: &str) -> Result<(usize, usize)> {
    let bytes = fs::read(path).with_context(|| format!("Open CSV {}", path))?;
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = rdr.headers()?.clone();
    let idx: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_string(), i))
        .collect();

    let mut imported = 0usize;
    let mut failed = 0usize;

    for (n, result) in rdr.records().enumerate() {
        let line = n + 2; // 1-based, after the header row
        let outcome = result
            .map_err(anyhow::Error::from)
            .and_then(|rec| row_to_income(&idx, &rec))
            .and_then(|income| insert_income(conn, &income));
        match outcome {
            Ok(()) => {
                imported += 1;
                if imported % 100 == 0 {
                    println!("Processed {} rows...", imported);
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("Row {}: {:#}", line, e);
            }
        }
    }
    Ok((imported, failed))
}

fn row_to_income(idx: &HashMap<String, usize>, rec: &csv::StringRecord) -> Result<Income> {
    let field = |name: &str| -> Option<&str> {
        idx.get(name)
            .and_then(|&i| rec.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    let owned = |name: &str| field(name).map(str::to_string);
    let text = |name: &str| field(name).unwrap_or("").to_string();

    let order_id = field("Identificador de la orden")
        .ok_or_else(|| anyhow!("missing order identifier"))?
        .to_string();

    Ok(Income {
        order_number: text("Número de orden"),
        email: text("Email"),
        date: parse_date_flexible(field("Fecha")),
        order_status: field("Estado de la orden").unwrap_or("abierta").to_string(),
        payment_status: field("Estado del pago").unwrap_or("pendiente").to_string(),
        shipping_status: field("Estado del envío")
            .unwrap_or("no_empaquetado")
            .to_string(),
        currency: field("Moneda").unwrap_or("ARS").to_string(),
        product_subtotal: clean_decimal(field("Subtotal de productos")),
        discount: clean_decimal(field("Descuento")),
        shipping_cost: clean_decimal(field("Costo de envío")),
        total: clean_decimal(field("Total")),
        buyer_name: text("Nombre del comprador"),
        tax_id: owned("DNI / CUIT"),
        phone: owned("Teléfono"),
        shipping_name: owned("Nombre para el envío"),
        shipping_phone: owned("Teléfono para el envío"),
        address: owned("Dirección"),
        address_number: owned("Número"),
        floor_apt: owned("Piso"),
        locality: owned("Localidad"),
        city: owned("Ciudad"),
        postal_code: owned("Código postal"),
        state_province: owned("Provincia o estado"),
        country: owned("País"),
        shipping_method: owned("Medio de envío"),
        payment_method: owned("Medio de pago"),
        discount_coupon: owned("Cupón de descuento"),
        buyer_notes: owned("Notas del comprador"),
        seller_notes: owned("Notas del vendedor"),
        payment_date: parse_date_flexible(field("Fecha de pago")),
        shipping_date: parse_date_flexible(field("Fecha de envío")),
        product_name: text("Nombre del producto"),
        product_price: clean_decimal(field("Precio del producto")),
        product_quantity: field("Cantidad del producto")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0),
        sku: owned("SKU"),
        channel: owned("Canal"),
        tracking_code: owned("Código de tracking del envío"),
        payment_transaction_id: owned("Identificador de la transacción en el medio de pago"),
        order_id,
        is_physical_product: parse_yes_no(field("Producto Físico")),
        registered_by: owned("Persona que registró la venta"),
        sales_branch: owned("Sucursal de venta"),
        seller: owned("Vendedor"),
    })
}
