// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure list-view formatting: expense type colors, contrast-aware text
//! colors, and money labels. Nothing here touches the database or the
//! terminal; commands feed the results into comfy-table cells.

use comfy_table::Color;
use rust_decimal::Decimal;

/// Pastel background colors for the built-in expense type codes.
pub const TYPE_COLORS: &[(&str, &str)] = &[
    ("MKT", "#FF9999"),
    ("LOG", "#99FF99"),
    ("PLT", "#9999FF"),
    ("SUP", "#FFFF99"),
    ("UTL", "#FF99FF"),
    ("TAX", "#99FFFF"),
    ("SAL", "#FFB366"),
    ("SHI", "#B366FF"),
    ("OTH", "#E6E6E6"),
];

pub const FALLBACK_COLOR: &str = "#E6E6E6";

/// Background color for an expense type code. Codes outside the built-in
/// palette get a deterministic hashed color so ad-hoc types stay stable
/// across renders.
pub fn type_color(code: &str) -> (u8, u8, u8) {
    for (c, hex) in TYPE_COLORS {
        if *c == code {
            return parse_hex(hex).unwrap_or((0xE6, 0xE6, 0xE6));
        }
    }
    hashed_color(code)
}

/// Deterministic RGB from the byte values of a code. Each channel is
/// clamped to >= 100 so the background never gets too dark for a list row.
pub fn hashed_color(code: &str) -> (u8, u8, u8) {
    let h = code
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    let r = 100 + (h % 156) as u8;
    let g = 100 + ((h >> 8) % 156) as u8;
    let b = 100 + ((h >> 16) % 156) as u8;
    (r, g, b)
}

pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let s = hex.strip_prefix('#')?;
    if s.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&s[0..2], 16).ok()?;
    let g = u8::from_str_radix(&s[2..4], 16).ok()?;
    let b = u8::from_str_radix(&s[4..6], 16).ok()?;
    Some((r, g, b))
}

pub fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

/// Scaled broadcast luma: 299·R + 587·G + 114·B, range 0..=255_000.
/// Integer arithmetic keeps the 0.5 boundary exact.
fn luma_scaled((r, g, b): (u8, u8, u8)) -> u32 {
    299 * r as u32 + 587 * g as u32 + 114 * b as u32
}

/// Perceptual luminance of a background color, 0.0..=1.0.
pub fn luminance(rgb: (u8, u8, u8)) -> f64 {
    luma_scaled(rgb) as f64 / 255_000.0
}

/// Pick a readable text color for a background: black above the luminance
/// midpoint, white at or below it (exactly 0.5 is white).
pub fn text_color(bg: (u8, u8, u8)) -> (u8, u8, u8) {
    if luma_scaled(bg) > 127_500 {
        (0, 0, 0)
    } else {
        (255, 255, 255)
    }
}

pub fn text_color_hex(bg: (u8, u8, u8)) -> &'static str {
    if text_color(bg) == (0, 0, 0) {
        "#000000"
    } else {
        "#FFFFFF"
    }
}

/// Format a decimal amount with thousands separators and two decimals:
/// 1234.5 -> "1,234.50".
pub fn fmt_amount(d: &Decimal) -> String {
    let negative = d.is_sign_negative();
    let rounded = d.abs().round_dp(2);
    let s = format!("{:.2}", rounded);
    let (int_part, dec_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{}.{}", with_commas, dec_part)
    } else {
        format!("{}.{}", with_commas, dec_part)
    }
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${}", fmt_amount(d))
}

/// Terminal color for an amount cell: red strictly above the alert
/// threshold, green otherwise. The threshold is operator configuration.
pub fn amount_color(amount: &Decimal, threshold: &Decimal) -> Color {
    if amount > threshold {
        Color::Red
    } else {
        Color::Green
    }
}

/// comfy-table colors for an expense type cell.
pub fn type_cell_colors(code: &str) -> (Color, Color) {
    let bg = type_color(code);
    let fg = text_color(bg);
    (
        Color::Rgb {
            r: bg.0,
            g: bg.1,
            b: bg.2,
        },
        Color::Rgb {
            r: fg.0,
            g: fg.1,
            b: fg.2,
        },
    )
}

/// Badge colors for the supplier active flag.
pub fn active_color(is_active: bool) -> Color {
    if is_active {
        Color::Green
    } else {
        Color::Red
    }
}
