// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Built-in expense type codes and display names. These seed the
/// `expense_types` lookup table; the table is the source of truth after that
/// (operators can add their own codes).
pub const BUILTIN_EXPENSE_TYPES: &[(&str, &str)] = &[
    ("SAL", "Salarios"),
    ("UTL", "Servicios"),
    ("MKT", "Marketing"),
    ("SHI", "Envíos"),
    ("TAX", "Impuestos"),
    ("PLT", "Plataforma"),
    ("SUP", "Insumos"),
    ("LOG", "Logística"),
    ("OTH", "Otros"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseType {
    pub id: i64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub expense_type_id: i64,
    pub amount: Decimal,
    pub observations: String,
    pub is_fixed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "abierta",
            OrderStatus::Closed => "cerrada",
            OrderStatus::Cancelled => "cancelada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "abierta" => Some(OrderStatus::Open),
            "cerrada" => Some(OrderStatus::Closed),
            "cancelada" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Map the store API's order-status vocabulary. Unknown states stay Open.
    pub fn from_vendor(s: &str) -> Self {
        match s {
            "closed" => OrderStatus::Closed,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Open,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pendiente",
            PaymentStatus::Paid => "pagado",
            PaymentStatus::Cancelled => "cancelado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendiente" => Some(PaymentStatus::Pending),
            "pagado" => Some(PaymentStatus::Paid),
            "cancelado" => Some(PaymentStatus::Cancelled),
            _ => None,
        }
    }

    /// Map the store API's payment-status vocabulary. Unknown states stay
    /// Pending.
    pub fn from_vendor(s: &str) -> Self {
        match s {
            "paid" => PaymentStatus::Paid,
            "cancelled" | "voided" => PaymentStatus::Cancelled,
            _ => PaymentStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingStatus {
    NotPackaged,
    Packaged,
    Shipped,
    Delivered,
}

impl ShippingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingStatus::NotPackaged => "no_empaquetado",
            ShippingStatus::Packaged => "empaquetado",
            ShippingStatus::Shipped => "enviado",
            ShippingStatus::Delivered => "entregado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "no_empaquetado" => Some(ShippingStatus::NotPackaged),
            "empaquetado" => Some(ShippingStatus::Packaged),
            "enviado" => Some(ShippingStatus::Shipped),
            "entregado" => Some(ShippingStatus::Delivered),
            _ => None,
        }
    }

    /// Map the store API's fulfillment vocabulary. Unknown states stay
    /// NotPackaged.
    pub fn from_vendor(s: &str) -> Self {
        match s {
            "packed" => ShippingStatus::Packaged,
            "fulfilled" | "shipped" => ShippingStatus::Shipped,
            "delivered" => ShippingStatus::Delivered,
            _ => ShippingStatus::NotPackaged,
        }
    }
}

/// A sales income record. One row per order; the field set mirrors the
/// store's sales export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Income {
    pub order_number: String,
    pub email: String,
    pub date: Option<NaiveDate>,
    pub order_status: String,
    pub payment_status: String,
    pub shipping_status: String,
    pub currency: String,
    pub product_subtotal: Decimal,
    pub discount: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub buyer_name: String,
    pub tax_id: Option<String>,
    pub phone: Option<String>,
    pub shipping_name: Option<String>,
    pub shipping_phone: Option<String>,
    pub address: Option<String>,
    pub address_number: Option<String>,
    pub floor_apt: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub state_province: Option<String>,
    pub country: Option<String>,
    pub shipping_method: Option<String>,
    pub payment_method: Option<String>,
    pub discount_coupon: Option<String>,
    pub buyer_notes: Option<String>,
    pub seller_notes: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub shipping_date: Option<NaiveDate>,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_quantity: u32,
    pub sku: Option<String>,
    pub channel: Option<String>,
    pub tracking_code: Option<String>,
    pub payment_transaction_id: Option<String>,
    pub order_id: String,
    pub is_physical_product: bool,
    pub registered_by: Option<String>,
    pub sales_branch: Option<String>,
    pub seller: Option<String>,
}

impl Income {
    /// The stored total is always derived, never trusted from input.
    pub fn computed_total(&self) -> Decimal {
        self.product_subtotal - self.discount + self.shipping_cost
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub business_name: String,
    pub commercial_name: String,
    pub tax_id: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub bank_name: String,
    pub bank_cbu_alias: String,
    pub is_active: bool,
    pub notes: String,
}
