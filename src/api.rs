// Copyright (c) 2025 Caja contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the store's order-management API. Endpoints are
//! paginated; callers drive the page loop. Non-2xx responses surface as a
//! typed error carrying the status code and body text.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::utils::{http_client, StoreConfig};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("store API returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
pub struct OrderSummary {
    pub id: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub identification: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShippingAddress {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub floor: Option<String>,
    #[serde(default)]
    pub apartment: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentDetails {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub sku: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderDetail {
    pub id: u64,
    pub number: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub shipping_status: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub subtotal: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub shipping_cost: Decimal,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub shipping_option_name: Option<String>,
    #[serde(default)]
    pub payment_details: PaymentDetails,
    #[serde(default)]
    pub products: Vec<OrderProduct>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub shipped_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// Vendor timestamps are ISO 8601, sometimes with a literal 'Z' suffix or a
/// compact '+0000' offset. Unparsable input is None.
pub fn parse_vendor_datetime(raw: Option<&str>) -> Option<NaiveDate> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    let candidate = s.replace('Z', "+00:00");
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&candidate) {
        return Some(dt.date_naive());
    }
    chrono::DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z")
        .ok()
        .map(|dt| dt.date_naive())
}

pub struct StoreApi {
    api_url: String,
    access_token: String,
    client: reqwest::blocking::Client,
}

pub const PAGE_SIZE: u32 = 50;

impl StoreApi {
    pub fn new(config: &StoreConfig) -> anyhow::Result<Self> {
        Ok(StoreApi {
            api_url: format!("{}/{}", config.base_url, config.store_id),
            access_token: config.access_token.clone(),
            client: http_client()?,
        })
    }

    fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<reqwest::blocking::Response, ApiError> {
        let url = format!("{}/{}", self.api_url, endpoint);
        let resp = self
            .client
            .get(&url)
            .header("Authentication", format!("bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .query(params)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    /// One page of orders, optionally filtered by creation date and vendor
    /// status.
    pub fn get_orders(
        &self,
        since_date: Option<NaiveDate>,
        status: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<OrderSummary>, ApiError> {
        let mut params = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(d) = since_date {
            params.push(("created_at_min", d.to_string()));
        }
        if let Some(s) = status {
            params.push(("status", s.to_string()));
        }
        Ok(self.get("orders", &params)?.json()?)
    }

    pub fn get_order_details(&self, order_id: u64) -> Result<OrderDetail, ApiError> {
        Ok(self.get(&format!("orders/{}", order_id), &[])?.json()?)
    }

    /// One page of products, optionally filtered by update date. Returned as
    /// raw JSON; the product payload varies per store and nothing local
    /// persists it.
    pub fn get_products(
        &self,
        page: u32,
        per_page: u32,
        updated_since: Option<NaiveDate>,
    ) -> Result<Vec<serde_json::Value>, ApiError> {
        let mut params = vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(d) = updated_since {
            params.push(("updated_since", d.to_string()));
        }
        Ok(self.get("products", &params)?.json()?)
    }
}
