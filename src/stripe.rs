//! Payment gateway bridge.
//!
//! A direct pass-through: create a product for the course, a price for the
//! amount, then a checkout session. No retry, no idempotency keys, no
//! completion webhooks; the caller only records the session id and link.

use serde::Deserialize;

use crate::prelude::*;

const API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Clone)]
pub struct Stripe {
  http: reqwest::Client,
  secret: String,
  success_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Product {
  pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct Price {
  pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
  pub id: String,
  pub url: String,
}

impl Stripe {
  pub fn new(secret: impl Into<String>, success_url: impl Into<String>) -> Self {
    Self {
      http: reqwest::Client::new(),
      secret: secret.into(),
      success_url: success_url.into(),
    }
  }

  pub async fn create_product(&self, name: &str) -> Result<Product> {
    let product = self
      .http
      .post(format!("{API_BASE}/products"))
      .bearer_auth(&self.secret)
      .form(&[("name", name)])
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    Ok(product)
  }

  /// `amount` is in major currency units; the gateway takes minor units.
  pub async fn create_price(&self, product_id: &str, amount: i64) -> Result<Price> {
    let unit_amount = (amount * 100).to_string();

    let price = self
      .http
      .post(format!("{API_BASE}/prices"))
      .bearer_auth(&self.secret)
      .form(&[
        ("currency", "rub"),
        ("unit_amount", unit_amount.as_str()),
        ("product", product_id),
      ])
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    Ok(price)
  }

  pub async fn create_session(&self, price_id: &str) -> Result<CheckoutSession> {
    let session = self
      .http
      .post(format!("{API_BASE}/checkout/sessions"))
      .bearer_auth(&self.secret)
      .form(&[
        ("mode", "payment"),
        ("success_url", self.success_url.as_str()),
        ("line_items[0][price]", price_id),
        ("line_items[0][quantity]", "1"),
      ])
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    Ok(session)
  }

  /// Full checkout chain for a single course purchase.
  pub async fn checkout(&self, name: &str, amount: i64) -> Result<CheckoutSession> {
    let product = self.create_product(name).await?;
    let price = self.create_price(&product.id, amount).await?;
    self.create_session(&price.id).await
  }
}
