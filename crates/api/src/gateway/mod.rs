//! HTTP client for the hosted payment gateway.
//!
//! The gateway exposes a Razorpay-style REST API: the backend creates an
//! order server-side, the client completes checkout against that order in
//! the gateway's widget, and the gateway hands the client a signed
//! confirmation which [`crate::handlers::enrollment::verify_payment`]
//! checks. Signature verification never talks to the gateway; only order
//! creation does.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::PaymentConfig;

/// Failure modes of a gateway call. No retries are attempted; a failed call
/// is reported to the caller immediately.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gateway rejected order creation: HTTP {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// An order descriptor as returned by the gateway.
///
/// The `id` is opaque and must be echoed back unmodified by the client in
/// the verify step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
}

/// Payment gateway client. Holds a connection-pooling reqwest client and
/// the configured credentials.
pub struct PaymentGateway {
    client: reqwest::Client,
    config: PaymentConfig,
}

impl PaymentGateway {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// ISO currency code orders are created in.
    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// Create a payment order with the gateway.
    ///
    /// `amount_minor_units` is the charge in the currency's smallest
    /// denomination. `receipt` must be unique per call.
    pub async fn create_order(
        &self,
        amount_minor_units: i64,
        receipt: &str,
    ) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/orders", self.config.api_base);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&json!({
                "amount": amount_minor_units,
                "currency": self.config.currency,
                "receipt": receipt,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected { status, body });
        }

        let order = response.json::<GatewayOrder>().await?;
        tracing::debug!(order_id = %order.id, amount = order.amount, "Gateway order created");
        Ok(order)
    }
}
