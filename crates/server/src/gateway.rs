//! Payment provider client.

use axum::async_trait;
use common::config::Payments;
use derive_more::{Display, Error, From};
use serde::Deserialize;

/// Client-side payment session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Secret used by the client to confirm the payment.
    pub client_secret: String,
}

/// Errors that may occur while talking to the payment provider.
#[derive(Debug, Display, From, Error)]
pub enum GatewayError {
    /// Transport or provider-side error.
    Http(reqwest::Error),

    /// Provider response did not contain a client secret.
    #[display(fmt = "payment intent without a client secret")]
    MissingClientSecret,
}

/// Payment provider capability used by the payment routes.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for `amount` minor currency units.
    async fn create_intent(&self, amount: u64, email: &str) -> Result<PaymentIntent, GatewayError>;
}

/// Stripe-compatible payment provider client.
pub struct StripeGateway {
    client: reqwest::Client,
    endpoint: String,
    key: String,
    currency: String,
}

impl StripeGateway {
    /// Create new client from the payment provider configuration.
    pub fn new(config: &Payments) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            key: config.key.clone(),
            currency: config.currency.clone(),
        }
    }
}

#[derive(Deserialize)]
struct IntentResponse {
    client_secret: Option<String>,
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, amount: u64, email: &str) -> Result<PaymentIntent, GatewayError> {
        let amount = amount.to_string();

        let response: IntentResponse = self
            .client
            .post(format!("{}/v1/payment_intents", self.endpoint))
            .basic_auth(&self.key, None::<&str>)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", self.currency.as_str()),
                ("payment_method_types[]", "card"),
                ("receipt_email", email),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .client_secret
            .map(|client_secret| PaymentIntent { client_secret })
            .ok_or(GatewayError::MissingClientSecret)
    }
}
