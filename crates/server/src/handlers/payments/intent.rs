use std::sync::Arc;

use axum::{http::StatusCode, Extension, Json};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    error::impl_error_response,
    gateway::{GatewayError, PaymentGateway},
    validation::ValidatedJson,
};

/// Errors that may occur during the payment intent creation.
#[derive(Debug, Display, From, Error)]
pub(super) enum PaymentIntentError {
    /// Payment provider rejected the request or was unreachable.
    #[display(fmt = "payment provider error: {}", _0)]
    GatewayError(GatewayError),

    #[display(fmt = "payments are not configured")]
    PaymentsDisabled,
}

impl_error_response!(
    PaymentIntentError,
    Self::GatewayError(_) => StatusCode::BAD_GATEWAY,
    Self::PaymentsDisabled => StatusCode::SERVICE_UNAVAILABLE,
);

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct PaymentIntentRequest {
    /// Amount to pay, in major currency units.
    #[validate(range(min = 0.01))]
    amount: f64,
}

/// JSON response body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaymentIntentResponse {
    client_secret: String,
}

/// Create a payment intent for the current user.
pub(super) async fn intent(
    Extension(current_user): Extension<AuthenticatedUser>,
    gateway: Option<Extension<Arc<dyn PaymentGateway>>>,
    ValidatedJson(request): ValidatedJson<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, PaymentIntentError> {
    let Some(Extension(gateway)) = gateway else {
        return Err(PaymentIntentError::PaymentsDisabled);
    };

    let minor_units = (request.amount * 100.0).round() as u64;

    let intent = gateway
        .create_intent(minor_units, current_user.email())
        .await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}
