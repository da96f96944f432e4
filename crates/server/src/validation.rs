use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::{Request, StatusCode},
    Json,
};
use derive_more::{Display, Error};
use validator::{Validate, ValidationErrors};

use crate::error::impl_error_response;

/// Rejection of a malformed request body.
#[derive(Debug, Display, Error)]
pub enum BodyRejection {
    /// Body is not a JSON document of the expected shape.
    #[display(fmt = "{}", _0)]
    Malformed(JsonRejection),

    /// Body fields failed validation.
    #[display(fmt = "invalid fields: {}", "invalid_fields(_0)")]
    Invalid(ValidationErrors),
}

impl_error_response!(
    BodyRejection,
    Self::Malformed(_) | Self::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
);

/// Sorted, comma-separated names of fields that failed validation.
fn invalid_fields(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_keys().collect();
    fields.sort_unstable();
    fields.join(", ")
}

/// JSON request body that was validated with [`validator`] rules
/// before reaching a handler.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: Validate,
    B: Send + 'static,
    S: Sync,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(BodyRejection::Malformed)?;

        body.validate().map_err(BodyRejection::Invalid)?;

        Ok(ValidatedJson(body))
    }
}
