use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use db::{
    application, club, current_timestamp, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser, error::impl_error_response, handlers::InsertedResponse,
    validation::ValidatedJson,
};

/// Errors that may occur during the application submission process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ApplicationCreateError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "club not found")]
    ClubNotFound,
}

impl_error_response!(ApplicationCreateError, Self::ClubNotFound => StatusCode::NOT_FOUND);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApplicationCreateRequest {
    club_id: i64,

    #[validate(length(min = 1))]
    user_name: String,

    #[serde(default)]
    payment: Option<application::PaymentStatus>,
}

/// Submit an application to a club.
///
/// Club details are copied into the application at submission time.
pub(super) async fn create(
    Extension(current_user): Extension<AuthenticatedUser>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ApplicationCreateRequest>,
) -> Result<Json<InsertedResponse>, ApplicationCreateError> {
    db.transaction(|txn| {
        Box::pin(async move {
            let club = club::Entity::find_by_id(request.club_id)
                .one(txn)
                .await?
                .ok_or(ApplicationCreateError::ClubNotFound)?;

            let model = application::Entity::insert(application::ActiveModel {
                club_id: ActiveValue::Set(club.id),
                club_name: ActiveValue::Set(club.club_name),
                university_name: ActiveValue::Set(club.university_name),
                fees: ActiveValue::Set(club.application_fees),
                moderator_email: ActiveValue::Set(club.posted_user_email),
                applicant: ActiveValue::Set(current_user.email().to_owned()),
                user_name: ActiveValue::Set(request.user_name),
                applied_date: ActiveValue::Set(current_timestamp()),
                status: ActiveValue::Set(application::Status::Pending),
                payment: ActiveValue::Set(
                    request
                        .payment
                        .unwrap_or(application::PaymentStatus::Unpaid),
                ),
                ..Default::default()
            })
            .exec_with_returning(txn)
            .await?;

            info!(id = model.id, club_id = club.id, "application submitted");

            Ok(Json(InsertedResponse {
                success: true,
                inserted_id: model.id,
            }))
        })
    })
    .await
    .into_raw_result()
}
