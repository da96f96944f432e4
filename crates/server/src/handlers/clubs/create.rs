use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use db::{club, current_timestamp, ActiveValue, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser, error::impl_error_response, handlers::InsertedResponse,
    validation::ValidatedJson,
};

/// Errors that may occur during the club creation process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ClubCreateError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(ClubCreateError);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct ClubCreateRequest {
    #[validate(length(min = 1))]
    club_name: String,

    #[validate(length(min = 1))]
    university_name: String,

    #[validate(length(min = 1))]
    university_country: String,

    university_city: Option<String>,

    #[validate(length(min = 1))]
    category: String,

    description: Option<String>,

    image: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0.0))]
    application_fees: f64,
}

/// Publish a new club owned by the current user.
pub(super) async fn create(
    Extension(current_user): Extension<AuthenticatedUser>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ClubCreateRequest>,
) -> Result<Json<InsertedResponse>, ClubCreateError> {
    let model = club::Entity::insert(club::ActiveModel {
        club_name: ActiveValue::Set(request.club_name),
        university_name: ActiveValue::Set(request.university_name),
        university_country: ActiveValue::Set(request.university_country),
        university_city: ActiveValue::Set(request.university_city),
        category: ActiveValue::Set(request.category),
        description: ActiveValue::Set(request.description),
        image: ActiveValue::Set(request.image),
        application_fees: ActiveValue::Set(request.application_fees),
        posted_date: ActiveValue::Set(current_timestamp()),
        posted_user_email: ActiveValue::Set(current_user.email().to_owned()),
        ..Default::default()
    })
    .exec_with_returning(&*db)
    .await?;

    info!(id = model.id, owner = current_user.email(), "club published");

    Ok(Json(InsertedResponse {
        success: true,
        inserted_id: model.id,
    }))
}
