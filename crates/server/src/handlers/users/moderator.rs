use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{user, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use crate::{error::impl_error_response, handlers::ModifiedResponse, validation::ValidatedJson};

/// Errors that may occur during the moderator assignment process.
#[derive(Debug, Display, From, Error)]
pub(super) enum UserModeratorError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "user not found")]
    UserNotFound,
}

impl_error_response!(UserModeratorError, Self::UserNotFound => StatusCode::NOT_FOUND);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserModeratorRequest {
    /// University (or club) the user moderates.
    #[validate(length(min = 1))]
    moderator_for: String,
}

/// Assign moderation scope to a user.
pub(super) async fn moderator(
    Path(email): Path<String>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<UserModeratorRequest>,
) -> Result<Json<ModifiedResponse>, UserModeratorError> {
    let result = user::Entity::update_many()
        .set(user::ActiveModel {
            moderator_for: ActiveValue::Set(Some(request.moderator_for)),
            ..Default::default()
        })
        .filter(user::Column::Email.eq(email))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(UserModeratorError::UserNotFound);
    }

    Ok(Json(ModifiedResponse {
        success: true,
        modified_count: result.rows_affected,
    }))
}
