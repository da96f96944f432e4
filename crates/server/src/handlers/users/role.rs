use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{user, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{error::impl_error_response, handlers::ModifiedResponse, validation::ValidatedJson};

/// Errors that may occur during the role change process.
#[derive(Debug, Display, From, Error)]
pub(super) enum UserRoleError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Requested role can not be granted.
    #[display(fmt = "invalid role")]
    InvalidRole,

    #[display(fmt = "user not found")]
    UserNotFound,
}

impl_error_response!(
    UserRoleError,
    Self::InvalidRole => StatusCode::BAD_REQUEST,
    Self::UserNotFound => StatusCode::NOT_FOUND,
);

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct UserRoleRequest {
    /// Either `Student` or `Moderator`.
    role: String,
}

/// Change user role.
pub(super) async fn role(
    Path(email): Path<String>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<UserRoleRequest>,
) -> Result<Json<ModifiedResponse>, UserRoleError> {
    let role = user::Role::assignable(&request.role).ok_or(UserRoleError::InvalidRole)?;

    let result = user::Entity::update_many()
        .set(user::ActiveModel {
            role: ActiveValue::Set(role),
            ..Default::default()
        })
        .filter(user::Column::Email.eq(email.as_str()))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(UserRoleError::UserNotFound);
    }

    info!(%email, ?role, "user role changed");

    Ok(Json(ModifiedResponse {
        success: true,
        modified_count: result.rows_affected,
    }))
}
