use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{user, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};
use tracing::info;

use crate::{error::impl_error_response, handlers::DeletedResponse};

/// Errors that may occur during the user removal process.
#[derive(Debug, Display, From, Error)]
pub(super) enum UserDeleteError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "user not found")]
    UserNotFound,
}

impl_error_response!(UserDeleteError, Self::UserNotFound => StatusCode::NOT_FOUND);

/// Remove a user profile.
pub(super) async fn delete(
    Path(email): Path<String>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<DeletedResponse>, UserDeleteError> {
    let result = user::Entity::delete_many()
        .filter(user::Column::Email.eq(email.as_str()))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(UserDeleteError::UserNotFound);
    }

    info!(%email, "user removed");

    Ok(Json(DeletedResponse {
        success: true,
        deleted_count: result.rows_affected,
    }))
}
