use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use db::{review, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};

use crate::{auth::AuthenticatedUser, error::impl_error_response, handlers::DeletedResponse};

/// Errors that may occur during the review removal process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ReviewDeleteError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "review not found")]
    ReviewNotFound,
}

impl_error_response!(ReviewDeleteError, Self::ReviewNotFound => StatusCode::NOT_FOUND);

/// Remove a review of the current user.
pub(super) async fn delete(
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<DeletedResponse>, ReviewDeleteError> {
    let result = review::Entity::delete_many()
        .filter(review::Column::Id.eq(id))
        .filter(review::Column::UserEmail.eq(current_user.email()))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ReviewDeleteError::ReviewNotFound);
    }

    Ok(Json(DeletedResponse {
        success: true,
        deleted_count: result.rows_affected,
    }))
}
