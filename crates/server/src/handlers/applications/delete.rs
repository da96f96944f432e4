use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use db::{
    application, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};

use crate::{auth::AuthenticatedUser, error::impl_error_response, handlers::DeletedResponse};

/// Errors that may occur during the application withdrawal process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ApplicationDeleteError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "application not found")]
    ApplicationNotFound,

    /// Application was already reviewed by a moderator.
    #[display(fmt = "only pending applications can be deleted")]
    NotPending,
}

impl_error_response!(
    ApplicationDeleteError,
    Self::ApplicationNotFound => StatusCode::NOT_FOUND,
    Self::NotPending => StatusCode::FORBIDDEN,
);

/// Withdraw a pending application of the current user.
pub(super) async fn delete(
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<DeletedResponse>, ApplicationDeleteError> {
    db.transaction(|txn| {
        Box::pin(async move {
            let model = application::Entity::find_by_id(id)
                .filter(application::Column::Applicant.eq(current_user.email()))
                .one(txn)
                .await?
                .ok_or(ApplicationDeleteError::ApplicationNotFound)?;

            if model.status != application::Status::Pending {
                return Err(ApplicationDeleteError::NotPending);
            }

            let result = application::Entity::delete_by_id(id).exec(txn).await?;

            Ok(Json(DeletedResponse {
                success: true,
                deleted_count: result.rows_affected,
            }))
        })
    })
    .await
    .into_raw_result()
}
