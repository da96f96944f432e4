use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use db::{application, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use serde::Serialize;
use tracing::info;

use crate::error::impl_error_response;

/// Errors that may occur during the application removal.
#[derive(Debug, Display, From, Error)]
pub(super) enum ApplicationRejectError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(ApplicationRejectError);

/// JSON response body.
#[derive(Serialize)]
pub(super) struct ApplicationRejectResponse {
    success: bool,

    /// Amount of removed applications.
    deleted: u64,
}

/// Remove an application regardless of its status.
pub(super) async fn reject(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<ApplicationRejectResponse>, ApplicationRejectError> {
    let result = application::Entity::delete_by_id(id).exec(&*db).await?;

    if result.rows_affected > 0 {
        info!(id, "application removed by moderator");
    }

    Ok(Json(ApplicationRejectResponse {
        success: result.rows_affected > 0,
        deleted: result.rows_affected,
    }))
}
