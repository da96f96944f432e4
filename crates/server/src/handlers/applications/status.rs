use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{
    application, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{error::impl_error_response, handlers::ModifiedResponse, validation::ValidatedJson};

/// Errors that may occur during the application status change.
#[derive(Debug, Display, From, Error)]
pub(super) enum ApplicationStatusError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "invalid status")]
    InvalidStatus,

    #[display(fmt = "application not found")]
    ApplicationNotFound,
}

impl_error_response!(
    ApplicationStatusError,
    Self::InvalidStatus => StatusCode::BAD_REQUEST,
    Self::ApplicationNotFound => StatusCode::NOT_FOUND,
);

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct ApplicationStatusRequest {
    status: String,
}

/// Change application review status.
pub(super) async fn status(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ApplicationStatusRequest>,
) -> Result<Json<ModifiedResponse>, ApplicationStatusError> {
    let status =
        application::Status::parse(&request.status).ok_or(ApplicationStatusError::InvalidStatus)?;

    let result = application::Entity::update_many()
        .set(application::ActiveModel {
            status: ActiveValue::Set(status),
            ..Default::default()
        })
        .filter(application::Column::Id.eq(id))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ApplicationStatusError::ApplicationNotFound);
    }

    info!(id, ?status, "application status changed");

    Ok(Json(ModifiedResponse {
        success: true,
        modified_count: result.rows_affected,
    }))
}
