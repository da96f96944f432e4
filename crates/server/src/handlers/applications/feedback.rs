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
use validator::Validate;

use crate::{error::impl_error_response, handlers::ModifiedResponse, validation::ValidatedJson};

/// Errors that may occur while leaving application feedback.
#[derive(Debug, Display, From, Error)]
pub(super) enum ApplicationFeedbackError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "application not found")]
    ApplicationNotFound,
}

impl_error_response!(
    ApplicationFeedbackError,
    Self::ApplicationNotFound => StatusCode::NOT_FOUND,
);

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct ApplicationFeedbackRequest {
    #[validate(length(min = 1))]
    feedback: String,
}

/// Attach moderator feedback to an application.
pub(super) async fn feedback(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ApplicationFeedbackRequest>,
) -> Result<Json<ModifiedResponse>, ApplicationFeedbackError> {
    let result = application::Entity::update_many()
        .set(application::ActiveModel {
            feedback: ActiveValue::Set(Some(request.feedback)),
            ..Default::default()
        })
        .filter(application::Column::Id.eq(id))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ApplicationFeedbackError::ApplicationNotFound);
    }

    Ok(Json(ModifiedResponse {
        success: true,
        modified_count: result.rows_affected,
    }))
}
