use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use db::{application, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};

use super::ApplicationData;
use crate::{auth::AuthenticatedUser, error::impl_error_response};

/// Errors that may occur during the application details request.
#[derive(Debug, Display, From, Error)]
pub(super) enum ApplicationDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "application not found")]
    ApplicationNotFound,
}

impl_error_response!(
    ApplicationDetailsError,
    Self::ApplicationNotFound => StatusCode::NOT_FOUND,
);

/// Get application details.
///
/// Applications are visible to their applicant and to the moderator of the
/// related club.
pub(super) async fn details(
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<ApplicationData>, ApplicationDetailsError> {
    application::Entity::find_by_id(id)
        .filter(
            Condition::any()
                .add(application::Column::Applicant.eq(current_user.email()))
                .add(application::Column::ModeratorEmail.eq(current_user.email())),
        )
        .one(&*db)
        .await?
        .map(ApplicationData::from)
        .map(Json)
        .ok_or(ApplicationDetailsError::ApplicationNotFound)
}
