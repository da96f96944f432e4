use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use db::{application, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;

use super::ApplicationData;
use crate::{auth::AuthenticatedUser, error::impl_error_response};

/// Errors that may occur during the application list request.
#[derive(Debug, Display, From, Error)]
pub(super) enum ApplicationListError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(ApplicationListError);

/// List applications submitted by the current user.
pub(super) async fn list(
    Extension(current_user): Extension<AuthenticatedUser>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<ApplicationData>>, ApplicationListError> {
    application::Entity::find()
        .filter(application::Column::Applicant.eq(current_user.email()))
        .order_by_desc(application::Column::Id)
        .stream(&*db)
        .await?
        .map_ok(ApplicationData::from)
        .try_collect()
        .await
        .map(Json)
        .map_err(ApplicationListError::from)
}
