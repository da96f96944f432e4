use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use db::{application, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;

use crate::{
    auth::AuthenticatedUser, error::impl_error_response,
    handlers::applications::ApplicationData,
};

/// Errors that may occur during the moderated applications request.
#[derive(Debug, Display, From, Error)]
pub(super) enum ModeratedApplicationsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(ModeratedApplicationsError);

/// List applications submitted to clubs of the current moderator.
pub(super) async fn applications(
    Extension(current_user): Extension<AuthenticatedUser>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<ApplicationData>>, ModeratedApplicationsError> {
    application::Entity::find()
        .filter(application::Column::ModeratorEmail.eq(current_user.email()))
        .order_by_desc(application::Column::Id)
        .stream(&*db)
        .await?
        .map_ok(ApplicationData::from)
        .try_collect()
        .await
        .map(Json)
        .map_err(ModeratedApplicationsError::from)
}
