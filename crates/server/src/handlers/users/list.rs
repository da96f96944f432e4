use std::sync::Arc;

use axum::{extract::State, Json};
use db::{user, DatabaseConnection, DbErr, EntityTrait, QueryOrder};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;

use super::UserData;
use crate::error::impl_error_response;

/// Errors that may occur during the user list request.
#[derive(Debug, Display, From, Error)]
pub(super) enum UserListError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(UserListError);

/// List all registered users.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<UserData>>, UserListError> {
    user::Entity::find()
        .order_by_asc(user::Column::Id)
        .stream(&*db)
        .await?
        .map_ok(UserData::from)
        .try_collect()
        .await
        .map(Json)
        .map_err(UserListError::from)
}
