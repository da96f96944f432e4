use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{club, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};

use super::ClubData;
use crate::error::impl_error_response;

/// Errors that may occur during the club details request.
#[derive(Debug, Display, From, Error)]
pub(super) enum ClubDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Club with the provided identifier does not exist.
    #[display(fmt = "club not found")]
    ClubNotFound,
}

impl_error_response!(ClubDetailsError, Self::ClubNotFound => StatusCode::NOT_FOUND);

/// Get club details by its identifier.
pub(super) async fn details(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<ClubData>, ClubDetailsError> {
    club::Entity::find_by_id(id)
        .one(&*db)
        .await?
        .map(ClubData::from)
        .map(Json)
        .ok_or(ClubDetailsError::ClubNotFound)
}
