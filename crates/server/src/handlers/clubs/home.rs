use std::sync::Arc;

use axum::{extract::State, Json};
use db::{club, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use derive_more::{Display, Error, From};

use super::ClubData;
use crate::error::impl_error_response;

/// Amount of clubs featured on the home page.
const FEATURED_CLUBS: u64 = 6;

/// Errors that may occur during the featured clubs request.
#[derive(Debug, Display, From, Error)]
pub(super) enum HomeClubsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(HomeClubsError);

/// List clubs featured on the home page.
pub(super) async fn home(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<ClubData>>, HomeClubsError> {
    let clubs = club::Entity::find()
        .order_by_asc(club::Column::Id)
        .limit(FEATURED_CLUBS)
        .all(&*db)
        .await?;

    Ok(Json(clubs.into_iter().map(ClubData::from).collect()))
}
