use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use db::{application, club, user, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
use futures_util::try_join;
use serde::Serialize;
use tracing::error;

/// Public platform counters.
#[derive(Serialize, Default)]
pub(super) struct HomeStats {
    users: u64,
    applications: u64,
    clubs: u64,
}

async fn count(db: &DatabaseConnection) -> Result<HomeStats, DbErr> {
    let (users, applications, clubs) = try_join!(
        user::Entity::find().count(db),
        application::Entity::find().count(db),
        club::Entity::find().count(db),
    )?;

    Ok(HomeStats {
        users,
        applications,
        clubs,
    })
}

/// Get public platform counters.
///
/// Counters are reported as zeros if they can not be loaded.
pub(super) async fn home(
    State(db): State<Arc<DatabaseConnection>>,
) -> (StatusCode, Json<HomeStats>) {
    match count(&db).await {
        Ok(stats) => (StatusCode::OK, Json(stats)),
        Err(err) => {
            error!("unable to count home page statistics: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(HomeStats::default()))
        }
    }
}
