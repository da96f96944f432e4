use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use db::{club, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;

use crate::{auth::AuthenticatedUser, error::impl_error_response, handlers::clubs::ClubData};

/// Errors that may occur during the posted clubs request.
#[derive(Debug, Display, From, Error)]
pub(super) enum PostedClubsError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(PostedClubsError);

/// List clubs published by the current moderator.
pub(super) async fn clubs(
    Extension(current_user): Extension<AuthenticatedUser>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<ClubData>>, PostedClubsError> {
    club::Entity::find()
        .filter(club::Column::PostedUserEmail.eq(current_user.email()))
        .order_by_desc(club::Column::PostedDate)
        .stream(&*db)
        .await?
        .map_ok(ClubData::from)
        .try_collect()
        .await
        .map(Json)
        .map_err(PostedClubsError::from)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::user::Role;

    use crate::testing::{create_club, create_database, create_user, send};

    #[tokio::test]
    async fn own_clubs_only() {
        let db = create_database().await;

        create_user(&db, "moderator@example.com", Role::Moderator).await;
        create_club(&db, "Chess Club", "moderator@example.com").await;
        create_club(&db, "Debate Union", "other@example.com").await;

        let (status, body) = send(
            &db,
            "GET",
            "/moderation/clubs",
            Some("moderator@example.com"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let clubs = body.as_array().unwrap();

        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0]["clubName"], "Chess Club");
    }
}
