use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{club, DatabaseConnection, DbErr, EntityTrait};
use derive_more::{Display, Error, From};
use tracing::info;

use crate::{error::impl_error_response, handlers::DeletedResponse};

/// Errors that may occur during the club removal process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ClubDeleteError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Club with the provided identifier does not exist.
    #[display(fmt = "club not found")]
    ClubNotFound,
}

impl_error_response!(ClubDeleteError, Self::ClubNotFound => StatusCode::NOT_FOUND);

/// Remove a club by its identifier.
pub(super) async fn delete(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<DeletedResponse>, ClubDeleteError> {
    let result = club::Entity::delete_by_id(id).exec(&*db).await?;

    if result.rows_affected == 0 {
        return Err(ClubDeleteError::ClubNotFound);
    }

    info!(id, "club removed");

    Ok(Json(DeletedResponse {
        success: true,
        deleted_count: result.rows_affected,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::{club, user::Role, EntityTrait};
    use serde_json::json;

    use crate::testing::{create_club, create_database, create_user, send};

    #[tokio::test]
    async fn removes_club() {
        let db = create_database().await;

        create_user(&db, "moderator@example.com", Role::Moderator).await;
        let club = create_club(&db, "Chess Club", "moderator@example.com").await;

        let (status, body) = send(
            &db,
            "DELETE",
            &format!("/clubs/{}", club.id),
            Some("moderator@example.com"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "deletedCount": 1 }));
        assert!(club::Entity::find_by_id(club.id)
            .one(&db)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unknown_club() {
        let db = create_database().await;

        create_user(&db, "moderator@example.com", Role::Moderator).await;

        let (status, _) = send(
            &db,
            "DELETE",
            "/clubs/42",
            Some("moderator@example.com"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn public_read_stays_open() {
        let db = create_database().await;

        let club = create_club(&db, "Chess Club", "moderator@example.com").await;

        let (status, _) = send(&db, "DELETE", &format!("/clubs/{}", club.id), None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&db, "GET", &format!("/clubs/{}", club.id), None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
