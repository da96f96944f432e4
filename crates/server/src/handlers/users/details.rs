use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{user, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use derive_more::{Display, Error, From};

use super::UserData;
use crate::error::impl_error_response;

/// Errors that may occur during the user details request.
#[derive(Debug, Display, From, Error)]
pub(super) enum UserDetailsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "user not found")]
    UserNotFound,
}

impl_error_response!(UserDetailsError, Self::UserNotFound => StatusCode::NOT_FOUND);

/// Get user profile by email.
pub(super) async fn details(
    Path(email): Path<String>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<UserData>, UserDetailsError> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&*db)
        .await?
        .map(UserData::from)
        .map(Json)
        .ok_or(UserDetailsError::UserNotFound)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::user::Role;

    use crate::testing::{create_database, create_user, send};

    #[tokio::test]
    async fn existing_user() {
        let db = create_database().await;

        create_user(&db, "moderator@example.com", Role::Moderator).await;

        let (status, body) = send(
            &db,
            "GET",
            "/users/moderator@example.com",
            Some("student@example.com"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "moderator@example.com");
        assert_eq!(body["role"], "Moderator");
    }

    #[tokio::test]
    async fn unknown_user() {
        let db = create_database().await;

        let (status, _) = send(
            &db,
            "GET",
            "/users/nobody@example.com",
            Some("student@example.com"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn session_is_required() {
        let db = create_database().await;

        let (status, _) = send(&db, "GET", "/users/nobody@example.com", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
