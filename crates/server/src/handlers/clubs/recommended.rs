use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use db::{club, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect};
use derive_more::{Display, Error, From};
use serde::Deserialize;

use super::ClubData;
use crate::error::impl_error_response;

/// Maximum amount of recommended clubs.
const RECOMMENDED_CLUBS: u64 = 4;

/// Errors that may occur during the recommendations request.
#[derive(Debug, Display, From, Error)]
pub(super) enum RecommendedClubsError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "category is required")]
    MissingCategory,
}

impl_error_response!(
    RecommendedClubsError,
    Self::MissingCategory => StatusCode::BAD_REQUEST,
);

/// Recommendation query parameters.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RecommendedClubsParams {
    #[serde(default)]
    category: Option<String>,

    /// Club that is currently displayed to the user.
    #[serde(default)]
    current_id: Option<i64>,
}

/// List clubs of the same category as the currently displayed one.
pub(super) async fn recommended(
    State(db): State<Arc<DatabaseConnection>>,
    Query(params): Query<RecommendedClubsParams>,
) -> Result<Json<Vec<ClubData>>, RecommendedClubsError> {
    let category = params
        .category
        .filter(|category| !category.is_empty())
        .ok_or(RecommendedClubsError::MissingCategory)?;

    let mut query = club::Entity::find().filter(club::Column::Category.eq(category));

    if let Some(current_id) = params.current_id {
        query = query.filter(club::Column::Id.ne(current_id));
    }

    let clubs = query.limit(RECOMMENDED_CLUBS).all(&*db).await?;

    Ok(Json(clubs.into_iter().map(ClubData::from).collect()))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::testing::{create_club, create_database, send};

    #[tokio::test]
    async fn excludes_current_club() {
        let db = create_database().await;

        let mut ids = Vec::new();

        for i in 0..6 {
            ids.push(create_club(&db, &format!("Club {i}"), "moderator@example.com").await.id);
        }

        let (status, body) = send(
            &db,
            "GET",
            &format!("/rec/clubs?category=STEM&currentId={}", ids[0]),
            None,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let clubs = body.as_array().unwrap();

        assert_eq!(clubs.len(), 4);
        assert!(clubs.iter().all(|club| club["id"] != ids[0]));
    }

    #[tokio::test]
    async fn other_categories_are_skipped() {
        let db = create_database().await;

        create_club(&db, "Chess Club", "moderator@example.com").await;

        let (status, body) = send(&db, "GET", "/rec/clubs?category=Arts", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn category_is_required() {
        let db = create_database().await;

        let (status, body) = send(&db, "GET", "/rec/clubs?currentId=1", None, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "category is required" }));
    }
}
