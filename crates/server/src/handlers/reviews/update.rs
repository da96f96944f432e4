use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use db::{
    current_timestamp, review, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser, error::impl_error_response, handlers::ModifiedResponse,
    validation::ValidatedJson,
};

/// Errors that may occur during the review update process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ReviewUpdateError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "review not found")]
    ReviewNotFound,
}

impl_error_response!(ReviewUpdateError, Self::ReviewNotFound => StatusCode::NOT_FOUND);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReviewUpdateRequest {
    #[validate(length(min = 1))]
    review_comment: String,

    #[validate(range(min = 1, max = 5))]
    rating_point: i16,
}

/// Edit a review of the current user.
pub(super) async fn update(
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ReviewUpdateRequest>,
) -> Result<Json<ModifiedResponse>, ReviewUpdateError> {
    let result = review::Entity::update_many()
        .set(review::ActiveModel {
            review_comment: ActiveValue::Set(request.review_comment),
            rating_point: ActiveValue::Set(request.rating_point),
            review_date: ActiveValue::Set(current_timestamp()),
            ..Default::default()
        })
        .filter(review::Column::Id.eq(id))
        .filter(review::Column::UserEmail.eq(current_user.email()))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ReviewUpdateError::ReviewNotFound);
    }

    Ok(Json(ModifiedResponse {
        success: true,
        modified_count: result.rows_affected,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::{review, EntityTrait};
    use serde_json::json;

    use crate::testing::{create_club, create_database, send};

    #[tokio::test]
    async fn edits_own_review() {
        let db = create_database().await;

        let club = create_club(&db, "Chess Club", "moderator@example.com").await;

        let (_, body) = send(
            &db,
            "POST",
            "/reviews",
            Some("student@example.com"),
            Some(json!({
                "clubId": club.id,
                "userName": "Reviewer",
                "ratingPoint": 2,
                "reviewComment": "Too quiet"
            })),
        )
        .await;

        let uri = format!("/reviews/{}", body["insertedId"]);
        let request = json!({ "ratingPoint": 5, "reviewComment": "Grew on me" });

        let (status, _) = send(
            &db,
            "PUT",
            &uri,
            Some("other@example.com"),
            Some(request.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&db, "PUT", &uri, Some("student@example.com"), Some(request)).await;
        assert_eq!(status, StatusCode::OK);

        let review = review::Entity::find().one(&db).await.unwrap().unwrap();

        assert_eq!(review.rating_point, 5);
        assert_eq!(review.review_comment, "Grew on me");
    }
}
