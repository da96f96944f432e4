use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use db::{
    club, current_timestamp, review, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser, error::impl_error_response, handlers::InsertedResponse,
    validation::ValidatedJson,
};

/// Errors that may occur during the review creation process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ReviewCreateError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "club not found")]
    ClubNotFound,
}

impl_error_response!(ReviewCreateError, Self::ClubNotFound => StatusCode::NOT_FOUND);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReviewCreateRequest {
    club_id: i64,

    #[validate(length(min = 1))]
    user_name: String,

    user_image: Option<String>,

    #[validate(range(min = 1, max = 5))]
    rating_point: i16,

    #[validate(length(min = 1))]
    review_comment: String,
}

/// Leave a review for a club.
pub(super) async fn create(
    Extension(current_user): Extension<AuthenticatedUser>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ReviewCreateRequest>,
) -> Result<Json<InsertedResponse>, ReviewCreateError> {
    db.transaction(|txn| {
        Box::pin(async move {
            let club = club::Entity::find_by_id(request.club_id)
                .one(txn)
                .await?
                .ok_or(ReviewCreateError::ClubNotFound)?;

            let model = review::Entity::insert(review::ActiveModel {
                club_id: ActiveValue::Set(club.id),
                club_name: ActiveValue::Set(club.club_name),
                university_name: ActiveValue::Set(club.university_name),
                user_name: ActiveValue::Set(request.user_name),
                user_email: ActiveValue::Set(current_user.email().to_owned()),
                user_image: ActiveValue::Set(request.user_image),
                posted_by_email: ActiveValue::Set(club.posted_user_email),
                rating_point: ActiveValue::Set(request.rating_point),
                review_comment: ActiveValue::Set(request.review_comment),
                review_date: ActiveValue::Set(current_timestamp()),
                ..Default::default()
            })
            .exec_with_returning(txn)
            .await?;

            Ok(Json(InsertedResponse {
                success: true,
                inserted_id: model.id,
            }))
        })
    })
    .await
    .into_raw_result()
}
