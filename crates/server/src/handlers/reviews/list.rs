use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use db::{review, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;
use serde::Deserialize;

use super::ReviewData;
use crate::error::impl_error_response;

/// Errors that may occur during the review list request.
#[derive(Debug, Display, From, Error)]
pub(super) enum ReviewListError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(ReviewListError);

/// Review filters, combined with logical AND.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReviewListParams {
    #[serde(default)]
    club_id: Option<i64>,

    /// Review author email.
    #[serde(default)]
    email: Option<String>,

    /// Email of the moderator that published the reviewed club.
    #[serde(default)]
    moderator_email: Option<String>,
}

/// List reviews matching all provided filters.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
    Query(params): Query<ReviewListParams>,
) -> Result<Json<Vec<ReviewData>>, ReviewListError> {
    let mut query = review::Entity::find();

    if let Some(club_id) = params.club_id {
        query = query.filter(review::Column::ClubId.eq(club_id));
    }

    if let Some(email) = params.email.filter(|email| !email.is_empty()) {
        query = query.filter(review::Column::UserEmail.eq(email));
    }

    if let Some(email) = params.moderator_email.filter(|email| !email.is_empty()) {
        query = query.filter(review::Column::PostedByEmail.eq(email));
    }

    query
        .order_by_desc(review::Column::Id)
        .stream(&*db)
        .await?
        .map_ok(ReviewData::from)
        .try_collect()
        .await
        .map(Json)
        .map_err(ReviewListError::from)
}
