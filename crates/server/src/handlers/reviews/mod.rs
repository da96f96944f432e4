mod create;
mod delete;
mod list;
mod update;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use common::config::Config;
use db::{review, DatabaseConnection};
use serde::Serialize;

use crate::{auth, handlers::unix_timestamp};

/// Information about a single review.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewData {
    pub id: i64,
    pub club_id: i64,
    pub club_name: String,
    pub university_name: String,
    pub user_name: String,
    pub user_email: String,
    pub user_image: Option<String>,
    pub posted_by_email: String,
    pub rating_point: i16,
    pub review_comment: String,

    /// Last modification time, in unix seconds.
    pub review_date: i64,
}

impl From<review::Model> for ReviewData {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            club_id: model.club_id,
            club_name: model.club_name,
            university_name: model.university_name,
            user_name: model.user_name,
            user_email: model.user_email,
            user_image: model.user_image,
            posted_by_email: model.posted_by_email,
            rating_point: model.rating_point,
            review_comment: model.review_comment,
            review_date: unix_timestamp(model.review_date),
        }
    }
}

pub(crate) fn routes(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
) -> Router<Arc<DatabaseConnection>> {
    let member = from_fn_with_state(
        (database, config),
        auth::require_authentication::<false, false, _>,
    );

    Router::new()
        .route(
            "/",
            get(list::list).merge(post(create::create).route_layer(member.clone())),
        )
        .route(
            "/:id",
            put(update::update)
                .delete(delete::delete)
                .route_layer(member),
        )
}
