mod create;
mod delete;
mod details;
mod home;
mod list;
mod recommended;
mod update;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use common::config::Config;
use db::{club, DatabaseConnection};
use serde::Serialize;

use crate::{auth, handlers::unix_timestamp};

/// Information about a single club.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubData {
    pub id: i64,
    pub club_name: String,
    pub university_name: String,
    pub university_country: String,
    pub university_city: Option<String>,
    pub category: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub application_fees: f64,

    /// Publication time, in unix seconds.
    pub posted_date: i64,
    pub posted_user_email: String,
}

impl From<club::Model> for ClubData {
    fn from(model: club::Model) -> Self {
        Self {
            id: model.id,
            club_name: model.club_name,
            university_name: model.university_name,
            university_country: model.university_country,
            university_city: model.university_city,
            category: model.category,
            description: model.description,
            image: model.image,
            application_fees: model.application_fees,
            posted_date: unix_timestamp(model.posted_date),
            posted_user_email: model.posted_user_email,
        }
    }
}

pub(crate) fn routes(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
) -> Router<Arc<DatabaseConnection>> {
    let moderator = from_fn_with_state(
        (database, config),
        auth::require_authentication::<true, false, _>,
    );

    Router::new()
        .route(
            "/clubs",
            get(list::list).merge(post(create::create).route_layer(moderator.clone())),
        )
        .route(
            "/clubs/:id",
            get(details::details).merge(
                put(update::update)
                    .delete(delete::delete)
                    .route_layer(moderator),
            ),
        )
        .route("/home/clubs", get(home::home))
        .route("/rec/clubs", get(recommended::recommended))
}
