mod create;
mod delete;
mod details;
mod list;
mod moderator;
mod role;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use common::config::Config;
use db::{user, DatabaseConnection};
use serde::Serialize;

use crate::{auth, handlers::unix_timestamp};

/// Information about a single user.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub role: user::Role,
    pub moderator_for: Option<String>,

    /// Registration time, in unix seconds.
    pub created_at: i64,
}

impl From<user::Model> for UserData {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            photo_url: model.photo_url,
            role: model.role,
            moderator_for: model.moderator_for,
            created_at: unix_timestamp(model.created_at),
        }
    }
}

pub(crate) fn routes(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
) -> Router<Arc<DatabaseConnection>> {
    let member = from_fn_with_state(
        (database.clone(), config.clone()),
        auth::require_authentication::<false, false, _>,
    );

    let admin = from_fn_with_state(
        (database, config),
        auth::require_authentication::<false, true, _>,
    );

    Router::new()
        .route(
            "/",
            post(create::create).merge(get(list::list).route_layer(admin.clone())),
        )
        .route(
            "/:email",
            get(details::details)
                .route_layer(member)
                .merge(delete(delete::delete).route_layer(admin.clone())),
        )
        .route("/:email/role", put(role::role).route_layer(admin.clone()))
        .route(
            "/:email/moderator",
            put(moderator::moderator).route_layer(admin),
        )
}
