mod analytics;
mod home;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use common::config::Config;
use db::DatabaseConnection;

use crate::auth;

pub(crate) fn routes(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
) -> Router<Arc<DatabaseConnection>> {
    let admin_routes = Router::new()
        .route("/analytics/stats", get(analytics::analytics))
        .route_layer(from_fn_with_state(
            (database, config),
            auth::require_authentication::<false, true, _>,
        ));

    Router::new()
        .route("/home/stats", get(home::home))
        .merge(admin_routes)
}
