mod applications;
mod clubs;
mod reject;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get},
    Router,
};
use common::config::Config;
use db::DatabaseConnection;

use crate::auth;

pub(crate) fn routes(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
) -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/clubs", get(clubs::clubs))
        .route("/applications", get(applications::applications))
        .route("/applications/:id", delete(reject::reject))
        .route_layer(from_fn_with_state(
            (database, config),
            auth::require_authentication::<true, false, _>,
        ))
}
