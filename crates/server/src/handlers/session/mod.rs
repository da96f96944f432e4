mod issue;
mod logout;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use db::DatabaseConnection;

pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", get(welcome))
        .route("/jwt", post(issue::issue))
        .route("/logout", post(logout::logout))
}

async fn welcome() -> &'static str {
    "Club membership server is running"
}
