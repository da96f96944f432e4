mod intent;
mod list;
mod record;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, routing::post, Router};
use common::config::Config;
use db::{payment, DatabaseConnection};
use serde::Serialize;

use crate::{auth, handlers::unix_timestamp};

/// Information about a single recorded payment.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub id: i64,
    pub transaction_id: String,
    pub email: String,
    pub amount: f64,
    pub club_id: Option<i64>,
    pub application_id: Option<i64>,

    /// Record time, in unix seconds.
    pub created_at: i64,
}

impl From<payment::Model> for PaymentData {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id,
            transaction_id: model.transaction_id,
            email: model.email,
            amount: model.amount,
            club_id: model.club_id,
            application_id: model.application_id,
            created_at: unix_timestamp(model.created_at),
        }
    }
}

pub(crate) fn routes(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
) -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", get(list::list).post(record::record))
        .route("/intent", post(intent::intent))
        .route_layer(from_fn_with_state(
            (database, config),
            auth::require_authentication::<false, false, _>,
        ))
}
