mod create;
mod delete;
mod details;
mod feedback;
mod list;
mod status;
mod update;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, routing::put, Router};
use common::config::Config;
use db::{application, DatabaseConnection};
use serde::Serialize;

use crate::{auth, handlers::unix_timestamp};

/// Information about a single membership application.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationData {
    pub id: i64,
    pub club_id: i64,
    pub club_name: String,
    pub university_name: String,
    pub fees: f64,
    pub moderator_email: String,
    pub applicant: String,
    pub user_name: String,

    /// Submission time, in unix seconds.
    pub applied_date: i64,
    pub status: application::Status,
    pub payment: application::PaymentStatus,
    pub feedback: Option<String>,
}

impl From<application::Model> for ApplicationData {
    fn from(model: application::Model) -> Self {
        Self {
            id: model.id,
            club_id: model.club_id,
            club_name: model.club_name,
            university_name: model.university_name,
            fees: model.fees,
            moderator_email: model.moderator_email,
            applicant: model.applicant,
            user_name: model.user_name,
            applied_date: unix_timestamp(model.applied_date),
            status: model.status,
            payment: model.payment,
            feedback: model.feedback,
        }
    }
}

pub(crate) fn routes(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
) -> Router<Arc<DatabaseConnection>> {
    let member_routes = Router::new()
        .route("/", get(list::list).post(create::create))
        .route(
            "/:id",
            get(details::details)
                .put(update::update)
                .delete(delete::delete),
        )
        .route_layer(from_fn_with_state(
            (database.clone(), config.clone()),
            auth::require_authentication::<false, false, _>,
        ));

    let moderator_routes = Router::new()
        .route("/:id/status", put(status::status))
        .route("/:id/feedback", put(feedback::feedback))
        .route_layer(from_fn_with_state(
            (database, config),
            auth::require_authentication::<true, false, _>,
        ));

    Router::new().merge(member_routes).merge(moderator_routes)
}
