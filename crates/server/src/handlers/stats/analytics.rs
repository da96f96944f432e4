use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, http::StatusCode, Json};
use db::{
    application, club, payment, user, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QuerySelect,
};
use futures_util::try_join;
use serde::Serialize;
use tracing::error;

/// Administrator dashboard statistics.
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyticsStats {
    users_count: u64,
    clubs_count: u64,

    /// Sum of all recorded payments.
    total_fees: f64,
    app_count_per_university: BTreeMap<String, i64>,
}

async fn collect(db: &DatabaseConnection) -> Result<AnalyticsStats, DbErr> {
    let total_fees = payment::Entity::find()
        .select_only()
        .column_as(payment::Column::Amount.sum(), "total_fees")
        .into_tuple::<Option<f64>>()
        .one(db);

    let per_university = application::Entity::find()
        .select_only()
        .column(application::Column::UniversityName)
        .column_as(application::Column::Id.count(), "applications")
        .group_by(application::Column::UniversityName)
        .into_tuple::<(String, i64)>()
        .all(db);

    let (users_count, clubs_count, total_fees, per_university) = try_join!(
        user::Entity::find().count(db),
        club::Entity::find().count(db),
        total_fees,
        per_university,
    )?;

    Ok(AnalyticsStats {
        users_count,
        clubs_count,
        total_fees: total_fees.flatten().unwrap_or_default(),
        app_count_per_university: per_university.into_iter().collect(),
    })
}

/// Get administrator dashboard statistics.
///
/// Statistics are reported as zeros if they can not be loaded.
pub(super) async fn analytics(
    State(db): State<Arc<DatabaseConnection>>,
) -> (StatusCode, Json<AnalyticsStats>) {
    match collect(&db).await {
        Ok(stats) => (StatusCode::OK, Json(stats)),
        Err(err) => {
            error!("unable to collect analytics: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalyticsStats::default()),
            )
        }
    }
}
