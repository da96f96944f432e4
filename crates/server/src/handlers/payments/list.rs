use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use db::{payment, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use derive_more::{Display, Error, From};
use futures_util::TryStreamExt;

use super::PaymentData;
use crate::{auth::AuthenticatedUser, error::impl_error_response};

/// Errors that may occur during the payment history request.
#[derive(Debug, Display, From, Error)]
pub(super) enum PaymentListError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(PaymentListError);

/// List payments of the current user.
pub(super) async fn list(
    Extension(current_user): Extension<AuthenticatedUser>,
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<PaymentData>>, PaymentListError> {
    payment::Entity::find()
        .filter(payment::Column::Email.eq(current_user.email()))
        .order_by_desc(payment::Column::Id)
        .stream(&*db)
        .await?
        .map_ok(PaymentData::from)
        .try_collect()
        .await
        .map(Json)
        .map_err(PaymentListError::from)
}
