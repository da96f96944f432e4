use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use db::{
    application, current_timestamp, payment, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QuerySelect, SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser, error::impl_error_response, handlers::InsertedResponse,
    validation::ValidatedJson,
};

/// Errors that may occur while recording a payment.
#[derive(Debug, Display, From, Error)]
pub(super) enum PaymentRecordError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Transaction with the same identifier was already recorded.
    #[display(fmt = "payment already recorded")]
    DuplicateTransaction,

    #[display(fmt = "application not found")]
    ApplicationNotFound,
}

impl_error_response!(
    PaymentRecordError,
    Self::DuplicateTransaction => StatusCode::CONFLICT,
    Self::ApplicationNotFound => StatusCode::NOT_FOUND,
);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaymentRecordRequest {
    /// Payment provider transaction identifier.
    #[validate(length(min = 1))]
    transaction_id: String,

    #[validate(range(min = 0.0))]
    amount: f64,

    club_id: Option<i64>,

    /// Application that is paid by this transaction.
    application_id: Option<i64>,
}

/// Record a completed payment of the current user.
pub(super) async fn record(
    Extension(current_user): Extension<AuthenticatedUser>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<PaymentRecordRequest>,
) -> Result<Json<InsertedResponse>, PaymentRecordError> {
    db.transaction(|txn| {
        Box::pin(async move {
            let duplicate = payment::Entity::find()
                .select_only()
                .filter(payment::Column::TransactionId.eq(request.transaction_id.as_str()))
                .exists(txn)
                .await?;

            if duplicate {
                return Err(PaymentRecordError::DuplicateTransaction);
            }

            if let Some(application_id) = request.application_id {
                let result = application::Entity::update_many()
                    .set(application::ActiveModel {
                        payment: ActiveValue::Set(application::PaymentStatus::Paid),
                        ..Default::default()
                    })
                    .filter(application::Column::Id.eq(application_id))
                    .filter(application::Column::Applicant.eq(current_user.email()))
                    .exec(txn)
                    .await?;

                if result.rows_affected == 0 {
                    return Err(PaymentRecordError::ApplicationNotFound);
                }
            }

            let model = payment::Entity::insert(payment::ActiveModel {
                transaction_id: ActiveValue::Set(request.transaction_id),
                email: ActiveValue::Set(current_user.email().to_owned()),
                amount: ActiveValue::Set(request.amount),
                club_id: ActiveValue::Set(request.club_id),
                application_id: ActiveValue::Set(request.application_id),
                created_at: ActiveValue::Set(current_timestamp()),
                ..Default::default()
            })
            .exec_with_returning(txn)
            .await?;

            info!(id = model.id, "payment recorded");

            Ok(Json(InsertedResponse {
                success: true,
                inserted_id: model.id,
            }))
        })
    })
    .await
    .into_raw_result()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::{application, payment, EntityTrait, PaginatorTrait};
    use serde_json::json;

    use crate::testing::{create_club, create_database, send};

    async fn submit(db: &db::DatabaseConnection) -> (i64, i64) {
        let club = create_club(db, "Chess Club", "moderator@example.com").await;

        let (_, body) = send(
            db,
            "POST",
            "/applications",
            Some("student@example.com"),
            Some(json!({ "clubId": club.id, "userName": "Ada" })),
        )
        .await;

        (club.id, body["insertedId"].as_i64().unwrap())
    }

    #[tokio::test]
    async fn marks_application_paid() {
        let db = create_database().await;

        let (club_id, application_id) = submit(&db).await;

        let (status, body) = send(
            &db,
            "POST",
            "/payments",
            Some("student@example.com"),
            Some(json!({
                "transactionId": "pi_1",
                "amount": 25.5,
                "clubId": club_id,
                "applicationId": application_id
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let application = application::Entity::find_by_id(application_id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(application.payment, application::PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn duplicate_transaction() {
        let db = create_database().await;

        let request = json!({ "transactionId": "pi_1", "amount": 10 });

        let (status, _) = send(
            &db,
            "POST",
            "/payments",
            Some("student@example.com"),
            Some(request.clone()),
        )
        .await;

        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &db,
            "POST",
            "/payments",
            Some("student@example.com"),
            Some(request),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "message": "payment already recorded" }));
        assert_eq!(payment::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn foreign_application_is_rolled_back() {
        let db = create_database().await;

        let (_, application_id) = submit(&db).await;

        let (status, _) = send(
            &db,
            "POST",
            "/payments",
            Some("other@example.com"),
            Some(json!({
                "transactionId": "pi_2",
                "amount": 25.5,
                "applicationId": application_id
            })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payment::Entity::find().count(&db).await.unwrap(), 0);
    }
}
