use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use db::{
    application, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use crate::{
    auth::AuthenticatedUser, error::impl_error_response, handlers::ModifiedResponse,
    validation::ValidatedJson,
};

/// Errors that may occur during the application update process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ApplicationUpdateError {
    /// Database-related error.
    DatabaseError(DbErr),

    #[display(fmt = "no fields to update")]
    EmptyUpdate,

    #[display(fmt = "application not found")]
    ApplicationNotFound,
}

impl_error_response!(
    ApplicationUpdateError,
    Self::EmptyUpdate => StatusCode::BAD_REQUEST,
    Self::ApplicationNotFound => StatusCode::NOT_FOUND,
);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApplicationUpdateRequest {
    #[validate(length(min = 1))]
    user_name: Option<String>,

    payment: Option<application::PaymentStatus>,
}

/// Update an application of the current user.
pub(super) async fn update(
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ApplicationUpdateRequest>,
) -> Result<Json<ModifiedResponse>, ApplicationUpdateError> {
    let model = application::ActiveModel {
        user_name: request
            .user_name
            .map_or(ActiveValue::NotSet, ActiveValue::Set),
        payment: request.payment.map_or(ActiveValue::NotSet, ActiveValue::Set),
        ..Default::default()
    };

    if !model.is_changed() {
        return Err(ApplicationUpdateError::EmptyUpdate);
    }

    let result = application::Entity::update_many()
        .set(model)
        .filter(application::Column::Id.eq(id))
        .filter(application::Column::Applicant.eq(current_user.email()))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ApplicationUpdateError::ApplicationNotFound);
    }

    Ok(Json(ModifiedResponse {
        success: true,
        modified_count: result.rows_affected,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::{application, EntityTrait};
    use serde_json::json;

    use crate::testing::{create_club, create_database, send};

    #[tokio::test]
    async fn updates_own_application() {
        let db = create_database().await;

        let club = create_club(&db, "Chess Club", "moderator@example.com").await;

        let (_, body) = send(
            &db,
            "POST",
            "/applications",
            Some("student@example.com"),
            Some(json!({ "clubId": club.id, "userName": "Ada" })),
        )
        .await;

        let uri = format!("/applications/{}", body["insertedId"]);

        let (status, _) = send(
            &db,
            "PUT",
            &uri,
            Some("other@example.com"),
            Some(json!({ "userName": "Mallory" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &db,
            "PUT",
            &uri,
            Some("student@example.com"),
            Some(json!({ "userName": "Ada Lovelace", "payment": "paid" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "modifiedCount": 1 }));

        let application = application::Entity::find().one(&db).await.unwrap().unwrap();

        assert_eq!(application.user_name, "Ada Lovelace");
        assert_eq!(application.payment, application::PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn empty_body() {
        let db = create_database().await;

        let (status, _) = send(
            &db,
            "PUT",
            "/applications/1",
            Some("student@example.com"),
            Some(json!({})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
