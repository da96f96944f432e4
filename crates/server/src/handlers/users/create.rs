use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use db::{
    current_timestamp, user, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect, SelectExt, TransactionErrorExt, TransactionTrait,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::{error::impl_error_response, handlers::InsertedResponse, validation::ValidatedJson};

/// Errors that may occur during the user registration process.
#[derive(Debug, Display, From, Error)]
pub(super) enum UserCreateError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// User with the provided email is already registered.
    #[display(fmt = "user already exists")]
    UserExists,
}

impl_error_response!(UserCreateError, Self::UserExists => StatusCode::CONFLICT);

/// JSON request body.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserCreateRequest {
    #[validate(length(min = 1))]
    name: String,

    #[validate(email)]
    email: String,

    photo_url: Option<String>,
}

/// Register a new user profile with the default role.
pub(super) async fn create(
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<UserCreateRequest>,
) -> Result<Json<InsertedResponse>, UserCreateError> {
    db.transaction(|txn| {
        Box::pin(async move {
            let exists = user::Entity::find()
                .select_only()
                .filter(user::Column::Email.eq(request.email.as_str()))
                .exists(txn)
                .await?;

            if exists {
                return Err(UserCreateError::UserExists);
            }

            let model = user::Entity::insert(user::ActiveModel {
                name: ActiveValue::Set(request.name),
                email: ActiveValue::Set(request.email),
                photo_url: ActiveValue::Set(request.photo_url),
                role: ActiveValue::Set(user::Role::Student),
                created_at: ActiveValue::Set(current_timestamp()),
                ..Default::default()
            })
            .exec_with_returning(txn)
            .await?;

            info!(id = model.id, "user registered");

            Ok(Json(InsertedResponse {
                success: true,
                inserted_id: model.id,
            }))
        })
    })
    .await
    .into_raw_result()
}
