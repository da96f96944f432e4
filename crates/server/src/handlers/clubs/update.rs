use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use db::{
    club, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};
use derive_more::{Display, Error, From};
use serde::Deserialize;
use validator::Validate;

use crate::{error::impl_error_response, handlers::ModifiedResponse, validation::ValidatedJson};

/// Errors that may occur during the club update process.
#[derive(Debug, Display, From, Error)]
pub(super) enum ClubUpdateError {
    /// Database-related error.
    DatabaseError(DbErr),

    /// Request body does not contain any field to update.
    #[display(fmt = "no fields to update")]
    EmptyUpdate,

    /// Club with the provided identifier does not exist.
    #[display(fmt = "club not found")]
    ClubNotFound,
}

impl_error_response!(
    ClubUpdateError,
    Self::EmptyUpdate => StatusCode::BAD_REQUEST,
    Self::ClubNotFound => StatusCode::NOT_FOUND,
);

/// JSON request body.
///
/// Absent fields are left untouched.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub(super) struct ClubUpdateRequest {
    #[validate(length(min = 1))]
    club_name: Option<String>,

    #[validate(length(min = 1))]
    university_name: Option<String>,

    #[validate(length(min = 1))]
    university_country: Option<String>,

    university_city: Option<String>,

    #[validate(length(min = 1))]
    category: Option<String>,

    description: Option<String>,

    image: Option<String>,

    #[validate(range(min = 0.0))]
    application_fees: Option<f64>,
}

impl ClubUpdateRequest {
    fn into_active_model(self) -> club::ActiveModel {
        fn set<T: Into<db::sea_query::Value>>(value: Option<T>) -> ActiveValue<T> {
            value.map_or(ActiveValue::NotSet, ActiveValue::Set)
        }

        club::ActiveModel {
            club_name: set(self.club_name),
            university_name: set(self.university_name),
            university_country: set(self.university_country),
            university_city: self
                .university_city
                .map_or(ActiveValue::NotSet, |city| ActiveValue::Set(Some(city))),
            category: set(self.category),
            description: self
                .description
                .map_or(ActiveValue::NotSet, |text| ActiveValue::Set(Some(text))),
            image: self
                .image
                .map_or(ActiveValue::NotSet, |image| ActiveValue::Set(Some(image))),
            application_fees: set(self.application_fees),
            ..Default::default()
        }
    }
}

/// Update provided club fields.
pub(super) async fn update(
    Path(id): Path<i64>,
    State(db): State<Arc<DatabaseConnection>>,
    ValidatedJson(request): ValidatedJson<ClubUpdateRequest>,
) -> Result<Json<ModifiedResponse>, ClubUpdateError> {
    let model = request.into_active_model();

    if !model.is_changed() {
        return Err(ClubUpdateError::EmptyUpdate);
    }

    let result = club::Entity::update_many()
        .set(model)
        .filter(club::Column::Id.eq(id))
        .exec(&*db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ClubUpdateError::ClubNotFound);
    }

    Ok(Json(ModifiedResponse {
        success: true,
        modified_count: result.rows_affected,
    }))
}
