use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use db::{
    listing::{self, ListingQuery},
    DatabaseConnection, DbErr,
};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

use super::ClubData;
use crate::{error::impl_error_response, pagination::Pagination};

/// Errors that may occur during the listing search.
#[derive(Debug, Display, From, Error)]
pub(super) enum ClubListError {
    /// Database-related error.
    DatabaseError(DbErr),
}

impl_error_response!(ClubListError);

/// Listing search query parameters.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ClubListParams {
    #[serde(default)]
    search: Option<String>,

    #[serde(default)]
    category: Option<String>,

    #[serde(default)]
    sort_by: Option<String>,

    #[serde(default)]
    order: Option<String>,

    #[serde(flatten)]
    pagination: Pagination,
}

/// Single page of clubs.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ClubListResponse {
    data: Vec<ClubData>,
    total: u64,
    page: Option<i64>,
    total_pages: Option<u64>,
}

/// Search, sort and paginate club listings.
pub(super) async fn list(
    State(db): State<Arc<DatabaseConnection>>,
    Query(params): Query<ClubListParams>,
) -> Result<Json<ClubListResponse>, ClubListError> {
    let query = ListingQuery {
        page: params.pagination.page(),
        limit: params.pagination.limit(),
        search: params.search,
        category: params.category,
        sort_by: params.sort_by,
        order: params.order,
    };

    let page = listing::search(&*db, &query).await?;

    Ok(Json(ClubListResponse {
        data: page.data.into_iter().map(ClubData::from).collect(),
        total: page.total,
        page: page.page,
        total_pages: page.total_pages,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::{club, ActiveValue, DatabaseConnection, EntityTrait};
    use serde_json::{json, Value};

    use crate::testing::{create_club, create_database, send};

    async fn seed(db: &DatabaseConnection) {
        let clubs = [
            ("Tech Club", "Harvard University", "USA", "Arts", 30.0),
            ("Robotics Society", "ETH Zurich", "Switzerland", "STEM", 10.0),
            ("Debate Union", "University of Oxford", "United Kingdom", "Humanities", 50.0),
            ("Biotech Circle", "University of Tokyo", "Japan", "STEM", 20.0),
            ("Chess Club", "Technion", "Israel", "Games", 40.0),
        ];

        for (name, university, country, category, fees) in clubs {
            let model = create_club(db, name, "moderator@example.com").await;

            club::Entity::update(club::ActiveModel {
                id: ActiveValue::Unchanged(model.id),
                university_name: ActiveValue::Set(String::from(university)),
                university_country: ActiveValue::Set(String::from(country)),
                category: ActiveValue::Set(String::from(category)),
                application_fees: ActiveValue::Set(fees),
                ..Default::default()
            })
            .exec(db)
            .await
            .expect("unable to update club");
        }
    }

    fn names(body: &Value) -> Vec<&str> {
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|club| club["clubName"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn default_page() {
        let db = create_database().await;

        seed(&db).await;

        let (status, body) = send(&db, "GET", "/clubs", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
        assert_eq!(body["page"], 1);
        assert_eq!(body["totalPages"], 1);

        let mut club = body["data"][0].clone();
        let club = club.as_object_mut().unwrap();

        assert!(club.remove("id").unwrap().is_i64());
        assert!(club.remove("postedDate").unwrap().is_i64());
        assert_eq!(
            Value::Object(club.clone()),
            json!({
                "clubName": "Tech Club",
                "universityName": "Harvard University",
                "universityCountry": "USA",
                "universityCity": null,
                "category": "Arts",
                "description": null,
                "image": null,
                "applicationFees": 30.0,
                "postedUserEmail": "moderator@example.com",
            })
        );
    }

    #[tokio::test]
    async fn search_and_category() {
        let db = create_database().await;

        seed(&db).await;

        let (_, body) = send(&db, "GET", "/clubs?search=TECH", None, None).await;

        assert_eq!(names(&body), vec!["Tech Club", "Biotech Circle", "Chess Club"]);

        let (_, body) = send(&db, "GET", "/clubs?search=tech&category=STEM", None, None).await;

        assert_eq!(names(&body), vec!["Biotech Circle"]);
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn wildcards_are_literal() {
        let db = create_database().await;

        seed(&db).await;

        let (_, body) = send(&db, "GET", "/clubs?search=%25", None, None).await;

        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn fee_sorting() {
        let db = create_database().await;

        seed(&db).await;

        let (_, body) = send(&db, "GET", "/clubs?sortBy=fees&order=asc", None, None).await;

        assert_eq!(
            names(&body),
            vec!["Robotics Society", "Biotech Circle", "Tech Club", "Chess Club", "Debate Union"]
        );

        let (_, body) = send(&db, "GET", "/clubs?sortBy=fees&order=sideways", None, None).await;

        assert_eq!(
            names(&body),
            vec!["Debate Union", "Chess Club", "Tech Club", "Biotech Circle", "Robotics Society"]
        );
    }

    #[tokio::test]
    async fn pages() {
        let db = create_database().await;

        for i in 0..10 {
            create_club(&db, &format!("Club {i}"), "moderator@example.com").await;
        }

        let (_, body) = send(&db, "GET", "/clubs?page=2&limit=3", None, None).await;

        assert_eq!(names(&body), vec!["Club 3", "Club 4", "Club 5"]);
        assert_eq!(body["total"], 10);
        assert_eq!(body["page"], 2);
        assert_eq!(body["totalPages"], 4);
    }

    #[tokio::test]
    async fn empty_store() {
        let db = create_database().await;

        let (status, body) = send(&db, "GET", "/clubs", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "data": [],
                "total": 0,
                "page": 1,
                "totalPages": 0,
            })
        );
    }

    #[tokio::test]
    async fn malformed_pagination() {
        let db = create_database().await;

        seed(&db).await;

        let (status, body) = send(&db, "GET", "/clubs?page=abc&limit=0", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "data": [],
                "total": 5,
                "page": null,
                "totalPages": null,
            })
        );
    }

    #[tokio::test]
    async fn page_past_offset_range() {
        let db = create_database().await;

        seed(&db).await;

        let (status, body) = send(
            &db,
            "GET",
            "/clubs?page=4611686018427387904&limit=3",
            None,
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "data": [],
                "total": 5,
                "page": 4611686018427387904_i64,
                "totalPages": 2,
            })
        );
    }
}
