use std::{error::Error, sync::Arc};

use axum::{
    async_trait,
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::config::Config;
use db::{club, current_timestamp, user, ActiveValue, Database, DatabaseConnection, EntityTrait};
use hyper::body::{self, Bytes, HttpBody};
use migration::MigratorTrait;
use serde::Serialize;
use tower::ServiceExt;

use crate::{
    auth::{issue_token, TOKEN_COOKIE},
    gateway::{GatewayError, PaymentGateway, PaymentIntent},
};

pub(crate) async fn create_database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("unable to create test database");

    migration::Migrator::up(&db, None)
        .await
        .expect("unable to run migrations");

    db
}

pub(crate) async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    role: user::Role,
) -> user::Model {
    user::Entity::insert(user::ActiveModel {
        name: ActiveValue::Set(String::from("Test User")),
        email: ActiveValue::Set(String::from(email)),
        role: ActiveValue::Set(role),
        created_at: ActiveValue::Set(current_timestamp()),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create user")
}

pub(crate) async fn create_club(db: &DatabaseConnection, name: &str, poster: &str) -> club::Model {
    club::Entity::insert(club::ActiveModel {
        club_name: ActiveValue::Set(String::from(name)),
        university_name: ActiveValue::Set(String::from("Harvard University")),
        university_country: ActiveValue::Set(String::from("USA")),
        category: ActiveValue::Set(String::from("STEM")),
        application_fees: ActiveValue::Set(25.5),
        posted_date: ActiveValue::Set(current_timestamp()),
        posted_user_email: ActiveValue::Set(String::from(poster)),
        ..Default::default()
    })
    .exec_with_returning(db)
    .await
    .expect("unable to create club")
}

/// Session cookie header value for the provided email.
pub(crate) fn session_cookie(email: &str) -> String {
    let token = issue_token(&Config::for_tests().auth, email).expect("unable to issue token");

    format!("{TOKEN_COOKIE}={token}")
}

/// Application router without a configured payment provider.
pub(crate) fn router(db: DatabaseConnection) -> Router {
    crate::app_router(Arc::new(db), Arc::new(Config::for_tests()), None)
}

/// Send a single request to a fresh router.
pub(crate) async fn send(
    db: &DatabaseConnection,
    method: &str,
    uri: &str,
    session: Option<&str>,
    json: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().method(method).uri(uri);

    if let Some(email) = session {
        request = request.header("Cookie", session_cookie(email));
    }

    let body = match json {
        Some(json) => {
            request = request.header("Content-Type", "application/json");
            Body::from_json(json)
        }
        None => Body::empty(),
    };

    let response = router(db.clone())
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.bytes().await;

    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("unable to convert to json")
    };

    (status, json)
}

/// Payment provider that answers with a fixed client secret.
pub(crate) struct FakeGateway;

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(&self, amount: u64, _: &str) -> Result<PaymentIntent, GatewayError> {
        Ok(PaymentIntent {
            client_secret: format!("secret_{amount}"),
        })
    }
}

/// Payment provider that always fails.
pub(crate) struct FailingGateway;

#[async_trait]
impl PaymentGateway for FailingGateway {
    async fn create_intent(&self, _: u64, _: &str) -> Result<PaymentIntent, GatewayError> {
        Err(GatewayError::MissingClientSecret)
    }
}

pub(crate) trait RequestBodyExt: Sized {
    fn from_json<B: Serialize>(val: B) -> Self;
}

impl<T> RequestBodyExt for T
where
    T: HttpBody + From<Vec<u8>>,
{
    fn from_json<B: Serialize>(val: B) -> Self {
        T::from(serde_json::to_vec(&val).expect("unable to serialize"))
    }
}

#[async_trait(?Send)]
pub(crate) trait ResponseBodyExt {
    async fn bytes(self) -> Bytes;

    async fn text(self) -> String;

    async fn json(self) -> serde_json::Value;
}

#[async_trait(?Send)]
impl<T> ResponseBodyExt for T
where
    T: HttpBody,
    T::Error: Error,
{
    async fn bytes(self) -> Bytes {
        body::to_bytes(self)
            .await
            .expect("unable to convert to bytes")
    }

    async fn text(self) -> String {
        String::from_utf8(self.bytes().await.to_vec()).expect("unable to convert to text")
    }

    async fn json(self) -> serde_json::Value {
        serde_json::from_slice(&self.bytes().await).expect("unable to convert to json")
    }
}
