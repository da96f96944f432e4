use std::sync::Arc;

use axum::{Extension, Json};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use common::config::Config;
use derive_more::{Display, Error, From};
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use crate::{
    auth::{issue_token, TOKEN_COOKIE},
    error::impl_error_response,
    handlers::SuccessResponse,
    validation::ValidatedJson,
};

/// Errors that may occur during the session issuing process.
#[derive(Debug, Display, From, Error)]
pub(super) enum SessionIssueError {
    /// Unable to sign a session token.
    TokenError(jsonwebtoken::errors::Error),
}

impl_error_response!(SessionIssueError);

/// JSON request body.
#[derive(Deserialize, Validate)]
pub(super) struct SessionIssueRequest {
    /// Identity the session is issued for.
    #[validate(email)]
    email: String,
}

/// Issue a session token cookie.
pub(super) async fn issue(
    Extension(config): Extension<Arc<Config>>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<SessionIssueRequest>,
) -> Result<(CookieJar, Json<SuccessResponse>), SessionIssueError> {
    let token = issue_token(&config.auth, &request.email)?;

    debug!(email = %request.email, "issued session token");

    let cookie = Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(config.auth.secure)
        .same_site(SameSite::None)
        .max_age(time::Duration::seconds(config.auth.lifespan as i64))
        .finish();

    Ok((jar.add(cookie), Json(SuccessResponse { success: true })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header::SET_COOKIE, Request, StatusCode},
    };
    use common::config::Config;
    use db::user::Role;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::testing::{create_database, create_user, RequestBodyExt, ResponseBodyExt};

    #[tokio::test]
    async fn issued_cookie_opens_member_routes() {
        let db = create_database().await;

        create_user(&db, "student@example.com", Role::Student).await;

        let router = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()), None);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/jwt")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({ "email": "student@example.com" })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response.headers()[SET_COOKIE]
            .to_str()
            .unwrap()
            .to_owned();

        assert!(set_cookie.starts_with("token="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("SameSite=None"));
        assert!(set_cookie.contains("Max-Age=3600"));
        assert_eq!(response.json().await, json!({ "success": true }));

        let cookie = set_cookie
            .split(';')
            .next()
            .unwrap()
            .to_owned();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/users/student@example.com")
                    .header("Cookie", cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_email() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()), None)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/jwt")
                    .header("Content-Type", "application/json")
                    .body(Body::from_json(json!({ "email": "not an email" })))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
