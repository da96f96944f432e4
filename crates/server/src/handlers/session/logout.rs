use axum::Json;
use axum_extra::extract::{cookie::Cookie, CookieJar};

use crate::{auth::TOKEN_COOKIE, handlers::SuccessResponse};

/// Clear the session token cookie.
pub(super) async fn logout(jar: CookieJar) -> (CookieJar, Json<SuccessResponse>) {
    let jar = jar.remove(Cookie::build(TOKEN_COOKIE, "").path("/").finish());

    (jar, Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header::SET_COOKIE, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::testing::{create_database, router, session_cookie};

    #[tokio::test]
    async fn clears_cookie() {
        let db = create_database().await;

        let response = router(db)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .header("Cookie", session_cookie("student@example.com"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();

        assert!(set_cookie.starts_with("token="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
