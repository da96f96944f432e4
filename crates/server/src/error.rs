use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// JSON error response body.
#[derive(Serialize)]
pub(crate) struct ErrorBody {
    /// Human-readable error message.
    pub(crate) message: String,
}

/// Convert an error into a JSON response with the provided status code.
///
/// Server-side errors are logged. Details of internal errors are not sent
/// to a client.
pub(crate) fn error_response<E: Display>(status: StatusCode, err: &E) -> Response {
    if status.is_server_error() {
        error!(status = status.as_u16(), "request failed: {err}");
    }

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        String::from("internal server error")
    } else {
        err.to_string()
    };

    (status, Json(ErrorBody { message })).into_response()
}

/// Implement [`IntoResponse`] for a handler error type.
///
/// Each listed pattern is mapped to its status code, every other variant
/// is treated as an internal server error.
///
/// Error types that also derive [`derive_more::Error`] must derive [`Debug`]
/// themselves, nothing here provides it.
macro_rules! impl_error_response {
    ($type:ty $(, $variant:pat => $status:expr)* $(,)?) => {
        impl ::axum::response::IntoResponse for $type {
            fn into_response(self) -> ::axum::response::Response {
                #[allow(unreachable_patterns)]
                let status = match &self {
                    $($variant => $status,)*
                    _ => ::axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                };

                $crate::error::error_response(status, &self)
            }
        }
    };
}

pub(crate) use impl_error_response;

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use db::DbErr;
    use derive_more::{Display, Error, From};

    use crate::testing::ResponseBodyExt;

    #[derive(Display)]
    enum TestError {
        #[display(fmt = "connection refused")]
        Internal,

        #[display(fmt = "club not found")]
        NotFound,
    }

    impl_error_response!(TestError, Self::NotFound => StatusCode::NOT_FOUND);

    #[tokio::test]
    async fn client_errors_keep_message() {
        let response = TestError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json().await,
            serde_json::json!({ "message": "club not found" })
        );
    }

    #[tokio::test]
    async fn server_errors_are_hidden() {
        let response = TestError::Internal.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json().await,
            serde_json::json!({ "message": "internal server error" })
        );
    }

    #[derive(Debug, Display, From, Error)]
    enum HandlerError {
        DatabaseError(DbErr),
    }

    impl_error_response!(HandlerError);

    #[tokio::test]
    async fn handler_errors_are_std_errors() {
        let err: Box<dyn std::error::Error> =
            Box::new(HandlerError::from(DbErr::Custom(String::from("connection lost"))));

        assert!(format!("{err:?}").contains("connection lost"));

        let response = HandlerError::DatabaseError(DbErr::Custom(String::from("timeout")))
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
