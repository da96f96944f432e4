mod auth;
mod error;
mod gateway;
mod handlers;
mod pagination;
mod validation;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Extension, Router, Server,
};
use common::{config::Config, logging};
use db::{Database, DatabaseConnection};
use gateway::{PaymentGateway, StripeGateway};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::new(None)?;

    logging::init(&config);

    let Some(server_config) = config.server.as_ref() else {
        return Err(anyhow::Error::msg("unable to load server config"));
    };

    info!("connecting to database");
    let database = Arc::new(Database::connect(&config.database.url).await?);
    let server = Server::bind(&server_config.address);

    let gateway = match &config.payments {
        Some(payments) => Some(Arc::new(StripeGateway::new(payments)) as Arc<dyn PaymentGateway>),
        None => {
            warn!("payments are not configured, payment intents are disabled");
            None
        }
    };

    let config = Arc::new(config);

    info!("starting server");
    server
        .serve(app_router(database, config, gateway).into_make_service())
        .await?;

    Ok(())
}

fn app_router(
    database: Arc<DatabaseConnection>,
    config: Arc<Config>,
    gateway: Option<Arc<dyn PaymentGateway>>,
) -> Router {
    let router = Router::new()
        .merge(handlers::session::routes())
        .merge(handlers::stats::routes(database.clone(), config.clone()))
        .merge(handlers::clubs::routes(database.clone(), config.clone()))
        .nest(
            "/users",
            handlers::users::routes(database.clone(), config.clone()),
        )
        .nest(
            "/applications",
            handlers::applications::routes(database.clone(), config.clone()),
        )
        .nest(
            "/moderation",
            handlers::moderation::routes(database.clone(), config.clone()),
        )
        .nest(
            "/reviews",
            handlers::reviews::routes(database.clone(), config.clone()),
        )
        .nest(
            "/payments",
            handlers::payments::routes(database.clone(), config.clone()),
        )
        .layer(cors_layer(&config))
        .layer(Extension(config));

    let router = match gateway {
        Some(gateway) => router.layer(Extension(gateway)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .with_state(database)
}

/// Allow credentialed requests from the configured origins.
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .iter()
        .flat_map(|server| server.origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use common::config::Config;
    use tower::ServiceExt;

    use crate::testing::{create_database, ResponseBodyExt};

    #[tokio::test]
    async fn welcome() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()), None)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.text().await.is_empty());
    }

    #[tokio::test]
    async fn cors_preflight() {
        let db = create_database().await;

        let response = crate::app_router(Arc::new(db), Arc::new(Config::for_tests()), None)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/clubs")
                    .header("Origin", "http://localhost:5173")
                    .header("Access-Control-Request-Method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers()["access-control-allow-credentials"],
            "true"
        );
    }
}
