use std::sync::Arc;

use axum::{
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use common::config::{Auth, Config};
use db::{
    user, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, OffsetDateTime, QueryFilter,
    QuerySelect,
};
use derive_more::{Display, Error, From};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::impl_error_response;

/// Name of the cookie that carries a session token.
pub(crate) const TOKEN_COOKIE: &str = "token";

/// State required by the authentication middleware.
pub(crate) type AuthState = (Arc<DatabaseConnection>, Arc<Config>);

/// Identity of the user that sent the current request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AuthenticatedUser(String);

impl AuthenticatedUser {
    /// Get the email of the authenticated user.
    pub fn email(&self) -> &str {
        &self.0
    }
}

/// Session token claims.
#[derive(Serialize, Deserialize)]
struct Claims {
    email: String,
    exp: u64,
}

/// Sign a new session token for the provided email.
pub(crate) fn issue_token(
    config: &Auth,
    email: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = OffsetDateTime::now_utc().unix_timestamp().max(0) as u64;

    let claims = Claims {
        email: email.to_owned(),
        exp: now + config.lifespan,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a session token and return the email it was issued for.
pub(crate) fn verify_token(
    config: &Auth,
    token: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.email)
}

#[derive(Debug, Display, From, Error)]
pub(super) enum AuthenticationError {
    DatabaseError(DbErr),

    #[display(fmt = "unauthorized")]
    MissingToken,

    #[display(fmt = "invalid session token")]
    InvalidToken,

    #[display(fmt = "unknown user")]
    UnknownUser,

    #[display(fmt = "moderator privileges are required")]
    ModeratorRequired,

    #[display(fmt = "administrator privileges are required")]
    AdminRequired,
}

impl_error_response!(
    AuthenticationError,
    Self::MissingToken => StatusCode::UNAUTHORIZED,
    Self::InvalidToken
    | Self::UnknownUser
    | Self::ModeratorRequired
    | Self::AdminRequired => StatusCode::FORBIDDEN,
);

/// Require a valid session token cookie.
///
/// Privilege requirements are checked against the role that is currently
/// stored for the token owner.
pub(super) async fn require_authentication<
    const REQUIRE_MODERATOR: bool,
    const REQUIRE_ADMIN: bool,
    B,
>(
    State((db, config)): State<AuthState>,
    jar: CookieJar,
    mut req: Request<B>,
    next: Next<B>,
) -> Result<Response, AuthenticationError> {
    let token = jar
        .get(TOKEN_COOKIE)
        .ok_or(AuthenticationError::MissingToken)?;

    let email = verify_token(&config.auth, token.value())
        .map_err(|_| AuthenticationError::InvalidToken)?;

    if REQUIRE_MODERATOR || REQUIRE_ADMIN {
        let role: user::Role = user::Entity::find()
            .select_only()
            .column(user::Column::Role)
            .filter(user::Column::Email.eq(email.as_str()))
            .into_tuple()
            .one(&*db)
            .await?
            .ok_or(AuthenticationError::UnknownUser)?;

        if REQUIRE_ADMIN && !role.is_admin() {
            return Err(AuthenticationError::AdminRequired);
        }

        if REQUIRE_MODERATOR && !role.is_moderator() {
            return Err(AuthenticationError::ModeratorRequired);
        }
    }

    req.extensions_mut().insert(AuthenticatedUser(email));

    Ok(next.run(req).await)
}
