use serde::Serialize;

/// Membership application routes.
pub(crate) mod applications;

/// Club listing routes.
pub(crate) mod clubs;

/// Moderator dashboard routes.
pub(crate) mod moderation;

/// Payment routes.
pub(crate) mod payments;

/// Club review routes.
pub(crate) mod reviews;

/// Session cookie routes.
pub(crate) mod session;

/// Platform statistics routes.
pub(crate) mod stats;

/// User management routes.
pub(crate) mod users;

/// Generic acknowledgement response body.
#[derive(Serialize)]
pub(crate) struct SuccessResponse {
    pub success: bool,
}

/// Response body of creation requests.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InsertedResponse {
    pub success: bool,
    pub inserted_id: i64,
}

/// Response body of modification requests.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModifiedResponse {
    pub success: bool,
    pub modified_count: u64,
}

/// Response body of removal requests.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeletedResponse {
    pub success: bool,
    pub deleted_count: u64,
}

/// Convert a model timestamp into unix seconds.
pub(crate) fn unix_timestamp(value: db::PrimitiveDateTime) -> i64 {
    value.assume_utc().unix_timestamp()
}
