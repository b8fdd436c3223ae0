use axum::extract::FromRequestParts;
use uuid::Uuid;

use crate::error::AppError;

pub const USER_HEADER: &str = "x-user-id";

/// Owner of the lists a request touches, identified by the `x-user-id` header.
///
/// Identity is asserted by whatever sits in front of this service; nothing
/// here verifies it.
#[derive(Debug, Clone, Copy)]
pub struct HouseholdUser {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for HouseholdUser
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_HEADER)
            .ok_or_else(|| AppError::BadRequest("Missing x-user-id header".into()))?;

        let raw = header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid x-user-id header".into()))?;

        let user_id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::BadRequest("x-user-id must be a UUID".into()))?;

        Ok(HouseholdUser { user_id })
    }
}
