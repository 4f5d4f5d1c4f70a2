use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{
    error::AppError,
    services::auth_service::{decode_claims, jwt_secret},
};

/// Principal derived from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthVendor {
    pub vendor_id: Uuid,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
}

pub fn ensure_role(user: &AuthVendor, role: &str) -> Result<(), AppError> {
    if !user.roles.iter().any(|r| r == role) {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_vendor(user: &AuthVendor) -> Result<(), AppError> {
    ensure_role(user, "vendor")
}

/// Single ownership predicate used by every mutating endpoint: the target
/// resource must belong to the requesting principal, otherwise 403 and no
/// mutation happens.
pub fn ensure_owner(user: &AuthVendor, owner_id: Uuid) -> Result<(), AppError> {
    if user.vendor_id != owner_id {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

impl<S> FromRequestParts<S> for AuthVendor
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Authorization header not found".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer") {
            return Err(AppError::Unauthorized(
                "Authorization header is not of type Bearer".into(),
            ));
        }

        // The value must be exactly `Bearer <token>`.
        let parts_vec: Vec<&str> = auth_str.split_whitespace().collect();
        let token = match parts_vec.as_slice() {
            ["Bearer", token] => *token,
            _ => {
                return Err(AppError::Unauthorized(
                    "Authorization header must follow the pattern 'Bearer <token>'".into(),
                ));
            }
        };

        let secret = jwt_secret()?;
        let claims = decode_claims(token, &secret)?;

        let vendor_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid vendor id in token".into()))?;

        let user = AuthVendor {
            vendor_id,
            name: claims.name,
            email: claims.email,
            roles: claims.roles,
        };
        // Authenticated endpoints are vendor-only; a token without the role
        // is rejected here rather than in every handler.
        ensure_vendor(&user)?;

        Ok(user)
    }
}
