use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};

use crate::{dto::auth::Claims, error::AppError, state::AppState};

pub const ADMIN_ROLE: &str = "admin";
pub const MEMBER_ROLE: &str = "user";

/// Member identity carried by a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthMember {
    pub email: String,
    pub role: String,
}

pub fn ensure_role(member: &AuthMember, role: &str) -> Result<(), AppError> {
    if member.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(member: &AuthMember) -> Result<(), AppError> {
    ensure_role(member, ADMIN_ROLE)
}

pub fn decode_token(token: &str, secret: &str) -> Result<AuthMember, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    Ok(AuthMember {
        email: decoded.claims.sub,
        role: decoded.claims.role,
    })
}

impl FromRequestParts<AppState> for AuthMember {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?
            .trim();

        decode_token(token, &state.auth.jwt_secret)
    }
}
