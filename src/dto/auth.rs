use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> AppResult<()> {
        let email = self.email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(AppError::BadRequest("email is not a valid address".into()));
        }
        if self.password.trim().is_empty() {
            return Err(AppError::BadRequest("password must not be blank".into()));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be blank".into()));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    /// Member email.
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, name: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    #[test]
    fn accepts_a_regular_signup() {
        assert!(request("kim@example.com", "pw", "Kim").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email_and_blank_fields() {
        assert!(request("no-at-sign", "pw", "Kim").validate().is_err());
        assert!(request("@example.com", "pw", "Kim").validate().is_err());
        assert!(request("kim@example.com", "  ", "Kim").validate().is_err());
        assert!(request("kim@example.com", "pw", "").validate().is_err());
    }
}
