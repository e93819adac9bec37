use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::TransactionTrait;

use crate::{
    audit,
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    error::{AppError, AppResult, is_constraint_violation},
    middleware::auth::MEMBER_ROLE,
    models::Member,
    repository::{self, members::NewMember},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Signs a token whose subject is the member email.
pub fn issue_token(secret: &str, email: &str, role: &str, ttl_hours: i64) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: email.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub async fn register_member(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<Member>> {
    payload.validate()?;
    let RegisterRequest {
        email,
        password,
        name,
    } = payload;
    let email = email.trim().to_lowercase();

    let txn = state.orm.begin().await?;
    if repository::members::find_by_email(&txn, &email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let member = repository::members::insert(
        &txn,
        NewMember {
            email,
            password_hash: hash_password(&password)?,
            name: name.trim().to_string(),
            role: MEMBER_ROLE.to_string(),
        },
    )
    .await
    .map_err(|err| {
        if is_constraint_violation(&err) {
            AppError::BadRequest("Email is already taken".to_string())
        } else {
            AppError::Database(err)
        }
    })?;
    txn.commit().await?;

    tracing::info!(member_id = %member.id, "member registered");
    audit::record(
        &state.orm,
        Some(member.id),
        "member_register",
        "members",
        serde_json::json!({ "member_id": member.id }),
    )
    .await;

    Ok(ApiResponse::success("Member created", member.into(), None))
}

pub async fn login_member(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = email.trim().to_lowercase();
    let member = match repository::members::find_by_email(&state.orm, &email).await? {
        Some(m) => m,
        None => return Err(AppError::BadRequest("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&member.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let token = issue_token(
        &state.auth.jwt_secret,
        &member.email,
        &member.role,
        state.auth.token_ttl_hours,
    )?;

    audit::record(
        &state.orm,
        Some(member.id),
        "member_login",
        "members",
        serde_json::json!({ "member_id": member.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
        },
        Some(Meta::empty()),
    ))
}
