use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, SqlErr};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::auth::{AuthResponse, Claims, LoginRequest, RegisterRequest},
    entity::vendors::{ActiveModel as VendorActive, Column as VendorCol, Entity as Vendors, Model as VendorModel},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Credential validation applied before account creation: a plausible email
/// shape and at least six password characters. Violations are 422s.
pub fn validate_credentials(email: &str, password: &str) -> AppResult<()> {
    if !is_valid_email(email) {
        return Err(AppError::Validation("Invalid email".into()));
    }
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be minimum 6 characters".into(),
        ));
    }
    Ok(())
}

// Shape check equivalent to ^[^\s@]+@[^\s@]+\.[^\s@]+$
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn jwt_secret() -> AppResult<String> {
    std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))
}

/// Issue a signed session token carrying the vendor identity, valid 7 days.
pub fn generate_token(vendor: &VendorModel, secret: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(7))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: vendor.id.to_string(),
        name: vendor.name.clone(),
        email: vendor.email.clone(),
        roles: vec!["vendor".to_string()],
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_claims(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Error verifying token: {e}")))
}

pub async fn register_vendor(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    validate_credentials(&payload.email, &payload.password)?;

    let exists = Vendors::find()
        .filter(VendorCol::Email.eq(payload.email.as_str()))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let now = Utc::now();
    let opening_hours = payload
        .opening_hours
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    let vendor = VendorActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        description: Set(payload.description),
        location: Set(payload.location),
        phone: Set(payload.phone),
        is_available: Set(true),
        opening_hours: Set(opening_hours),
        avatar: Set(payload.avatar),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await
    // A concurrent registration can slip past the lookup above; the unique
    // index on email answers the same way as the pre-check.
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("Email is already taken".to_string())
        }
        _ => AppError::from(err),
    })?;

    let token = generate_token(&vendor, &jwt_secret()?)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(vendor.id),
        "vendor_register",
        Some("vendors"),
        Some(serde_json::json!({ "vendor_id": vendor.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Vendor registered",
        AuthResponse {
            token,
            vendor: vendor.into(),
        },
        None,
    ))
}

/// Lookup-plus-hash check. Both a missing account and a wrong password answer
/// with the same message so the caller cannot tell which field was wrong.
pub async fn verify_credentials(
    state: &AppState,
    credentials: &LoginRequest,
) -> AppResult<VendorModel> {
    const INVALID: &str = "Invalid email or password";

    let vendor = Vendors::find()
        .filter(VendorCol::Email.eq(credentials.email.as_str()))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID.into()))?;

    let parsed_hash = PasswordHash::new(&vendor.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(credentials.password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized(INVALID.into()));
    }

    Ok(vendor)
}

pub async fn login_vendor(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let vendor = verify_credentials(state, &payload).await?;
    let token = generate_token(&vendor, &jwt_secret()?)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(vendor.id),
        "vendor_login",
        Some("vendors"),
        Some(serde_json::json!({ "vendor_id": vendor.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged in",
        AuthResponse {
            token,
            vendor: vendor.into(),
        },
        Some(Meta::empty()),
    ))
}
