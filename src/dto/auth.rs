use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{OpeningHours, Vendor};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register and login both answer with a fresh token plus the profile,
/// password stripped.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub vendor: Vendor,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub exp: usize,
}
