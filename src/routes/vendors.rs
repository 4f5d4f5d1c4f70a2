use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::auth::{AuthResponse, LoginRequest, RegisterRequest},
    dto::vendors::{UpdateVendorRequest, VendorList},
    error::AppResult,
    middleware::auth::AuthVendor,
    models::Vendor,
    response::ApiResponse,
    services::{auth_service, vendor_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/", get(list_vendors))
        .route("/{id}", get(get_vendor))
        .route("/{id}", patch(update_vendor))
        .route("/{id}/availability", patch(toggle_availability))
        .route("/{id}", delete(delete_vendor))
}

#[utoipa::path(
    post,
    path = "/api/vendors/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Vendor registered", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Email already taken"),
        (status = 422, description = "Invalid email or short password"),
    ),
    tag = "Vendors"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = auth_service::register_vendor(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/vendors/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Vendors"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = auth_service::login_vendor(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendors/me",
    responses(
        (status = 200, description = "Current vendor profile", body = ApiResponse<Vendor>),
        (status = 401, description = "Unauthorized"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthVendor,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = vendor_service::get_current(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendors",
    responses(
        (status = 200, description = "List vendors", body = ApiResponse<VendorList>),
    ),
    tag = "Vendors"
)]
pub async fn list_vendors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<VendorList>>> {
    let resp = vendor_service::list_vendors(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor detail", body = ApiResponse<Vendor>),
        (status = 404, description = "Vendor not found"),
    ),
    tag = "Vendors"
)]
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = vendor_service::get_vendor(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    request_body = UpdateVendorRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<Vendor>),
        (status = 403, description = "Not the profile owner"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn update_vendor(
    State(state): State<AppState>,
    user: AuthVendor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVendorRequest>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = vendor_service::update_vendor(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/vendors/{id}/availability",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Availability toggled", body = ApiResponse<Vendor>),
        (status = 403, description = "Not the profile owner"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    user: AuthVendor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let resp = vendor_service::toggle_availability(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/vendors/{id}",
    params(("id" = Uuid, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Vendor deleted"),
        (status = 403, description = "Not the profile owner"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn delete_vendor(
    State(state): State<AppState>,
    user: AuthVendor,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = vendor_service::delete_vendor(&state, &user, id).await?;
    Ok(Json(resp))
}
