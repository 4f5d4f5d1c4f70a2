use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::vendors::{UpdateVendorRequest, VendorList},
    entity::vendors::{ActiveModel as VendorActive, Entity as Vendors},
    error::{AppError, AppResult},
    middleware::auth::{AuthVendor, ensure_owner},
    models::Vendor,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_current(state: &AppState, user: &AuthVendor) -> AppResult<ApiResponse<Vendor>> {
    let vendor = Vendors::find_by_id(user.vendor_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Profile", Vendor::from(vendor), None))
}

pub async fn list_vendors(state: &AppState) -> AppResult<ApiResponse<VendorList>> {
    let items: Vec<Vendor> = Vendors::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Vendor::from)
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success(
        "Vendors",
        VendorList { items },
        Some(meta),
    ))
}

pub async fn get_vendor(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Vendor>> {
    let vendor = Vendors::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Vendor", Vendor::from(vendor), None))
}

pub async fn update_vendor(
    state: &AppState,
    user: &AuthVendor,
    id: Uuid,
    payload: UpdateVendorRequest,
) -> AppResult<ApiResponse<Vendor>> {
    ensure_owner(user, id)?;

    let existing = Vendors::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: VendorActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(location) = payload.location {
        active.location = Set(Some(location));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(opening_hours) = payload.opening_hours {
        let value = serde_json::to_value(&opening_hours)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;
        active.opening_hours = Set(Some(value));
    }
    if let Some(avatar) = payload.avatar {
        active.avatar = Set(Some(avatar));
    }
    active.updated_at = Set(Utc::now().into());

    let vendor = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.vendor_id),
        "vendor_update",
        Some("vendors"),
        Some(serde_json::json!({ "vendor_id": vendor.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Profile updated",
        Vendor::from(vendor),
        Some(Meta::empty()),
    ))
}

pub async fn toggle_availability(
    state: &AppState,
    user: &AuthVendor,
    id: Uuid,
) -> AppResult<ApiResponse<Vendor>> {
    ensure_owner(user, id)?;

    let existing = Vendors::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let next = !existing.is_available;
    let mut active: VendorActive = existing.into();
    active.is_available = Set(next);
    active.updated_at = Set(Utc::now().into());
    let vendor = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.vendor_id),
        "vendor_availability_toggle",
        Some("vendors"),
        Some(serde_json::json!({ "vendor_id": vendor.id, "is_available": vendor.is_available })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Availability updated",
        Vendor::from(vendor),
        Some(Meta::empty()),
    ))
}

pub async fn delete_vendor(
    state: &AppState,
    user: &AuthVendor,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_owner(user, id)?;

    let result = Vendors::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.vendor_id),
        "vendor_delete",
        Some("vendors"),
        Some(serde_json::json!({ "vendor_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
