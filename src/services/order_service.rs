use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::analytics::OrderAnalytics,
    dto::orders::{
        CreateOrderRequest, MyOrdersQuery, OrderList, OrderWithProduct, UpdateOrderRequest,
        UpdateOrderStatusRequest,
    },
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthVendor, ensure_owner},
    models::{Order, OrderStatus, Product},
    response::{ApiResponse, Meta},
    services::analytics,
    state::AppState,
};

/// Customer-facing order creation. The vendor reference is always copied from
/// the product so `order.vendor_id == product.vendor_id` holds by
/// construction.
pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let product = Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let quantity = payload.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::BadRequest("Quantity must be at least 1".into()));
    }

    let now = Utc::now();
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        vendor_id: Set(product.vendor_id),
        product_id: Set(product.id),
        customer_name: Set(payload.customer_name),
        customer_phone: Set(payload.customer_phone),
        customer_email: Set(payload.customer_email),
        quantity: Set(quantity),
        total_price: Set(payload.total_price),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        delivery_address: Set(payload.delivery_address),
        notes: Set(payload.notes),
        order_date: Set(now.into()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(product.vendor_id),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order placed",
        Order::from(order),
        Some(Meta::empty()),
    ))
}

/// The authenticated vendor's orders, newest first, product resolved.
pub async fn my_orders(
    state: &AppState,
    user: &AuthVendor,
    query: MyOrdersQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let mut condition = Condition::all().add(OrderCol::VendorId.eq(user.vendor_id));
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let rows = Orders::find()
        .filter(condition)
        .order_by_desc(OrderCol::CreatedAt)
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let items: Vec<OrderWithProduct> = rows
        .into_iter()
        .map(|(order, product)| OrderWithProduct {
            order: Order::from(order),
            product: product.map(Product::from),
        })
        .collect();

    let meta = Meta::count(items.len() as i64);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderWithProduct>> {
    let (order, product) = Orders::find_by_id(id)
        .find_also_related(Products)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Order",
        OrderWithProduct {
            order: Order::from(order),
            product: product.map(Product::from),
        },
        Some(Meta::empty()),
    ))
}

pub async fn order_analytics(
    state: &AppState,
    user: &AuthVendor,
) -> AppResult<ApiResponse<OrderAnalytics>> {
    let rows = Orders::find()
        .filter(OrderCol::VendorId.eq(user.vendor_id))
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let summary = analytics::summarize(&rows, Utc::now());
    Ok(ApiResponse::success("Analytics", summary, Some(Meta::empty())))
}

pub async fn update_status(
    state: &AppState,
    user: &AuthVendor,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner(user, existing.vendor_id)?;

    let current = OrderStatus::parse(&existing.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Stored order status is not recognized"))
    })?;
    if !current.can_transition(payload.status) {
        return Err(AppError::BadRequest(format!(
            "Cannot change status from {} to {}",
            current.as_str(),
            payload.status.as_str()
        )));
    }

    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.vendor_id),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "status": order.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Status updated",
        Order::from(order),
        Some(Meta::empty()),
    ))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthVendor,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner(user, existing.vendor_id)?;

    if let Some(quantity) = payload.quantity
        && quantity < 1
    {
        return Err(AppError::BadRequest("Quantity must be at least 1".into()));
    }

    let mut active: OrderActive = existing.into();
    if let Some(customer_name) = payload.customer_name {
        active.customer_name = Set(customer_name);
    }
    if let Some(customer_phone) = payload.customer_phone {
        active.customer_phone = Set(customer_phone);
    }
    if let Some(customer_email) = payload.customer_email {
        active.customer_email = Set(Some(customer_email));
    }
    if let Some(quantity) = payload.quantity {
        active.quantity = Set(quantity);
    }
    if let Some(total_price) = payload.total_price {
        active.total_price = Set(total_price);
    }
    if let Some(delivery_address) = payload.delivery_address {
        active.delivery_address = Set(delivery_address);
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }
    active.updated_at = Set(Utc::now().into());

    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.vendor_id),
        "order_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order updated",
        Order::from(order),
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthVendor,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner(user, existing.vendor_id)?;

    Orders::delete_by_id(id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.vendor_id),
        "order_delete",
        Some("orders"),
        Some(serde_json::json!({ "order_id": id })),
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
