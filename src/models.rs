use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{orders, products, vendors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OpeningHours {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Sweet,
    Savory,
    Mixed,
    Juice,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Sweet => "sweet",
            ProductCategory::Savory => "savory",
            ProductCategory::Mixed => "mixed",
            ProductCategory::Juice => "juice",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "preparing" => Some(OrderStatus::Preparing),
            "ready" => Some(OrderStatus::Ready),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Fulfilment moves strictly forward; cancellation is allowed from any
    /// state that has not reached a terminal one.
    pub fn can_transition(self, next: OrderStatus) -> bool {
        match self {
            OrderStatus::Pending => matches!(next, OrderStatus::Confirmed | OrderStatus::Cancelled),
            OrderStatus::Confirmed => {
                matches!(next, OrderStatus::Preparing | OrderStatus::Cancelled)
            }
            OrderStatus::Preparing => matches!(next, OrderStatus::Ready | OrderStatus::Cancelled),
            OrderStatus::Ready => matches!(next, OrderStatus::Delivered | OrderStatus::Cancelled),
            OrderStatus::Delivered | OrderStatus::Cancelled => false,
        }
    }
}

/// Vendor as served over the wire. The password hash is not a field here, so
/// responses cannot leak it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub is_available: bool,
    pub opening_hours: Option<OpeningHours>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<vendors::Model> for Vendor {
    fn from(model: vendors::Model) -> Self {
        Vendor {
            id: model.id,
            name: model.name,
            email: model.email,
            description: model.description,
            location: model.location,
            phone: model.phone,
            is_available: model.is_available,
            opening_hours: model
                .opening_hours
                .and_then(|v| serde_json::from_value(v).ok()),
            avatar: model.avatar,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub category: String,
    pub images: Vec<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product {
            id: model.id,
            vendor_id: model.vendor_id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            images: model
                .images
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
            is_available: model.is_available,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub product_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub quantity: i32,
    pub total_price: i64,
    pub status: String,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Order {
            id: model.id,
            vendor_id: model.vendor_id,
            product_id: model.product_id,
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            customer_email: model.customer_email,
            quantity: model.quantity,
            total_price: model.total_price,
            status: model.status,
            delivery_address: model.delivery_address,
            notes: model.notes,
            order_date: model.order_date.with_timezone(&Utc),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
