use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{OpeningHours, Vendor};

/// Email is deliberately absent: the profile PATCH may not change it.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendorRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VendorList {
    pub items: Vec<Vendor>,
}
