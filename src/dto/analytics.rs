use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Summary served by `GET /api/orders/analytics`. Totals are exact for the
/// vendor's order set; the weekly window and top-product list are best-effort
/// summaries, not billing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderAnalytics {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub today_orders: i64,
    pub today_revenue: i64,
    /// Index 6 is today, index 0 six days ago.
    pub weekly_orders: Vec<i64>,
    pub weekly_revenue: Vec<i64>,
    pub top_products: Vec<ProductStat>,
    pub orders_by_status: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductStat {
    pub name: String,
    pub orders: i64,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
