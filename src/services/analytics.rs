use chrono::{DateTime, NaiveTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::dto::analytics::{OrderAnalytics, ProductStat, StatusCount};
use crate::entity::{orders, products};

const TOP_PRODUCT_LIMIT: usize = 5;
const WEEK_DAYS: i64 = 7;

/// Aggregate one vendor's order history into the dashboard summary.
///
/// `now` is passed in rather than read from the clock so the aggregation is
/// deterministic. Orders older than the 7-day window simply fall out of the
/// weekly series; they still count toward the totals.
pub fn summarize(
    rows: &[(orders::Model, Option<products::Model>)],
    now: DateTime<Utc>,
) -> OrderAnalytics {
    let day_start = now.date_naive().and_time(NaiveTime::MIN).and_utc();

    let mut total_revenue = 0i64;
    let mut today_orders = 0i64;
    let mut today_revenue = 0i64;
    let mut weekly_orders = vec![0i64; WEEK_DAYS as usize];
    let mut weekly_revenue = vec![0i64; WEEK_DAYS as usize];
    let mut by_product: HashMap<Uuid, ProductStat> = HashMap::new();
    let mut by_status: HashMap<String, i64> = HashMap::new();

    for (order, product) in rows {
        let order_date = order.order_date.with_timezone(&Utc);
        total_revenue += order.total_price;

        if order_date >= day_start {
            today_orders += 1;
            today_revenue += order.total_price;
        }

        let age_days = (now - order_date).num_days();
        if (0..WEEK_DAYS).contains(&age_days) {
            let idx = (WEEK_DAYS - 1 - age_days) as usize;
            weekly_orders[idx] += 1;
            weekly_revenue[idx] += order.total_price;
        }

        let stat = by_product
            .entry(order.product_id)
            .or_insert_with(|| ProductStat {
                name: product
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "Unknown Product".to_string()),
                orders: 0,
                revenue: 0,
            });
        stat.orders += 1;
        stat.revenue += order.total_price;

        *by_status.entry(order.status.clone()).or_insert(0) += 1;
    }

    let mut top_products: Vec<ProductStat> = by_product.into_values().collect();
    top_products.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    top_products.truncate(TOP_PRODUCT_LIMIT);

    let orders_by_status = by_status
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();

    OrderAnalytics {
        total_orders: rows.len() as i64,
        total_revenue,
        today_orders,
        today_revenue,
        weekly_orders,
        weekly_revenue,
        top_products,
        orders_by_status,
    }
}
