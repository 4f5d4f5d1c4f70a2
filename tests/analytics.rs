use chrono::{DateTime, Duration, TimeZone, Utc};
use foodmarket_api::{
    entity::{orders, products},
    services::analytics::summarize,
};
use uuid::Uuid;

fn product(id: Uuid, vendor_id: Uuid, name: &str) -> products::Model {
    let now = Utc::now();
    products::Model {
        id,
        vendor_id,
        name: name.into(),
        description: None,
        price: 1000,
        category: "sweet".into(),
        images: None,
        is_available: true,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn order(
    vendor_id: Uuid,
    product_id: Uuid,
    total_price: i64,
    status: &str,
    order_date: DateTime<Utc>,
) -> orders::Model {
    orders::Model {
        id: Uuid::new_v4(),
        vendor_id,
        product_id,
        customer_name: "Ada".into(),
        customer_phone: "+221700000000".into(),
        customer_email: None,
        quantity: 1,
        total_price,
        status: status.into(),
        delivery_address: "12 Market St".into(),
        notes: None,
        order_date: order_date.into(),
        created_at: order_date.into(),
        updated_at: order_date.into(),
    }
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
}

#[test]
fn empty_input_yields_zeroed_aggregates() {
    let summary = summarize(&[], noon());
    assert_eq!(summary.total_orders, 0);
    assert_eq!(summary.total_revenue, 0);
    assert_eq!(summary.today_orders, 0);
    assert_eq!(summary.today_revenue, 0);
    assert_eq!(summary.weekly_orders, vec![0; 7]);
    assert_eq!(summary.weekly_revenue, vec![0; 7]);
    assert!(summary.top_products.is_empty());
    assert!(summary.orders_by_status.is_empty());
}

#[test]
fn todays_orders_fill_totals_and_the_last_weekly_slot() {
    let now = noon();
    let vendor_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let p = product(product_id, vendor_id, "Beignets");

    let rows = vec![
        (
            order(vendor_id, product_id, 1000, "pending", now - Duration::hours(2)),
            Some(p.clone()),
        ),
        (
            order(vendor_id, product_id, 2000, "pending", now - Duration::hours(5)),
            Some(p),
        ),
    ];

    let summary = summarize(&rows, now);
    assert_eq!(summary.total_orders, 2);
    assert_eq!(summary.total_revenue, 3000);
    assert_eq!(summary.today_orders, 2);
    assert_eq!(summary.today_revenue, 3000);
    assert_eq!(summary.weekly_orders[6], 2);
    assert_eq!(summary.weekly_revenue[6], 3000);
    assert_eq!(summary.weekly_orders[..6], [0; 6]);
}

#[test]
fn window_places_orders_by_whole_day_age() {
    let now = noon();
    let vendor_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();

    // Three days old lands at index 3; six days old at index 0.
    let rows = vec![
        (
            order(vendor_id, product_id, 700, "delivered", now - Duration::days(3)),
            None,
        ),
        (
            order(vendor_id, product_id, 300, "delivered", now - Duration::days(6)),
            None,
        ),
    ];

    let summary = summarize(&rows, now);
    assert_eq!(summary.weekly_orders[3], 1);
    assert_eq!(summary.weekly_revenue[3], 700);
    assert_eq!(summary.weekly_orders[0], 1);
    assert_eq!(summary.weekly_revenue[0], 300);
    assert_eq!(summary.today_orders, 0);
}

#[test]
fn orders_older_than_a_week_count_only_toward_totals() {
    let now = noon();
    let vendor_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();

    let rows = vec![(
        order(vendor_id, product_id, 900, "delivered", now - Duration::days(10)),
        None,
    )];

    let summary = summarize(&rows, now);
    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.total_revenue, 900);
    assert_eq!(summary.today_orders, 0);
    assert_eq!(summary.weekly_orders, vec![0; 7]);
    assert_eq!(summary.weekly_revenue, vec![0; 7]);
}

#[test]
fn top_products_keeps_the_five_largest_by_revenue() {
    let now = noon();
    let vendor_id = Uuid::new_v4();
    let revenues = [500, 400, 300, 200, 100, 50];

    let rows: Vec<_> = revenues
        .iter()
        .enumerate()
        .map(|(i, &revenue)| {
            let product_id = Uuid::new_v4();
            let p = product(product_id, vendor_id, &format!("Item {i}"));
            (
                order(vendor_id, product_id, revenue, "pending", now),
                Some(p),
            )
        })
        .collect();

    let summary = summarize(&rows, now);
    assert_eq!(summary.top_products.len(), 5);
    let got: Vec<i64> = summary.top_products.iter().map(|p| p.revenue).collect();
    assert_eq!(got, vec![500, 400, 300, 200, 100]);
    assert!(summary.top_products.iter().all(|p| p.name != "Item 5"));
}

#[test]
fn repeat_orders_accumulate_per_product() {
    let now = noon();
    let vendor_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let p = product(product_id, vendor_id, "Bissap");

    let rows = vec![
        (order(vendor_id, product_id, 1000, "pending", now), Some(p.clone())),
        (order(vendor_id, product_id, 1500, "delivered", now), Some(p)),
    ];

    let summary = summarize(&rows, now);
    assert_eq!(summary.top_products.len(), 1);
    assert_eq!(summary.top_products[0].name, "Bissap");
    assert_eq!(summary.top_products[0].orders, 2);
    assert_eq!(summary.top_products[0].revenue, 2500);
}

#[test]
fn unresolved_product_relation_falls_back_to_placeholder() {
    let now = noon();
    let rows = vec![(order(Uuid::new_v4(), Uuid::new_v4(), 100, "pending", now), None)];

    let summary = summarize(&rows, now);
    assert_eq!(summary.top_products[0].name, "Unknown Product");
}

#[test]
fn status_counts_group_without_ordering_guarantees() {
    let now = noon();
    let vendor_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();

    let rows = vec![
        (order(vendor_id, product_id, 100, "pending", now), None),
        (order(vendor_id, product_id, 100, "pending", now), None),
        (order(vendor_id, product_id, 100, "delivered", now), None),
    ];

    let summary = summarize(&rows, now);
    assert_eq!(summary.orders_by_status.len(), 2);
    let find = |status: &str| {
        summary
            .orders_by_status
            .iter()
            .find(|s| s.status == status)
            .map(|s| s.count)
    };
    assert_eq!(find("pending"), Some(2));
    assert_eq!(find("delivered"), Some(1));
}
