use chrono::Utc;
use foodmarket_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::orders::{CreateOrderRequest, UpdateOrderStatusRequest},
    dto::products::{CreateProductRequest, UpdateProductRequest},
    entity::{products::Entity as Products, vendors::ActiveModel as VendorActive},
    error::AppError,
    middleware::auth::AuthVendor,
    models::{OrderStatus, ProductCategory},
    services::{order_service, product_service},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set, Statement};
use uuid::Uuid;

// Integration flow: vendor creates a product, a customer places orders,
// status moves through the transition graph, a non-owner is rejected, and
// analytics reflect the day's orders.
#[tokio::test]
async fn order_lifecycle_and_ownership_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let owner_id = create_vendor(&state, "Chez Awa", "awa@example.com").await?;
    let other_id = create_vendor(&state, "Chez Moussa", "moussa@example.com").await?;

    let owner = auth(owner_id, "Chez Awa", "awa@example.com");
    let other = auth(other_id, "Chez Moussa", "moussa@example.com");

    // Owner lists a product.
    let product = product_service::create_product(
        &state,
        &owner,
        CreateProductRequest {
            name: "Beignets".into(),
            description: Some("Dozen, fresh daily".into()),
            price: 1000,
            category: ProductCategory::Sweet,
            images: None,
            is_available: None,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(product.vendor_id, owner_id);

    // Customer places two orders; the vendor is derived from the product.
    let first = order_service::create_order(&state, order_request(product.id, 1000))
        .await?
        .data
        .unwrap();
    let second = order_service::create_order(&state, order_request(product.id, 2000))
        .await?
        .data
        .unwrap();
    assert_eq!(first.vendor_id, owner_id);
    assert_eq!(second.vendor_id, owner_id);
    assert_eq!(first.status, "pending");

    // Status follows the transition graph.
    let confirmed = order_service::update_status(
        &state,
        &owner,
        first.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Confirmed,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(confirmed.status, "confirmed");

    let err = order_service::update_status(
        &state,
        &owner,
        first.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Delivered,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // A non-owner cannot touch the product or the orders.
    let err = product_service::update_product(
        &state,
        &other,
        product.id,
        UpdateProductRequest {
            name: Some("Hijacked".into()),
            description: None,
            price: None,
            category: None,
            images: None,
            is_available: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    let unchanged = Products::find_by_id(product.id)
        .one(&state.orm)
        .await?
        .expect("product still present");
    assert_eq!(unchanged.name, "Beignets");

    let err = order_service::delete_order(&state, &other, second.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Analytics see both orders as today's.
    let summary = order_service::order_analytics(&state, &owner)
        .await?
        .data
        .unwrap();
    assert_eq!(summary.total_orders, 2);
    assert_eq!(summary.total_revenue, 3000);
    assert_eq!(summary.today_orders, 2);
    assert_eq!(summary.today_revenue, 3000);
    assert_eq!(summary.weekly_orders[6], 2);
    assert_eq!(summary.top_products[0].name, "Beignets");

    // The other vendor's dashboard stays empty.
    let empty = order_service::order_analytics(&state, &other)
        .await?
        .data
        .unwrap();
    assert_eq!(empty.total_orders, 0);

    Ok(())
}

fn auth(vendor_id: Uuid, name: &str, email: &str) -> AuthVendor {
    AuthVendor {
        vendor_id,
        name: name.into(),
        email: email.into(),
        roles: vec!["vendor".into()],
    }
}

fn order_request(product_id: Uuid, total_price: i64) -> CreateOrderRequest {
    CreateOrderRequest {
        product_id,
        customer_name: "Ada".into(),
        customer_phone: "+221700000000".into(),
        customer_email: Some("ada@example.com".into()),
        quantity: Some(1),
        total_price,
        delivery_address: "12 Market St".into(),
        notes: None,
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs.
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE audit_logs, orders, products, vendors RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_vendor(state: &AppState, name: &str, email: &str) -> anyhow::Result<Uuid> {
    let now = Utc::now();
    let vendor = VendorActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("$argon2id$irrelevant".into()),
        description: Set(None),
        location: Set(None),
        phone: Set(None),
        is_available: Set(true),
        opening_hours: Set(None),
        avatar: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(vendor.id)
}
