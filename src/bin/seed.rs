use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use foodmarket_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;
    let vendor_id = ensure_vendor(&pool, "Chez Fatou", "fatou@example.com", "secret123").await?;
    seed_products(&pool, vendor_id).await?;

    println!("Seed completed. Vendor ID: {vendor_id}");
    Ok(())
}

async fn ensure_vendor(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let (vendor_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO vendors (id, name, email, password_hash, description, location)
        VALUES ($1, $2, $3, $4, 'Home-made snacks and juices', 'Dakar')
        ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    println!("Ensured vendor {email}");
    Ok(vendor_id)
}

async fn seed_products(pool: &sqlx::PgPool, vendor_id: Uuid) -> anyhow::Result<()> {
    let products = vec![
        ("Beignets", "Sweet fried dough, dozen", 1500_i64, "sweet"),
        ("Fataya", "Savory stuffed pastry", 2000, "savory"),
        ("Bissap", "Fresh hibiscus juice, 50cl", 1000, "juice"),
        ("Snack Box", "Mixed sweet and savory box", 3500, "mixed"),
    ];

    for (name, desc, price, category) in products {
        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM products WHERE vendor_id = $1 AND name = $2")
                .bind(vendor_id)
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO products (id, vendor_id, name, description, price, category, images)
            VALUES ($1, $2, $3, $4, $5, $6, '[]'::jsonb)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vendor_id)
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(category)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
