use foodmarket_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::auth::{LoginRequest, RegisterRequest},
    error::AppError,
    services::auth_service,
    state::AppState,
};
use sea_orm::{ConnectionTrait, Statement};

// Registration flow: a second account on the same email answers 400, and the
// first account still logs in with its original credentials.
#[tokio::test]
async fn duplicate_registration_is_rejected() -> anyhow::Result<()> {
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
    unsafe { std::env::set_var("JWT_SECRET", "register-test-secret") };

    let state = setup_state(&database_url).await?;

    let first = auth_service::register_vendor(&state, request())
        .await?
        .data
        .expect("auth response");
    assert!(!first.token.is_empty());

    let err = auth_service::register_vendor(&state, request())
        .await
        .unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "Email is already taken"),
        other => panic!("expected 400 for duplicate email, got {other:?}"),
    }

    // The original account is untouched.
    let login = auth_service::login_vendor(
        &state,
        LoginRequest {
            email: "fatou@example.com".into(),
            password: "secret123".into(),
        },
    )
    .await?
    .data
    .expect("auth response");
    assert_eq!(login.vendor.id, first.vendor.id);

    Ok(())
}

fn request() -> RegisterRequest {
    RegisterRequest {
        name: "Chez Fatou".into(),
        email: "fatou@example.com".into(),
        password: "secret123".into(),
        description: None,
        location: None,
        phone: None,
        opening_hours: None,
        avatar: None,
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE audit_logs, orders, products, vendors RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}
