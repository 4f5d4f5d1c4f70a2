use chrono::Utc;
use foodmarket_api::{
    dto::auth::Claims,
    entity::vendors,
    error::AppError,
    services::auth_service::{decode_claims, generate_token},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

const SECRET: &str = "test-secret";

fn sample_vendor() -> vendors::Model {
    let now = Utc::now();
    vendors::Model {
        id: Uuid::new_v4(),
        name: "Chez Awa".into(),
        email: "awa@example.com".into(),
        password_hash: "$argon2id$irrelevant".into(),
        description: None,
        location: None,
        phone: None,
        is_available: true,
        opening_hours: None,
        avatar: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[test]
fn token_round_trip_preserves_identity() {
    let vendor = sample_vendor();
    let token = generate_token(&vendor, SECRET).expect("token");

    let claims = decode_claims(&token, SECRET).expect("claims");
    assert_eq!(claims.sub, vendor.id.to_string());
    assert_eq!(claims.name, vendor.name);
    assert_eq!(claims.email, vendor.email);
    assert_eq!(claims.roles, vec!["vendor".to_string()]);
    assert!(claims.exp > Utc::now().timestamp() as usize);
}

#[test]
fn tampered_token_is_rejected() {
    let vendor = sample_vendor();
    let token = generate_token(&vendor, SECRET).expect("token");

    // Flip the last signature character.
    let mut tampered = token.clone();
    let last = if tampered.ends_with('A') { 'B' } else { 'A' };
    tampered.pop();
    tampered.push(last);

    let err = decode_claims(&tampered, SECRET).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    // Wrong secret fails the same way.
    let err = decode_claims(&token, "other-secret").unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn expired_token_is_rejected() {
    let vendor = sample_vendor();
    let claims = Claims {
        sub: vendor.id.to_string(),
        name: vendor.name.clone(),
        email: vendor.email.clone(),
        roles: vec!["vendor".into()],
        // Two hours past, well beyond the default leeway.
        exp: (Utc::now().timestamp() - 7200) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("encode");

    let err = decode_claims(&token, SECRET).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}
