use foodmarket_api::{error::AppError, services::auth_service::validate_credentials};

#[test]
fn accepts_valid_credentials() {
    for (email, password) in [
        ("vendor@example.com", "secret1"),
        ("a@b.co", "123456"),
        ("first.last@mail.example.org", "a-much-longer-password"),
    ] {
        assert!(
            validate_credentials(email, password).is_ok(),
            "expected {email} / {password} to be accepted"
        );
    }
}

#[test]
fn rejects_malformed_emails() {
    for email in [
        "",
        "no-at-sign",
        "two@@example.com",
        "@example.com",
        "user@nodot",
        "user@.com",
        "user@domain.",
        "spaced user@example.com",
        "user@exam ple.com",
    ] {
        let err = validate_credentials(email, "longenough").unwrap_err();
        assert!(
            matches!(err, AppError::Validation(_)),
            "expected validation error for {email:?}, got {err:?}"
        );
    }
}

#[test]
fn rejects_short_passwords() {
    for password in ["", "12345"] {
        let err = validate_credentials("vendor@example.com", password).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[test]
fn six_characters_is_the_password_floor() {
    assert!(validate_credentials("vendor@example.com", "123456").is_ok());
    assert!(validate_credentials("vendor@example.com", "12345").is_err());
}
