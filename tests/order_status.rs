use foodmarket_api::models::{OrderStatus, ProductCategory};

#[test]
fn fulfilment_moves_strictly_forward() {
    use OrderStatus::*;
    assert!(Pending.can_transition(Confirmed));
    assert!(Confirmed.can_transition(Preparing));
    assert!(Preparing.can_transition(Ready));
    assert!(Ready.can_transition(Delivered));

    assert!(!Pending.can_transition(Preparing));
    assert!(!Pending.can_transition(Delivered));
    assert!(!Confirmed.can_transition(Ready));
    assert!(!Ready.can_transition(Confirmed));
    assert!(!Delivered.can_transition(Pending));
}

#[test]
fn cancellation_is_allowed_before_terminal_states_only() {
    use OrderStatus::*;
    for status in [Pending, Confirmed, Preparing, Ready] {
        assert!(status.can_transition(Cancelled), "{status:?} should cancel");
    }
    assert!(!Delivered.can_transition(Cancelled));
    assert!(!Cancelled.can_transition(Cancelled));
    assert!(!Cancelled.can_transition(Pending));
}

#[test]
fn status_strings_round_trip() {
    use OrderStatus::*;
    for status in [Pending, Confirmed, Preparing, Ready, Delivered, Cancelled] {
        assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(OrderStatus::parse("shipped"), None);
}

#[test]
fn enums_serialize_lowercase_on_the_wire() {
    assert_eq!(
        serde_json::to_value(OrderStatus::Preparing).unwrap(),
        serde_json::json!("preparing")
    );
    assert_eq!(
        serde_json::to_value(ProductCategory::Savory).unwrap(),
        serde_json::json!("savory")
    );
    let parsed: ProductCategory = serde_json::from_value(serde_json::json!("juice")).unwrap();
    assert_eq!(parsed, ProductCategory::Juice);
}
