use crate::UserProfile;

use serde_json::json;

#[test]
fn given_service_profile_when_deserialize_then_fields_populated() {
    let profile: UserProfile = serde_json::from_value(json!({
        "email": "cook@example.com",
        "name": "Ada",
        "picture": "https://example.com/ada.png",
        "favorites": []
    }))
    .unwrap();

    assert_eq!(profile.email.as_deref(), Some("cook@example.com"));
    assert_eq!(profile.display_name(), "Ada");
    assert!(profile.id.is_none());
    assert!(profile.terms_accepted.is_none());
    assert!(!profile.terms_pending());
}

#[test]
fn given_numeric_id_when_deserialize_then_id_is_string() {
    let profile: UserProfile = serde_json::from_value(json!({
        "id": 42,
        "termsAccepted": false
    }))
    .unwrap();

    assert_eq!(profile.id.as_deref(), Some("42"));
    assert!(profile.terms_pending());
}

#[test]
fn given_blank_name_when_display_name_then_falls_back() {
    let profile = UserProfile {
        name: Some("  ".into()),
        ..UserProfile::default()
    };

    assert_eq!(profile.display_name(), "Chef");
}
