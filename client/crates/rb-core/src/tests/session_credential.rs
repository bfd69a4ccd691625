use crate::SessionCredential;

#[test]
fn test_clones_share_the_same_slot() {
    let credential = SessionCredential::new();
    let shared = credential.clone();

    credential.set("token-1");

    assert_eq!(shared.get().as_deref(), Some("token-1"));
    assert!(shared.is_present());
}

#[test]
fn test_clear_returns_previous_token() {
    let credential = SessionCredential::new();
    credential.set("token-1");

    assert_eq!(credential.clear().as_deref(), Some("token-1"));
    assert!(credential.get().is_none());
    assert!(credential.clear().is_none());
}

#[test]
fn test_debug_never_prints_token() {
    let credential = SessionCredential::new();
    credential.set("super-secret");

    let debug = format!("{credential:?}");

    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("redacted"));
}
