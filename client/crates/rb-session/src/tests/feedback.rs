use crate::tests::api_error;
use crate::{SessionError, SessionState, UserFeedback};

use rb_core::{CoreError, ErrorKind};

use std::time::Duration;

use serde_json::json;

const NOTICE: Duration = Duration::from_millis(1500);

#[test]
fn test_unauthorized_maps_to_signed_out() {
    let error = SessionError::from(api_error(401, json!({})));

    assert_eq!(UserFeedback::for_error(&error, NOTICE), UserFeedback::SignedOut);
}

#[test]
fn test_acceptance_required_maps_to_show_terms() {
    let error = SessionError::from(api_error(403, json!({"requires_terms": true})));

    assert_eq!(UserFeedback::for_error(&error, NOTICE), UserFeedback::ShowTerms);
}

#[test]
fn test_validation_maps_to_notice_with_duration() {
    let error = SessionError::from(CoreError::validation("Please enter a valid time"));

    assert_eq!(
        UserFeedback::for_error(&error, NOTICE),
        UserFeedback::notice("Please enter a valid time", NOTICE)
    );
}

#[test]
fn test_cooking_error_message_is_shown_verbatim() {
    let error = SessionError::from(api_error(
        400,
        json!({"error": "Let's keep it about food!", "is_cooking_error": true}),
    ));

    assert_eq!(
        UserFeedback::for_error(&error, NOTICE),
        UserFeedback::notice("Let's keep it about food!", NOTICE)
    );
}

#[test]
fn test_session_error_kinds() {
    assert_eq!(SessionError::login_in_progress().kind(), ErrorKind::Validation);
    assert_eq!(SessionError::cancelled().kind(), ErrorKind::Transient);
    assert_eq!(
        SessionError::invalid_transition(SessionState::Authenticated, "sign in").kind(),
        ErrorKind::Validation
    );
}

#[test]
fn test_invalid_transition_message_names_the_state() {
    let error = SessionError::invalid_transition(SessionState::AwaitingAcceptance, "sign in");

    assert_eq!(error.user_message(), "Cannot sign in while awaiting acceptance.");
}
