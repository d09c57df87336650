use lineuplist::types::{EXPIRY_BUFFER_SECS, TokenResponse, TokenState};

fn token_response(access: &str, refresh: Option<&str>, expires_in: i64) -> TokenResponse {
    TokenResponse {
        access_token: access.to_string(),
        refresh_token: refresh.map(|r| r.to_string()),
        expires_in,
    }
}

#[test]
fn test_from_response_applies_safety_buffer() {
    let now = 1_000_000;
    let state = TokenState::from_response(now, &token_response("acc", Some("ref"), 3600));

    assert_eq!(state.access_token, "acc");
    assert_eq!(state.refresh_token.as_deref(), Some("ref"));
    assert_eq!(state.expires_at, now + 3600 - EXPIRY_BUFFER_SECS);
}

#[test]
fn test_not_expired_strictly_before_expiry() {
    let now = 1_000_000;
    let state = TokenState::from_response(now, &token_response("acc", Some("ref"), 3600));

    assert!(!state.is_expired(state.expires_at - 1));
}

#[test]
fn test_expired_at_and_after_expiry() {
    let now = 1_000_000;
    let state = TokenState::from_response(now, &token_response("acc", Some("ref"), 3600));

    assert!(state.is_expired(state.expires_at));
    assert!(state.is_expired(state.expires_at + 1));
}

#[test]
fn test_apply_overwrites_access_token_and_expiry() {
    let mut state = TokenState::from_response(1_000_000, &token_response("old", Some("ref"), 3600));

    let later = 1_003_540;
    state.apply(later, &token_response("new", Some("ref2"), 3600));

    assert_eq!(state.access_token, "new");
    assert_eq!(state.refresh_token.as_deref(), Some("ref2"));
    assert_eq!(state.expires_at, later + 3600 - EXPIRY_BUFFER_SECS);
}

#[test]
fn test_apply_preserves_refresh_token_when_provider_omits_one() {
    let mut state = TokenState::from_response(1_000_000, &token_response("old", Some("ref"), 3600));

    state.apply(1_003_540, &token_response("new", None, 3600));

    assert_eq!(state.refresh_token.as_deref(), Some("ref"));
}

#[test]
fn test_token_without_refresh_stays_refreshless() {
    let state = TokenState::from_response(1_000_000, &token_response("acc", None, 3600));
    assert!(state.refresh_token.is_none());
}
