use lineuplist::spotify::http::{
    BackoffPolicy, DEFAULT_RETRY_AFTER_SECS, RETRY_MARGIN_SECS, RetryDecision,
};

#[test]
fn test_sleeps_until_attempts_run_out() {
    let policy = BackoffPolicy::default();

    // A [429(ra=1), 429(ra=1), 200] sequence: the first two responses are
    // classified as sleeps, the third never reaches classification.
    assert_eq!(policy.on_rate_limit(1, Some(1)), RetryDecision::Sleep(2));
    assert_eq!(policy.on_rate_limit(2, Some(1)), RetryDecision::Sleep(2));

    // Three 429s in a row: the last attempt hands the response back instead
    // of sleeping a third time.
    assert_eq!(policy.on_rate_limit(3, Some(1)), RetryDecision::GiveUp);
}

#[test]
fn test_wait_above_cap_aborts_immediately() {
    let policy = BackoffPolicy::default();

    // retry-after 20 with a 10s cap fails on the very first attempt.
    assert_eq!(
        policy.on_rate_limit(1, Some(20)),
        RetryDecision::Abort { wait_secs: 21 }
    );

    // The cap wins even on the final attempt.
    assert_eq!(
        policy.on_rate_limit(3, Some(20)),
        RetryDecision::Abort { wait_secs: 21 }
    );
}

#[test]
fn test_cap_boundary_is_exclusive() {
    let policy = BackoffPolicy::default();

    // 9 + 1 margin = 10, exactly the cap: still a sleep.
    assert_eq!(policy.on_rate_limit(1, Some(9)), RetryDecision::Sleep(10));

    // 10 + 1 margin = 11, just over: abort.
    assert_eq!(
        policy.on_rate_limit(1, Some(10)),
        RetryDecision::Abort { wait_secs: 11 }
    );
}

#[test]
fn test_missing_retry_after_uses_default() {
    let policy = BackoffPolicy::default();
    assert_eq!(
        policy.on_rate_limit(1, None),
        RetryDecision::Sleep(DEFAULT_RETRY_AFTER_SECS + RETRY_MARGIN_SECS)
    );
}

#[test]
fn test_margin_is_added_to_server_delay() {
    let policy = BackoffPolicy::default();
    assert_eq!(
        policy.on_rate_limit(1, Some(4)),
        RetryDecision::Sleep(4 + RETRY_MARGIN_SECS)
    );
}

#[test]
fn test_single_attempt_policy_never_sleeps() {
    let policy = BackoffPolicy {
        max_attempts: 1,
        cap_secs: 10,
    };
    assert_eq!(policy.on_rate_limit(1, Some(1)), RetryDecision::GiveUp);
}

#[test]
fn test_larger_cap_tolerates_longer_waits() {
    let policy = BackoffPolicy {
        max_attempts: 3,
        cap_secs: 60,
    };
    assert_eq!(policy.on_rate_limit(1, Some(30)), RetryDecision::Sleep(31));
}
