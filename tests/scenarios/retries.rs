//! Retry semantics: a successful retry resolves the failure its earlier
//! attempts recorded, exhausted retries leave it live.

use pretty_assertions::assert_eq;
use skipper::policy::{FailFastPolicy, FailFastScope};
use skipper::suite::Group;

use crate::util::{flaky, passing, summary};

fn global() -> FailFastPolicy {
    FailFastPolicy {
        enabled: true,
        scope: FailFastScope::Global,
        verbose: false,
    }
}

#[test]
fn a_successful_retry_recovers_the_suite() {
    let suite = Group::new("suite").with_group(
        Group::new("main")
            .with_case(flaky("flaky", 1, 2))
            .with_case(passing("after")),
    );

    let report = skipper::runner(&suite).with_policy(global()).run();

    assert_eq!(
        summary(&report),
        [
            ("main > flaky", "passed"),
            ("main > after", "passed"),
        ]
    );
    assert_eq!(report.outcome("main > flaky").unwrap().attempts, 2);
    assert!(!report.has_failures());
}

#[test]
fn exhausted_retries_still_fail_fast() {
    let suite = Group::new("suite").with_group(
        Group::new("main")
            .with_case(flaky("hopeless", 5, 1))
            .with_case(passing("after")),
    );

    let report = skipper::runner(&suite).with_policy(global()).run();

    assert_eq!(
        summary(&report),
        [
            ("main > hopeless", "failed"),
            ("main > after", "skipped"),
        ]
    );
    assert_eq!(
        report.outcome("main > hopeless").unwrap().attempts,
        2
    );
}
