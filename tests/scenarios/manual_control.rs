//! The manual control surface, driven from inside running test code.

use pretty_assertions::assert_eq;
use skipper::suite::Group;

use crate::util::{case, hook, marked, passing, summary};

#[test]
fn skip_next_test_skips_exactly_one() {
    let suite = Group::new("suite").with_group(
        Group::new("main")
            .with_case(case("requests skip", || skipper::skip_next_test()))
            .with_case(passing("skipped"))
            .with_case(passing("runs again")),
    );

    let report = skipper::runner(&suite).run();

    assert_eq!(
        summary(&report),
        [
            ("main > requests skip", "passed"),
            ("main > skipped", "skipped"),
            ("main > runs again", "passed"),
        ]
    );
}

#[test]
fn skip_block_covers_the_rest_of_the_block() {
    let suite = Group::new("suite").with_group(
        Group::new("main")
            .with_group(
                Group::new("abandoned")
                    .with_case(case("gives up", || skipper::skip_block(true)))
                    .with_case(passing("skipped"))
                    .with_group(Group::new("deeper").with_case(passing("also skipped"))),
            )
            .with_group(Group::new("sibling").with_case(passing("unaffected"))),
    );

    let report = skipper::runner(&suite).run();

    assert_eq!(
        summary(&report),
        [
            ("main > abandoned > gives up", "passed"),
            ("main > abandoned > skipped", "skipped"),
            ("main > abandoned > deeper > also skipped", "skipped"),
            ("main > sibling > unaffected", "passed"),
        ]
    );
}

#[test]
fn statically_marked_cases_are_reported_but_never_run() {
    let suite = Group::new("suite").with_group(
        Group::new("main")
            .with_case(marked("ignored"))
            .with_case(passing("runs")),
    );

    let report = skipper::runner(&suite).run();

    assert_eq!(
        summary(&report),
        [("main > ignored", "skipped"), ("main > runs", "passed")]
    );
    assert_eq!(report.outcome("main > ignored").unwrap().attempts, 0);
}

#[test]
fn hooks_can_request_skips_too() {
    let suite = Group::new("suite").with_group(
        Group::new("main")
            .with_before_all(hook(|| skipper::skip_next_test()))
            .with_case(passing("skipped"))
            .with_case(passing("runs")),
    );

    let report = skipper::runner(&suite).run();

    assert_eq!(
        summary(&report),
        [
            ("main > skipped", "skipped"),
            ("main > runs", "passed"),
        ]
    );
}
