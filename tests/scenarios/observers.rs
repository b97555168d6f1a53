//! Observer dispatch: every lifecycle event, in order, before the
//! controller's own handling.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use skipper::event::SuiteEvent;
use skipper::policy::{FailFastPolicy, FailFastScope};
use skipper::suite::Group;

use crate::util::{case, failing, passing};

fn label(event: &SuiteEvent<'_>) -> String {
    match event {
        SuiteEvent::GroupEnter { name, .. } => format!("enter {name}"),
        SuiteEvent::GroupExit { name } => format!("exit {name}"),
        SuiteEvent::TestStart { name, invocation } => format!("start {name} #{invocation}"),
        SuiteEvent::TestSuccess { name, .. } => format!("success {name}"),
        SuiteEvent::TestFailure { name, .. } => format!("failure {name}"),
        SuiteEvent::TestSkip { name } => format!("skip {name}"),
        SuiteEvent::HookFailure { group, kind, .. } => format!("hook failure {group} {kind}"),
        other => format!("{other:?}"),
    }
}

#[test]
fn observers_see_skips_and_failures_as_they_happen() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let suite = Group::new("suite").with_group(
        Group::new("main")
            .with_case(failing("fails"))
            .with_case(passing("skipped")),
    );

    let policy = FailFastPolicy {
        enabled: true,
        scope: FailFastScope::Global,
        verbose: false,
    };
    let _ = skipper::runner(&suite)
        .with_policy(policy)
        .with_observer(move |event: &SuiteEvent<'_>| sink.lock().unwrap().push(label(event)))
        .run();

    assert_eq!(
        seen.lock().unwrap().as_slice(),
        [
            "enter suite",
            "enter main",
            "start fails #1",
            "failure fails",
            "start skipped #1",
            "skip skipped",
            "exit main",
            "exit suite",
        ]
    );
}

#[test]
fn observers_can_be_registered_mid_run() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let suite = Group::new("suite").with_group(
        Group::new("main")
            .with_case(case("registers", move || {
                let sink = Arc::clone(&sink);
                skipper::register_observer(move |event: &SuiteEvent<'_>| {
                    sink.lock().unwrap().push(label(event));
                });
            }))
            .with_case(passing("watched")),
    );

    let _ = skipper::runner(&suite).run();

    // the first event after registration is the registering test's own
    // success
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        [
            "success registers",
            "start watched #1",
            "success watched",
            "exit main",
            "exit suite",
        ]
    );
}
