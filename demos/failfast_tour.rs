//! A tour of the fail-fast controller: a suite with a flaky test, an
//! optional block, a manual skip, and a genuine failure, walked under a
//! global-scope policy with verbose diagnostics.
//!
//! Run with `cargo run --example failfast_tour`.

use std::panic::RefUnwindSafe;
use std::process::ExitCode;
use std::sync::atomic::{AtomicU32, Ordering};

use skipper::event::SuiteEvent;
use skipper::policy::{FailFastPolicy, FailFastScope};
use skipper::suite::{Case, CaseFnHandle, CaseMeta, CaseResult, Group};
use tracing_subscriber::EnvFilter;

fn case<F, T>(name: &'static str, func: F) -> Case
where
    F: Fn() -> T + RefUnwindSafe + 'static,
    T: Into<CaseResult>,
{
    Case::new(
        CaseFnHandle::from_boxed(func),
        CaseMeta {
            name: name.into(),
            ..CaseMeta::default()
        },
    )
}

fn suite() -> Group {
    let attempts = AtomicU32::new(0);
    let mut flaky = case("flaky network call", move || -> Result<(), &str> {
        match attempts.fetch_add(1, Ordering::Relaxed) {
            0 => Err("connection reset"),
            _ => Ok(()),
        }
    });
    flaky.meta.retries = 2;

    Group::new("tour")
        .with_group(
            Group::new("warmup")
                .with_case(case("passes", || ()))
                .with_case(flaky)
                .with_case(case("skips its follower", || skipper::skip_next_test()))
                .with_case(case("manually skipped", || ())),
        )
        .with_group(
            Group::new("experimental")
                .with_before_all(CaseFnHandle::from_boxed(|| skipper::mark_block_optional()))
                .with_case(case("not ready yet", || -> Result<(), &str> {
                    Err("still failing, but only this block cares")
                }))
                .with_case(case("rest of the block", || ())),
        )
        .with_group(
            Group::new("serious")
                .with_case(case("still unaffected", || ()))
                .with_case(case("breaks the suite", || -> Result<(), &str> {
                    Err("this one counts")
                }))
                .with_case(case("collateral", || ())),
        )
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,skipper=trace".into()),
        )
        .init();

    let suite = suite();
    let policy = FailFastPolicy {
        enabled: true,
        scope: FailFastScope::Global,
        verbose: true,
    };

    let report = skipper::runner(&suite)
        .with_policy(policy)
        .with_observer(|event: &SuiteEvent<'_>| {
            if let SuiteEvent::TestFailure { name, .. } = event {
                tracing::warn!(test = name, "observed a failure, an integration could grab a screenshot here");
            }
        })
        .run();

    for (path, outcome) in &report.outcomes {
        tracing::info!(%path, status = ?outcome.status, attempts = outcome.attempts);
    }
    tracing::info!(
        passed = report.passed(),
        skipped = report.skipped(),
        failed = report.failed(),
        duration = ?report.duration,
    );

    report.exit_code()
}
