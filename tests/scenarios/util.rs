use std::panic::RefUnwindSafe;
use std::sync::atomic::{AtomicU32, Ordering};

use skipper::SuiteReport;
use skipper::suite::{Case, CaseFnHandle, CaseMeta, CaseResult};

pub fn case<F, T>(name: &'static str, func: F) -> Case
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

/// A case statically marked as skipped; its body panics if it ever runs.
pub fn marked(name: &'static str) -> Case {
    let mut case = case(name, || -> () {
        panic!("a statically skipped body must never run")
    });
    case.meta.skip = true;
    case
}

pub fn passing(name: &'static str) -> Case {
    case(name, || ())
}

pub fn failing(name: &'static str) -> Case {
    case(name, || -> Result<(), &'static str> {
        Err("deliberate failure")
    })
}

/// A case that fails its first `failures` attempts and passes afterwards,
/// with `retries` extra attempts allowed.
pub fn flaky(name: &'static str, failures: u32, retries: u32) -> Case {
    let attempts = AtomicU32::new(0);
    let mut case = case(name, move || -> Result<(), String> {
        let attempt = attempts.fetch_add(1, Ordering::Relaxed);
        match attempt < failures {
            true => Err(format!("attempt {} failed", attempt + 1)),
            false => Ok(()),
        }
    });
    case.meta.retries = retries;
    case
}

pub fn hook<F, T>(func: F) -> CaseFnHandle
where
    F: Fn() -> T + RefUnwindSafe + 'static,
    T: Into<CaseResult>,
{
    CaseFnHandle::from_boxed(func)
}

/// The report flattened to `(path, status label)` pairs, in execution order.
pub fn summary(report: &SuiteReport) -> Vec<(&str, &'static str)> {
    report
        .outcomes
        .iter()
        .map(|(path, outcome)| {
            let label = match () {
                _ if outcome.passed() => "passed",
                _ if outcome.skipped() => "skipped",
                _ => "failed",
            };
            (path.as_str(), label)
        })
        .collect()
}
