//! Lifecycle events and the run/skip decision.
//!
//! A suite run is one depth-first traversal of a group/case tree. At every
//! point where that traversal changes shape — entering or leaving a group,
//! starting a test, learning its outcome — the walker produces one
//! [`SuiteEvent`] and feeds it to the controller.
//!
//! Events are strictly sequential: there is never more than one in flight,
//! and a new event is only produced once the previous one has been fully
//! handled. The only event with a meaningful answer is a first-invocation
//! [`SuiteEvent::TestStart`], which yields a [`Decision`].

use std::fmt;

/// A single lifecycle event from a depth-first suite traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuiteEvent<'t> {
    /// A group ("describe" block) is being entered.
    ///
    /// `root_child` is true for groups sitting directly under the suite
    /// root, i.e. the start of a fresh top-level group. The suite root
    /// itself is entered with `root_child = false`.
    GroupEnter { name: &'t str, root_child: bool },

    /// The most recently entered group is being exited.
    GroupExit { name: &'t str },

    /// A test is about to run.
    ///
    /// `invocation` counts attempts starting at 1. Only the first invocation
    /// is eligible for a [`Decision::Skip`]; retries of a test that already
    /// started are never re-evaluated.
    TestStart { name: &'t str, invocation: u32 },

    /// A test attempt finished successfully.
    TestSuccess { name: &'t str, invocation: u32 },

    /// A test attempt failed.
    TestFailure { name: &'t str, message: &'t str },

    /// A test was skipped. Informational only; the controller reacts to
    /// this with diagnostics at most.
    TestSkip { name: &'t str },

    /// A group-level hook failed.
    ///
    /// Treated like a test failure for propagation, because runners do not
    /// reliably surface hook errors once the tests after them are skipped.
    HookFailure {
        group: &'t str,
        kind: HookKind,
        message: &'t str,
    },
}

/// The kind of group-level hook that produced a [`SuiteEvent::HookFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HookKind {
    BeforeAll,
    AfterAll,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookKind::BeforeAll => write!(f, "before_all"),
            HookKind::AfterAll => write!(f, "after_all"),
        }
    }
}

/// The controller's verdict for a test that is about to run.
///
/// Skipping is cooperative: the controller only answers, the walker is the
/// one that must not execute the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a skip decision only has an effect if the runner honors it"]
pub enum Decision {
    Run,
    Skip,
}

impl Decision {
    pub fn is_run(&self) -> bool {
        matches!(self, Decision::Run)
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Decision::Skip)
    }
}
