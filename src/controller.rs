//! The fail-fast state machine.
//!
//! The controller is the only stateful piece of the crate. It follows one
//! depth-first suite traversal through a handful of counters: every
//! group-enter bumps the current depth, every group-exit drops it. A test or
//! hook failure pins the depth it happened at; exiting back out of that depth
//! unpins it again. Whether a test about to start must be skipped falls out
//! of comparing the current depth against those pins under the configured
//! [`FailFastPolicy`].
//!
//! Three things can cut across the plain policy:
//! - a group marked *optional* absorbs its failures when it exits, so the
//!   rest of the suite keeps running even under global scope,
//! - manual skip requests (one-shot or whole-block) work regardless of
//!   policy, even with fail-fast disabled,
//! - a successful retry of a failed test resolves the failure it recorded.
//!
//! The controller never executes anything and never stores test results; it
//! only answers [`SuiteEvent::TestStart`] with a [`Decision`] and trusts the
//! walker to honor it.

use std::collections::BTreeSet;
use std::{fmt, mem};

use crate::event::{Decision, SuiteEvent};
use crate::observer::EventObserver;
use crate::policy::{FailFastPolicy, FailFastScope};

/// The event-driven core deciding which tests still run after a failure.
///
/// One controller serves exactly one traversal; create a fresh one per run
/// and drop it afterwards. There is no cross-run state.
pub struct FailFastController {
    policy: FailFastPolicy,
    current_depth: u32,
    failed_at_depth: Option<u32>,
    optional_threshold: Option<u32>,
    suite_failed: bool,
    skip_next: bool,
    skip_blocks: BTreeSet<u32>,
    observers: Vec<Box<dyn EventObserver>>,
}

impl FailFastController {
    pub fn new(policy: FailFastPolicy) -> Self {
        Self {
            policy,
            current_depth: 0,
            failed_at_depth: None,
            optional_threshold: None,
            suite_failed: false,
            skip_next: false,
            skip_blocks: BTreeSet::new(),
            observers: Vec::new(),
        }
    }

    pub fn policy(&self) -> &FailFastPolicy {
        &self.policy
    }

    /// Feed one lifecycle event through the controller.
    ///
    /// Registered observers see the event first, in registration order. The
    /// returned [`Decision`] is only meaningful for a first-invocation
    /// [`SuiteEvent::TestStart`]; every other event yields [`Decision::Run`].
    pub fn handle(&mut self, event: &SuiteEvent<'_>) -> Decision {
        for observer in &mut self.observers {
            observer.on_event(event);
        }

        match *event {
            SuiteEvent::GroupEnter { root_child, .. } => {
                self.current_depth += 1;
                if root_child {
                    // a failure only reaches the rest of its own top-level
                    // group and the top-level groups after it
                    self.suite_failed = false;
                }
                Decision::Run
            }

            SuiteEvent::GroupExit { .. } => {
                self.on_group_exit();
                Decision::Run
            }

            SuiteEvent::HookFailure {
                group,
                kind,
                message,
            } => {
                self.record_failure();
                if self.policy.verbose {
                    // runners tend to swallow hook errors once the tests
                    // behind them are skipped, so surface them here
                    tracing::error!(group, hook = %kind, message, "hook failed");
                }
                Decision::Run
            }

            SuiteEvent::TestFailure { name, message } => {
                self.record_failure();
                if self.policy.verbose {
                    tracing::error!(test = name, message, "test failed");
                }
                Decision::Run
            }

            SuiteEvent::TestSuccess { invocation, .. } => {
                if invocation > 1 {
                    // a successful retry resolves the failure its earlier
                    // attempts recorded
                    self.suite_failed = false;
                }
                self.failed_at_depth = None;
                Decision::Run
            }

            SuiteEvent::TestSkip { name } => {
                if self.policy.verbose {
                    tracing::info!(test = name, "test skipped");
                }
                Decision::Run
            }

            SuiteEvent::TestStart { name, invocation } => {
                if self.policy.verbose {
                    tracing::debug!(test = name, invocation, "test starting");
                }
                match invocation {
                    // the decision is made exactly once, at the first
                    // attempt; retries neither re-evaluate nor consume
                    // manual flags
                    1 => self.decide(),
                    _ => Decision::Run,
                }
            }
        }
    }

    /// Mark the group the traversal is currently inside as optional.
    ///
    /// Failures within do not outlive the group: when it exits, the
    /// suite-level failure state is cleared along with it. Call this from
    /// the group's setup hook.
    pub fn mark_block_optional(&mut self) {
        self.optional_threshold = Some(self.current_depth);
    }

    /// Skip exactly the next test that would otherwise start, regardless of
    /// policy.
    pub fn skip_next_test(&mut self) {
        self.skip_next = true;
    }

    /// Request (or withdraw) skipping of every remaining test at the current
    /// depth or deeper. The request expires when the group recording it
    /// exits.
    pub fn skip_block(&mut self, active: bool) {
        match active {
            true => {
                self.skip_blocks.insert(self.current_depth);
            }
            false => {
                self.skip_blocks.remove(&self.current_depth);
            }
        }
    }

    /// Toggle diagnostic output. Never changes behavior; [`Self::policy`]
    /// reflects the new value.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.policy.verbose = verbose;
    }

    /// Append an observer invoked for every subsequent event, after the
    /// ones already registered.
    pub fn register_observer(&mut self, observer: impl EventObserver + 'static) {
        self.register_boxed_observer(Box::new(observer));
    }

    pub(crate) fn register_boxed_observer(&mut self, observer: Box<dyn EventObserver>) {
        self.observers.push(observer);
    }

    fn record_failure(&mut self) {
        self.failed_at_depth = Some(self.current_depth);
        self.suite_failed = true;
    }

    fn on_group_exit(&mut self) {
        let exited = self.current_depth;

        if self.optional_threshold.is_some_and(|threshold| exited <= threshold) {
            // the optional block absorbs its failure on the way out
            self.optional_threshold = None;
            self.failed_at_depth = None;
            self.suite_failed = false;
        }

        if self.failed_at_depth.is_some_and(|failed| exited <= failed) {
            self.failed_at_depth = None;
        }

        // block-skip markers die with the group that recorded them
        self.skip_blocks.retain(|&depth| depth < exited);

        self.current_depth = self.current_depth.saturating_sub(1);
    }

    fn decide(&mut self) -> Decision {
        let depth = self.current_depth;

        if self.policy.verbose {
            tracing::trace!(
                depth,
                enabled = self.policy.enabled,
                suite_failed = self.suite_failed,
                failed_at_depth = ?self.failed_at_depth,
                optional_threshold = ?self.optional_threshold,
                "evaluating skip decision"
            );
        }

        if self.skip_blocks.range(..=depth).next().is_some() {
            return Decision::Skip;
        }
        if mem::take(&mut self.skip_next) {
            return Decision::Skip;
        }

        if !self.policy.enabled {
            return Decision::Run;
        }

        if let (Some(threshold), Some(failed)) = (self.optional_threshold, self.failed_at_depth)
            && depth >= failed
            && depth >= threshold
        {
            // an unresolved failure inside an optional scope skips the rest
            // of that scope, whatever the configured policy says
            return Decision::Skip;
        }

        match self.policy.scope {
            FailFastScope::Global if self.suite_failed => Decision::Skip,
            FailFastScope::Block
                if self.optional_threshold.is_none()
                    && self.failed_at_depth.is_some_and(|failed| depth >= failed) =>
            {
                Decision::Skip
            }
            _ => Decision::Run,
        }
    }
}

impl fmt::Debug for FailFastController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailFastController")
            .field("policy", &self.policy)
            .field("current_depth", &self.current_depth)
            .field("failed_at_depth", &self.failed_at_depth)
            .field("optional_threshold", &self.optional_threshold)
            .field("suite_failed", &self.suite_failed)
            .field("skip_next", &self.skip_next)
            .field("skip_blocks", &self.skip_blocks)
            .field("observers", &self.observers.len())
            .finish()
    }
}
