//! The sequential depth-first suite walk.
//!
//! [`runner`] takes a built [`Group`] tree and produces a [`SuiteRunner`],
//! which walks the tree exactly once: group hooks and test bodies execute in
//! declaration order, every lifecycle point is reported to the
//! [`FailFastController`], and each first test attempt only executes when the
//! controller answers [`Decision::Run`](crate::event::Decision::Run).
//!
//! The group passed to [`runner`] is the suite root. Entering it never resets
//! anything; its direct subgroups count as top-level groups, which is where
//! global-scope failure state gets a fresh start. The root's name stays out
//! of the reported case paths.

use std::cell::RefCell;
use std::panic::catch_unwind;
use std::rc::Rc;
use std::time::Instant;

use crate::control::ControlGuard;
use crate::controller::FailFastController;
use crate::event::{Decision, HookKind, SuiteEvent};
use crate::observer::EventObserver;
use crate::outcome::{CaseFailure, CaseOutcome, CaseStatus, SkipCause};
use crate::policy::FailFastPolicy;
use crate::report::{CaseOutcomes, HookFailureRecord, SuiteReport};
use crate::suite::{Case, CaseFnHandle, Group, SuiteNode};

/// Prepare a run over `suite` with a default (disabled) policy.
pub fn runner(suite: &Group) -> SuiteRunner<'_> {
    SuiteRunner {
        suite,
        policy: FailFastPolicy::default(),
        observers: Vec::new(),
    }
}

/// A configured, not yet started suite run.
///
/// While [`run`](Self::run) executes, the driving thread's control surface
/// ([`skip_next_test`](crate::skip_next_test) and friends) is wired to this
/// run's controller, so test bodies and hooks can call it directly.
pub struct SuiteRunner<'s> {
    suite: &'s Group,
    policy: FailFastPolicy,
    observers: Vec<Box<dyn EventObserver>>,
}

impl<'s> SuiteRunner<'s> {
    pub fn with_policy(self, policy: FailFastPolicy) -> Self {
        Self { policy, ..self }
    }

    /// Register an observer for every lifecycle event of the run, after the
    /// ones already registered.
    pub fn with_observer(mut self, observer: impl EventObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Walk the whole tree once and collect a [`SuiteReport`].
    pub fn run(self) -> SuiteReport {
        let now = Instant::now();

        let mut controller = FailFastController::new(self.policy);
        for observer in self.observers {
            controller.register_boxed_observer(observer);
        }

        let controller = Rc::new(RefCell::new(controller));
        let _control = ControlGuard::install(&controller);

        let mut walk = SuiteWalk {
            controller,
            depth: 0,
            path: Vec::new(),
            outcomes: Vec::new(),
            hook_failures: Vec::new(),
        };
        walk.walk_group(self.suite, false);

        SuiteReport {
            outcomes: walk.outcomes,
            hook_failures: walk.hook_failures,
            duration: now.elapsed(),
        }
    }
}

struct SuiteWalk<'s> {
    controller: Rc<RefCell<FailFastController>>,
    depth: u32,
    /// Group names below the suite root; the root stays out of case paths.
    path: Vec<&'s str>,
    outcomes: CaseOutcomes,
    hook_failures: Vec<HookFailureRecord>,
}

impl<'s> SuiteWalk<'s> {
    fn handle(&mut self, event: &SuiteEvent<'_>) -> Decision {
        self.controller.borrow_mut().handle(event)
    }

    fn walk_group(&mut self, group: &'s Group, root_child: bool) {
        // subgroups of the suite root are the top-level groups
        let is_root = self.depth == 0;
        self.depth += 1;

        let _ = self.handle(&SuiteEvent::GroupEnter {
            name: &group.name,
            root_child,
        });
        if !is_root {
            self.path.push(group.name.as_ref());
        }

        if let Some(hook) = &group.before_all {
            self.run_hook(group, hook, HookKind::BeforeAll);
        }

        for child in &group.children {
            match child {
                SuiteNode::Group(child) => self.walk_group(child, is_root),
                SuiteNode::Case(case) => self.run_case(case),
            }
        }

        if let Some(hook) = &group.after_all {
            self.run_hook(group, hook, HookKind::AfterAll);
        }

        if !is_root {
            self.path.pop();
        }
        let _ = self.handle(&SuiteEvent::GroupExit { name: &group.name });
        self.depth -= 1;
    }

    fn run_hook(&mut self, group: &'s Group, hook: &CaseFnHandle, kind: HookKind) {
        let message = match catch_unwind(|| hook.call()) {
            Ok(result) => match result.0 {
                Ok(()) => return,
                Err(message) => message,
            },
            Err(payload) => CaseFailure::from_panic(payload).message().to_string(),
        };

        let _ = self.handle(&SuiteEvent::HookFailure {
            group: &group.name,
            kind,
            message: &message,
        });
        self.hook_failures.push(HookFailureRecord {
            group: group.name.to_string(),
            kind,
            message,
        });
    }

    fn run_case(&mut self, case: &Case) {
        let name: &str = &case.name;
        let now = Instant::now();

        if case.skip {
            // statically skipped cases never even start
            let _ = self.handle(&SuiteEvent::TestSkip { name });
            self.skip_case(case, SkipCause::Marked, now);
            return;
        }

        let mut invocation = 1;
        let decision = self.handle(&SuiteEvent::TestStart { name, invocation });
        if decision.is_skip() {
            let _ = self.handle(&SuiteEvent::TestSkip { name });
            self.skip_case(case, SkipCause::FailFast, now);
            return;
        }

        let status = loop {
            let status = match catch_unwind(|| case.call()) {
                Ok(result) => CaseStatus::from(result),
                Err(payload) => CaseStatus::Failed(CaseFailure::from_panic(payload)),
            };

            let CaseStatus::Failed(failure) = &status else {
                let _ = self.handle(&SuiteEvent::TestSuccess { name, invocation });
                break status;
            };

            let _ = self.handle(&SuiteEvent::TestFailure {
                name,
                message: failure.message(),
            });
            if invocation > case.retries {
                break status;
            }
            invocation += 1;
            let _ = self.handle(&SuiteEvent::TestStart { name, invocation });
        };

        self.outcomes.push((
            self.case_path(case),
            CaseOutcome {
                status,
                duration: now.elapsed(),
                attempts: invocation,
            },
        ));
    }

    fn skip_case(&mut self, case: &Case, cause: SkipCause, since: Instant) {
        self.outcomes.push((
            self.case_path(case),
            CaseOutcome {
                status: CaseStatus::Skipped { cause },
                duration: since.elapsed(),
                attempts: 0,
            },
        ));
    }

    fn case_path(&self, case: &Case) -> String {
        let mut path = self.path.join(" > ");
        if !path.is_empty() {
            path.push_str(" > ");
        }
        path.push_str(&case.name);
        path
    }
}
