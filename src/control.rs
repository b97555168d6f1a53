//! The manual control surface for running test code.
//!
//! While [`SuiteRunner::run`](crate::SuiteRunner::run) walks the tree, the
//! run's controller is reachable through a thread local, so test bodies and
//! group hooks can steer the run without holding a reference to anything:
//!
//! - [`mark_block_optional`] from a `before_all` hook exempts the current
//!   group's failures from the rest of the suite,
//! - [`skip_next_test`] and [`skip_block`] request manual skips,
//! - [`set_verbose`] toggles diagnostics,
//! - [`register_observer`] adds a late observer.
//!
//! These are test-facing helpers: calling them with no run active on the
//! thread panics, as does calling them from inside an observer (the
//! controller is borrowed while observers execute).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::controller::FailFastController;
use crate::observer::EventObserver;

thread_local! {
    static ACTIVE: RefCell<Weak<RefCell<FailFastController>>> =
        RefCell::new(Weak::new());
}

/// Wires the thread-local control surface to one run's controller and
/// restores the previous wiring on drop.
pub(crate) struct ControlGuard {
    previous: Weak<RefCell<FailFastController>>,
}

impl ControlGuard {
    pub(crate) fn install(controller: &Rc<RefCell<FailFastController>>) -> Self {
        let previous = ACTIVE.replace(Rc::downgrade(controller));
        Self { previous }
    }
}

impl Drop for ControlGuard {
    fn drop(&mut self) {
        ACTIVE.replace(std::mem::take(&mut self.previous));
    }
}

fn with_active(f: impl FnOnce(&mut FailFastController)) {
    ACTIVE.with_borrow(|active| match active.upgrade() {
        Some(controller) => f(&mut controller.borrow_mut()),
        None => panic!("no suite run is active on this thread"),
    });
}

/// Mark the group the walk is currently inside as optional.
///
/// Failures inside it do not outlive it; call this from the group's
/// `before_all` hook.
pub fn mark_block_optional() {
    with_active(|controller| controller.mark_block_optional());
}

/// Skip exactly the next test that would otherwise start, regardless of
/// policy.
pub fn skip_next_test() {
    with_active(|controller| controller.skip_next_test());
}

/// Request (or withdraw) skipping of every remaining test in the current
/// group and below. The request expires when the group exits.
pub fn skip_block(active: bool) {
    with_active(|controller| controller.skip_block(active));
}

/// Toggle diagnostic output for the rest of the run.
pub fn set_verbose(verbose: bool) {
    with_active(|controller| controller.set_verbose(verbose));
}

/// Register an observer on the running controller; it sees every event from
/// the next one on.
pub fn register_observer(observer: impl EventObserver + 'static) {
    with_active(move |controller| controller.register_observer(observer));
}
