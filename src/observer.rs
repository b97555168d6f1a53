use crate::event::SuiteEvent;

/// A callback watching every lifecycle event of a suite run.
///
/// Observers run in registration order, before the controller's own handling
/// of the event. They are meant for side effects — diagnostics, screenshots,
/// artifact collection — and cannot alter the decision for a test.
///
/// Panics inside an observer are not caught; they propagate to whatever is
/// driving the run. Observers also must not call back into the run's control
/// surface (for example [`skip_next_test`](crate::skip_next_test)): the
/// controller is borrowed while they execute.
pub trait EventObserver {
    fn on_event(&mut self, event: &SuiteEvent<'_>);
}

impl<F> EventObserver for F
where
    F: FnMut(&SuiteEvent<'_>),
{
    fn on_event(&mut self, event: &SuiteEvent<'_>) {
        self(event)
    }
}
