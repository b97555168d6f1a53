//! Fail-fast control for nested test suites.
//!
//! A suite is a tree of groups ("describe" blocks) and test cases. This crate
//! walks such a tree exactly once, depth first, and decides for every test
//! about to run whether an earlier failure means it should be skipped
//! instead. How far a failure reaches is configured by a
//! [`FailFastPolicy`](policy::FailFastPolicy): globally, per block, or not at
//! all. Groups can opt out of propagation entirely by marking themselves
//! optional, and running test code can request manual skips.
//!
//! ```
//! use skipper::policy::FailFastPolicy;
//! use skipper::suite::{Case, CaseFnHandle, CaseMeta, Group};
//!
//! fn case(name: &'static str, func: CaseFnHandle) -> Case {
//!     Case::new(func, CaseMeta { name: name.into(), ..CaseMeta::default() })
//! }
//!
//! let suite = Group::new("suite").with_group(
//!     Group::new("numbers")
//!         .with_case(case("adds", CaseFnHandle::from_boxed(|| ())))
//!         .with_case(case(
//!             "fails",
//!             CaseFnHandle::from_boxed(|| -> Result<(), &str> { Err("nope") }),
//!         ))
//!         .with_case(case("skipped", CaseFnHandle::from_boxed(|| ()))),
//! );
//!
//! let report = skipper::runner(&suite)
//!     .with_policy(FailFastPolicy { enabled: true, ..FailFastPolicy::default() })
//!     .run();
//!
//! assert_eq!(report.passed(), 1);
//! assert_eq!(report.failed(), 1);
//! assert_eq!(report.skipped(), 1);
//! ```
//!
//! The decision logic itself lives in [`FailFastController`] and is usable
//! without the bundled walker: feed it [`SuiteEvent`](event::SuiteEvent)s
//! from any sequential depth-first traversal and honor the
//! [`Decision`](event::Decision) it returns for each test start.

pub mod event;
pub mod outcome;
pub mod policy;
pub mod suite;

mod control;
pub use control::*;

mod controller;
pub use controller::*;

mod observer;
pub use observer::*;

mod report;
pub use report::*;

mod runner;
pub use runner::*;

#[cfg(test)]
pub(crate) mod test_support;
