use std::{any::Any, time::Duration};

use crate::suite::CaseResult;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CaseOutcome {
    pub status: CaseStatus,
    pub duration: Duration,
    /// Attempts actually made. Stays at zero for skipped cases.
    pub attempts: u32,
}

impl CaseOutcome {
    pub fn is_good(&self) -> bool {
        self.status.is_good()
    }

    pub fn is_bad(&self) -> bool {
        self.status.is_bad()
    }
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn skipped(&self) -> bool {
        self.status.skipped()
    }

    pub fn failed(&self) -> bool {
        self.status.failed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaseStatus {
    Passed,
    Skipped { cause: SkipCause },
    Failed(CaseFailure),
}

impl CaseStatus {
    pub fn is_good(&self) -> bool {
        matches!(self, CaseStatus::Passed | CaseStatus::Skipped { .. })
    }

    pub fn is_bad(&self) -> bool {
        matches!(self, CaseStatus::Failed(_))
    }
}

impl CaseStatus {
    pub fn passed(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }

    pub fn skipped(&self) -> bool {
        matches!(self, CaseStatus::Skipped { .. })
    }

    pub fn failed(&self) -> bool {
        matches!(self, CaseStatus::Failed(_))
    }
}

/// Why a case was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SkipCause {
    /// The case itself was statically marked as skipped.
    Marked,
    /// The controller decided against running it.
    FailFast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CaseFailure {
    Error(String),
    Panicked(String),
}

impl CaseFailure {
    pub fn from_panic(err: Box<dyn Any + Send + 'static>) -> Self {
        let message = err
            .downcast::<&'static str>()
            .map(|s| s.to_string())
            .or_else(|err| err.downcast::<String>().map(|s| *s))
            .unwrap_or_else(|_| String::from("non-string panic payload"));
        Self::Panicked(message)
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Error(message) | Self::Panicked(message) => message,
        }
    }
}

impl From<CaseResult> for CaseStatus {
    fn from(value: CaseResult) -> Self {
        match value.0 {
            Ok(_) => CaseStatus::Passed,
            Err(err) => CaseStatus::Failed(CaseFailure::Error(err)),
        }
    }
}
