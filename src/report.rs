use std::{process::ExitCode, time::Duration};

use crate::{event::HookKind, outcome::CaseOutcome};

/// Outcomes keyed by the case path: group names joined with `" > "`, the
/// suite root excluded.
pub type CaseOutcomes = Vec<(String, CaseOutcome)>;

#[derive(Debug)]
#[non_exhaustive]
pub struct SuiteReport {
    pub outcomes: CaseOutcomes,
    pub hook_failures: Vec<HookFailureRecord>,
    pub duration: Duration,
}

impl SuiteReport {
    pub fn outcome(&self, path: &str) -> Option<&CaseOutcome> {
        self.outcomes
            .iter()
            .find(|(outcome_path, _)| outcome_path == path)
            .map(|(_, outcome)| outcome)
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.passed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.failed()).count()
    }

    pub fn has_failures(&self) -> bool {
        !self.hook_failures.is_empty() || self.outcomes.iter().any(|(_, o)| o.is_bad())
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.has_failures() {
            true => ExitCode::FAILURE,
            false => ExitCode::SUCCESS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HookFailureRecord {
    pub group: String,
    pub kind: HookKind,
    pub message: String,
}
