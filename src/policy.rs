//! Run policy: whether fail-fast is active and how far a failure reaches.
//!
//! A policy is parsed once, before the run, from whatever structured options
//! value the integration hands over (project config, docblock pragma, CLI —
//! the controller does not care). It is immutable for the whole run; the only
//! thing test code may still flip afterwards is diagnostic verbosity, which
//! never changes behavior.

use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Policy for a single suite run.
///
/// All fields default to the most conservative reading: fail-fast off,
/// global scope, quiet diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FailFastPolicy {
    /// Is fail-fast active at all. When false, every test runs no matter
    /// what failed before it (manual skip requests still apply).
    pub enabled: bool,

    /// How far a still-unresolved failure reaches.
    pub scope: FailFastScope,

    /// Emit diagnostic output for every handled event. Diagnostics only,
    /// never behavior.
    pub verbose: bool,
}

impl FailFastPolicy {
    /// Parse a policy from a structured options value.
    ///
    /// Missing fields take their defaults and unrecognized sibling fields
    /// are ignored, so a larger configuration object can be passed through
    /// as-is. An unrecognized `scope` string is a fatal [`PolicyError`].
    pub fn from_options(options: &serde_json::Value) -> Result<Self, PolicyError> {
        Self::deserialize(options).map_err(PolicyError::from)
    }
}

/// The reach of an unresolved failure under an enabled policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailFastScope {
    /// A failure anywhere skips everything that has not run yet, until a
    /// fresh top-level group starts.
    #[default]
    Global,

    /// A failure only skips the remaining tests at or inside the group
    /// where it happened.
    Block,
}

impl FromStr for FailFastScope {
    type Err = PolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "global" => Ok(FailFastScope::Global),
            "block" => Ok(FailFastScope::Block),
            other => Err(PolicyError::UnknownScope {
                value: other.to_string(),
            }),
        }
    }
}

/// Fatal configuration errors. A run cannot start from a bad policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("unknown fail-fast scope `{value}`, expected `global` or `block`")]
    UnknownScope { value: String },

    #[error("invalid fail-fast options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}
