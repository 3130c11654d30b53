// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Revalidation policy for accounts and other validated targets.
//!
//! Pure computation over a setting, a last-validated timestamp and the
//! current time. The current time always comes from a [`Clock`].

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Frequency used when none (or zero) is configured.
pub const DEFAULT_VALIDATION_FREQUENCY_SECONDS: i64 = 30;

/// Kubernetes-style int-or-string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    String(String),
}

impl IntOrString {
    /// Integer value; a non-numeric string yields 0.
    pub fn int_value(&self) -> i64 {
        match self {
            Self::Int(i) => *i,
            Self::String(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

impl Default for IntOrString {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl From<i64> for IntOrString {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// Whether a validation failure should block progress.
///
/// Encoded as an optional bool on the wire; unset is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum FailOnError {
    #[default]
    Unspecified,
    True,
    False,
}

impl From<Option<bool>> for FailOnError {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unspecified,
            Some(true) => Self::True,
            Some(false) => Self::False,
        }
    }
}

impl From<FailOnError> for Option<bool> {
    fn from(value: FailOnError) -> Self {
        match value {
            FailOnError::Unspecified => None,
            FailOnError::True => Some(true),
            FailOnError::False => Some(false),
        }
    }
}

impl FailOnError {
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

/// Policy for one validation target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSetting {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "FailOnError::is_unspecified")]
    pub fail_on_error: FailOnError,
    #[serde(default)]
    pub frequency_seconds: IntOrString,
}

impl ValidationSetting {
    /// Frequency in seconds actually applied. Never zero or negative.
    pub fn effective_frequency_seconds(&self) -> i64 {
        match self.frequency_seconds.int_value() {
            secs if secs <= 0 => DEFAULT_VALIDATION_FREQUENCY_SECONDS,
            secs => secs,
        }
    }

    /// Frequency actually applied. Saturates at [`Duration::MAX`] for
    /// values chrono cannot represent.
    pub fn effective_frequency(&self) -> Duration {
        Duration::try_seconds(self.effective_frequency_seconds()).unwrap_or(Duration::MAX)
    }

    /// Whether a target last validated at `last_valid` is due again.
    pub fn needs_validation(&self, last_valid: Option<DateTime<Utc>>, clock: &dyn Clock) -> bool {
        self.needs_validation_at(last_valid, clock.now())
    }

    /// Same as [`Self::needs_validation`] with an explicit `now`.
    ///
    /// Due strictly after `last_valid + frequency`; the boundary instant
    /// itself is not due. A deadline past the representable range is never
    /// reached.
    pub fn needs_validation_at(&self, last_valid: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        let Some(last) = last_valid else {
            return true;
        };
        let due = match last.checked_add_signed(self.effective_frequency()) {
            Some(deadline) => now > deadline,
            None => false,
        };
        tracing::debug!(%last, %now, due, "revalidation check");
        due
    }

    pub fn evaluate(&self, last_valid: Option<DateTime<Utc>>, clock: &dyn Clock) -> ValidationDecision {
        ValidationDecision {
            due: self.needs_validation(last_valid, clock),
            fatal: self.is_fatal(),
            frequency_seconds: self.effective_frequency_seconds(),
        }
    }

    /// Whether a validation failure blocks progress. Unset means yes.
    pub fn is_fatal(&self) -> bool {
        match self.fail_on_error {
            FailOnError::Unspecified | FailOnError::True => true,
            FailOnError::False => false,
        }
    }
}

/// Outcome of evaluating a policy against a last-validated timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDecision {
    pub due: bool,
    pub fatal: bool,
    pub frequency_seconds: i64,
}

/// Service-wide validation block of a SpinnakerService.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinnakerValidation {
    #[serde(default, skip_serializing_if = "FailOnError::is_unspecified")]
    pub fail_on_error: FailOnError,
    #[serde(default)]
    pub frequency_seconds: IntOrString,
    /// Per-provider overrides, keyed by provider name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub providers: BTreeMap<String, ValidationSetting>,
}

impl SpinnakerValidation {
    /// Service-wide setting, always enabled, with the default frequency
    /// filled in.
    pub fn get_validation_settings(&self) -> ValidationSetting {
        let frequency_seconds = if self.frequency_seconds.int_value() == 0 {
            IntOrString::Int(DEFAULT_VALIDATION_FREQUENCY_SECONDS)
        } else {
            self.frequency_seconds.clone()
        };
        ValidationSetting {
            enabled: true,
            fail_on_error: self.fail_on_error,
            frequency_seconds,
        }
    }

    /// Provider override whose name matches case-insensitively.
    pub fn provider(&self, name: &str) -> Option<&ValidationSetting> {
        self.providers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, s)| s)
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
