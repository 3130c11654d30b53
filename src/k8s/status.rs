// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hash-plus-timestamp records kept in a SpinnakerService status.
//!
//! The store has no internal locking. One reconciliation pass owns the
//! status of one resource; concurrent writers must be serialized by the
//! caller.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fingerprint of the last applied artifact and when it was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashStatus {
    #[serde(default)]
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl HashStatus {
    /// True for the zero record returned when no prior record existed.
    pub fn is_empty(&self) -> bool {
        self.hash.is_empty() && self.last_updated_at.is_none()
    }
}

/// Status fields of a SpinnakerService that this crate reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinnakerServiceStatus {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    last_deployed: HashMap<String, HashStatus>,
}

impl SpinnakerServiceStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `hash` at `key` and return the record it replaces.
    ///
    /// Both fields are overwritten on every call, even when `hash` equals
    /// the stored one. With no prior record the returned value is empty.
    pub fn update_hash_if_not_exist(&mut self, key: &str, hash: &str, t: DateTime<Utc>) -> HashStatus {
        let next = HashStatus {
            hash: hash.to_string(),
            last_updated_at: Some(t),
        };
        let prior = self.last_deployed.insert(key.to_string(), next).unwrap_or_default();
        if prior.hash != hash {
            tracing::debug!(key, prior = %prior.hash, hash, "hash changed");
        }
        prior
    }

    /// Copy of the record at `key`, if any.
    pub fn get_hash(&self, key: &str) -> Option<HashStatus> {
        self.last_deployed.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.last_deployed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_deployed.is_empty()
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
