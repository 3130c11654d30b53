// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! CRD type definitions for the SpinnakerAccount resource.
//!
//! Only the shape is modeled here. What a section means for a given
//! account type is decided in [`crate::accounts`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::kubeconfig::KubeConfig;

/// Unstructured key/value bag, as handed over by the config decoder.
pub type FreeForm = serde_json::Map<String, serde_json::Value>;

/// Provider an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinnakerAccountType {
    Kubernetes,
    /// Any provider this crate does not resolve.
    #[serde(other)]
    Unknown,
}

impl SpinnakerAccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kubernetes => "Kubernetes",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for SpinnakerAccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SpinnakerAccount CRD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinnakerAccount {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub metadata: CrdMetadata,
    #[serde(default)]
    pub spec: SpinnakerAccountSpec,
}

/// SpinnakerAccount CRD spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinnakerAccountSpec {
    /// Whether the account is pushed to Spinnaker at all.
    #[serde(default)]
    pub enabled: bool,
    /// Provider type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<SpinnakerAccountType>,
    /// Kubernetes section. Absent and empty are different things.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesAuthSpec>,
    /// Provider settings, decoded per account type.
    #[serde(default, skip_serializing_if = "FreeForm::is_empty")]
    pub settings: FreeForm,
}

/// Contents of the `spec.kubernetes` section.
///
/// Decoding never fails: a known field whose value has the wrong shape is
/// left in `extra`, and a non-map section decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesAuthSpec {
    /// Path to a kubeconfig file available to Spinnaker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig_file: Option<String>,
    /// Use the service account Spinnaker runs as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_service_account: Option<bool>,
    /// Inline kubeconfig.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<KubeConfig>,
    #[serde(flatten)]
    pub extra: FreeForm,
}

impl<'de> Deserialize<'de> for KubernetesAuthSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut extra = match Value::deserialize(deserializer)? {
            Value::Object(map) => map,
            other => {
                tracing::warn!(value = %other, "kubernetes section is not a map, treating it as empty");
                FreeForm::new()
            }
        };
        Ok(Self {
            kubeconfig_file: take_field(&mut extra, "kubeconfigFile"),
            use_service_account: take_field(&mut extra, "useServiceAccount"),
            kubeconfig: take_field(&mut extra, "kubeconfig"),
            extra,
        })
    }
}

/// Remove and decode `key`. Values that do not decode stay in `map`.
fn take_field<T: DeserializeOwned>(map: &mut FreeForm, key: &str) -> Option<T> {
    let value = map.remove(key)?;
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            if !value.is_null() {
                tracing::warn!(key, error = %e, "ignoring malformed kubernetes section field");
            }
            map.insert(key.to_string(), value);
            None
        }
    }
}

/// Common CRD metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrdMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<std::collections::BTreeMap<String, String>>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
