// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Typed Kubernetes provider settings.
//!
//! A read-only view over the pass-through settings map. Recognized fields
//! are typed, any other key lands in `extra`. Rendering always uses the map
//! the view was built from, so the view may be lossy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::accounts::{AccountError, FreeForm};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_group_membership: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_version: Option<String>,
    /// Roles per authorization (`READ`, `WRITE`, `EXECUTE`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_registries: Option<Vec<DockerRegistry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configure_image_pull_secrets: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_threads: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_namespaces: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_kinds: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_resources: Option<Vec<CustomResource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caching_policies: Option<Vec<CachingPolicy>>,
    #[serde(rename = "oAuthScopes", default, skip_serializing_if = "Option::is_none")]
    pub oauth_scopes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_spinnaker_managed: Option<bool>,
    #[serde(flatten)]
    pub extra: FreeForm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerRegistry {
    pub account_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,
    #[serde(flatten)]
    pub extra: FreeForm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomResource {
    pub kubernetes_kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spinnaker_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioned: Option<bool>,
    #[serde(flatten)]
    pub extra: FreeForm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachingPolicy {
    pub kubernetes_kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_entries_per_agent: Option<u32>,
    #[serde(flatten)]
    pub extra: FreeForm,
}

impl KubernetesSettings {
    /// Decode from a free-form map that no longer holds name or auth keys.
    ///
    /// # Errors
    /// Returns `AccountError::InvalidSettings` if a recognized key has the
    /// wrong shape.
    pub fn from_free_form(map: FreeForm) -> Result<Self, AccountError> {
        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| AccountError::InvalidSettings(e.to_string()))
    }

    /// Decode without failing. When a recognized key has an unexpected
    /// shape, the whole map is kept untyped in `extra`.
    pub fn from_free_form_lenient(map: &FreeForm) -> Self {
        match Self::from_free_form(map.clone()) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(error = %e, "settings do not fit the typed view, keeping them untyped");
                Self {
                    extra: map.clone(),
                    ..Default::default()
                }
            }
        }
    }

    /// Encode back to a free-form map.
    ///
    /// # Errors
    /// Returns `AccountError::Render` if encoding fails.
    pub fn to_free_form(&self) -> Result<FreeForm, AccountError> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(other) => Err(AccountError::Render(format!(
                "settings encoded as {} instead of a map",
                other
            ))),
            Err(e) => Err(AccountError::Render(e.to_string())),
        }
    }
}
