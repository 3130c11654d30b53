// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Authentication mode selection.
//!
//! Precedence is fixed: kubeconfig file, then service account, then inline
//! kubeconfig. The first usable key wins and the rest are not inspected.

use serde_json::Value;

use crate::accounts::{AccountError, FreeForm};
use crate::k8s::{KubeConfig, KubernetesAuthSpec};

pub const KUBECONFIG_FILE: &str = "kubeconfigFile";
pub const USE_SERVICE_ACCOUNT: &str = "serviceAccount";
pub const KUBECONFIG_CONTENTS: &str = "kubeconfigContents";

/// How Spinnaker authenticates against the cluster. One mode at most.
#[derive(Debug, Clone, PartialEq)]
pub enum KubernetesAuth {
    /// The service account Spinnaker itself runs as.
    ServiceAccount,
    /// Path to a kubeconfig file.
    KubeconfigFile(String),
    /// Kubeconfig document carried inline.
    KubeconfigContents(Box<KubeConfig>),
}

impl KubernetesAuth {
    pub fn mode(&self) -> &'static str {
        match self {
            Self::ServiceAccount => "service-account",
            Self::KubeconfigFile(_) => "kubeconfig-file",
            Self::KubeconfigContents(_) => "kubeconfig-contents",
        }
    }

    /// Select a mode from a free-form settings map.
    ///
    /// Returns `Ok(None)` when no auth key is usable.
    ///
    /// # Errors
    /// Returns `AccountError::InvalidKubeconfig` if the selected inline
    /// kubeconfig does not decode.
    pub fn from_settings(settings: &FreeForm) -> Result<Option<Self>, AccountError> {
        if let Some(path) = non_empty_str(settings, KUBECONFIG_FILE) {
            return Ok(Some(Self::KubeconfigFile(path.to_string())));
        }

        match settings.get(USE_SERVICE_ACCOUNT) {
            Some(Value::Bool(true)) => return Ok(Some(Self::ServiceAccount)),
            Some(Value::Bool(false)) | Some(Value::Null) | None => {}
            Some(other) => {
                tracing::warn!(key = USE_SERVICE_ACCOUNT, value = %other, "ignoring non-boolean auth flag");
            }
        }

        let kubeconfig = match settings.get(KUBECONFIG_CONTENTS) {
            Some(Value::String(s)) if !s.trim().is_empty() => {
                KubeConfig::from_yaml(s).map_err(|e| AccountError::InvalidKubeconfig(e.to_string()))?
            }
            Some(Value::Object(m)) if !m.is_empty() => KubeConfig::from_value(Value::Object(m.clone()))
                .map_err(|e| AccountError::InvalidKubeconfig(e.to_string()))?,
            _ => return Ok(None),
        };
        Ok(Some(Self::KubeconfigContents(Box::new(kubeconfig))))
    }

    /// Select a mode from a manifest `spec.kubernetes` section.
    pub fn from_spec(spec: &KubernetesAuthSpec) -> Option<Self> {
        if let Some(path) = spec.kubeconfig_file.as_deref().filter(|p| !p.is_empty()) {
            return Some(Self::KubeconfigFile(path.to_string()));
        }
        if spec.use_service_account == Some(true) {
            return Some(Self::ServiceAccount);
        }
        spec.kubeconfig
            .as_ref()
            .map(|k| Self::KubeconfigContents(Box::new(k.clone())))
    }

    /// Inverse of [`Self::from_spec`].
    pub fn to_spec(&self) -> KubernetesAuthSpec {
        let mut spec = KubernetesAuthSpec::default();
        match self {
            Self::ServiceAccount => spec.use_service_account = Some(true),
            Self::KubeconfigFile(path) => spec.kubeconfig_file = Some(path.clone()),
            Self::KubeconfigContents(k) => spec.kubeconfig = Some((**k).clone()),
        }
        spec
    }
}

fn non_empty_str<'a>(settings: &'a FreeForm, key: &str) -> Option<&'a str> {
    match settings.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        Some(Value::String(_)) | Some(Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(key, value = %other, "ignoring non-string auth setting");
            None
        }
    }
}
