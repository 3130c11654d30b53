// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes accounts.

mod auth;
mod render;
mod settings;

use std::sync::Arc;

use serde_json::Value;

use super::{Account, AccountError, AccountType, FreeForm, SpinnakerAccountType, TypesFactory};
use crate::k8s::SpinnakerAccount;

pub use auth::{KubernetesAuth, KUBECONFIG_CONTENTS, KUBECONFIG_FILE, USE_SERVICE_ACCOUNT};
pub use settings::{CachingPolicy, CustomResource, DockerRegistry, KubernetesSettings};

pub const NAME: &str = "name";

/// Keys owned by the resolver. They never pass through as settings.
pub const RESERVED_KEYS: [&str; 4] = [NAME, KUBECONFIG_FILE, USE_SERVICE_ACCOUNT, KUBECONFIG_CONTENTS];

const SERVICES: &[&str] = &["clouddriver"];

/// A resolved Kubernetes account.
///
/// Built once per resolution and not mutated afterwards. Pass-through
/// settings are held exactly as given; [`Self::settings`] is a typed view
/// over them.
#[derive(Debug, Clone, PartialEq)]
pub struct KubernetesAccount {
    name: String,
    auth: Option<KubernetesAuth>,
    env: FreeForm,
    raw_settings: FreeForm,
    settings: KubernetesSettings,
}

impl KubernetesAccount {
    /// # Errors
    /// Returns `AccountError::MissingName` if `name` is empty.
    pub fn new(name: impl Into<String>, auth: Option<KubernetesAuth>) -> Result<Self, AccountError> {
        let name = name.into();
        if name.is_empty() {
            return Err(AccountError::MissingName {
                provider: SpinnakerAccountType::Kubernetes,
            });
        }
        Ok(Self {
            name,
            auth,
            env: FreeForm::new(),
            raw_settings: FreeForm::new(),
            settings: KubernetesSettings::default(),
        })
    }

    /// Replace pass-through settings with typed ones.
    ///
    /// # Errors
    /// Returns `AccountError::Render` if the settings cannot be encoded.
    pub fn with_settings(mut self, settings: KubernetesSettings) -> Result<Self, AccountError> {
        self.raw_settings = settings.to_free_form()?;
        self.settings = settings;
        Ok(self)
    }

    /// Replace pass-through settings with a free-form map, kept verbatim.
    pub fn with_raw_settings(mut self, raw: FreeForm) -> Self {
        self.settings = KubernetesSettings::from_free_form_lenient(&raw);
        self.raw_settings = raw;
        self
    }

    pub fn with_env(mut self, env: FreeForm) -> Self {
        self.env = env;
        self
    }

    pub fn auth(&self) -> Option<&KubernetesAuth> {
        self.auth.as_ref()
    }

    pub fn settings(&self) -> &KubernetesSettings {
        &self.settings
    }

    pub fn raw_settings(&self) -> &FreeForm {
        &self.raw_settings
    }
}

impl Account for KubernetesAccount {
    fn name(&self) -> &str {
        &self.name
    }

    fn account_type(&self) -> SpinnakerAccountType {
        SpinnakerAccountType::Kubernetes
    }

    fn env(&self) -> &FreeForm {
        &self.env
    }

    fn to_spinnaker_settings(&self) -> Result<FreeForm, AccountError> {
        render::to_spinnaker_settings(self)
    }
}

/// Resolver for Kubernetes accounts.
#[derive(Clone)]
pub struct KubernetesAccountType {
    factory: Arc<dyn TypesFactory>,
}

impl std::fmt::Debug for KubernetesAccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubernetesAccountType")
            .field("api_version", &self.factory.api_version())
            .finish()
    }
}

impl KubernetesAccountType {
    pub fn new(factory: Arc<dyn TypesFactory>) -> Self {
        Self { factory }
    }

    /// Decode a YAML manifest with the injected factory and resolve it.
    ///
    /// # Errors
    /// Decoding errors, then the same errors as [`AccountType::from_crd`].
    pub fn from_manifest(&self, manifest: &str) -> Result<KubernetesAccount, AccountError> {
        let account = self.factory.decode_account(manifest)?;
        self.from_crd(&account)
    }

    /// Build a manifest that resolves back to `account`.
    pub fn to_crd(&self, account: &KubernetesAccount) -> SpinnakerAccount {
        let mut crd = self.factory.new_account();
        crd.metadata.name = account.name.clone();
        crd.spec.enabled = true;
        crd.spec.account_type = Some(SpinnakerAccountType::Kubernetes);
        crd.spec.kubernetes = Some(match &account.auth {
            Some(auth) => auth.to_spec(),
            None => Default::default(),
        });
        crd.spec.settings = account.raw_settings.clone();
        crd.spec.settings.insert(NAME.to_string(), Value::String(account.name.clone()));
        crd
    }

    fn missing_name(&self) -> AccountError {
        AccountError::MissingName {
            provider: self.account_type(),
        }
    }
}

impl Default for KubernetesAccountType {
    fn default() -> Self {
        Self::new(Arc::new(super::DefaultTypesFactory))
    }
}

impl AccountType for KubernetesAccountType {
    type Account = KubernetesAccount;

    fn account_type(&self) -> SpinnakerAccountType {
        SpinnakerAccountType::Kubernetes
    }

    fn accounts_key(&self) -> &'static str {
        "kubernetes.accounts"
    }

    fn config_accounts_key(&self) -> &'static str {
        "provider.kubernetes.accounts"
    }

    fn services(&self) -> &'static [&'static str] {
        SERVICES
    }

    /// Resolve from a manifest.
    ///
    /// The name comes from `settings.name`, falling back to
    /// `metadata.name`. Auth comes from the `kubernetes` section, falling
    /// back to auth keys in `settings`.
    ///
    /// # Errors
    /// `AccountError::NoKubernetesDefined` when `spec.kubernetes` is absent,
    /// whatever `settings` holds.
    fn from_crd(&self, account: &SpinnakerAccount) -> Result<KubernetesAccount, AccountError> {
        let Some(kube) = account.spec.kubernetes.as_ref() else {
            return Err(AccountError::NoKubernetesDefined);
        };

        let settings = &account.spec.settings;
        let name = match settings.get(NAME) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => account.metadata.name.clone(),
            Some(other) => {
                return Err(AccountError::InvalidSettings(format!(
                    "name must be a string, got {}",
                    other
                )))
            }
        };
        if name.is_empty() {
            return Err(self.missing_name());
        }

        let auth = match KubernetesAuth::from_spec(kube) {
            Some(auth) => Some(auth),
            None => KubernetesAuth::from_settings(settings)?,
        };
        tracing::debug!(
            account = %name,
            auth = auth.as_ref().map(KubernetesAuth::mode).unwrap_or("none"),
            "resolved account from manifest"
        );

        Ok(KubernetesAccount::new(name, auth)?.with_raw_settings(passthrough_settings(settings)))
    }

    fn from_spinnaker_config(&self, settings: &FreeForm) -> Result<KubernetesAccount, AccountError> {
        let name = match settings.get(NAME) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(self.missing_name()),
        };

        let auth = KubernetesAuth::from_settings(settings)?;
        tracing::debug!(
            account = %name,
            auth = auth.as_ref().map(KubernetesAuth::mode).unwrap_or("none"),
            "resolved account from settings"
        );

        Ok(KubernetesAccount::new(name, auth)?.with_raw_settings(passthrough_settings(settings)))
    }
}

/// Everything but the reserved keys, values untouched.
fn passthrough_settings(settings: &FreeForm) -> FreeForm {
    let mut rest = settings.clone();
    for key in RESERVED_KEYS {
        rest.remove(key);
    }
    rest
}
