// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Account resolution.
//!
//! An [`AccountType`] turns either a SpinnakerAccount manifest or a
//! free-form settings map into a canonical [`Account`], and an account
//! renders itself back into the settings shape Spinnaker expects.

pub mod kubernetes;

use thiserror::Error;

use crate::k8s::{SpinnakerValidation, ValidationSetting};

pub use crate::k8s::{FreeForm, SpinnakerAccount, SpinnakerAccountType};
pub use kubernetes::{KubernetesAccount, KubernetesAccountType, KubernetesAuth, KubernetesSettings};

/// API version stamped on manifests built by [`DefaultTypesFactory`].
pub const DEFAULT_API_VERSION: &str = "spinnaker.io/v1alpha2";
/// CRD kind of an account manifest.
pub const ACCOUNT_KIND: &str = "SpinnakerAccount";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccountError {
    /// The manifest has no `spec.kubernetes` section at all.
    #[error("no kubernetes section defined")]
    NoKubernetesDefined,

    #[error("{provider} account missing name")]
    MissingName { provider: SpinnakerAccountType },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid inline kubeconfig: {0}")]
    InvalidKubeconfig(String),

    #[error("Invalid account manifest: {0}")]
    InvalidManifest(String),

    #[error("Unable to render account: {0}")]
    Render(String),
}

/// A resolved account.
pub trait Account: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn account_type(&self) -> SpinnakerAccountType;

    /// Auxiliary data carried alongside the account, never rendered.
    fn env(&self) -> &FreeForm;

    /// Render into the settings map Spinnaker reads.
    ///
    /// # Errors
    /// Returns `AccountError::Render` if a field cannot be encoded.
    fn to_spinnaker_settings(&self) -> Result<FreeForm, AccountError>;
}

/// Resolver for one provider's accounts.
pub trait AccountType {
    type Account: Account;

    fn account_type(&self) -> SpinnakerAccountType;

    /// Path of the account list in Spinnaker's service config.
    fn accounts_key(&self) -> &'static str;

    /// Path of the account list in the operator's config.
    fn config_accounts_key(&self) -> &'static str;

    /// Spinnaker services that consume these accounts.
    fn services(&self) -> &'static [&'static str];

    /// Resolve from a SpinnakerAccount manifest.
    ///
    /// # Errors
    /// See the implementation for the distinguished errors.
    fn from_crd(&self, account: &SpinnakerAccount) -> Result<Self::Account, AccountError>;

    /// Resolve from a free-form settings map.
    ///
    /// # Errors
    /// Returns `AccountError::MissingName` when `name` is absent or empty.
    fn from_spinnaker_config(&self, settings: &FreeForm) -> Result<Self::Account, AccountError>;

    /// Validation policy for this provider: a provider override if one
    /// matches, otherwise the service-wide setting.
    fn validation_settings(&self, validation: &SpinnakerValidation) -> ValidationSetting {
        match validation.provider(self.account_type().as_str()) {
            Some(setting) => setting.clone(),
            None => validation.get_validation_settings(),
        }
    }
}

/// Builds and decodes account manifests for one API version.
pub trait TypesFactory: Send + Sync {
    fn api_version(&self) -> &str;

    /// Empty manifest stamped with this factory's version and kind.
    fn new_account(&self) -> SpinnakerAccount {
        SpinnakerAccount {
            api_version: self.api_version().to_string(),
            kind: ACCOUNT_KIND.to_string(),
            ..Default::default()
        }
    }

    /// Decode a YAML manifest.
    ///
    /// # Errors
    /// Returns `AccountError::InvalidManifest` if the document does not
    /// decode or declares another kind.
    fn decode_account(&self, manifest: &str) -> Result<SpinnakerAccount, AccountError> {
        let mut account: SpinnakerAccount = serde_yaml::from_str(manifest)
            .map_err(|e| AccountError::InvalidManifest(e.to_string()))?;
        let template = self.new_account();

        if account.kind.is_empty() {
            account.kind = template.kind;
        } else if account.kind != template.kind {
            return Err(AccountError::InvalidManifest(format!(
                "expected kind {}, got {}",
                template.kind, account.kind
            )));
        }
        if account.api_version.is_empty() {
            account.api_version = template.api_version;
        }
        Ok(account)
    }
}

/// Factory for `spinnaker.io/v1alpha2` manifests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypesFactory;

impl TypesFactory for DefaultTypesFactory {
    fn api_version(&self) -> &str {
        DEFAULT_API_VERSION
    }
}
