// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rendering a resolved account back into Spinnaker settings.

use serde_json::Value;

use super::{KubernetesAccount, KubernetesAuth, RESERVED_KEYS};
use super::{KUBECONFIG_CONTENTS, KUBECONFIG_FILE, NAME, USE_SERVICE_ACCOUNT};
use crate::accounts::{AccountError, FreeForm};

/// Settings first, then name and auth. Reserved keys always come from the
/// account, never from pass-through settings.
pub(super) fn to_spinnaker_settings(account: &KubernetesAccount) -> Result<FreeForm, AccountError> {
    let mut out = account.raw_settings.clone();
    for key in RESERVED_KEYS {
        if out.remove(key).is_some() {
            tracing::debug!(account = %account.name, key, "dropping pass-through setting shadowed by reserved key");
        }
    }

    out.insert(NAME.to_string(), Value::String(account.name.clone()));
    match &account.auth {
        Some(KubernetesAuth::KubeconfigFile(path)) => {
            out.insert(KUBECONFIG_FILE.to_string(), Value::String(path.clone()));
        }
        Some(KubernetesAuth::ServiceAccount) => {
            out.insert(USE_SERVICE_ACCOUNT.to_string(), Value::Bool(true));
        }
        Some(KubernetesAuth::KubeconfigContents(kubeconfig)) => {
            let contents = kubeconfig
                .to_yaml()
                .map_err(|e| AccountError::Render(e.to_string()))?;
            out.insert(KUBECONFIG_CONTENTS.to_string(), Value::String(contents));
        }
        None => {}
    }
    Ok(out)
}
