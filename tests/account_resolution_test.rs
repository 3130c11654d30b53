// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Account Resolution - End to End
//!
//! Manifest and free-form settings in, rendered Spinnaker settings out,
//! through the public API only.

use std::sync::Arc;

use serde_json::{json, Value};

use spinop_core::accounts::{
    Account, AccountError, AccountType, DefaultTypesFactory, FreeForm, KubernetesAccountType,
    KubernetesAuth, SpinnakerAccount, TypesFactory,
};

fn free_form(value: Value) -> FreeForm {
    match value {
        Value::Object(map) => map,
        _ => panic!("fixture must be an object"),
    }
}

/// Factory for a different API version, injected instead of the default.
struct V1Alpha1Factory;

impl TypesFactory for V1Alpha1Factory {
    fn api_version(&self) -> &str {
        "spinnaker.io/v1alpha1"
    }
}

// ============================================================================
// Manifest resolution
// ============================================================================

#[test]
fn missing_kubernetes_section_is_a_sentinel() {
    let resolver = KubernetesAccountType::default();
    let manifest = "metadata:\n  name: a\nspec:\n  type: Kubernetes\n";

    match resolver.from_manifest(manifest) {
        Err(AccountError::NoKubernetesDefined) => {}
        other => panic!("expected sentinel, got {:?}", other),
    }
}

#[test]
fn manifest_to_settings() {
    let resolver = KubernetesAccountType::default();
    let manifest = r#"
apiVersion: spinnaker.io/v1alpha2
kind: SpinnakerAccount
metadata:
  name: prod-cluster
spec:
  enabled: true
  type: Kubernetes
  kubernetes:
    useServiceAccount: true
  settings:
    namespaces: [apps]
    onlySpinnakerManaged: true
"#;
    let account = resolver.from_manifest(manifest).unwrap();
    let ss = account.to_spinnaker_settings().unwrap();

    assert_eq!(
        Value::Object(ss),
        json!({
            "name": "prod-cluster",
            "serviceAccount": true,
            "namespaces": ["apps"],
            "onlySpinnakerManaged": true,
        })
    );
}

#[test]
fn decoded_crd_resolves_like_manifest_text() {
    let manifest = "metadata:\n  name: a\nspec:\n  kubernetes: {}\n";
    let crd: SpinnakerAccount = DefaultTypesFactory.decode_account(manifest).unwrap();
    let resolver = KubernetesAccountType::default();

    assert_eq!(crd.api_version, "spinnaker.io/v1alpha2");
    assert_eq!(
        resolver.from_crd(&crd).unwrap(),
        resolver.from_manifest(manifest).unwrap()
    );
}

#[test]
fn injected_factory_stamps_its_version() {
    let resolver = KubernetesAccountType::new(Arc::new(V1Alpha1Factory));
    let account = resolver
        .from_spinnaker_config(&free_form(json!({"name": "a"})))
        .unwrap();

    let crd = resolver.to_crd(&account);
    assert_eq!(crd.api_version, "spinnaker.io/v1alpha1");
    assert_eq!(crd.kind, "SpinnakerAccount");
}

// ============================================================================
// Free-form resolution and rendering
// ============================================================================

#[test]
fn service_account_round_trips_through_settings() {
    let resolver = KubernetesAccountType::default();
    let account = resolver
        .from_spinnaker_config(&free_form(json!({"name": "test", "serviceAccount": true})))
        .unwrap();

    assert_eq!(account.name(), "test");
    assert_eq!(account.auth(), Some(&KubernetesAuth::ServiceAccount));
    assert_eq!(
        account.to_spinnaker_settings().unwrap().get("serviceAccount"),
        Some(&json!(true))
    );
}

#[test]
fn inline_kubeconfig_survives_render_and_resolve() {
    let resolver = KubernetesAccountType::default();
    let kubeconfig = r#"
apiVersion: v1
kind: Config
current-context: c
clusters:
- name: k
  cluster:
    server: https://10.0.0.1
contexts:
- name: c
  context:
    cluster: k
    user: u
users:
- name: u
  user:
    token: secret
"#;
    let first = resolver
        .from_spinnaker_config(&free_form(json!({
            "name": "inline",
            "kubeconfigContents": kubeconfig,
        })))
        .unwrap();

    let rendered = first.to_spinnaker_settings().unwrap();
    let second = resolver.from_spinnaker_config(&rendered).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_name_message_names_the_provider() {
    let resolver = KubernetesAccountType::default();
    let err = resolver
        .from_spinnaker_config(&free_form(json!({"serviceAccount": true})))
        .unwrap_err();

    assert_eq!(err.to_string(), "Kubernetes account missing name");
}
