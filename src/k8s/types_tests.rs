// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for SpinnakerAccount CRD types.

use super::*;

#[test]
fn test_decode_account_without_kubernetes_section() {
    let manifest = r#"
apiVersion: spinnaker.io/v1alpha2
kind: SpinnakerAccount
metadata:
  name: account1
spec:
  type: Kubernetes
"#;
    let account: SpinnakerAccount = serde_yaml::from_str(manifest).unwrap();

    assert_eq!(account.metadata.name, "account1");
    assert_eq!(account.spec.account_type, Some(SpinnakerAccountType::Kubernetes));
    assert!(account.spec.kubernetes.is_none());
    assert!(account.spec.settings.is_empty());
}

#[test]
fn test_decode_account_with_empty_kubernetes_section() {
    let manifest = r#"
metadata:
  name: account1
spec:
  type: Kubernetes
  kubernetes: {}
"#;
    let account: SpinnakerAccount = serde_yaml::from_str(manifest).unwrap();

    assert_eq!(account.spec.kubernetes, Some(KubernetesAuthSpec::default()));
}

#[test]
fn test_unknown_account_type_decodes() {
    let manifest = r#"
spec:
  type: Aws
"#;
    let account: SpinnakerAccount = serde_yaml::from_str(manifest).unwrap();
    assert_eq!(account.spec.account_type, Some(SpinnakerAccountType::Unknown));
}

#[test]
fn test_kubernetes_section_keeps_unknown_fields() {
    let manifest = r#"
spec:
  kubernetes:
    kubeconfigFile: /etc/kube/config
    kubeconfigSecret:
      name: my-secret
      key: config
"#;
    let account: SpinnakerAccount = serde_yaml::from_str(manifest).unwrap();
    let kube = account.spec.kubernetes.unwrap();

    assert_eq!(kube.kubeconfig_file.as_deref(), Some("/etc/kube/config"));
    assert!(kube.extra.contains_key("kubeconfigSecret"));
}

#[test]
fn test_serialize_account_omits_empty_sections() {
    let account = SpinnakerAccount {
        api_version: "spinnaker.io/v1alpha2".to_string(),
        kind: "SpinnakerAccount".to_string(),
        metadata: CrdMetadata {
            name: "prod".to_string(),
            namespace: None,
            labels: None,
        },
        spec: SpinnakerAccountSpec {
            enabled: true,
            account_type: Some(SpinnakerAccountType::Kubernetes),
            kubernetes: None,
            settings: FreeForm::new(),
        },
    };

    let json = serde_json::to_string(&account).unwrap();
    assert!(json.contains("\"apiVersion\":\"spinnaker.io/v1alpha2\""));
    assert!(json.contains("\"type\":\"Kubernetes\""));
    assert!(!json.contains("kubernetes"));
    assert!(!json.contains("settings"));
}

#[test]
fn test_account_type_display() {
    assert_eq!(SpinnakerAccountType::Kubernetes.to_string(), "Kubernetes");
}

#[test]
fn test_kubernetes_section_tolerates_malformed_fields() {
    let manifest = r#"
spec:
  kubernetes:
    kubeconfigFile: 5
    useServiceAccount: true
    kubeconfig: not-a-kubeconfig
"#;
    let account: SpinnakerAccount = serde_yaml::from_str(manifest).unwrap();
    let kube = account.spec.kubernetes.unwrap();

    assert_eq!(kube.kubeconfig_file, None);
    assert_eq!(kube.use_service_account, Some(true));
    assert_eq!(kube.kubeconfig, None);
    assert_eq!(kube.extra.get("kubeconfigFile"), Some(&serde_json::json!(5)));
    assert_eq!(
        kube.extra.get("kubeconfig"),
        Some(&serde_json::json!("not-a-kubeconfig"))
    );
}

#[test]
fn test_non_map_kubernetes_section_is_present_but_empty() {
    let manifest = r#"
spec:
  kubernetes: enabled
"#;
    let account: SpinnakerAccount = serde_yaml::from_str(manifest).unwrap();
    assert_eq!(account.spec.kubernetes, Some(KubernetesAuthSpec::default()));
}
