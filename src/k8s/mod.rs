// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes-facing types.
//!
//! Rust types matching the SpinnakerAccount CRD, the inline kubeconfig
//! document, and the SpinnakerService validation and status blocks.

pub mod kubeconfig;
pub mod status;
pub mod types;
pub mod validation;

// K8s CRD types - names match the actual CRD kind for compatibility
pub use kubeconfig::KubeConfig;
pub use status::{HashStatus, SpinnakerServiceStatus};
pub use types::{
    CrdMetadata, FreeForm, KubernetesAuthSpec, SpinnakerAccount, SpinnakerAccountSpec,
    SpinnakerAccountType,
};
pub use validation::{
    FailOnError, IntOrString, SpinnakerValidation, ValidationDecision, ValidationSetting,
    DEFAULT_VALIDATION_FREQUENCY_SECONDS,
};
