// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! spinop-core - account normalization and revalidation policy for the
//! Spinnaker operator.
//!
//! Turns loosely-typed account configuration (a `SpinnakerAccount` manifest
//! or a free-form settings map) into a canonical [`accounts::Account`], and
//! decides when a tracked resource must be revalidated.
//!
//! # Concurrency
//! Nothing here locks. [`k8s::SpinnakerServiceStatus`] is a plain map that
//! expects a single writer per resource; callers running several
//! reconciliation workers must serialize access to the same status.

pub mod accounts;
pub mod clock;
pub mod config;
pub mod k8s;
pub mod logging;

pub use accounts::{
    Account, AccountError, AccountType, DefaultTypesFactory, FreeForm, KubernetesAccount,
    KubernetesAccountType, KubernetesAuth, SpinnakerAccountType, TypesFactory,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use k8s::{
    FailOnError, HashStatus, IntOrString, SpinnakerAccount, SpinnakerServiceStatus,
    SpinnakerValidation, ValidationDecision, ValidationSetting,
};
