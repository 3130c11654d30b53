// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for the revalidation policy.

use chrono::TimeZone;

use super::*;
use crate::clock::FixedClock;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn setting(freq: i64) -> ValidationSetting {
    ValidationSetting {
        enabled: true,
        fail_on_error: FailOnError::Unspecified,
        frequency_seconds: IntOrString::Int(freq),
    }
}

#[test]
fn test_never_validated_is_always_due() {
    let clock = FixedClock(t0());
    assert!(setting(0).needs_validation(None, &clock));
    assert!(setting(3600).needs_validation(None, &clock));
}

#[test]
fn test_default_frequency_boundary() {
    let s = setting(0);
    let last = t0() - Duration::seconds(10);

    // 10s ago: not due until 30s have elapsed.
    assert!(!s.needs_validation(Some(last), &FixedClock(t0())));
    assert!(!s.needs_validation_at(Some(last), last + Duration::seconds(29)));
    // Exactly at the boundary is not yet due.
    assert!(!s.needs_validation_at(Some(last), last + Duration::seconds(30)));
    assert!(s.needs_validation_at(Some(last), last + Duration::milliseconds(30_001)));
    assert!(s.needs_validation_at(Some(last), last + Duration::seconds(31)));
}

#[test]
fn test_configured_frequency() {
    let s = setting(120);
    let last = t0();

    assert!(!s.needs_validation_at(Some(last), last + Duration::seconds(60)));
    assert!(!s.needs_validation_at(Some(last), last + Duration::seconds(120)));
    assert!(s.needs_validation_at(Some(last), last + Duration::seconds(121)));
}

#[test]
fn test_effective_frequency_is_always_positive() {
    assert_eq!(setting(0).effective_frequency(), Duration::seconds(30));
    assert_eq!(setting(-5).effective_frequency(), Duration::seconds(30));
    assert_eq!(setting(45).effective_frequency(), Duration::seconds(45));

    let s = ValidationSetting {
        frequency_seconds: IntOrString::String("not-a-number".to_string()),
        ..Default::default()
    };
    assert_eq!(s.effective_frequency(), Duration::seconds(30));
}

#[test]
fn test_string_frequency() {
    let s = ValidationSetting {
        frequency_seconds: IntOrString::String("90".to_string()),
        ..Default::default()
    };
    assert_eq!(s.effective_frequency(), Duration::seconds(90));
}

#[test]
fn test_huge_frequency_saturates_instead_of_panicking() {
    let s: ValidationSetting =
        serde_json::from_str(r#"{"frequencySeconds":"9223372036854775807"}"#).unwrap();

    assert_eq!(s.effective_frequency_seconds(), i64::MAX);
    assert_eq!(s.effective_frequency(), Duration::MAX);
    assert!(!s.needs_validation_at(Some(t0()), t0()));
    assert!(!s.needs_validation(Some(t0()), &FixedClock(t0() + Duration::days(365 * 100))));
    // Never-validated targets stay due whatever the frequency.
    assert!(s.needs_validation(None, &FixedClock(t0())));
}

#[test]
fn test_frequency_beyond_chrono_range() {
    let s = setting(200_000_000_000_000_000);

    assert_eq!(s.effective_frequency(), Duration::MAX);
    assert!(!s.needs_validation_at(Some(t0()), t0()));
    assert!(!s.needs_validation_at(Some(DateTime::<Utc>::MIN_UTC), DateTime::<Utc>::MAX_UTC));
}

#[test]
fn test_frequency_within_range_but_deadline_overflows() {
    let s = setting(3600);
    assert!(!s.needs_validation_at(Some(DateTime::<Utc>::MAX_UTC), DateTime::<Utc>::MAX_UTC));
}

#[test]
fn test_is_fatal_tri_state() {
    let mut s = setting(0);
    assert!(s.is_fatal());

    s.fail_on_error = FailOnError::True;
    assert!(s.is_fatal());

    s.fail_on_error = FailOnError::False;
    assert!(!s.is_fatal());
}

#[test]
fn test_fail_on_error_wire_format() {
    let s: ValidationSetting = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
    assert_eq!(s.fail_on_error, FailOnError::Unspecified);

    let s: ValidationSetting =
        serde_json::from_str(r#"{"failOnError":null,"frequencySeconds":"15"}"#).unwrap();
    assert_eq!(s.fail_on_error, FailOnError::Unspecified);
    assert_eq!(s.frequency_seconds, IntOrString::String("15".to_string()));

    let s: ValidationSetting =
        serde_json::from_str(r#"{"failOnError":false,"frequencySeconds":15}"#).unwrap();
    assert_eq!(s.fail_on_error, FailOnError::False);
    assert_eq!(s.frequency_seconds, IntOrString::Int(15));

    let json = serde_json::to_string(&setting(0)).unwrap();
    assert!(!json.contains("failOnError"));
}

#[test]
fn test_service_validation_defaults() {
    let v = SpinnakerValidation::default();
    let s = v.get_validation_settings();

    assert!(s.enabled);
    assert!(s.is_fatal());
    assert_eq!(s.frequency_seconds, IntOrString::Int(DEFAULT_VALIDATION_FREQUENCY_SECONDS));
}

#[test]
fn test_service_validation_keeps_explicit_values() {
    let v = SpinnakerValidation {
        fail_on_error: FailOnError::False,
        frequency_seconds: IntOrString::Int(300),
        providers: BTreeMap::new(),
    };
    let s = v.get_validation_settings();

    assert!(!s.is_fatal());
    assert_eq!(s.effective_frequency(), Duration::seconds(300));
}

#[test]
fn test_provider_lookup_ignores_case() {
    let mut providers = BTreeMap::new();
    providers.insert("kubernetes".to_string(), setting(60));
    let v = SpinnakerValidation {
        providers,
        ..Default::default()
    };

    assert!(v.provider("Kubernetes").is_some());
    assert!(v.provider("KUBERNETES").is_some());
    assert!(v.provider("aws").is_none());
}
