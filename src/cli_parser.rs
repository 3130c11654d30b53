// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Help text for spinop-accounts.

/// Print general usage information.
pub fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "spinop-accounts - Spinnaker account normalization v{}

USAGE:
    spinop-accounts [COMMAND] [OPTIONS]

COMMANDS:
    resolve            Resolve a SpinnakerAccount manifest and print its settings
    normalize          Resolve a free-form settings file and print its settings
    needs-validation   Evaluate the revalidation policy for a timestamp
    version            Show version information
    help               Show this help message

EXAMPLES:
    spinop-accounts resolve account.yaml
    spinop-accounts normalize settings.yaml
    spinop-accounts needs-validation 2024-03-01T12:00:00Z --provider kubernetes
    spinop-accounts needs-validation never

ENVIRONMENT:
    SPINOP_CONFIG                 Path to a TOML config file
    SPINOP_LOG_LEVEL              Log level when RUST_LOG is unset
    SPINOP_LOG_JSON               Emit JSON log lines (true/false)
    SPINOP_VALIDATION_FREQUENCY   Service-wide validation frequency in seconds
    SPINOP_FAIL_ON_ERROR          Service-wide fail-on-error (true/false)
    RUST_LOG                      Log filter (debug, info, warn, error)

EXIT CODES:
    0  Success
    1  Failure
    2  Configuration error
",
        version
    );
}

/// Print detailed help for a specific command.
pub fn print_command_help(command: &str) {
    match command {
        "resolve" => eprintln!(
            "USAGE:
    spinop-accounts resolve <MANIFEST>

Decode a SpinnakerAccount YAML manifest, resolve it as a Kubernetes
account and print the rendered Spinnaker settings as JSON.

A manifest without a spec.kubernetes section is rejected."
        ),
        "normalize" => eprintln!(
            "USAGE:
    spinop-accounts normalize <SETTINGS>

Read a YAML or JSON settings map (name, kubeconfigFile, serviceAccount,
kubeconfigContents, ...), resolve it and print the canonical rendering."
        ),
        "needs-validation" => eprintln!(
            "USAGE:
    spinop-accounts needs-validation <RFC3339|never> [--provider NAME]

Print whether a target last validated at the given time is due for
revalidation, whether a failure would be fatal, and the effective
frequency. Uses the [validation] block of the config."
        ),
        _ => {
            eprintln!(
                "No detailed help available for '{}'. Use 'spinop-accounts help' for general usage.",
                command
            );
        }
    }
}
