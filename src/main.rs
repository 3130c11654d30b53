// Copyright 2024-2026 spinop-core Contributors
// SPDX-License-Identifier: Apache-2.0

//! spinop-accounts entry point.
//!
//! Resolves account manifests and settings files, and evaluates the
//! configured revalidation policy.

mod cli_parser;

use std::process::ExitCode;

use chrono::{DateTime, Utc};

use spinop_core::accounts::{Account, AccountType, FreeForm, KubernetesAccountType};
use spinop_core::config::{self, CoreConfig};
use spinop_core::{logging, SystemClock};

const EXIT_CONFIG_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "help" | "--help" | "-h" => {
            if let Some(sub) = args.get(2) {
                cli_parser::print_command_help(sub);
            } else {
                cli_parser::print_usage();
            }
            return ExitCode::SUCCESS;
        }
        "version" | "--version" | "-V" => {
            println!("spinop-accounts {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    let config = match config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };
    logging::init(&config.logging);

    match command {
        "resolve" => run_resolve(&args),
        "normalize" => run_normalize(&args),
        "needs-validation" => run_needs_validation(&args, &config),
        _ => {
            eprintln!("Unknown command: {}", command);
            cli_parser::print_usage();
            ExitCode::FAILURE
        }
    }
}

fn run_resolve(args: &[String]) -> ExitCode {
    let Some(path) = args.get(2) else {
        cli_parser::print_command_help("resolve");
        return ExitCode::FAILURE;
    };
    let manifest = match std::fs::read_to_string(path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let resolver = KubernetesAccountType::default();
    match resolver.from_manifest(&manifest) {
        Ok(account) => print_settings(&account),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_normalize(args: &[String]) -> ExitCode {
    let Some(path) = args.get(2) else {
        cli_parser::print_command_help("normalize");
        return ExitCode::FAILURE;
    };
    let settings: FreeForm = match std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_yaml::from_str::<FreeForm>(&s).map_err(|e| e.to_string()))
    {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let resolver = KubernetesAccountType::default();
    match resolver.from_spinnaker_config(&settings) {
        Ok(account) => print_settings(&account),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_settings(account: &dyn Account) -> ExitCode {
    let rendered = account
        .to_spinnaker_settings()
        .map_err(|e| e.to_string())
        .and_then(|ss| serde_json::to_string_pretty(&ss).map_err(|e| e.to_string()));
    match rendered {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_needs_validation(args: &[String], config: &CoreConfig) -> ExitCode {
    let mut last: Option<&str> = None;
    let mut provider: Option<&str> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--provider" => {
                if i + 1 < args.len() {
                    provider = Some(args[i + 1].as_str());
                    i += 2;
                } else {
                    eprintln!("Missing value for --provider");
                    return ExitCode::FAILURE;
                }
            }
            other if last.is_none() => {
                last = Some(other);
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                return ExitCode::FAILURE;
            }
        }
    }

    let last_valid = match last {
        None | Some("never") => None,
        Some(ts) => match DateTime::parse_from_rfc3339(ts) {
            Ok(t) => Some(t.with_timezone(&Utc)),
            Err(e) => {
                eprintln!("Invalid timestamp {}: {}", ts, e);
                return ExitCode::FAILURE;
            }
        },
    };

    let decision = config
        .validation_policy(provider)
        .evaluate(last_valid, &SystemClock);
    match serde_json::to_string(&decision) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
