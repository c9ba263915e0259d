//! Contract check probe.
//!
//! Provides the `contract-probe` binary: a program that embeds
//! `contract-checks`, binds a handler, and runs a passing or failing check on
//! request. Harnesses run it as a child process to observe how a failed
//! check ends a process (exit status, signal, and stderr report).
//!
//! The bound handler is fixed at link time. What it does is chosen once at
//! startup from `--handler`, or from `CONTRACT_PROBE_HANDLER` when the flag
//! is absent:
//! - `default`: report on stderr, then abort
//! - `minimal`: abort with no output
//! - `json`: the record as one JSON line on stdout, then abort
//! - `unwind`: unwind to the top-level boundary, which prints
//!   `caught <json>` and exits with code 3

use std::io::Write;
use std::panic;
use std::process;
use std::sync::OnceLock;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use contract_checks::handler::{default_handle, minimal_handle, unwind_handle};
use contract_checks::{CheckMode, ContractViolation, Profile, ViolationKind};

/// Runs contract checks under a chosen violation handler.
#[derive(Parser)]
#[command(name = "contract-probe", about = "Runs contract checks under a chosen violation handler")]
struct Cli {
    /// What the bound handler does with a violation.
    #[arg(long, value_enum)]
    handler: Option<Strategy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    Default,
    Minimal,
    Unwind,
    Json,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run a check whose condition holds.
    Pass {
        /// Violation kind: a predefined name or an integer.
        #[arg(short, long, default_value = "precondition")]
        kind: String,
    },

    /// Run a check whose condition is false.
    Violate {
        /// Violation kind: a predefined name or an integer.
        #[arg(short, long, default_value = "precondition")]
        kind: String,

        /// Message passed to the check (one-argument form when absent).
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Print the active profile and the mode of each predefined kind as JSON.
    Profile,
}

const HANDLER_ENV: &str = "CONTRACT_PROBE_HANDLER";

static STRATEGY: OnceLock<Strategy> = OnceLock::new();

fn probe_handle(violation: &ContractViolation<'_>) -> ! {
    match STRATEGY.get().copied().unwrap_or(Strategy::Default) {
        Strategy::Default => default_handle(violation),
        Strategy::Minimal => minimal_handle(violation),
        Strategy::Unwind => unwind_handle(violation),
        Strategy::Json => {
            let mut stdout = std::io::stdout().lock();
            let _ = serde_json::to_writer(&mut stdout, violation);
            let _ = writeln!(stdout);
            let _ = stdout.flush();
            process::abort()
        }
    }
}

contract_checks::bind_handler!(probe_handle);

/// Prints the location of the check on the following source line.
macro_rules! announce_next_line {
    () => {
        announce(file!(), line!() + 1)
    };
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let strategy = match cli.handler {
        Some(strategy) => strategy,
        None => match strategy_from_env() {
            Ok(strategy) => strategy,
            Err(msg) => {
                eprintln!("Error: {}", msg);
                process::exit(1);
            }
        },
    };
    // Set once, before any check can run.
    let _ = STRATEGY.set(strategy);
    tracing::debug!(?strategy, profile = %Profile::ACTIVE, "probe configured");

    let exit_code = match cli.command {
        Commands::Pass { kind } => match parse_kind(&kind) {
            Ok(kind) => run_guarded(strategy, || {
                pass(kind);
                0
            }),
            Err(msg) => {
                eprintln!("Error: {}", msg);
                1
            }
        },
        Commands::Violate { kind, message } => match parse_kind(&kind) {
            Ok(kind) => run_guarded(strategy, || {
                violate(kind, message.as_deref());
                println!("returned");
                0
            }),
            Err(msg) => {
                eprintln!("Error: {}", msg);
                1
            }
        },
        Commands::Profile => print_profile(),
    };
    process::exit(exit_code);
}

/// Reads the handler strategy from the environment, defaulting to `default`.
fn strategy_from_env() -> Result<Strategy, String> {
    match std::env::var(HANDLER_ENV) {
        Ok(value) => Strategy::from_str(&value, true)
            .map_err(|e| format!("invalid {} '{}': {}", HANDLER_ENV, value, e)),
        Err(_) => Ok(Strategy::Default),
    }
}

fn parse_kind(s: &str) -> Result<ViolationKind, String> {
    s.parse::<ViolationKind>().map_err(|e| e.to_string())
}

/// Runs `f`, converting an unwinding violation into exit code 3.
///
/// Exit codes: whatever `f` returns, 3 = violation caught at this boundary.
fn run_guarded(strategy: Strategy, f: impl FnOnce() -> i32 + panic::UnwindSafe) -> i32 {
    if strategy == Strategy::Unwind {
        panic::set_hook(Box::new(|info| tracing::debug!("unwinding: {}", info)));
    }
    match panic::catch_unwind(f) {
        Ok(code) => code,
        Err(payload) => match payload.downcast::<ContractViolation<'static>>() {
            Ok(violation) => {
                let json = serde_json::to_string(&*violation).unwrap_or_else(|e| {
                    format!("{{\"error\": \"failed to serialize violation: {}\"}}", e)
                });
                println!("caught {}", json);
                3
            }
            Err(other) => panic::resume_unwind(other),
        },
    }
}

fn announce(file: &str, line: u32) {
    println!("expect {}:{}", file, line);
}

fn pass(kind: ViolationKind) {
    match kind {
        ViolationKind::PRECONDITION => {
            contract_checks::precondition!(true);
            contract_checks::precondition!(true, "% Message %");
        }
        ViolationKind::SAFETY_PRECONDITION => {
            contract_checks::safety_precondition!(true);
            contract_checks::safety_precondition!(true, "% Message %");
        }
        ViolationKind::POSTCONDITION => {
            contract_checks::postcondition!(true);
            contract_checks::postcondition!(true, "% Message %");
        }
        ViolationKind::INVARIANT => {
            contract_checks::invariant!(true);
            contract_checks::invariant!(true, "% Message %");
        }
        // An unconditional fatal error has no passing form.
        ViolationKind::UNCONDITIONAL_FATAL_ERROR => {}
        other => contract_checks::check::enforce(Profile::ACTIVE, other, true, ""),
    }
}

fn violate(kind: ViolationKind, message: Option<&str>) {
    match (kind, message) {
        (ViolationKind::PRECONDITION, None) => {
            announce_next_line!();
            contract_checks::precondition!(false);
        }
        (ViolationKind::PRECONDITION, Some(message)) => {
            announce_next_line!();
            contract_checks::precondition!(false, message);
        }
        (ViolationKind::SAFETY_PRECONDITION, None) => {
            announce_next_line!();
            contract_checks::safety_precondition!(false);
        }
        (ViolationKind::SAFETY_PRECONDITION, Some(message)) => {
            announce_next_line!();
            contract_checks::safety_precondition!(false, message);
        }
        (ViolationKind::POSTCONDITION, None) => {
            announce_next_line!();
            contract_checks::postcondition!(false);
        }
        (ViolationKind::POSTCONDITION, Some(message)) => {
            announce_next_line!();
            contract_checks::postcondition!(false, message);
        }
        (ViolationKind::INVARIANT, None) => {
            announce_next_line!();
            contract_checks::invariant!(false);
        }
        (ViolationKind::INVARIANT, Some(message)) => {
            announce_next_line!();
            contract_checks::invariant!(false, message);
        }
        (ViolationKind::UNCONDITIONAL_FATAL_ERROR, message) => {
            announce_next_line!();
            contract_checks::unconditional_fatal_error!(message.unwrap_or(""));
        }
        (other, message) => {
            announce_next_line!();
            contract_checks::check::enforce(Profile::ACTIVE, other, false, message.unwrap_or(""));
        }
    }
}

#[derive(Serialize)]
struct ProfileReport {
    profile: Profile,
    captures_condition: bool,
    traps: bool,
    modes: Vec<KindMode>,
}

#[derive(Serialize)]
struct KindMode {
    kind: ViolationKind,
    name: String,
    mode: CheckMode,
}

/// Prints the active profile as JSON. Returns exit code 0.
fn print_profile() -> i32 {
    let profile = Profile::ACTIVE;
    let report = ProfileReport {
        profile,
        captures_condition: profile.captures_condition(),
        traps: profile.traps(),
        modes: ViolationKind::PREDEFINED
            .into_iter()
            .map(|kind| KindMode {
                kind,
                name: kind.to_string(),
                mode: profile.mode(kind),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize profile: {}\"}}", e));
    println!("{}", json);
    0
}
