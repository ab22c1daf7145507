//! CLI module for hostver
//!
//! This module provides a command-line view of the version records a loaded plugin would expose.
//!
//! ## Commands
//!
//! - `show` - Print the compiled-in and/or active `gcc.Version` records
//! - `call <FUNCTION>` - Call an exposed function by name
//! - `schema` - Print the `gcc.Version` field order
//!
//! ## Design
//!
//! Outside a real host there is no loader to hand over the running compiler's version, so the CLI plays that role:
//! the active version is assembled from `--active-*` flags (or `HOSTVER_ACTIVE_*` variables) and passed to
//! [`Plugin::init`] exactly as a host would.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hostver_runtime::Runtime;

use crate::native::{OwnedPluginVersion, native_text};
use crate::plugin::Plugin;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Inspect the host compiler version records exposed to the embedded runtime
#[derive(Parser, Debug)]
#[command(name = "hostver")]
#[command(version = VERSION)]
#[command(about = "Inspect the host compiler version records exposed to the embedded runtime", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub active: ActiveVersionArgs,
}

/// Version of the running compiler, as the host would hand it over at load time.
///
/// An omitted field is recorded as absent; `--active-revision ""` records an empty revision.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveVersionArgs {
    /// Release version of the running compiler (e.g. 12.2.0)
    #[arg(long = "active-basever", env = "HOSTVER_ACTIVE_BASEVER", value_name = "VERSION", global = true)]
    pub basever: Option<String>,

    /// Snapshot/build date of the running compiler
    #[arg(long = "active-datestamp", env = "HOSTVER_ACTIVE_DATESTAMP", value_name = "DATE", global = true)]
    pub datestamp: Option<String>,

    /// Development phase of the running compiler (experimental, prerelease, ...)
    #[arg(long = "active-devphase", env = "HOSTVER_ACTIVE_DEVPHASE", value_name = "PHASE", global = true)]
    pub devphase: Option<String>,

    /// VCS revision of the running compiler
    #[arg(long = "active-revision", env = "HOSTVER_ACTIVE_REVISION", value_name = "REV", global = true)]
    pub revision: Option<String>,

    /// Configure arguments of the running compiler
    #[arg(
        long = "active-configuration-arguments",
        env = "HOSTVER_ACTIVE_CONFIGURATION_ARGUMENTS",
        value_name = "ARGS",
        allow_hyphen_values = true,
        global = true
    )]
    pub configuration_arguments: Option<String>,
}

impl ActiveVersionArgs {
    /// Assemble the native version struct the plugin is initialized with.
    pub fn to_native(&self) -> CliResult<OwnedPluginVersion> {
        let text = |flag: &str, value: &Option<String>| {
            native_text(value.as_deref())
                .map_err(|e| CliError::failure(format!("Error: --active-{flag} is not a valid C string: {e}")))
        };
        Ok(OwnedPluginVersion {
            basever: text("basever", &self.basever)?,
            datestamp: text("datestamp", &self.datestamp)?,
            devphase: text("devphase", &self.devphase)?,
            revision: text("revision", &self.revision)?,
            configuration_arguments: text("configuration-arguments", &self.configuration_arguments)?,
        })
    }
}

/// Which version record(s) to print.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Which {
    /// The version the binding was compiled against
    Compiled,
    /// The version of the running compiler
    Active,
    /// Both, compiled first
    #[default]
    Both,
}

/// Output format for records.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The runtime repr(): gcc.Version(base_version='...', ...)
    #[default]
    Repr,
    /// A JSON object per record, null for absent fields
    Json,
    /// One `field: value` line per field
    Fields,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print version records
    Show {
        /// Record(s) to print
        #[arg(long, value_enum, default_value_t = Which::Both)]
        which: Which,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Repr)]
        format: OutputFormat,
    },

    /// Call an exposed function by name (get_plugin_gcc_version, get_gcc_version)
    Call {
        /// Function name
        #[arg(value_name = "FUNCTION")]
        function: String,
    },

    /// Print the gcc.Version field order
    Schema,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Initialize the plugin from the CLI arguments and execute the command.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let active = cli.active.to_native()?;
    let plugin = Plugin::init(Runtime::new(), active.as_native())
        .map_err(|e| CliError::failure(format!("Error: plugin initialization failed: {e}")))?;

    match cli.command {
        Some(Command::Show { which, format }) => commands::show(&plugin, which, format),
        Some(Command::Call { function }) => commands::call(&plugin, &function),
        Some(Command::Schema) => commands::schema(&plugin),
        None => commands::show(&plugin, Which::default(), OutputFormat::default()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::try_parse_from(["hostver", "show", "--which", "active", "--format", "json"]).unwrap();
        if let Some(Command::Show { which, format }) = cli.command {
            assert_eq!(which, Which::Active);
            assert_eq!(format, OutputFormat::Json);
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn test_cli_parse_show_defaults() {
        let cli = Cli::try_parse_from(["hostver", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Show {
                which: Which::Both,
                format: OutputFormat::Repr
            })
        ));
    }

    #[test]
    fn test_cli_parse_call() {
        let cli = Cli::try_parse_from(["hostver", "call", "get_gcc_version"]).unwrap();
        if let Some(Command::Call { function }) = cli.command {
            assert_eq!(function, "get_gcc_version");
        } else {
            panic!("Expected Call command");
        }
    }

    #[test]
    fn test_cli_parse_active_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hostver",
            "show",
            "--active-basever",
            "13.0.0",
            "--active-revision",
            "",
            "--active-configuration-arguments",
            "--enable-languages=c",
        ])
        .unwrap();
        assert_eq!(cli.active.basever.as_deref(), Some("13.0.0"));
        assert_eq!(cli.active.revision.as_deref(), Some(""));
        assert_eq!(cli.active.configuration_arguments.as_deref(), Some("--enable-languages=c"));
    }

    #[test]
    fn test_active_args_keep_absent_and_empty_apart() {
        let args = ActiveVersionArgs {
            basever: Some("13.0.0".to_string()),
            revision: Some(String::new()),
            ..ActiveVersionArgs::default()
        };
        let owned = args.to_native().unwrap();
        let native = owned.as_native();
        assert_eq!(native.basever, Some(c"13.0.0"));
        assert_eq!(native.revision, Some(c""));
        assert_eq!(native.datestamp, None);
    }

    #[test]
    fn test_active_args_reject_nul() {
        let args = ActiveVersionArgs {
            devphase: Some("bad\0phase".to_string()),
            ..ActiveVersionArgs::default()
        };
        let err = args.to_native().unwrap_err();
        assert!(err.message.contains("--active-devphase"));
    }
}
