//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Rulemark CLI - Validation rules as OpenAPI constraints
///
/// Applies the validation rules declared in a rules manifest to a generated
/// OpenAPI document, marking required fields and setting length, numeric and
/// pattern constraints on schema properties and query parameters.
#[derive(Parser, Debug)]
#[command(
    name = "rulemark",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RULEMARK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply validation rules to an OpenAPI document
    Apply(ApplyArgs),

    /// Show the constraints a rules manifest produces
    Inspect(InspectArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the apply command
#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Path to the OpenAPI document (JSON or YAML)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Path to the rules manifest (YAML, JSON or TOML)
    #[arg(short, long, value_name = "MANIFEST")]
    pub rules: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,

    /// Show the items that could not be found in the document
    #[arg(long)]
    pub report: bool,

    /// Fail if any configured schema, property, operation or parameter is missing
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path to the rules manifest (YAML, JSON or TOML)
    #[arg(short, long, value_name = "MANIFEST")]
    pub rules: PathBuf,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Output format from the command line, falling back to the configured one
    pub fn output_format(&self, configured: OutputFormat) -> OutputFormat {
        self.output.unwrap_or(configured)
    }

    /// Check if colored output should be used
    pub fn use_color(&self, configured: bool) -> bool {
        configured && !self.no_color && std::io::stderr().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: None,
            no_color: false,
            command: Commands::Inspect(InspectArgs {
                rules: PathBuf::from("rules.yaml"),
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_apply_arguments() {
        let cli = Cli::parse_from([
            "rulemark",
            "-o",
            "json-pretty",
            "apply",
            "openapi.json",
            "--rules",
            "rules.yaml",
            "--save-to",
            "out.yaml",
            "--report",
        ]);

        assert_eq!(cli.output_format(OutputFormat::Human), OutputFormat::JsonPretty);
        match cli.command {
            Commands::Apply(args) => {
                assert_eq!(args.document, PathBuf::from("openapi.json"));
                assert_eq!(args.rules, PathBuf::from("rules.yaml"));
                assert_eq!(args.save_to, Some(PathBuf::from("out.yaml")));
                assert!(args.report);
                assert!(!args.strict);
            }
            other => panic!("expected apply command, got {:?}", other),
        }
    }

    #[test]
    fn test_output_format_falls_back_to_configuration() {
        let cli = Cli::parse_from(["rulemark", "inspect", "--rules", "rules.yaml"]);
        assert_eq!(cli.output_format(OutputFormat::Yaml), OutputFormat::Yaml);
    }
}
