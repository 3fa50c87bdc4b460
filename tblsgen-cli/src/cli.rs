//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tblsgen_tbls::InputFormat;

/// tblsgen - Generate tbls schema documents from Prisma schemas
#[derive(Parser, Debug)]
#[command(name = "tblsgen")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "tblsgen - Generate tbls schema documents from Prisma schemas", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./tblsgen.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a schema into a tbls schema document
    Generate(GenerateArgs),

    /// Parse a schema and report what it declares
    Check(CheckArgs),

    /// Write a default tblsgen.toml
    Init(InitArgs),

    /// Display version information
    Version,
}

/// Input format accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Prisma-style schema text
    Dsl,
    /// Normalized JSON model description (DMMF)
    Description,
}

impl From<FormatArg> for InputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Dsl => InputFormat::Dsl,
            FormatArg::Description => InputFormat::Description,
        }
    }
}

// =============================================================================
// Generate Command
// =============================================================================

/// Arguments for the `generate` command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the schema file
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Output file for the document (`-` for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Indent the JSON output
    #[arg(long, conflicts_with = "compact")]
    pub pretty: bool,

    /// Write the JSON output on a single line
    #[arg(long)]
    pub compact: bool,
}

impl GenerateArgs {
    /// Pretty-printing requested on the command line, if any.
    pub fn pretty_override(&self) -> Option<bool> {
        match (self.pretty, self.compact) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

// =============================================================================
// Check Command
// =============================================================================

/// Arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the schema file
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,
}

// =============================================================================
// Init Command
// =============================================================================

/// Arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write tblsgen.toml into
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing tblsgen.toml
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_args() {
        let cli = Cli::parse_from([
            "tblsgen",
            "generate",
            "--schema",
            "db/schema.prisma",
            "-o",
            "-",
            "--compact",
            "--verbose",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.schema, Some(PathBuf::from("db/schema.prisma")));
                assert_eq!(args.output, Some(PathBuf::from("-")));
                assert_eq!(args.pretty_override(), Some(false));
                assert!(args.format.is_none());
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_pretty_and_compact_conflict() {
        let result = Cli::try_parse_from(["tblsgen", "generate", "--pretty", "--compact"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_format() {
        let cli = Cli::try_parse_from(["tblsgen", "check", "--format", "description"]).unwrap();
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.format.map(InputFormat::from), Some(InputFormat::Description));
            }
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["tblsgen", "check", "--config", "ci.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    }

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["tblsgen", "init"]).unwrap();
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.path, PathBuf::from("."));
                assert!(!args.force);
            }
            other => panic!("expected init, got {other:?}"),
        }
    }
}
