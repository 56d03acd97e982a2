//! Command line argument parsing for the nodc-codes CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// nodc-codes - synonym resolution for Swedish marine-data code lists
#[derive(Parser, Debug, Clone)]
#[command(name = "nodc-codes")]
#[command(about = "Resolve and translate marine-data codes against the reference table")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct CodesArgs {
    /// Read the reference table from this file instead of the configuration directory
    #[arg(long, value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Configuration directory holding the reference table (skips discovery)
    #[arg(long, value_name = "DIR", global = true)]
    pub config_dir: Option<PathBuf>,

    /// Character encoding of the reference table (default: windows-1252)
    #[arg(long, value_name = "LABEL", global = true)]
    pub encoding: Option<String>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl CodesArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve a synonym to its public value
    Resolve(ResolveArgs),

    /// Translate a synonym into another column of its row
    Translate(TranslateArgs),

    /// List the values registered for a field
    List(ListArgs),

    /// List the synonyms registered for a public value
    Synonyms(SynonymsArgs),

    /// Show the full row a synonym resolves to
    Info(InfoArgs),

    /// List the fields present in the reference table
    Fields,
}

/// Arguments for resolving a synonym
#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Field to look in (e.g. LABO, project)
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Synonym to resolve
    #[arg(value_name = "SYNONYM")]
    pub synonym: String,
}

/// Arguments for translating a synonym
#[derive(Parser, Debug, Clone)]
pub struct TranslateArgs {
    /// Field to look in
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Synonym to translate
    #[arg(value_name = "SYNONYM")]
    pub synonym: String,

    /// Column to translate into (e.g. short_name, english_name)
    #[arg(value_name = "COLUMN")]
    pub to: String,
}

/// Arguments for listing field values
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Field to list
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Translate the listing into this column instead of public values
    #[arg(short, long, value_name = "COLUMN")]
    pub translate_to: Option<String>,
}

/// Arguments for listing synonyms
#[derive(Parser, Debug, Clone)]
pub struct SynonymsArgs {
    /// Field to look in
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Public value whose synonyms to list
    #[arg(value_name = "PUBLIC_VALUE")]
    pub public_value: String,
}

/// Arguments for showing row details
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Field to look in
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Synonym identifying the row
    #[arg(value_name = "SYNONYM")]
    pub synonym: String,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "text")]
    pub format: OutputFormat,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One tab-separated column per line
    Text,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_resolve_command() {
        let args =
            CodesArgs::try_parse_from(["nodc-codes", "resolve", "LABO", "smhi lab"]).unwrap();

        if let Command::Resolve(resolve_args) = args.command {
            assert_eq!(resolve_args.field, "LABO");
            assert_eq!(resolve_args.synonym, "smhi lab");
        } else {
            panic!("Expected Resolve command");
        }
    }

    #[test]
    fn test_translate_command() {
        let args = CodesArgs::try_parse_from([
            "nodc-codes",
            "translate",
            "project",
            "National monitoring",
            "short_name",
        ])
        .unwrap();

        if let Command::Translate(translate_args) = args.command {
            assert_eq!(translate_args.field, "project");
            assert_eq!(translate_args.synonym, "National monitoring");
            assert_eq!(translate_args.to, "short_name");
        } else {
            panic!("Expected Translate command");
        }
    }

    #[test]
    fn test_list_command_with_translation() {
        let args = CodesArgs::try_parse_from([
            "nodc-codes",
            "list",
            "project",
            "--translate-to",
            "short_name",
        ])
        .unwrap();

        if let Command::List(list_args) = args.command {
            assert_eq!(list_args.field, "project");
            assert_eq!(list_args.translate_to, Some("short_name".to_string()));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_global_file_and_encoding() {
        let args = CodesArgs::try_parse_from([
            "nodc-codes",
            "fields",
            "--file",
            "/data/translate_codes.txt",
            "--encoding",
            "utf-8",
        ])
        .unwrap();

        assert_eq!(args.file, Some(PathBuf::from("/data/translate_codes.txt")));
        assert_eq!(args.encoding, Some("utf-8".to_string()));
        assert!(matches!(args.command, Command::Fields));
    }

    #[test]
    fn test_info_format() {
        let args = CodesArgs::try_parse_from([
            "nodc-codes",
            "info",
            "LABO",
            "smhi",
            "--format",
            "json",
        ])
        .unwrap();

        if let Command::Info(info_args) = args.command {
            assert!(matches!(info_args.format, OutputFormat::Json));
        } else {
            panic!("Expected Info command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = CodesArgs::try_parse_from(["nodc-codes", "fields"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = CodesArgs::try_parse_from(["nodc-codes", "-vv", "fields"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Quiet flag
        let args = CodesArgs::try_parse_from(["nodc-codes", "--quiet", "fields"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
