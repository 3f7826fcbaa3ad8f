//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - endpoints: list endpoint descriptors
//! - tools / search / stats / validate: inspect generated tools
//! - call: invoke one tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// evogate - Evolution API operations as agent tools
#[derive(Parser, Debug)]
#[command(name = "evogate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the endpoint catalog
    Endpoints {
        /// Only show this controller (instance, message, chat, group, ...)
        #[arg(long)]
        controller: Option<String>,
    },

    /// Generate tools and list them
    Tools {
        /// Only show this controller
        #[arg(long)]
        controller: Option<String>,
    },

    /// Search generated tools by name or description
    Search {
        /// Case-insensitive search text
        query: String,
    },

    /// Show available versus generated tool counts
    Stats,

    /// Validate the generated tools; exits non-zero on violations
    Validate,

    /// Invoke a tool and print its result as JSON
    Call {
        /// Tool name, e.g. evolution_send_text_message
        tool: String,

        /// Parameters as a JSON object
        #[arg(short, long)]
        params: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["evogate"]).is_err());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["evogate", "-v", "stats"]).unwrap();
        assert!(cli.is_verbose());
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["evogate", "validate", "-c", "/path/to/evogate.yml"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/evogate.yml")));
    }

    #[test]
    fn test_endpoints_controller_filter() {
        let cli = Cli::try_parse_from(["evogate", "endpoints", "--controller", "group"]).unwrap();
        match cli.command {
            Commands::Endpoints { controller } => assert_eq!(controller.as_deref(), Some("group")),
            other => panic!("Expected Endpoints, got {:?}", other),
        }
    }

    #[test]
    fn test_search_query() {
        let cli = Cli::try_parse_from(["evogate", "search", "text"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { ref query } if query == "text"));
    }

    #[test]
    fn test_call_with_params() {
        let cli = Cli::try_parse_from([
            "evogate",
            "call",
            "evolution_get_connection_state",
            "--params",
            r#"{"instance":"sales"}"#,
        ])
        .unwrap();
        match cli.command {
            Commands::Call { tool, params } => {
                assert_eq!(tool, "evolution_get_connection_state");
                assert_eq!(params.as_deref(), Some(r#"{"instance":"sales"}"#));
            }
            other => panic!("Expected Call, got {:?}", other),
        }
    }

    #[test]
    fn test_call_requires_tool() {
        assert!(Cli::try_parse_from(["evogate", "call"]).is_err());
    }

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
