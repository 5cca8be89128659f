//! CLI module for apiview
//!
//! Provides command-line interface using clap derive macros.

pub mod commands;
pub mod output;

pub use output::{OutputContext, OutputFormat};

use clap::{Parser, Subcommand};

use commands::{
    config::ConfigArgs, outline::OutlineArgs, render::RenderArgs, tokens::TokensArgs,
};

const LONG_ABOUT: &str = r#"
apiview - Render the public API surface of a compiled library

apiview reads a symbol tree (JSON) describing a library's declarations and
prints its public surface as stub source with stable definition ids, ready
for review and line-by-line diffing between releases.

EXAMPLES:
  apiview render lib.json                 # Plain text listing
  apiview render lib.json --ids           # Prefix lines with definition ids
  apiview render lib.json --format html   # Escaped, styled lines
  apiview outline lib.json                # Namespace/type navigation tree
  apiview tokens lib.json                 # Raw token stream
  apiview config init                     # Write .apiview/config.toml
"#;

/// apiview - Render the public API surface of a compiled library
#[derive(Parser, Debug)]
#[command(name = "apiview")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
#[command(after_help = "Use 'apiview <COMMAND> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a symbol document as annotated source lines
    Render(RenderArgs),

    /// Print the navigation tree as JSON
    Outline(OutlineArgs),

    /// Print the token stream as JSON
    Tokens(TokensArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["apiview", "render", "lib.json", "--format", "html", "--ids"])
            .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.input, std::path::PathBuf::from("lib.json"));
        assert_eq!(args.format, Some(OutputFormat::Html));
        assert!(args.ids);
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["apiview", "config", "init", "--global", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigArgs {
                command: commands::config::ConfigCommand::Init {
                    global: true,
                    force: true
                }
            })
        ));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["apiview", "render", "lib.json", "--format", "pdf"]).is_err());
    }
}
