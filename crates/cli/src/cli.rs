use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{describe_command, list_command, run_command, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "patchbay")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging (default: warn)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a recipe over a model
    #[command(visible_alias = "r")]
    Run {
        /// Name of the recipe (e.g. ExtractElements)
        #[arg(required_unless_present = "request")]
        recipe: Option<String>,

        /// Recipe arguments; numbers and booleans are passed as such
        #[arg(allow_negative_numbers = true)]
        arguments: Vec<String>,

        /// Model file to patch
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the result (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append this run's diagnostics to a file
        #[arg(long)]
        log: Option<PathBuf>,

        /// Read the request from a JSON file
        #[arg(long)]
        request: Option<PathBuf>,
    },
    /// List available recipes
    #[command(visible_alias = "l")]
    List {
        /// List recipe sources in a directory instead of the built-ins
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Print a recipe's parameter schema as JSON
    #[command(visible_alias = "d")]
    Describe {
        /// Name of the recipe
        recipe: String,

        /// Type to describe
        #[arg(long, default_value = "Patcher")]
        class: String,

        /// Method to describe (defaults to the constructor)
        #[arg(long)]
        method: Option<String>,

        /// Read the recipe from `<DIR>/<RECIPE>.rs`
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Execute the parsed command
    pub fn execute(self) -> Result<()> {
        self.command.execute()
    }
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Run {
                recipe,
                arguments,
                input,
                output,
                log,
                request,
            } => run_command(RunOptions {
                recipe,
                arguments,
                input,
                output,
                log,
                request,
            }),
            Commands::List { dir } => list_command(dir.as_deref()),
            Commands::Describe {
                recipe,
                class,
                method,
                dir,
            } => describe_command(&recipe, &class, method.as_deref(), dir.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_parses_trailing_arguments() {
        let cli = Cli::try_parse_from([
            "patchbay",
            "run",
            "ExtractElements",
            ".IfcWall",
            "false",
            "-i",
            "model.ifc",
        ])
        .unwrap();
        let Commands::Run {
            recipe,
            arguments,
            input,
            ..
        } = cli.command
        else {
            panic!("expected run");
        };
        assert_eq!(recipe.as_deref(), Some("ExtractElements"));
        assert_eq!(arguments, vec![".IfcWall", "false"]);
        assert_eq!(input, Some(PathBuf::from("model.ifc")));
    }

    #[test]
    fn test_run_needs_recipe_or_request() {
        assert!(Cli::try_parse_from(["patchbay", "run"]).is_err());
        assert!(Cli::try_parse_from(["patchbay", "run", "--request", "req.json"]).is_ok());
    }

    #[test]
    fn test_describe_defaults_to_entry_class() {
        let cli = Cli::try_parse_from(["patchbay", "describe", "SummarizeModel"]).unwrap();
        let Commands::Describe { class, method, .. } = cli.command else {
            panic!("expected describe");
        };
        assert_eq!(class, "Patcher");
        assert_eq!(method, None);
    }
}
