// SPDX-FileCopyrightText: 2026 Venice Tools Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Venice - run Venice AI tool adapters from the command line.

mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use venice_config::VeniceConfig;
use venice_tools::ToolRegistry;

/// Venice - run Venice AI tool adapters from the command line.
#[derive(Parser, Debug)]
#[command(name = "venice", version, about, long_about = None)]
struct Cli {
    /// Configuration file, used instead of the standard lookup paths.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered tools.
    Tools,
    /// Print a tool's descriptor and input schema as JSON.
    Describe {
        /// Tool name, e.g. `veniceChatTool`.
        tool: String,
    },
    /// Run a tool over a list of input items.
    Run(run::RunArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            venice_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.logging.level);

    let registry = ToolRegistry::with_venice_tools();

    let result = match cli.command {
        Some(Commands::Tools) => {
            for (name, description) in registry.list() {
                println!("{name:<28} {description}");
            }
            Ok(())
        }
        Some(Commands::Describe { tool }) => describe(&registry, &tool),
        Some(Commands::Run(args)) => run::run(&registry, &config, args).await,
        None => {
            println!("venice: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("venice: {err}");
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<VeniceConfig, Vec<venice_config::ConfigError>> {
    match path {
        Some(path) => venice_config::load_and_validate_path(path),
        None => venice_config::load_and_validate(),
    }
}

fn describe(registry: &ToolRegistry, tool: &str) -> Result<(), run::CliError> {
    let descriptor = registry
        .descriptor(tool)
        .ok_or_else(|| run::CliError::UnknownTool(tool.to_string()))?;
    let rendered = serde_json::json!({
        "descriptor": descriptor,
        "input_schema": descriptor.input_schema(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&rendered).map_err(run::CliError::Encode)?
    );
    Ok(())
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("venice={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
