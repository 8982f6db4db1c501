//! CLI command definitions and dispatch.

pub mod args;
pub mod django;
pub mod docker;
pub mod nodejs;
pub mod plan;

use clap::{Parser, Subcommand};
use ebplan_common::config::EnvironmentVariantConfig;

use crate::output::{self, OutputFormat};

/// ebplan — Builds managed platform deployment plans.
#[derive(Parser, Debug)]
#[command(name = ebplan_common::constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Output format of the plan.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a plan for the variant selected by `--variant` / `FRAMEWORK`.
    Plan(plan::PlanArgs),
    /// Build a plan for a JavaScript server runtime.
    Nodejs(nodejs::NodejsArgs),
    /// Build a plan for a WSGI/Python runtime.
    Django(django::DjangoArgs),
    /// Build a plan for a container image runtime.
    Docker(docker::DockerArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if configuration resolution or plan construction fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.command {
        Command::Plan(args) => plan::resolve(args)?,
        Command::Nodejs(args) => nodejs::resolve(args),
        Command::Django(args) => django::resolve(args),
        Command::Docker(args) => docker::resolve(args),
    };
    build_and_print(&config, cli.format)
}

/// Prints the resolved configuration, builds the plan and prints it.
#[allow(clippy::print_stdout, clippy::print_stderr)]
fn build_and_print(config: &EnvironmentVariantConfig, format: OutputFormat) -> anyhow::Result<()> {
    eprintln!(
        "Deploying {} backend with config\n{}\n",
        config.variant.framework(),
        serde_json::to_string_pretty(config)?
    );

    let plan = ebplan_compose::build(config).map_err(|e| {
        tracing::error!(error = %e, "plan construction failed");
        anyhow::anyhow!("cannot deploy {}: {e}", config.application_name)
    })?;

    println!("{}", output::render(&plan, format)?);
    Ok(())
}
