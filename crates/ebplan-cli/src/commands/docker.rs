//! `ebplan docker` — Build a plan for a container image runtime.

use clap::Args;
use ebplan_common::config::EnvironmentVariantConfig;
use ebplan_common::types::RuntimeVariant;

use super::args::DeploymentArgs;

/// Arguments for the `docker` command.
#[derive(Args, Debug)]
pub struct DockerArgs {
    /// Port the container listens on.
    #[arg(long, env = "DOCKER_BACKEND_CONTAINER_PORT")]
    pub container_port: Option<u16>,

    /// Settings shared by every variant.
    #[command(flatten)]
    pub deployment: DeploymentArgs,
}

/// Resolves the configuration for the `docker` command.
pub fn resolve(args: DockerArgs) -> EnvironmentVariantConfig {
    let mut config = args.deployment.into_config(RuntimeVariant::ContainerRuntime);
    config.container_port = args.container_port;
    config
}
