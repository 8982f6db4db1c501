//! `ebplan nodejs` — Build a plan for a JavaScript server runtime.

use clap::Args;
use ebplan_common::config::EnvironmentVariantConfig;
use ebplan_common::constants::NODEJS_DEFAULT_APP_NAME;
use ebplan_common::types::RuntimeVariant;

use super::args::DeploymentArgs;

/// Arguments for the `nodejs` command.
#[derive(Args, Debug)]
pub struct NodejsArgs {
    /// Settings shared by every variant.
    #[command(flatten)]
    pub deployment: DeploymentArgs,
}

/// Resolves the configuration for the `nodejs` command.
///
/// The application name defaults to `NodeJSBackend`.
pub fn resolve(args: NodejsArgs) -> EnvironmentVariantConfig {
    args.deployment
        .with_default_app_name(NODEJS_DEFAULT_APP_NAME)
        .into_config(RuntimeVariant::JavascriptRuntime)
}
