//! `ebplan plan` — Build a plan for the variant chosen by configuration.

use clap::Args;
use ebplan_common::config::EnvironmentVariantConfig;
use ebplan_common::types::RuntimeVariant;

use super::args::DeploymentArgs;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Runtime variant: `nodejs`, `django` or `docker`.
    #[arg(long, env = "FRAMEWORK")]
    pub variant: String,

    /// WSGI entry point, required for `django`.
    #[arg(long, env = "DJANGO_BACKEND_WSGI_PATH")]
    pub wsgi_path: Option<String>,

    /// Container port, required for `docker`.
    #[arg(long, env = "DOCKER_BACKEND_CONTAINER_PORT")]
    pub container_port: Option<u16>,

    /// Settings shared by every variant.
    #[command(flatten)]
    pub deployment: DeploymentArgs,
}

/// Resolves the configuration for the `plan` command.
///
/// # Errors
///
/// Returns an error if the variant tag is not supported.
pub fn resolve(args: PlanArgs) -> anyhow::Result<EnvironmentVariantConfig> {
    let variant: RuntimeVariant = args.variant.parse()?;
    tracing::info!(%variant, "resolving configuration");

    let mut config = args.deployment.into_config(variant);
    config.wsgi_path = args.wsgi_path;
    config.container_port = args.container_port;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PlanArgs,
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let harness = Harness::try_parse_from(["ebplan", "--variant", "rails"]).expect("parse");
        let err = resolve(harness.args).unwrap_err();
        assert!(err.to_string().contains("\"rails\""), "got: {err}");
    }

    #[test]
    fn variant_fields_are_forwarded() {
        let harness = Harness::try_parse_from([
            "ebplan",
            "--variant",
            "docker",
            "--container-port",
            "8080",
            "--app-name",
            "Backend",
            "--stage",
            "prod",
        ])
        .expect("parse");
        let config = resolve(harness.args).expect("resolve");
        assert_eq!(config.variant, RuntimeVariant::ContainerRuntime);
        assert_eq!(config.container_port, Some(8080));
        assert_eq!(config.application_name, "Backend-Prod");
        assert_eq!(config.sizing.instance_type, "t3.small");
    }

    #[test]
    fn extra_options_are_parsed() {
        let harness = Harness::try_parse_from([
            "ebplan",
            "--variant",
            "nodejs",
            "--option",
            "aws:elasticbeanstalk:application:environment:LOG_LEVEL=debug",
        ])
        .expect("parse");
        let config = resolve(harness.args).expect("resolve");
        assert_eq!(config.extra_options.len(), 1);
        assert_eq!(config.extra_options[0].name, "LOG_LEVEL");
    }
}
