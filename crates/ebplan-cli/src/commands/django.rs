//! `ebplan django` — Build a plan for a WSGI/Python runtime.

use clap::Args;
use ebplan_common::config::EnvironmentVariantConfig;
use ebplan_common::constants::DJANGO_DEFAULT_APP_NAME;
use ebplan_common::types::RuntimeVariant;

use super::args::DeploymentArgs;

/// Arguments for the `django` command.
#[derive(Args, Debug)]
pub struct DjangoArgs {
    /// Path to the WSGI entry point, e.g. `app/wsgi.py`.
    #[arg(long, env = "DJANGO_BACKEND_WSGI_PATH")]
    pub wsgi_path: Option<String>,

    /// Settings shared by every variant.
    #[command(flatten)]
    pub deployment: DeploymentArgs,
}

/// Resolves the configuration for the `django` command.
///
/// The application name defaults to `DjangoBackend`.
pub fn resolve(args: DjangoArgs) -> EnvironmentVariantConfig {
    let mut config = args
        .deployment
        .with_default_app_name(DJANGO_DEFAULT_APP_NAME)
        .into_config(RuntimeVariant::WsgiRuntime);
    config.wsgi_path = args.wsgi_path;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_app_gets_the_django_stack_name() {
        let args = DjangoArgs {
            wsgi_path: Some("app/wsgi.py".into()),
            deployment: DeploymentArgs {
                stage: "prod".into(),
                ..DeploymentArgs::default()
            },
        };
        let config = resolve(args);
        assert_eq!(config.application_name, "DjangoBackend-Prod");
        assert_eq!(config.wsgi_path.as_deref(), Some("app/wsgi.py"));
    }
}
