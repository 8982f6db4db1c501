//! Configuration shared by every plan command.
//!
//! Each value can come from a flag or from the environment variable named
//! next to it. Required values default to empty so the plan builder can
//! report every missing field at once.

use clap::Args;
use ebplan_common::config::{
    EnvironmentVariantConfig, FeatureFlags, InstanceSizing, stack_name,
};
use ebplan_common::constants::{DEFAULT_INSTANCE_TYPE, DEFAULT_MAX_INSTANCES, DEFAULT_MIN_INSTANCES};
use ebplan_common::types::{OptionSetting, RuntimeVariant};

/// Deployment settings common to all runtime variants.
#[derive(Args, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DeploymentArgs {
    /// Application name; the stack name `<app>-<Stage>` is derived from it.
    #[arg(long, env = "BACKEND_APP_NAME", default_value = "")]
    pub app_name: String,

    /// Stage, e.g. `staging` or `prod`.
    #[arg(long, env = "NODE_ENV", default_value = "")]
    pub stage: String,

    /// Target account identifier.
    #[arg(long, env = "AWS_ACCOUNT", default_value = "")]
    pub account: String,

    /// Target region.
    #[arg(long, env = "AWS_REGION", default_value = "")]
    pub region: String,

    /// Location of the application source bundle.
    #[arg(long, env = "BACKEND_SOURCE_PATH", default_value = "")]
    pub source_path: String,

    /// Platform solution stack; defaults to the variant's stack.
    #[arg(long, env = "BACKEND_SOLUTION_STACK_NAME")]
    pub solution_stack: Option<String>,

    /// Custom domain name.
    #[arg(long, env = "BACKEND_DOMAIN_NAME")]
    pub domain_name: Option<String>,

    /// TLS certificate reference for the custom domain.
    #[arg(long, env = "BACKEND_DOMAIN_CERT_ARN")]
    pub domain_certificate_arn: Option<String>,

    /// Directory served under `/static`.
    #[arg(long, env = "BACKEND_STATIC_FILES_PATH")]
    pub static_files_path: Option<String>,

    /// Instance type.
    #[arg(long, env = "BACKEND_EC2_INSTANCE_TYPE", default_value = DEFAULT_INSTANCE_TYPE)]
    pub instance_type: String,

    /// Minimum number of instances.
    #[arg(long, env = "BACKEND_MIN_INSTANCES", default_value_t = DEFAULT_MIN_INSTANCES)]
    pub min_instances: u32,

    /// Maximum number of instances.
    #[arg(long, env = "BACKEND_MAX_INSTANCES", default_value_t = DEFAULT_MAX_INSTANCES)]
    pub max_instances: u32,

    /// Accept every status below 500 as healthy.
    #[arg(long, env = "BACKEND_LOOSE_HEALTH_CHECK")]
    pub loose_health_check: bool,

    /// Stream web server logs.
    #[arg(long, env = "BACKEND_ENABLE_WEB_SERVER_LOGS")]
    pub web_server_logs: bool,

    /// Stream health event logs.
    #[arg(long, env = "BACKEND_ENABLE_HEALTH_EVENT_LOGS")]
    pub health_event_logs: bool,

    /// Enable enhanced health reporting.
    #[arg(long, env = "BACKEND_ENABLE_HEALTH_REPORTING")]
    pub health_reporting: bool,

    /// Extra option setting, as `namespace:name=value`. Repeatable.
    #[arg(long = "option", value_name = "NAMESPACE:NAME=VALUE")]
    pub options: Vec<OptionSetting>,
}

impl DeploymentArgs {
    /// Uses `name` as the application name when none was given.
    #[must_use]
    pub fn with_default_app_name(mut self, name: &str) -> Self {
        if self.app_name.trim().is_empty() {
            name.clone_into(&mut self.app_name);
        }
        self
    }

    /// Converts the arguments into a configuration for `variant`.
    ///
    /// Variant-specific fields are left unset for the caller to fill in.
    #[must_use]
    pub fn into_config(self, variant: RuntimeVariant) -> EnvironmentVariantConfig {
        let application_name = if self.app_name.trim().is_empty() {
            String::new()
        } else {
            stack_name(&self.app_name, &self.stage)
        };

        EnvironmentVariantConfig {
            application_name,
            stage: self.stage,
            account: self.account,
            region: self.region,
            variant,
            domain_name: self.domain_name,
            certificate_arn: self.domain_certificate_arn,
            source_location: self.source_path,
            solution_stack: self.solution_stack,
            static_files_path: self.static_files_path,
            loose_health_check: self.loose_health_check,
            sizing: InstanceSizing {
                instance_type: self.instance_type,
                min_instances: self.min_instances,
                max_instances: self.max_instances,
            },
            features: FeatureFlags {
                web_server_logs: self.web_server_logs,
                health_event_logs: self.health_event_logs,
                health_reporting: self.health_reporting,
            },
            wsgi_path: None,
            container_port: None,
            extra_options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_name_becomes_application_name() {
        let args = DeploymentArgs {
            app_name: "Backend".into(),
            stage: "staging".into(),
            ..DeploymentArgs::default()
        };
        let config = args.into_config(RuntimeVariant::JavascriptRuntime);
        assert_eq!(config.application_name, "Backend-Staging");
        assert_eq!(config.stage, "staging");
    }

    #[test]
    fn default_app_name_fills_only_a_blank_name() {
        let blank = DeploymentArgs {
            stage: "prod".into(),
            ..DeploymentArgs::default()
        }
        .with_default_app_name("NodeJSBackend");
        assert_eq!(blank.app_name, "NodeJSBackend");

        let named = DeploymentArgs {
            app_name: "Api".into(),
            ..DeploymentArgs::default()
        }
        .with_default_app_name("NodeJSBackend");
        assert_eq!(named.app_name, "Api");
    }

    #[test]
    fn empty_app_name_stays_empty() {
        let args = DeploymentArgs {
            stage: "prod".into(),
            ..DeploymentArgs::default()
        };
        let config = args.into_config(RuntimeVariant::JavascriptRuntime);
        assert!(config.application_name.is_empty());
        assert!(config.missing_fields().contains(&"application_name".to_owned()));
    }
}
