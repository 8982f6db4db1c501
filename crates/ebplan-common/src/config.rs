//! Deployment configuration model.
//!
//! An [`EnvironmentVariantConfig`] is resolved once per invocation by the
//! caller (the CLI reads flags and environment variables) and handed to the
//! plan builder by shared reference. Nothing in the workspace mutates it
//! after construction.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INSTANCE_TYPE, DEFAULT_MAX_INSTANCES, DEFAULT_MIN_INSTANCES};
use crate::types::{OptionSetting, RuntimeVariant};

/// Instance type and auto scaling bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSizing {
    /// Instance type of every environment instance.
    pub instance_type: String,
    /// Minimum number of running instances.
    pub min_instances: u32,
    /// Maximum number of running instances.
    pub max_instances: u32,
}

impl Default for InstanceSizing {
    fn default() -> Self {
        Self {
            instance_type: DEFAULT_INSTANCE_TYPE.to_owned(),
            min_instances: DEFAULT_MIN_INSTANCES,
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}

/// Independent logging and health toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct FeatureFlags {
    /// Stream web server logs.
    pub web_server_logs: bool,
    /// Stream health event logs.
    pub health_event_logs: bool,
    /// Enable enhanced health reporting.
    pub health_reporting: bool,
}

impl FeatureFlags {
    /// Every feature enabled.
    pub const ALL: Self = Self {
        web_server_logs: true,
        health_event_logs: true,
        health_reporting: true,
    };
}

/// Resolved configuration for one deployment run.
///
/// Empty strings are treated exactly like absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariantConfig {
    /// Application name (usually the stack name, see [`stack_name`]).
    pub application_name: String,
    /// Stage, e.g. `staging` or `prod`.
    pub stage: String,
    /// Target account identifier.
    pub account: String,
    /// Target region.
    pub region: String,
    /// Runtime variant of the application.
    pub variant: RuntimeVariant,
    /// Custom domain to bind.
    pub domain_name: Option<String>,
    /// TLS certificate reference for the custom domain.
    pub certificate_arn: Option<String>,
    /// Location of the source artifact.
    pub source_location: String,
    /// Platform solution stack; the variant default is used when unset.
    pub solution_stack: Option<String>,
    /// Local directory served under `/static`.
    pub static_files_path: Option<String>,
    /// Accept any non-5xx status as healthy.
    pub loose_health_check: bool,
    /// Instance sizing.
    pub sizing: InstanceSizing,
    /// Logging and health toggles.
    pub features: FeatureFlags,
    /// WSGI entry point (WSGI runtime only).
    pub wsgi_path: Option<String>,
    /// Port the container listens on (container runtime only).
    pub container_port: Option<u16>,
    /// Additional option settings appended after every built-in block.
    pub extra_options: Vec<OptionSetting>,
}

impl EnvironmentVariantConfig {
    /// Starts a builder for the given application and variant.
    #[must_use]
    pub fn builder(
        application_name: impl Into<String>,
        variant: RuntimeVariant,
    ) -> EnvironmentVariantConfigBuilder {
        EnvironmentVariantConfigBuilder::new(application_name, variant)
    }

    /// Returns the domain name, if set and non-empty.
    #[must_use]
    pub fn domain_name(&self) -> Option<&str> {
        non_empty(self.domain_name.as_deref())
    }

    /// Returns the certificate reference, if set and non-empty.
    #[must_use]
    pub fn certificate_arn(&self) -> Option<&str> {
        non_empty(self.certificate_arn.as_deref())
    }

    /// Returns `(domain, certificate)` only when both are present.
    ///
    /// Supplying one without the other means the custom domain was not
    /// requested; it is not an error.
    #[must_use]
    pub fn domain_binding(&self) -> Option<(&str, &str)> {
        self.domain_name().zip(self.certificate_arn())
    }

    /// Returns the static files directory, if set and non-empty.
    #[must_use]
    pub fn static_files_path(&self) -> Option<&str> {
        non_empty(self.static_files_path.as_deref())
    }

    /// Returns the solution stack override, if set and non-empty.
    #[must_use]
    pub fn solution_stack(&self) -> Option<&str> {
        non_empty(self.solution_stack.as_deref())
    }

    /// Returns the WSGI path, if set and non-empty.
    #[must_use]
    pub fn wsgi_path(&self) -> Option<&str> {
        non_empty(self.wsgi_path.as_deref())
    }

    /// Lists every variant-independent required field that is empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("application_name", &self.application_name),
            ("stage", &self.stage),
            ("account", &self.account),
            ("region", &self.region),
            ("source_location", &self.source_location),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_owned())
        .collect()
    }
}

/// Fluent builder for [`EnvironmentVariantConfig`].
#[derive(Debug, Clone)]
pub struct EnvironmentVariantConfigBuilder {
    config: EnvironmentVariantConfig,
}

impl EnvironmentVariantConfigBuilder {
    /// Creates a builder with default sizing and every feature disabled.
    #[must_use]
    pub fn new(application_name: impl Into<String>, variant: RuntimeVariant) -> Self {
        Self {
            config: EnvironmentVariantConfig {
                application_name: application_name.into(),
                variant,
                ..EnvironmentVariantConfig::default()
            },
        }
    }

    /// Sets the stage.
    #[must_use]
    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.config.stage = stage.into();
        self
    }

    /// Sets the target account and region.
    #[must_use]
    pub fn target(mut self, account: impl Into<String>, region: impl Into<String>) -> Self {
        self.config.account = account.into();
        self.config.region = region.into();
        self
    }

    /// Sets the source artifact location.
    #[must_use]
    pub fn source_location(mut self, location: impl Into<String>) -> Self {
        self.config.source_location = location.into();
        self
    }

    /// Sets the custom domain name.
    #[must_use]
    pub fn domain_name(mut self, domain: impl Into<String>) -> Self {
        self.config.domain_name = Some(domain.into());
        self
    }

    /// Sets the TLS certificate reference.
    #[must_use]
    pub fn certificate_arn(mut self, arn: impl Into<String>) -> Self {
        self.config.certificate_arn = Some(arn.into());
        self
    }

    /// Overrides the platform solution stack.
    #[must_use]
    pub fn solution_stack(mut self, stack: impl Into<String>) -> Self {
        self.config.solution_stack = Some(stack.into());
        self
    }

    /// Serves a local directory under `/static`.
    #[must_use]
    pub fn static_files_path(mut self, path: impl Into<String>) -> Self {
        self.config.static_files_path = Some(path.into());
        self
    }

    /// Enables or disables the loose health check.
    #[must_use]
    pub const fn loose_health_check(mut self, enabled: bool) -> Self {
        self.config.loose_health_check = enabled;
        self
    }

    /// Sets the instance sizing.
    #[must_use]
    pub fn sizing(mut self, sizing: InstanceSizing) -> Self {
        self.config.sizing = sizing;
        self
    }

    /// Sets the logging and health toggles.
    #[must_use]
    pub const fn features(mut self, features: FeatureFlags) -> Self {
        self.config.features = features;
        self
    }

    /// Sets the WSGI entry point.
    #[must_use]
    pub fn wsgi_path(mut self, path: impl Into<String>) -> Self {
        self.config.wsgi_path = Some(path.into());
        self
    }

    /// Sets the container port.
    #[must_use]
    pub const fn container_port(mut self, port: u16) -> Self {
        self.config.container_port = Some(port);
        self
    }

    /// Appends a caller-supplied option setting.
    #[must_use]
    pub fn option(mut self, option: OptionSetting) -> Self {
        self.config.extra_options.push(option);
        self
    }

    /// Finishes the configuration. Validation happens when the plan is built.
    #[must_use]
    pub fn build(self) -> EnvironmentVariantConfig {
        self.config
    }
}

/// Name of the instance profile carrying the environment's role grants.
#[must_use]
pub fn instance_profile_name(application_name: &str) -> String {
    format!("{application_name}-{}", crate::constants::INSTANCE_PROFILE_SUFFIX)
}

/// Derives the stack name `<app>-<Stage>` used as the application name.
#[must_use]
pub fn stack_name(app: &str, stage: &str) -> String {
    let mut chars = stage.chars();
    let capitalized: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    format!("{app}-{capitalized}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
