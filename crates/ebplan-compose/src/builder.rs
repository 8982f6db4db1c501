//! Resource graph construction.
//!
//! [`build`] turns one [`EnvironmentVariantConfig`] into a
//! [`DeploymentPlan`] in a single pass: application, version, environment
//! and, when a custom domain is fully configured, a DNS alias record. Each
//! descriptor is appended only after everything it depends on, so the
//! resulting order is topological by construction.

use ebplan_common::config::{EnvironmentVariantConfig, instance_profile_name};
use ebplan_common::constants::{
    ALIAS_TARGET_HOSTED_ZONE_ID, ENDPOINT_URL_ATTRIBUTE, logical_name,
};
use ebplan_common::error::{PlanError, Result};
use ebplan_common::types::{LogicalName, OptionSetting, PermissionRef};

use crate::descriptor::{AttributeValue, DeferredAttributeReference, ResourceDescriptor, ResourceKind};
use crate::options::{self, ConditionalBlock};
use crate::plan::{DeploymentPlan, PlanAssembler, PlanTarget};
use crate::variant::{self, Specialization};

/// Attribute keys used on the plan's descriptors.
pub mod attribute {
    /// Name of the application.
    pub const APPLICATION_NAME: &str = "application_name";
    /// Location of the source bundle.
    pub const SOURCE_BUNDLE: &str = "source_bundle";
    /// Name of the environment.
    pub const ENVIRONMENT_NAME: &str = "environment_name";
    /// Platform solution stack.
    pub const SOLUTION_STACK_NAME: &str = "solution_stack_name";
    /// Version the environment runs.
    pub const VERSION_LABEL: &str = "version_label";
    /// Merged option settings.
    pub const OPTION_SETTINGS: &str = "option_settings";
    /// Managed policies attached to the instance role.
    pub const INSTANCE_ROLE_POLICIES: &str = "instance_role_policies";
    /// Instance profile wrapping the instance role.
    pub const INSTANCE_PROFILE_NAME: &str = "instance_profile_name";
    /// DNS record name.
    pub const RECORD_NAME: &str = "record_name";
    /// DNS record type.
    pub const RECORD_TYPE: &str = "record_type";
    /// Domain whose hosted zone holds the record.
    pub const HOSTED_ZONE_DOMAIN: &str = "hosted_zone_domain";
    /// Hostname the alias resolves to.
    pub const ALIAS_TARGET_DNS_NAME: &str = "alias_target_dns_name";
    /// Hosted zone of the alias target.
    pub const ALIAS_TARGET_HOSTED_ZONE_ID: &str = "alias_target_hosted_zone_id";
}

/// Builds the deployment plan for `config`.
///
/// # Errors
///
/// - [`PlanError::MissingRequiredField`] naming every absent required field,
///   variant-specific ones included.
/// - [`PlanError::ConflictingOption`] if two option blocks, or a caller
///   supplied option, set the same namespace/name pair.
pub fn build(config: &EnvironmentVariantConfig) -> Result<DeploymentPlan> {
    tracing::info!(
        application = %config.application_name,
        stage = %config.stage,
        variant = %config.variant,
        "building deployment plan"
    );

    let specialization = validate(config)?;

    let mut assembler = PlanAssembler::new(PlanTarget {
        account: config.account.clone(),
        region: config.region.clone(),
    });

    let application = assembler.push(application_descriptor(config))?;
    let version = assembler.push(version_descriptor(config, &application))?;

    let option_settings = environment_options(config, specialization.options)?;
    let environment = assembler.push(environment_descriptor(
        config,
        &application,
        &version,
        option_settings,
        &specialization.grants,
    ))?;

    match (config.domain_name(), config.certificate_arn()) {
        (Some(domain), Some(_)) => {
            let _ = assembler.push(alias_descriptor(domain, &environment))?;
        }
        (None, None) => {}
        (domain, certificate) => tracing::warn!(
            domain_set = domain.is_some(),
            certificate_set = certificate.is_some(),
            "custom domain needs both a domain name and a certificate; skipping HTTPS and DNS alias"
        ),
    }

    let plan = assembler.finish();
    tracing::info!(descriptors = plan.len(), "deployment plan built");
    Ok(plan)
}

/// Checks every required field at once and specializes the variant.
fn validate(config: &EnvironmentVariantConfig) -> Result<Specialization> {
    let mut missing = config.missing_fields();
    missing.extend(variant::missing_fields(config));
    if !missing.is_empty() {
        tracing::debug!(?missing, "configuration incomplete");
        return Err(PlanError::MissingRequiredField { fields: missing });
    }
    variant::specialize(config)
}

/// Assembles the environment's option list in fixed precedence order.
///
/// # Errors
///
/// Returns [`PlanError::ConflictingOption`] on a repeated namespace/name pair.
pub fn environment_options(
    config: &EnvironmentVariantConfig,
    variant_options: Vec<OptionSetting>,
) -> Result<Vec<OptionSetting>> {
    let features = config.features;
    let blocks = [
        ConditionalBlock::always("base", options::base_options(config)),
        ConditionalBlock::from_option(
            "https",
            config
                .domain_binding()
                .map(|(_, certificate)| options::https_listener(certificate)),
        ),
        ConditionalBlock::when(
            "web-server-logs",
            features.web_server_logs,
            options::web_server_log_streaming(),
        ),
        ConditionalBlock::when(
            "health-event-logs",
            features.health_event_logs,
            options::health_event_log_streaming(),
        ),
        ConditionalBlock::when(
            "health-reporting",
            features.health_reporting,
            options::enhanced_health_reporting(),
        ),
        ConditionalBlock::from_option(
            "static-files",
            config.static_files_path().map(options::static_files),
        ),
        ConditionalBlock::when(
            "loose-health-check",
            config.loose_health_check,
            options::loose_health_check(),
        ),
        ConditionalBlock::always("variant", variant_options),
        ConditionalBlock::always("extra", config.extra_options.clone()),
    ];
    Ok(options::merge_blocks(blocks)?.into_vec())
}

fn application_descriptor(config: &EnvironmentVariantConfig) -> ResourceDescriptor {
    ResourceDescriptor::builder(ResourceKind::Application, logical_name::APPLICATION)
        .text(attribute::APPLICATION_NAME, &config.application_name)
        .build()
}

fn version_descriptor(
    config: &EnvironmentVariantConfig,
    application: &LogicalName,
) -> ResourceDescriptor {
    ResourceDescriptor::builder(ResourceKind::Version, logical_name::VERSION)
        .text(attribute::APPLICATION_NAME, &config.application_name)
        .text(attribute::SOURCE_BUNDLE, &config.source_location)
        .depends_on(application)
        .build()
}

fn environment_descriptor(
    config: &EnvironmentVariantConfig,
    application: &LogicalName,
    version: &LogicalName,
    option_settings: Vec<OptionSetting>,
    grants: &[PermissionRef],
) -> ResourceDescriptor {
    ResourceDescriptor::builder(ResourceKind::Environment, logical_name::ENVIRONMENT)
        .text(attribute::APPLICATION_NAME, &config.application_name)
        .text(attribute::ENVIRONMENT_NAME, &config.application_name)
        .text(
            attribute::SOLUTION_STACK_NAME,
            variant::solution_stack_for(config),
        )
        .attribute(attribute::VERSION_LABEL, AttributeValue::Ref(version.clone()))
        .attribute(
            attribute::OPTION_SETTINGS,
            AttributeValue::Options(option_settings),
        )
        .attribute(
            attribute::INSTANCE_ROLE_POLICIES,
            AttributeValue::List(grants.iter().map(ToString::to_string).collect()),
        )
        .text(
            attribute::INSTANCE_PROFILE_NAME,
            instance_profile_name(&config.application_name),
        )
        .depends_on(application)
        .build()
}

fn alias_descriptor(domain: &str, environment: &LogicalName) -> ResourceDescriptor {
    ResourceDescriptor::builder(ResourceKind::DnsAlias, logical_name::ALIAS_RECORD)
        .text(attribute::RECORD_NAME, domain)
        .text(attribute::RECORD_TYPE, "A")
        .text(attribute::HOSTED_ZONE_DOMAIN, domain)
        .attribute(
            attribute::ALIAS_TARGET_DNS_NAME,
            AttributeValue::Deferred(DeferredAttributeReference::new(
                environment.clone(),
                ENDPOINT_URL_ATTRIBUTE,
            )),
        )
        .text(
            attribute::ALIAS_TARGET_HOSTED_ZONE_ID,
            ALIAS_TARGET_HOSTED_ZONE_ID,
        )
        .depends_on(environment)
        .build()
}

#[cfg(test)]
mod tests {
    use ebplan_common::config::FeatureFlags;
    use ebplan_common::types::RuntimeVariant;

    use super::*;

    fn base_config(variant: RuntimeVariant) -> ebplan_common::config::EnvironmentVariantConfigBuilder {
        EnvironmentVariantConfig::builder("Backend-Prod", variant)
            .stage("prod")
            .target("123456789012", "us-east-1")
            .source_location("./dist")
    }

    #[test]
    fn javascript_plan_has_three_descriptors_in_order() {
        let plan = build(&base_config(RuntimeVariant::JavascriptRuntime).build()).expect("build");
        let kinds: Vec<ResourceKind> = plan.iter().map(ResourceDescriptor::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ResourceKind::Application,
                ResourceKind::Version,
                ResourceKind::Environment,
            ]
        );
        assert_eq!(plan.target().region, "us-east-1");
    }

    #[test]
    fn environment_runs_the_version_just_built() {
        let plan = build(&base_config(RuntimeVariant::JavascriptRuntime).build()).expect("build");
        let env = plan.get(logical_name::ENVIRONMENT).expect("environment");
        assert_eq!(
            env.attribute(attribute::VERSION_LABEL),
            Some(&AttributeValue::Ref(LogicalName::new(logical_name::VERSION)))
        );
        assert_eq!(env.depends_on(), &[LogicalName::new(logical_name::APPLICATION)]);
    }

    #[test]
    fn instances_launch_with_the_granted_profile() {
        let plan = build(&base_config(RuntimeVariant::JavascriptRuntime).build()).expect("build");
        let env = plan.get(logical_name::ENVIRONMENT).expect("environment");
        let profile = env
            .attribute(attribute::INSTANCE_PROFILE_NAME)
            .and_then(AttributeValue::as_text)
            .expect("profile name");
        assert_eq!(profile, "Backend-Prod-InstanceProfile");

        let bound = env
            .options(attribute::OPTION_SETTINGS)
            .expect("options")
            .iter()
            .find(|o| o.key() == ("aws:autoscaling:launchconfiguration", "IamInstanceProfile"))
            .expect("profile option");
        assert_eq!(bound.value, profile);
    }

    #[test]
    fn version_carries_source_bundle() {
        let plan = build(&base_config(RuntimeVariant::JavascriptRuntime).build()).expect("build");
        let version = plan.get(logical_name::VERSION).expect("version");
        assert_eq!(
            version
                .attribute(attribute::SOURCE_BUNDLE)
                .and_then(AttributeValue::as_text),
            Some("./dist")
        );
    }

    #[test]
    fn missing_fields_are_aggregated_with_variant_fields() {
        let config = EnvironmentVariantConfig::builder("", RuntimeVariant::WsgiRuntime)
            .stage("prod")
            .target("123456789012", "")
            .source_location("./src")
            .build();
        assert_eq!(
            build(&config).unwrap_err(),
            PlanError::MissingRequiredField {
                fields: vec![
                    "application_name".into(),
                    "region".into(),
                    "wsgi_path".into()
                ],
            }
        );
    }

    #[test]
    fn option_precedence_is_fixed() {
        let config = base_config(RuntimeVariant::ContainerRuntime)
            .container_port(3000)
            .domain_name("api.example.com")
            .certificate_arn("arn:cert:1")
            .features(FeatureFlags::ALL)
            .static_files_path("public")
            .loose_health_check(true)
            .option(OptionSetting::new(
                "aws:elasticbeanstalk:application:environment",
                "LOG_LEVEL",
                "info",
            ))
            .build();
        let specialization = variant::specialize(&config).expect("specialize");
        let options = environment_options(&config, specialization.options).expect("options");
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "InstanceType",
                "IamInstanceProfile",
                "LoadBalancerType",
                "IdleTimeout",
                "Env",
                "MinSize",
                "MaxSize",
                "ListenerEnabled",
                "Protocol",
                "SSLCertificateArns",
                "StreamLogs",
                "RetentionInDays",
                "DeleteOnTerminate",
                "HealthStreamingEnabled",
                "RetentionInDays",
                "DeleteOnTerminate",
                "SystemType",
                "ConfigDocument",
                "/static",
                "MatcherHTTPCode",
                "PORT",
                "LOG_LEVEL",
            ]
        );
    }

    #[test]
    fn extra_option_shadowing_a_builtin_is_rejected() {
        let config = base_config(RuntimeVariant::ContainerRuntime)
            .container_port(8080)
            .option(OptionSetting::new(
                "aws:elasticbeanstalk:application:environment",
                "PORT",
                "9090",
            ))
            .build();
        assert_eq!(
            build(&config).unwrap_err(),
            PlanError::ConflictingOption {
                namespace: "aws:elasticbeanstalk:application:environment".into(),
                name: "PORT".into(),
                existing: "8080".into(),
                incoming: "9090".into(),
            }
        );
    }

    #[test]
    fn alias_points_at_environment_endpoint() {
        let config = base_config(RuntimeVariant::JavascriptRuntime)
            .domain_name("api.example.com")
            .certificate_arn("arn:cert:1")
            .build();
        let plan = build(&config).expect("build");
        let alias = plan.get(logical_name::ALIAS_RECORD).expect("alias");
        assert_eq!(alias.kind(), ResourceKind::DnsAlias);
        assert_eq!(
            alias.attribute(attribute::ALIAS_TARGET_DNS_NAME),
            Some(&AttributeValue::Deferred(DeferredAttributeReference::new(
                LogicalName::new(logical_name::ENVIRONMENT),
                "EndpointURL",
            )))
        );
        assert_eq!(
            alias
                .attribute(attribute::ALIAS_TARGET_HOSTED_ZONE_ID)
                .and_then(AttributeValue::as_text),
            Some("Z35SXDOTRQ7X7K")
        );
        assert_eq!(
            alias
                .attribute(attribute::RECORD_NAME)
                .and_then(AttributeValue::as_text),
            Some("api.example.com")
        );
    }

    #[test]
    fn solution_stack_override_reaches_environment() {
        let config = base_config(RuntimeVariant::JavascriptRuntime)
            .solution_stack("64bit Amazon Linux 2023 v6.6.0 running Node.js 22")
            .build();
        let plan = build(&config).expect("build");
        let env = plan.get(logical_name::ENVIRONMENT).expect("environment");
        assert_eq!(
            env.attribute(attribute::SOLUTION_STACK_NAME)
                .and_then(AttributeValue::as_text),
            Some("64bit Amazon Linux 2023 v6.6.0 running Node.js 22")
        );
    }
}
