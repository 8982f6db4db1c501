//! Runtime variant specialization.
//!
//! Each [`RuntimeVariant`] maps to a static [`VariantSpec`] holding plain
//! function pointers, so dispatch is a table lookup on the tag.

use ebplan_common::config::EnvironmentVariantConfig;
use ebplan_common::constants::{namespace, policy, solution_stack};
use ebplan_common::error::{PlanError, Result};
use ebplan_common::types::{OptionSetting, PermissionRef, RuntimeVariant};

/// Permission grants every variant needs.
pub const BASE_GRANTS: &[&str] = &[policy::WEB_TIER, policy::WORKER_TIER, policy::ADMINISTRATOR];

/// Variant-specific additions to the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specialization {
    /// Options appended after the feature blocks.
    pub options: Vec<OptionSetting>,
    /// Permission grants for the instance role, base set first.
    pub grants: Vec<PermissionRef>,
}

/// Static description of one runtime variant.
#[derive(Debug)]
pub struct VariantSpec {
    /// Variant this entry describes.
    pub variant: RuntimeVariant,
    /// Solution stack used when the configuration does not override it.
    pub default_solution_stack: &'static str,
    /// Grants added on top of [`BASE_GRANTS`].
    pub extra_grants: &'static [&'static str],
    /// Lists the variant's required fields that are absent.
    pub missing_fields: fn(&EnvironmentVariantConfig) -> Vec<String>,
    /// Emits the variant's options.
    pub options: fn(&EnvironmentVariantConfig) -> Result<Vec<OptionSetting>>,
}

static JAVASCRIPT: VariantSpec = VariantSpec {
    variant: RuntimeVariant::JavascriptRuntime,
    default_solution_stack: solution_stack::NODEJS,
    extra_grants: &[],
    missing_fields: no_missing_fields,
    options: no_options,
};

static WSGI: VariantSpec = VariantSpec {
    variant: RuntimeVariant::WsgiRuntime,
    default_solution_stack: solution_stack::PYTHON,
    extra_grants: &[],
    missing_fields: wsgi_missing_fields,
    options: wsgi_options,
};

static CONTAINER: VariantSpec = VariantSpec {
    variant: RuntimeVariant::ContainerRuntime,
    default_solution_stack: solution_stack::DOCKER,
    extra_grants: &[policy::REGISTRY_READ_ONLY, policy::MULTICONTAINER_DOCKER],
    missing_fields: container_missing_fields,
    options: container_options,
};

/// Returns the table entry for `variant`.
#[must_use]
pub fn spec_for(variant: RuntimeVariant) -> &'static VariantSpec {
    match variant {
        RuntimeVariant::JavascriptRuntime => &JAVASCRIPT,
        RuntimeVariant::WsgiRuntime => &WSGI,
        RuntimeVariant::ContainerRuntime => &CONTAINER,
    }
}

/// Lists the required fields of the configured variant that are absent.
#[must_use]
pub fn missing_fields(config: &EnvironmentVariantConfig) -> Vec<String> {
    (spec_for(config.variant).missing_fields)(config)
}

/// Returns the solution stack for the configuration, honouring overrides.
#[must_use]
pub fn solution_stack_for(config: &EnvironmentVariantConfig) -> &str {
    config
        .solution_stack()
        .unwrap_or(spec_for(config.variant).default_solution_stack)
}

/// Derives the variant's extra options and permission grants.
///
/// # Errors
///
/// Returns [`PlanError::MissingRequiredField`] naming every variant field
/// that is absent.
pub fn specialize(config: &EnvironmentVariantConfig) -> Result<Specialization> {
    let spec = spec_for(config.variant);
    let missing = (spec.missing_fields)(config);
    if !missing.is_empty() {
        return Err(PlanError::MissingRequiredField { fields: missing });
    }

    let options = (spec.options)(config)?;
    let grants = BASE_GRANTS
        .iter()
        .chain(spec.extra_grants)
        .map(|name| PermissionRef::new(*name))
        .collect();

    tracing::debug!(
        variant = %spec.variant,
        options = options.len(),
        "specialized runtime variant"
    );
    Ok(Specialization { options, grants })
}

fn no_missing_fields(_config: &EnvironmentVariantConfig) -> Vec<String> {
    Vec::new()
}

#[allow(clippy::unnecessary_wraps)]
fn no_options(_config: &EnvironmentVariantConfig) -> Result<Vec<OptionSetting>> {
    Ok(Vec::new())
}

fn wsgi_missing_fields(config: &EnvironmentVariantConfig) -> Vec<String> {
    if config.wsgi_path().is_none() {
        vec!["wsgi_path".to_owned()]
    } else {
        Vec::new()
    }
}

fn wsgi_options(config: &EnvironmentVariantConfig) -> Result<Vec<OptionSetting>> {
    let path = config
        .wsgi_path()
        .ok_or_else(|| PlanError::missing("wsgi_path"))?;
    Ok(vec![OptionSetting::new(
        namespace::PYTHON_CONTAINER,
        "WSGIPath",
        path,
    )])
}

fn container_missing_fields(config: &EnvironmentVariantConfig) -> Vec<String> {
    if config.container_port.is_none() {
        vec!["container_port".to_owned()]
    } else {
        Vec::new()
    }
}

fn container_options(config: &EnvironmentVariantConfig) -> Result<Vec<OptionSetting>> {
    let port = config
        .container_port
        .ok_or_else(|| PlanError::missing("container_port"))?;
    Ok(vec![OptionSetting::new(
        namespace::APPLICATION_ENVIRONMENT,
        "PORT",
        port.to_string(),
    )])
}
