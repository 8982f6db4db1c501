//! Plan rendering for CLI output.
//!
//! The text form is meant for review before provisioning. JSON and YAML
//! hand the plan to a provisioning engine unchanged.

use std::fmt::Write as _;

use clap::ValueEnum;
use ebplan_compose::DeploymentPlan;
use ebplan_compose::descriptor::AttributeValue;

const RULE_WIDTH: usize = 35;

/// Output format of a rendered plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML document.
    Yaml,
}

/// Renders `plan` in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(plan: &DeploymentPlan, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => render_text(plan),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(plan)?),
    }
}

fn render_text(plan: &DeploymentPlan) -> anyhow::Result<String> {
    let mut out = String::new();
    let target = plan.target();

    writeln!(out, "Deployment Plan for: {} ({})", target.account, target.region)?;
    writeln!(out, "{}", "\u{2550}".repeat(RULE_WIDTH))?;
    writeln!(out)?;

    for descriptor in plan {
        writeln!(out, "  + {} [{}]", descriptor.logical_name(), descriptor.kind())?;
        for (key, value) in descriptor.attributes() {
            write_attribute(&mut out, key, value)?;
        }
        if !descriptor.depends_on().is_empty() {
            let names: Vec<&str> = descriptor.depends_on().iter().map(|n| n.as_str()).collect();
            writeln!(out, "      depends on: {}", names.join(", "))?;
        }
    }

    writeln!(out)?;
    write!(out, "  {} resource(s) will be created.", plan.len())?;
    Ok(out)
}

fn write_attribute(out: &mut String, key: &str, value: &AttributeValue) -> std::fmt::Result {
    match value {
        AttributeValue::Text(text) => writeln!(out, "      {key}: {text}"),
        AttributeValue::Ref(name) => writeln!(out, "      {key}: ref({name})"),
        AttributeValue::Deferred(reference) => writeln!(out, "      {key}: {reference}"),
        AttributeValue::List(items) => {
            writeln!(out, "      {key}:")?;
            items.iter().try_for_each(|item| writeln!(out, "        - {item}"))
        }
        AttributeValue::Options(options) => {
            writeln!(out, "      {key}:")?;
            options
                .iter()
                .try_for_each(|option| writeln!(out, "        {option}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use ebplan_common::config::EnvironmentVariantConfig;
    use ebplan_common::types::RuntimeVariant;

    use super::*;

    fn plan() -> DeploymentPlan {
        let config = EnvironmentVariantConfig::builder("Backend-Prod", RuntimeVariant::JavascriptRuntime)
            .stage("prod")
            .target("123456789012", "eu-west-1")
            .source_location("./dist")
            .domain_name("api.example.com")
            .certificate_arn("arn:cert:1")
            .build();
        ebplan_compose::build(&config).expect("build")
    }

    #[test]
    fn text_lists_every_resource_in_order() {
        let text = render(&plan(), OutputFormat::Text).expect("render");
        assert!(text.starts_with("Deployment Plan for: 123456789012 (eu-west-1)"));

        let positions: Vec<usize> = [
            "+ Application [application]",
            "+ ApplicationVersion [version]",
            "+ Environment [environment]",
            "+ AliasRecord [dns-alias]",
        ]
        .iter()
        .map(|line| text.find(line).expect(line))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.ends_with("4 resource(s) will be created."));
    }

    #[test]
    fn text_shows_deferred_reference_unresolved() {
        let text = render(&plan(), OutputFormat::Text).expect("render");
        assert!(text.contains("${Environment.EndpointURL}"), "{text}");
        assert!(text.contains("depends on: Environment"));
    }

    #[test]
    fn json_and_yaml_carry_the_descriptors() {
        let json = render(&plan(), OutputFormat::Json).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["descriptors"].as_array().map(Vec::len), Some(4));

        let yaml = render(&plan(), OutputFormat::Yaml).expect("yaml");
        assert!(yaml.contains("dns-alias"));
    }
}
