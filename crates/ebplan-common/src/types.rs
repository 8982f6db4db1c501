//! Domain primitive types used across the ebplan workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Kind of application deployed on the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeVariant {
    /// JavaScript server runtime.
    #[default]
    JavascriptRuntime,
    /// WSGI/Python runtime.
    WsgiRuntime,
    /// Container image runtime.
    ContainerRuntime,
}

impl RuntimeVariant {
    /// Every supported variant, in declaration order.
    pub const ALL: [Self; 3] = [
        Self::JavascriptRuntime,
        Self::WsgiRuntime,
        Self::ContainerRuntime,
    ];

    /// Returns the canonical tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JavascriptRuntime => "javascript-runtime",
            Self::WsgiRuntime => "wsgi-runtime",
            Self::ContainerRuntime => "container-runtime",
        }
    }

    /// Returns the short framework name used by the CLI entrypoints.
    #[must_use]
    pub const fn framework(self) -> &'static str {
        match self {
            Self::JavascriptRuntime => "nodejs",
            Self::WsgiRuntime => "django",
            Self::ContainerRuntime => "docker",
        }
    }
}

impl fmt::Display for RuntimeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeVariant {
    type Err = PlanError;

    /// Accepts the canonical tag or the framework name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "javascript-runtime" | "nodejs" | "node" => Ok(Self::JavascriptRuntime),
            "wsgi-runtime" | "django" | "python" => Ok(Self::WsgiRuntime),
            "container-runtime" | "docker" => Ok(Self::ContainerRuntime),
            _ => Err(PlanError::UnsupportedVariant { tag: s.to_owned() }),
        }
    }
}

/// A namespaced key/value entry of the environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionSetting {
    /// Option namespace.
    pub namespace: String,
    /// Option name within the namespace.
    pub name: String,
    /// Option value.
    pub value: String,
}

impl OptionSetting {
    /// Creates an option setting.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the `(namespace, name)` pair that must be unique per list.
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (&self.namespace, &self.name)
    }
}

impl fmt::Display for OptionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}={}", self.namespace, self.name, self.value)
    }
}

impl FromStr for OptionSetting {
    type Err = String;

    /// Parses `namespace:name=value`, splitting on the last `:` before `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected namespace:name=value, got \"{s}\""))?;
        let (namespace, name) = key
            .rsplit_once(':')
            .ok_or_else(|| format!("expected namespace:name=value, got \"{s}\""))?;
        if namespace.is_empty() || name.is_empty() {
            return Err(format!("empty namespace or name in \"{s}\""));
        }
        Ok(Self::new(namespace, name, value))
    }
}

/// A managed permission policy granted to the environment's instance role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionRef(String);

impl PermissionRef {
    /// Creates a permission reference from a managed policy name.
    #[must_use]
    pub fn new(policy: impl Into<String>) -> Self {
        Self(policy.into())
    }

    /// Returns the managed policy name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable logical name of a resource descriptor within one plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogicalName(String);

impl LogicalName {
    /// Creates a logical name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parses_canonical_tags_and_framework_names() {
        for variant in RuntimeVariant::ALL {
            assert_eq!(variant.as_str().parse::<RuntimeVariant>(), Ok(variant));
            assert_eq!(variant.framework().parse::<RuntimeVariant>(), Ok(variant));
        }
        assert_eq!(
            "Docker".parse::<RuntimeVariant>(),
            Ok(RuntimeVariant::ContainerRuntime)
        );
    }

    #[test]
    fn unknown_variant_is_rejected_with_its_tag() {
        let err = "ruby-on-rails".parse::<RuntimeVariant>().unwrap_err();
        assert_eq!(
            err,
            PlanError::UnsupportedVariant {
                tag: "ruby-on-rails".into()
            }
        );
    }

    #[test]
    fn variant_serializes_as_kebab_case_tag() {
        let json = serde_json::to_string(&RuntimeVariant::WsgiRuntime).expect("serialize");
        assert_eq!(json, "\"wsgi-runtime\"");
    }

    #[test]
    fn option_setting_parses_last_colon_as_separator() {
        let opt: OptionSetting = "aws:elasticbeanstalk:application:environment:DEBUG=false"
            .parse()
            .expect("parse");
        assert_eq!(opt.namespace, "aws:elasticbeanstalk:application:environment");
        assert_eq!(opt.name, "DEBUG");
        assert_eq!(opt.value, "false");
    }

    #[test]
    fn option_setting_keeps_equals_in_value() {
        let opt: OptionSetting = "ns:KEY=a=b".parse().expect("parse");
        assert_eq!(opt.value, "a=b");
    }

    #[test]
    fn option_setting_rejects_malformed_input() {
        assert!("no-equals".parse::<OptionSetting>().is_err());
        assert!("nocolon=1".parse::<OptionSetting>().is_err());
        assert!(":name=1".parse::<OptionSetting>().is_err());
    }

    #[test]
    fn option_setting_display() {
        let opt = OptionSetting::new("aws:autoscaling:asg", "MinSize", "1");
        assert_eq!(opt.to_string(), "aws:autoscaling:asg/MinSize=1");
        assert_eq!(opt.key(), ("aws:autoscaling:asg", "MinSize"));
    }
}
