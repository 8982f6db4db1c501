//! Option blocks and their conditional merge.
//!
//! Every block is a pure function returning a fixed, ordered list of
//! [`OptionSetting`]s. The environment's final list is produced by folding an
//! ordered sequence of [`ConditionalBlock`]s into an [`OptionList`], which
//! rejects any repeated `(namespace, name)` pair.

use std::collections::HashMap;

use ebplan_common::config::{EnvironmentVariantConfig, instance_profile_name};
use ebplan_common::constants::{
    HEALTH_METRIC_PERIOD_SECS, IDLE_TIMEOUT_SECS, LOG_RETENTION_DAYS, LOOSE_HEALTH_CHECK_MATCHER,
    STATIC_FILES_URL_PATH, namespace,
};
use ebplan_common::error::{PlanError, Result};
use ebplan_common::types::OptionSetting;
use serde_json::{Map, Value, json};

/// Environment-level metrics published by enhanced health reporting.
const ENVIRONMENT_METRICS: &[&str] = &[
    "ApplicationLatencyP90",
    "ApplicationLatencyP95",
    "ApplicationLatencyP99",
    "ApplicationRequests4xx",
    "ApplicationRequests5xx",
    "ApplicationRequestsTotal",
    "InstancesNoData",
    "InstancesUnknown",
    "InstancesPending",
    "InstancesInfo",
    "InstancesWarning",
    "InstancesSevere",
    "InstancesDegraded",
    "InstancesOk",
];

/// Instance-level metrics published by enhanced health reporting.
const INSTANCE_METRICS: &[&str] = &[
    "ApplicationLatencyP90",
    "ApplicationLatencyP95",
    "ApplicationLatencyP99",
    "ApplicationRequests4xx",
    "ApplicationRequests5xx",
    "ApplicationRequestsTotal",
    "InstanceHealth",
    "LoadAverage1min",
    "LoadAverage5min",
    "CPUUser",
    "CPUIdle",
    "CPUIrq",
    "CPUNice",
    "CPUIowait",
    "CPUSystem",
    "CPUSoftirq",
    "RootFilesystemUtil",
];

/// Sizing and instance profile, load balancer, stage binding and scaling
/// bounds, in that order.
pub fn base_options(config: &EnvironmentVariantConfig) -> Vec<OptionSetting> {
    vec![
        OptionSetting::new(
            namespace::LAUNCH_CONFIGURATION,
            "InstanceType",
            &config.sizing.instance_type,
        ),
        OptionSetting::new(
            namespace::LAUNCH_CONFIGURATION,
            "IamInstanceProfile",
            instance_profile_name(&config.application_name),
        ),
        OptionSetting::new(namespace::ENVIRONMENT, "LoadBalancerType", "application"),
        OptionSetting::new(
            namespace::LOAD_BALANCER,
            "IdleTimeout",
            IDLE_TIMEOUT_SECS.to_string(),
        ),
        OptionSetting::new(namespace::APPLICATION_ENVIRONMENT, "Env", &config.stage),
        OptionSetting::new(
            namespace::AUTOSCALING_GROUP,
            "MinSize",
            config.sizing.min_instances.to_string(),
        ),
        OptionSetting::new(
            namespace::AUTOSCALING_GROUP,
            "MaxSize",
            config.sizing.max_instances.to_string(),
        ),
    ]
}

/// TLS listener on port 443 terminating with the given certificate.
pub fn https_listener(certificate_arn: &str) -> Vec<OptionSetting> {
    vec![
        OptionSetting::new(namespace::HTTPS_LISTENER, "ListenerEnabled", "true"),
        OptionSetting::new(namespace::HTTPS_LISTENER, "Protocol", "HTTPS"),
        OptionSetting::new(
            namespace::HTTPS_LISTENER,
            "SSLCertificateArns",
            certificate_arn,
        ),
    ]
}

/// Web server log streaming with 30-day retention.
pub fn web_server_log_streaming() -> Vec<OptionSetting> {
    vec![
        OptionSetting::new(namespace::CLOUDWATCH_LOGS, "StreamLogs", "true"),
        OptionSetting::new(
            namespace::CLOUDWATCH_LOGS,
            "RetentionInDays",
            LOG_RETENTION_DAYS.to_string(),
        ),
        OptionSetting::new(namespace::CLOUDWATCH_LOGS, "DeleteOnTerminate", "false"),
    ]
}

/// Health event log streaming with 30-day retention.
pub fn health_event_log_streaming() -> Vec<OptionSetting> {
    vec![
        OptionSetting::new(
            namespace::CLOUDWATCH_HEALTH_LOGS,
            "HealthStreamingEnabled",
            "true",
        ),
        OptionSetting::new(
            namespace::CLOUDWATCH_HEALTH_LOGS,
            "RetentionInDays",
            LOG_RETENTION_DAYS.to_string(),
        ),
        OptionSetting::new(
            namespace::CLOUDWATCH_HEALTH_LOGS,
            "DeleteOnTerminate",
            "false",
        ),
    ]
}

/// Enhanced health reporting with its monitoring document.
pub fn enhanced_health_reporting() -> Vec<OptionSetting> {
    vec![
        OptionSetting::new(namespace::HEALTH_REPORTING, "SystemType", "enhanced"),
        OptionSetting::new(
            namespace::HEALTH_REPORTING,
            "ConfigDocument",
            health_config_document(),
        ),
    ]
}

/// Compact JSON configuration document for enhanced health reporting.
///
/// Key order is part of the platform contract and follows the declaration
/// order of the metric tables above.
pub fn health_config_document() -> String {
    let document = json!({
        "CloudWatchMetrics": {
            "Environment": metric_periods(ENVIRONMENT_METRICS),
            "Instance": metric_periods(INSTANCE_METRICS),
        },
        "Rules": {
            "Environment": {
                "Application": {
                    "ApplicationRequests4xx": { "Enabled": false },
                },
                "ELB": {
                    "ELBRequests4xx": { "Enabled": false },
                },
            },
        },
        "Version": 1,
    });
    document.to_string()
}

fn metric_periods(metrics: &[&str]) -> Value {
    let map: Map<String, Value> = metrics
        .iter()
        .map(|metric| ((*metric).to_owned(), Value::from(HEALTH_METRIC_PERIOD_SECS)))
        .collect();
    Value::Object(map)
}

/// Serves `path` under the `/static` URL prefix from the reverse proxy.
pub fn static_files(path: &str) -> Vec<OptionSetting> {
    vec![OptionSetting::new(
        namespace::STATIC_FILES,
        STATIC_FILES_URL_PATH,
        path,
    )]
}

/// Treats every status below 500 as healthy.
pub fn loose_health_check() -> Vec<OptionSetting> {
    vec![OptionSetting::new(
        namespace::DEFAULT_PROCESS,
        "MatcherHTTPCode",
        LOOSE_HEALTH_CHECK_MATCHER,
    )]
}

/// An option block applied only when its condition holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalBlock {
    /// Short label used in logs.
    pub label: &'static str,
    /// Whether the block is appended.
    pub condition: bool,
    /// Options appended when the condition holds.
    pub options: Vec<OptionSetting>,
}

impl ConditionalBlock {
    /// A block appended only if `condition` holds.
    #[must_use]
    pub const fn when(label: &'static str, condition: bool, options: Vec<OptionSetting>) -> Self {
        Self {
            label,
            condition,
            options,
        }
    }

    /// A block that is always appended.
    #[must_use]
    pub const fn always(label: &'static str, options: Vec<OptionSetting>) -> Self {
        Self::when(label, true, options)
    }

    /// A block built from an optional value; absent means skipped.
    #[must_use]
    pub fn from_option(label: &'static str, options: Option<Vec<OptionSetting>>) -> Self {
        let condition = options.is_some();
        Self::when(label, condition, options.unwrap_or_default())
    }
}

/// Ordered option list that rejects repeated `(namespace, name)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    entries: Vec<OptionSetting>,
    index: HashMap<(String, String), usize>,
}

impl OptionList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one option.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::ConflictingOption`] if the pair is already present.
    pub fn push(&mut self, option: OptionSetting) -> Result<()> {
        let key = (option.namespace.clone(), option.name.clone());
        if let Some(&pos) = self.index.get(&key) {
            return Err(PlanError::ConflictingOption {
                namespace: option.namespace,
                name: option.name,
                existing: self.entries[pos].value.clone(),
                incoming: option.value,
            });
        }
        let _ = self.index.insert(key, self.entries.len());
        self.entries.push(option);
        Ok(())
    }

    /// Appends every option in order, stopping at the first conflict.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::ConflictingOption`] on the first repeated pair.
    pub fn extend(&mut self, options: impl IntoIterator<Item = OptionSetting>) -> Result<()> {
        options.into_iter().try_for_each(|option| self.push(option))
    }

    /// Number of options in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the value bound to `(namespace, name)`.
    #[must_use]
    pub fn get(&self, namespace: &str, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|o| o.key() == (namespace, name))
            .map(|o| o.value.as_str())
    }

    /// Borrows the options in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[OptionSetting] {
        &self.entries
    }

    /// Consumes the list, returning the options in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<OptionSetting> {
        self.entries
    }
}

/// Folds `blocks` left to right into one list, skipping blocks whose
/// condition does not hold.
///
/// # Errors
///
/// Returns [`PlanError::ConflictingOption`] if two applied blocks emit the
/// same `(namespace, name)` pair.
pub fn merge_blocks(blocks: impl IntoIterator<Item = ConditionalBlock>) -> Result<OptionList> {
    blocks
        .into_iter()
        .filter(|block| block.condition)
        .try_fold(OptionList::new(), |mut list, block| {
            tracing::debug!(
                block = block.label,
                options = block.options.len(),
                "applying option block"
            );
            list.extend(block.options)?;
            Ok(list)
        })
}
