//! Property-based tests for plan construction.
//!
//! ## Properties Verified
//!
//! For every valid configuration:
//! - Descriptor order is a topological order of dependencies and references
//! - No option list repeats a `(namespace, name)` pair
//! - Building twice yields structurally identical plans
//! - An alias descriptor exists iff both domain and certificate are present

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;

use ebplan_common::config::{EnvironmentVariantConfig, FeatureFlags, InstanceSizing};
use ebplan_common::types::{LogicalName, RuntimeVariant};
use ebplan_compose::build;
use ebplan_compose::builder::attribute;
use proptest::prelude::*;

fn arb_variant() -> impl Strategy<Value = RuntimeVariant> {
    prop_oneof![
        Just(RuntimeVariant::JavascriptRuntime),
        Just(RuntimeVariant::WsgiRuntime),
        Just(RuntimeVariant::ContainerRuntime),
    ]
}

fn arb_optional_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new())), "[a-z]{1,12}".prop_map(Some)]
}

prop_compose! {
    fn arb_config()(
        variant in arb_variant(),
        stage in "[a-z]{1,8}",
        domain_name in arb_optional_text(),
        certificate_arn in arb_optional_text(),
        static_files_path in arb_optional_text(),
        loose_health_check in any::<bool>(),
        web_server_logs in any::<bool>(),
        health_event_logs in any::<bool>(),
        health_reporting in any::<bool>(),
        min_instances in 1u32..4,
        extra in 0u32..4,
        port in 1u16..,
    ) -> EnvironmentVariantConfig {
        EnvironmentVariantConfig {
            application_name: "Backend".into(),
            stage,
            account: "123456789012".into(),
            region: "us-east-1".into(),
            variant,
            domain_name,
            certificate_arn,
            source_location: "./dist".into(),
            static_files_path,
            loose_health_check,
            sizing: InstanceSizing {
                instance_type: "t3.small".into(),
                min_instances,
                max_instances: min_instances + extra,
            },
            features: FeatureFlags {
                web_server_logs,
                health_event_logs,
                health_reporting,
            },
            wsgi_path: Some("app.wsgi".into()),
            container_port: Some(port),
            ..EnvironmentVariantConfig::default()
        }
    }
}

proptest! {
    /// Property: every dependency and reference precedes its dependent
    #[test]
    fn prop_plan_order_is_topological(config in arb_config()) {
        let plan = build(&config).expect("valid config builds");
        let order: Vec<LogicalName> = plan.logical_names().into_iter().cloned().collect();
        prop_assert!(plan.dependency_graph().is_valid_order(&order));

        let resolved = plan.dependency_graph().resolve_order().expect("acyclic");
        prop_assert_eq!(resolved.len(), plan.len());
    }

    /// Property: option lists never repeat a namespace/name pair
    #[test]
    fn prop_options_are_unique(config in arb_config()) {
        let plan = build(&config).expect("valid config builds");
        for descriptor in &plan {
            if let Some(options) = descriptor.options(attribute::OPTION_SETTINGS) {
                let mut seen = HashSet::new();
                for option in options {
                    prop_assert!(seen.insert(option.key()), "repeated {}", option);
                }
            }
        }
    }

    /// Property: build is a pure function of its configuration
    #[test]
    fn prop_build_is_idempotent(config in arb_config()) {
        let first = build(&config).expect("first build");
        let second = build(&config.clone()).expect("second build");
        prop_assert_eq!(first, second);
    }

    /// Property: the alias exists exactly when domain and certificate do
    #[test]
    fn prop_alias_iff_domain_and_certificate(config in arb_config()) {
        let plan = build(&config).expect("valid config builds");
        let expected = config.domain_binding().is_some();
        prop_assert_eq!(plan.get("AliasRecord").is_some(), expected);
        prop_assert_eq!(plan.len(), if expected { 4 } else { 3 });
    }
}
