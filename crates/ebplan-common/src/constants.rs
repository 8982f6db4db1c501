//! Platform vocabulary and defaults.
//!
//! Namespace, option and policy strings are consumed verbatim by the hosting
//! platform and must not be renamed.

/// Binary name for the CLI.
pub const BIN_NAME: &str = "ebplan";

/// Default instance type when none is configured.
pub const DEFAULT_INSTANCE_TYPE: &str = "t3.small";
/// Default lower bound of the auto scaling group.
pub const DEFAULT_MIN_INSTANCES: u32 = 1;
/// Default upper bound of the auto scaling group.
pub const DEFAULT_MAX_INSTANCES: u32 = 2;

/// Load balancer idle timeout, in seconds.
pub const IDLE_TIMEOUT_SECS: u32 = 300;
/// Retention applied to every streamed log group, in days.
pub const LOG_RETENTION_DAYS: u32 = 30;
/// Period, in seconds, of every metric published by enhanced health reporting.
pub const HEALTH_METRIC_PERIOD_SECS: u32 = 60;
/// Status codes accepted by the loose health check.
pub const LOOSE_HEALTH_CHECK_MATCHER: &str = "200-499";
/// URL prefix under which static files are served.
pub const STATIC_FILES_URL_PATH: &str = "/static";

/// Application name used by `ebplan nodejs` when none is given.
pub const NODEJS_DEFAULT_APP_NAME: &str = "NodeJSBackend";
/// Application name used by `ebplan django` when none is given.
pub const DJANGO_DEFAULT_APP_NAME: &str = "DjangoBackend";

/// Suffix of the instance profile name derived from the application name.
pub const INSTANCE_PROFILE_SUFFIX: &str = "InstanceProfile";

/// Hosted zone of the platform's load balancer endpoints in `us-east-1`.
pub const ALIAS_TARGET_HOSTED_ZONE_ID: &str = "Z35SXDOTRQ7X7K";
/// Attribute of the environment holding its endpoint hostname.
pub const ENDPOINT_URL_ATTRIBUTE: &str = "EndpointURL";

/// Option namespaces.
pub mod namespace {
    /// Launch configuration of the environment's instances.
    pub const LAUNCH_CONFIGURATION: &str = "aws:autoscaling:launchconfiguration";
    /// Auto scaling group bounds.
    pub const AUTOSCALING_GROUP: &str = "aws:autoscaling:asg";
    /// General environment settings.
    pub const ENVIRONMENT: &str = "aws:elasticbeanstalk:environment";
    /// Application load balancer settings.
    pub const LOAD_BALANCER: &str = "aws:elbv2:loadbalancer";
    /// Environment variables exposed to the application.
    pub const APPLICATION_ENVIRONMENT: &str = "aws:elasticbeanstalk:application:environment";
    /// TLS listener on port 443.
    pub const HTTPS_LISTENER: &str = "aws:elbv2:listener:443";
    /// Instance log streaming.
    pub const CLOUDWATCH_LOGS: &str = "aws:elasticbeanstalk:cloudwatch:logs";
    /// Health event log streaming.
    pub const CLOUDWATCH_HEALTH_LOGS: &str = "aws:elasticbeanstalk:cloudwatch:logs:health";
    /// Health reporting system.
    pub const HEALTH_REPORTING: &str = "aws:elasticbeanstalk:healthreporting:system";
    /// Python platform container.
    pub const PYTHON_CONTAINER: &str = "aws:elasticbeanstalk:container:python";
    /// Reverse proxy static file mappings.
    pub const STATIC_FILES: &str = "aws:elasticbeanstalk:environment:proxy:staticfiles";
    /// Default process behind the load balancer.
    pub const DEFAULT_PROCESS: &str = "aws:elasticbeanstalk:environment:process:default";
}

/// Managed permission policies attached to the instance role.
pub mod policy {
    /// Web tier operations.
    pub const WEB_TIER: &str = "AWSElasticBeanstalkWebTier";
    /// Worker tier operations.
    pub const WORKER_TIER: &str = "AWSElasticBeanstalkWorkerTier";
    /// Platform administration.
    pub const ADMINISTRATOR: &str = "AdministratorAccess-AWSElasticBeanstalk";
    /// Read-only access to the container registry.
    pub const REGISTRY_READ_ONLY: &str = "AmazonEC2ContainerRegistryReadOnly";
    /// Multi-container runtime operation.
    pub const MULTICONTAINER_DOCKER: &str = "AWSElasticBeanstalkMulticontainerDocker";
}

/// Default platform solution stacks per runtime variant.
pub mod solution_stack {
    /// JavaScript server runtime.
    pub const NODEJS: &str = "64bit Amazon Linux 2023 v6.5.2 running Node.js 22";
    /// WSGI/Python runtime.
    pub const PYTHON: &str = "64bit Amazon Linux 2023 v4.5.1 running Python 3.12";
    /// Container image runtime.
    pub const DOCKER: &str = "64bit Amazon Linux 2023 v4.5.1 running Docker";
}

/// Stable logical names of the plan's descriptors.
pub mod logical_name {
    /// The application resource.
    pub const APPLICATION: &str = "Application";
    /// The source bundle version.
    pub const VERSION: &str = "ApplicationVersion";
    /// The running environment.
    pub const ENVIRONMENT: &str = "Environment";
    /// The DNS alias record for the custom domain.
    pub const ALIAS_RECORD: &str = "AliasRecord";
}
