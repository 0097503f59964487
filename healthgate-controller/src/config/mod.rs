//! Configuration management for the healthgate controller
//!
//! Settings are resolved once at startup, in this order:
//! 1. Default values
//! 2. Environment variables
//! 3. Configuration file (YAML, usually a mounted ConfigMap)
//!
//! The file wins over the environment, except for the Azure identity
//! fields: the file only fills identity fields the environment left empty.

pub mod duration;

use healthgate_common::{Measurement, ThresholdPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::{LogRotation, LoggingConfig};
use duration::{parse_duration, HumanDuration};

/// Upper bound for the loop period and the abort settings
pub const MAX_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Main configuration struct
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Time between control loop ticks
    #[serde(serialize_with = "duration::serialize")]
    pub poll_interval: Duration,
    pub azure: AzureConfig,
    pub thresholds: ThresholdPolicy,
    pub kubernetes: KubernetesConfig,
    pub abort: AbortConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Managed cluster identity and management API settings
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureConfig {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub cluster_name: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// OAuth2 authority, e.g. `https://login.microsoftonline.com`
    pub authority_host: String,
    /// Resource manager endpoint, e.g. `https://management.azure.com`
    pub management_endpoint: String,
    pub api_version: String,
    #[serde(serialize_with = "duration::serialize")]
    pub request_timeout: Duration,
}

/// Cluster API client settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesConfig {
    /// Explicit kubeconfig; inferred (KUBECONFIG, ~/.kube/config, in-cluster) when unset
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    #[serde(serialize_with = "duration::serialize")]
    pub request_timeout: Duration,
    /// Also measure CPU / memory usage through metrics-server
    pub collect_resource_usage: bool,
}

/// Cancellation request settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbortConfig {
    /// Upper bound on waiting for the cancellation to complete
    #[serde(serialize_with = "duration::serialize")]
    pub timeout: Duration,
    /// Status poll period when the service sends no Retry-After
    #[serde(serialize_with = "duration::serialize")]
    pub poll_interval: Duration,
    /// Send the eTag observed at status-check time as If-Match
    pub conditional: bool,
}

/// Status endpoint settings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub enabled: bool,
    pub bind_address: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            azure: AzureConfig::default(),
            thresholds: ThresholdPolicy::default(),
            kubernetes: KubernetesConfig::default(),
            abort: AbortConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            subscription_id: String::new(),
            resource_group_name: String::new(),
            cluster_name: String::new(),
            tenant_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            authority_host: "https://login.microsoftonline.com".to_string(),
            management_endpoint: "https://management.azure.com".to_string(),
            api_version: "2024-05-01".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("subscription_id", &self.subscription_id)
            .field("resource_group_name", &self.resource_group_name)
            .field("cluster_name", &self.cluster_name)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("authority_host", &self.authority_host)
            .field("management_endpoint", &self.management_endpoint)
            .field("api_version", &self.api_version)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for KubernetesConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            request_timeout: Duration::from_secs(30),
            collect_resource_usage: false,
        }
    }
}

impl Default for AbortConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            poll_interval: Duration::from_secs(10),
            conditional: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "server.bindAddress {:?} is not a socket address: {}",
                self.bind_address, e
            ))
        })
    }
}

impl AzureConfig {
    /// ARM resource id of the managed cluster
    pub fn cluster_resource_id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.ContainerService/managedClusters/{}",
            self.subscription_id, self.resource_group_name, self.cluster_name
        )
    }

    fn identity_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("azure.subscriptionId", &self.subscription_id),
            ("azure.resourceGroupName", &self.resource_group_name),
            ("azure.clusterName", &self.cluster_name),
            ("azure.tenantId", &self.tenant_id),
            ("azure.clientId", &self.client_id),
            ("azure.clientSecret", &self.client_secret),
        ]
    }
}

/// On-disk layout; every field optional so a file may set only what it needs
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileConfig {
    poll_interval: Option<HumanDuration>,
    azure: Option<AzureFile>,
    thresholds: Option<ThresholdPolicy>,
    kubernetes: Option<KubernetesFile>,
    abort: Option<AbortFile>,
    server: Option<ServerFile>,
    logging: Option<LoggingFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureFile {
    subscription_id: Option<String>,
    resource_group_name: Option<String>,
    cluster_name: Option<String>,
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    authority_host: Option<String>,
    management_endpoint: Option<String>,
    api_version: Option<String>,
    request_timeout: Option<HumanDuration>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KubernetesFile {
    kubeconfig: Option<PathBuf>,
    context: Option<String>,
    request_timeout: Option<HumanDuration>,
    collect_resource_usage: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbortFile {
    timeout: Option<HumanDuration>,
    poll_interval: Option<HumanDuration>,
    conditional: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerFile {
    enabled: Option<bool>,
    bind_address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoggingFile {
    level: Option<String>,
    json: Option<bool>,
    directory: Option<PathBuf>,
    rotation: Option<LogRotation>,
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Fill `target` from the file only if the environment left it empty
fn fill_identity(target: &mut String, value: Option<String>) {
    if target.is_empty() {
        set(target, value);
    }
}

/// Environment variable carrying the threshold for a measurement,
/// e.g. `THRESHOLD_CRASHING_PODS_PERCENT`
pub fn threshold_env_var(measurement: Measurement) -> String {
    let mut name = String::from("THRESHOLD_");
    for c in measurement.as_str().chars() {
        if c.is_ascii_uppercase() {
            name.push('_');
        }
        name.push(c.to_ascii_uppercase());
    }
    name
}

impl MonitorConfig {
    /// Load configuration from the process environment and an optional file
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Load configuration using `lookup` for environment variables.
    ///
    /// A missing file is not an error; the result is then built from
    /// defaults and the environment alone.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env(|name| lookup(name).filter(|v| !v.trim().is_empty()))?;

        if let Some(path) = path {
            if let Some(file) = Self::read_file(path)? {
                config.apply_file(file);
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ConfigError::FileRead(path.to_path_buf(), e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(Some(FileConfig::default()));
        }

        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// Apply environment variable overrides
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("POLL_INTERVAL") {
            self.poll_interval = parse_duration(&value)
                .map_err(|e| ConfigError::env("POLL_INTERVAL", e.to_string()))?;
        }

        // Azure identity
        set(&mut self.azure.subscription_id, lookup("AZURE_SUBSCRIPTION_ID"));
        set(&mut self.azure.resource_group_name, lookup("AZURE_RESOURCE_GROUP"));
        set(&mut self.azure.cluster_name, lookup("AZURE_CLUSTER_NAME"));
        set(&mut self.azure.tenant_id, lookup("AZURE_TENANT_ID"));
        set(&mut self.azure.client_id, lookup("AZURE_CLIENT_ID"));
        set(&mut self.azure.client_secret, lookup("AZURE_CLIENT_SECRET"));
        set(&mut self.azure.authority_host, lookup("AZURE_AUTHORITY_HOST"));
        set(&mut self.azure.management_endpoint, lookup("AZURE_MANAGEMENT_ENDPOINT"));

        // Thresholds
        for measurement in Measurement::ALL {
            let name = threshold_env_var(measurement);
            if let Some(value) = lookup(&name) {
                let threshold = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::env(&name, format!("{:?}: {}", value, e)))?;
                self.thresholds.set(measurement, threshold);
            }
        }

        set(&mut self.server.bind_address, lookup("STATUS_BIND_ADDRESS"));
        set(&mut self.logging.level, lookup("LOG_LEVEL"));

        Ok(())
    }

    fn apply_file(&mut self, file: FileConfig) {
        set(&mut self.poll_interval, file.poll_interval.map(|d| d.0));

        if let Some(azure) = file.azure {
            fill_identity(&mut self.azure.subscription_id, azure.subscription_id);
            fill_identity(&mut self.azure.resource_group_name, azure.resource_group_name);
            fill_identity(&mut self.azure.cluster_name, azure.cluster_name);
            fill_identity(&mut self.azure.tenant_id, azure.tenant_id);
            fill_identity(&mut self.azure.client_id, azure.client_id);
            fill_identity(&mut self.azure.client_secret, azure.client_secret);
            set(&mut self.azure.authority_host, azure.authority_host);
            set(&mut self.azure.management_endpoint, azure.management_endpoint);
            set(&mut self.azure.api_version, azure.api_version);
            set(&mut self.azure.request_timeout, azure.request_timeout.map(|d| d.0));
        }

        if let Some(thresholds) = file.thresholds {
            for (measurement, value) in thresholds.iter() {
                self.thresholds.set(measurement, value);
            }
        }

        if let Some(kubernetes) = file.kubernetes {
            if kubernetes.kubeconfig.is_some() {
                self.kubernetes.kubeconfig = kubernetes.kubeconfig;
            }
            if kubernetes.context.is_some() {
                self.kubernetes.context = kubernetes.context;
            }
            set(&mut self.kubernetes.request_timeout, kubernetes.request_timeout.map(|d| d.0));
            set(&mut self.kubernetes.collect_resource_usage, kubernetes.collect_resource_usage);
        }

        if let Some(abort) = file.abort {
            set(&mut self.abort.timeout, abort.timeout.map(|d| d.0));
            set(&mut self.abort.poll_interval, abort.poll_interval.map(|d| d.0));
            set(&mut self.abort.conditional, abort.conditional);
        }

        if let Some(server) = file.server {
            set(&mut self.server.enabled, server.enabled);
            set(&mut self.server.bind_address, server.bind_address);
        }

        if let Some(logging) = file.logging {
            set(&mut self.logging.level, logging.level);
            set(&mut self.logging.json, logging.json);
            if logging.directory.is_some() {
                self.logging.directory = logging.directory;
            }
            set(&mut self.logging.rotation, logging.rotation);
        }
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        serde_yaml::to_string(&Self::default()).unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<&str> = self
            .azure
            .identity_fields()
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Validation(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        if self.poll_interval < Duration::from_secs(1) {
            return Err(ConfigError::Validation(format!(
                "pollInterval must be at least 1s, got {}",
                duration::format_duration(self.poll_interval)
            )));
        }
        check_max("pollInterval", self.poll_interval)?;

        self.thresholds
            .validate()
            .map_err(|e| ConfigError::Validation(format!("thresholds: {}", e)))?;

        if self.abort.timeout.is_zero() {
            return Err(ConfigError::Validation("abort.timeout must be greater than 0".to_string()));
        }
        if self.abort.poll_interval.is_zero() {
            return Err(ConfigError::Validation(
                "abort.pollInterval must be greater than 0".to_string(),
            ));
        }
        check_max("abort.timeout", self.abort.timeout)?;
        check_max("abort.pollInterval", self.abort.poll_interval)?;

        self.server.socket_addr()?;

        Ok(())
    }
}

fn check_max(name: &str, value: Duration) -> Result<(), ConfigError> {
    if value > MAX_DURATION {
        return Err(ConfigError::Validation(format!(
            "{} must be at most {}, got {}s",
            name,
            duration::format_duration(MAX_DURATION),
            value.as_secs()
        )));
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Failed to read configuration file
    FileRead(PathBuf, String),
    /// Failed to parse configuration
    Parse(String),
    /// Environment variable has an unusable value
    InvalidEnv { name: String, reason: String },
    /// Configuration validation failed
    Validation(String),
}

impl ConfigError {
    fn env(name: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidEnv {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileRead(path, err) => {
                write!(f, "Failed to read config file {:?}: {}", path, err)
            }
            ConfigError::Parse(err) => write!(f, "Failed to parse config: {}", err),
            ConfigError::InvalidEnv { name, reason } => {
                write!(f, "Invalid value for {}: {}", name, reason)
            }
            ConfigError::Validation(err) => write!(f, "Config validation failed: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn identity_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("AZURE_SUBSCRIPTION_ID", "sub-env"),
            ("AZURE_RESOURCE_GROUP", "rg-env"),
            ("AZURE_CLUSTER_NAME", "aks-env"),
            ("AZURE_TENANT_ID", "tenant-env"),
            ("AZURE_CLIENT_ID", "client-env"),
            ("AZURE_CLIENT_SECRET", "secret-env"),
        ])
    }

    fn load(
        env: &HashMap<&'static str, &'static str>,
        file: Option<&str>,
    ) -> Result<MonitorConfig, ConfigError> {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        if let Some(content) = file {
            tmp.write_all(content.as_bytes()).unwrap();
        }
        let path = file.map(|_| tmp.path());
        MonitorConfig::load_with(path, |name| env.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.azure.management_endpoint, "https://management.azure.com");
        assert_eq!(config.abort.timeout, Duration::from_secs(600));
        assert!(config.server.enabled);
        assert!(!config.kubernetes.collect_resource_usage);
        assert_eq!(config.thresholds, ThresholdPolicy::default());
    }

    #[test]
    fn test_env_only() {
        let mut env = identity_env();
        env.insert("POLL_INTERVAL", "1m");
        env.insert("THRESHOLD_FAILED_JOBS", "7");
        env.insert("STATUS_BIND_ADDRESS", "127.0.0.1:9090");

        let config = load(&env, None).unwrap();
        assert_eq!(config.azure.cluster_name, "aks-env");
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.thresholds.threshold_for(Measurement::FailedJobs), Some(7));
        assert_eq!(config.server.bind_address, "127.0.0.1:9090");
    }

    #[test]
    fn test_file_overrides_env_except_identity() {
        let mut env = identity_env();
        env.remove("AZURE_CLIENT_SECRET");
        env.insert("POLL_INTERVAL", "10s");

        let config = load(
            &env,
            Some(
                r#"
pollInterval: 45s
azure:
  clusterName: aks-file
  clientSecret: secret-file
thresholds:
  crashingPodsPercent: 5
  failedJobs: 0
monitoredOperations: [Upgrading]
"#,
            ),
        )
        .unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(45));
        assert_eq!(config.azure.cluster_name, "aks-env");
        assert_eq!(config.azure.client_secret, "secret-file");
        assert_eq!(config.thresholds.threshold_for(Measurement::CrashingPodsPercent), Some(5));
        assert_eq!(config.thresholds.threshold_for(Measurement::FailedJobs), Some(0));
        assert_eq!(config.thresholds.threshold_for(Measurement::RestartCount), Some(20));
    }

    #[test]
    fn test_missing_file_uses_env() {
        let env = identity_env();
        let config = MonitorConfig::load_with(Some(Path::new("/nonexistent/config.yaml")), |name| {
            env.get(name).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(config.azure.subscription_id, "sub-env");
    }

    #[test]
    fn test_missing_identity_is_fatal() {
        let mut env = identity_env();
        env.remove("AZURE_TENANT_ID");
        env.insert("AZURE_CLIENT_ID", "   ");

        let err = load(&env, None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("azure.tenantId"), "{}", message);
        assert!(message.contains("azure.clientId"), "{}", message);
    }

    #[test]
    fn test_invalid_env_values() {
        let mut env = identity_env();
        env.insert("POLL_INTERVAL", "often");
        assert!(matches!(
            load(&env, None),
            Err(ConfigError::InvalidEnv { ref name, .. }) if name == "POLL_INTERVAL"
        ));

        let mut env = identity_env();
        env.insert("THRESHOLD_RESTART_COUNT", "-1");
        assert!(matches!(load(&env, None), Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    fn test_validation_bounds() {
        let env = identity_env();

        let err = load(&env, Some("pollInterval: 500ms\n")).unwrap_err();
        assert!(err.to_string().contains("pollInterval"));

        let err = load(&env, Some("thresholds:\n  pendingPodsPercent: 101\n")).unwrap_err();
        assert!(err.to_string().contains("pendingPodsPercent"));

        let err = load(&env, Some("abort:\n  timeout: 0s\n")).unwrap_err();
        assert!(err.to_string().contains("abort.timeout"));

        let err = load(&env, Some("server:\n  bindAddress: not-an-address\n")).unwrap_err();
        assert!(err.to_string().contains("bindAddress"));

        assert!(load(&env, Some("pollInterval: 1s\nthresholds:\n  restartCount: 1000\n")).is_ok());
    }

    #[test]
    fn test_durations_are_capped() {
        let mut env = identity_env();
        env.insert("POLL_INTERVAL", "18446744073709551615");
        let err = load(&env, None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("pollInterval must be at most 24h"), "{}", err);

        let env = identity_env();
        let err = load(&env, Some("abort:\n  timeout: 25h\n")).unwrap_err();
        assert!(err.to_string().contains("abort.timeout"), "{}", err);

        let err = load(&env, Some("abort:\n  pollInterval: 100000\n")).unwrap_err();
        assert!(err.to_string().contains("abort.pollInterval"), "{}", err);

        let config = load(&env, Some("pollInterval: 24h\n")).unwrap();
        assert_eq!(config.poll_interval, MAX_DURATION);
    }

    #[test]
    fn test_unknown_threshold_key_is_parse_error() {
        let env = identity_env();
        let err = load(&env, Some("thresholds:\n  diskPercent: 5\n")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_threshold_env_names() {
        assert_eq!(
            threshold_env_var(Measurement::CrashingPodsPercent),
            "THRESHOLD_CRASHING_PODS_PERCENT"
        );
        assert_eq!(threshold_env_var(Measurement::FailedJobs), "THRESHOLD_FAILED_JOBS");
    }

    #[test]
    fn test_generate_sample_config() {
        let sample = MonitorConfig::generate_sample();
        assert!(sample.contains("pollInterval: 30s"));
        assert!(sample.contains("crashingPodsPercent: 10"));
        assert!(sample.contains("managementEndpoint"));
        assert!(sample.contains("bindAddress"));

        // the sample must be loadable once identity is supplied
        let config = load(&identity_env(), Some(&sample)).unwrap();
        assert_eq!(config.abort.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let mut azure = AzureConfig::default();
        azure.client_secret = "hunter2".to_string();
        let debug = format!("{:?}", azure);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_cluster_resource_id() {
        let config = load(&identity_env(), None).unwrap();
        assert_eq!(
            config.azure.cluster_resource_id(),
            "/subscriptions/sub-env/resourceGroups/rg-env/providers/Microsoft.ContainerService/managedClusters/aks-env"
        );
    }
}
