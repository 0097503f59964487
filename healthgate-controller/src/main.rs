use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use healthgate_controller::azure::AksClient;
use healthgate_controller::kubernetes::{K8sClient, WorkloadSnapshotSource};
use healthgate_controller::{server, Controller, MonitorConfig, ShutdownCoordinator, TaskShutdown};

/// Cancels in-flight AKS operations when cluster health degrades
#[derive(Parser, Debug)]
#[command(name = "healthgate-controller", version, about)]
struct Args {
    /// Configuration file (YAML); skipped when absent
    #[arg(short, long, env = "HEALTHGATE_CONFIG", default_value = "/etc/config/config.yaml")]
    config: PathBuf,

    /// Kubeconfig to use instead of inference
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context
    #[arg(long)]
    context: Option<String>,

    /// Load and validate the configuration, then exit
    #[arg(long)]
    check_config: bool,

    /// Print the default configuration as YAML and exit
    #[arg(long)]
    print_sample_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_sample_config {
        print!("{}", MonitorConfig::generate_sample());
        return Ok(());
    }

    let config_file_present = args.config.exists();
    let mut config = MonitorConfig::load(Some(&args.config))
        .with_context(|| format!("Invalid configuration (file: {})", args.config.display()))?;
    if args.kubeconfig.is_some() {
        config.kubernetes.kubeconfig = args.kubeconfig;
    }
    if args.context.is_some() {
        config.kubernetes.context = args.context;
    }

    if args.check_config {
        println!("Configuration OK");
        println!("{:#?}", config);
        return Ok(());
    }

    let _log_guard = config.logging.init()?;

    if config_file_present {
        info!("Configuration loaded from {}", args.config.display());
    } else {
        warn!(
            "Configuration file {} not found, using defaults and environment",
            args.config.display()
        );
    }
    info!(
        cluster = %config.azure.cluster_name,
        resource_group = %config.azure.resource_group_name,
        subscription = %config.azure.subscription_id,
        "Monitoring managed cluster"
    );
    if !config.abort.conditional {
        info!("Conditional abort disabled: an operation started between status check and abort may be cancelled");
    }

    let k8s = K8sClient::from_settings(&config.kubernetes)
        .await
        .context("Failed to create Kubernetes client")?;
    match k8s.get_version().await {
        Ok(version) => info!(api_server = %k8s.api_server(), version = %version, "Connected to Kubernetes"),
        Err(e) => warn!(api_server = %k8s.api_server(), error = %e, "Kubernetes API not reachable yet"),
    }

    let aks = Arc::new(
        AksClient::new(&config.azure, &config.abort).context("Failed to create Azure client")?,
    );
    let snapshots = Arc::new(WorkloadSnapshotSource::new(
        k8s,
        config.kubernetes.collect_resource_usage,
    ));

    let controller = Controller::new(
        aks.clone(),
        snapshots,
        aks,
        config.thresholds.clone(),
        config.poll_interval,
    );

    let coordinator = ShutdownCoordinator::new();
    let mut tasks = TaskShutdown::new();

    let signals = coordinator.clone();
    tasks.register(
        "signal_handler",
        tokio::spawn(async move {
            if let Err(e) = signals.wait_for_signal().await {
                error!("Failed to install signal handlers: {}", e);
                signals.shutdown();
            }
        }),
    );

    if config.server.enabled {
        let addr = config.server.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind status server to {}", addr))?;
        let status = controller.status();
        let shutdown = coordinator.signal();
        tasks.register(
            "status_server",
            tokio::spawn(async move {
                if let Err(e) = server::serve(listener, status, shutdown).await {
                    error!("Status server failed: {}", e);
                }
            }),
        );
    }

    controller.run(coordinator.signal()).await;

    tasks.join_all(coordinator.timeout()).await;
    info!("Shutdown complete");

    Ok(())
}
