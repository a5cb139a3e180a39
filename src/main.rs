// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use futures::{pin_mut, TryStreamExt};
use kube::api::ListParams;
use kube::core::WatchEvent;
use kube::ResourceExt;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use chart_clientset::clientset::ChartV1Beta1Client;
use chart_clientset::config::Config;
use chart_clientset::scheme::Scheme;
use chart_clientset::types::Chart;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting chart watcher");

    let config = Config::from_env()?;
    info!("Configuration loaded: namespace={}", config.namespace);

    let mut scheme = Scheme::new();
    let clientset =
        ChartV1Beta1Client::new_for_config(config.kubeconfig_path.as_deref(), &mut scheme).await?;
    let charts = clientset.charts(&config.namespace);

    let list = charts.list(&ListParams::default()).await?;
    info!("Found {} charts in {}", list.items.len(), config.namespace);
    for chart in &list.items {
        log_chart("Existing", chart);
    }

    // Resume from the list so no change between list and watch is missed
    let resource_version = list.metadata.resource_version.clone().unwrap_or_default();
    let events = charts.watch(&config.watch_params(), &resource_version).await?;
    pin_mut!(events);

    while let Some(event) = events.try_next().await? {
        match event {
            WatchEvent::Added(chart) => log_chart("Added", &chart),
            WatchEvent::Modified(chart) => log_chart("Modified", &chart),
            WatchEvent::Deleted(chart) => log_chart("Deleted", &chart),
            WatchEvent::Bookmark(bookmark) => {
                debug!("Bookmark at resource version {}", bookmark.metadata.resource_version)
            }
            WatchEvent::Error(err) => {
                warn!("Watch error from server: {} ({})", err.message, err.code);
                break;
            }
        }
    }

    warn!("Watch stream ended");
    Ok(())
}

fn log_chart(event: &str, chart: &Chart) {
    let status = chart
        .status
        .as_ref()
        .and_then(|s| s.status.as_deref())
        .unwrap_or("unknown");

    if chart.has_error() {
        warn!(
            "{} chart {}: {} {} has error: {}",
            event,
            chart.name_any(),
            chart.spec.chart_name,
            chart.spec.version,
            chart
                .status
                .as_ref()
                .and_then(|s| s.error.as_deref())
                .unwrap_or_default()
        );
    } else {
        info!(
            "{} chart {}: {} {} (release {}, status {})",
            event,
            chart.name_any(),
            chart.spec.chart_name,
            chart.spec.version,
            chart.release_name(),
            status
        );
    }
}
