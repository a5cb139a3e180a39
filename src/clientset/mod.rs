// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed clientset for the helm.k0sproject.io/v1beta1 API group.

pub mod charts;

pub use charts::ChartClient;

use crate::constants::USER_AGENT;
use crate::error::{ChartError, Result};
use crate::request::ResourcePath;
use crate::scheme::Scheme;
use crate::types::Chart;
use http::header::{self, HeaderValue};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::core::ApiResource;
use kube::{Client, Config as KConfig};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Client for the chart API group, shareable across tasks
#[derive(Clone)]
pub struct ChartV1Beta1Client {
    client: Client,
    resource: ApiResource,
}

impl ChartV1Beta1Client {
    /// Build a client from a kubeconfig file, or from the inferred
    /// environment (KUBECONFIG, ~/.kube/config, in-cluster) when no path is given.
    #[instrument(skip(scheme))]
    pub async fn new_for_config(path: Option<&Path>, scheme: &mut Scheme) -> Result<Self> {
        let config = load_config(path).await?;
        Self::new(config, scheme)
    }

    /// Build a client from an existing connection config.
    ///
    /// Registers [`Chart`] in `scheme` and sets the clientset user agent.
    pub fn new(config: KConfig, scheme: &mut Scheme) -> Result<Self> {
        let resource = scheme.register::<Chart>()?.clone();

        let crd_config = with_user_agent(config, USER_AGENT)?;

        info!(
            "Creating {} client for {}",
            resource.api_version, crd_config.cluster_url
        );
        let client = Client::try_from(crd_config)?;

        Ok(Self { client, resource })
    }

    /// Wrap an already built client
    pub fn from_client(client: Client, scheme: &mut Scheme) -> Result<Self> {
        let resource = scheme.register::<Chart>()?.clone();
        Ok(Self { client, resource })
    }

    /// Accessor for the charts in `namespace`; an empty namespace addresses all namespaces
    pub fn charts(&self, namespace: &str) -> ChartClient {
        ChartClient::new(
            self.client.clone(),
            ResourcePath::namespaced(&self.resource, namespace),
        )
    }
}

/// Replace any user agent header in `config` with `user_agent`
fn with_user_agent(mut config: KConfig, user_agent: &str) -> Result<KConfig> {
    let value = HeaderValue::from_str(user_agent)?;
    config.headers.retain(|(name, _)| *name != header::USER_AGENT);
    config.headers.push((header::USER_AGENT, value));
    Ok(config)
}

/// Load connection config from a kubeconfig file or the environment
pub async fn load_config(path: Option<&Path>) -> Result<KConfig> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        debug!("No kubeconfig path given, inferring config");
        return KConfig::infer()
            .await
            .map_err(|e| ChartError::KubeconfigError(format!("Failed to infer config: {}", e)));
    };

    debug!("Loading kubeconfig from {}", path.display());
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        ChartError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let kubeconfig: Kubeconfig = serde_yaml::from_str(&contents)
        .map_err(|e| ChartError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    KConfig::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| ChartError::KubeconfigError(format!("Failed to create config: {}", e)))
}
