// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespaced accessor for Chart resources.

use crate::error::{ChartError, Result};
use crate::request::{ChartOperation, ResourcePath};
use crate::types::{Chart, ChartList};
use futures::{Stream, StreamExt};
use kube::api::{DeleteParams, GetParams, ListParams, PostParams, WatchParams};
use kube::core::WatchEvent;
use kube::{Client, ResourceExt};
use tracing::{debug, instrument};

/// Typed access to the charts of one namespace.
///
/// Every call is a single request; errors from the API server are returned
/// as [`ChartError::KubeError`] without retries.
#[derive(Clone)]
pub struct ChartClient {
    client: Client,
    path: ResourcePath,
}

impl ChartClient {
    pub(crate) fn new(client: Client, path: ResourcePath) -> Self {
        Self { client, path }
    }

    /// The namespace this accessor is bound to, `None` for all namespaces
    pub fn namespace(&self) -> Option<&str> {
        self.path.namespace()
    }

    fn prepare(&self, operation: &ChartOperation<'_>) -> Result<http::Request<Vec<u8>>> {
        let mut request = operation.to_request(&self.path)?;
        debug!(
            "{} {} ({})",
            request.method(),
            request.uri(),
            operation.verb()
        );
        request.extensions_mut().insert(operation.verb());
        Ok(request)
    }

    /// Get a chart by name
    #[instrument(skip(self, params), fields(namespace = self.namespace().unwrap_or_default()))]
    pub async fn get(&self, name: &str, params: &GetParams) -> Result<Chart> {
        let request = self.prepare(&ChartOperation::Get { name, params })?;
        Ok(self.client.request::<Chart>(request).await?)
    }

    /// List the charts in the namespace
    #[instrument(skip(self, params), fields(namespace = self.namespace().unwrap_or_default()))]
    pub async fn list(&self, params: &ListParams) -> Result<ChartList> {
        let request = self.prepare(&ChartOperation::List { params })?;
        Ok(self.client.request::<ChartList>(request).await?)
    }

    /// Watch charts for changes, starting after `resource_version`.
    ///
    /// The request is always sent as a watch. The returned stream yields
    /// events until the server closes the connection; dropping it ends the
    /// watch.
    #[instrument(skip(self, params), fields(namespace = self.namespace().unwrap_or_default()))]
    pub async fn watch(
        &self,
        params: &WatchParams,
        resource_version: &str,
    ) -> Result<impl Stream<Item = Result<WatchEvent<Chart>>>> {
        let request = self.prepare(&ChartOperation::Watch {
            params,
            resource_version,
        })?;
        let events = self.client.request_events::<Chart>(request).await?;
        Ok(events.map(|event: std::result::Result<WatchEvent<Chart>, kube::Error>| {
            event.map_err(ChartError::from)
        }))
    }

    /// Create a chart, returning the object as stored by the server
    #[instrument(skip(self, chart, params), fields(namespace = self.namespace().unwrap_or_default(), chart = %chart.name_any()))]
    pub async fn create(&self, chart: &Chart, params: &PostParams) -> Result<Chart> {
        let request = self.prepare(&ChartOperation::Create { chart, params })?;
        Ok(self.client.request::<Chart>(request).await?)
    }

    /// Delete a chart by name
    #[instrument(skip(self, params), fields(namespace = self.namespace().unwrap_or_default()))]
    pub async fn delete(&self, name: &str, params: &DeleteParams) -> Result<()> {
        let request = self.prepare(&ChartOperation::Delete { name, params })?;
        // The server answers with either the object or a Status; both mean success
        self.client.request_text(request).await?;
        Ok(())
    }

    /// Replace the status subresource of a chart.
    ///
    /// The chart is addressed by its own `metadata.name`.
    #[instrument(skip(self, chart, params), fields(namespace = self.namespace().unwrap_or_default(), chart = %chart.name_any()))]
    pub async fn update_status(&self, chart: &Chart, params: &PostParams) -> Result<Chart> {
        let request = self.prepare(&ChartOperation::UpdateStatus { chart, params })?;
        Ok(self.client.request::<Chart>(request).await?)
    }
}
