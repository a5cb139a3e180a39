// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Request descriptors for chart operations.
//!
//! Every accessor call is first described as a [`ChartOperation`] and then
//! rendered through [`kube::core::Request`] into an `http::Request` for the
//! transport. Parameter validation and query encoding are kube's.

use crate::constants::api;
use crate::error::{ChartError, Result};
use crate::types::Chart;
use kube::api::{DeleteParams, GetParams, ListParams, PostParams, WatchParams};
use kube::core::{ApiResource, Request};

/// Location of a resource collection on the API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    api_path: String,
    group: String,
    version: String,
    namespace: Option<String>,
    resource: String,
}

impl ResourcePath {
    /// Collection path for `resource` in `namespace`; an empty namespace addresses all namespaces
    pub fn namespaced(resource: &ApiResource, namespace: &str) -> Self {
        Self {
            api_path: api::API_PATH.to_string(),
            group: resource.group.clone(),
            version: resource.version.clone(),
            namespace: Some(namespace.to_string()).filter(|ns| !ns.is_empty()),
            resource: resource.plural.clone(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn collection(&self) -> String {
        let mut path = format!("{}/{}/{}", self.api_path, self.group, self.version);
        if let Some(ns) = &self.namespace {
            path.push_str("/namespaces/");
            path.push_str(ns);
        }
        path.push('/');
        path.push_str(&self.resource);
        path
    }
}

/// The closed set of operations the chart accessor performs
#[derive(Debug, Clone)]
pub enum ChartOperation<'a> {
    Get {
        name: &'a str,
        params: &'a GetParams,
    },
    List {
        params: &'a ListParams,
    },
    Watch {
        params: &'a WatchParams,
        resource_version: &'a str,
    },
    Create {
        chart: &'a Chart,
        params: &'a PostParams,
    },
    Delete {
        name: &'a str,
        params: &'a DeleteParams,
    },
    /// Replace the status subresource of the chart named in its own metadata
    UpdateStatus {
        chart: &'a Chart,
        params: &'a PostParams,
    },
}

impl ChartOperation<'_> {
    pub fn verb(&self) -> &'static str {
        match self {
            ChartOperation::Get { .. } => "get",
            ChartOperation::List { .. } => "list",
            ChartOperation::Watch { .. } => "watch",
            ChartOperation::Create { .. } => "create",
            ChartOperation::Delete { .. } => "delete",
            ChartOperation::UpdateStatus { .. } => "update_status",
        }
    }

    /// Render this operation against `path`.
    ///
    /// Names are checked before anything is built, so a bad name never
    /// reaches the server.
    pub fn to_request(&self, path: &ResourcePath) -> Result<http::Request<Vec<u8>>> {
        let request = Request::new(path.collection());
        let rendered = match self {
            ChartOperation::Get { name, params } => request.get(validate_name(name)?, params),
            ChartOperation::List { params } => request.list(params),
            // kube always writes watch=true, WatchParams has no way to turn it off
            ChartOperation::Watch {
                params,
                resource_version,
            } => request.watch(params, resource_version),
            ChartOperation::Create { chart, params } => {
                request.create(params, serde_json::to_vec(chart)?)
            }
            ChartOperation::Delete { name, params } => request.delete(validate_name(name)?, params),
            ChartOperation::UpdateStatus { chart, params } => {
                let name = chart
                    .metadata
                    .name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .ok_or(ChartError::MissingName)?;
                request.replace_subresource(
                    api::STATUS_SUBRESOURCE,
                    validate_name(name)?,
                    params,
                    serde_json::to_vec(chart)?,
                )
            }
        };
        Ok(rendered?)
    }
}

/// Reject names that would address something other than a single chart
fn validate_name(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(ChartError::InvalidName("name must not be empty".to_string()));
    }
    if name == "." || name == ".." {
        return Err(ChartError::InvalidName(format!("'{}' is not a valid name", name)));
    }
    if let Some(c) = name.chars().find(|c| matches!(c, '/' | '%')) {
        return Err(ChartError::InvalidName(format!(
            "'{}' may not contain '{}'",
            name, c
        )));
    }
    Ok(name)
}
