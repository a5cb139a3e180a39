// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::core::ObjectList;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// A Helm chart release managed by k0s
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "helm.k0sproject.io", version = "v1beta1", kind = "Chart")]
#[kube(namespaced)]
#[kube(status = "ChartStatus")]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chart_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub release_name: String,
    /// Raw YAML values passed to the release
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub values: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Namespace the release is installed into
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_hash: Option<String>,
}

/// A collection of charts as returned by a list call
pub type ChartList = ObjectList<Chart>;

impl Chart {
    /// Whether the last reconciliation left an error in the status
    pub fn has_error(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.error.as_deref())
            .is_some_and(|e| !e.is_empty())
    }

    /// Release name as deployed, falling back to the requested one
    pub fn release_name(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.release_name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.spec.release_name)
    }

    /// Whether the requested chart version differs from the deployed one
    pub fn needs_upgrade(&self) -> bool {
        match self.status.as_ref().and_then(|s| s.version.as_deref()) {
            Some(deployed) => deployed != self.spec.version,
            None => true,
        }
    }
}
