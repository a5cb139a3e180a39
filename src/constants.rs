// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Request path pieces not carried by the resource type itself
pub mod api {
    /// Prefix for all named API groups
    pub const API_PATH: &str = "/apis";
    pub const STATUS_SUBRESOURCE: &str = "status";
}

/// User agent sent with every request built by the clientset
pub const USER_AGENT: &str = concat!("chart-clientset/", env!("CARGO_PKG_VERSION"));

/// Environment variables read by [`crate::config::Config`]
pub mod env {
    pub const NAMESPACE: &str = "CHART_NAMESPACE";
    pub const KUBECONFIG_PATH: &str = "KUBECONFIG_PATH";
    pub const WATCH_BOOKMARKS: &str = "CHART_WATCH_BOOKMARKS";
}
