// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::env as keys;
use anyhow::{Context, Result};
use kube::api::WatchParams;
use std::env;
use std::path::PathBuf;

/// Watcher configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace whose charts are listed and watched
    pub namespace: String,
    /// Explicit kubeconfig file; inferred from the environment when unset
    pub kubeconfig_path: Option<PathBuf>,
    /// Ask for bookmark events; off unless set, unlike kube's own default
    pub watch_bookmarks: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let namespace = env::var(keys::NAMESPACE)
            .with_context(|| format!("{} environment variable not set", keys::NAMESPACE))?;

        Self::from_parts(
            namespace,
            env::var(keys::KUBECONFIG_PATH).ok(),
            env::var(keys::WATCH_BOOKMARKS).ok(),
        )
    }

    /// Watch parameters for the configured bookmark setting
    pub fn watch_params(&self) -> WatchParams {
        WatchParams {
            bookmarks: self.watch_bookmarks,
            ..Default::default()
        }
    }

    fn from_parts(
        namespace: String,
        kubeconfig_path: Option<String>,
        watch_bookmarks: Option<String>,
    ) -> Result<Self> {
        if namespace.is_empty() {
            anyhow::bail!("{} must not be empty", keys::NAMESPACE);
        }

        let kubeconfig_path = kubeconfig_path
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let watch_bookmarks = match watch_bookmarks {
            Some(v) => v
                .parse()
                .with_context(|| format!("{} must be 'true' or 'false', got '{}'", keys::WATCH_BOOKMARKS, v))?,
            None => false,
        };

        Ok(Config {
            namespace,
            kubeconfig_path,
            watch_bookmarks,
        })
    }
}
