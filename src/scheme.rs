// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Caller-owned registry mapping kinds to the API resources that serve them.
//!
//! A [`Scheme`] is passed into the clientset constructor instead of living in
//! process-wide state, so every client (and every test) decides which registry
//! it mutates.

use crate::error::{ChartError, Result};
use kube::core::{ApiResource, GroupVersionKind};
use kube::Resource;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: HashMap<GroupVersionKind, ApiResource>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a statically typed resource.
    ///
    /// Registering the same type again is a no-op.
    pub fn register<K>(&mut self) -> Result<&ApiResource>
    where
        K: Resource<DynamicType = ()>,
    {
        self.register_resource(ApiResource::erase::<K>(&()))
    }

    /// Register an API resource under its group/version/kind.
    ///
    /// Fails if the kind is already served by a different resource.
    pub fn register_resource(&mut self, resource: ApiResource) -> Result<&ApiResource> {
        let gvk = GroupVersionKind::gvk(&resource.group, &resource.version, &resource.kind);

        if let Some(existing) = self.kinds.get(&gvk) {
            if *existing != resource {
                return Err(ChartError::SchemeConflict {
                    gvk,
                    existing: existing.plural.clone(),
                    attempted: resource.plural,
                });
            }
            debug!("{}/{} already registered", resource.api_version, resource.kind);
        } else {
            info!(
                "Registering {}/{} as resource '{}'",
                resource.api_version, resource.kind, resource.plural
            );
        }

        Ok(self.kinds.entry(gvk).or_insert(resource))
    }

    pub fn resolve(&self, gvk: &GroupVersionKind) -> Option<&ApiResource> {
        self.kinds.get(gvk)
    }

    /// Resolve a statically typed resource, failing if it was never registered
    pub fn resolve_kind<K>(&self) -> Result<&ApiResource>
    where
        K: Resource<DynamicType = ()>,
    {
        let gvk = GroupVersionKind::gvk(&K::group(&()), &K::version(&()), &K::kind(&()));
        self.kinds
            .get(&gvk)
            .ok_or(ChartError::UnregisteredKind(gvk))
    }

    pub fn is_registered<K>(&self) -> bool
    where
        K: Resource<DynamicType = ()>,
    {
        self.resolve_kind::<K>().is_ok()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
