// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::core::GroupVersionKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Errors reported by the API server or the transport, unchanged
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Scheme already maps {gvk:?} to resource '{existing}', refusing to register '{attempted}'")]
    SchemeConflict {
        gvk: GroupVersionKind,
        existing: String,
        attempted: String,
    },

    #[error("Kind {0:?} is not registered in the scheme")]
    UnregisteredKind(GroupVersionKind),

    /// Parameters rejected by kube's request builder, nothing was sent
    #[error("Failed to build request: {0}")]
    BuildRequest(#[from] kube::core::request::Error),

    #[error("Invalid chart name: {0}")]
    InvalidName(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error("Failed to serialize request body: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Chart has no metadata.name, cannot address its status subresource")]
    MissingName,
}

impl ChartError {
    /// HTTP status code of the API error, if the server answered with one
    pub fn api_code(&self) -> Option<u16> {
        match self {
            ChartError::KubeError(kube::Error::Api(resp)) => Some(resp.code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api_code() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.api_code() == Some(409)
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
