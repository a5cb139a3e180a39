// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod clientset;
pub mod config;
pub mod constants;
pub mod error;
pub mod request;
pub mod scheme;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use clientset::{ChartClient, ChartV1Beta1Client};
pub use error::{ChartError, Result};
pub use scheme::Scheme;
pub use types::{Chart, ChartList, ChartSpec, ChartStatus};
