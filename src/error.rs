// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

use crate::options::credentials::Artifact;

#[derive(Error, Debug)]
pub enum KubemqError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to load {feature} {artifact} from {}: {source}", .path.display())]
    Io {
        feature: &'static str,
        artifact: Artifact,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render {name} template: {source}")]
    Template {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to decode rendered {name} manifest: {source}")]
    Decode {
        name: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to apply namespace {0}")]
    NamespaceError(String),
}

impl KubemqError {
    /// True for errors caused by user supplied options rather than template defects
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, KubemqError>;
