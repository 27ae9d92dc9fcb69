// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;

/// Tool configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Namespace used when `--namespace` is not given
    pub default_namespace: String,
    pub registry: String,
    pub repository: String,
    pub tag: String,
    pub operator_image: String,
    /// Broker replicas used when `--replicas` is not given
    pub replicas: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_namespace: "kubemq".to_string(),
            registry: "docker.io".to_string(),
            repository: "kubemq/kubemq".to_string(),
            tag: "latest".to_string(),
            operator_image: "docker.io/kubemq/kubemq-operator:latest".to_string(),
            replicas: 3,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let replicas = match lookup("KUBEMQCTL_REPLICAS") {
            Some(value) => value
                .parse()
                .with_context(|| format!("KUBEMQCTL_REPLICAS is not a number: {}", value))?,
            None => defaults.replicas,
        };

        Ok(Config {
            default_namespace: lookup("KUBEMQCTL_NAMESPACE").unwrap_or(defaults.default_namespace),
            registry: lookup("KUBEMQCTL_REGISTRY").unwrap_or(defaults.registry),
            repository: lookup("KUBEMQCTL_REPOSITORY").unwrap_or(defaults.repository),
            tag: lookup("KUBEMQCTL_TAG").unwrap_or(defaults.tag),
            operator_image: lookup("KUBEMQCTL_OPERATOR_IMAGE").unwrap_or(defaults.operator_image),
            replicas,
        })
    }

    /// Fully qualified broker image
    pub fn broker_image(&self) -> String {
        format!("{}/{}:{}", self.registry, self.repository, self.tag)
    }
}
