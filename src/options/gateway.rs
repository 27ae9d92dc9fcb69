// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Gateway replication between broker clusters

use super::credentials::{self, Artifact};
use super::{validate_port, FeatureOptions};
use crate::constants::{ports, vars};
use crate::error::{KubemqError, Result};
use crate::manifest::ManifestConfig;
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, instrument};

const FEATURE: &str = "gateway";
const PORT_NAME: &str = "gateway-port";

#[derive(Args, Debug, Clone, PartialEq)]
pub struct GatewayOptions {
    /// Enable gateway configuration
    #[arg(id = "gateway-enabled", long = "gateway-enabled")]
    pub enabled: bool,

    /// Remote gateway address, repeat for every remote
    #[arg(id = "gateway-remotes", long = "gateway-remotes", value_name = "HOST:PORT")]
    pub remotes: Vec<String>,

    /// Gateway listen port
    #[arg(id = "gateway-port", long = "gateway-port", default_value_t = ports::GATEWAY)]
    pub port: u32,

    /// TLS certificate data for remote gateway
    #[arg(id = "gateway-cert-data", long = "gateway-cert-data", default_value_t)]
    pub cert_data: String,

    /// TLS certificate filename for remote gateway
    #[arg(id = "gateway-cert-file", long = "gateway-cert-file")]
    pub cert_file: Option<PathBuf>,

    /// TLS key data for remote gateway
    #[arg(id = "gateway-key-data", long = "gateway-key-data", default_value_t)]
    pub key_data: String,

    /// TLS key filename for remote gateway
    #[arg(id = "gateway-key-file", long = "gateway-key-file")]
    pub key_file: Option<PathBuf>,

    /// TLS CA certificate data for remote gateway
    #[arg(id = "gateway-ca-data", long = "gateway-ca-data", default_value_t)]
    pub ca_data: String,

    /// TLS CA certificate filename for remote gateway
    #[arg(id = "gateway-ca-file", long = "gateway-ca-file")]
    pub ca_file: Option<PathBuf>,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            remotes: Vec::new(),
            port: ports::GATEWAY,
            cert_data: String::new(),
            cert_file: None,
            key_data: String::new(),
            key_file: None,
            ca_data: String::new(),
            ca_file: None,
        }
    }
}

impl FeatureOptions for GatewayOptions {
    fn name(&self) -> &'static str {
        FEATURE
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.remotes.is_empty() {
            return Err(KubemqError::Configuration(
                "error setting gateway configuration, missing remotes gateway data".to_string(),
            ));
        }
        validate_port(FEATURE, self.port)
    }

    #[instrument(skip(self), fields(feature = FEATURE))]
    fn complete(&mut self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        credentials::resolve(
            FEATURE,
            Artifact::Certificate,
            &mut self.cert_data,
            self.cert_file.as_deref(),
        )?;
        credentials::resolve(
            FEATURE,
            Artifact::Key,
            &mut self.key_data,
            self.key_file.as_deref(),
        )?;
        credentials::resolve(FEATURE, Artifact::Ca, &mut self.ca_data, self.ca_file.as_deref())
    }

    fn apply(&self, manifest: &mut ManifestConfig) {
        if !self.enabled {
            return;
        }
        if let Some(secret) = manifest.cluster_secret_mut() {
            secret
                .set_data_variable(vars::GATEWAY_CERT, &self.cert_data)
                .set_data_variable(vars::GATEWAY_KEY, &self.key_data)
                .set_data_variable(vars::GATEWAY_CA, &self.ca_data);
        }
        if let Some(config_map) = manifest.cluster_config_map_mut() {
            config_map
                .set_string_variable(vars::GATEWAYS, &self.remotes.join(","))
                .set_string_variable(vars::GATEWAY_PORT, &self.port.to_string());
        }
        if let Some(deployment) = manifest.cluster_deployment_mut() {
            deployment.set_container_port(PORT_NAME, self.port);
        }

        if !manifest.has_identity() {
            debug!("Manifest has no cluster identity, skipping gateway service");
            return;
        }
        let service_name = format!("{}-{}", manifest.name(), FEATURE);
        let service = manifest
            .new_service_config(&service_name)
            .set_container_port(self.port)
            .set_target_port(self.port)
            .set_port_name(PORT_NAME);
        manifest.services.insert(service_name, service);
    }
}
