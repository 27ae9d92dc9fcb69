// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! TLS for the broker client endpoints

use super::credentials::{self, Artifact};
use super::FeatureOptions;
use crate::constants::vars;
use crate::error::{KubemqError, Result};
use crate::manifest::ManifestConfig;
use clap::Args;
use std::path::PathBuf;
use tracing::instrument;

const FEATURE: &str = "tls";

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct TlsOptions {
    /// Enable TLS on the broker endpoints
    #[arg(id = "tls-enabled", long = "tls-enabled")]
    pub enabled: bool,

    /// TLS server certificate data
    #[arg(id = "tls-cert-data", long = "tls-cert-data", default_value_t)]
    pub cert_data: String,

    /// TLS server certificate filename
    #[arg(id = "tls-cert-file", long = "tls-cert-file")]
    pub cert_file: Option<PathBuf>,

    /// TLS server key data
    #[arg(id = "tls-key-data", long = "tls-key-data", default_value_t)]
    pub key_data: String,

    /// TLS server key filename
    #[arg(id = "tls-key-file", long = "tls-key-file")]
    pub key_file: Option<PathBuf>,

    /// TLS CA certificate data, enables client certificate checks
    #[arg(id = "tls-ca-data", long = "tls-ca-data", default_value_t)]
    pub ca_data: String,

    /// TLS CA certificate filename
    #[arg(id = "tls-ca-file", long = "tls-ca-file")]
    pub ca_file: Option<PathBuf>,
}

impl FeatureOptions for TlsOptions {
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
        if !credentials::is_supplied(&self.cert_data, self.cert_file.as_deref()) {
            return Err(KubemqError::Configuration(
                "error setting tls configuration, missing certificate data or file".to_string(),
            ));
        }
        if !credentials::is_supplied(&self.key_data, self.key_file.as_deref()) {
            return Err(KubemqError::Configuration(
                "error setting tls configuration, missing key data or file".to_string(),
            ));
        }
        Ok(())
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
                .set_data_variable(vars::TLS_CERT, &self.cert_data)
                .set_data_variable(vars::TLS_KEY, &self.key_data);
            if !self.ca_data.is_empty() {
                secret.set_data_variable(vars::TLS_CA, &self.ca_data);
            }
        }
        if let Some(config_map) = manifest.cluster_config_map_mut() {
            config_map.set_string_variable(vars::TLS_ENABLED, "true");
        }
    }
}
