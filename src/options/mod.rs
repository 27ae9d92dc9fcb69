// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Optional cluster features and their default/validate/complete/apply lifecycle.

pub mod credentials;
pub mod gateway;
pub mod tls;

pub use gateway::GatewayOptions;
pub use tls::TlsOptions;

use crate::error::{KubemqError, Result};
use crate::manifest::ManifestConfig;
use tracing::{debug, info, instrument};

/// One optional deployment feature.
///
/// Every method is a no-op returning success while the feature is disabled.
/// `validate` never touches the filesystem; `complete` does all fallible I/O;
/// `apply` cannot fail and skips resources the aggregate does not contain.
pub trait FeatureOptions {
    fn name(&self) -> &'static str;

    fn is_enabled(&self) -> bool;

    fn validate(&self) -> Result<()>;

    fn complete(&mut self) -> Result<()>;

    fn apply(&self, manifest: &mut ManifestConfig);
}

/// Run the lifecycle for all features in declared order.
///
/// Every feature is validated and completed before the first one is applied,
/// so a failing run leaves `manifest` untouched.
#[instrument(skip_all, fields(cluster = %manifest.name()))]
pub fn run(features: &mut [&mut dyn FeatureOptions], manifest: &mut ManifestConfig) -> Result<()> {
    for feature in features.iter() {
        feature.validate()?;
    }
    for feature in features.iter_mut() {
        feature.complete()?;
    }
    for feature in features.iter() {
        if feature.is_enabled() {
            info!("Applying {} configuration", feature.name());
        } else {
            debug!("Feature {} disabled, skipping", feature.name());
        }
        feature.apply(manifest);
    }
    Ok(())
}

pub(crate) fn validate_port(feature: &str, port: u32) -> Result<()> {
    if port == 0 || port > u32::from(u16::MAX) {
        return Err(KubemqError::Configuration(format!(
            "invalid {} port value: {}",
            feature, port
        )));
    }
    Ok(())
}
