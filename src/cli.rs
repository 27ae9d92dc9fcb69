// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line surface

use crate::config::Config;
use crate::error::Result;
use crate::manifest::{ClusterOptions, ManifestConfig, Manifests};
use crate::operator::Operator;
use crate::options::{self, FeatureOptions, GatewayOptions, TlsOptions};
use clap::{Args, Parser, Subcommand};
use tracing::{info, instrument};

#[derive(Parser, Debug)]
#[command(name = "kubemqctl", version, about = "Generate and deploy KubeMQ cluster manifests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage KubeMQ clusters
    #[command(subcommand)]
    Cluster(ClusterCommand),
    /// Print the KubemqCluster CustomResourceDefinition
    Crd,
}

#[derive(Subcommand, Debug)]
pub enum ClusterCommand {
    /// Render a cluster and print or apply its manifests
    Create(CreateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Cluster name, also the name of its Secret, ConfigMap and Deployment
    #[arg(long, default_value = "kubemq-cluster")]
    pub name: String,

    /// Target namespace [default: $KUBEMQCTL_NAMESPACE or kubemq]
    #[arg(long)]
    pub namespace: Option<String>,

    /// Broker replicas [default: $KUBEMQCTL_REPLICAS or 3]
    #[arg(long)]
    pub replicas: Option<u32>,

    /// Broker image [default: built from $KUBEMQCTL_REGISTRY/REPOSITORY/TAG]
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long, default_value = "Always")]
    pub image_pull_policy: String,

    /// Also render the operator Deployment
    #[arg(long)]
    pub with_operator: bool,

    /// Apply to the current kube context instead of printing
    #[arg(long)]
    pub apply: bool,

    #[command(flatten)]
    pub gateway: GatewayOptions,

    #[command(flatten)]
    pub tls: TlsOptions,
}

impl CreateArgs {
    pub fn namespace(&self, config: &Config) -> String {
        self.namespace
            .clone()
            .unwrap_or_else(|| config.default_namespace.clone())
    }

    fn cluster_options(&self, config: &Config) -> ClusterOptions {
        ClusterOptions {
            replicas: self.replicas.unwrap_or(config.replicas),
            image: self.image.clone().unwrap_or_else(|| config.broker_image()),
            image_pull_policy: self.image_pull_policy.clone(),
        }
    }
}

/// Build, configure and render every object for one cluster.
///
/// Nothing is returned unless every feature validated, completed and rendered.
#[instrument(skip_all, fields(cluster = %args.name))]
pub fn create_manifests(args: &mut CreateArgs, config: &Config) -> Result<Manifests> {
    let id = uuid::Uuid::new_v4().to_string();
    let namespace = args.namespace(config);
    let mut manifest =
        ManifestConfig::for_cluster(&id, &args.name, &namespace, &args.cluster_options(config));

    let mut features: [&mut dyn FeatureOptions; 2] = [&mut args.gateway, &mut args.tls];
    options::run(&mut features, &mut manifest)?;

    let mut manifests = manifest.render()?;
    if args.with_operator {
        let operator = Operator::new("kubemq-operator", &namespace, config);
        manifests.deployments.push(operator.get()?.clone());
    }

    info!(
        "Rendered {} objects for cluster {}/{}",
        manifests.len(),
        namespace,
        args.name
    );
    Ok(manifests)
}
