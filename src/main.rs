// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use kube::{Client, CustomResourceExt};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kubemqctl::cli::{create_manifests, Cli, ClusterCommand, Command};
use kubemqctl::config::Config;
use kubemqctl::crd::KubemqCluster;
use kubemqctl::error::KubemqError;
use kubemqctl::kubernetes::apply_manifests;

/// Exit status for rejected options, as opposed to runtime failures
const USAGE_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Manifests go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Cluster(ClusterCommand::Create(mut args)) => {
            let namespace = args.namespace(&config);
            let manifests = match create_manifests(&mut args, &config) {
                Ok(manifests) => manifests,
                Err(err) if err.is_user_error() => return Ok(usage_error(&err)),
                Err(err) => return Err(err.into()),
            };

            if args.apply {
                let client = Client::try_default().await?;
                info!("Connected to Kubernetes cluster");
                apply_manifests(&client, &namespace, &manifests).await?;
            } else {
                print!("{}", manifests.to_yaml()?);
            }
        }
        Command::Crd => {
            print!("{}", serde_yaml::to_string(&KubemqCluster::crd())?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn usage_error(err: &KubemqError) -> ExitCode {
    error!("{}", err);
    ExitCode::from(USAGE_ERROR)
}
