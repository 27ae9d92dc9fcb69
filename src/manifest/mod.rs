// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The manifest configuration aggregate and its resource descriptors.
//!
//! Resources are keyed by their logical name (`<cluster>` or
//! `<cluster>-<feature>`). Feature options extend resources by looking them
//! up under that name and skip silently when they are absent.

pub mod config_map;
pub mod deployment;
pub mod secret;
pub mod service;
pub mod variables;

pub use config_map::ConfigMapConfig;
pub use deployment::{ContainerPort, DeploymentConfig};
pub use secret::SecretConfig;
pub use service::ServiceConfig;
pub use variables::DataVariables;

use crate::constants::{ports, vars};
use crate::error::Result;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Core cluster settings applied by [`ManifestConfig::for_cluster`]
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOptions {
    pub replicas: u32,
    pub image: String,
    pub image_pull_policy: String,
}

/// All resource definitions collected for one manifest generation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestConfig {
    id: String,
    name: String,
    namespace: String,
    pub secrets: BTreeMap<String, SecretConfig>,
    pub config_maps: BTreeMap<String, ConfigMapConfig>,
    pub services: BTreeMap<String, ServiceConfig>,
    pub deployments: BTreeMap<String, DeploymentConfig>,
}

impl ManifestConfig {
    /// Create an empty aggregate for a cluster identity
    pub fn new(id: &str, name: &str, namespace: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    /// Create the aggregate with the core cluster resources in place
    #[instrument(skip(options))]
    pub fn for_cluster(id: &str, name: &str, namespace: &str, options: &ClusterOptions) -> Self {
        let mut manifest = Self::new(id, name, namespace);

        let secret = manifest.new_secret_config(name);
        manifest.secrets.insert(name.to_string(), secret);

        let mut config_map = manifest.new_config_map_config(name);
        config_map
            .set_string_variable(vars::GRPC_PORT, &ports::GRPC.to_string())
            .set_string_variable(vars::REST_PORT, &ports::REST.to_string())
            .set_string_variable(vars::API_PORT, &ports::API.to_string());
        manifest.config_maps.insert(name.to_string(), config_map);

        let mut deployment = manifest.new_deployment_config(name);
        deployment
            .set_image(&options.image)
            .set_image_pull_policy(&options.image_pull_policy)
            .set_replicas(options.replicas);

        for (suffix, port) in [("grpc", ports::GRPC), ("rest", ports::REST), ("api", ports::API)] {
            let port = u32::from(port);
            let port_name = format!("{}-port", suffix);
            deployment.set_container_port(&port_name, port);

            let service_name = format!("{}-{}", name, suffix);
            let service = manifest
                .new_service_config(&service_name)
                .set_container_port(port)
                .set_target_port(port)
                .set_port_name(&port_name);
            manifest.services.insert(service_name, service);
        }
        manifest.deployments.insert(name.to_string(), deployment);

        debug!("Created core resources for cluster {}/{}", namespace, name);
        manifest
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether a cluster identity was ever assigned
    pub fn has_identity(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn new_secret_config(&self, name: &str) -> SecretConfig {
        SecretConfig::new(&self.id, name, &self.namespace, &self.name)
    }

    pub fn new_config_map_config(&self, name: &str) -> ConfigMapConfig {
        ConfigMapConfig::new(&self.id, name, &self.namespace, &self.name)
    }

    pub fn new_service_config(&self, name: &str) -> ServiceConfig {
        ServiceConfig::new(&self.id, name, &self.namespace, &self.name)
    }

    pub fn new_deployment_config(&self, name: &str) -> DeploymentConfig {
        DeploymentConfig::new(&self.id, name, &self.namespace, &self.name)
    }

    /// The Secret keyed by the cluster name, if the run created one
    pub fn cluster_secret_mut(&mut self) -> Option<&mut SecretConfig> {
        self.secrets.get_mut(&self.name)
    }

    /// The ConfigMap keyed by the cluster name, if the run created one
    pub fn cluster_config_map_mut(&mut self) -> Option<&mut ConfigMapConfig> {
        self.config_maps.get_mut(&self.name)
    }

    /// The Deployment keyed by the cluster name, if the run created one
    pub fn cluster_deployment_mut(&mut self) -> Option<&mut DeploymentConfig> {
        self.deployments.get_mut(&self.name)
    }

    /// Render every resource into its Kubernetes object
    #[instrument(skip(self), fields(cluster = %self.name))]
    pub fn render(&self) -> Result<Manifests> {
        let mut manifests = Manifests::default();

        for secret in self.secrets.values() {
            manifests.secrets.push(secret.get()?.clone());
        }
        for config_map in self.config_maps.values() {
            manifests.config_maps.push(config_map.get()?.clone());
        }
        for service in self.services.values() {
            manifests.services.push(service.get()?.clone());
        }
        for deployment in self.deployments.values() {
            manifests.deployments.push(deployment.get()?.clone());
        }

        debug!("Rendered {} objects", manifests.len());
        Ok(manifests)
    }
}

/// Rendered Kubernetes objects, ready to be exported or applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifests {
    pub secrets: Vec<Secret>,
    pub config_maps: Vec<ConfigMap>,
    pub services: Vec<Service>,
    pub deployments: Vec<Deployment>,
}

impl Manifests {
    pub fn len(&self) -> usize {
        self.secrets.len() + self.config_maps.len() + self.services.len() + self.deployments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize all objects as a multi-document YAML stream
    pub fn to_yaml(&self) -> Result<String> {
        let mut documents = Vec::with_capacity(self.len());
        push_documents(&mut documents, &self.secrets)?;
        push_documents(&mut documents, &self.config_maps)?;
        push_documents(&mut documents, &self.services)?;
        push_documents(&mut documents, &self.deployments)?;
        Ok(documents.join("---\n"))
    }
}

fn push_documents<T: Serialize>(documents: &mut Vec<String>, objects: &[T]) -> Result<()> {
    for object in objects {
        documents.push(serde_yaml::to_string(object)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_options() -> ClusterOptions {
        ClusterOptions {
            replicas: 3,
            image: "docker.io/kubemq/kubemq:latest".to_string(),
            image_pull_policy: "Always".to_string(),
        }
    }

    #[test]
    fn test_new_is_empty() {
        let manifest = ManifestConfig::new("c-1", "broker", "kubemq");

        assert_eq!(manifest.id(), "c-1");
        assert_eq!(manifest.name(), "broker");
        assert_eq!(manifest.namespace(), "kubemq");
        assert!(manifest.has_identity());
        assert!(manifest.secrets.is_empty());
        assert!(manifest.render().unwrap().is_empty());
    }

    #[test]
    fn test_default_has_no_identity() {
        assert!(!ManifestConfig::default().has_identity());
    }

    #[test]
    fn test_for_cluster_keys_by_logical_name() {
        let manifest = ManifestConfig::for_cluster("c-1", "broker", "kubemq", &make_options());

        assert!(manifest.secrets.contains_key("broker"));
        assert!(manifest.config_maps.contains_key("broker"));
        assert!(manifest.deployments.contains_key("broker"));
        let services: Vec<&str> = manifest.services.keys().map(String::as_str).collect();
        assert_eq!(services, vec!["broker-api", "broker-grpc", "broker-rest"]);

        let config_map = &manifest.config_maps["broker"];
        assert_eq!(config_map.data().get(vars::GRPC_PORT), Some("50000"));
        assert_eq!(manifest.deployments["broker"].ports().len(), 3);
    }

    #[test]
    fn test_factories_prepopulate_identity() {
        let manifest = ManifestConfig::new("c-1", "broker", "kubemq");
        let service = manifest
            .new_service_config("broker-extra")
            .set_container_port(1)
            .set_target_port(1)
            .set_port_name("extra");

        let rendered = service.get().unwrap();
        assert_eq!(rendered.metadata.namespace.as_deref(), Some("kubemq"));
        assert_eq!(
            rendered.spec.as_ref().unwrap().selector.as_ref().unwrap()["app"],
            "broker"
        );
    }

    #[test]
    fn test_cluster_lookups_miss_without_core_resources() {
        let mut manifest = ManifestConfig::new("c-1", "broker", "kubemq");
        assert!(manifest.cluster_secret_mut().is_none());
        assert!(manifest.cluster_config_map_mut().is_none());
        assert!(manifest.cluster_deployment_mut().is_none());
    }

    #[test]
    fn test_render_and_export() {
        let manifest = ManifestConfig::for_cluster("c-1", "broker", "kubemq", &make_options());
        let manifests = manifest.render().unwrap();

        assert_eq!(manifests.secrets.len(), 1);
        assert_eq!(manifests.config_maps.len(), 1);
        assert_eq!(manifests.services.len(), 3);
        assert_eq!(manifests.deployments.len(), 1);

        let yaml = manifests.to_yaml().unwrap();
        assert_eq!(yaml.matches("---\n").count(), manifests.len() - 1);
        assert!(yaml.contains("kind: Deployment"));
    }

    #[test]
    fn test_keyword_cluster_name_keeps_identity() {
        let manifest = ManifestConfig::for_cluster("c-1", "null", "null", &make_options());
        let manifests = manifest.render().unwrap();

        for secret in &manifests.secrets {
            assert_eq!(secret.metadata.name.as_deref(), Some("null"));
            assert_eq!(secret.metadata.namespace.as_deref(), Some("null"));
        }
        assert_eq!(manifests.config_maps[0].metadata.name.as_deref(), Some("null"));
        let deployment = &manifests.deployments[0];
        assert_eq!(deployment.metadata.name.as_deref(), Some("null"));
        assert!(manifests
            .services
            .iter()
            .all(|s| s.metadata.namespace.as_deref() == Some("null")));
    }
}
