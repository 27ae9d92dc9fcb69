// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Server-side apply of rendered manifests

use super::namespaces::apply_namespace;
use crate::constants::FIELD_MANAGER;
use crate::error::Result;
use crate::manifest::Manifests;
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{Patch, PatchParams},
    Api, Client, Resource, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use tracing::{info, instrument};

/// Apply all objects into `namespace`, applying the namespace itself first.
///
/// Objects are applied Secrets first and Deployments last so workloads never
/// start without their configuration. The first failure aborts the run.
#[instrument(skip(client, manifests), fields(objects = manifests.len()))]
pub async fn apply_manifests(client: &Client, namespace: &str, manifests: &Manifests) -> Result<()> {
    apply_namespace(client, namespace).await?;

    for secret in &manifests.secrets {
        apply_object(client, namespace, secret).await?;
    }
    for config_map in &manifests.config_maps {
        apply_object(client, namespace, config_map).await?;
    }
    for service in &manifests.services {
        apply_object(client, namespace, service).await?;
    }
    for deployment in &manifests.deployments {
        apply_object(client, namespace, deployment).await?;
    }

    info!("Applied {} objects to namespace {}", manifests.len(), namespace);
    Ok(())
}

async fn apply_object<K>(client: &Client, namespace: &str, object: &K) -> Result<K>
where
    K: Resource<Scope = NamespaceResourceScope> + Clone + Debug + Serialize + DeserializeOwned,
    <K as Resource>::DynamicType: Default,
{
    let api: Api<K> = Api::namespaced(client.clone(), namespace);
    let name = object.name_any();

    let pp = PatchParams::apply(FIELD_MANAGER).force();
    let applied = api.patch(&name, &pp, &Patch::Apply(object)).await?;

    info!(
        "Applied {} {}/{}",
        K::kind(&Default::default()),
        namespace,
        name
    );
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KubemqError;
    use crate::manifest::ManifestConfig;
    use crate::test_utils::{namespace_json, MockService};

    fn make_manifests() -> Manifests {
        let mut manifest = ManifestConfig::new("c-1", "broker", "kubemq");
        let mut secret = manifest.new_secret_config("broker");
        secret.set_data_variable("BROKER_GATEWAY_CERT", "cert");
        manifest.secrets.insert("broker".to_string(), secret);

        let service = manifest
            .new_service_config("broker-gateway")
            .set_container_port(7001)
            .set_target_port(7001)
            .set_port_name("gateway-port");
        manifest.services.insert("broker-gateway".to_string(), service);

        manifest.render().unwrap()
    }

    fn object_json<T: Serialize>(object: &T) -> String {
        serde_json::to_string(object).unwrap()
    }

    #[tokio::test]
    async fn test_apply_manifests_in_order() {
        let manifests = make_manifests();
        let mock = MockService::new()
            .on_patch("/api/v1/namespaces/kubemq", 200, &namespace_json("kubemq"))
            .on_patch(
                "/api/v1/namespaces/kubemq/services/broker-gateway",
                200,
                &object_json(&manifests.services[0]),
            )
            .on_patch(
                "/api/v1/namespaces/kubemq/secrets/broker",
                200,
                &object_json(&manifests.secrets[0]),
            );

        apply_manifests(&mock.client(), "kubemq", &manifests)
            .await
            .unwrap();

        let paths: Vec<String> = mock
            .requests()
            .into_iter()
            .map(|(method, path)| format!("{} {}", method, path))
            .collect();
        assert_eq!(
            paths,
            vec![
                "PATCH /api/v1/namespaces/kubemq",
                "PATCH /api/v1/namespaces/kubemq/secrets/broker",
                "PATCH /api/v1/namespaces/kubemq/services/broker-gateway",
            ]
        );
    }

    #[tokio::test]
    async fn test_apply_stops_on_first_failure() {
        let manifests = make_manifests();
        let mock = MockService::new()
            .on_patch("/api/v1/namespaces/kubemq", 200, &namespace_json("kubemq"));

        let err = apply_manifests(&mock.client(), "kubemq", &manifests)
            .await
            .unwrap_err();

        assert!(matches!(err, KubemqError::KubeError(_)));
        // The Secret failed, so the Service was never sent
        assert_eq!(mock.requests().len(), 2);
    }
}
