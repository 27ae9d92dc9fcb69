// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! KubemqCluster custom resource, reconciled by the in-cluster operator

use kube::CustomResource;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(group = "core.k8s.kubemq.io", version = "v1alpha1", kind = "KubemqCluster")]
#[kube(namespaced)]
#[kube(status = "KubemqClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct KubemqClusterSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    pub remotes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubemqClusterStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::crd::{GROUP, VERSION};
    use kube::{CustomResourceExt, Resource};

    #[test]
    fn test_registered_group_version() {
        assert_eq!(KubemqCluster::group(&()), GROUP);
        assert_eq!(KubemqCluster::version(&()), VERSION);
        assert_eq!(
            KubemqCluster::api_version(&()),
            format!("{}/{}", GROUP, VERSION)
        );
        assert_eq!(KubemqCluster::kind(&()), "KubemqCluster");
    }

    #[test]
    fn test_crd_definition() {
        let crd = KubemqCluster::crd();
        assert_eq!(
            crd.metadata.name.as_deref(),
            Some("kubemqclusters.core.k8s.kubemq.io")
        );
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.versions[0].name, VERSION);
    }

    #[test]
    fn test_spec_round_trips_camel_case() {
        let yaml = r#"
apiVersion: core.k8s.kubemq.io/v1alpha1
kind: KubemqCluster
metadata:
  name: broker
  namespace: kubemq
spec:
  replicas: 3
  gateway:
    remotes: ["peer-a:7000"]
    port: 7001
"#;
        let cluster: KubemqCluster = serde_yaml::from_str(yaml).unwrap();
        let gateway = cluster.spec.gateway.unwrap();

        assert_eq!(cluster.spec.replicas, Some(3));
        assert_eq!(gateway.remotes, vec!["peer-a:7000".to_string()]);
        assert_eq!(gateway.port, Some(7001));
        assert!(cluster.spec.tls.is_none());
    }
}
