// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The field manager name used for server-side apply
pub const FIELD_MANAGER: &str = "kubemqctl";

/// Label carrying the cluster id on every rendered object
pub const CLUSTER_ID_LABEL: &str = "kubemq.io/cluster-id";

/// Label marking namespaces this tool applied
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Custom resource registration
pub mod crd {
    pub const GROUP: &str = "core.k8s.kubemq.io";
    pub const VERSION: &str = "v1alpha1";
}

/// Default listen ports of the broker
pub mod ports {
    pub const GRPC: u16 = 50000;
    pub const REST: u16 = 9090;
    pub const API: u16 = 8080;
    pub const GATEWAY: u32 = 7000;
}

/// Variable names read by the broker image from its Secret and ConfigMap
pub mod vars {
    pub const GRPC_PORT: &str = "BROKER_GRPC_PORT";
    pub const REST_PORT: &str = "BROKER_REST_PORT";
    pub const API_PORT: &str = "BROKER_API_PORT";

    pub const GATEWAY_CERT: &str = "BROKER_GATEWAY_CERT";
    pub const GATEWAY_KEY: &str = "BROKER_GATEWAY_KEY";
    pub const GATEWAY_CA: &str = "BROKER_GATEWAY_CA";
    pub const GATEWAYS: &str = "BROKER_GATEWAYS";
    pub const GATEWAY_PORT: &str = "BROKER_GATEWAY_PORT";

    pub const TLS_CERT: &str = "BROKER_TLS_CERT";
    pub const TLS_KEY: &str = "BROKER_TLS_KEY";
    pub const TLS_CA: &str = "BROKER_TLS_CA";
    pub const TLS_ENABLED: &str = "BROKER_TLS_ENABLED";
}
