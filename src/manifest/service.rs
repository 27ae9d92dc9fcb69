// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::CLUSTER_ID_LABEL;
use crate::error::Result;
use crate::template::Template;
use k8s_openapi::api::core::v1::Service;
use serde::Serialize;

const SERVICE_TEMPLATE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: {{ name|tojson }}
  namespace: {{ namespace|tojson }}
  labels:
    app: {{ app_name|tojson }}
    {{ id_label }}: {{ id|tojson }}
spec:
  type: {{ service_type|tojson }}
  selector:
    app: {{ app_name|tojson }}
  ports:
    - name: {{ port_name|tojson }}
      port: {{ container_port }}
      targetPort: {{ target_port }}
      protocol: TCP
"#;

/// A single-port Service in front of the broker pods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceConfig {
    id: String,
    name: String,
    namespace: String,
    app_name: String,
    id_label: &'static str,
    container_port: u32,
    target_port: u32,
    port_name: String,
    service_type: String,
    #[serde(skip)]
    template: Template<Service>,
}

impl ServiceConfig {
    /// `app_name` is the selector name of the owning workload
    pub fn new(id: &str, name: &str, namespace: &str, app_name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            app_name: app_name.to_string(),
            id_label: CLUSTER_ID_LABEL,
            container_port: 0,
            target_port: 0,
            port_name: String::new(),
            service_type: "ClusterIP".to_string(),
            template: Template::new("service", SERVICE_TEMPLATE),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn container_port(&self) -> u32 {
        self.container_port
    }

    pub fn target_port(&self) -> u32 {
        self.target_port
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn set_container_port(mut self, port: u32) -> Self {
        self.container_port = port;
        self.template.invalidate();
        self
    }

    pub fn set_target_port(mut self, port: u32) -> Self {
        self.target_port = port;
        self.template.invalidate();
        self
    }

    pub fn set_port_name(mut self, port_name: &str) -> Self {
        self.port_name = port_name.to_string();
        self.template.invalidate();
        self
    }

    pub fn spec(&self) -> Result<String> {
        self.template.spec(self)
    }

    pub fn get(&self) -> Result<&Service> {
        self.template.get(self)
    }
}
