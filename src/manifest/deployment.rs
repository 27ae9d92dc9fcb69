// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::CLUSTER_ID_LABEL;
use crate::error::Result;
use crate::template::Template;
use k8s_openapi::api::apps::v1::Deployment;
use serde::Serialize;

const DEPLOYMENT_TEMPLATE: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{ name|tojson }}
  namespace: {{ namespace|tojson }}
  labels:
    app: {{ app_name|tojson }}
    {{ id_label }}: {{ id|tojson }}
spec:
  replicas: {{ replicas }}
  selector:
    matchLabels:
      app: {{ app_name|tojson }}
  template:
    metadata:
      labels:
        app: {{ app_name|tojson }}
    spec:
      containers:
        - name: {{ name|tojson }}
          image: {{ image|tojson }}
          imagePullPolicy: {{ image_pull_policy|tojson }}
{%- if ports %}
          ports:
{%- for port in ports %}
            - name: {{ port.name|tojson }}
              containerPort: {{ port.container_port }}
              protocol: TCP
{%- endfor %}
{%- endif %}
          envFrom:
            - configMapRef:
                name: {{ config_map_name|tojson }}
            - secretRef:
                name: {{ secret_name|tojson }}
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerPort {
    pub name: String,
    pub container_port: u32,
}

/// Broker workload reading its environment from the cluster ConfigMap and Secret
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentConfig {
    id: String,
    name: String,
    namespace: String,
    app_name: String,
    id_label: &'static str,
    image: String,
    image_pull_policy: String,
    replicas: u32,
    ports: Vec<ContainerPort>,
    config_map_name: String,
    secret_name: String,
    #[serde(skip)]
    template: Template<Deployment>,
}

impl DeploymentConfig {
    pub fn new(id: &str, name: &str, namespace: &str, app_name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            app_name: app_name.to_string(),
            id_label: CLUSTER_ID_LABEL,
            image: String::new(),
            image_pull_policy: "IfNotPresent".to_string(),
            replicas: 1,
            ports: Vec::new(),
            config_map_name: app_name.to_string(),
            secret_name: app_name.to_string(),
            template: Template::new("deployment", DEPLOYMENT_TEMPLATE),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ports(&self) -> &[ContainerPort] {
        &self.ports
    }

    pub fn replicas(&self) -> u32 {
        self.replicas
    }

    pub fn set_image(&mut self, image: &str) -> &mut Self {
        self.image = image.to_string();
        self.template.invalidate();
        self
    }

    pub fn set_image_pull_policy(&mut self, policy: &str) -> &mut Self {
        self.image_pull_policy = policy.to_string();
        self.template.invalidate();
        self
    }

    pub fn set_replicas(&mut self, replicas: u32) -> &mut Self {
        self.replicas = replicas;
        self.template.invalidate();
        self
    }

    /// Add a container port, replacing an existing port with the same name
    pub fn set_container_port(&mut self, name: &str, port: u32) -> &mut Self {
        match self.ports.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.container_port = port,
            None => self.ports.push(ContainerPort {
                name: name.to_string(),
                container_port: port,
            }),
        }
        self.template.invalidate();
        self
    }

    pub fn spec(&self) -> Result<String> {
        self.template.spec(self)
    }

    pub fn get(&self) -> Result<&Deployment> {
        self.template.get(self)
    }
}
