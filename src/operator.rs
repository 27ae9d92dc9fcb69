// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deployment of the cluster operator

use crate::config::Config;
use crate::error::Result;
use crate::template::Template;
use k8s_openapi::api::apps::v1::Deployment;
use serde::Serialize;

const OPERATOR_TEMPLATE: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: {{ name|tojson }}
  namespace: {{ namespace|tojson }}
spec:
  replicas: 1
  selector:
    matchLabels:
      name: {{ name|tojson }}
  template:
    metadata:
      labels:
        name: {{ name|tojson }}
    spec:
      serviceAccountName: {{ name|tojson }}
      containers:
        - name: {{ name|tojson }}
          image: {{ image|tojson }}
          command:
            - kubemq-operator
          imagePullPolicy: Always
          env:
            - name: WATCH_NAMESPACE
              valueFrom:
                fieldRef:
                  fieldPath: metadata.namespace
            - name: POD_NAME
              valueFrom:
                fieldRef:
                  fieldPath: metadata.name
            - name: OPERATOR_NAME
              value: {{ name|tojson }}
            - name: KUBEMQ_REGISTRY
              value: {{ kubemq_registry|tojson }}
            - name: KUBEMQ_REPOSITORY
              value: {{ kubemq_repository|tojson }}
            - name: KUBEMQ_IMAGE_TAG
              value: {{ kubemq_tag|tojson }}
"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operator {
    name: String,
    namespace: String,
    image: String,
    kubemq_registry: String,
    kubemq_repository: String,
    kubemq_tag: String,
    #[serde(skip)]
    deployment: Template<Deployment>,
}

impl Operator {
    pub fn new(name: &str, namespace: &str, config: &Config) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            image: config.operator_image.clone(),
            kubemq_registry: config.registry.clone(),
            kubemq_repository: config.repository.clone(),
            kubemq_tag: config.tag.clone(),
            deployment: Template::new("operator", OPERATOR_TEMPLATE),
        }
    }

    pub fn spec(&self) -> Result<String> {
        self.deployment.spec(self)
    }

    /// The operator Deployment, rendered once and cached
    pub fn get(&self) -> Result<&Deployment> {
        self.deployment.get(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_value(deployment: &Deployment, name: &str) -> Option<String> {
        deployment.spec.as_ref()?.template.spec.as_ref()?.containers[0]
            .env
            .as_ref()?
            .iter()
            .find(|e| e.name == name)?
            .value
            .clone()
    }

    #[test]
    fn test_render_operator() {
        let operator = Operator::new("kubemq-operator", "kubemq", &Config::default());
        let deployment = operator.get().unwrap();

        assert_eq!(deployment.metadata.name.as_deref(), Some("kubemq-operator"));
        assert_eq!(deployment.metadata.namespace.as_deref(), Some("kubemq"));
        assert_eq!(env_value(deployment, "OPERATOR_NAME").as_deref(), Some("kubemq-operator"));
        assert_eq!(env_value(deployment, "KUBEMQ_REGISTRY").as_deref(), Some("docker.io"));
        assert_eq!(
            env_value(deployment, "KUBEMQ_REPOSITORY").as_deref(),
            Some("kubemq/kubemq")
        );
        assert_eq!(env_value(deployment, "KUBEMQ_IMAGE_TAG").as_deref(), Some("latest"));

        let pod = deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();
        assert_eq!(pod.service_account_name.as_deref(), Some("kubemq-operator"));
        assert_eq!(
            pod.containers[0].image.as_deref(),
            Some("docker.io/kubemq/kubemq-operator:latest")
        );
    }

    #[test]
    fn test_get_is_cached() {
        let operator = Operator::new("kubemq-operator", "kubemq", &Config::default());
        let first = operator.get().unwrap() as *const Deployment;
        let second = operator.get().unwrap() as *const Deployment;
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_spec_contains_numeric_tag_as_string() {
        let config = Config {
            tag: "2.0".to_string(),
            ..Config::default()
        };
        let operator = Operator::new("kubemq-operator", "kubemq", &config);

        assert!(operator.spec().unwrap().contains(r#"value: "2.0""#));
        assert_eq!(
            env_value(operator.get().unwrap(), "KUBEMQ_IMAGE_TAG").as_deref(),
            Some("2.0")
        );
    }
}
