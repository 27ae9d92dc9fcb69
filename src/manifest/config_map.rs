// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use super::variables::DataVariables;
use crate::constants::CLUSTER_ID_LABEL;
use crate::error::Result;
use crate::template::Template;
use k8s_openapi::api::core::v1::ConfigMap;
use serde::Serialize;

const CONFIG_MAP_TEMPLATE: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: {{ name|tojson }}
  namespace: {{ namespace|tojson }}
  labels:
    app: {{ app_name|tojson }}
    {{ id_label }}: {{ id|tojson }}
{%- if data %}
data:
{%- for key, value in data|items %}
  {{ key }}: {{ value|tojson }}
{%- endfor %}
{%- endif %}
"#;

/// Plain broker configuration exposed to the workload as environment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigMapConfig {
    id: String,
    name: String,
    namespace: String,
    app_name: String,
    id_label: &'static str,
    data: DataVariables,
    #[serde(skip)]
    template: Template<ConfigMap>,
}

impl ConfigMapConfig {
    pub fn new(id: &str, name: &str, namespace: &str, app_name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            app_name: app_name.to_string(),
            id_label: CLUSTER_ID_LABEL,
            data: DataVariables::new(),
            template: Template::new("config-map", CONFIG_MAP_TEMPLATE),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &DataVariables {
        &self.data
    }

    pub fn set_string_variable(&mut self, key: &str, value: &str) -> &mut Self {
        self.data.set(key, value);
        self.template.invalidate();
        self
    }

    pub fn spec(&self) -> Result<String> {
        self.template.spec(self)
    }

    pub fn get(&self) -> Result<&ConfigMap> {
        self.template.get(self)
    }
}
