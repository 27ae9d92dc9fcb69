// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Target namespace of an apply run

use crate::constants::{FIELD_MANAGER, MANAGED_BY_LABEL};
use crate::error::{KubemqError, Result};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{ObjectMeta, Patch, PatchParams},
    Api, Client,
};
use std::collections::BTreeMap;
use tracing::{info, instrument};

fn namespace_object(name: &str) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(BTreeMap::from([(
                MANAGED_BY_LABEL.to_string(),
                FIELD_MANAGER.to_string(),
            )])),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Server-side apply the namespace, creating it when absent.
///
/// An existing namespace only gains the managed-by label; fields owned by
/// other managers are left alone.
#[instrument(skip(client))]
pub async fn apply_namespace(client: &Client, namespace: &str) -> Result<Namespace> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let pp = PatchParams::apply(FIELD_MANAGER).force();

    let applied = namespaces
        .patch(namespace, &pp, &Patch::Apply(namespace_object(namespace)))
        .await
        .map_err(|err| KubemqError::NamespaceError(format!("{}: {}", namespace, err)))?;

    info!("Applied namespace {}", namespace);
    Ok(applied)
}
