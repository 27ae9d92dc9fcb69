// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Delivery of rendered manifests to a live cluster.

pub mod apply;
pub mod namespaces;

pub use apply::apply_manifests;
pub use namespaces::apply_namespace;
