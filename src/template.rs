// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Two-stage manifest rendering: template text to YAML, YAML to a typed object.
//!
//! Templates use minijinja `{{ field }}` placeholders resolved against any
//! `Serialize` context. Undefined fields are errors, never empty strings or
//! `null`. The environment carries no builtin globals, so a missing field can
//! never resolve to a function of the same name.

use crate::error::{KubemqError, Result};
use minijinja::value::{Value, ValueKind};
use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::OnceCell;
use std::sync::OnceLock;
use tracing::{debug, instrument};

fn engine() -> &'static Environment<'static> {
    static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();
    ENGINE.get_or_init(|| {
        let mut env = Environment::empty();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_filter("tojson", tojson);
        env.add_filter("items", items);
        env
    })
}

fn undefined(filter: &str) -> Error {
    Error::new(
        ErrorKind::UndefinedError,
        format!("undefined value passed to {}", filter),
    )
}

/// Quote a value as JSON, which YAML reads back as the same scalar
fn tojson(value: &Value) -> std::result::Result<Value, Error> {
    if value.is_undefined() {
        return Err(undefined("tojson"));
    }
    serde_json::to_string(value)
        .map(Value::from_safe_string)
        .map_err(|err| {
            Error::new(ErrorKind::InvalidOperation, "cannot serialize value to JSON")
                .with_source(err)
        })
}

/// `(key, value)` pairs of a map, in the map's own order
fn items(value: &Value) -> std::result::Result<Value, Error> {
    if value.is_undefined() {
        return Err(undefined("items"));
    }
    if value.kind() != ValueKind::Map {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "items filter expects a map",
        ));
    }
    let mut pairs = Vec::new();
    for key in value.try_iter()? {
        let item = value.get_item(&key)?;
        pairs.push(Value::from(vec![key, item]));
    }
    Ok(Value::from(pairs))
}

/// A manifest template bound to the Kubernetes type it decodes into.
///
/// The decoded object is cached after the first successful [`Template::get`];
/// owners must call [`Template::invalidate`] whenever the context changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Template<T> {
    name: &'static str,
    source: &'static str,
    object: OnceCell<T>,
}

impl<T: DeserializeOwned> Template<T> {
    pub fn new(name: &'static str, source: &'static str) -> Self {
        Self {
            name,
            source,
            object: OnceCell::new(),
        }
    }

    /// Substitute the context into the template, producing YAML text
    #[instrument(skip(self, context), fields(template = self.name))]
    pub fn spec<C: Serialize + ?Sized>(&self, context: &C) -> Result<String> {
        engine()
            .render_str(self.source, context)
            .map_err(|source| KubemqError::Template {
                name: self.name,
                source,
            })
    }

    /// Render and decode the template, returning the cached object on repeat calls
    pub fn get<C: Serialize + ?Sized>(&self, context: &C) -> Result<&T> {
        if let Some(object) = self.object.get() {
            return Ok(object);
        }

        let yaml = self.spec(context)?;
        let object: T = serde_yaml::from_str(&yaml).map_err(|source| KubemqError::Decode {
            name: self.name,
            source,
        })?;
        debug!("Decoded {} manifest", self.name);

        Ok(self.object.get_or_init(|| object))
    }

    /// Whether a decoded object is currently cached
    pub fn is_cached(&self) -> bool {
        self.object.get().is_some()
    }

    pub fn invalidate(&mut self) {
        self.object.take();
    }
}
