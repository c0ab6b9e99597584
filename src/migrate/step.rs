//! A single versioned transformation and what it may borrow from the caller

use super::error::{MigrationError, MigrationResult};
use super::resolver::{CubeResolver, DataSource};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied collaborators some steps need
#[derive(Clone, Default)]
pub struct MigrationProps {
    pub data_source: Option<DataSource>,
    pub resolver: Option<Arc<dyn CubeResolver>>,
}

impl MigrationProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_source = Some(data_source);
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn CubeResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }
}

impl fmt::Debug for MigrationProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationProps")
            .field("data_source", &self.data_source)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

/// One edge of a migration chain.
///
/// `up` takes a document at `from_version` to `to_version`, `down` the other
/// way. Both must stamp the version they produce.
#[async_trait]
pub trait Migration: Send + Sync {
    fn description(&self) -> &str;
    fn from_version(&self) -> &str;
    fn to_version(&self) -> &str;

    async fn up(&self, doc: Value, props: &MigrationProps) -> MigrationResult<Value>;
    async fn down(&self, doc: Value, props: &MigrationProps) -> MigrationResult<Value>;
}

/// Edits an owned document object in place of the original.
pub type Transform = fn(Map<String, Value>) -> MigrationResult<Map<String, Value>>;

/// A step whose transforms need nothing but the document.
///
/// The version stamp is applied after the transform runs.
#[derive(Clone, Copy)]
pub struct SyncStep {
    description: &'static str,
    from: &'static str,
    to: &'static str,
    up: Transform,
    down: Transform,
}

impl SyncStep {
    pub const fn new(
        from: &'static str,
        to: &'static str,
        description: &'static str,
        up: Transform,
        down: Transform,
    ) -> Self {
        Self {
            description,
            from,
            to,
            up,
            down,
        }
    }
}

#[async_trait]
impl Migration for SyncStep {
    fn description(&self) -> &str {
        self.description
    }

    fn from_version(&self) -> &str {
        self.from
    }

    fn to_version(&self) -> &str {
        self.to
    }

    async fn up(&self, doc: Value, _props: &MigrationProps) -> MigrationResult<Value> {
        let out = (self.up)(into_object(doc)?)?;
        Ok(stamp(out, self.to))
    }

    async fn down(&self, doc: Value, _props: &MigrationProps) -> MigrationResult<Value> {
        let out = (self.down)(into_object(doc)?)?;
        Ok(stamp(out, self.from))
    }
}

pub(crate) fn into_object(doc: Value) -> MigrationResult<Map<String, Value>> {
    match doc {
        Value::Object(map) => Ok(map),
        other => Err(MigrationError::InvalidDocument(format!(
            "expected an object, found {}",
            kind(&other)
        ))),
    }
}

pub(crate) fn stamp(mut doc: Map<String, Value>, version: &str) -> Value {
    doc.insert("version".to_string(), Value::String(version.to_string()));
    Value::Object(doc)
}

pub(crate) fn version_of(doc: &Value) -> Option<&str> {
    doc.get("version").and_then(Value::as_str)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
