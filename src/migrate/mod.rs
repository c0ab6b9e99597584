//! Version migration chains
//!
//! Stored documents carry the schema version they were written with. A chain
//! of adjacent-version steps moves them up to the version this crate reads,
//! or back down for older readers. Chart configurations and editor documents
//! have a chain each; document steps delegate to the chart chain for every
//! nested chart configuration.

mod chain;
mod chart_steps;
mod document_steps;
mod error;
mod resolver;
mod step;
mod version;

pub use chain::{MigrateOptions, MigrationChain};
pub use chart_steps::{chart_config_steps, ID_SEPARATOR};
pub use document_steps::document_steps;
pub use error::{MigrationError, MigrationResult, ResolveError};
pub use resolver::{
    CachingResolver, CubeResolver, DataSource, StaticCubeResolver, VersionSuffixResolver,
};
pub use step::{Migration, MigrationProps, SyncStep, Transform};
pub use version::{Direction, Version};

use crate::config::{ChartConfig, CHART_CONFIG_VERSION};
use serde_json::Value;
use std::sync::Arc;

/// Current version of the editor document schema
pub const DOCUMENT_VERSION: &str = "3.1.0";

/// The chart configuration chain, `1.0.0` up to [`CHART_CONFIG_VERSION`]
pub fn chart_config_chain() -> MigrationResult<MigrationChain> {
    MigrationChain::new("chart", chart_config_steps())
}

/// The editor document chain, `1.0.0` up to [`DOCUMENT_VERSION`]
pub fn document_chain() -> MigrationResult<MigrationChain> {
    let charts = Arc::new(chart_config_chain()?);
    MigrationChain::new("document", document_steps(charts))
}

pub async fn migrate_chart_config(doc: Value, options: &MigrateOptions) -> MigrationResult<Value> {
    chart_config_chain()?.migrate(doc, options).await
}

pub async fn migrate_document(doc: Value, options: &MigrateOptions) -> MigrationResult<Value> {
    document_chain()?.migrate(doc, options).await
}

/// Decode a chart configuration already at [`CHART_CONFIG_VERSION`].
pub fn decode_chart_config(doc: Value) -> MigrationResult<ChartConfig> {
    match step::version_of(&doc) {
        Some(CHART_CONFIG_VERSION) => Ok(serde_json::from_value(doc)?),
        other => Err(MigrationError::InvalidDocument(format!(
            "expected a chart config at {}, found {}",
            CHART_CONFIG_VERSION,
            other.unwrap_or("no version")
        ))),
    }
}
