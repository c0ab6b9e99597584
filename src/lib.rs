//! chartconf: chart configuration adjustment and schema migration
//!
//! Two engines over the same document shape:
//!
//! - **Adjusting**: switching a chart to another chart type keeps every
//!   encoding that has a counterpart in the new type.
//! - **Migrating**: stored chart configurations and editor documents are
//!   moved between schema versions, up or down, one step at a time.
//!
//! # Example
//!
//! ```
//! use chartconf::{ChartType, CHART_CONFIG_VERSION};
//!
//! let chart_type: ChartType = "comboLineDual".parse().unwrap();
//! assert!(chart_type.is_combo());
//! assert_eq!(CHART_CONFIG_VERSION, "4.1.0");
//! ```

pub mod adjust;
pub mod config;
pub mod defaults;
pub mod document;
pub mod migrate;

pub use adjust::{
    adjust_chart_type, adjust_chart_type_with_report, AdjustOptions, AdjustOutcome, AdjustReport,
    FieldPath,
};
pub use config::{
    ChartConfig, ChartType, ComponentCatalog, ComponentType, ConfigError, ConfigResult, Dimension,
    Measure, CHART_CONFIG_VERSION,
};
pub use defaults::{initial_config, InitialConfigOptions};
pub use document::{read_document, write_document, DocumentError, DocumentResult, Format};
pub use migrate::{
    decode_chart_config, migrate_chart_config, migrate_document, DataSource, MigrateOptions,
    MigrationChain, MigrationError, MigrationProps, MigrationResult, DOCUMENT_VERSION,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
