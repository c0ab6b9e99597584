//! Shared helpers for the integration tests
//!
//! Component catalogs, chart fixtures at the current and at historic schema
//! versions, and cube resolvers that record their lookups.

#![allow(dead_code)]

pub mod catalog;
pub mod fixtures;
pub mod resolver;

pub use catalog::{catalog, dimensions, measures, CUBE, UNVERSIONED_CUBE};
pub use fixtures::{
    chart, chart_at_1_0_0, document_at_1_0_0, grouped_table, map_at_1_0_1, props,
    stacked_column,
};
pub use resolver::RecordingResolver;
