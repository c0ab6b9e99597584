//! Attributes every chart configuration carries regardless of chart type

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A string in each supported locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Localized {
    #[serde(default)]
    pub de: String,
    #[serde(default)]
    pub fr: String,
    #[serde(default)]
    pub it: String,
    #[serde(default)]
    pub en: String,
}

impl Localized {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            de: text.clone(),
            fr: text.clone(),
            it: text.clone(),
            en: text,
        }
    }
}

/// Display metadata of a chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Meta {
    #[serde(default)]
    pub title: Localized,
    #[serde(default)]
    pub description: Localized,
    #[serde(default)]
    pub label: Localized,
}

/// An active filter on one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Filter {
    Single { value: String },
    Multi { values: BTreeMap<String, bool> },
    Range { from: String, to: String },
}

/// A referenced dataset and its filters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cube {
    pub iri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_iri: Option<String>,
    #[serde(default)]
    pub filters: BTreeMap<String, Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_by: Option<Vec<String>>,
}

impl Cube {
    pub fn new(iri: impl Into<String>) -> Self {
        let iri = iri.into();
        Self {
            publish_iri: Some(iri.clone()),
            iri,
            filters: BTreeMap::new(),
            join_by: None,
        }
    }

    pub fn with_filter(mut self, component_id: impl Into<String>, filter: Filter) -> Self {
        self.filters.insert(component_id.into(), filter);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum LineType {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDimension {
    pub dimension_id: String,
    pub dimension_value: String,
}

/// A reference line drawn against a measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Limit {
    #[serde(default)]
    pub related: Vec<RelatedDimension>,
    pub value: f64,
    pub color: String,
    pub line_type: LineType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegendFilter {
    pub active: bool,
    pub component_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangePresets {
    #[serde(rename = "type")]
    pub preset_type: String,
    pub from: String,
    pub to: String,
}

impl Default for TimeRangePresets {
    fn default() -> Self {
        Self {
            preset_type: "range".to_string(),
            from: String::new(),
            to: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeFilter {
    pub active: bool,
    pub component_id: String,
    #[serde(default)]
    pub presets: TimeRangePresets,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataFilters {
    pub active: bool,
    #[serde(default)]
    pub component_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CalculationType {
    #[default]
    Identity,
    Percent,
}

/// Toggle between absolute and 100%-normalized display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationFilter {
    pub active: bool,
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveFiltersConfig {
    #[serde(default)]
    pub legend: LegendFilter,
    #[serde(default)]
    pub time_range: TimeRangeFilter,
    #[serde(default)]
    pub data_filters: DataFilters,
    #[serde(default)]
    pub calculation: CalculationFilter,
}

/// The chart-type-independent part of a chart configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartCommon {
    pub key: String,
    pub version: String,
    #[serde(default)]
    pub meta: Meta,
    pub cubes: Vec<Cube>,
    #[serde(default)]
    pub limits: BTreeMap<String, Vec<Limit>>,
    #[serde(default)]
    pub interactive_filters_config: InteractiveFiltersConfig,
}

impl ChartCommon {
    pub fn new(key: impl Into<String>, cubes: Vec<Cube>) -> Self {
        Self {
            key: key.into(),
            version: super::CHART_CONFIG_VERSION.to_string(),
            meta: Meta::default(),
            cubes,
            limits: BTreeMap::new(),
            interactive_filters_config: InteractiveFiltersConfig::default(),
        }
    }
}
