//! Path overrides per (target, source) chart type pair
//!
//! The walker finds fields by their path in the old configuration. Where the
//! same concept lives under a different path in the target shape (bar `x` is
//! column `y`, map `areaLayer` is column `x`, table `fields` is `segment`),
//! an override redirects the lookup and optionally reshapes the old value.

use super::path::FieldPath;
use crate::config::ChartType;
use serde_json::{json, Value};

/// Where an old path is looked up in the target chart type's table
#[derive(Debug, Clone, Copy)]
pub struct PathOverride {
    pub path: FieldPath,
    pub old_value: Option<fn(&Value) -> Value>,
}

impl PathOverride {
    fn to(path: FieldPath) -> Option<Self> {
        Some(Self {
            path,
            old_value: None,
        })
    }

    fn with(path: FieldPath, old_value: fn(&Value) -> Value) -> Option<Self> {
        Some(Self {
            path,
            old_value: Some(old_value),
        })
    }

    /// Apply the value transform, if any
    pub fn transform(&self, value: &Value) -> Value {
        match self.old_value {
            Some(f) => f(value),
            None => value.clone(),
        }
    }
}

fn first_item(value: &Value) -> Value {
    value.get(0).cloned().unwrap_or(Value::Null)
}

fn as_list(value: &Value) -> Value {
    json!([value])
}

fn as_segment(value: &Value) -> Value {
    json!({ "componentId": value })
}

fn component_id_of(value: &Value) -> Value {
    value.get("componentId").cloned().unwrap_or(Value::Null)
}

/// Look up the override for `path` when switching from `source` to `target`.
pub fn path_override(target: ChartType, source: ChartType, path: FieldPath) -> Option<PathOverride> {
    use ChartType::*;
    use FieldPath as P;

    match (target, source, path) {
        // Table columns and segments stand in for each other
        (Table, _, P::Segment) => PathOverride::to(P::Fields),
        (t, Table, P::Fields) if t.supports_segment() => PathOverride::to(P::Segment),

        // Bar swaps the axes of every x-dimension / y-measure chart
        (Bar, Column | Line | Area | ComboLineSingle | ComboLineDual | ComboLineColumn, P::XComponentId) => {
            PathOverride::to(P::YComponentId)
        }
        (Bar, Column | Line | Area | Pie | Scatterplot, P::YComponentId) => {
            PathOverride::to(P::XComponentId)
        }
        (Bar, Column | Line | Area, P::YShowValues) => PathOverride::to(P::XShowValues),
        (Bar, Column, P::XSortingType) => PathOverride::to(P::YSortingType),
        (Bar, Column, P::XSortingOrder) => PathOverride::to(P::YSortingOrder),
        (Bar, Column | Line | Area, P::XUseAbbreviations) => PathOverride::to(P::YUseAbbreviations),
        (Bar, ComboLineSingle, P::YComponentIds) => PathOverride::with(P::XComponentId, first_item),
        (Bar, ComboLineDual, P::YLeftAxisComponentId) => PathOverride::to(P::XComponentId),
        (Bar, ComboLineColumn, P::YColumnComponentId) => PathOverride::to(P::XComponentId),
        (Bar, Map, P::AreaLayerComponentId) => PathOverride::to(P::YComponentId),
        (Bar, Map, P::SymbolLayerMeasureId) => PathOverride::to(P::XComponentId),

        // ... and back
        (
            Column | Line | Area | Pie | Scatterplot | ComboLineSingle | ComboLineDual
            | ComboLineColumn,
            Bar,
            P::XComponentId,
        ) => PathOverride::to(P::YComponentId),
        (Column | Line | Area | ComboLineSingle | ComboLineDual | ComboLineColumn, Bar, P::YComponentId) => {
            PathOverride::to(P::XComponentId)
        }
        (Column | Line | Area | Pie, Bar, P::XShowValues) => PathOverride::to(P::YShowValues),
        (Column, Bar, P::YSortingType) => PathOverride::to(P::XSortingType),
        (Column, Bar, P::YSortingOrder) => PathOverride::to(P::XSortingOrder),
        (Column | Line | Area, Bar, P::YUseAbbreviations) => PathOverride::to(P::XUseAbbreviations),

        // Single-measure charts take the most analogous combo measure
        (Column | Line | Area | Pie | Scatterplot, ComboLineSingle, P::YComponentIds) => {
            PathOverride::with(P::YComponentId, first_item)
        }
        (Column | Line | Area | Pie | Scatterplot, ComboLineDual, P::YLeftAxisComponentId) => {
            PathOverride::to(P::YComponentId)
        }
        (Column, ComboLineColumn, P::YColumnComponentId) => PathOverride::to(P::YComponentId),
        (Line | Area | Pie | Scatterplot, ComboLineColumn, P::YLineComponentId) => {
            PathOverride::to(P::YComponentId)
        }

        // Combo to combo
        (ComboLineSingle, ComboLineDual, P::YLeftAxisComponentId) => {
            PathOverride::with(P::YComponentIds, as_list)
        }
        (ComboLineSingle, ComboLineColumn, P::YLineComponentId) => {
            PathOverride::with(P::YComponentIds, as_list)
        }
        (ComboLineDual, ComboLineSingle, P::YComponentIds) => {
            PathOverride::with(P::YLeftAxisComponentId, first_item)
        }
        (ComboLineDual, ComboLineColumn, P::YLineComponentId) => {
            PathOverride::to(P::YLeftAxisComponentId)
        }
        (ComboLineDual, ComboLineColumn, P::YColumnComponentId) => {
            PathOverride::to(P::YRightAxisComponentId)
        }
        (ComboLineColumn, ComboLineSingle, P::YComponentIds) => {
            PathOverride::with(P::YLineComponentId, first_item)
        }
        (ComboLineColumn, ComboLineDual, P::YLeftAxisComponentId) => {
            PathOverride::to(P::YLineComponentId)
        }
        (ComboLineColumn, ComboLineDual, P::YRightAxisComponentId) => {
            PathOverride::to(P::YColumnComponentId)
        }

        // Leaving a map
        (Column, Map, P::AreaLayerComponentId) => PathOverride::to(P::XComponentId),
        (Pie, Map, P::AreaLayerComponentId) => PathOverride::with(P::Segment, as_segment),
        (
            Column | Line | Area | Pie | Scatterplot | ComboLineSingle | ComboLineDual
            | ComboLineColumn,
            Map,
            P::SymbolLayerMeasureId,
        ) => PathOverride::to(P::YComponentId),

        // Entering a map
        (Map, Column, P::XComponentId) => PathOverride::to(P::AreaLayerComponentId),
        (Map, Bar, P::YComponentId) => PathOverride::to(P::AreaLayerComponentId),
        (Map, Bar, P::XComponentId) => PathOverride::to(P::SymbolLayerMeasureId),
        (Map, Column | Line | Area | Pie, P::YComponentId) => {
            PathOverride::to(P::SymbolLayerMeasureId)
        }
        (Map, Column | Bar | Line | Area | Scatterplot | Pie, P::Segment) => {
            PathOverride::with(P::AreaLayerComponentId, component_id_of)
        }
        (Map, ComboLineSingle, P::YComponentIds) => {
            PathOverride::with(P::SymbolLayerMeasureId, first_item)
        }
        (Map, ComboLineDual, P::YLeftAxisComponentId) => PathOverride::to(P::SymbolLayerMeasureId),
        (Map, ComboLineColumn, P::YColumnComponentId) => PathOverride::to(P::SymbolLayerMeasureId),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_and_column_swap_axes() {
        let ov = path_override(ChartType::Bar, ChartType::Column, FieldPath::XComponentId).unwrap();
        assert_eq!(ov.path, FieldPath::YComponentId);

        let back = path_override(ChartType::Column, ChartType::Bar, FieldPath::XComponentId).unwrap();
        assert_eq!(back.path, FieldPath::YComponentId);

        let sorting = path_override(ChartType::Bar, ChartType::Column, FieldPath::XSortingType).unwrap();
        assert_eq!(sorting.path, FieldPath::YSortingType);
    }

    #[test]
    fn symmetric_pairs_have_no_overrides() {
        for path in FieldPath::ALL {
            assert!(path_override(ChartType::Area, ChartType::Line, path).is_none());
            assert!(path_override(ChartType::Line, ChartType::Area, path).is_none());
        }
    }

    #[test]
    fn map_area_layer_becomes_pie_segment() {
        let ov = path_override(ChartType::Pie, ChartType::Map, FieldPath::AreaLayerComponentId).unwrap();
        assert_eq!(ov.path, FieldPath::Segment);
        assert_eq!(ov.transform(&json!("municipality")), json!({ "componentId": "municipality" }));
    }

    #[test]
    fn table_fields_map_to_segment_and_back() {
        let into_line = path_override(ChartType::Line, ChartType::Table, FieldPath::Fields).unwrap();
        assert_eq!(into_line.path, FieldPath::Segment);
        assert!(path_override(ChartType::Map, ChartType::Table, FieldPath::Fields).is_none());

        let into_table = path_override(ChartType::Table, ChartType::Pie, FieldPath::Segment).unwrap();
        assert_eq!(into_table.path, FieldPath::Fields);
    }

    #[test]
    fn combo_single_ids_collapse_to_first() {
        let ov = path_override(ChartType::ComboLineDual, ChartType::ComboLineSingle, FieldPath::YComponentIds)
            .unwrap();
        assert_eq!(ov.path, FieldPath::YLeftAxisComponentId);
        assert_eq!(ov.transform(&json!(["a", "b"])), json!("a"));
    }
}
