//! Closed enumeration of adjustable field paths

use crate::config::ChartType;
use std::fmt;

/// Every configuration path that has an adjuster or an override somewhere.
///
/// Paths outside this set are reported as unrecognized and never adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Cubes,
    Limits,
    Filters,
    Fields,
    XComponentId,
    XSortingType,
    XSortingOrder,
    XUseAbbreviations,
    XShowValues,
    YComponentId,
    YSortingType,
    YSortingOrder,
    YUseAbbreviations,
    YShowValues,
    YImputationType,
    YComponentIds,
    YLeftAxisComponentId,
    YRightAxisComponentId,
    YLineComponentId,
    YLineAxisOrientation,
    YColumnComponentId,
    Segment,
    Animation,
    ColorType,
    ColorPaletteId,
    ColorColor,
    AreaLayerComponentId,
    SymbolLayerComponentId,
    SymbolLayerMeasureId,
    LegendFilter,
    TimeRangeFilter,
    DataFilters,
    CalculationActive,
    CalculationType,
}

const PATHS: [(FieldPath, &str); 34] = [
    (FieldPath::Cubes, "cubes"),
    (FieldPath::Limits, "limits"),
    (FieldPath::Filters, "filters"),
    (FieldPath::Fields, "fields"),
    (FieldPath::XComponentId, "fields.x.componentId"),
    (FieldPath::XSortingType, "fields.x.sorting.sortingType"),
    (FieldPath::XSortingOrder, "fields.x.sorting.sortingOrder"),
    (FieldPath::XUseAbbreviations, "fields.x.useAbbreviations"),
    (FieldPath::XShowValues, "fields.x.showValues"),
    (FieldPath::YComponentId, "fields.y.componentId"),
    (FieldPath::YSortingType, "fields.y.sorting.sortingType"),
    (FieldPath::YSortingOrder, "fields.y.sorting.sortingOrder"),
    (FieldPath::YUseAbbreviations, "fields.y.useAbbreviations"),
    (FieldPath::YShowValues, "fields.y.showValues"),
    (FieldPath::YImputationType, "fields.y.imputationType"),
    (FieldPath::YComponentIds, "fields.y.componentIds"),
    (FieldPath::YLeftAxisComponentId, "fields.y.leftAxisComponentId"),
    (FieldPath::YRightAxisComponentId, "fields.y.rightAxisComponentId"),
    (FieldPath::YLineComponentId, "fields.y.lineComponentId"),
    (FieldPath::YLineAxisOrientation, "fields.y.lineAxisOrientation"),
    (FieldPath::YColumnComponentId, "fields.y.columnComponentId"),
    (FieldPath::Segment, "fields.segment"),
    (FieldPath::Animation, "fields.animation"),
    (FieldPath::ColorType, "fields.color.type"),
    (FieldPath::ColorPaletteId, "fields.color.paletteId"),
    (FieldPath::ColorColor, "fields.color.color"),
    (FieldPath::AreaLayerComponentId, "fields.areaLayer.componentId"),
    (FieldPath::SymbolLayerComponentId, "fields.symbolLayer.componentId"),
    (FieldPath::SymbolLayerMeasureId, "fields.symbolLayer.measureId"),
    (FieldPath::LegendFilter, "interactiveFiltersConfig.legend"),
    (FieldPath::TimeRangeFilter, "interactiveFiltersConfig.timeRange"),
    (FieldPath::DataFilters, "interactiveFiltersConfig.dataFilters"),
    (FieldPath::CalculationActive, "interactiveFiltersConfig.calculation.active"),
    (FieldPath::CalculationType, "interactiveFiltersConfig.calculation.type"),
];

impl FieldPath {
    pub const ALL: [FieldPath; 34] = {
        let mut all = [FieldPath::Cubes; 34];
        let mut i = 0;
        while i < PATHS.len() {
            all[i] = PATHS[i].0;
            i += 1;
        }
        all
    };

    pub fn parse(path: &str) -> Option<Self> {
        PATHS.iter().find(|(_, s)| *s == path).map(|(p, _)| *p)
    }

    pub fn as_str(&self) -> &'static str {
        PATHS
            .iter()
            .find(|(p, _)| p == self)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    /// Compound values carried as a whole instead of field by field
    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            Self::Filters
                | Self::Segment
                | Self::Animation
                | Self::LegendFilter
                | Self::TimeRangeFilter
                | Self::DataFilters
                | Self::Limits
        )
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the walker stops at `path` instead of descending into `value`.
///
/// The whole `fields` object is opaque when leaving a table for a chart type
/// with a segment, since table columns have no field-by-field counterpart.
pub fn is_leaf(path: &str, value: &serde_json::Value, source: ChartType, target: ChartType) -> bool {
    if !value.is_object() {
        return true;
    }
    match FieldPath::parse(path) {
        Some(FieldPath::Fields) => source == ChartType::Table && target.supports_segment(),
        Some(p) => p.is_opaque(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_path_round_trips_through_its_name() {
        for path in FieldPath::ALL {
            assert_eq!(FieldPath::parse(path.as_str()), Some(path));
        }
        assert_eq!(FieldPath::parse("fields.x.label"), None);
    }

    #[test]
    fn table_fields_are_opaque_only_towards_segmented_types() {
        let fields = json!({ "canton": { "componentId": "canton" } });
        assert!(is_leaf("fields", &fields, ChartType::Table, ChartType::Line));
        assert!(!is_leaf("fields", &fields, ChartType::Table, ChartType::Map));
        assert!(!is_leaf("fields", &fields, ChartType::Column, ChartType::Line));
    }

    #[test]
    fn primitives_and_arrays_are_leaves() {
        let any = ChartType::Column;
        assert!(is_leaf("fields.x.componentId", &json!("year"), any, any));
        assert!(is_leaf("cubes", &json!([]), any, any));
        assert!(is_leaf("fields.segment", &json!({ "componentId": "c" }), any, any));
        assert!(!is_leaf("fields.x", &json!({ "componentId": "c" }), any, any));
    }
}
