use crate::adjust::context::{AdjustContext, Adjustable, Adjuster};
use crate::adjust::path::FieldPath;
use crate::adjust::shared;
use crate::config::TableConfig;

/// The old segment becomes a visible group column.
fn group_by_segment(mut c: TableConfig, ctx: &AdjustContext<'_>) -> TableConfig {
    let Some(component_id) = ctx.old_value.get("componentId").and_then(|v| v.as_str()) else {
        return c;
    };
    if let Some(column) = c.fields.get_mut(component_id) {
        column.is_group = true;
        column.is_hidden = false;
    }
    c
}

impl Adjustable for TableConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::DataFilters => Some(shared::data_filters),
            P::Fields => Some(group_by_segment),
            P::Filters
            | P::Limits
            | P::XComponentId
            | P::XSortingType
            | P::XSortingOrder
            | P::XUseAbbreviations
            | P::XShowValues
            | P::YComponentId
            | P::YSortingType
            | P::YSortingOrder
            | P::YUseAbbreviations
            | P::YShowValues
            | P::YImputationType
            | P::YComponentIds
            | P::YLeftAxisComponentId
            | P::YRightAxisComponentId
            | P::YLineComponentId
            | P::YLineAxisOrientation
            | P::YColumnComponentId
            | P::Segment
            | P::Animation
            | P::ColorType
            | P::ColorPaletteId
            | P::ColorColor
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId
            | P::LegendFilter
            | P::TimeRangeFilter
            | P::CalculationActive
            | P::CalculationType => None,
        }
    }
}
