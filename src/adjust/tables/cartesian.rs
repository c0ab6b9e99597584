//! Adjuster tables of the axis charts: column, bar, line, area, scatterplot, pie

use super::{AREA_SEGMENT, LINE_SEGMENT, PIE_SEGMENT, SCATTER_SEGMENT, SORTED_AXIS, STACKED_SEGMENT};
use crate::adjust::context::{AdjustContext, Adjustable, Adjuster};
use crate::adjust::path::FieldPath;
use crate::adjust::shared;
use crate::config::{
    AreaConfig, BarConfig, ColumnConfig, ImputationType, LineConfig, PieConfig, ScatterplotConfig,
    SegmentField, SortingOptions, StackedSegmentField, StackingType,
};

fn stacked_segment(
    ctx: &AdjustContext<'_>,
    dimension_axis: &str,
    measure_axis: &str,
) -> Option<(StackedSegmentField, crate::config::ColorField)> {
    let source = shared::segment_source(ctx)?;
    if source.dimension.id == dimension_axis {
        return None;
    }
    let field = StackedSegmentField {
        component_id: source.dimension.id.clone(),
        stacking: StackingType::for_measure(ctx.measure(measure_axis)),
        sorting: Some(STACKED_SEGMENT.adjust(source.sorting)),
    };
    Some((field, shared::segment_color_for(ctx, source.dimension)))
}

fn plain_segment(
    ctx: &AdjustContext<'_>,
    options: SortingOptions,
    dimension_axis: Option<&str>,
) -> Option<(SegmentField, crate::config::ColorField)> {
    let source = shared::segment_source(ctx)?;
    if Some(source.dimension.id.as_str()) == dimension_axis {
        return None;
    }
    let field = SegmentField {
        component_id: source.dimension.id.clone(),
        sorting: Some(options.adjust(source.sorting)),
    };
    Some((field, shared::segment_color_for(ctx, source.dimension)))
}

impl Adjustable for ColumnConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::Limits => Some(shared::limits),
            P::LegendFilter => Some(shared::legend),
            P::TimeRangeFilter => Some(shared::time_range),
            P::DataFilters => Some(shared::data_filters),
            P::CalculationActive => Some(shared::calculation_active),
            P::CalculationType => Some(shared::calculation_type),
            P::XComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::dimension_id(&mut c.fields.x.component_id, ctx);
                c
            }),
            P::XSortingType => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::sorting_type(&mut c.fields.x.sorting, SORTED_AXIS, ctx);
                c
            }),
            P::XSortingOrder => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::sorting_order(&mut c.fields.x.sorting, SORTED_AXIS, ctx);
                c
            }),
            P::XUseAbbreviations => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.x.use_abbreviations, ctx);
                c
            }),
            P::YComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::measure_id(&mut c.fields.y.component_id, ctx);
                c
            }),
            P::YShowValues => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.y.show_values, ctx);
                c
            }),
            P::Segment => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                let f = &c.fields;
                if let Some((segment, color)) =
                    stacked_segment(ctx, &f.x.component_id, &f.y.component_id)
                {
                    c.fields.segment = Some(segment);
                    c.fields.color = color;
                }
                c
            }),
            P::Animation => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::animation(&mut c.fields.animation, ctx);
                c
            }),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::ColorColor => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::single_color(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::XShowValues
            | P::YSortingType
            | P::YSortingOrder
            | P::YUseAbbreviations
            | P::YImputationType
            | P::YComponentIds
            | P::YLeftAxisComponentId
            | P::YRightAxisComponentId
            | P::YLineComponentId
            | P::YLineAxisOrientation
            | P::YColumnComponentId
            | P::ColorType
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId => None,
        }
    }
}

impl Adjustable for BarConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::Limits => Some(shared::limits),
            P::LegendFilter => Some(shared::legend),
            P::TimeRangeFilter => Some(shared::time_range),
            P::DataFilters => Some(shared::data_filters),
            P::CalculationActive => Some(shared::calculation_active),
            P::CalculationType => Some(shared::calculation_type),
            P::XComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::measure_id(&mut c.fields.x.component_id, ctx);
                c
            }),
            P::XShowValues => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.x.show_values, ctx);
                c
            }),
            P::YComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::dimension_id(&mut c.fields.y.component_id, ctx);
                c
            }),
            P::YSortingType => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::sorting_type(&mut c.fields.y.sorting, SORTED_AXIS, ctx);
                c
            }),
            P::YSortingOrder => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::sorting_order(&mut c.fields.y.sorting, SORTED_AXIS, ctx);
                c
            }),
            P::YUseAbbreviations => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.y.use_abbreviations, ctx);
                c
            }),
            P::Segment => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                let f = &c.fields;
                if let Some((segment, color)) =
                    stacked_segment(ctx, &f.y.component_id, &f.x.component_id)
                {
                    c.fields.segment = Some(segment);
                    c.fields.color = color;
                }
                c
            }),
            P::Animation => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::animation(&mut c.fields.animation, ctx);
                c
            }),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::ColorColor => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::single_color(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::XSortingType
            | P::XSortingOrder
            | P::XUseAbbreviations
            | P::YShowValues
            | P::YImputationType
            | P::YComponentIds
            | P::YLeftAxisComponentId
            | P::YRightAxisComponentId
            | P::YLineComponentId
            | P::YLineAxisOrientation
            | P::YColumnComponentId
            | P::ColorType
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId => None,
        }
    }
}

impl Adjustable for LineConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::Limits => Some(shared::limits),
            P::LegendFilter => Some(shared::legend),
            P::TimeRangeFilter => Some(shared::time_range),
            P::DataFilters => Some(shared::data_filters),
            P::CalculationActive => Some(shared::calculation_active),
            P::CalculationType => Some(shared::calculation_type),
            P::XComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::temporal_id(&mut c.fields.x.component_id, ctx);
                c
            }),
            P::XUseAbbreviations => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.x.use_abbreviations, ctx);
                c
            }),
            P::YComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::measure_id(&mut c.fields.y.component_id, ctx);
                c
            }),
            P::YShowValues => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.y.show_values, ctx);
                c
            }),
            P::Segment => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                let x = Some(c.fields.x.component_id.as_str());
                if let Some((segment, color)) = plain_segment(ctx, LINE_SEGMENT, x) {
                    c.fields.segment = Some(segment);
                    c.fields.color = color;
                }
                c
            }),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::ColorColor => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::single_color(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::XSortingType
            | P::XSortingOrder
            | P::XShowValues
            | P::YSortingType
            | P::YSortingOrder
            | P::YUseAbbreviations
            | P::YImputationType
            | P::YComponentIds
            | P::YLeftAxisComponentId
            | P::YRightAxisComponentId
            | P::YLineComponentId
            | P::YLineAxisOrientation
            | P::YColumnComponentId
            | P::Animation
            | P::ColorType
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId => None,
        }
    }
}

impl Adjustable for AreaConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::Limits => Some(shared::limits),
            P::LegendFilter => Some(shared::legend),
            P::TimeRangeFilter => Some(shared::time_range),
            P::DataFilters => Some(shared::data_filters),
            P::CalculationActive => Some(shared::calculation_active),
            P::CalculationType => Some(shared::calculation_type),
            P::XComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::temporal_id(&mut c.fields.x.component_id, ctx);
                c
            }),
            P::XUseAbbreviations => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.x.use_abbreviations, ctx);
                c
            }),
            P::YComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::measure_id(&mut c.fields.y.component_id, ctx);
                c
            }),
            P::YShowValues => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.y.show_values, ctx);
                c
            }),
            P::YImputationType => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                if let Some(imputation) = ctx.decode::<ImputationType>() {
                    c.fields.y.imputation_type = Some(imputation);
                }
                c
            }),
            P::Segment => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                let x = Some(c.fields.x.component_id.as_str());
                if let Some((segment, color)) = plain_segment(ctx, AREA_SEGMENT, x) {
                    c.fields.segment = Some(segment);
                    c.fields.color = color;
                }
                c
            }),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::ColorColor => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::single_color(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::XSortingType
            | P::XSortingOrder
            | P::XShowValues
            | P::YSortingType
            | P::YSortingOrder
            | P::YUseAbbreviations
            | P::YComponentIds
            | P::YLeftAxisComponentId
            | P::YRightAxisComponentId
            | P::YLineComponentId
            | P::YLineAxisOrientation
            | P::YColumnComponentId
            | P::Animation
            | P::ColorType
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId => None,
        }
    }
}

impl Adjustable for ScatterplotConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::Limits => Some(shared::limits),
            P::LegendFilter => Some(shared::legend),
            P::TimeRangeFilter => Some(shared::time_range),
            P::DataFilters => Some(shared::data_filters),
            P::CalculationActive => Some(shared::calculation_active),
            P::CalculationType => Some(shared::calculation_type),
            P::XComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::measure_id(&mut c.fields.x.component_id, ctx);
                c
            }),
            P::YComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::measure_id(&mut c.fields.y.component_id, ctx);
                c
            }),
            P::Segment => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                if let Some((segment, color)) = plain_segment(ctx, SCATTER_SEGMENT, None) {
                    c.fields.segment = Some(segment);
                    c.fields.color = color;
                }
                c
            }),
            P::Animation => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::animation(&mut c.fields.animation, ctx);
                c
            }),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::ColorColor => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::single_color(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::XSortingType
            | P::XSortingOrder
            | P::XUseAbbreviations
            | P::XShowValues
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
            | P::ColorType
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId => None,
        }
    }
}

impl Adjustable for PieConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::Limits => Some(shared::limits),
            P::LegendFilter => Some(shared::legend),
            P::DataFilters => Some(shared::data_filters),
            P::CalculationActive => Some(shared::calculation_active),
            P::CalculationType => Some(shared::calculation_type),
            P::YComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::measure_id(&mut c.fields.y.component_id, ctx);
                c
            }),
            P::YShowValues => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.y.show_values, ctx);
                c
            }),
            P::Segment => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                if let Some((segment, color)) = plain_segment(ctx, PIE_SEGMENT, None) {
                    c.fields.segment = segment;
                    c.fields.color = color;
                }
                c
            }),
            P::Animation => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::animation(&mut c.fields.animation, ctx);
                c
            }),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::XComponentId
            | P::XSortingType
            | P::XSortingOrder
            | P::XUseAbbreviations
            | P::XShowValues
            | P::YSortingType
            | P::YSortingOrder
            | P::YUseAbbreviations
            | P::YImputationType
            | P::YComponentIds
            | P::YLeftAxisComponentId
            | P::YRightAxisComponentId
            | P::YLineComponentId
            | P::YLineAxisOrientation
            | P::YColumnComponentId
            | P::ColorType
            | P::ColorColor
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId
            | P::TimeRangeFilter => None,
        }
    }
}
