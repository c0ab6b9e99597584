//! Adjusters shared by every chart type

use super::context::AdjustContext;
use crate::config::{
    AnimationField, CalculationType, ChartConfig, ChartShape, ColorField, Cube, DataFilters,
    Dimension, LegendFilter, Limit, Sorting, SortingOptions, SortingOrder, SortingType, TableColumn,
    TimeRangeFilter, DEFAULT_PALETTE,
};
use crate::defaults::segment_color;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

/// Carry the cubes over, dropping filters on dimensions the new chart
/// encodes but the old one did not.
pub fn cubes<C: ChartShape>(mut chart: C, ctx: &AdjustContext<'_>) -> C {
    let Some(old_cubes) = ctx.decode::<Vec<Cube>>() else {
        return chart;
    };
    let previously: HashSet<&str> = ctx.old_chart.encoded_component_ids().into_iter().collect();
    let newly: HashSet<String> = chart
        .encoded_component_ids()
        .into_iter()
        .filter(|id| !previously.contains(id))
        .map(str::to_string)
        .collect();

    chart.common_mut().cubes = old_cubes
        .into_iter()
        .map(|mut cube| {
            cube.filters.retain(|id, _| !newly.contains(id));
            cube
        })
        .collect();
    chart
}

/// Keep limits of measures still on a measure axis.
pub fn limits<C: ChartShape>(mut chart: C, ctx: &AdjustContext<'_>) -> C {
    if !C::CHART_TYPE.supports_limits() {
        return chart;
    }
    let Some(old_limits) = ctx.decode::<BTreeMap<String, Vec<Limit>>>() else {
        return chart;
    };
    let axis: HashSet<String> = chart.measure_axis_ids().into_iter().map(str::to_string).collect();
    chart.common_mut().limits = old_limits
        .into_iter()
        .filter(|(measure_id, _)| axis.contains(measure_id))
        .collect();
    chart
}

/// Re-point the legend filter at the new segment.
pub fn legend<C: ChartShape>(mut chart: C, ctx: &AdjustContext<'_>) -> C {
    let Some(old) = ctx.decode::<LegendFilter>() else {
        return chart;
    };
    let Some(segment) = chart.segment_component_id().map(str::to_string) else {
        return chart;
    };
    chart.common_mut().interactive_filters_config.legend = LegendFilter {
        active: old.active,
        component_id: segment,
    };
    chart
}

/// Keep the time range only when `x` is still the same temporal dimension.
pub fn time_range<C: ChartShape>(mut chart: C, ctx: &AdjustContext<'_>) -> C {
    let Some(old) = ctx.decode::<TimeRangeFilter>() else {
        return chart;
    };
    let same_x = chart.x_dimension_id() == Some(old.component_id.as_str());
    let temporal = ctx
        .dimension(&old.component_id)
        .is_some_and(|d| d.component_type.is_temporal());
    if same_x && temporal {
        chart.common_mut().interactive_filters_config.time_range = old;
    }
    chart
}

/// Keep data filters on components that are not encoded.
pub fn data_filters<C: ChartShape>(mut chart: C, ctx: &AdjustContext<'_>) -> C {
    let Some(old) = ctx.decode::<DataFilters>() else {
        return chart;
    };
    let encoded: HashSet<String> = chart
        .encoded_component_ids()
        .into_iter()
        .map(str::to_string)
        .collect();
    let component_ids: Vec<String> = old
        .component_ids
        .into_iter()
        .filter(|id| !encoded.contains(id))
        .collect();
    chart.common_mut().interactive_filters_config.data_filters = DataFilters {
        active: old.active && !component_ids.is_empty(),
        component_ids,
    };
    chart
}

pub fn calculation_active<C: ChartShape>(mut chart: C, ctx: &AdjustContext<'_>) -> C {
    if let Some(active) = ctx.old_bool() {
        if chart.supports_percent_calculation() {
            chart.common_mut().interactive_filters_config.calculation.active = active;
        }
    }
    chart
}

pub fn calculation_type<C: ChartShape>(mut chart: C, ctx: &AdjustContext<'_>) -> C {
    if let Some(calculation_type) = ctx.decode::<CalculationType>() {
        if chart.supports_percent_calculation() {
            chart.common_mut().interactive_filters_config.calculation.calculation_type =
                calculation_type;
        }
    }
    chart
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OldSegment {
    component_id: String,
    #[serde(default)]
    sorting: Option<Sorting>,
}

/// The segment carried over from the old chart
#[derive(Debug, Clone)]
pub struct SegmentSource<'a> {
    pub dimension: &'a Dimension,
    pub sorting: Option<Sorting>,
}

/// Resolve the old segment, whether it came from a segment field or from the
/// grouped columns of a table.
pub fn segment_source<'a>(ctx: &AdjustContext<'a>) -> Option<SegmentSource<'a>> {
    let (component_id, sorting) = match ctx.old_chart {
        ChartConfig::Table(_) => (grouped_table_column(ctx)?, None),
        _ => {
            let old = ctx.decode::<OldSegment>()?;
            (old.component_id, old.sorting)
        }
    };
    let dimension = ctx.dimension(&component_id)?;
    Some(SegmentSource { dimension, sorting })
}

/// The grouped column with the lowest index among segment-eligible types
fn grouped_table_column(ctx: &AdjustContext<'_>) -> Option<String> {
    let columns = ctx.decode::<BTreeMap<String, TableColumn>>()?;
    columns
        .into_values()
        .filter(|c| c.is_group && c.component_type.is_segment_eligible())
        .min_by_key(|c| c.index)
        .map(|c| c.component_id)
}

/// A segment color for `dimension`, keeping the old palette when there was one.
pub fn segment_color_for(ctx: &AdjustContext<'_>, dimension: &Dimension) -> ColorField {
    segment_color(ctx.old_palette().unwrap_or(DEFAULT_PALETTE), dimension)
}

// ---------------------------------------------------------------------------
// Field-level helpers
// ---------------------------------------------------------------------------

pub fn sorting_type(sorting: &mut Option<Sorting>, options: SortingOptions, ctx: &AdjustContext<'_>) {
    if let Some(sorting_type) = ctx.decode::<SortingType>() {
        let order = sorting.map_or(SortingOrder::Asc, |s| s.sorting_order);
        *sorting = Some(options.adjust(Some(Sorting::new(sorting_type, order))));
    }
}

pub fn sorting_order(sorting: &mut Option<Sorting>, options: SortingOptions, ctx: &AdjustContext<'_>) {
    if let Some(order) = ctx.decode::<SortingOrder>() {
        let sorting_type = sorting.map_or(options.default, |s| s.sorting_type);
        *sorting = Some(Sorting::new(sorting_type, order));
    }
}

pub fn flag(target: &mut Option<bool>, ctx: &AdjustContext<'_>) {
    if let Some(value) = ctx.old_bool() {
        *target = Some(value);
    }
}

pub fn palette(color: &mut ColorField, ctx: &AdjustContext<'_>) {
    if let Some(palette) = ctx.old_str() {
        *color = color.clone().with_palette(palette);
    }
}

/// A single color survives only onto a single color.
pub fn single_color(color: &mut ColorField, ctx: &AdjustContext<'_>) {
    if let (ColorField::Single { color: current, .. }, Some(old)) = (color, ctx.old_str()) {
        *current = old.to_string();
    }
}

/// Point `target` at the old value if it names a dimension.
pub fn dimension_id(target: &mut String, ctx: &AdjustContext<'_>) {
    if let Some(dimension) = ctx.old_dimension() {
        *target = dimension.id.clone();
    }
}

/// Point `target` at the old value if it names a temporal dimension.
pub fn temporal_id(target: &mut String, ctx: &AdjustContext<'_>) {
    if let Some(dimension) = ctx.old_temporal_dimension() {
        *target = dimension.id.clone();
    }
}

/// Point `target` at the old value if it names a numerical measure.
pub fn measure_id(target: &mut String, ctx: &AdjustContext<'_>) {
    if let Some(measure) = ctx.old_measure() {
        *target = measure.id.clone();
    }
}

/// Carry an animation whose dimension is still temporal.
pub fn animation(slot: &mut Option<AnimationField>, ctx: &AdjustContext<'_>) {
    if let Some(old) = ctx.decode::<AnimationField>() {
        let temporal = ctx
            .dimension(&old.component_id)
            .is_some_and(|d| d.component_type.is_temporal());
        if temporal {
            *slot = Some(old);
        }
    }
}
