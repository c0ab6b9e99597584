//! Adjuster tables of the combo charts
//!
//! Dual-axis and line-column charts need two measures with different units.
//! Whatever measure the old chart had becomes the anchor, and the partner is
//! the first measure with another unit. When a cube is being added, the
//! partner is taken from the newest cube so the anchor axis does not flip.

use crate::adjust::context::{AdjustContext, Adjustable, Adjuster};
use crate::adjust::path::FieldPath;
use crate::adjust::shared;
use crate::config::{
    measure_with_other_unit, AxisOrientation, ColorField, ComboLineColumnConfig,
    ComboLineDualConfig, ComboLineSingleConfig, Measure,
};

fn partner<'a>(ctx: &AdjustContext<'a>, anchor: &Measure) -> Option<&'a Measure> {
    let prefer_cube = if ctx.is_adding_new_cube {
        ctx.newest_cube()
    } else {
        None
    };
    measure_with_other_unit(ctx.measures, anchor.unit.as_deref(), &anchor.id, prefer_cube)
}

/// The old measure, if it can sit on a second axis next to `other`
fn second_axis<'a>(ctx: &AdjustContext<'a>, other: &str) -> Option<&'a Measure> {
    if ctx.is_adding_new_cube {
        return None;
    }
    let measure = ctx.old_measure()?;
    let other_unit = ctx.measure(other).and_then(|m| m.unit.as_deref());
    (measure.unit.as_deref() != other_unit).then_some(measure)
}

fn recolor<'a>(color: &ColorField, ids: impl IntoIterator<Item = &'a str>) -> ColorField {
    ColorField::measures(color.palette_id(), ids)
}

// ---------------------------------------------------------------------------
// comboLineSingle
// ---------------------------------------------------------------------------

fn single_ids(mut c: ComboLineSingleConfig, ids: Vec<String>) -> ComboLineSingleConfig {
    if ids.is_empty() {
        return c;
    }
    c.fields.color = recolor(&c.fields.color, ids.iter().map(String::as_str));
    c.fields.y.component_ids = ids;
    c
}

impl Adjustable for ComboLineSingleConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::TimeRangeFilter => Some(shared::time_range),
            P::DataFilters => Some(shared::data_filters),
            P::XComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::temporal_id(&mut c.fields.x.component_id, ctx);
                c
            }),
            P::XUseAbbreviations => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.x.use_abbreviations, ctx);
                c
            }),
            P::YComponentId => Some(|c: Self, ctx: &AdjustContext<'_>| {
                let ids = ctx.old_measure().map(|m| vec![m.id.clone()]).unwrap_or_default();
                single_ids(c, ids)
            }),
            P::YComponentIds => Some(|c: Self, ctx: &AdjustContext<'_>| {
                let old: Vec<String> = ctx.decode().unwrap_or_default();
                let measures: Vec<&Measure> = old
                    .iter()
                    .filter_map(|id| ctx.measure(id))
                    .filter(|m| m.component_type.is_numerical_measure())
                    .collect();
                let unit = measures.first().map(|m| m.unit.clone());
                let ids = measures
                    .into_iter()
                    .filter(|m| Some(m.unit.clone()) == unit)
                    .map(|m| m.id.clone())
                    .collect();
                single_ids(c, ids)
            }),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::Limits
            | P::XSortingType
            | P::XSortingOrder
            | P::XShowValues
            | P::YSortingType
            | P::YSortingOrder
            | P::YUseAbbreviations
            | P::YShowValues
            | P::YImputationType
            | P::YLeftAxisComponentId
            | P::YRightAxisComponentId
            | P::YLineComponentId
            | P::YLineAxisOrientation
            | P::YColumnComponentId
            | P::Segment
            | P::Animation
            | P::ColorType
            | P::ColorColor
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId
            | P::LegendFilter
            | P::CalculationActive
            | P::CalculationType => None,
        }
    }
}

// ---------------------------------------------------------------------------
// comboLineDual
// ---------------------------------------------------------------------------

fn dual_anchor_left(mut c: ComboLineDualConfig, ctx: &AdjustContext<'_>) -> ComboLineDualConfig {
    let Some(left) = ctx.old_measure() else {
        return c;
    };
    let kept = ctx
        .measure(&c.fields.y.right_axis_component_id)
        .filter(|m| m.id != left.id && m.unit != left.unit)
        .filter(|m| ctx.old_chart.measure_axis_ids().contains(&m.id.as_str()));
    let Some(right) = kept.or_else(|| partner(ctx, left)) else {
        return c;
    };
    c.fields.y.left_axis_component_id = left.id.clone();
    c.fields.y.right_axis_component_id = right.id.clone();
    c.fields.color = recolor(&c.fields.color, [left.id.as_str(), right.id.as_str()]);
    c
}

fn dual_right(mut c: ComboLineDualConfig, ctx: &AdjustContext<'_>) -> ComboLineDualConfig {
    if let Some(right) = second_axis(ctx, &c.fields.y.left_axis_component_id) {
        c.fields.y.right_axis_component_id = right.id.clone();
        let y = &c.fields.y;
        c.fields.color = recolor(
            &c.fields.color,
            [y.left_axis_component_id.as_str(), y.right_axis_component_id.as_str()],
        );
    }
    c
}

impl Adjustable for ComboLineDualConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::TimeRangeFilter => Some(shared::time_range),
            P::DataFilters => Some(shared::data_filters),
            P::XComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::temporal_id(&mut c.fields.x.component_id, ctx);
                c
            }),
            P::XUseAbbreviations => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.x.use_abbreviations, ctx);
                c
            }),
            P::YComponentId | P::YLeftAxisComponentId => Some(dual_anchor_left),
            P::YRightAxisComponentId => Some(dual_right),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::Limits
            | P::XSortingType
            | P::XSortingOrder
            | P::XShowValues
            | P::YSortingType
            | P::YSortingOrder
            | P::YUseAbbreviations
            | P::YShowValues
            | P::YImputationType
            | P::YComponentIds
            | P::YLineComponentId
            | P::YLineAxisOrientation
            | P::YColumnComponentId
            | P::Segment
            | P::Animation
            | P::ColorType
            | P::ColorColor
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId
            | P::LegendFilter
            | P::CalculationActive
            | P::CalculationType => None,
        }
    }
}

// ---------------------------------------------------------------------------
// comboLineColumn
// ---------------------------------------------------------------------------

fn line_column_color(mut c: ComboLineColumnConfig) -> ComboLineColumnConfig {
    let y = &c.fields.y;
    c.fields.color = recolor(
        &c.fields.color,
        [y.column_component_id.as_str(), y.line_component_id.as_str()],
    );
    c
}

fn anchor_column(mut c: ComboLineColumnConfig, ctx: &AdjustContext<'_>) -> ComboLineColumnConfig {
    let Some(column) = ctx.old_measure() else {
        return c;
    };
    let Some(line) = partner(ctx, column) else {
        return c;
    };
    c.fields.y.column_component_id = column.id.clone();
    c.fields.y.line_component_id = line.id.clone();
    line_column_color(c)
}

fn anchor_line(mut c: ComboLineColumnConfig, ctx: &AdjustContext<'_>) -> ComboLineColumnConfig {
    let Some(line) = ctx.old_measure() else {
        return c;
    };
    let Some(column) = partner(ctx, line) else {
        return c;
    };
    c.fields.y.line_component_id = line.id.clone();
    c.fields.y.column_component_id = column.id.clone();
    line_column_color(c)
}

fn second_column(mut c: ComboLineColumnConfig, ctx: &AdjustContext<'_>) -> ComboLineColumnConfig {
    match second_axis(ctx, &c.fields.y.line_component_id) {
        Some(column) => {
            c.fields.y.column_component_id = column.id.clone();
            line_column_color(c)
        }
        None => c,
    }
}

impl Adjustable for ComboLineColumnConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::TimeRangeFilter => Some(shared::time_range),
            P::DataFilters => Some(shared::data_filters),
            P::XComponentId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::temporal_id(&mut c.fields.x.component_id, ctx);
                c
            }),
            P::XUseAbbreviations => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::flag(&mut c.fields.x.use_abbreviations, ctx);
                c
            }),
            P::YComponentId => Some(anchor_column),
            P::YLineComponentId => Some(anchor_line),
            P::YColumnComponentId => Some(second_column),
            P::YLineAxisOrientation => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                if let Some(orientation) = ctx.decode::<AxisOrientation>() {
                    c.fields.y.line_axis_orientation = orientation;
                }
                c
            }),
            P::ColorPaletteId => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::palette(&mut c.fields.color, ctx);
                c
            }),
            P::Filters
            | P::Fields
            | P::Limits
            | P::XSortingType
            | P::XSortingOrder
            | P::XShowValues
            | P::YSortingType
            | P::YSortingOrder
            | P::YUseAbbreviations
            | P::YShowValues
            | P::YImputationType
            | P::YComponentIds
            | P::YLeftAxisComponentId
            | P::YRightAxisComponentId
            | P::Segment
            | P::Animation
            | P::ColorType
            | P::ColorColor
            | P::AreaLayerComponentId
            | P::SymbolLayerComponentId
            | P::SymbolLayerMeasureId
            | P::LegendFilter
            | P::CalculationActive
            | P::CalculationType => None,
        }
    }
}
