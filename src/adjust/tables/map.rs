use crate::adjust::context::{AdjustContext, Adjustable, Adjuster};
use crate::adjust::path::FieldPath;
use crate::adjust::shared;
use crate::config::{numerical_measures, AreaLayer, LayerColor, MapConfig, SymbolLayer};
use crate::defaults::fixed_color;

fn area_layer(mut c: MapConfig, ctx: &AdjustContext<'_>) -> MapConfig {
    let Some(shapes) = ctx.old_dimension().filter(|d| d.component_type.is_geo_shapes()) else {
        return c;
    };
    match &mut c.fields.area_layer {
        Some(layer) => layer.component_id = shapes.id.clone(),
        None => {
            c.fields.area_layer = Some(AreaLayer {
                component_id: shapes.id.clone(),
                color: fixed_color(),
            })
        }
    }
    c
}

fn symbol_layer(mut c: MapConfig, ctx: &AdjustContext<'_>) -> MapConfig {
    let Some(place) = ctx.old_dimension().filter(|d| d.component_type.is_geo()) else {
        return c;
    };
    match &mut c.fields.symbol_layer {
        Some(layer) => layer.component_id = place.id.clone(),
        None => {
            let Some(measure) = numerical_measures(ctx.measures).next() else {
                return c;
            };
            c.fields.symbol_layer = Some(SymbolLayer {
                component_id: place.id.clone(),
                measure_id: measure.id.clone(),
                color: fixed_color(),
            });
        }
    }
    c
}

/// The measure goes to the symbol layer, or colors the area layer when there
/// are no symbols.
fn layer_measure(mut c: MapConfig, ctx: &AdjustContext<'_>) -> MapConfig {
    let Some(measure) = ctx.old_measure() else {
        return c;
    };
    if let Some(layer) = &mut c.fields.symbol_layer {
        layer.measure_id = measure.id.clone();
    } else if let Some(AreaLayer {
        color: LayerColor::Numerical { component_id, .. },
        ..
    }) = &mut c.fields.area_layer
    {
        *component_id = measure.id.clone();
    }
    c
}

impl Adjustable for MapConfig {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>> {
        use FieldPath as P;
        match path {
            P::Cubes => Some(shared::cubes),
            P::DataFilters => Some(shared::data_filters),
            P::AreaLayerComponentId => Some(area_layer),
            P::SymbolLayerComponentId => Some(symbol_layer),
            P::SymbolLayerMeasureId => Some(layer_measure),
            P::Animation => Some(|mut c: Self, ctx: &AdjustContext<'_>| {
                shared::animation(&mut c.fields.animation, ctx);
                c
            }),
            P::Filters
            | P::Fields
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
            | P::ColorType
            | P::ColorPaletteId
            | P::ColorColor
            | P::LegendFilter
            | P::TimeRangeFilter
            | P::CalculationActive
            | P::CalculationType => None,
        }
    }
}
