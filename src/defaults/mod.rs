//! Default chart configurations
//!
//! Builds a fresh configuration of a given chart type from the available
//! dimensions and measures. The adjuster engine starts from this value and
//! grafts the old configuration onto it.

use crate::config::{
    measure_with_other_unit, numerical_measures, AreaConfig, AreaFields, AreaLayer,
    AreaMeasureField, AxisOrientation, BarConfig, BarFields, BaseLayer,
    ChartCommon, ChartConfig, ChartType, ColorField, ColorScaleType, ColumnConfig, ColumnFields,
    ColumnStyle, ComboLineColumnConfig, ComboLineColumnFields, ComboLineColumnY,
    ComboLineDualConfig, ComboLineDualFields, ComboLineDualY, ComboLineSingleConfig,
    ComboLineSingleFields, ComboLineSingleY, ConfigError, ConfigResult, Cube, Dimension,
    GenericField, LayerColor, LineConfig, LineFields, MapConfig, MapFields, Measure, MeasureField,
    Meta, PieConfig, PieFields, ScatterplotConfig, ScatterplotFields, SegmentField, SortedField,
    Sorting, SortingOrder, SortingType, SymbolLayer, TableColumn, TableConfig, TableSettings,
    DEFAULT_PALETTE, DEFAULT_SYMBOL_COLOR,
};
use std::collections::BTreeMap;

/// Palette of a numerical map area layer
pub const DEFAULT_SEQUENTIAL_PALETTE: &str = "oranges";

/// Opacity of freshly created map layers
pub const DEFAULT_LAYER_OPACITY: u8 = 80;

/// The parts of a configuration kept regardless of chart type
#[derive(Debug, Clone, Default)]
pub struct InitialConfigOptions {
    pub key: String,
    pub meta: Meta,
    pub cubes: Vec<Cube>,
}

impl InitialConfigOptions {
    pub fn new(key: impl Into<String>, cubes: Vec<Cube>) -> Self {
        Self {
            key: key.into(),
            meta: Meta::default(),
            cubes,
        }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Keep key, meta and cubes of an existing chart.
    pub fn from_chart(chart: &ChartConfig) -> Self {
        let common = chart.common();
        Self {
            key: common.key.clone(),
            meta: common.meta.clone(),
            cubes: common.cubes.clone(),
        }
    }

    fn common(&self) -> ChartCommon {
        let mut common = ChartCommon::new(self.key.clone(), self.cubes.clone());
        common.meta = self.meta.clone();
        common
    }
}

/// Build the default configuration of `chart_type`.
///
/// Fails with [`ConfigError::MissingComponent`] when the catalog lacks a
/// component the chart type cannot do without.
pub fn initial_config(
    chart_type: ChartType,
    options: &InitialConfigOptions,
    dimensions: &[Dimension],
    measures: &[Measure],
) -> ConfigResult<ChartConfig> {
    let picker = Picker {
        chart_type,
        dimensions,
        measures,
    };
    let common = options.common();

    let chart = match chart_type {
        ChartType::Column => {
            let x = picker
                .temporal()
                .or_else(|| picker.segment_eligible())
                .ok_or_else(|| picker.missing("a temporal or categorical dimension"))?;
            ChartConfig::Column(ColumnConfig {
                common,
                fields: ColumnFields {
                    x: SortedField::new(&x.id, Sorting::asc(SortingType::Auto)),
                    y: MeasureField::new(&picker.first_measure()?.id),
                    segment: None,
                    color: ColorField::single(DEFAULT_PALETTE),
                    animation: None,
                },
            })
        }
        ChartType::Bar => {
            let y = picker
                .segment_eligible()
                .ok_or_else(|| picker.missing("a categorical dimension"))?;
            ChartConfig::Bar(BarConfig {
                common,
                fields: BarFields {
                    x: MeasureField::new(&picker.first_measure()?.id),
                    y: SortedField::new(&y.id, Sorting::asc(SortingType::Auto)),
                    segment: None,
                    color: ColorField::single(DEFAULT_PALETTE),
                    animation: None,
                },
            })
        }
        ChartType::Line => ChartConfig::Line(LineConfig {
            common,
            fields: LineFields {
                x: GenericField::new(&picker.required_temporal()?.id),
                y: MeasureField::new(&picker.first_measure()?.id),
                segment: None,
                color: ColorField::single(DEFAULT_PALETTE),
            },
        }),
        ChartType::Area => ChartConfig::Area(AreaConfig {
            common,
            fields: AreaFields {
                x: GenericField::new(&picker.required_temporal()?.id),
                y: AreaMeasureField::new(&picker.first_measure()?.id),
                segment: None,
                color: ColorField::single(DEFAULT_PALETTE),
            },
        }),
        ChartType::Scatterplot => {
            let x = picker.first_measure()?;
            let y = numerical_measures(measures).nth(1).unwrap_or(x);
            ChartConfig::Scatterplot(ScatterplotConfig {
                common,
                fields: ScatterplotFields {
                    x: GenericField::new(&x.id),
                    y: GenericField::new(&y.id),
                    segment: None,
                    color: ColorField::single(DEFAULT_PALETTE),
                    animation: None,
                },
            })
        }
        ChartType::Pie => {
            let segment = picker
                .segment_eligible()
                .ok_or_else(|| picker.missing("a categorical dimension"))?;
            ChartConfig::Pie(PieConfig {
                common,
                fields: PieFields {
                    y: MeasureField::new(&picker.first_measure()?.id),
                    segment: SegmentField {
                        component_id: segment.id.clone(),
                        sorting: Some(Sorting::new(SortingType::Measure, SortingOrder::Desc)),
                    },
                    color: segment_color(DEFAULT_PALETTE, segment),
                    animation: None,
                },
            })
        }
        ChartType::Table => ChartConfig::Table(TableConfig {
            common,
            fields: table_columns(dimensions, measures),
            settings: TableSettings::default(),
            sorting: Vec::new(),
        }),
        ChartType::Map => ChartConfig::Map(MapConfig {
            common,
            fields: map_fields(&picker)?,
        }),
        ChartType::ComboLineSingle => {
            let first = picker.first_measure()?;
            let ids: Vec<String> = numerical_measures(measures)
                .filter(|m| m.unit == first.unit)
                .map(|m| m.id.clone())
                .collect();
            ChartConfig::ComboLineSingle(ComboLineSingleConfig {
                common,
                fields: ComboLineSingleFields {
                    x: GenericField::new(&picker.required_temporal()?.id),
                    color: ColorField::measures(DEFAULT_PALETTE, ids.iter().map(String::as_str)),
                    y: ComboLineSingleY { component_ids: ids },
                },
            })
        }
        ChartType::ComboLineDual => {
            let (left, right) = picker.measure_pair()?;
            ChartConfig::ComboLineDual(ComboLineDualConfig {
                common,
                fields: ComboLineDualFields {
                    x: GenericField::new(&picker.required_temporal()?.id),
                    y: ComboLineDualY {
                        left_axis_component_id: left.id.clone(),
                        right_axis_component_id: right.id.clone(),
                    },
                    color: ColorField::measures(DEFAULT_PALETTE, [left.id.as_str(), right.id.as_str()]),
                },
            })
        }
        ChartType::ComboLineColumn => {
            let (column, line) = picker.measure_pair()?;
            ChartConfig::ComboLineColumn(ComboLineColumnConfig {
                common,
                fields: ComboLineColumnFields {
                    x: GenericField::new(&picker.required_temporal()?.id),
                    y: ComboLineColumnY {
                        line_component_id: line.id.clone(),
                        line_axis_orientation: AxisOrientation::Right,
                        column_component_id: column.id.clone(),
                    },
                    color: ColorField::measures(
                        DEFAULT_PALETTE,
                        [column.id.as_str(), line.id.as_str()],
                    ),
                },
            })
        }
    };

    Ok(chart)
}

/// A segment color keyed by the dimension's values
pub fn segment_color(palette_id: &str, dimension: &Dimension) -> ColorField {
    ColorField::segment(palette_id, dimension.values.iter().map(|v| v.value.as_str()))
}

fn map_fields(picker: &Picker<'_>) -> ConfigResult<MapFields> {
    let measure = numerical_measures(picker.measures).next();

    if let Some(shapes) = picker.dimensions.iter().find(|d| d.component_type.is_geo_shapes()) {
        let color = match measure {
            Some(m) => LayerColor::Numerical {
                component_id: m.id.clone(),
                palette_id: DEFAULT_SEQUENTIAL_PALETTE.to_string(),
                scale_type: ColorScaleType::Continuous,
                opacity: DEFAULT_LAYER_OPACITY,
            },
            None => fixed_color(),
        };
        return Ok(MapFields {
            base_layer: BaseLayer::default(),
            area_layer: Some(AreaLayer {
                component_id: shapes.id.clone(),
                color,
            }),
            symbol_layer: None,
            animation: None,
        });
    }

    let place = picker
        .dimensions
        .iter()
        .find(|d| d.component_type.is_geo())
        .ok_or_else(|| picker.missing("a geographic dimension"))?;
    let measure = measure.ok_or_else(|| picker.missing("a numerical measure"))?;
    Ok(MapFields {
        base_layer: BaseLayer::default(),
        area_layer: None,
        symbol_layer: Some(SymbolLayer {
            component_id: place.id.clone(),
            measure_id: measure.id.clone(),
            color: fixed_color(),
        }),
        animation: None,
    })
}

/// The fixed color of a new map layer
pub fn fixed_color() -> LayerColor {
    LayerColor::Fixed {
        value: DEFAULT_SYMBOL_COLOR.to_string(),
        opacity: DEFAULT_LAYER_OPACITY,
    }
}

fn table_columns(dimensions: &[Dimension], measures: &[Measure]) -> BTreeMap<String, TableColumn> {
    let components = dimensions
        .iter()
        .map(|d| (&d.id, d.component_type))
        .chain(measures.iter().map(|m| (&m.id, m.component_type)));

    components
        .enumerate()
        .map(|(index, (id, component_type))| {
            let column = TableColumn {
                component_id: id.clone(),
                component_type,
                index: index as u32,
                is_group: false,
                is_hidden: false,
                column_style: ColumnStyle::default(),
            };
            (id.clone(), column)
        })
        .collect()
}

struct Picker<'a> {
    chart_type: ChartType,
    dimensions: &'a [Dimension],
    measures: &'a [Measure],
}

impl<'a> Picker<'a> {
    fn missing(&self, requirement: &'static str) -> ConfigError {
        ConfigError::MissingComponent {
            chart_type: self.chart_type,
            requirement,
        }
    }

    fn temporal(&self) -> Option<&'a Dimension> {
        self.dimensions.iter().find(|d| d.component_type.is_temporal())
    }

    fn required_temporal(&self) -> ConfigResult<&'a Dimension> {
        self.temporal()
            .ok_or_else(|| self.missing("a temporal dimension"))
    }

    fn segment_eligible(&self) -> Option<&'a Dimension> {
        self.dimensions
            .iter()
            .find(|d| d.component_type.is_segment_eligible())
    }

    fn first_measure(&self) -> ConfigResult<&'a Measure> {
        numerical_measures(self.measures)
            .next()
            .ok_or_else(|| self.missing("a numerical measure"))
    }

    /// The first measure and the first one with a different unit
    fn measure_pair(&self) -> ConfigResult<(&'a Measure, &'a Measure)> {
        let first = self.first_measure()?;
        let other = measure_with_other_unit(self.measures, first.unit.as_deref(), &first.id, None)
            .ok_or_else(|| self.missing("two measures with different units"))?;
        Ok((first, other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComponentType, ScaleType, CHART_CONFIG_VERSION};

    fn catalog() -> (Vec<Dimension>, Vec<Measure>) {
        (
            vec![
                Dimension::new("canton", ComponentType::NominalDimension).with_values(["ZH", "BE"]),
                Dimension::new("year", ComponentType::TemporalDimension),
                Dimension::new("municipality", ComponentType::GeoShapesDimension),
            ],
            vec![
                Measure::new("amount").with_unit("t").with_scale_type(ScaleType::Ratio),
                Measure::new("share").with_unit("%"),
                Measure::new("weight").with_unit("t"),
            ],
        )
    }

    fn options() -> InitialConfigOptions {
        InitialConfigOptions::new("chart-1", vec![Cube::new("https://cube/1")])
    }

    #[test]
    fn column_prefers_temporal_x() {
        let (dims, measures) = catalog();
        let chart = initial_config(ChartType::Column, &options(), &dims, &measures).unwrap();

        match chart {
            ChartConfig::Column(c) => {
                assert_eq!(c.fields.x.component_id, "year");
                assert_eq!(c.fields.y.component_id, "amount");
                assert_eq!(c.common.key, "chart-1");
                assert_eq!(c.common.version, CHART_CONFIG_VERSION);
            }
            other => panic!("expected column, got {}", other.chart_type()),
        }
    }

    #[test]
    fn pie_segments_by_first_categorical_dimension() {
        let (dims, measures) = catalog();
        let chart = initial_config(ChartType::Pie, &options(), &dims, &measures).unwrap();

        let ChartConfig::Pie(pie) = chart else {
            panic!("expected pie");
        };
        assert_eq!(pie.fields.segment.component_id, "canton");
        match pie.fields.color {
            ColorField::Segment { color_mapping, .. } => {
                assert_eq!(color_mapping.len(), 2);
                assert!(color_mapping.contains_key("ZH"));
            }
            other => panic!("unexpected color {:?}", other),
        }
    }

    #[test]
    fn combo_single_groups_measures_sharing_a_unit() {
        let (dims, measures) = catalog();
        let chart = initial_config(ChartType::ComboLineSingle, &options(), &dims, &measures).unwrap();

        let ChartConfig::ComboLineSingle(combo) = chart else {
            panic!("expected comboLineSingle");
        };
        assert_eq!(combo.fields.y.component_ids, vec!["amount", "weight"]);
    }

    #[test]
    fn combo_dual_needs_two_units() {
        let (dims, _) = catalog();
        let measures = vec![Measure::new("a").with_unit("t"), Measure::new("b").with_unit("t")];

        let err = initial_config(ChartType::ComboLineDual, &options(), &dims, &measures).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingComponent { chart_type: ChartType::ComboLineDual, .. }
        ));
    }

    #[test]
    fn line_without_temporal_dimension_fails() {
        let dims = vec![Dimension::new("canton", ComponentType::NominalDimension)];
        let measures = vec![Measure::new("amount")];

        let err = initial_config(ChartType::Line, &options(), &dims, &measures).unwrap_err();
        assert_eq!(err.to_string(), "line chart needs a temporal dimension");
    }

    #[test]
    fn map_prefers_area_layer_on_shapes() {
        let (dims, measures) = catalog();
        let chart = initial_config(ChartType::Map, &options(), &dims, &measures).unwrap();

        let ChartConfig::Map(map) = chart else {
            panic!("expected map");
        };
        let area = map.fields.area_layer.unwrap();
        assert_eq!(area.component_id, "municipality");
        assert!(matches!(area.color, LayerColor::Numerical { ref component_id, .. } if component_id == "amount"));
        assert!(map.fields.symbol_layer.is_none());
    }

    #[test]
    fn table_has_one_column_per_component_in_catalog_order() {
        let (dims, measures) = catalog();
        let chart = initial_config(ChartType::Table, &options(), &dims, &measures).unwrap();

        let ChartConfig::Table(table) = chart else {
            panic!("expected table");
        };
        assert_eq!(table.fields.len(), 6);
        assert_eq!(table.fields["canton"].index, 0);
        assert_eq!(table.fields["weight"].index, 5);
        assert_eq!(table.fields["amount"].component_type, ComponentType::NumericalMeasure);
    }
}
