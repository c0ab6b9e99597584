//! Typed chart configuration model and component catalog

mod chart;
mod common;
mod component;
mod fields;

#[cfg(test)]
mod tests;

/// Chart configuration schema version produced by this crate
pub const CHART_CONFIG_VERSION: &str = "4.1.0";

pub use chart::{
    AreaConfig, AreaFields, BarConfig, BarFields, ChartConfig, ChartShape, ChartType,
    ColumnConfig, ColumnFields, ColumnStyle, ComboLineColumnConfig, ComboLineColumnFields,
    ComboLineColumnY, ComboLineDualConfig, ComboLineDualFields, ComboLineDualY,
    ComboLineSingleConfig, ComboLineSingleFields, ComboLineSingleY, ConfigError, ConfigResult,
    LineConfig, LineFields, MapConfig, MapFields, PieConfig, PieFields, ScatterplotConfig,
    ScatterplotFields, TableColumn, TableConfig, TableSettings, TableSortingOption, TextStyle,
};
pub use common::{
    CalculationFilter, CalculationType, ChartCommon, Cube, DataFilters, Filter,
    InteractiveFiltersConfig, LegendFilter, Limit, LineType, Localized, Meta, RelatedDimension,
    TimeRangeFilter, TimeRangePresets,
};
pub use component::{
    find_dimension, find_measure, measure_with_other_unit, numerical_measures, ComponentCatalog,
    ComponentType, Dimension, DimensionValue, Measure, ScaleType,
};
pub use fields::{
    palette_color, AnimationField, AnimationType, AreaLayer, AreaMeasureField, AxisOrientation,
    BaseLayer, ColorField, ColorScaleType, GenericField, ImputationType, LayerColor, MeasureField,
    SegmentField, SortedField, Sorting, SortingOptions, SortingOrder, SortingType,
    StackedSegmentField, StackingType, SymbolLayer, DEFAULT_PALETTE, DEFAULT_PALETTE_COLORS,
    DEFAULT_SYMBOL_COLOR,
};
