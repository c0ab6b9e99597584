//! The chart configuration tagged union
//!
//! `chartType` selects the shape of `fields`; every variant carries the same
//! [`ChartCommon`] part flattened next to its fields.

use super::common::ChartCommon;
use super::component::ComponentType;
use super::fields::{
    AnimationField, AreaLayer, AreaMeasureField, AxisOrientation, BaseLayer, ColorField,
    GenericField, MeasureField, SegmentField, SortedField, StackedSegmentField, StackingType,
    SymbolLayer,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building chart configurations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{chart_type} chart needs {requirement}")]
    MissingComponent {
        chart_type: ChartType,
        requirement: &'static str,
    },

    #[error("Unknown chart type: {0}")]
    UnknownChartType(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// The chart type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Column,
    Bar,
    Line,
    Area,
    Scatterplot,
    Pie,
    Table,
    Map,
    ComboLineSingle,
    ComboLineDual,
    ComboLineColumn,
}

impl ChartType {
    pub const ALL: [ChartType; 11] = [
        Self::Column,
        Self::Bar,
        Self::Line,
        Self::Area,
        Self::Scatterplot,
        Self::Pie,
        Self::Table,
        Self::Map,
        Self::ComboLineSingle,
        Self::ComboLineDual,
        Self::ComboLineColumn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Scatterplot => "scatterplot",
            Self::Pie => "pie",
            Self::Table => "table",
            Self::Map => "map",
            Self::ComboLineSingle => "comboLineSingle",
            Self::ComboLineDual => "comboLineDual",
            Self::ComboLineColumn => "comboLineColumn",
        }
    }

    pub fn supports_segment(&self) -> bool {
        matches!(
            self,
            Self::Column | Self::Bar | Self::Line | Self::Area | Self::Scatterplot | Self::Pie
        )
    }

    pub fn supports_animation(&self) -> bool {
        matches!(
            self,
            Self::Column | Self::Bar | Self::Scatterplot | Self::Pie | Self::Map
        )
    }

    pub fn supports_limits(&self) -> bool {
        matches!(self, Self::Column | Self::Bar | Self::Line | Self::Area)
    }

    pub fn is_combo(&self) -> bool {
        matches!(
            self,
            Self::ComboLineSingle | Self::ComboLineDual | Self::ComboLineColumn
        )
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownChartType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Per chart type shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFields {
    pub x: SortedField,
    pub y: MeasureField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<StackedSegmentField>,
    pub color: ColorField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationField>,
}

/// Horizontal bars: the measure is on `x`, the sorted dimension on `y`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarFields {
    pub x: MeasureField,
    pub y: SortedField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<StackedSegmentField>,
    pub color: ColorField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineFields {
    pub x: GenericField,
    pub y: MeasureField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    pub color: ColorField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaFields {
    pub x: GenericField,
    pub y: AreaMeasureField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    pub color: ColorField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScatterplotFields {
    pub x: GenericField,
    pub y: GenericField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    pub color: ColorField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PieFields {
    pub y: MeasureField,
    pub segment: SegmentField,
    pub color: ColorField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationField>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum TextStyle {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColumnStyle {
    #[serde(rename_all = "camelCase")]
    Text {
        text_style: TextStyle,
        text_color: String,
        column_color: String,
    },
    #[serde(rename_all = "camelCase")]
    Category {
        text_style: TextStyle,
        palette_id: String,
        color_mapping: BTreeMap<String, String>,
    },
    #[serde(rename_all = "camelCase")]
    Heatmap {
        text_style: TextStyle,
        palette_id: String,
    },
}

impl Default for ColumnStyle {
    fn default() -> Self {
        Self::Text {
            text_style: TextStyle::Regular,
            text_color: "#000".to_string(),
            column_color: "#fff".to_string(),
        }
    }
}

/// One column of a table chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub component_id: String,
    pub component_type: ComponentType,
    pub index: u32,
    pub is_group: bool,
    pub is_hidden: bool,
    #[serde(default)]
    pub column_style: ColumnStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings {
    pub show_search: bool,
    pub show_all_rows: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            show_search: true,
            show_all_rows: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableSortingOption {
    pub component_id: String,
    pub component_type: ComponentType,
    pub sorting_order: super::fields::SortingOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapFields {
    #[serde(default)]
    pub base_layer: BaseLayer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_layer: Option<AreaLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_layer: Option<SymbolLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComboLineSingleY {
    pub component_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComboLineSingleFields {
    pub x: GenericField,
    pub y: ComboLineSingleY,
    pub color: ColorField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComboLineDualY {
    pub left_axis_component_id: String,
    pub right_axis_component_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComboLineDualFields {
    pub x: GenericField,
    pub y: ComboLineDualY,
    pub color: ColorField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComboLineColumnY {
    pub line_component_id: String,
    pub line_axis_orientation: AxisOrientation,
    pub column_component_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComboLineColumnFields {
    pub x: GenericField,
    pub y: ComboLineColumnY,
    pub color: ColorField,
}

macro_rules! chart_structs {
    ($($name:ident { $($field:ident : $ty:ty),* $(,)? }),* $(,)?) => {
        $(
            #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
            #[serde(rename_all = "camelCase")]
            pub struct $name {
                #[serde(flatten)]
                pub common: ChartCommon,
                $(pub $field: $ty,)*
            }
        )*
    };
}

chart_structs! {
    ColumnConfig { fields: ColumnFields },
    BarConfig { fields: BarFields },
    LineConfig { fields: LineFields },
    AreaConfig { fields: AreaFields },
    ScatterplotConfig { fields: ScatterplotFields },
    PieConfig { fields: PieFields },
    TableConfig {
        fields: BTreeMap<String, TableColumn>,
        settings: TableSettings,
        sorting: Vec<TableSortingOption>,
    },
    MapConfig { fields: MapFields },
    ComboLineSingleConfig { fields: ComboLineSingleFields },
    ComboLineDualConfig { fields: ComboLineDualFields },
    ComboLineColumnConfig { fields: ComboLineColumnFields },
}

/// Read access shared by every concrete chart shape.
///
/// The adjuster tables are written against concrete shapes; this trait gives
/// the shared adjusters one way to reach the common part and the encodings.
pub trait ChartShape: Sized + Clone {
    const CHART_TYPE: ChartType;

    fn common(&self) -> &ChartCommon;

    fn common_mut(&mut self) -> &mut ChartCommon;

    /// Every component id currently bound to an encoding slot
    fn encoded_component_ids(&self) -> Vec<&str>;

    /// Component ids bound to a measure axis
    fn measure_axis_ids(&self) -> Vec<&str>;

    fn segment_component_id(&self) -> Option<&str> {
        None
    }

    /// The `x` component when the chart has a dimension `x` axis
    fn x_dimension_id(&self) -> Option<&str> {
        None
    }

    fn supports_percent_calculation(&self) -> bool {
        false
    }

    fn into_chart(self) -> ChartConfig;
}

fn push_opt<'a>(ids: &mut Vec<&'a str>, id: Option<&'a str>) {
    if let Some(id) = id {
        ids.push(id);
    }
}

impl ChartShape for ColumnConfig {
    const CHART_TYPE: ChartType = ChartType::Column;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let f = &self.fields;
        let mut ids = vec![f.x.component_id.as_str(), f.y.component_id.as_str()];
        push_opt(&mut ids, self.segment_component_id());
        push_opt(&mut ids, f.animation.as_ref().map(|a| a.component_id.as_str()));
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        vec![self.fields.y.component_id.as_str()]
    }

    fn segment_component_id(&self) -> Option<&str> {
        self.fields.segment.as_ref().map(|s| s.component_id.as_str())
    }

    fn x_dimension_id(&self) -> Option<&str> {
        Some(&self.fields.x.component_id)
    }

    fn supports_percent_calculation(&self) -> bool {
        self.fields
            .segment
            .as_ref()
            .is_some_and(|s| s.stacking == StackingType::Stacked)
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::Column(self)
    }
}

impl ChartShape for BarConfig {
    const CHART_TYPE: ChartType = ChartType::Bar;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let f = &self.fields;
        let mut ids = vec![f.x.component_id.as_str(), f.y.component_id.as_str()];
        push_opt(&mut ids, self.segment_component_id());
        push_opt(&mut ids, f.animation.as_ref().map(|a| a.component_id.as_str()));
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        vec![self.fields.x.component_id.as_str()]
    }

    fn segment_component_id(&self) -> Option<&str> {
        self.fields.segment.as_ref().map(|s| s.component_id.as_str())
    }

    fn supports_percent_calculation(&self) -> bool {
        self.fields
            .segment
            .as_ref()
            .is_some_and(|s| s.stacking == StackingType::Stacked)
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::Bar(self)
    }
}

impl ChartShape for LineConfig {
    const CHART_TYPE: ChartType = ChartType::Line;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let f = &self.fields;
        let mut ids = vec![f.x.component_id.as_str(), f.y.component_id.as_str()];
        push_opt(&mut ids, self.segment_component_id());
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        vec![self.fields.y.component_id.as_str()]
    }

    fn segment_component_id(&self) -> Option<&str> {
        self.fields.segment.as_ref().map(|s| s.component_id.as_str())
    }

    fn x_dimension_id(&self) -> Option<&str> {
        Some(&self.fields.x.component_id)
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::Line(self)
    }
}

impl ChartShape for AreaConfig {
    const CHART_TYPE: ChartType = ChartType::Area;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let f = &self.fields;
        let mut ids = vec![f.x.component_id.as_str(), f.y.component_id.as_str()];
        push_opt(&mut ids, self.segment_component_id());
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        vec![self.fields.y.component_id.as_str()]
    }

    fn segment_component_id(&self) -> Option<&str> {
        self.fields.segment.as_ref().map(|s| s.component_id.as_str())
    }

    fn x_dimension_id(&self) -> Option<&str> {
        Some(&self.fields.x.component_id)
    }

    fn supports_percent_calculation(&self) -> bool {
        self.fields.segment.is_some()
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::Area(self)
    }
}

impl ChartShape for ScatterplotConfig {
    const CHART_TYPE: ChartType = ChartType::Scatterplot;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let f = &self.fields;
        let mut ids = vec![f.x.component_id.as_str(), f.y.component_id.as_str()];
        push_opt(&mut ids, self.segment_component_id());
        push_opt(&mut ids, f.animation.as_ref().map(|a| a.component_id.as_str()));
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        vec![
            self.fields.x.component_id.as_str(),
            self.fields.y.component_id.as_str(),
        ]
    }

    fn segment_component_id(&self) -> Option<&str> {
        self.fields.segment.as_ref().map(|s| s.component_id.as_str())
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::Scatterplot(self)
    }
}

impl ChartShape for PieConfig {
    const CHART_TYPE: ChartType = ChartType::Pie;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let f = &self.fields;
        let mut ids = vec![f.y.component_id.as_str(), f.segment.component_id.as_str()];
        push_opt(&mut ids, f.animation.as_ref().map(|a| a.component_id.as_str()));
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        vec![self.fields.y.component_id.as_str()]
    }

    fn segment_component_id(&self) -> Option<&str> {
        Some(&self.fields.segment.component_id)
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::Pie(self)
    }
}

impl ChartShape for TableConfig {
    const CHART_TYPE: ChartType = ChartType::Table;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    /// Table columns display components but do not bind them to an axis.
    fn encoded_component_ids(&self) -> Vec<&str> {
        Vec::new()
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        Vec::new()
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::Table(self)
    }
}

impl ChartShape for MapConfig {
    const CHART_TYPE: ChartType = ChartType::Map;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let f = &self.fields;
        let mut ids = Vec::new();
        push_opt(&mut ids, f.area_layer.as_ref().map(|l| l.component_id.as_str()));
        if let Some(layer) = &f.symbol_layer {
            ids.push(layer.component_id.as_str());
            ids.push(layer.measure_id.as_str());
        }
        push_opt(&mut ids, f.animation.as_ref().map(|a| a.component_id.as_str()));
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        push_opt(
            &mut ids,
            self.fields.symbol_layer.as_ref().map(|l| l.measure_id.as_str()),
        );
        ids
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::Map(self)
    }
}

impl ChartShape for ComboLineSingleConfig {
    const CHART_TYPE: ChartType = ChartType::ComboLineSingle;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.fields.x.component_id.as_str()];
        ids.extend(self.measure_axis_ids());
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        self.fields.y.component_ids.iter().map(String::as_str).collect()
    }

    fn x_dimension_id(&self) -> Option<&str> {
        Some(&self.fields.x.component_id)
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::ComboLineSingle(self)
    }
}

impl ChartShape for ComboLineDualConfig {
    const CHART_TYPE: ChartType = ChartType::ComboLineDual;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.fields.x.component_id.as_str()];
        ids.extend(self.measure_axis_ids());
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        vec![
            self.fields.y.left_axis_component_id.as_str(),
            self.fields.y.right_axis_component_id.as_str(),
        ]
    }

    fn x_dimension_id(&self) -> Option<&str> {
        Some(&self.fields.x.component_id)
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::ComboLineDual(self)
    }
}

impl ChartShape for ComboLineColumnConfig {
    const CHART_TYPE: ChartType = ChartType::ComboLineColumn;

    fn common(&self) -> &ChartCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut ChartCommon {
        &mut self.common
    }

    fn encoded_component_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.fields.x.component_id.as_str()];
        ids.extend(self.measure_axis_ids());
        ids
    }

    fn measure_axis_ids(&self) -> Vec<&str> {
        vec![
            self.fields.y.line_component_id.as_str(),
            self.fields.y.column_component_id.as_str(),
        ]
    }

    fn x_dimension_id(&self) -> Option<&str> {
        Some(&self.fields.x.component_id)
    }

    fn into_chart(self) -> ChartConfig {
        ChartConfig::ComboLineColumn(self)
    }
}

// ---------------------------------------------------------------------------
// ChartConfig
// ---------------------------------------------------------------------------

/// A chart configuration, tagged by `chartType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "chartType", rename_all = "camelCase")]
pub enum ChartConfig {
    Column(ColumnConfig),
    Bar(BarConfig),
    Line(LineConfig),
    Area(AreaConfig),
    Scatterplot(ScatterplotConfig),
    Pie(PieConfig),
    Table(TableConfig),
    Map(MapConfig),
    ComboLineSingle(ComboLineSingleConfig),
    ComboLineDual(ComboLineDualConfig),
    ComboLineColumn(ComboLineColumnConfig),
}

/// Run `$body` with `$c` bound to the concrete shape inside `$chart`.
macro_rules! each_chart {
    ($chart:expr, $c:ident => $body:expr) => {
        match $chart {
            ChartConfig::Column($c) => $body,
            ChartConfig::Bar($c) => $body,
            ChartConfig::Line($c) => $body,
            ChartConfig::Area($c) => $body,
            ChartConfig::Scatterplot($c) => $body,
            ChartConfig::Pie($c) => $body,
            ChartConfig::Table($c) => $body,
            ChartConfig::Map($c) => $body,
            ChartConfig::ComboLineSingle($c) => $body,
            ChartConfig::ComboLineDual($c) => $body,
            ChartConfig::ComboLineColumn($c) => $body,
        }
    };
}

impl ChartConfig {
    pub fn chart_type(&self) -> ChartType {
        fn tag<C: ChartShape>(_: &C) -> ChartType {
            C::CHART_TYPE
        }
        each_chart!(self, c => tag(c))
    }

    pub fn common(&self) -> &ChartCommon {
        each_chart!(self, c => c.common())
    }

    pub fn common_mut(&mut self) -> &mut ChartCommon {
        each_chart!(self, c => c.common_mut())
    }

    pub fn key(&self) -> &str {
        &self.common().key
    }

    pub fn encoded_component_ids(&self) -> Vec<&str> {
        each_chart!(self, c => c.encoded_component_ids())
    }

    pub fn measure_axis_ids(&self) -> Vec<&str> {
        each_chart!(self, c => c.measure_axis_ids())
    }

    pub fn segment_component_id(&self) -> Option<&str> {
        each_chart!(self, c => c.segment_component_id())
    }

    pub fn x_dimension_id(&self) -> Option<&str> {
        each_chart!(self, c => c.x_dimension_id())
    }

    pub fn supports_percent_calculation(&self) -> bool {
        each_chart!(self, c => c.supports_percent_calculation())
    }

    /// The color encoding, for chart types that have one
    pub fn color(&self) -> Option<&ColorField> {
        match self {
            Self::Column(c) => Some(&c.fields.color),
            Self::Bar(c) => Some(&c.fields.color),
            Self::Line(c) => Some(&c.fields.color),
            Self::Area(c) => Some(&c.fields.color),
            Self::Scatterplot(c) => Some(&c.fields.color),
            Self::Pie(c) => Some(&c.fields.color),
            Self::ComboLineSingle(c) => Some(&c.fields.color),
            Self::ComboLineDual(c) => Some(&c.fields.color),
            Self::ComboLineColumn(c) => Some(&c.fields.color),
            Self::Table(_) | Self::Map(_) => None,
        }
    }
}
