//! Encoding field types shared across chart types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Palette used when nothing else is known.
pub const DEFAULT_PALETTE: &str = "category10";

/// Colors of [`DEFAULT_PALETTE`], assigned in order and cycled.
pub const DEFAULT_PALETTE_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Fixed symbol color of a freshly created map symbol layer.
pub const DEFAULT_SYMBOL_COLOR: &str = "#1f77b4";

/// A plain encoding slot pointing at one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenericField {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_abbreviations: Option<bool>,
}

impl GenericField {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            use_abbreviations: None,
        }
    }
}

/// A dimension axis that can be sorted (column x, bar y)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortedField {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<Sorting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_abbreviations: Option<bool>,
}

impl SortedField {
    pub fn new(component_id: impl Into<String>, sorting: Sorting) -> Self {
        Self {
            component_id: component_id.into(),
            sorting: Some(sorting),
            use_abbreviations: None,
        }
    }
}

/// A measure axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeasureField {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_values: Option<bool>,
}

impl MeasureField {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            show_values: None,
        }
    }
}

/// How missing observations of an area chart are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ImputationType {
    None,
    Zeros,
    Linear,
}

/// The measure axis of an area chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaMeasureField {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_values: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imputation_type: Option<ImputationType>,
}

impl AreaMeasureField {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            show_values: None,
            imputation_type: Some(ImputationType::None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SortingType {
    #[serde(rename = "byAuto")]
    Auto,
    #[serde(rename = "byDimensionLabel")]
    DimensionLabel,
    #[serde(rename = "byMeasure")]
    Measure,
    #[serde(rename = "byTotalSize")]
    TotalSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortingOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sorting {
    pub sorting_type: SortingType,
    pub sorting_order: SortingOrder,
}

impl Sorting {
    pub fn new(sorting_type: SortingType, sorting_order: SortingOrder) -> Self {
        Self {
            sorting_type,
            sorting_order,
        }
    }

    pub fn asc(sorting_type: SortingType) -> Self {
        Self::new(sorting_type, SortingOrder::Asc)
    }
}

/// Sorting types a field accepts, plus the one substituted for anything else.
#[derive(Debug, Clone, Copy)]
pub struct SortingOptions {
    pub accepted: &'static [SortingType],
    pub default: SortingType,
}

impl SortingOptions {
    pub const fn new(accepted: &'static [SortingType], default: SortingType) -> Self {
        Self { accepted, default }
    }

    pub fn accepts(&self, sorting_type: SortingType) -> bool {
        self.accepted.contains(&sorting_type)
    }

    /// Keep `old` if its type is accepted, otherwise fall back to the default
    /// type while preserving the order.
    pub fn adjust(&self, old: Option<Sorting>) -> Sorting {
        match old {
            Some(sorting) if self.accepts(sorting.sorting_type) => sorting,
            Some(sorting) => Sorting::new(self.default, sorting.sorting_order),
            None => Sorting::asc(self.default),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum StackingType {
    Stacked,
    Grouped,
}

impl StackingType {
    /// Grouped unless the measure on the value axis is stackable.
    pub fn for_measure(measure: Option<&crate::config::Measure>) -> Self {
        if measure.is_some_and(|m| m.is_stackable()) {
            Self::Stacked
        } else {
            Self::Grouped
        }
    }
}

/// Segment of a column or bar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StackedSegmentField {
    pub component_id: String,
    #[serde(rename = "type")]
    pub stacking: StackingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<Sorting>,
}

/// Segment of every other segmentable chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SegmentField {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<Sorting>,
}

/// Color encoding of non-map charts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColorField {
    #[serde(rename_all = "camelCase")]
    Single { palette_id: String, color: String },
    #[serde(rename_all = "camelCase")]
    Segment {
        palette_id: String,
        color_mapping: BTreeMap<String, String>,
    },
    #[serde(rename_all = "camelCase")]
    Measures {
        palette_id: String,
        color_mapping: BTreeMap<String, String>,
    },
}

impl ColorField {
    pub fn single(palette_id: impl Into<String>) -> Self {
        let palette_id = palette_id.into();
        Self::Single {
            color: palette_color(&palette_id, 0),
            palette_id,
        }
    }

    pub fn segment<'a>(palette_id: impl Into<String>, values: impl IntoIterator<Item = &'a str>) -> Self {
        let palette_id = palette_id.into();
        Self::Segment {
            color_mapping: color_mapping(&palette_id, values),
            palette_id,
        }
    }

    pub fn measures<'a>(palette_id: impl Into<String>, ids: impl IntoIterator<Item = &'a str>) -> Self {
        let palette_id = palette_id.into();
        Self::Measures {
            color_mapping: color_mapping(&palette_id, ids),
            palette_id,
        }
    }

    pub fn palette_id(&self) -> &str {
        match self {
            Self::Single { palette_id, .. }
            | Self::Segment { palette_id, .. }
            | Self::Measures { palette_id, .. } => palette_id,
        }
    }

    /// Switch palette, reassigning mapped colors from the new palette.
    pub fn with_palette(self, palette: &str) -> Self {
        match self {
            Self::Single { color, .. } => Self::Single {
                palette_id: palette.to_string(),
                color,
            },
            Self::Segment { color_mapping, .. } => {
                Self::segment(palette, color_mapping.keys().map(String::as_str))
            }
            Self::Measures { color_mapping, .. } => {
                Self::measures(palette, color_mapping.keys().map(String::as_str))
            }
        }
    }
}

/// The color a palette assigns to the `index`-th value.
///
/// Palettes other than the default are resolved by the renderer; their
/// mappings are seeded from the default palette.
pub fn palette_color(_palette_id: &str, index: usize) -> String {
    DEFAULT_PALETTE_COLORS[index % DEFAULT_PALETTE_COLORS.len()].to_string()
}

fn color_mapping<'a>(palette_id: &str, keys: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, String> {
    keys.into_iter()
        .enumerate()
        .map(|(i, key)| (key.to_string(), palette_color(palette_id, i)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AnimationType {
    Continuous,
    Stepped,
}

/// Animation over a temporal dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimationField {
    pub component_id: String,
    pub show_play_button: bool,
    pub duration: u32,
    #[serde(rename = "type")]
    pub animation_type: AnimationType,
    pub dynamic_scales: bool,
}

impl AnimationField {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            show_play_button: true,
            duration: 30,
            animation_type: AnimationType::Continuous,
            dynamic_scales: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AxisOrientation {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseLayer {
    pub show: bool,
    pub locked: bool,
}

impl Default for BaseLayer {
    fn default() -> Self {
        Self {
            show: true,
            locked: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ColorScaleType {
    Continuous,
    Discrete,
}

/// Color of a map layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayerColor {
    #[serde(rename_all = "camelCase")]
    Fixed { value: String, opacity: u8 },
    #[serde(rename_all = "camelCase")]
    Categorical {
        component_id: String,
        palette_id: String,
        color_mapping: BTreeMap<String, String>,
        opacity: u8,
    },
    #[serde(rename_all = "camelCase")]
    Numerical {
        component_id: String,
        palette_id: String,
        scale_type: ColorScaleType,
        opacity: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaLayer {
    pub component_id: String,
    pub color: LayerColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolLayer {
    pub component_id: String,
    pub measure_id: String,
    pub color: LayerColor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorting_outside_accepted_set_falls_back_to_default() {
        let options = SortingOptions::new(
            &[SortingType::Auto, SortingType::DimensionLabel, SortingType::TotalSize],
            SortingType::TotalSize,
        );

        let adjusted = options.adjust(Some(Sorting::new(SortingType::Measure, SortingOrder::Desc)));
        assert_eq!(adjusted, Sorting::new(SortingType::TotalSize, SortingOrder::Desc));

        let kept = Sorting::new(SortingType::DimensionLabel, SortingOrder::Asc);
        assert_eq!(options.adjust(Some(kept)), kept);
        assert_eq!(options.adjust(None), Sorting::asc(SortingType::TotalSize));
    }

    #[test]
    fn color_field_is_tagged_by_type() {
        let color = ColorField::segment(DEFAULT_PALETTE, ["a", "b"]);
        let value = serde_json::to_value(&color).unwrap();
        assert_eq!(value["type"], "segment");
        assert_eq!(value["paletteId"], DEFAULT_PALETTE);
        assert_eq!(value["colorMapping"]["b"], DEFAULT_PALETTE_COLORS[1]);
    }

    #[test]
    fn sorting_types_use_wire_names() {
        let sorting: Sorting = serde_json::from_value(json!({
            "sortingType": "byTotalSize",
            "sortingOrder": "desc"
        }))
        .unwrap();
        assert_eq!(sorting.sorting_type, SortingType::TotalSize);
        assert_eq!(sorting.sorting_order, SortingOrder::Desc);
    }

    #[test]
    fn palette_switch_remaps_colors() {
        let color = ColorField::Measures {
            palette_id: "old".to_string(),
            color_mapping: BTreeMap::from([("m1".to_string(), "#000000".to_string())]),
        };
        let switched = color.with_palette("accent");
        assert_eq!(switched.palette_id(), "accent");
        match switched {
            ColorField::Measures { color_mapping, .. } => {
                assert_eq!(color_mapping["m1"], DEFAULT_PALETTE_COLORS[0]);
            }
            other => panic!("unexpected color: {:?}", other),
        }
    }
}
