//! Dimension and measure catalog
//!
//! The catalog is supplied by the data layer and is read-only here: the
//! engine only classifies and filters components, it never mutates them.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Classification tag of a cube component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ComponentType {
    NominalDimension,
    OrdinalDimension,
    TemporalDimension,
    TemporalEntityDimension,
    TemporalOrdinalDimension,
    GeoCoordinatesDimension,
    GeoShapesDimension,
    NumericalMeasure,
    OrdinalMeasure,
}

impl ComponentType {
    pub fn is_measure(&self) -> bool {
        matches!(self, Self::NumericalMeasure | Self::OrdinalMeasure)
    }

    pub fn is_dimension(&self) -> bool {
        !self.is_measure()
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::TemporalDimension | Self::TemporalEntityDimension)
    }

    pub fn is_geo(&self) -> bool {
        matches!(self, Self::GeoCoordinatesDimension | Self::GeoShapesDimension)
    }

    pub fn is_geo_shapes(&self) -> bool {
        matches!(self, Self::GeoShapesDimension)
    }

    pub fn is_numerical_measure(&self) -> bool {
        matches!(self, Self::NumericalMeasure)
    }

    pub fn is_ordinal(&self) -> bool {
        matches!(
            self,
            Self::OrdinalDimension | Self::TemporalOrdinalDimension | Self::OrdinalMeasure
        )
    }

    /// Component types that can drive a segmentation (and therefore a
    /// segment color mapping).
    pub fn is_segment_eligible(&self) -> bool {
        matches!(
            self,
            Self::NominalDimension
                | Self::OrdinalDimension
                | Self::TemporalOrdinalDimension
                | Self::GeoCoordinatesDimension
                | Self::GeoShapesDimension
        )
    }
}

/// Measurement scale of a measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ScaleType {
    Nominal,
    Ordinal,
    Interval,
    Ratio,
}

/// One observed value of a dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DimensionValue {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

impl DimensionValue {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// A dimension of a cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub cube_iri: String,
    pub component_type: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub values: Vec<DimensionValue>,
}

impl Dimension {
    pub fn new(id: impl Into<String>, component_type: ComponentType) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            cube_iri: String::new(),
            component_type,
            unit: None,
            values: Vec::new(),
        }
    }

    pub fn with_cube(mut self, cube_iri: impl Into<String>) -> Self {
        self.cube_iri = cube_iri.into();
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(DimensionValue::new).collect();
        self
    }
}

/// A measure of a cube
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub cube_iri: String,
    pub component_type: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<ScaleType>,
}

impl Measure {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            cube_iri: String::new(),
            component_type: ComponentType::NumericalMeasure,
            unit: None,
            scale_type: None,
        }
    }

    pub fn with_cube(mut self, cube_iri: impl Into<String>) -> Self {
        self.cube_iri = cube_iri.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = Some(scale_type);
        self
    }

    pub fn ordinal(mut self) -> Self {
        self.component_type = ComponentType::OrdinalMeasure;
        self
    }

    /// Stacking values only makes sense on a ratio scale.
    pub fn is_stackable(&self) -> bool {
        self.scale_type == Some(ScaleType::Ratio)
    }
}

/// Dimensions and measures available for one chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentCatalog {
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default)]
    pub measures: Vec<Measure>,
}

impl ComponentCatalog {
    pub fn new(dimensions: Vec<Dimension>, measures: Vec<Measure>) -> Self {
        Self {
            dimensions,
            measures,
        }
    }

    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        find_dimension(&self.dimensions, id)
    }

    pub fn measure(&self, id: &str) -> Option<&Measure> {
        find_measure(&self.measures, id)
    }
}

pub fn find_dimension<'a>(dimensions: &'a [Dimension], id: &str) -> Option<&'a Dimension> {
    dimensions.iter().find(|d| d.id == id)
}

pub fn find_measure<'a>(measures: &'a [Measure], id: &str) -> Option<&'a Measure> {
    measures.iter().find(|m| m.id == id)
}

/// Numerical measures in catalog order
pub fn numerical_measures(measures: &[Measure]) -> impl Iterator<Item = &Measure> {
    measures
        .iter()
        .filter(|m| m.component_type.is_numerical_measure())
}

/// First numerical measure whose unit differs from `unit`.
///
/// With `prefer_cube`, measures of that cube are tried first.
pub fn measure_with_other_unit<'a>(
    measures: &'a [Measure],
    unit: Option<&str>,
    exclude: &str,
    prefer_cube: Option<&str>,
) -> Option<&'a Measure> {
    let candidates = || {
        numerical_measures(measures).filter(move |m| m.id != exclude && m.unit.as_deref() != unit)
    };
    prefer_cube
        .and_then(|cube| candidates().find(|m| m.cube_iri == cube))
        .or_else(|| candidates().next())
}
