use super::path::FieldPath;
use crate::config::{find_dimension, find_measure, ChartConfig, ChartShape, Dimension, Measure};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Everything an adjuster may read. Nothing in here is ever mutated.
#[derive(Debug, Clone, Copy)]
pub struct AdjustContext<'a> {
    pub old_value: &'a Value,
    pub old_chart: &'a ChartConfig,
    pub dimensions: &'a [Dimension],
    pub measures: &'a [Measure],
    pub is_adding_new_cube: bool,
}

impl<'a> AdjustContext<'a> {
    pub fn old_str(&self) -> Option<&'a str> {
        self.old_value.as_str()
    }

    pub fn old_bool(&self) -> Option<bool> {
        self.old_value.as_bool()
    }

    /// Decode the old value, or `None` when its shape does not fit.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.old_value.clone()).ok()
    }

    pub fn dimension(&self, id: &str) -> Option<&'a Dimension> {
        find_dimension(self.dimensions, id)
    }

    pub fn measure(&self, id: &str) -> Option<&'a Measure> {
        find_measure(self.measures, id)
    }

    /// The dimension the old value names
    pub fn old_dimension(&self) -> Option<&'a Dimension> {
        self.old_str().and_then(|id| self.dimension(id))
    }

    pub fn old_temporal_dimension(&self) -> Option<&'a Dimension> {
        self.old_dimension()
            .filter(|d| d.component_type.is_temporal())
    }

    /// The numerical measure the old value names
    pub fn old_measure(&self) -> Option<&'a Measure> {
        self.old_str()
            .and_then(|id| self.measure(id))
            .filter(|m| m.component_type.is_numerical_measure())
    }

    /// Palette of the old chart's color, if it had one
    pub fn old_palette(&self) -> Option<&'a str> {
        self.old_chart.color().map(|c| c.palette_id())
    }

    /// Iri of the most recently added cube
    pub fn newest_cube(&self) -> Option<&'a str> {
        self.old_chart.common().cubes.last().map(|c| c.iri.as_str())
    }
}

/// Grafts one old value onto the configuration being built.
pub type Adjuster<C> = fn(C, &AdjustContext<'_>) -> C;

/// A chart shape with an adjuster table.
///
/// Implementations match every [`FieldPath`] without a wildcard arm: a path
/// with no analog in the shape returns `None` and is dropped on purpose.
pub trait Adjustable: ChartShape {
    fn adjuster(path: FieldPath) -> Option<Adjuster<Self>>;
}
