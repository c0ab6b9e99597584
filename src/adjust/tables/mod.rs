//! Per chart type adjuster tables

mod cartesian;
mod combo;
mod map;
mod table;

use crate::config::{SortingOptions, SortingType};

/// Column `x` and bar `y`
const SORTED_AXIS: SortingOptions = SortingOptions::new(
    &[SortingType::Auto, SortingType::DimensionLabel, SortingType::Measure],
    SortingType::Auto,
);

/// Column and bar segments
const STACKED_SEGMENT: SortingOptions = SortingOptions::new(
    &[SortingType::Auto, SortingType::DimensionLabel, SortingType::TotalSize],
    SortingType::TotalSize,
);

const LINE_SEGMENT: SortingOptions = SortingOptions::new(
    &[SortingType::Auto, SortingType::DimensionLabel],
    SortingType::Auto,
);

const AREA_SEGMENT: SortingOptions = SortingOptions::new(
    &[SortingType::Auto, SortingType::DimensionLabel, SortingType::TotalSize],
    SortingType::Auto,
);

const SCATTER_SEGMENT: SortingOptions = SortingOptions::new(
    &[SortingType::Auto, SortingType::DimensionLabel],
    SortingType::Auto,
);

const PIE_SEGMENT: SortingOptions = SortingOptions::new(
    &[SortingType::Auto, SortingType::DimensionLabel, SortingType::Measure],
    SortingType::Measure,
);
