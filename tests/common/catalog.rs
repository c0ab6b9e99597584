use chartconf::config::{ComponentCatalog, ComponentType, Dimension, Measure, ScaleType};

/// Versioned iri of the fixture cube
pub const CUBE: &str = "https://env.example/ubd/28/2";
pub const UNVERSIONED_CUBE: &str = "https://env.example/ubd/28";

pub fn dimensions() -> Vec<Dimension> {
    vec![
        Dimension::new("year", ComponentType::TemporalDimension).with_cube(CUBE),
        Dimension::new("canton", ComponentType::NominalDimension)
            .with_cube(CUBE)
            .with_values(["ZH", "BE", "GE"]),
        Dimension::new("fuel", ComponentType::OrdinalDimension)
            .with_cube(CUBE)
            .with_values(["oil", "gas", "wood"]),
        Dimension::new("municipality", ComponentType::GeoShapesDimension).with_cube(CUBE),
        Dimension::new("station", ComponentType::GeoCoordinatesDimension).with_cube(CUBE),
    ]
}

/// One measure per scale type, with distinct units
pub fn measures() -> Vec<Measure> {
    vec![
        Measure::new("amount")
            .with_cube(CUBE)
            .with_unit("t")
            .with_scale_type(ScaleType::Ratio),
        Measure::new("price")
            .with_cube(CUBE)
            .with_unit("CHF")
            .with_scale_type(ScaleType::Interval),
        Measure::new("rank")
            .with_cube(CUBE)
            .with_unit("position")
            .with_scale_type(ScaleType::Ordinal),
        Measure::new("category")
            .with_cube(CUBE)
            .with_unit("code")
            .with_scale_type(ScaleType::Nominal),
    ]
}

pub fn catalog() -> ComponentCatalog {
    ComponentCatalog::new(dimensions(), measures())
}
