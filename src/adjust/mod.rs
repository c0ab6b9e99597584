//! Field adjuster engine
//!
//! Switching a chart to another type builds the default configuration of the
//! new type, then walks the old configuration and lets the new type's
//! adjuster table graft every compatible value onto it. Values without an
//! analog in the new type are dropped.

mod context;
mod overrides;
mod path;
mod report;
mod shared;
mod tables;
mod walker;


pub use context::{AdjustContext, Adjustable, Adjuster};
pub use overrides::{path_override, PathOverride};
pub use path::{is_leaf, FieldPath};
pub use report::{AdjustEntry, AdjustOutcome, AdjustReport};

use crate::config::{ChartConfig, ChartType, ConfigResult, Dimension, Measure};
use crate::defaults::{initial_config, InitialConfigOptions};
use serde_json::Value;
use tracing::debug;
use walker::Walker;

/// Options of a chart type switch
#[derive(Debug, Clone, Default)]
pub struct AdjustOptions {
    /// A cube is being added in the same edit
    pub is_adding_new_cube: bool,
}

impl AdjustOptions {
    pub fn with_adding_new_cube(mut self, adding: bool) -> Self {
        self.is_adding_new_cube = adding;
        self
    }
}

/// Switch `old` to `chart_type`, keeping whatever carries over.
///
/// Fails only when the catalog cannot fill the new type's required slots.
pub fn adjust_chart_type(
    old: &ChartConfig,
    chart_type: ChartType,
    dimensions: &[Dimension],
    measures: &[Measure],
    options: &AdjustOptions,
) -> ConfigResult<ChartConfig> {
    adjust_chart_type_with_report(old, chart_type, dimensions, measures, options)
        .map(|(chart, _)| chart)
}

/// Like [`adjust_chart_type`], also reporting what happened to each old path.
pub fn adjust_chart_type_with_report(
    old: &ChartConfig,
    chart_type: ChartType,
    dimensions: &[Dimension],
    measures: &[Measure],
    options: &AdjustOptions,
) -> ConfigResult<(ChartConfig, AdjustReport)> {
    if old.chart_type() == chart_type {
        return Ok((old.clone(), AdjustReport::default()));
    }

    let initial = initial_config(
        chart_type,
        &InitialConfigOptions::from_chart(old),
        dimensions,
        measures,
    )?;
    let tree = serde_json::to_value(old)?;
    let walker = Walker::new(
        old,
        chart_type,
        dimensions,
        measures,
        options.is_adding_new_cube,
    );

    let (chart, report) = match initial {
        ChartConfig::Column(c) => graft(c, walker, &tree),
        ChartConfig::Bar(c) => graft(c, walker, &tree),
        ChartConfig::Line(c) => graft(c, walker, &tree),
        ChartConfig::Area(c) => graft(c, walker, &tree),
        ChartConfig::Scatterplot(c) => graft(c, walker, &tree),
        ChartConfig::Pie(c) => graft(c, walker, &tree),
        ChartConfig::Table(c) => graft(c, walker, &tree),
        ChartConfig::Map(c) => graft(c, walker, &tree),
        ChartConfig::ComboLineSingle(c) => graft(c, walker, &tree),
        ChartConfig::ComboLineDual(c) => graft(c, walker, &tree),
        ChartConfig::ComboLineColumn(c) => graft(c, walker, &tree),
    };

    debug!(
        from = %old.chart_type(),
        to = %chart_type,
        adjusted = report.adjusted().count(),
        dropped = report.dropped().count(),
        "chart type changed"
    );
    Ok((chart, report))
}

fn graft<C: Adjustable>(chart: C, walker: Walker<'_>, tree: &Value) -> (ChartConfig, AdjustReport) {
    let (chart, report) = walker.run(chart, tree);
    (chart.into_chart(), report)
}
