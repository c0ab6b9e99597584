//! Generic walk over the old configuration tree

use super::context::{AdjustContext, Adjustable};
use super::overrides::path_override;
use super::path::{is_leaf, FieldPath};
use super::report::{AdjustOutcome, AdjustReport};
use crate::config::{ChartConfig, ChartType, Dimension, Measure};
use serde_json::{Map, Value};
use tracing::debug;

/// Top-level branches, in visiting order. Interactive filters come last
/// because their adjusters look at the already adjusted fields.
const BRANCHES: [&str; 4] = ["fields", "cubes", "limits", "interactiveFiltersConfig"];

/// Visiting order inside `fields`; unlisted keys follow in map order.
/// Segment stacking reads the measure axis, color reads the segment.
const FIELD_ORDER: [&str; 8] = [
    "x",
    "y",
    "baseLayer",
    "areaLayer",
    "symbolLayer",
    "animation",
    "segment",
    "color",
];

/// Visiting order inside `fields.y`. Anchor measures come first so the
/// second axis of a combo chart is grafted onto an already anchored pair.
const Y_ORDER: [&str; 6] = [
    "componentId",
    "componentIds",
    "leftAxisComponentId",
    "lineComponentId",
    "rightAxisComponentId",
    "columnComponentId",
];

pub(crate) struct Walker<'a> {
    old_chart: &'a ChartConfig,
    dimensions: &'a [Dimension],
    measures: &'a [Measure],
    is_adding_new_cube: bool,
    source: ChartType,
    target: ChartType,
    report: AdjustReport,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        old_chart: &'a ChartConfig,
        target: ChartType,
        dimensions: &'a [Dimension],
        measures: &'a [Measure],
        is_adding_new_cube: bool,
    ) -> Self {
        Self {
            old_chart,
            dimensions,
            measures,
            is_adding_new_cube,
            source: old_chart.chart_type(),
            target,
            report: AdjustReport::default(),
        }
    }

    /// Graft every branch of `tree` onto `chart`.
    pub(crate) fn run<C: Adjustable>(mut self, mut chart: C, tree: &Value) -> (C, AdjustReport) {
        for branch in BRANCHES {
            if let Some(value) = tree.get(branch) {
                chart = self.visit(chart, branch, value);
            }
        }
        (chart, self.report)
    }

    fn visit<C: Adjustable>(&mut self, chart: C, path: &str, value: &Value) -> C {
        let known = FieldPath::parse(path);

        if let Some(redirect) = known.and_then(|p| path_override(self.target, self.source, p)) {
            let old_value = redirect.transform(value);
            return self.apply(chart, path, redirect.path, &old_value, true);
        }

        if is_leaf(path, value, self.source, self.target) {
            return match known {
                Some(field) => self.apply(chart, path, field, value, false),
                None => {
                    debug!(path, "unrecognized path");
                    self.report.record(path, AdjustOutcome::Unrecognized);
                    chart
                }
            };
        }

        let Some(children) = value.as_object() else {
            return chart;
        };
        let mut chart = chart;
        for (key, child) in ordered(path, children) {
            chart = self.visit(chart, &format!("{}.{}", path, key), child);
        }
        chart
    }

    fn apply<C: Adjustable>(
        &mut self,
        chart: C,
        path: &str,
        target: FieldPath,
        old_value: &Value,
        via_override: bool,
    ) -> C {
        let Some(adjust) = C::adjuster(target) else {
            debug!(path, chart_type = %self.target, "no analog, dropped");
            self.report.record(path, AdjustOutcome::Dropped);
            return chart;
        };

        debug!(path, target = %target, via_override, "adjusted");
        self.report.record(
            path,
            AdjustOutcome::Adjusted {
                target,
                via_override,
            },
        );
        let ctx = AdjustContext {
            old_value,
            old_chart: self.old_chart,
            dimensions: self.dimensions,
            measures: self.measures,
            is_adding_new_cube: self.is_adding_new_cube,
        };
        adjust(chart, &ctx)
    }
}

fn ordered<'v>(path: &str, children: &'v Map<String, Value>) -> Vec<(&'v String, &'v Value)> {
    let order: &[&str] = match path {
        "fields" => &FIELD_ORDER,
        "fields.y" => &Y_ORDER,
        _ => &[],
    };
    let mut entries: Vec<_> = children.iter().collect();
    entries.sort_by_key(|(key, _)| {
        order
            .iter()
            .position(|k| *k == key.as_str())
            .unwrap_or(order.len())
    });
    entries
}
