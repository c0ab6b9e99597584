//! Chart type switches against a shared component catalog
//!
//! Covers the segment stacking rule, table groups turning into segments,
//! sorting fallbacks and a sweep over every target chart type.

mod common;

use chartconf::adjust::{adjust_chart_type, adjust_chart_type_with_report, AdjustOptions};
use chartconf::config::{
    ChartConfig, ChartType, ColorField, ScaleType, SortingOrder, SortingType, StackingType,
};
use common::{catalog, chart, grouped_table, measures, stacked_column};
use serde_json::json;

fn switch(old: &ChartConfig, to: ChartType) -> ChartConfig {
    let catalog = catalog();
    adjust_chart_type(
        old,
        to,
        &catalog.dimensions,
        &catalog.measures,
        &AdjustOptions::default(),
    )
    .unwrap()
}

fn segmented(chart_type: &str, measure: &str) -> ChartConfig {
    chart(json!({
        "chartType": chart_type,
        "fields": {
            "x": { "componentId": "year" },
            "y": { "componentId": measure },
            "segment": { "componentId": "canton" },
            "color": { "type": "segment", "paletteId": "category10", "colorMapping": {} }
        }
    }))
}

// --- Scenario: stacked column into a bar over a nominal measure ---

#[test]
fn stacked_column_to_bar_over_nominal_measure_is_grouped() {
    let bar = switch(&stacked_column("category"), ChartType::Bar);
    let ChartConfig::Bar(bar) = bar else {
        panic!("expected bar");
    };

    assert_eq!(bar.fields.x.component_id, "category");
    let segment = bar.fields.segment.expect("segment carried over");
    assert_eq!(segment.component_id, "canton");
    assert_eq!(segment.stacking, StackingType::Grouped);
}

// --- Scenario: grouped table column becomes a line segment ---

#[test]
fn grouped_table_column_becomes_line_segment() {
    let line = switch(&grouped_table(), ChartType::Line);
    let ChartConfig::Line(line) = line else {
        panic!("expected line");
    };

    assert_eq!(line.fields.segment.unwrap().component_id, "canton");
    assert!(matches!(line.fields.color, ColorField::Segment { .. }));
}

// --- Scenario: sorting outside the accepted set falls back ---

#[test]
fn pie_measure_sorting_becomes_total_size_in_column() {
    let pie = chart(json!({
        "chartType": "pie",
        "fields": {
            "y": { "componentId": "amount" },
            "segment": {
                "componentId": "canton",
                "sorting": { "sortingType": "byMeasure", "sortingOrder": "desc" }
            },
            "color": { "type": "segment", "paletteId": "category10", "colorMapping": {} }
        }
    }));

    let ChartConfig::Column(column) = switch(&pie, ChartType::Column) else {
        panic!("expected column");
    };
    let sorting = column.fields.segment.unwrap().sorting.unwrap();
    assert_eq!(sorting.sorting_type, SortingType::TotalSize);
    assert_eq!(sorting.sorting_order, SortingOrder::Desc);
}

// --- Scenario: stacking follows the receiving measure ---

#[test]
fn segment_is_stacked_only_over_ratio_measures() {
    for measure in measures() {
        let expected = if measure.scale_type == Some(ScaleType::Ratio) {
            StackingType::Stacked
        } else {
            StackingType::Grouped
        };

        for source in ["line", "area", "column"] {
            let old = if source == "column" {
                stacked_column(&measure.id)
            } else {
                segmented(source, &measure.id)
            };

            for target in [ChartType::Column, ChartType::Bar] {
                if old.chart_type() == target {
                    continue;
                }
                let stacking = match switch(&old, target) {
                    ChartConfig::Column(c) => c.fields.segment.map(|s| s.stacking),
                    ChartConfig::Bar(c) => c.fields.segment.map(|s| s.stacking),
                    other => panic!("unexpected {}", other.chart_type()),
                };
                assert_eq!(
                    stacking,
                    Some(expected),
                    "{} over {} into {}",
                    source,
                    measure.id,
                    target
                );
            }
        }
    }
}

// --- Scenario: identical shapes carry over unchanged ---

#[test]
fn line_and_area_share_their_axes() {
    let line = chart(json!({
        "chartType": "line",
        "fields": {
            "x": { "componentId": "year" },
            "y": { "componentId": "price", "showValues": true },
            "color": { "type": "single", "paletteId": "dark2", "color": "#1b9e77" }
        }
    }));

    let ChartConfig::Area(area) = switch(&line, ChartType::Area) else {
        panic!("expected area");
    };
    let ChartConfig::Line(original) = &line else {
        unreachable!()
    };
    assert_eq!(area.fields.x, original.fields.x);
    assert_eq!(area.fields.y.component_id, original.fields.y.component_id);
    assert_eq!(area.fields.color, original.fields.color);

    let back = switch(&ChartConfig::Area(area), ChartType::Line);
    let ChartConfig::Line(back) = back else {
        panic!("expected line");
    };
    assert_eq!(back.fields.x, original.fields.x);
    assert_eq!(back.fields.y.component_id, original.fields.y.component_id);
    assert_eq!(back.fields.color, original.fields.color);
}

// --- Scenario: every target type is reachable ---

#[test]
fn stacked_column_reaches_every_chart_type() {
    let old = stacked_column("amount");
    let catalog = catalog();

    for target in ChartType::ALL {
        let (adjusted, report) = adjust_chart_type_with_report(
            &old,
            target,
            &catalog.dimensions,
            &catalog.measures,
            &AdjustOptions::default(),
        )
        .unwrap_or_else(|e| panic!("{}: {}", target, e));

        assert_eq!(adjusted.chart_type(), target);
        assert_eq!(adjusted.key(), old.key());

        let value = serde_json::to_value(&adjusted).unwrap();
        let decoded: ChartConfig = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, adjusted, "{} does not survive serde", target);

        if target != old.chart_type() {
            assert!(!report.entries.is_empty(), "{} walked nothing", target);
        }
    }
}
