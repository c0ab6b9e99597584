use super::*;
use serde_json::json;

fn column_json() -> serde_json::Value {
    json!({
        "chartType": "column",
        "key": "chart-1",
        "version": CHART_CONFIG_VERSION,
        "meta": {
            "title": { "de": "", "fr": "", "it": "", "en": "Emissions" },
            "description": { "de": "", "fr": "", "it": "", "en": "" },
            "label": { "de": "", "fr": "", "it": "", "en": "" }
        },
        "cubes": [{ "iri": "https://cube/emissions", "filters": {} }],
        "limits": {},
        "interactiveFiltersConfig": {
            "legend": { "active": false, "componentId": "" },
            "timeRange": { "active": false, "componentId": "", "presets": { "type": "range", "from": "", "to": "" } },
            "dataFilters": { "active": false, "componentIds": [] },
            "calculation": { "active": false, "type": "identity" }
        },
        "fields": {
            "x": { "componentId": "year", "sorting": { "sortingType": "byAuto", "sortingOrder": "asc" } },
            "y": { "componentId": "amount" },
            "segment": { "componentId": "canton", "type": "stacked" },
            "color": { "type": "segment", "paletteId": "category10", "colorMapping": { "ZH": "#1f77b4" } }
        }
    })
}

#[test]
fn chart_config_is_tagged_by_chart_type() {
    let chart: ChartConfig = serde_json::from_value(column_json()).unwrap();

    assert_eq!(chart.chart_type(), ChartType::Column);
    assert_eq!(chart.key(), "chart-1");
    assert_eq!(chart.common().meta.title.en, "Emissions");
    assert_eq!(chart.segment_component_id(), Some("canton"));
    assert!(chart.supports_percent_calculation());
}

#[test]
fn chart_config_serializes_back_to_wire_shape() {
    let chart: ChartConfig = serde_json::from_value(column_json()).unwrap();
    let value = serde_json::to_value(&chart).unwrap();

    assert_eq!(value["chartType"], "column");
    assert_eq!(value["key"], "chart-1");
    assert_eq!(value["fields"]["segment"]["type"], "stacked");
    assert_eq!(value["cubes"][0]["iri"], "https://cube/emissions");
    assert!(value["fields"].get("animation").is_none());
}

#[test]
fn chart_type_parses_wire_names() {
    for chart_type in ChartType::ALL {
        assert_eq!(chart_type.as_str().parse::<ChartType>().unwrap(), chart_type);
    }
    assert!(matches!(
        "donut".parse::<ChartType>(),
        Err(ConfigError::UnknownChartType(name)) if name == "donut"
    ));
}

#[test]
fn encoded_ids_cover_every_slot() {
    let chart: ChartConfig = serde_json::from_value(column_json()).unwrap();
    assert_eq!(chart.encoded_component_ids(), vec!["year", "amount", "canton"]);
    assert_eq!(chart.measure_axis_ids(), vec!["amount"]);
    assert_eq!(chart.x_dimension_id(), Some("year"));
}

#[test]
fn capabilities_by_chart_type() {
    assert!(ChartType::Pie.supports_segment());
    assert!(!ChartType::Table.supports_segment());
    assert!(ChartType::Map.supports_animation());
    assert!(!ChartType::Line.supports_animation());
    assert!(ChartType::Area.supports_limits());
    assert!(!ChartType::Scatterplot.supports_limits());
    assert!(ChartType::ComboLineDual.is_combo());
}

#[test]
fn grouped_column_does_not_support_percent() {
    let mut value = column_json();
    value["fields"]["segment"]["type"] = json!("grouped");
    let chart: ChartConfig = serde_json::from_value(value).unwrap();
    assert!(!chart.supports_percent_calculation());
}

#[test]
fn map_layer_colors_are_tagged() {
    let chart: ChartConfig = serde_json::from_value(json!({
        "chartType": "map",
        "key": "m",
        "version": CHART_CONFIG_VERSION,
        "cubes": [{ "iri": "c" }],
        "fields": {
            "baseLayer": { "show": true, "locked": false },
            "symbolLayer": {
                "componentId": "place",
                "measureId": "amount",
                "color": { "type": "fixed", "value": "#112233", "opacity": 80 }
            }
        }
    }))
    .unwrap();

    match &chart {
        ChartConfig::Map(map) => {
            let layer = map.fields.symbol_layer.as_ref().unwrap();
            assert_eq!(
                layer.color,
                LayerColor::Fixed { value: "#112233".to_string(), opacity: 80 }
            );
        }
        other => panic!("expected map, got {:?}", other.chart_type()),
    }
    assert_eq!(chart.encoded_component_ids(), vec!["place", "amount"]);
    assert_eq!(chart.color(), None);
}
