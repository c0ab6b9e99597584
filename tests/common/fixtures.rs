use super::catalog::CUBE;
use chartconf::config::{ChartConfig, CHART_CONFIG_VERSION};
use chartconf::migrate::{DataSource, MigrationProps};
use serde_json::{json, Value};

pub const ENDPOINT: &str = "https://lindas.example/query";

pub fn props() -> MigrationProps {
    MigrationProps::new().with_data_source(DataSource::sparql(ENDPOINT))
}

/// A current chart config: `value` is merged over key, version and cubes.
pub fn chart(value: Value) -> ChartConfig {
    let mut base = json!({
        "key": "fixture",
        "version": CHART_CONFIG_VERSION,
        "cubes": [{ "iri": CUBE, "filters": {} }]
    });
    if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), value) {
        base.extend(extra);
    }
    serde_json::from_value(base).unwrap()
}

pub fn stacked_column(measure: &str) -> ChartConfig {
    chart(json!({
        "chartType": "column",
        "fields": {
            "x": { "componentId": "year", "sorting": { "sortingType": "byAuto", "sortingOrder": "asc" } },
            "y": { "componentId": measure },
            "segment": {
                "componentId": "canton",
                "type": "stacked",
                "sorting": { "sortingType": "byTotalSize", "sortingOrder": "asc" }
            },
            "color": { "type": "segment", "paletteId": "category10", "colorMapping": {} }
        }
    }))
}

/// year, canton (grouped), amount
pub fn grouped_table() -> ChartConfig {
    let column = |id: &str, component_type: &str, index: u32, is_group: bool| {
        json!({
            "componentId": id,
            "componentType": component_type,
            "index": index,
            "isGroup": is_group,
            "isHidden": false
        })
    };
    chart(json!({
        "chartType": "table",
        "fields": {
            "year": column("year", "TemporalDimension", 0, false),
            "canton": column("canton", "NominalDimension", 1, true),
            "amount": column("amount", "NumericalMeasure", 2, false)
        },
        "settings": { "showSearch": true, "showAllRows": false },
        "sorting": []
    }))
}

fn component(name: &str) -> String {
    format!("{}/{}", CUBE, name)
}

/// A segmented line chart as the first schema stored it
pub fn chart_at_1_0_0() -> Value {
    json!({
        "version": "1.0.0",
        "chartType": "line",
        "dataSet": CUBE,
        "filters": {
            component("fuel"): { "type": "single", "value": "oil" }
        },
        "meta": {
            "title": { "de": "Emissionen", "fr": "Émissions", "it": "Emissioni" },
            "description": { "de": "", "fr": "", "it": "" }
        },
        "fields": {
            "x": { "componentIri": component("year") },
            "y": { "componentIri": component("amount") },
            "segment": {
                "componentIri": component("canton"),
                "sorting": { "sortingType": "byAuto", "sortingOrder": "asc" }
            },
            "color": { "type": "segment", "paletteId": "category10", "colorMapping": { "ZH": "#1f77b4" } }
        },
        "interactiveFiltersConfig": {
            "legend": { "active": true, "componentIri": component("canton") },
            "timeRange": { "active": false, "componentIri": component("year") },
            "dataFilters": { "active": true, "componentIris": [component("fuel")] }
        }
    })
}

/// A map with both layers, one step after the first schema
pub fn map_at_1_0_1() -> Value {
    json!({
        "version": "1.0.1",
        "chartType": "map",
        "dataSet": CUBE,
        "filters": {},
        "fields": {
            "baseLayer": { "show": true, "locked": false },
            "areaLayer": {
                "componentIri": component("municipality"),
                "measureIri": component("amount"),
                "colorScaleType": "discrete",
                "palette": "blues"
            },
            "symbolLayer": {
                "componentIri": component("station"),
                "measureIri": component("price"),
                "color": "#112233"
            }
        },
        "interactiveFiltersConfig": {
            "legend": { "active": false, "componentIri": "" },
            "timeRange": { "active": false, "componentIri": "" },
            "dataFilters": { "active": false, "componentIris": [] }
        }
    })
}

/// An editor document wrapping [`chart_at_1_0_0`]
pub fn document_at_1_0_0() -> Value {
    let mut chart = chart_at_1_0_0();
    if let Some(chart) = chart.as_object_mut() {
        chart.remove("dataSet");
    }
    json!({
        "version": "1.0.0",
        "state": "CONFIGURING_CHART",
        "dataSet": CUBE,
        "dataSource": { "type": "sparql", "url": ENDPOINT },
        "chartConfig": chart
    })
}
