//! Migration chains end to end
//!
//! Fixtures stored at the oldest schema versions are walked up to the
//! current version and back. Every adjacent step must round-trip, and the
//! route taken between two versions must not change the result.

mod common;

use chartconf::document::{read_document, write_document};
use chartconf::migrate::{
    chart_config_chain, decode_chart_config, document_chain, migrate_chart_config,
    migrate_document, MigrateOptions, MigrationChain, MigrationError, MigrationProps,
    ID_SEPARATOR,
};
use chartconf::{ChartConfig, CHART_CONFIG_VERSION, DOCUMENT_VERSION};
use common::{
    chart_at_1_0_0, document_at_1_0_0, map_at_1_0_1, props, RecordingResolver, CUBE,
    UNVERSIONED_CUBE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use std::sync::Arc;

fn to(version: &str) -> MigrateOptions {
    MigrateOptions::new().to_version(version).with_props(props())
}

async fn migrate(chain: &MigrationChain, doc: Value, version: &str) -> Value {
    chain
        .migrate(doc, &to(version))
        .await
        .unwrap_or_else(|e| panic!("migrating to {}: {}", version, e))
}

// --- Scenario: legacy dataSet and filters become cubes ---

#[tokio::test]
async fn data_set_and_filters_become_cubes() {
    let chain = chart_config_chain().unwrap();
    let at_3_0 = migrate(&chain, chart_at_1_0_0(), "3.0.0").await;
    let filters = at_3_0["filters"].clone();

    let at_3_1 = migrate(&chain, at_3_0, "3.1.0").await;

    assert_eq!(at_3_1["version"], "3.1.0");
    assert!(at_3_1.get("dataSet").is_none());
    assert!(at_3_1.get("filters").is_none());
    assert_eq!(at_3_1["cubes"], json!([{ "iri": CUBE, "filters": filters }]));
}

// --- Scenario: map symbol color gains fixed color options ---

#[tokio::test]
async fn symbol_color_round_trips_through_fixed_colors() {
    let chain = chart_config_chain().unwrap();
    let original = map_at_1_0_1();

    let up = migrate(&chain, original.clone(), "1.0.2").await;
    assert_eq!(
        up["fields"]["symbolLayer"]["colors"],
        json!({ "type": "fixed", "value": "#112233", "opacity": 80 })
    );
    assert!(up["fields"]["symbolLayer"].get("color").is_none());

    let down = migrate(&chain, up, "1.0.1").await;
    assert_eq!(down["fields"]["symbolLayer"]["color"], "#112233");
    assert_eq!(down, original);
}

// --- Scenario: every adjacent step round-trips ---

async fn assert_adjacent_round_trips(chain: &MigrationChain, fixture: Value) {
    let versions: Vec<String> = chain.versions().iter().map(|v| v.to_string()).collect();
    let start = fixture["version"].as_str().unwrap().to_string();
    let mut doc = fixture;

    for pair in versions.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if versions.iter().position(|v| v == a) < versions.iter().position(|v| *v == start) {
            continue;
        }
        let up = migrate(chain, doc.clone(), b).await;
        assert_eq!(up["version"], b.as_str());
        let down = migrate(chain, up.clone(), a).await;
        assert_eq!(down, doc, "{} -> {} -> {} changed the document", a, b, a);
        doc = up;
    }
}

#[tokio::test]
async fn chart_steps_round_trip() {
    let chain = chart_config_chain().unwrap();
    assert_adjacent_round_trips(&chain, chart_at_1_0_0()).await;
    assert_adjacent_round_trips(&chain, map_at_1_0_1()).await;
}

#[tokio::test]
async fn document_steps_round_trip() {
    let chain = document_chain().unwrap();
    assert_adjacent_round_trips(&chain, document_at_1_0_0()).await;
}

// --- Scenario: every version is reachable from the current one ---

#[tokio::test]
async fn every_version_is_reachable_from_current() {
    let chain = chart_config_chain().unwrap();
    let current = migrate(&chain, chart_at_1_0_0(), CHART_CONFIG_VERSION).await;

    for version in chain.versions() {
        let down = migrate(&chain, current.clone(), version).await;
        assert_eq!(down["version"], version);
        let up = migrate(&chain, down, CHART_CONFIG_VERSION).await;
        assert_eq!(up, current, "round trip through {}", version);
    }
}

#[tokio::test]
async fn migrated_chart_decodes() {
    let migrated = migrate_chart_config(chart_at_1_0_0(), &to(CHART_CONFIG_VERSION))
        .await
        .unwrap();
    let chart = decode_chart_config(migrated).unwrap();

    let ChartConfig::Line(line) = &chart else {
        panic!("expected line, got {}", chart.chart_type());
    };
    let year = format!("{}{}{}/year", UNVERSIONED_CUBE, ID_SEPARATOR, CUBE);
    assert_eq!(line.fields.x.component_id, year);
    assert_eq!(chart.common().meta.title.de, "Emissionen");
    assert!(!chart.key().is_empty());
    assert_eq!(chart.common().cubes[0].publish_iri.as_deref(), Some(CUBE));
}

#[tokio::test]
async fn migrated_map_decodes() {
    let migrated = migrate_chart_config(map_at_1_0_1(), &to(CHART_CONFIG_VERSION))
        .await
        .unwrap();
    let ChartConfig::Map(map) = decode_chart_config(migrated).unwrap() else {
        panic!("expected map");
    };
    assert!(map.fields.area_layer.is_some());
    assert!(map.fields.symbol_layer.is_some());
}

#[tokio::test]
async fn old_documents_are_rejected_by_decode() {
    let err = decode_chart_config(chart_at_1_0_0()).unwrap_err();
    assert!(matches!(err, MigrationError::InvalidDocument(_)));
}

// --- Scenario: sampled routes agree ---

#[tokio::test]
async fn route_through_any_version_reaches_the_same_document() {
    let chain = chart_config_chain().unwrap();
    let versions: Vec<String> = chain.versions().iter().map(|v| v.to_string()).collect();
    let direct = migrate(&chain, chart_at_1_0_0(), CHART_CONFIG_VERSION).await;
    let mut rng = StdRng::seed_from_u64(28);

    for _ in 0..12 {
        let mut doc = chart_at_1_0_0();
        for _ in 0..3 {
            let stop = &versions[rng.gen_range(0..versions.len())];
            doc = migrate(&chain, doc, stop).await;
        }
        let end = migrate(&chain, doc, CHART_CONFIG_VERSION).await;
        assert_eq!(end, direct);
    }
}

// --- Scenario: documents delegate to the chart chain ---

#[tokio::test]
async fn document_reaches_current_with_nested_charts() {
    let migrated = migrate_document(document_at_1_0_0(), &MigrateOptions::new())
        .await
        .unwrap();

    assert_eq!(migrated["version"], DOCUMENT_VERSION);
    assert!(migrated.get("chartConfig").is_none());
    assert!(migrated.get("dataSet").is_none());
    assert_eq!(migrated["layout"]["type"], "tab");

    let charts = migrated["chartConfigs"].as_array().unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0]["version"], CHART_CONFIG_VERSION);
    assert_eq!(migrated["activeChartKey"], charts[0]["key"]);
    assert_eq!(charts[0]["cubes"][0]["iri"], CUBE);
}

#[tokio::test]
async fn resolver_is_asked_for_each_cube() {
    let resolver = Arc::new(RecordingResolver::new());
    let options = MigrateOptions::new().with_props(props().with_resolver(resolver.clone()));

    migrate_chart_config(chart_at_1_0_0(), &options).await.unwrap();
    assert_eq!(resolver.lookups(), vec![CUBE.to_string()]);
}

#[tokio::test]
async fn unreachable_cube_aborts_the_whole_document() {
    let resolver = Arc::new(RecordingResolver::new().with_unreachable(CUBE));
    let options = MigrateOptions::new().with_props(MigrationProps::new().with_resolver(resolver));

    let err = migrate_document(document_at_1_0_0(), &options)
        .await
        .unwrap_err();
    match err {
        MigrationError::NestedChart { index, source, .. } => {
            assert_eq!(index, 0);
            assert!(matches!(*source, MigrationError::Resolve(_)));
        }
        other => panic!("expected a nested failure, got {other}"),
    }
}

#[tokio::test]
async fn unknown_version_fails_loudly() {
    let mut doc = chart_at_1_0_0();
    doc["version"] = json!("0.5.0");
    let err = migrate_chart_config(doc, &to(CHART_CONFIG_VERSION))
        .await
        .unwrap_err();
    assert!(matches!(err, MigrationError::MissingStep { .. }));
}

#[tokio::test]
async fn versions_outside_the_chain_are_rejected() {
    for target in ["1.0.5", "4.1"] {
        let mut doc = chart_at_1_0_0();
        doc["version"] = json!("1.0.2");
        let err = migrate_chart_config(doc, &to(target)).await.unwrap_err();
        assert!(
            matches!(&err, MigrationError::UnknownVersion { version, .. } if version == target),
            "{}: {}",
            target,
            err
        );
    }
}

#[test]
fn chain_runs_outside_an_async_context() {
    let migrated = tokio_test::block_on(migrate_chart_config(
        chart_at_1_0_0(),
        &to("2.0.0"),
    ))
    .unwrap();
    assert_eq!(migrated["version"], "2.0.0");
    assert!(migrated["key"].as_str().is_some());
}

// --- Scenario: documents on disk ---

#[tokio::test]
async fn yaml_document_migrates_to_json_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("document.yaml");
    let output = dir.path().join("document.json");
    write_document(&input, &document_at_1_0_0()).unwrap();

    let stored: Value = read_document(&input).unwrap();
    let migrated = migrate_document(stored, &to(DOCUMENT_VERSION)).await.unwrap();
    write_document(&output, &migrated).unwrap();

    let reread: Value = read_document(&output).unwrap();
    assert_eq!(reread, migrated);
    let chart = decode_chart_config(reread["chartConfigs"][0].clone()).unwrap();
    assert_eq!(chart.chart_type().as_str(), "line");
}
