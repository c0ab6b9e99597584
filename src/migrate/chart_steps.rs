//! The chart configuration step catalog, oldest first
//!
//! Steps are append-only. A released step keeps its exact semantics because
//! stored documents depend on them.

use super::error::{MigrationError, MigrationResult};
use super::resolver::{CubeResolver, VersionSuffixResolver};
use super::step::{into_object, stamp, Migration, MigrationProps, SyncStep};
use crate::config::DEFAULT_SYMBOL_COLOR;
use crate::defaults::{DEFAULT_LAYER_OPACITY, DEFAULT_SEQUENTIAL_PALETTE};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;
use uuid::Uuid;

type Doc = Map<String, Value>;

/// Joins the unversioned cube iri and the component iri in a component id.
pub const ID_SEPARATOR: &str = "___";

/// Namespace of chart keys minted for documents that predate keys.
const CHART_KEY_NS: Uuid = Uuid::from_bytes([
    0x3c, 0x1f, 0x8a, 0x52, 0x6d, 0x04, 0x4b, 0x91, 0xa7, 0x2e, 0x55, 0xc0, 0x19, 0xd3, 0x7e, 0x48,
]);

const AREA_OPACITY: u8 = 100;

/// All chart configuration steps from `1.0.0` to the current version.
pub fn chart_config_steps() -> Vec<Box<dyn Migration>> {
    vec![
        Box::new(SyncStep::new(
            "1.0.0",
            "1.0.1",
            "map base layer",
            add_base_layer,
            remove_base_layer,
        )),
        Box::new(SyncStep::new(
            "1.0.1",
            "1.0.2",
            "map layer colors",
            layer_colors_up,
            layer_colors_down,
        )),
        Box::new(SyncStep::new(
            "1.0.2",
            "1.1.0",
            "calculation filter",
            add_calculation,
            remove_calculation,
        )),
        Box::new(SyncStep::new(
            "1.1.0",
            "1.1.1",
            "area imputation",
            add_imputation,
            remove_imputation,
        )),
        Box::new(SyncStep::new(
            "1.1.1",
            "1.2.0",
            "meta label",
            add_meta_label,
            remove_meta_label,
        )),
        Box::new(SyncStep::new("1.2.0", "2.0.0", "chart key", add_key, remove_key)),
        Box::new(SyncStep::new(
            "2.0.0",
            "2.1.0",
            "time range presets",
            add_presets,
            remove_presets,
        )),
        Box::new(SyncStep::new("2.1.0", "2.2.0", "limits", add_limits, remove_limits)),
        Box::new(SyncStep::new(
            "2.2.0",
            "3.0.0",
            "english meta",
            add_english,
            remove_english,
        )),
        Box::new(SyncStep::new(
            "3.0.0",
            "3.1.0",
            "cubes",
            data_set_to_cubes,
            cubes_to_data_set,
        )),
        Box::new(SyncStep::new(
            "3.1.0",
            "3.2.0",
            "cube publish iri",
            add_publish_iri,
            remove_publish_iri,
        )),
        Box::new(ComponentIdStep),
        Box::new(SyncStep::new(
            "4.0.0",
            "4.1.0",
            "map layer color",
            rename_layer_colors,
            restore_layer_colors,
        )),
    ]
}

fn is_chart_type(doc: &Doc, chart_type: &str) -> bool {
    doc.get("chartType").and_then(Value::as_str) == Some(chart_type)
}

fn object_at<'a>(doc: &'a mut Doc, path: &[&str]) -> Option<&'a mut Doc> {
    let (first, rest) = path.split_first()?;
    let mut node = doc.get_mut(*first)?.as_object_mut()?;
    for key in rest {
        node = node.get_mut(*key)?.as_object_mut()?;
    }
    Some(node)
}

fn empty_localized(languages: &[&str]) -> Value {
    Value::Object(
        languages
            .iter()
            .map(|lang| (lang.to_string(), Value::String(String::new())))
            .collect(),
    )
}

// --- 1.0.0 -> 1.0.1 ---

fn add_base_layer(mut doc: Doc) -> MigrationResult<Doc> {
    if is_chart_type(&doc, "map") {
        if let Some(fields) = object_at(&mut doc, &["fields"]) {
            fields
                .entry("baseLayer")
                .or_insert_with(|| json!({ "show": true, "locked": false }));
        }
    }
    Ok(doc)
}

fn remove_base_layer(mut doc: Doc) -> MigrationResult<Doc> {
    if is_chart_type(&doc, "map") {
        if let Some(fields) = object_at(&mut doc, &["fields"]) {
            fields.remove("baseLayer");
        }
    }
    Ok(doc)
}

// --- 1.0.1 -> 1.0.2 ---

fn layer_colors_up(mut doc: Doc) -> MigrationResult<Doc> {
    if !is_chart_type(&doc, "map") {
        return Ok(doc);
    }

    if let Some(symbol) = object_at(&mut doc, &["fields", "symbolLayer"]) {
        if let Some(Value::String(color)) = symbol.remove("color") {
            symbol.insert(
                "colors".to_string(),
                json!({ "type": "fixed", "value": color, "opacity": DEFAULT_LAYER_OPACITY }),
            );
        }
    }

    if let Some(area) = object_at(&mut doc, &["fields", "areaLayer"]) {
        if let Some(measure) = area.remove("measureIri") {
            let palette = area
                .remove("palette")
                .unwrap_or_else(|| json!(DEFAULT_SEQUENTIAL_PALETTE));
            let scale_type = area
                .remove("colorScaleType")
                .unwrap_or_else(|| json!("continuous"));
            area.insert(
                "colors".to_string(),
                json!({
                    "type": "numerical",
                    "componentIri": measure,
                    "paletteId": palette,
                    "scaleType": scale_type,
                    "opacity": AREA_OPACITY,
                }),
            );
        }
    }

    Ok(doc)
}

fn layer_colors_down(mut doc: Doc) -> MigrationResult<Doc> {
    if !is_chart_type(&doc, "map") {
        return Ok(doc);
    }

    if let Some(symbol) = object_at(&mut doc, &["fields", "symbolLayer"]) {
        if let Some(colors) = symbol.remove("colors") {
            let color = match (colors.get("type").and_then(Value::as_str), colors.get("value")) {
                (Some("fixed"), Some(value)) => value.clone(),
                _ => json!(DEFAULT_SYMBOL_COLOR),
            };
            symbol.insert("color".to_string(), color);
        }
    }

    if let Some(area) = object_at(&mut doc, &["fields", "areaLayer"]) {
        if let Some(Value::Object(mut colors)) = area.remove("colors") {
            if colors.get("type").and_then(Value::as_str) == Some("numerical") {
                for (from, to) in [
                    ("componentIri", "measureIri"),
                    ("paletteId", "palette"),
                    ("scaleType", "colorScaleType"),
                ] {
                    if let Some(value) = colors.remove(from) {
                        area.insert(to.to_string(), value);
                    }
                }
            }
        }
    }

    Ok(doc)
}

// --- 1.0.2 -> 1.1.0 ---

fn add_calculation(mut doc: Doc) -> MigrationResult<Doc> {
    if let Some(filters) = object_at(&mut doc, &["interactiveFiltersConfig"]) {
        filters
            .entry("calculation")
            .or_insert_with(|| json!({ "active": false, "type": "identity" }));
    }
    Ok(doc)
}

fn remove_calculation(mut doc: Doc) -> MigrationResult<Doc> {
    if let Some(filters) = object_at(&mut doc, &["interactiveFiltersConfig"]) {
        filters.remove("calculation");
    }
    Ok(doc)
}

// --- 1.1.0 -> 1.1.1 ---

fn add_imputation(mut doc: Doc) -> MigrationResult<Doc> {
    if is_chart_type(&doc, "area") {
        if let Some(y) = object_at(&mut doc, &["fields", "y"]) {
            y.entry("imputationType").or_insert_with(|| json!("none"));
        }
    }
    Ok(doc)
}

fn remove_imputation(mut doc: Doc) -> MigrationResult<Doc> {
    if is_chart_type(&doc, "area") {
        if let Some(y) = object_at(&mut doc, &["fields", "y"]) {
            y.remove("imputationType");
        }
    }
    Ok(doc)
}

// --- 1.1.1 -> 1.2.0 ---

fn add_meta_label(mut doc: Doc) -> MigrationResult<Doc> {
    if let Some(meta) = object_at(&mut doc, &["meta"]) {
        meta.entry("label")
            .or_insert_with(|| empty_localized(&["de", "fr", "it"]));
    }
    Ok(doc)
}

fn remove_meta_label(mut doc: Doc) -> MigrationResult<Doc> {
    if let Some(meta) = object_at(&mut doc, &["meta"]) {
        meta.remove("label");
    }
    Ok(doc)
}

// --- 1.2.0 -> 2.0.0 ---

fn add_key(mut doc: Doc) -> MigrationResult<Doc> {
    let has_key = doc
        .get("key")
        .and_then(Value::as_str)
        .is_some_and(|k| !k.is_empty());
    if !has_key {
        let content = serde_json::to_string(&doc)?;
        let key = Uuid::new_v5(&CHART_KEY_NS, content.as_bytes());
        doc.insert("key".to_string(), Value::String(key.to_string()));
    }
    Ok(doc)
}

fn remove_key(mut doc: Doc) -> MigrationResult<Doc> {
    doc.remove("key");
    Ok(doc)
}

// --- 2.0.0 -> 2.1.0 ---

fn add_presets(mut doc: Doc) -> MigrationResult<Doc> {
    if let Some(time_range) = object_at(&mut doc, &["interactiveFiltersConfig", "timeRange"]) {
        time_range
            .entry("presets")
            .or_insert_with(|| json!({ "type": "range", "from": "", "to": "" }));
    }
    Ok(doc)
}

fn remove_presets(mut doc: Doc) -> MigrationResult<Doc> {
    if let Some(time_range) = object_at(&mut doc, &["interactiveFiltersConfig", "timeRange"]) {
        time_range.remove("presets");
    }
    Ok(doc)
}

// --- 2.1.0 -> 2.2.0 ---

fn add_limits(mut doc: Doc) -> MigrationResult<Doc> {
    doc.entry("limits").or_insert_with(|| json!({}));
    Ok(doc)
}

fn remove_limits(mut doc: Doc) -> MigrationResult<Doc> {
    doc.remove("limits");
    Ok(doc)
}

// --- 2.2.0 -> 3.0.0 ---

const META_ENTRIES: [&str; 3] = ["title", "description", "label"];

fn add_english(mut doc: Doc) -> MigrationResult<Doc> {
    for entry in META_ENTRIES {
        if let Some(localized) = object_at(&mut doc, &["meta", entry]) {
            localized.entry("en").or_insert_with(|| json!(""));
        }
    }
    Ok(doc)
}

fn remove_english(mut doc: Doc) -> MigrationResult<Doc> {
    for entry in META_ENTRIES {
        if let Some(localized) = object_at(&mut doc, &["meta", entry]) {
            localized.remove("en");
        }
    }
    Ok(doc)
}

// --- 3.0.0 -> 3.1.0 ---

fn data_set_to_cubes(mut doc: Doc) -> MigrationResult<Doc> {
    let iri = match doc.remove("dataSet") {
        Some(Value::String(iri)) => iri,
        _ => {
            return Err(MigrationError::InvalidDocument(
                "chart config has no dataSet".to_string(),
            ))
        }
    };
    let filters = doc.remove("filters").unwrap_or_else(|| json!({}));
    doc.insert(
        "cubes".to_string(),
        json!([{ "iri": iri, "filters": filters }]),
    );
    Ok(doc)
}

fn cubes_to_data_set(mut doc: Doc) -> MigrationResult<Doc> {
    let mut cubes = match doc.remove("cubes") {
        Some(Value::Array(cubes)) if !cubes.is_empty() => cubes,
        _ => {
            return Err(MigrationError::InvalidDocument(
                "chart config has no cubes".to_string(),
            ))
        }
    };
    if cubes.len() > 1 {
        debug!(dropped = cubes.len() - 1, "only the first cube survives");
    }
    let mut first = into_object(cubes.swap_remove(0))?;
    let iri = first.remove("iri").unwrap_or(Value::Null);
    let filters = first.remove("filters").unwrap_or_else(|| json!({}));
    doc.insert("dataSet".to_string(), iri);
    doc.insert("filters".to_string(), filters);
    Ok(doc)
}

// --- 3.1.0 -> 3.2.0 ---

fn each_cube(doc: &mut Doc, mut f: impl FnMut(&mut Doc)) {
    if let Some(Value::Array(cubes)) = doc.get_mut("cubes") {
        for cube in cubes.iter_mut().filter_map(Value::as_object_mut) {
            f(cube);
        }
    }
}

fn add_publish_iri(mut doc: Doc) -> MigrationResult<Doc> {
    each_cube(&mut doc, |cube| {
        if let Some(iri) = cube.get("iri").cloned() {
            cube.entry("publishIri").or_insert(iri);
        }
    });
    Ok(doc)
}

fn remove_publish_iri(mut doc: Doc) -> MigrationResult<Doc> {
    each_cube(&mut doc, |cube| {
        cube.remove("publishIri");
    });
    Ok(doc)
}

// --- 3.2.0 -> 4.0.0 ---

/// Replaces component iris with component ids and back.
///
/// Every `*Iri` / `*Iris` key is renamed to `*Id` / `*Ids`, and so are the
/// maps keyed by component: cube filters, limits, table columns and the
/// measure color mapping of combo charts.
struct ComponentIdStep;

#[async_trait]
impl Migration for ComponentIdStep {
    fn description(&self) -> &str {
        "component ids"
    }

    fn from_version(&self) -> &str {
        "3.2.0"
    }

    fn to_version(&self) -> &str {
        "4.0.0"
    }

    async fn up(&self, doc: Value, props: &MigrationProps) -> MigrationResult<Value> {
        let mut doc = into_object(doc)?;
        let data_source = props
            .data_source
            .as_ref()
            .ok_or_else(|| MigrationError::MissingProps {
                step: "3.2.0 -> 4.0.0".to_string(),
                what: "a data source",
            })?;
        let fallback = VersionSuffixResolver;
        let resolver: &dyn CubeResolver = props.resolver.as_deref().unwrap_or(&fallback);

        let mut cubes = Vec::new();
        for iri in cube_iris(&doc) {
            let unversioned = resolver.unversioned_iri(&iri, data_source).await?;
            cubes.push((iri, unversioned));
        }

        IdRewrite::ToIds(&cubes).chart(&mut doc);
        Ok(stamp(doc, self.to_version()))
    }

    async fn down(&self, doc: Value, _props: &MigrationProps) -> MigrationResult<Value> {
        let mut doc = into_object(doc)?;
        IdRewrite::ToIris.chart(&mut doc);
        Ok(stamp(doc, self.from_version()))
    }
}

fn cube_iris(doc: &Doc) -> Vec<String> {
    doc.get("cubes")
        .and_then(Value::as_array)
        .map(|cubes| {
            cubes
                .iter()
                .filter_map(|c| c.get("iri").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

enum IdRewrite<'a> {
    /// (versioned, unversioned) cube iris
    ToIds(&'a [(String, String)]),
    ToIris,
}

impl IdRewrite<'_> {
    fn chart(&self, doc: &mut Doc) {
        let is_table = is_chart_type(doc, "table");
        let measures_colored = doc
            .get("fields")
            .and_then(|f| f.get("color"))
            .and_then(|c| c.get("type"))
            .and_then(Value::as_str)
            == Some("measures");

        for (key, value) in doc.iter_mut() {
            match key.as_str() {
                "cubes" => {
                    for cube in value.as_array_mut().into_iter().flatten() {
                        if let Some(filters) = cube.get_mut("filters") {
                            self.rekey(filters);
                        }
                        if let Some(join_by) = cube.get_mut("joinBy") {
                            self.convert_value(join_by);
                        }
                    }
                }
                "limits" => self.rekey(value),
                "fields" if is_table => self.rekey(value),
                "fields" => {
                    self.rewrite(value);
                    if measures_colored {
                        if let Some(mapping) = value
                            .get_mut("color")
                            .and_then(|c| c.get_mut("colorMapping"))
                        {
                            self.rekey(mapping);
                        }
                    }
                }
                "key" | "version" | "chartType" | "meta" => {}
                _ => self.rewrite(value),
            }
        }
    }

    fn rename(&self, key: &str) -> Option<String> {
        match self {
            IdRewrite::ToIds(_) => {
                if let Some(stem) = key.strip_suffix("Iris") {
                    Some(format!("{}Ids", stem))
                } else if key == "publishIri" {
                    None
                } else {
                    key.strip_suffix("Iri").map(|stem| format!("{}Id", stem))
                }
            }
            IdRewrite::ToIris => {
                if let Some(stem) = key.strip_suffix("Ids") {
                    Some(format!("{}Iris", stem))
                } else if key == "paletteId" {
                    None
                } else {
                    key.strip_suffix("Id").map(|stem| format!("{}Iri", stem))
                }
            }
        }
    }

    fn convert(&self, reference: &str) -> String {
        match self {
            IdRewrite::ToIds(cubes) => component_id(cubes, reference),
            IdRewrite::ToIris => match reference.split_once(ID_SEPARATOR) {
                Some((_, component)) => component.to_string(),
                None => reference.to_string(),
            },
        }
    }

    fn convert_value(&self, value: &mut Value) {
        match value {
            Value::String(s) => *s = self.convert(s),
            Value::Array(items) => {
                for item in items.iter_mut() {
                    self.convert_value(item);
                }
            }
            _ => {}
        }
    }

    /// Renames reference keys anywhere below `value`.
    fn rewrite(&self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, mut child) in std::mem::take(map) {
                    let is_reference = match &child {
                        Value::String(_) | Value::Null => true,
                        Value::Array(items) => items.iter().all(Value::is_string),
                        _ => false,
                    };
                    match self.rename(&key).filter(|_| is_reference) {
                        Some(new_key) => {
                            self.convert_value(&mut child);
                            map.insert(new_key, child);
                        }
                        None => {
                            self.rewrite(&mut child);
                            map.insert(key, child);
                        }
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.rewrite(item);
                }
            }
            _ => {}
        }
    }

    /// Converts the keys of a component-keyed map and rewrites its values.
    fn rekey(&self, value: &mut Value) {
        if let Value::Object(map) = value {
            for (key, mut child) in std::mem::take(map) {
                self.rewrite(&mut child);
                map.insert(self.convert(&key), child);
            }
        }
    }
}

/// `<unversioned cube>___<component iri>`, using the cube the component
/// lives under, or the first cube.
fn component_id(cubes: &[(String, String)], iri: &str) -> String {
    if iri.is_empty() || iri.contains(ID_SEPARATOR) {
        return iri.to_string();
    }
    let owner = cubes
        .iter()
        .filter(|(versioned, unversioned)| {
            iri.starts_with(versioned.as_str()) || iri.starts_with(unversioned.as_str())
        })
        .max_by_key(|(versioned, _)| versioned.len())
        .or_else(|| cubes.first());
    match owner {
        Some((_, unversioned)) => format!("{}{}{}", unversioned, ID_SEPARATOR, iri),
        None => iri.to_string(),
    }
}

// --- 4.0.0 -> 4.1.0 ---

const MAP_LAYERS: [&str; 2] = ["areaLayer", "symbolLayer"];

fn rename_layer_colors(mut doc: Doc) -> MigrationResult<Doc> {
    if is_chart_type(&doc, "map") {
        for layer in MAP_LAYERS {
            if let Some(layer) = object_at(&mut doc, &["fields", layer]) {
                if let Some(colors) = layer.remove("colors") {
                    layer.insert("color".to_string(), colors);
                }
            }
        }
    }
    Ok(doc)
}

fn restore_layer_colors(mut doc: Doc) -> MigrationResult<Doc> {
    if is_chart_type(&doc, "map") {
        for layer in MAP_LAYERS {
            if let Some(layer) = object_at(&mut doc, &["fields", layer]) {
                if let Some(color) = layer.remove("color") {
                    layer.insert("colors".to_string(), color);
                }
            }
        }
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::chain::{MigrateOptions, MigrationChain};
    use crate::migrate::resolver::DataSource;

    fn chain() -> MigrationChain {
        MigrationChain::new("chart", chart_config_steps()).unwrap()
    }

    fn options(from: &str, to: &str) -> MigrateOptions {
        MigrateOptions::new()
            .from_version(from)
            .to_version(to)
            .with_props(
                MigrationProps::new().with_data_source(DataSource::sparql("https://lindas.example")),
            )
    }

    #[test]
    fn catalog_is_a_continuous_chain() {
        let chain = chain();
        assert_eq!(chain.oldest(), "1.0.0");
        assert_eq!(chain.current(), crate::config::CHART_CONFIG_VERSION);
        assert_eq!(chain.versions().len(), 14);
    }

    #[test]
    fn key_is_deterministic() {
        let doc = json!({ "chartType": "line", "fields": {} });
        let Value::Object(doc) = doc else { unreachable!() };
        let a = add_key(doc.clone()).unwrap();
        let b = add_key(doc).unwrap();
        assert_eq!(a["key"], b["key"]);
        assert!(Uuid::parse_str(a["key"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn component_iris_become_ids() {
        let doc = json!({
            "version": "3.2.0",
            "chartType": "line",
            "cubes": [{
                "iri": "https://env.example/cube/2",
                "publishIri": "https://env.example/cube/2",
                "filters": { "https://env.example/cube/2/canton": { "type": "single", "value": "ZH" } }
            }],
            "fields": {
                "x": { "componentIri": "https://env.example/cube/2/year" },
                "y": { "componentIri": "https://env.example/cube/2/amount" },
                "color": { "type": "single", "paletteId": "category10", "color": "#000" }
            },
            "limits": { "https://env.example/cube/2/amount": [] },
            "interactiveFiltersConfig": {
                "dataFilters": { "active": false, "componentIris": [] }
            }
        });

        let out = chain().migrate(doc.clone(), &options("3.2.0", "4.0.0")).await.unwrap();

        let year = "https://env.example/cube___https://env.example/cube/2/year";
        assert_eq!(out["fields"]["x"]["componentId"], year);
        assert_eq!(out["fields"]["color"]["paletteId"], "category10");
        assert_eq!(out["cubes"][0]["publishIri"], "https://env.example/cube/2");
        assert!(out["cubes"][0]["filters"]
            .get("https://env.example/cube___https://env.example/cube/2/canton")
            .is_some());
        assert!(out["limits"]
            .get("https://env.example/cube___https://env.example/cube/2/amount")
            .is_some());
        assert_eq!(out["interactiveFiltersConfig"]["dataFilters"]["componentIds"], json!([]));

        let back = chain().migrate(out, &options("4.0.0", "3.2.0")).await.unwrap();
        assert_eq!(back, doc);
    }

    #[tokio::test]
    async fn component_ids_need_a_data_source() {
        let err = chain()
            .migrate(
                json!({ "version": "3.2.0", "chartType": "line", "cubes": [] }),
                &MigrateOptions::new().to_version("4.0.0"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::MissingProps { what: "a data source", .. }));
    }

    #[tokio::test]
    async fn missing_data_set_aborts() {
        let err = chain()
            .migrate(
                json!({ "version": "3.0.0", "chartType": "line" }),
                &options("3.0.0", "3.1.0"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::InvalidDocument(_)));
    }
}
