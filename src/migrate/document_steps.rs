//! The editor document step catalog
//!
//! Most document steps only move the nested chart configurations along the
//! chart chain ("bump" steps), with a small edit of the outer document
//! before or after.

use super::chain::{MigrateOptions, MigrationChain};
use super::error::{MigrationError, MigrationResult};
use super::resolver::DataSource;
use super::step::{into_object, stamp, version_of, Migration, MigrationProps, SyncStep};
use super::version::Version;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

type Doc = Map<String, Value>;
type Hook = fn(&mut Doc) -> MigrationResult<()>;

/// All document steps from `1.0.0` to the current version.
pub fn document_steps(charts: Arc<MigrationChain>) -> Vec<Box<dyn Migration>> {
    vec![
        Box::new(BumpStep::new(
            ("1.0.0", "1.1.0"),
            ("1.0.0", "1.2.0"),
            charts.clone(),
        )),
        Box::new(
            BumpStep::new(("1.1.0", "2.0.0"), ("1.2.0", "2.0.0"), charts.clone())
                .after_up(to_chart_list)
                .before_down(to_single_chart),
        ),
        Box::new(SyncStep::new(
            "2.0.0",
            "2.1.0",
            "layout",
            add_layout,
            remove_layout,
        )),
        Box::new(
            BumpStep::new(("2.1.0", "2.2.0"), ("2.0.0", "3.1.0"), charts.clone())
                .before_up(distribute_data_set)
                .after_down(collect_data_set),
        ),
        Box::new(BumpStep::new(
            ("2.2.0", "3.0.0"),
            ("3.1.0", "4.0.0"),
            charts.clone(),
        )),
        Box::new(BumpStep::new(("3.0.0", "3.1.0"), ("4.0.0", "4.1.0"), charts)),
    ]
}

/// Moves every nested chart configuration between two chart versions.
struct BumpStep {
    from: &'static str,
    to: &'static str,
    chart_from: &'static str,
    chart_to: &'static str,
    description: String,
    charts: Arc<MigrationChain>,
    before_up: Option<Hook>,
    after_up: Option<Hook>,
    before_down: Option<Hook>,
    after_down: Option<Hook>,
}

impl BumpStep {
    fn new(
        (from, to): (&'static str, &'static str),
        (chart_from, chart_to): (&'static str, &'static str),
        charts: Arc<MigrationChain>,
    ) -> Self {
        Self {
            from,
            to,
            chart_from,
            chart_to,
            description: format!("chart configs {} -> {}", chart_from, chart_to),
            charts,
            before_up: None,
            after_up: None,
            before_down: None,
            after_down: None,
        }
    }

    fn before_up(mut self, hook: Hook) -> Self {
        self.before_up = Some(hook);
        self
    }

    fn after_up(mut self, hook: Hook) -> Self {
        self.after_up = Some(hook);
        self
    }

    fn before_down(mut self, hook: Hook) -> Self {
        self.before_down = Some(hook);
        self
    }

    fn after_down(mut self, hook: Hook) -> Self {
        self.after_down = Some(hook);
        self
    }

    async fn bump(
        &self,
        doc: &mut Doc,
        props: &MigrationProps,
        from: &str,
        to: &str,
    ) -> MigrationResult<()> {
        let options = MigrateOptions::new()
            .from_version(from)
            .to_version(to)
            .with_props(nested_props(doc, props));

        if let Some(chart) = doc.get_mut("chartConfig") {
            *chart = self.migrate_chart(0, chart.take(), from, &options).await?;
            return Ok(());
        }

        match doc.get_mut("chartConfigs") {
            Some(Value::Array(charts)) => {
                for (index, chart) in charts.iter_mut().enumerate() {
                    *chart = self.migrate_chart(index, chart.take(), from, &options).await?;
                }
                debug!(count = charts.len(), %from, %to, "bumped chart configs");
                Ok(())
            }
            _ => Err(MigrationError::InvalidDocument(
                "document has no chart configs".to_string(),
            )),
        }
    }

    async fn migrate_chart(
        &self,
        index: usize,
        chart: Value,
        expected: &str,
        options: &MigrateOptions,
    ) -> MigrationResult<Value> {
        // Charts stored before versions existed start at the oldest one.
        let found = version_of(&chart)
            .unwrap_or(self.charts.oldest())
            .to_string();
        let consistent = match (Version::parse(&found), Version::parse(expected)) {
            (Ok(found), Ok(expected)) => found == expected,
            _ => false,
        };
        if !consistent {
            warn!(index, %found, expected, "nested chart config at an unexpected version");
            return Err(MigrationError::InconsistentNestedVersion {
                index,
                expected: expected.to_string(),
                found,
            });
        }

        let key = chart
            .get("key")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.charts.migrate(chart, options).await.map_err(|source| {
            warn!(index, %key, error = %source, "nested chart config failed to migrate");
            MigrationError::NestedChart {
                index,
                key,
                source: Box::new(source),
            }
        })
    }
}

#[async_trait]
impl Migration for BumpStep {
    fn description(&self) -> &str {
        &self.description
    }

    fn from_version(&self) -> &str {
        self.from
    }

    fn to_version(&self) -> &str {
        self.to
    }

    async fn up(&self, doc: Value, props: &MigrationProps) -> MigrationResult<Value> {
        let mut doc = into_object(doc)?;
        if let Some(hook) = self.before_up {
            hook(&mut doc)?;
        }
        self.bump(&mut doc, props, self.chart_from, self.chart_to).await?;
        if let Some(hook) = self.after_up {
            hook(&mut doc)?;
        }
        Ok(stamp(doc, self.to))
    }

    async fn down(&self, doc: Value, props: &MigrationProps) -> MigrationResult<Value> {
        let mut doc = into_object(doc)?;
        if let Some(hook) = self.before_down {
            hook(&mut doc)?;
        }
        self.bump(&mut doc, props, self.chart_to, self.chart_from).await?;
        if let Some(hook) = self.after_down {
            hook(&mut doc)?;
        }
        Ok(stamp(doc, self.from))
    }
}

/// The caller's data source wins over the one stored in the document.
fn nested_props(doc: &Doc, props: &MigrationProps) -> MigrationProps {
    let mut nested = props.clone();
    if nested.data_source.is_none() {
        nested.data_source = doc
            .get("dataSource")
            .cloned()
            .and_then(|v| serde_json::from_value::<DataSource>(v).ok());
    }
    nested
}

fn chart_key(chart: &Value) -> Option<&str> {
    chart.get("key").and_then(Value::as_str)
}

/// Index of the chart named by `activeChartKey`, or the first one.
fn active_index(doc: &Doc, charts: &[Value]) -> usize {
    let active = doc.get("activeChartKey").and_then(Value::as_str);
    charts
        .iter()
        .position(|chart| active.is_some() && chart_key(chart) == active)
        .unwrap_or(0)
}

// --- 1.1.0 -> 2.0.0 ---

fn to_chart_list(doc: &mut Doc) -> MigrationResult<()> {
    let chart = doc
        .remove("chartConfig")
        .ok_or_else(|| MigrationError::InvalidDocument("document has no chartConfig".to_string()))?;
    let key = chart_key(&chart).unwrap_or_default().to_string();
    doc.insert("chartConfigs".to_string(), Value::Array(vec![chart]));
    doc.insert("activeChartKey".to_string(), Value::String(key));
    Ok(())
}

fn to_single_chart(doc: &mut Doc) -> MigrationResult<()> {
    let mut charts = match doc.remove("chartConfigs") {
        Some(Value::Array(charts)) if !charts.is_empty() => charts,
        _ => {
            return Err(MigrationError::InvalidDocument(
                "document has no chartConfigs".to_string(),
            ))
        }
    };
    let active = active_index(doc, &charts);
    doc.remove("activeChartKey");
    if charts.len() > 1 {
        debug!(dropped = charts.len() - 1, "only the active chart survives");
    }
    doc.insert("chartConfig".to_string(), charts.swap_remove(active));
    Ok(())
}

// --- 2.0.0 -> 2.1.0 ---

fn add_layout(mut doc: Doc) -> MigrationResult<Doc> {
    let empty = json!({ "de": "", "fr": "", "it": "" });
    doc.entry("layout").or_insert_with(|| {
        json!({
            "type": "tab",
            "meta": { "title": empty.clone(), "description": empty }
        })
    });
    Ok(doc)
}

fn remove_layout(mut doc: Doc) -> MigrationResult<Doc> {
    doc.remove("layout");
    Ok(doc)
}

// --- 2.1.0 -> 2.2.0 ---

fn distribute_data_set(doc: &mut Doc) -> MigrationResult<()> {
    let data_set = doc
        .remove("dataSet")
        .ok_or_else(|| MigrationError::InvalidDocument("document has no dataSet".to_string()))?;
    if let Some(Value::Array(charts)) = doc.get_mut("chartConfigs") {
        for chart in charts.iter_mut().filter_map(Value::as_object_mut) {
            chart
                .entry("dataSet")
                .or_insert_with(|| data_set.clone());
        }
    }
    Ok(())
}

fn collect_data_set(doc: &mut Doc) -> MigrationResult<()> {
    let active = match doc.get("chartConfigs") {
        Some(Value::Array(charts)) => active_index(doc, charts),
        _ => 0,
    };
    let mut data_set = None;
    if let Some(Value::Array(charts)) = doc.get_mut("chartConfigs") {
        for (index, chart) in charts.iter_mut().enumerate() {
            let removed = chart.as_object_mut().and_then(|c| c.remove("dataSet"));
            if index == active {
                data_set = removed;
            }
        }
    }
    let data_set = data_set.ok_or_else(|| {
        MigrationError::InvalidDocument("active chart has no dataSet".to_string())
    })?;
    doc.insert("dataSet".to_string(), data_set);
    Ok(())
}
