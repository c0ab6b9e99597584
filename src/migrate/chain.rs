//! Ordered step lists and the walk between two versions

use super::error::{MigrationError, MigrationResult};
use super::step::{version_of, Migration, MigrationProps};
use super::version::{Direction, Version};
use serde_json::Value;
use tracing::{debug, info};

/// Where a migration starts and ends
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Overrides the document's own `version`
    pub from_version: Option<String>,
    /// Defaults to the newest version of the chain
    pub to_version: Option<String>,
    pub props: MigrationProps,
}

impl MigrateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_version(mut self, version: impl Into<String>) -> Self {
        self.from_version = Some(version.into());
        self
    }

    pub fn to_version(mut self, version: impl Into<String>) -> Self {
        self.to_version = Some(version.into());
        self
    }

    pub fn with_props(mut self, props: MigrationProps) -> Self {
        self.props = props;
        self
    }
}

struct Edge {
    from: Version,
    to: Version,
    step: Box<dyn Migration>,
}

/// A linear sequence of steps, each ending where the next one starts
pub struct MigrationChain {
    name: &'static str,
    edges: Vec<Edge>,
}

impl MigrationChain {
    /// Validates that the steps form one gap-free, strictly ascending path.
    pub fn new(name: &'static str, steps: Vec<Box<dyn Migration>>) -> MigrationResult<Self> {
        if steps.is_empty() {
            return Err(MigrationError::BrokenChain(format!("{} has no steps", name)));
        }

        let mut edges: Vec<Edge> = Vec::with_capacity(steps.len());
        for step in steps {
            let from = Version::parse(step.from_version())?;
            let to = Version::parse(step.to_version())?;
            if from.direction(&to) != Direction::Up {
                return Err(MigrationError::BrokenChain(format!(
                    "step {} -> {} does not move forward",
                    from, to
                )));
            }
            if let Some(prev) = edges.last() {
                if prev.to != from {
                    return Err(MigrationError::BrokenChain(format!(
                        "gap between {} and {}",
                        prev.to, from
                    )));
                }
            }
            edges.push(Edge { from, to, step });
        }

        Ok(Self { name, edges })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn oldest(&self) -> &str {
        self.edges
            .first()
            .map(|e| e.step.from_version())
            .unwrap_or_default()
    }

    pub fn current(&self) -> &str {
        self.edges
            .last()
            .map(|e| e.step.to_version())
            .unwrap_or_default()
    }

    /// Every version the chain knows, oldest first
    pub fn versions(&self) -> Vec<&str> {
        let mut out = vec![self.oldest()];
        out.extend(self.edges.iter().map(|e| e.step.to_version()));
        out
    }

    /// Whether `version` is exactly one of the chain's versions.
    fn knows(&self, version: &Version) -> bool {
        self.edges.first().is_some_and(|e| &e.from == version)
            || self.edges.iter().any(|e| &e.to == version)
    }

    /// (from, to, description) of each step
    pub fn steps(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.edges.iter().map(|e| {
            (
                e.step.from_version(),
                e.step.to_version(),
                e.step.description(),
            )
        })
    }

    /// Walk `doc` step by step until it reaches the target version.
    ///
    /// Each step is awaited before the next one is chosen. A document
    /// already at the target comes back unchanged.
    pub async fn migrate(&self, doc: Value, options: &MigrateOptions) -> MigrationResult<Value> {
        let from = options
            .from_version
            .as_deref()
            .or_else(|| version_of(&doc))
            .unwrap_or(self.oldest())
            .to_string();
        let to = options
            .to_version
            .as_deref()
            .unwrap_or(self.current())
            .to_string();

        let target = Version::parse(&to)?;
        let mut current = Version::parse(&from)?;
        if !self.knows(&current) {
            return Err(MigrationError::MissingStep {
                version: from,
                direction: match current.direction(&target) {
                    Direction::Down => "down",
                    Direction::Up | Direction::Same => "up",
                },
            });
        }
        if !self.knows(&target) {
            return Err(MigrationError::UnknownVersion {
                chain: self.name,
                version: to,
            });
        }
        info!(chain = self.name, %from, %to, "migrating");

        let mut doc = doc;
        loop {
            match current.direction(&target) {
                Direction::Same => break,
                Direction::Up => {
                    let edge = self
                        .edges
                        .iter()
                        .find(|e| e.from == current)
                        .ok_or_else(|| MigrationError::MissingStep {
                            version: current.to_string(),
                            direction: "up",
                        })?;
                    debug!(chain = self.name, step = edge.step.description(), "up");
                    doc = edge.step.up(doc, &options.props).await?;
                    check_stamp(&doc, edge, &edge.to)?;
                    current = edge.to.clone();
                }
                Direction::Down => {
                    let edge = self
                        .edges
                        .iter()
                        .find(|e| e.to == current)
                        .ok_or_else(|| MigrationError::MissingStep {
                            version: current.to_string(),
                            direction: "down",
                        })?;
                    debug!(chain = self.name, step = edge.step.description(), "down");
                    doc = edge.step.down(doc, &options.props).await?;
                    check_stamp(&doc, edge, &edge.from)?;
                    current = edge.from.clone();
                }
            }
        }

        info!(chain = self.name, version = %current, "migrated");
        Ok(doc)
    }
}

fn check_stamp(doc: &Value, edge: &Edge, expected: &Version) -> MigrationResult<()> {
    let returned = version_of(doc);
    let matches = returned
        .and_then(|v| Version::parse(v).ok())
        .is_some_and(|v| &v == expected);
    if matches {
        Ok(())
    } else {
        Err(MigrationError::StepContract {
            from: edge.from.to_string(),
            to: edge.to.to_string(),
            returned: returned.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrate::step::SyncStep;
    use async_trait::async_trait;
    use serde_json::{json, Map};

    fn identity(doc: Map<String, Value>) -> MigrationResult<Map<String, Value>> {
        Ok(doc)
    }

    fn push_up(mut doc: Map<String, Value>) -> MigrationResult<Map<String, Value>> {
        let trail = doc
            .entry("trail")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = trail {
            items.push(json!("up"));
        }
        Ok(doc)
    }

    fn chain(steps: &[(&'static str, &'static str)]) -> MigrationResult<MigrationChain> {
        MigrationChain::new(
            "test",
            steps
                .iter()
                .map(|(from, to)| {
                    Box::new(SyncStep::new(from, to, "step", push_up, identity))
                        as Box<dyn Migration>
                })
                .collect(),
        )
    }

    #[test]
    fn rejects_gaps_and_backward_steps() {
        assert!(matches!(
            chain(&[("1.0.0", "1.1.0"), ("1.2.0", "2.0.0")]),
            Err(MigrationError::BrokenChain(_))
        ));
        assert!(matches!(
            chain(&[("2.0.0", "1.0.0")]),
            Err(MigrationError::BrokenChain(_))
        ));
        assert!(matches!(chain(&[]), Err(MigrationError::BrokenChain(_))));
    }

    #[test]
    fn lists_versions_oldest_first() {
        let chain = chain(&[("1.0.0", "1.1.0"), ("1.1.0", "2.0.0")]).unwrap();
        assert_eq!(chain.versions(), vec!["1.0.0", "1.1.0", "2.0.0"]);
        assert_eq!(chain.oldest(), "1.0.0");
        assert_eq!(chain.current(), "2.0.0");
    }

    #[tokio::test]
    async fn walks_every_step_in_order() {
        let chain = chain(&[("1.0.0", "1.1.0"), ("1.1.0", "2.0.0")]).unwrap();
        let out = chain
            .migrate(json!({ "version": "1.0.0" }), &MigrateOptions::new())
            .await
            .unwrap();
        assert_eq!(out, json!({ "version": "2.0.0", "trail": ["up", "up"] }));
    }

    #[tokio::test]
    async fn same_version_is_a_no_op() {
        let chain = chain(&[("1.0.0", "1.1.0")]).unwrap();
        let doc = json!({ "version": "1.1.0", "payload": 1 });
        let out = chain.migrate(doc.clone(), &MigrateOptions::new()).await.unwrap();
        assert_eq!(out, doc);
    }

    #[tokio::test]
    async fn unknown_start_fails_loudly() {
        let chain = chain(&[("1.0.0", "1.1.0")]).unwrap();
        let err = chain
            .migrate(json!({ "version": "0.9.0" }), &MigrateOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::MissingStep { version, direction: "up" } if version == "0.9.0"
        ));
    }

    #[tokio::test]
    async fn missing_version_starts_at_the_oldest() {
        let chain = chain(&[("1.0.0", "1.1.0")]).unwrap();
        let out = chain.migrate(json!({}), &MigrateOptions::new()).await.unwrap();
        assert_eq!(out["version"], "1.1.0");
    }

    #[tokio::test]
    async fn target_between_versions_fails_loudly() {
        let chain = chain(&[("1.0.0", "1.1.0"), ("1.1.0", "2.0.0")]).unwrap();
        let err = chain
            .migrate(
                json!({ "version": "1.0.0" }),
                &MigrateOptions::new().to_version("1.0.5"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::UnknownVersion { chain: "test", version } if version == "1.0.5"
        ));
    }

    #[tokio::test]
    async fn start_between_versions_fails_loudly() {
        let chain = chain(&[("1.0.0", "1.1.0"), ("1.1.0", "2.0.0")]).unwrap();
        let err = chain
            .migrate(
                json!({ "version": "1.0.5" }),
                &MigrateOptions::new().to_version("1.0.0"),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::MissingStep { version, direction: "down" } if version == "1.0.5"
        ));
    }

    // --- Scenario: a shortened version is not a chain version ---

    #[tokio::test]
    async fn shortened_target_is_rejected() {
        let chain = chain(&[("1.0.0", "1.1.0")]).unwrap();
        let err = chain
            .migrate(
                json!({ "version": "1.0.0" }),
                &MigrateOptions::new().to_version("1.1"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::UnknownVersion { .. }));
    }

    struct Forgetful;

    #[async_trait]
    impl Migration for Forgetful {
        fn description(&self) -> &str {
            "forgets to stamp"
        }
        fn from_version(&self) -> &str {
            "1.0.0"
        }
        fn to_version(&self) -> &str {
            "1.1.0"
        }
        async fn up(&self, doc: Value, _: &MigrationProps) -> MigrationResult<Value> {
            Ok(doc)
        }
        async fn down(&self, doc: Value, _: &MigrationProps) -> MigrationResult<Value> {
            Ok(doc)
        }
    }

    #[tokio::test]
    async fn step_must_stamp_its_version() {
        let chain = MigrationChain::new("test", vec![Box::new(Forgetful)]).unwrap();
        let err = chain
            .migrate(json!({ "version": "1.0.0" }), &MigrateOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::StepContract { returned: Some(v), .. } if v == "1.0.0"
        ));
    }
}
