//! Documents on disk
//!
//! Chart configurations, editor documents and component catalogs are read
//! from JSON or YAML, picked by file extension.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.yaml` and `.yml` are YAML, anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

pub fn parse_document<T: DeserializeOwned>(text: &str, format: Format) -> DocumentResult<T> {
    Ok(match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    })
}

pub fn read_document<T: DeserializeOwned>(path: &Path) -> DocumentResult<T> {
    let text = std::fs::read_to_string(path)?;
    parse_document(&text, Format::from_path(path))
}

/// Pretty JSON, or YAML
pub fn render_document<T: Serialize>(value: &T, format: Format) -> DocumentResult<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    })
}

pub fn write_document<T: Serialize>(path: &Path, value: &T) -> DocumentResult<()> {
    let text = render_document(value, Format::from_path(path))?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentCatalog;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("a.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.YAML")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a")), Format::Json);
    }

    #[test]
    fn yaml_and_json_read_the_same() {
        let dir = tempdir().unwrap();
        let doc = json!({ "version": "1.0.0", "chartType": "map", "fields": { "x": 1 } });

        let json_path = dir.path().join("chart.json");
        let yaml_path = dir.path().join("chart.yaml");
        write_document(&json_path, &doc).unwrap();
        write_document(&yaml_path, &doc).unwrap();

        let from_json: Value = read_document(&json_path).unwrap();
        let from_yaml: Value = read_document(&yaml_path).unwrap();
        assert_eq!(from_json, doc);
        assert_eq!(from_yaml, doc);
    }

    #[test]
    fn catalog_reads_from_yaml() {
        let text = r#"
dimensions:
  - id: year
    componentType: TemporalDimension
measures:
  - id: amount
    componentType: NumericalMeasure
    unit: t
"#;
        let catalog: ComponentCatalog = parse_document(text, Format::Yaml).unwrap();
        assert_eq!(catalog.dimensions[0].id, "year");
        assert_eq!(catalog.measures[0].unit.as_deref(), Some("t"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = read_document::<Value>(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }
}
