use async_trait::async_trait;
use chartconf::migrate::{CubeResolver, DataSource, ResolveError, VersionSuffixResolver};
use std::sync::Mutex;

/// Strips version suffixes like the default resolver and remembers every
/// lookup. Cubes listed as unreachable fail.
#[derive(Default)]
pub struct RecordingResolver {
    lookups: Mutex<Vec<String>>,
    unreachable: Vec<String>,
}

impl RecordingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unreachable(mut self, cube_iri: impl Into<String>) -> Self {
        self.unreachable.push(cube_iri.into());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl CubeResolver for RecordingResolver {
    async fn unversioned_iri(
        &self,
        cube_iri: &str,
        data_source: &DataSource,
    ) -> Result<String, ResolveError> {
        self.lookups.lock().unwrap().push(cube_iri.to_string());
        if self.unreachable.iter().any(|iri| iri == cube_iri) {
            return Err(ResolveError::Lookup {
                iri: cube_iri.to_string(),
                message: format!("{} did not answer", data_source.url),
            });
        }
        VersionSuffixResolver.unversioned_iri(cube_iri, data_source).await
    }
}
