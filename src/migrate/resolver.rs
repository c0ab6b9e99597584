//! Cube identifier lookup for the component id migration
//!
//! Component ids are built from the *unversioned* cube iri, which only the
//! data source knows. The lookup is a collaborator behind [`CubeResolver`].

use super::error::ResolveError;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Where the cubes of a document live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub url: String,
}

impl DataSource {
    pub fn sparql(url: impl Into<String>) -> Self {
        Self {
            source_type: "sparql".to_string(),
            url: url.into(),
        }
    }
}

/// Maps a versioned cube iri to its unversioned form.
#[async_trait]
pub trait CubeResolver: Send + Sync {
    async fn unversioned_iri(
        &self,
        cube_iri: &str,
        data_source: &DataSource,
    ) -> Result<String, ResolveError>;
}

/// Strips a trailing numeric path segment: `https://x/cube/3` becomes
/// `https://x/cube`. Iris without one are already unversioned.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionSuffixResolver;

#[async_trait]
impl CubeResolver for VersionSuffixResolver {
    async fn unversioned_iri(
        &self,
        cube_iri: &str,
        _data_source: &DataSource,
    ) -> Result<String, ResolveError> {
        let trimmed = cube_iri.trim_end_matches('/');
        let unversioned = match trimmed.rsplit_once('/') {
            Some((base, last)) if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) => {
                base
            }
            _ => trimmed,
        };
        Ok(unversioned.to_string())
    }
}

/// A fixed lookup table
#[derive(Debug, Clone, Default)]
pub struct StaticCubeResolver {
    cubes: HashMap<String, String>,
}

impl StaticCubeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cube(mut self, versioned: impl Into<String>, unversioned: impl Into<String>) -> Self {
        self.cubes.insert(versioned.into(), unversioned.into());
        self
    }
}

impl FromIterator<(String, String)> for StaticCubeResolver {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            cubes: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl CubeResolver for StaticCubeResolver {
    async fn unversioned_iri(
        &self,
        cube_iri: &str,
        _data_source: &DataSource,
    ) -> Result<String, ResolveError> {
        self.cubes
            .get(cube_iri)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownCube(cube_iri.to_string()))
    }
}

/// Memoizes another resolver per data source and cube.
pub struct CachingResolver<R> {
    inner: R,
    cache: DashMap<(String, String), String>,
}

impl<R: CubeResolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: DashMap::new(),
        }
    }

    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: CubeResolver> CubeResolver for CachingResolver<R> {
    async fn unversioned_iri(
        &self,
        cube_iri: &str,
        data_source: &DataSource,
    ) -> Result<String, ResolveError> {
        let key = (data_source.url.clone(), cube_iri.to_string());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.value().clone());
        }
        let resolved = self.inner.unversioned_iri(cube_iri, data_source).await?;
        debug!(cube_iri, unversioned = %resolved, "resolved cube");
        self.cache.insert(key, resolved.clone());
        Ok(resolved)
    }
}
