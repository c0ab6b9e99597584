use thiserror::Error;

/// Errors from the cube identifier lookup used by id migrations
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Unknown cube: {0}")]
    UnknownCube(String),

    #[error("Lookup failed for {iri}: {message}")]
    Lookup { iri: String, message: String },
}

/// Errors raised while walking a migration chain
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Invalid version: {0:?}")]
    InvalidVersion(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("No migration step {direction} from version {version}")]
    MissingStep {
        version: String,
        direction: &'static str,
    },

    #[error("The {chain} chain has no version {version}")]
    UnknownVersion {
        chain: &'static str,
        version: String,
    },

    #[error("Broken migration chain: {0}")]
    BrokenChain(String),

    #[error("Step {from} -> {to} returned version {returned:?}")]
    StepContract {
        from: String,
        to: String,
        returned: Option<String>,
    },

    #[error("Step {step} needs {what}")]
    MissingProps { step: String, what: &'static str },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Chart {index} ({key}) failed to migrate: {source}")]
    NestedChart {
        index: usize,
        key: String,
        source: Box<MigrationError>,
    },

    #[error("Chart {index} is at version {found}, expected {expected}")]
    InconsistentNestedVersion {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for migrations
pub type MigrationResult<T> = Result<T, MigrationError>;
