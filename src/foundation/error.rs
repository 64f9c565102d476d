/// Convenience result type used across the crate.
pub type CelticResult<T> = Result<T, CelticError>;

/// Error taxonomy for lattice construction, tracing and animation.
#[derive(thiserror::Error, Debug)]
pub enum CelticError {
    /// The requested lattice parameters cannot produce a usable graph.
    #[error("degenerate lattice: {0}")]
    DegenerateLattice(String),

    /// A graph violated an invariant the tracer relies on.
    #[error("internal consistency error: {0}")]
    InternalConsistency(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration or reports.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CelticError {
    pub fn degenerate_lattice(msg: impl Into<String>) -> Self {
        Self::DegenerateLattice(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalConsistency(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether a fresh set of random lattice parameters may succeed where this failed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DegenerateLattice(_) | Self::InternalConsistency(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
