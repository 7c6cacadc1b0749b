//! Errores específicos del core de linaje.

use thiserror::Error;
use trace_domain::{ArtifactKey, DomainError, RunId};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("run not found: {0}")] RunNotFound(RunId),
    #[error("artifact not found: {0}")] ArtifactNotFound(ArtifactKey),
    #[error(transparent)] Domain(#[from] DomainError),
    #[error("store error: {0}")] Store(String),
}
