//! Errores de la capa de store compartido.
//! Mapea hacia `CoreError` para cumplir el contrato `LineageStore`.

use thiserror::Error;
use trace_core::CoreError;
use trace_domain::RunId;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("run not found: {0}")]
    NotFound(RunId),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<PersistenceError> for CoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(id) => CoreError::RunNotFound(id),
            PersistenceError::InvalidConfig(msg) => CoreError::Store(msg),
        }
    }
}
