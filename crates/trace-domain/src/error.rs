use crate::run::RunId;
use thiserror::Error;

/// Errores del dominio de linaje.
///
/// Las violaciones de tipo del diseño original (notes no-string, timestamp
/// no-datetime) quedan cubiertas por el sistema de tipos; aquí sólo viven
/// las violaciones que los tipos no pueden expresar.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("run {0} cannot depend on itself")]
    SelfDependency(RunId),

    #[error("name must not be empty")]
    EmptyName,
}
