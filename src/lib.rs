//! traceflow-rust: motor de linaje y proveniencia para pipelines de datos/ML.
//!
//! Fachada del workspace: re-exporta las piezas de los crates miembros para
//! consumidores que quieran un solo `use`.
//! - `trace-domain`: entidades (`ArtifactPointer`, `Component`, `RunRecord`).
//! - `trace-core`: registro de artifacts, frontera de persistencia,
//!   validación de completitud, propagación de staleness.
//! - `trace-adapters`: inferencia por extensión y `RunBuilder`.
//! - `trace-persistence`: backend compartido multi-productor.

pub use trace_adapters::{infer_pointer_type, log_run, RunBuilder};
pub use trace_core::{ArtifactRegistry, CompletenessValidator, CoreError, InMemoryLineageStore, LineageStore,
                     StalenessPropagator};
pub use trace_domain::{ArtifactKey, ArtifactPointer, Component, CompletenessReport, DomainError, Label, PointerType,
                       RunId, RunRecord, Tag};
pub use trace_persistence::{PersistenceError, SharedLineageStore, StoreConfig};
