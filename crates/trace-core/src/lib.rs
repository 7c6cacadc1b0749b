//! trace-core: grafo de linaje y sus operaciones invariantes
pub mod errors;
pub mod registry;
pub mod staleness;
pub mod store;
pub mod validate;

pub use errors::CoreError;
pub use registry::ArtifactRegistry;
pub use staleness::StalenessPropagator;
pub use store::{staleness_advisories, InMemoryLineageStore, LineageStore, DEFAULT_STALENESS_THRESHOLD_DAYS};
pub use validate::CompletenessValidator;
