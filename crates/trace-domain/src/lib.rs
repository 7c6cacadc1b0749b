// trace-domain library entry point
pub mod component;
pub mod error;
pub mod pointer;
pub mod run;
pub use component::{Component, Tag};
pub use error::DomainError;
pub use pointer::{ArtifactKey, ArtifactPointer, Label, PointerType};
pub use run::{CompletenessReport, RunId, RunRecord};
