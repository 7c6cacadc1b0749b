//! trace-adapters: colaboradores de frontera del core de linaje.
//!
//! Nada de este crate introduce semántica de grafo; sólo la inferencia de
//! tipo por extensión (consumida por add_input/add_output con nombre pelado)
//! y la construcción fluida de records para instrumentación.
pub mod builder;
pub mod extensions;

pub use builder::{log_run, RunBuilder};
pub use extensions::infer_pointer_type;
