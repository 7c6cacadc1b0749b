//! trace-persistence
//!
//! Backend compartido del contrato `LineageStore` del core, pensado para
//! varios productores instrumentados dentro del mismo proceso. La
//! persistencia relacional queda fuera de alcance: este crate materializa
//! las garantías de la frontera (commit atómico por llamada, upsert
//! insert-if-absent de artifacts, consulta de arista inversa) sobre mapas
//! concurrentes.
//!
//! Módulos:
//! - `mem`: `SharedLineageStore` sobre DashMap.
//! - `config`: carga de configuración desde .env / variables `TRACE_*`.
//! - `error`: errores semánticos de la capa, mapeados a `CoreError`.

pub mod config;
pub mod error;
pub mod mem;

pub use config::StoreConfig;
pub use error::PersistenceError;
pub use mem::SharedLineageStore;
