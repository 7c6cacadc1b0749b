//! Frontera de persistencia del grafo de linaje.
//!
//! El core no hace I/O: define el contrato `LineageStore` y provee un
//! backend en memoria de referencia (el análogo single-writer del backend
//! durable). Garantías del contrato:
//! - `commit` es atómico por llamada: el run, sus aristas y sus artifacts se
//!   vuelven visibles juntos o no se vuelven visibles.
//! - `upsert_artifact` es insert-if-absent por clave `(name, value)`: dos
//!   productores registrando la misma clave resuelven a una fila canónica,
//!   nunca a un crash de unicidad visible al caller.
//! - `find_dependents` es la consulta de arista inversa que recorre el
//!   propagador de staleness.
use chrono::Duration;
use indexmap::IndexMap;

use crate::errors::CoreError;
use trace_domain::{ArtifactKey, ArtifactPointer, RunId, RunRecord};

/// Umbral por defecto para el advisory de dependencia vieja: 30 días.
pub const DEFAULT_STALENESS_THRESHOLD_DAYS: i64 = 30;

pub trait LineageStore {
    /// Persiste el run (asignando `RunId` si no tiene) junto con sus
    /// artifacts. Un id ya asignado reemplaza el record almacenado
    /// (enmienda).
    fn commit(&mut self, run: RunRecord) -> Result<RunId, CoreError>;
    /// Recupera un run por identidad.
    fn get(&self, id: RunId) -> Result<RunRecord, CoreError>;
    /// Todos los runs que declaran a `id` entre sus dependencias.
    fn find_dependents(&self, id: RunId) -> Vec<RunRecord>;
    /// Pointer canónico por `(name, value)`, insertando si no existe.
    fn upsert_artifact(&mut self, pointer: ArtifactPointer) -> ArtifactPointer;
    /// Anexa un mensaje de staleness a un run ya persistido.
    fn add_staleness_message(&mut self, id: RunId, message: &str) -> Result<(), CoreError>;
}

/// Advisories de staleness calculados al commit (recuperado del diseño
/// original de commit_component_run):
/// - dependencia que terminó más de `threshold` antes del start de este run,
/// - dependencia cuyo output consumido aquí fue re-producido por un run más
///   fresco del mismo componente antes de que este run arrancara.
pub fn staleness_advisories(run: &RunRecord, deps: &[&RunRecord], all: &[&RunRecord], threshold: Duration) -> Vec<String> {
    let mut messages = Vec::new();
    let start = match run.start_timestamp() {
        Some(start) => start,
        None => return messages,
    };
    for dep in deps {
        let dep_id = match dep.id() {
            Some(id) => id,
            None => continue,
        };
        if let Some(end) = dep.end_timestamp() {
            if start - end > threshold {
                messages.push(format!("{} ({}) finished more than {} days before this run started",
                                      dep.component_name(),
                                      dep_id,
                                      threshold.num_days()));
            }
        }
        // Output re-producido por un run más fresco del MISMO componente.
        // Otro componente que emite la misma clave no invalida al productor.
        for output in dep.outputs() {
            if !run.inputs().contains(output) {
                continue;
            }
            for other in all {
                let other_id = match other.id() {
                    Some(id) => id,
                    None => continue,
                };
                if other_id == dep_id
                    || other.component_name() != dep.component_name()
                    || !other.outputs().contains(output)
                {
                    continue;
                }
                let fresher = match (other.end_timestamp(), dep.end_timestamp()) {
                    (Some(other_end), Some(dep_end)) => other_end > dep_end && other_end < start,
                    _ => false,
                };
                if fresher {
                    messages.push(format!("{} ({}) produced a fresher {} before this run started",
                                          other.component_name(),
                                          other_id,
                                          output.name()));
                }
            }
        }
    }
    messages
}

/// Backend en memoria de referencia. Single-writer, sin I/O.
pub struct InMemoryLineageStore {
    runs: IndexMap<RunId, RunRecord>,
    artifacts: IndexMap<ArtifactKey, ArtifactPointer>,
    staleness_threshold: Duration,
}

impl Default for InMemoryLineageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLineageStore {
    pub fn new() -> Self {
        InMemoryLineageStore {
            runs: IndexMap::new(),
            artifacts: IndexMap::new(),
            staleness_threshold: Duration::days(DEFAULT_STALENESS_THRESHOLD_DAYS),
        }
    }

    pub fn with_staleness_threshold(threshold: Duration) -> Self {
        InMemoryLineageStore { staleness_threshold: threshold, ..Self::new() }
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    pub fn artifact(&self, key: &ArtifactKey) -> Option<&ArtifactPointer> {
        self.artifacts.get(key)
    }

    /// Runs en orden de commit (iteración determinista del IndexMap).
    pub fn runs(&self) -> impl Iterator<Item = &RunRecord> {
        self.runs.values()
    }
}

impl LineageStore for InMemoryLineageStore {
    fn commit(&mut self, mut run: RunRecord) -> Result<RunId, CoreError> {
        let id = match run.id() {
            Some(id) => id,
            None => {
                let id = RunId::generate();
                run.assign_id(id);
                id
            }
        };
        for pointer in run.inputs().iter().chain(run.outputs().iter()) {
            self.artifacts.entry(pointer.key()).or_insert_with(|| pointer.clone());
        }
        // Una enmienda conserva el log de staleness ya acumulado; los
        // advisories de commit se calculan una sola vez, al primer commit.
        if !self.runs.contains_key(&id) {
            let deps: Vec<&RunRecord> = run.dependencies()
                                           .iter()
                                           .filter_map(|dep| self.runs.get(dep))
                                           .collect();
            let all: Vec<&RunRecord> = self.runs.values().collect();
            let advisories = staleness_advisories(&run, &deps, &all, self.staleness_threshold);
            for message in advisories {
                run.add_staleness_message(message);
            }
        }
        self.runs.insert(id, run);
        Ok(id)
    }

    fn get(&self, id: RunId) -> Result<RunRecord, CoreError> {
        self.runs.get(&id).cloned().ok_or(CoreError::RunNotFound(id))
    }

    fn find_dependents(&self, id: RunId) -> Vec<RunRecord> {
        self.runs
            .values()
            .filter(|run| run.dependencies().contains(&id))
            .cloned()
            .collect()
    }

    fn upsert_artifact(&mut self, pointer: ArtifactPointer) -> ArtifactPointer {
        self.artifacts.entry(pointer.key()).or_insert(pointer).clone()
    }

    fn add_staleness_message(&mut self, id: RunId, message: &str) -> Result<(), CoreError> {
        let run = self.runs.get_mut(&id).ok_or(CoreError::RunNotFound(id))?;
        run.add_staleness_message(message);
        Ok(())
    }
}
