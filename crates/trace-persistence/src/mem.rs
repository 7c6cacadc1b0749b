//! Store compartido entre productores concurrentes.
//!
//! Varias funciones instrumentadas pueden comitear runs contra el mismo
//! backend a la vez. Las garantías que este módulo aporta sobre el backend
//! de referencia del core:
//! - `upsert_artifact` es insert-if-absent ATÓMICO por clave `(name, value)`
//!   (entry API de DashMap): dos procesos registrando el mismo pointer
//!   resuelven a una fila canónica, sin crash de unicidad visible.
//! - Los métodos toman `&self`; la instancia se comparte vía `Arc`.
//! - Paridad semántica con `InMemoryLineageStore`: los advisories de commit
//!   reutilizan `staleness_advisories` del core, no duplican reglas.
use chrono::Duration;
use dashmap::DashMap;
use log::{debug, warn};

use crate::error::PersistenceError;
use trace_core::store::{staleness_advisories, LineageStore, DEFAULT_STALENESS_THRESHOLD_DAYS};
use trace_core::CoreError;
use trace_domain::{ArtifactKey, ArtifactPointer, RunId, RunRecord};

pub struct SharedLineageStore {
    runs: DashMap<RunId, RunRecord>,
    artifacts: DashMap<ArtifactKey, ArtifactPointer>,
    staleness_threshold: Duration,
}

impl Default for SharedLineageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedLineageStore {
    pub fn new() -> Self {
        SharedLineageStore {
            runs: DashMap::new(),
            artifacts: DashMap::new(),
            staleness_threshold: Duration::days(DEFAULT_STALENESS_THRESHOLD_DAYS),
        }
    }

    pub fn from_config(config: &crate::config::StoreConfig) -> Self {
        SharedLineageStore {
            runs: DashMap::new(),
            artifacts: DashMap::new(),
            staleness_threshold: Duration::days(config.staleness_threshold_days),
        }
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }

    pub fn artifact(&self, key: &ArtifactKey) -> Option<ArtifactPointer> {
        self.artifacts.get(key).map(|entry| entry.clone())
    }

    /// Commit con `&self`: asigna id si falta, upserta artifacts y calcula
    /// advisories de staleness contra el snapshot actual de runs.
    pub fn commit_run(&self, mut run: RunRecord) -> Result<RunId, PersistenceError> {
        debug!("commit:start component={}", run.component_name());
        let mut amend = false;
        let id = match run.id() {
            Some(id) => {
                if self.runs.contains_key(&id) {
                    debug!("commit:amend id={id}");
                    amend = true;
                }
                id
            }
            None => {
                let id = RunId::generate();
                run.assign_id(id);
                id
            }
        };
        for pointer in run.inputs().iter().chain(run.outputs().iter()) {
            self.artifacts.entry(pointer.key()).or_insert_with(|| pointer.clone());
        }
        // Advisories sólo en el primer commit: una enmienda conserva el log
        // acumulado sin re-anexar los mismos mensajes. Snapshot del mapa para
        // no sostener locks de shard durante el cálculo.
        if !amend {
            let all: Vec<RunRecord> = self.runs.iter().map(|entry| entry.value().clone()).collect();
            let deps: Vec<&RunRecord> = all.iter()
                                           .filter(|r| r.id().map(|rid| run.dependencies().contains(&rid)).unwrap_or(false))
                                           .collect();
            let all_refs: Vec<&RunRecord> = all.iter().collect();
            let advisories = staleness_advisories(&run, &deps, &all_refs, self.staleness_threshold);
            for message in advisories {
                warn!("commit:stale id={id} {message}");
                run.add_staleness_message(message);
            }
        }
        self.runs.insert(id, run);
        debug!("commit:done id={id}");
        Ok(id)
    }

    pub fn get_run(&self, id: RunId) -> Result<RunRecord, PersistenceError> {
        self.runs
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(PersistenceError::NotFound(id))
    }

    pub fn dependents_of(&self, id: RunId) -> Vec<RunRecord> {
        self.runs
            .iter()
            .filter(|entry| entry.value().dependencies().contains(&id))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Insert-if-absent atómico; devuelve siempre la fila canónica.
    pub fn upsert_artifact_shared(&self, pointer: ArtifactPointer) -> ArtifactPointer {
        self.artifacts.entry(pointer.key()).or_insert(pointer).clone()
    }

    pub fn append_staleness(&self, id: RunId, message: &str) -> Result<(), PersistenceError> {
        let mut entry = self.runs.get_mut(&id).ok_or(PersistenceError::NotFound(id))?;
        entry.add_staleness_message(message);
        Ok(())
    }
}

// El contrato del core toma &mut self; este backend sólo necesita &self, así
// que la implementación delega en los métodos compartidos.
impl LineageStore for SharedLineageStore {
    fn commit(&mut self, run: RunRecord) -> Result<RunId, CoreError> {
        self.commit_run(run).map_err(CoreError::from)
    }

    fn get(&self, id: RunId) -> Result<RunRecord, CoreError> {
        self.get_run(id).map_err(CoreError::from)
    }

    fn find_dependents(&self, id: RunId) -> Vec<RunRecord> {
        self.dependents_of(id)
    }

    fn upsert_artifact(&mut self, pointer: ArtifactPointer) -> ArtifactPointer {
        self.upsert_artifact_shared(pointer)
    }

    fn add_staleness_message(&mut self, id: RunId, message: &str) -> Result<(), CoreError> {
        self.append_staleness(id, message).map_err(CoreError::from)
    }
}
