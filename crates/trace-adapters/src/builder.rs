//! Construcción fluida de `RunRecord`s para capas de instrumentación.
//!
//! La capa que envuelve funciones arbitrarias (fuera de este workspace)
//! necesita armar un record desde argumentos de llamada: nombre del
//! componente, paths de entrada/salida, metadata git. `RunBuilder` junta
//! esas piezas y entrega un record con el start timestamp ya puesto; los
//! inputs/outputs por nombre pasan por la inferencia de extensión.
use trace_core::{CoreError, LineageStore};
use trace_domain::{ArtifactPointer, DomainError, RunId, RunRecord};

use crate::extensions::infer_pointer_type;

/// Cierra (si hace falta) y comitea un run en nombre de la capa de
/// instrumentación: el envoltorio de función termina, el record se sella con
/// end timestamp y se persiste en una sola llamada.
pub fn log_run<S: LineageStore>(store: &mut S, mut run: RunRecord) -> Result<RunId, CoreError> {
    if !run.is_closed() {
        run.set_end_timestamp(None);
    }
    store.commit(run)
}

pub struct RunBuilder {
    component_name: String,
    notes: Option<String>,
    git_hash: Option<String>,
    git_tags: Vec<String>,
    code_snapshot: Option<Vec<u8>>,
    named_inputs: Vec<String>,
    input_pointers: Vec<ArtifactPointer>,
    named_outputs: Vec<String>,
    output_pointers: Vec<ArtifactPointer>,
    upstream: Vec<RunId>,
    external_run_id: Option<String>,
}

impl RunBuilder {
    pub fn new(component_name: impl Into<String>) -> Self {
        RunBuilder {
            component_name: component_name.into(),
            notes: None,
            git_hash: None,
            git_tags: Vec::new(),
            code_snapshot: None,
            named_inputs: Vec::new(),
            input_pointers: Vec::new(),
            named_outputs: Vec::new(),
            output_pointers: Vec::new(),
            upstream: Vec::new(),
            external_run_id: None,
        }
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn git_hash(mut self, hash: impl Into<String>) -> Self {
        self.git_hash = Some(hash.into());
        self
    }

    pub fn git_tag(mut self, tag: impl Into<String>) -> Self {
        self.git_tags.push(tag.into());
        self
    }

    pub fn code_snapshot(mut self, snapshot: impl Into<Vec<u8>>) -> Self {
        self.code_snapshot = Some(snapshot.into());
        self
    }

    /// Input por nombre; el tipo sale de la tabla de extensiones.
    pub fn input(mut self, name: impl Into<String>) -> Self {
        self.named_inputs.push(name.into());
        self
    }

    /// Input ya construido (p. ej. registrado en el working set).
    pub fn input_pointer(mut self, pointer: ArtifactPointer) -> Self {
        self.input_pointers.push(pointer);
        self
    }

    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.named_outputs.push(name.into());
        self
    }

    pub fn output_pointer(mut self, pointer: ArtifactPointer) -> Self {
        self.output_pointers.push(pointer);
        self
    }

    pub fn upstream(mut self, dependency: RunId) -> Self {
        self.upstream.push(dependency);
        self
    }

    pub fn external_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.external_run_id = Some(run_id.into());
        self
    }

    /// Materializa el record con el start timestamp en "ahora".
    pub fn build(self) -> Result<RunRecord, DomainError> {
        let mut run = RunRecord::new(self.component_name)?;
        run.set_start_timestamp(None);
        if let Some(notes) = self.notes {
            run.set_notes(notes);
        }
        if let Some(hash) = self.git_hash {
            run.set_git_hash(hash);
        }
        if !self.git_tags.is_empty() {
            run.set_git_tags(self.git_tags);
        }
        if let Some(snapshot) = self.code_snapshot {
            run.set_code_snapshot(snapshot);
        }
        if let Some(run_id) = self.external_run_id {
            run.set_external_run_id(run_id);
        }
        for name in &self.named_inputs {
            run.add_input_named(name, Some(infer_pointer_type(name)))?;
        }
        run.add_inputs(self.input_pointers);
        for name in &self.named_outputs {
            run.add_output_named(name, Some(infer_pointer_type(name)))?;
        }
        run.add_outputs(self.output_pointers);
        run.set_upstream_all(self.upstream)?;
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_core::InMemoryLineageStore;
    use trace_domain::PointerType;

    #[test]
    fn log_run_closes_and_commits() {
        let mut store = InMemoryLineageStore::new();
        let run = RunBuilder::new("etl").input("raw.csv").output("features.pq").build().unwrap();
        let id = log_run(&mut store, run).unwrap();
        let committed = store.get(id).unwrap();
        assert!(committed.is_closed());
        assert_eq!(committed.outputs().len(), 1);
    }

    #[test]
    fn builder_populates_record_with_inferred_types() {
        let dep = RunId::generate();
        let run = RunBuilder::new("training")
            .notes("nightly retrain")
            .git_hash("deadbeef")
            .git_tag("v1.2")
            .input("features.pq")
            .output("model.pkl")
            .upstream(dep)
            .build()
            .unwrap();

        assert!(run.start_timestamp().is_some());
        assert_eq!(run.notes(), "nightly retrain");
        assert_eq!(run.git_hash(), Some("deadbeef"));
        assert_eq!(run.inputs().iter().next().unwrap().pointer_type(), PointerType::Data);
        assert_eq!(run.outputs().iter().next().unwrap().pointer_type(), PointerType::Model);
        assert!(run.dependencies().contains(&dep));
        assert!(!run.is_closed(), "builder leaves the run open");
    }

    #[test]
    fn duplicate_named_inputs_dedup() {
        let run = RunBuilder::new("etl")
            .input("raw.csv")
            .input("raw.csv")
            .build()
            .unwrap();
        assert_eq!(run.inputs().len(), 1);
    }

    #[test]
    fn empty_component_name_fails() {
        assert!(RunBuilder::new("").build().is_err());
    }
}
