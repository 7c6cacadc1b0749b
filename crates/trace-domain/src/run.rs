//! `RunRecord`: una ejecución de un `Component`.
//!
//! Entidad central del grafo de linaje. Mantiene:
//! - sets deduplicados de inputs/outputs (identidad estructural del pointer),
//! - aristas de dependencia hacia otros runs (por `RunId`),
//! - el log append-only de mensajes de staleness,
//! - metadata de proveniencia opaca (git, tracker externo) que el core NO
//!   interpreta.
//!
//! Las aristas se insertan sin validar ciclos entre records (el destino puede
//! no estar persistido aún); la detección de ciclos es responsabilidad del
//! validador al momento de check/commit. La única violación rechazada en el
//! insert es la self-dependency, que siempre es detectable localmente.
use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::DomainError;
use crate::pointer::{ArtifactPointer, PointerType};
use std::fmt;

/// Identidad de un run, asignada por el store al commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Genera una identidad fresca. Reservado a la frontera de persistencia.
    pub fn generate() -> Self {
        RunId(Uuid::new_v4())
    }
    pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resultado de la verificación de completitud de un run.
///
/// Las reglas se evalúan todas (sin short-circuit) y los mensajes se
/// concatenan; los advisories no afectan `success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub success: bool,
    pub messages: Vec<String>,
}

impl CompletenessReport {
    pub fn new() -> Self {
        CompletenessReport { success: true, messages: Vec::new() }
    }

    /// Regla fatal: baja `success` y registra el mensaje.
    pub fn push_fatal(&mut self, message: impl Into<String>) {
        self.success = false;
        self.messages.push(message.into());
    }

    /// Regla advisory: registra el mensaje sin tocar `success`.
    pub fn push_warning(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

impl Default for CompletenessReport {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    id: Option<RunId>,
    component_name: String,
    notes: String,
    start_timestamp: Option<DateTime<Utc>>,
    end_timestamp: Option<DateTime<Utc>>,
    inputs: IndexSet<ArtifactPointer>,
    outputs: IndexSet<ArtifactPointer>,
    dependencies: IndexSet<RunId>,
    git_hash: Option<String>,
    git_tags: Vec<String>,
    code_snapshot: Option<Vec<u8>>,
    stale: Vec<String>,
    test_results: Value,
    external_run_id: Option<String>,
    external_metrics: IndexMap<String, Value>,
    external_params: IndexMap<String, Value>,
}

impl RunRecord {
    /// Crea un run para `component_name`. Todo lo demás se puebla de forma
    /// incremental; cada campo arranca con su contenedor vacío propio.
    pub fn new(component_name: impl Into<String>) -> Result<Self, DomainError> {
        let component_name = component_name.into();
        if component_name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(RunRecord {
            id: None,
            component_name,
            notes: String::new(),
            start_timestamp: None,
            end_timestamp: None,
            inputs: IndexSet::new(),
            outputs: IndexSet::new(),
            dependencies: IndexSet::new(),
            git_hash: None,
            git_tags: Vec::new(),
            code_snapshot: None,
            stale: Vec::new(),
            test_results: Value::Null,
            external_run_id: None,
            external_metrics: IndexMap::new(),
            external_params: IndexMap::new(),
        })
    }

    pub fn id(&self) -> Option<RunId> { self.id }
    pub fn component_name(&self) -> &str { &self.component_name }
    pub fn notes(&self) -> &str { &self.notes }
    pub fn start_timestamp(&self) -> Option<DateTime<Utc>> { self.start_timestamp }
    pub fn end_timestamp(&self) -> Option<DateTime<Utc>> { self.end_timestamp }
    pub fn inputs(&self) -> &IndexSet<ArtifactPointer> { &self.inputs }
    pub fn outputs(&self) -> &IndexSet<ArtifactPointer> { &self.outputs }
    pub fn dependencies(&self) -> &IndexSet<RunId> { &self.dependencies }
    pub fn git_hash(&self) -> Option<&str> { self.git_hash.as_deref() }
    pub fn git_tags(&self) -> &[String] { &self.git_tags }
    pub fn code_snapshot(&self) -> Option<&[u8]> { self.code_snapshot.as_deref() }
    pub fn stale(&self) -> &[String] { &self.stale }
    pub fn test_results(&self) -> &Value { &self.test_results }
    pub fn external_run_id(&self) -> Option<&str> { self.external_run_id.as_deref() }
    pub fn external_metrics(&self) -> &IndexMap<String, Value> { &self.external_metrics }
    pub fn external_params(&self) -> &IndexMap<String, Value> { &self.external_params }

    /// Un run queda "cerrado" cuando tiene end timestamp.
    pub fn is_closed(&self) -> bool {
        self.end_timestamp.is_some()
    }

    /// Asigna la identidad persistida. Sólo la frontera de persistencia
    /// debería llamar esto; reasignar sobre un id existente es un no-op si
    /// coincide.
    pub fn assign_id(&mut self, id: RunId) {
        self.id = Some(id);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Fija el start timestamp; `None` significa "ahora".
    pub fn set_start_timestamp(&mut self, ts: Option<DateTime<Utc>>) {
        self.start_timestamp = Some(ts.unwrap_or_else(Utc::now));
    }

    /// Fija el end timestamp (cierra el run); `None` significa "ahora".
    pub fn set_end_timestamp(&mut self, ts: Option<DateTime<Utc>>) {
        self.end_timestamp = Some(ts.unwrap_or_else(Utc::now));
    }

    pub fn set_git_hash(&mut self, git_hash: impl Into<String>) {
        self.git_hash = Some(git_hash.into());
    }

    pub fn set_git_tags(&mut self, git_tags: Vec<String>) {
        self.git_tags = git_tags;
    }

    pub fn set_code_snapshot(&mut self, snapshot: impl Into<Vec<u8>>) {
        self.code_snapshot = Some(snapshot.into());
    }

    /// Payload opaco con resultados de tests del run; el core no lo
    /// interpreta.
    pub fn set_test_results(&mut self, test_results: Value) {
        self.test_results = test_results;
    }

    pub fn set_external_run_id(&mut self, run_id: impl Into<String>) {
        self.external_run_id = Some(run_id.into());
    }

    pub fn set_external_metrics(&mut self, metrics: IndexMap<String, Value>) {
        self.external_metrics = metrics;
    }

    pub fn set_external_params(&mut self, params: IndexMap<String, Value>) {
        self.external_params = params;
    }

    /// Agrega un input ya construido. Duplicados (misma identidad) son no-op.
    pub fn add_input(&mut self, input: ArtifactPointer) {
        self.add_io(input, true);
    }

    pub fn add_inputs(&mut self, inputs: impl IntoIterator<Item = ArtifactPointer>) {
        for input in inputs {
            self.add_io(input, true);
        }
    }

    /// Agrega un input por nombre. El tipo lo aporta el colaborador externo
    /// de inferencia por extensión; sin hint cae a `Unknown`.
    pub fn add_input_named(&mut self, name: &str, hint: Option<PointerType>) -> Result<(), DomainError> {
        let pointer = ArtifactPointer::new(name, Vec::new(), hint.unwrap_or_default())?;
        self.add_io(pointer, true);
        Ok(())
    }

    pub fn add_output(&mut self, output: ArtifactPointer) {
        self.add_io(output, false);
    }

    pub fn add_outputs(&mut self, outputs: impl IntoIterator<Item = ArtifactPointer>) {
        for output in outputs {
            self.add_io(output, false);
        }
    }

    pub fn add_output_named(&mut self, name: &str, hint: Option<PointerType>) -> Result<(), DomainError> {
        let pointer = ArtifactPointer::new(name, Vec::new(), hint.unwrap_or_default())?;
        self.add_io(pointer, false);
        Ok(())
    }

    fn add_io(&mut self, pointer: ArtifactPointer, input: bool) {
        if input {
            self.inputs.insert(pointer);
        } else {
            self.outputs.insert(pointer);
        }
    }

    /// Declara una dependencia hacia otro run (API estilo set_upstream).
    ///
    /// Dedup por set; rechaza la identidad propia. NO verifica que el
    /// destino exista ni que el grafo siga acíclico: eso se valida lazy en
    /// el check de completitud.
    pub fn set_upstream(&mut self, dependency: RunId) -> Result<(), DomainError> {
        if self.id == Some(dependency) {
            return Err(DomainError::SelfDependency(dependency));
        }
        self.dependencies.insert(dependency);
        Ok(())
    }

    pub fn set_upstream_all(&mut self, dependencies: impl IntoIterator<Item = RunId>) -> Result<(), DomainError> {
        for dependency in dependencies {
            self.set_upstream(dependency)?;
        }
        Ok(())
    }

    /// Registra un evento de staleness. Append-only y NUNCA deduplicado:
    /// propagaciones repetidas son historia acumulada, no un flag booleano.
    pub fn add_staleness_message(&mut self, message: impl Into<String>) {
        self.stale.push(message.into());
    }

    /// Reglas locales de completitud (las que no requieren el grafo
    /// persistido):
    /// 1-2. timestamps faltantes → fatal,
    /// 3-5. inputs/outputs/dependencies vacíos → advisory,
    /// 6. la propia identidad entre las dependencias → fatal.
    pub fn check_completeness(&self) -> CompletenessReport {
        let mut report = CompletenessReport::new();
        if self.start_timestamp.is_none() {
            report.push_fatal(format!("{} run has no start timestamp", self.component_name));
        }
        if self.end_timestamp.is_none() {
            report.push_fatal(format!("{} run has no end timestamp", self.component_name));
        }
        if self.inputs.is_empty() {
            report.push_warning(format!("{} run has no inputs", self.component_name));
        }
        if self.outputs.is_empty() {
            report.push_warning(format!("{} run has no outputs", self.component_name));
        }
        if self.dependencies.is_empty() {
            report.push_warning(format!("{} run has no dependencies", self.component_name));
        }
        if let Some(id) = self.id {
            if self.dependencies.contains(&id) {
                report.push_fatal(format!("{} run has a circular dependency", self.component_name));
            }
        }
        report
    }
}

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<run: {} ({} inputs, {} outputs, {} deps)>",
               self.component_name,
               self.inputs.len(),
               self.outputs.len(),
               self.dependencies.len())
    }
}
