//! Validación de completitud contra el grafo persistido.
//!
//! Las reglas locales (timestamps, I/O vacío, self-dependency) viven en el
//! propio `RunRecord`; este módulo agrega la regla estructural que requiere
//! el grafo: un camino de dependencias que vuelve al record es un ciclo
//! fatal. La detección es diferida a propósito — las aristas se insertan
//! antes de conocer la aciclicidad (el destino puede no estar persistido
//! todavía).
use indexmap::IndexSet;

use crate::store::LineageStore;
use trace_domain::{CompletenessReport, RunId, RunRecord};

/// Verificador sin estado; `check` evalúa las reglas locales y
/// `check_in_graph` suma la detección de ciclos sobre el store.
pub struct CompletenessValidator;

impl CompletenessValidator {
    pub fn new() -> Self {
        Self
    }

    /// Reglas locales únicamente (sin tocar el store).
    pub fn check(&self, run: &RunRecord) -> CompletenessReport {
        run.check_completeness()
    }

    /// Reglas locales más el recorrido de ciclos: DFS por las aristas de
    /// dependencia persistidas buscando un retorno a la identidad del
    /// record. El visited-set garantiza terminación incluso sobre un grafo
    /// corrupto; aristas hacia runs no persistidos se ignoran (inserción
    /// diferida legítima).
    pub fn check_in_graph<S: LineageStore>(&self, run: &RunRecord, store: &S) -> CompletenessReport {
        let mut report = self.check(run);
        let own_id = match run.id() {
            Some(id) => id,
            None => return report, // sin identidad no puede haber ciclo cerrado
        };

        let mut visited: IndexSet<RunId> = IndexSet::new();
        let mut stack: Vec<RunId> = run.dependencies().iter().copied().collect();
        while let Some(current) = stack.pop() {
            if current == own_id {
                // El caso directo ya lo reporta la regla local; éste cubre
                // el ciclo transitivo a través del grafo persistido.
                if !run.dependencies().contains(&own_id) {
                    report.push_fatal(format!("{} run has a circular dependency", run.component_name()));
                }
                break;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Ok(dep) = store.get(current) {
                stack.extend(dep.dependencies().iter().copied());
            }
        }
        report
    }
}

impl Default for CompletenessValidator {
    fn default() -> Self {
        Self::new()
    }
}
