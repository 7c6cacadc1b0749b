//! Propagación de staleness por la relación inversa de dependencia.
//!
//! Cuando un run o artifact histórico se corrige, los runs aguas abajo
//! quedan potencialmente inválidos. La propagación es bajo demanda (nunca
//! automática): BFS desde el origen siguiendo `find_dependents`, anotando
//! cada run alcanzado exactamente una vez POR LLAMADA. Llamadas repetidas
//! anotan de nuevo — staleness es historial acumulado, no un flag.
use indexmap::IndexSet;
use std::collections::VecDeque;

use crate::errors::CoreError;
use crate::store::LineageStore;
use trace_domain::RunId;

pub struct StalenessPropagator;

impl StalenessPropagator {
    pub fn new() -> Self {
        Self
    }

    /// Marca stale todo run alcanzable desde `origin` por aristas inversas,
    /// anexando `reason` a cada uno. El origen mismo no se marca. Devuelve
    /// las identidades marcadas en orden de visita.
    ///
    /// El visited-set incluye al origen, de modo que un grafo corrupto con
    /// ciclos termina igual en vez de iterar indefinidamente.
    pub fn propagate<S: LineageStore>(&self, store: &mut S, origin: RunId, reason: &str) -> Result<IndexSet<RunId>, CoreError> {
        let mut visited: IndexSet<RunId> = IndexSet::new();
        visited.insert(origin);
        let mut marked: IndexSet<RunId> = IndexSet::new();
        let mut queue: VecDeque<RunId> = VecDeque::new();

        for dependent in store.find_dependents(origin) {
            if let Some(id) = dependent.id() {
                queue.push_back(id);
            }
        }

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            store.add_staleness_message(current, reason)?;
            marked.insert(current);
            for dependent in store.find_dependents(current) {
                if let Some(id) = dependent.id() {
                    if !visited.contains(&id) {
                        queue.push_back(id);
                    }
                }
            }
        }
        Ok(marked)
    }
}

impl Default for StalenessPropagator {
    fn default() -> Self {
        Self::new()
    }
}
