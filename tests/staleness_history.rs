//! Escenarios de staleness y ciclos sobre la fachada: la historia de
//! propagaciones se acumula y los ciclos cerrados se detectan en el check.
use traceflow_rust::{log_run, CompletenessValidator, LineageStore, RunBuilder, SharedLineageStore,
                     StalenessPropagator};

#[test]
fn staleness_is_cumulative_history_not_a_flag() {
    let mut store = SharedLineageStore::new();
    let a = log_run(&mut store, RunBuilder::new("a").output("t.pq").build().unwrap()).unwrap();
    let b_run = RunBuilder::new("b").input("t.pq").output("u.pq").upstream(a).build().unwrap();
    let b = log_run(&mut store, b_run).unwrap();
    let c_run = RunBuilder::new("c").input("u.pq").upstream(b).build().unwrap();
    let c = log_run(&mut store, c_run).unwrap();

    let propagator = StalenessPropagator::new();
    propagator.propagate(&mut store, a, "R").unwrap();
    propagator.propagate(&mut store, a, "R").unwrap();
    propagator.propagate(&mut store, b, "S").unwrap();

    let b_rec = store.get(b).unwrap();
    assert_eq!(b_rec.stale().len(), 2, "two propagations from a");
    assert!(b_rec.stale().iter().all(|m| m.contains('R')));

    let c_rec = store.get(c).unwrap();
    assert_eq!(c_rec.stale().len(), 3, "two from a plus one from b");
    assert_eq!(c_rec.stale().iter().filter(|m| m.contains('S')).count(), 1);

    assert!(store.get(a).unwrap().stale().is_empty());
}

#[test]
fn closed_cycle_is_fatal_for_every_member() {
    let mut store = SharedLineageStore::new();
    let a = log_run(&mut store, RunBuilder::new("a").build().unwrap()).unwrap();
    let b = log_run(&mut store, RunBuilder::new("b").upstream(a).build().unwrap()).unwrap();
    let c = log_run(&mut store, RunBuilder::new("c").upstream(b).build().unwrap()).unwrap();

    // Enmienda que cierra el ciclo A → B → C → A.
    let mut a_rec = store.get(a).unwrap();
    a_rec.set_upstream(c).unwrap();
    store.commit(a_rec).unwrap();

    let validator = CompletenessValidator::new();
    for id in [a, b, c] {
        let report = validator.check_in_graph(&store.get(id).unwrap(), &store);
        assert!(!report.success, "member {id} must fail");
        assert!(report.messages.iter().any(|m| m.contains("circular dependency")));
    }
}
