//! Propiedades observables del grafo de linaje, de punta a punta sobre la
//! fachada del workspace.
use indexmap::IndexSet;
use traceflow_rust::{ArtifactPointer, ArtifactRegistry, CompletenessValidator, InMemoryLineageStore, Label,
                     LineageStore, PointerType, RunId, RunRecord};

#[test]
fn roundtrip_preserves_io_and_dependency_sets() {
    let mut store = InMemoryLineageStore::new();

    let mut upstream = RunRecord::new("etl").unwrap();
    upstream.set_start_timestamp(None);
    upstream.set_end_timestamp(None);
    let d = store.commit(upstream).unwrap();

    let x = ArtifactPointer::new("x.csv", b"x-bytes", PointerType::Data).unwrap();
    let y = ArtifactPointer::new("y.pkl", b"y-bytes", PointerType::Model).unwrap();

    let mut run = RunRecord::new("training").unwrap();
    run.set_start_timestamp(None);
    run.add_input(x.clone());
    run.add_output(y.clone());
    run.set_upstream(d).unwrap();
    run.set_end_timestamp(None);
    let id = store.commit(run).unwrap();

    let fetched = store.get(id).unwrap();
    // Igualdad de sets, no de secuencias.
    let expected_inputs: IndexSet<ArtifactPointer> = [x].into_iter().collect();
    let expected_outputs: IndexSet<ArtifactPointer> = [y].into_iter().collect();
    let expected_deps: IndexSet<RunId> = [d].into_iter().collect();
    assert_eq!(fetched.inputs(), &expected_inputs);
    assert_eq!(fetched.outputs(), &expected_outputs);
    assert_eq!(fetched.dependencies(), &expected_deps);
}

#[test]
fn dedup_idempotence_between_registry_and_run() {
    let mut registry = ArtifactRegistry::new();
    let first = registry.register("features.pq", b"v1", Some(PointerType::Data)).unwrap().clone();
    let second = registry.register("features.pq", b"v1", None).unwrap().clone();
    assert_eq!(first, second, "same (name, value) must yield the canonical pointer");
    assert_eq!(registry.len(), 1);

    let mut run = RunRecord::new("etl").unwrap();
    run.add_input(first);
    let before = run.inputs().len();
    run.add_input(second);
    assert_eq!(run.inputs().len(), before, "duplicate add_input is a no-op");
}

#[test]
fn completeness_advisories_on_empty_record() {
    let run = RunRecord::new("orphan").unwrap();
    let report = CompletenessValidator::new().check(&run);
    assert!(!report.success);
    assert!(report.messages.len() >= 5, "two fatal + three advisory expected, got {:?}", report.messages);
    let fatal_timestamps = report.messages.iter().filter(|m| m.contains("timestamp")).count();
    assert_eq!(fatal_timestamps, 2);
}

#[test]
fn labels_attach_with_union_semantics() {
    let mut registry = ArtifactRegistry::new();
    let key = registry.register("preds.pq", b"", Some(PointerType::Data)).unwrap().key();
    registry
        .add_labels(&key, vec![Label::new("a").unwrap(), Label::new("b").unwrap()])
        .unwrap();
    registry
        .add_labels(&key, vec![Label::new("b").unwrap(), Label::new("c").unwrap()])
        .unwrap();
    let ids: Vec<&str> = registry.get(&key).unwrap().labels().iter().map(|l| l.id()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}
