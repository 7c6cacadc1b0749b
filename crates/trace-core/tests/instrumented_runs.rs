//! Escenario estilo instrumentación: records armados con RunBuilder,
//! comiteados vía log_run, consultados por el validador y el propagador.
use trace_adapters::{log_run, RunBuilder};
use trace_core::{CompletenessValidator, InMemoryLineageStore, LineageStore, StalenessPropagator};
use trace_domain::PointerType;

#[test]
fn builder_driven_pipeline_validates_and_propagates() {
    let mut store = InMemoryLineageStore::new();

    let etl = RunBuilder::new("etl")
        .input("raw_data_0.pq")
        .output("features_0.pq")
        .build()
        .unwrap();
    let etl_id = log_run(&mut store, etl).unwrap();

    let training = RunBuilder::new("training")
        .input("features_0.pq")
        .input("train_set_0.pq")
        .output("model_0.hd5")
        .upstream(etl_id)
        .build()
        .unwrap();
    let training_id = log_run(&mut store, training).unwrap();

    let inference = RunBuilder::new("inference")
        .input("features_0.pq")
        .input("model_0.hd5")
        .output("preds_0.pq")
        .upstream(training_id)
        .build()
        .unwrap();
    let inference_id = log_run(&mut store, inference).unwrap();

    // Tipos inferidos por extensión en todo el camino.
    let model = store.get(training_id).unwrap();
    assert!(model.outputs().iter().all(|p| p.pointer_type() == PointerType::Model));

    // Los tres runs cerrados y sin ciclos.
    let validator = CompletenessValidator::new();
    for id in [etl_id, training_id, inference_id] {
        let report = validator.check_in_graph(&store.get(id).unwrap(), &store);
        assert!(report.success, "run {id} should validate: {:?}", report.messages);
    }

    // Corrección en etl: training e inference quedan stale, etl no.
    let marked = StalenessPropagator::new()
        .propagate(&mut store, etl_id, "raw_data_0.pq re-ingested")
        .unwrap();
    assert_eq!(marked.len(), 2);
    assert!(store.get(etl_id).unwrap().stale().is_empty());
    for id in [training_id, inference_id] {
        let run = store.get(id).unwrap();
        assert_eq!(run.stale().len(), 1);
        assert!(run.stale()[0].contains("re-ingested"));
    }
}

#[test]
fn artifact_rows_dedup_across_runs() {
    // features_0.pq aparece como output de etl y como input de training:
    // una sola fila canónica en el store.
    let mut store = InMemoryLineageStore::new();

    let etl = RunBuilder::new("etl").output("features_0.pq").build().unwrap();
    let etl_id = log_run(&mut store, etl).unwrap();

    let training = RunBuilder::new("training")
        .input("features_0.pq")
        .output("model_0.hd5")
        .upstream(etl_id)
        .build()
        .unwrap();
    log_run(&mut store, training).unwrap();

    assert_eq!(store.artifact_count(), 2, "features_0.pq must not duplicate");
}
