//! Demo del motor de linaje: arma un pipeline etl → training → inference →
//! serve, lo comitea contra el store compartido, valida completitud y
//! muestra la propagación de staleness tras una corrección histórica.
use traceflow_rust::{log_run, CompletenessValidator, LineageStore, RunBuilder, SharedLineageStore,
                     StalenessPropagator, StoreConfig, Component, Tag};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut etl_component = Component::new("etl", "generating some features", "shreya")?;
    etl_component.add_tags(vec![Tag::new("example")?, Tag::new("pipeline")?]);
    println!("registered {etl_component}");

    // Una variable presente pero ilegible aborta el demo en vez de caer a
    // un default silencioso.
    let config = StoreConfig::try_from_env()?;
    let mut store = SharedLineageStore::from_config(&config);

    let etl = RunBuilder::new("etl")
        .notes("clean the data")
        .git_hash("a1b2c3d")
        .input("raw_data_0.pq")
        .output("features_0.pq")
        .build()?;
    let etl_id = log_run(&mut store, etl)?;

    let training = RunBuilder::new("training")
        .notes("train a model")
        .input("features_0.pq")
        .input("train_set_0.pq")
        .output("model_0.hd5")
        .upstream(etl_id)
        .build()?;
    let training_id = log_run(&mut store, training)?;

    let inference = RunBuilder::new("inference")
        .notes("do model inference")
        .input("features_0.pq")
        .input("model_0.hd5")
        .output("preds_0.pq")
        .upstream(training_id)
        .build()?;
    let inference_id = log_run(&mut store, inference)?;

    let serve = RunBuilder::new("serve")
        .notes("serve output")
        .input("preds_0.pq")
        .upstream(inference_id)
        .build()?;
    let serve_id = log_run(&mut store, serve)?;

    println!("committed {} runs, {} unique artifacts", store.run_count(), store.artifact_count());

    let validator = CompletenessValidator::new();
    for id in [etl_id, training_id, inference_id, serve_id] {
        let run = store.get(id)?;
        let report = validator.check_in_graph(&run, &store);
        println!("{} [{}] success={} messages={:?}",
                 run.component_name(),
                 id,
                 report.success,
                 report.messages);
    }

    // Corrección histórica: los datos crudos del etl estaban mal.
    let marked = StalenessPropagator::new().propagate(&mut store, etl_id, "raw_data_0.pq re-ingested with fix")?;
    println!("staleness propagated to {} downstream runs:", marked.len());
    for id in &marked {
        let run = store.get(*id)?;
        println!("  {} [{}] stale={:?}", run.component_name(), id, run.stale());
    }

    Ok(())
}
