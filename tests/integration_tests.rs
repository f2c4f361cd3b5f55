use listing_clean::domain::ports::ArtifactStore;
use listing_clean::{ArtifactSpec, CleaningPipeline, CliConfig, LocalStore, StepRunner};
use tempfile::TempDir;

const RAW_CSV: &str = "\
id,name,price,last_review
1,Cozy loft,50,2019-05-21
2,Cheap bunk,10,2019-04-01
3,Palace,500,2019-01-02
4,Edge low,20,2019/03/15
5,Edge high,200,03/20/2019
6,No price,,2019-06-01
7,Bad price,abc,2019-06-02
8,Bad date,75,soon
9,No date,80,
";

const CLEAN_CSV: &str = "\
id,name,price,last_review
1,Cozy loft,50,2019-05-21
4,Edge low,20,2019-03-15
5,Edge high,200,2019-03-20
8,Bad date,75,
9,No date,80,
";

fn test_config(store: &str, work_dir: &str) -> CliConfig {
    CliConfig {
        input_artifact: "sample.csv:latest".to_string(),
        output_artifact: "clean_sample.csv".to_string(),
        output_type: "clean_sample".to_string(),
        output_description: "Data with outliers and null prices removed".to_string(),
        min_price: 20.0,
        max_price: 200.0,
        store: store.to_string(),
        store_config: None,
        work_dir: work_dir.to_string(),
        verbose: false,
        monitor: false,
        log_json: false,
    }
}

async fn seed_raw_artifact(store: &LocalStore, dir: &TempDir) {
    let raw = dir.path().join("sample.csv");
    std::fs::write(&raw, RAW_CSV).unwrap();

    let spec = ArtifactSpec::new("sample.csv", "raw_data", "Raw listing data");
    store.publish(&spec, &raw).await.unwrap();
}

#[tokio::test]
async fn test_end_to_end_cleaning_with_local_store() {
    let store_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let store_path = store_dir.path().to_str().unwrap().to_string();
    let work_path = work_dir.path().to_str().unwrap().to_string();

    let store = LocalStore::new(&store_path);
    seed_raw_artifact(&store, &work_dir).await;

    let config = test_config(&store_path, &work_path);
    let pipeline = CleaningPipeline::new(LocalStore::new(&store_path), config);
    let runner = StepRunner::new_with_monitoring(pipeline, false);

    let result = runner.run().await;
    assert!(result.is_ok());

    let locator = result.unwrap();
    assert!(locator.contains("clean_sample.csv"));
    assert!(locator.contains("v0"));

    // The cleaned csv lands in the work directory before publishing.
    let work_file = work_dir.path().join("clean_sample.csv");
    assert_eq!(std::fs::read_to_string(work_file).unwrap(), CLEAN_CSV);

    // The published copy matches it byte for byte.
    let published = store_dir.path().join("clean_sample.csv/v0/clean_sample.csv");
    assert_eq!(std::fs::read_to_string(published).unwrap(), CLEAN_CSV);

    let metadata_path = store_dir.path().join("clean_sample.csv/v0/metadata.json");
    let metadata: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(metadata_path).unwrap()).unwrap();
    assert_eq!(metadata["name"], "clean_sample.csv");
    assert_eq!(metadata["artifact_type"], "clean_sample");
    assert_eq!(
        metadata["description"],
        "Data with outliers and null prices removed"
    );
    assert_eq!(metadata["job_type"], "basic_cleaning");
    assert_eq!(metadata["run_config"]["input_artifact"], "sample.csv:latest");
    assert_eq!(metadata["run_config"]["min_price"], "20");
    assert_eq!(metadata["run_config"]["max_price"], "200");
}

#[tokio::test]
async fn test_second_run_publishes_next_version() {
    let store_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let store_path = store_dir.path().to_str().unwrap().to_string();
    let work_path = work_dir.path().to_str().unwrap().to_string();

    let store = LocalStore::new(&store_path);
    seed_raw_artifact(&store, &work_dir).await;

    let first = StepRunner::new(CleaningPipeline::new(
        LocalStore::new(&store_path),
        test_config(&store_path, &work_path),
    ));
    let first_locator = first.run().await.unwrap();
    assert!(first_locator.contains("v0"));

    let second = StepRunner::new(CleaningPipeline::new(
        LocalStore::new(&store_path),
        test_config(&store_path, &work_path),
    ));
    let second_locator = second.run().await.unwrap();
    assert!(second_locator.contains("v1"));

    assert!(store_dir.path().join("clean_sample.csv/v0").is_dir());
    assert!(store_dir.path().join("clean_sample.csv/v1").is_dir());
}

#[tokio::test]
async fn test_missing_input_artifact_fails() {
    let store_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let store_path = store_dir.path().to_str().unwrap().to_string();
    let work_path = work_dir.path().to_str().unwrap().to_string();

    let config = test_config(&store_path, &work_path);
    let runner = StepRunner::new(CleaningPipeline::new(LocalStore::new(&store_path), config));

    let err = runner.run().await.unwrap_err();
    assert!(matches!(err, listing_clean::CleanError::NotFoundError { .. }));
    assert!(err.to_string().contains("sample.csv"));
}

#[tokio::test]
async fn test_inverted_price_range_keeps_header_only() {
    let store_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let store_path = store_dir.path().to_str().unwrap().to_string();
    let work_path = work_dir.path().to_str().unwrap().to_string();

    let store = LocalStore::new(&store_path);
    seed_raw_artifact(&store, &work_dir).await;

    let mut config = test_config(&store_path, &work_path);
    config.min_price = 300.0;
    config.max_price = 10.0;

    let runner = StepRunner::new(CleaningPipeline::new(LocalStore::new(&store_path), config));
    runner.run().await.unwrap();

    let published = store_dir.path().join("clean_sample.csv/v0/clean_sample.csv");
    assert_eq!(
        std::fs::read_to_string(published).unwrap(),
        "id,name,price,last_review\n"
    );
}

#[tokio::test]
async fn test_end_to_end_with_monitoring() {
    let store_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();
    let store_path = store_dir.path().to_str().unwrap().to_string();
    let work_path = work_dir.path().to_str().unwrap().to_string();

    let store = LocalStore::new(&store_path);
    seed_raw_artifact(&store, &work_dir).await;

    let config = test_config(&store_path, &work_path);
    let pipeline = CleaningPipeline::new(LocalStore::new(&store_path), config);
    let runner = StepRunner::new_with_monitoring(pipeline, true);

    let result = runner.run().await;
    assert!(result.is_ok());
}
