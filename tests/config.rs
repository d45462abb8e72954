use std::fs;

use model_core::{
    ModelErr,
    config::{ConfigManager, TrainingConfig},
};

#[test]
fn load_config_returns_the_json_value() {
    let dir = tempfile::tempdir().unwrap();
    let dir = dir.path();
    let path = dir.join("config.json");
    fs::write(&path, r#"{ "dataset": { "source_id": "devzohaib/tvmarketingcsv" }, "epochs": 10 }"#)
        .unwrap();

    let manager = ConfigManager::new(path.clone(), Some(dir.join("auth.json")));
    let value = manager.load_config().unwrap();

    assert_eq!(value["epochs"], 10);
    assert_eq!(value["dataset"]["source_id"], "devzohaib/tvmarketingcsv");
    assert_eq!(manager.config_path(), path);
    assert_eq!(manager.auth_path(), Some(dir.join("auth.json").as_path()));
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let manager = ConfigManager::new(path, None);

    assert!(manager.auth_path().is_none());
    assert!(matches!(
        manager.load_config(),
        Err(ModelErr::ConfigNotFound { .. })
    ));
}

#[test]
fn invalid_json_is_propagated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    let manager = ConfigManager::new(path, None);
    assert!(matches!(manager.load_config(), Err(ModelErr::ConfigParse(_))));
}

#[test]
fn training_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "features": ["TV"],
            "label": "Sales",
            "learning_rate": 0.01,
            "epochs": 50,
            "dataset": {
                "source_id": "devzohaib/tvmarketingcsv",
                "file_name": "tvmarketing.csv",
                "use_cache": false,
                "root": "demo/datasets"
            }
        }"#,
    )
    .unwrap();

    let value = ConfigManager::new(path, None).load_config().unwrap();
    let config = TrainingConfig::from_value(value).unwrap();

    assert_eq!(config.epochs, 50);
    assert_eq!(config.dataset.root.to_str(), Some("demo/datasets"));
    assert!(!config.dataset.dataset_ref.use_cache);
}
