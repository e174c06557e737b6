use footingplan_core::StructuralConfig;
use footingplan_store::{
    export_records, export_store, import_into, import_records, ConfigRecord, ConfigStore,
    InMemoryConfigStore, StoreError,
};

#[test]
fn test_export_then_import_keeps_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.json");
    let records = vec![
        ConfigRecord::new("A", StructuralConfig::default()),
        ConfigRecord::new("B", StructuralConfig::default()).with_id("fixed-id"),
    ];
    export_records(&path, &records).unwrap();

    let imported = import_records(&path).unwrap();
    assert_eq!(imported, records);
}

#[test]
fn test_import_bare_config_object() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("silo-7.json");
    std::fs::write(
        &path,
        r#"{
            "mainBodyLength": 300,
            "mainBodyWidth": 250,
            "footWidth": 240,
            "footThickness": 10,
            "foundationWidth": 50,
            "footGaps": [90, 90]
        }"#,
    )
    .unwrap();

    let imported = import_records(&path).unwrap();
    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].name, "silo-7");
    assert_eq!(imported[0].config.foot_count(), 3);
    assert_eq!(imported[0].config.foundation_depth, 0.0);
}

#[test]
fn test_import_array_of_bare_configs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.json");
    let configs = vec![StructuralConfig::default(), StructuralConfig::default()];
    std::fs::write(&path, serde_json::to_string(&configs).unwrap()).unwrap();

    let names: Vec<_> = import_records(&path)
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["batch 1", "batch 2"]);
}

#[test]
fn test_import_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{"hello": "world"}"#).unwrap();
    assert!(matches!(
        import_records(&path),
        Err(StoreError::Serialization(_))
    ));
    assert!(matches!(
        import_records(&dir.path().join("missing.json")),
        Err(StoreError::Io(_))
    ));
}

#[test]
fn test_store_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("all.json");
    let source = InMemoryConfigStore::with_records([
        ConfigRecord::new("One", StructuralConfig::default()),
        ConfigRecord::new("Two", StructuralConfig::default()),
    ])
    .unwrap();
    assert_eq!(export_store(&source, &path).unwrap(), 2);

    let target = InMemoryConfigStore::new();
    assert_eq!(import_into(&target, &path).unwrap(), 2);
    assert_eq!(target.list().unwrap(), source.list().unwrap());
}
