use tabviz::config::StorageConfig;
use tabviz::{
    AggregateKind, ChartMode, ChartSettings, Dataset, DatasetStore, Error, FileStore, Grouping,
    KeyValueStore, MemoryStore, Row, RowFilter, StorageError,
};

fn sample() -> Dataset {
    Dataset::from_rows(vec![
        Row::new().with("month", "Jan").with("total", 10.0),
        Row::new().with("month", "Feb").with("total", "12"),
    ])
}

#[test]
fn test_catalogue_round_trip() {
    let mut store = DatasetStore::new(MemoryStore::new());
    assert!(store.list().is_empty());

    let id = store.add("sales.csv", &sample()).unwrap();
    assert!(id.starts_with("dataset_"));

    let list = store.list();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, id);
    assert_eq!(list[0].name, "sales.csv");
    assert_eq!(list[0].size_bytes, sample().encoded_size());

    // 列の順序と値の型が保たれる
    let loaded = store.get(&id).unwrap();
    assert_eq!(loaded, sample());
    assert_eq!(loaded.columns(), ["month", "total"]);
}

#[test]
fn test_blank_name_gets_placeholder() {
    let mut store = DatasetStore::new(MemoryStore::new());
    store.add("  ", &sample()).unwrap();
    assert!(store.list()[0].name.starts_with("Unnamed Data "));
}

#[test]
fn test_put_replaces_rows() {
    let mut store = DatasetStore::new(MemoryStore::new());
    let id = store.add("sales", &sample()).unwrap();

    let smaller = Dataset::from_rows(vec![Row::new().with("month", "Mar")]);
    store.put(&id, &smaller).unwrap();
    assert_eq!(store.get(&id).unwrap(), smaller);
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].name, "sales");

    store.put("imported", &sample()).unwrap();
    assert_eq!(store.list().len(), 2);
    assert!(store.put(" ", &sample()).is_err());
}

#[test]
fn test_settings_and_delete() {
    let mut store = DatasetStore::new(MemoryStore::new());
    let id = store.add("sales", &sample()).unwrap();
    assert_eq!(store.get_settings(&id), None);

    let settings = ChartSettings {
        x_column: Some("month".into()),
        y_column: Some("total".into()),
        mode: ChartMode::Line,
        grouping: Some(Grouping::new(AggregateKind::Mean)),
        filter: Some(RowFilter::new("month", "j")),
        ..Default::default()
    };
    store.put_settings(&id, &settings).unwrap();
    assert_eq!(store.get_settings(&id), Some(settings));

    assert!(store.delete(&id).unwrap());
    assert!(store.get(&id).is_none());
    assert!(store.get_settings(&id).is_none());
    assert!(store.list().is_empty());

    // 2回目の削除は何もしない
    assert!(!store.delete(&id).unwrap());
}

#[test]
fn test_empty_id_reads_as_absent() {
    let store = DatasetStore::new(MemoryStore::new());
    assert!(store.get("").is_none());
    assert!(store.get_settings("").is_none());
    assert!(store.get("unknown").is_none());
}

#[test]
fn test_corrupted_entries_read_as_absent() {
    let keys = StorageConfig::default();
    let mut backing = MemoryStore::new();
    backing.set(&keys.list_key, "{not json".into()).unwrap();
    backing
        .set(&format!("{}broken", keys.data_prefix), "[1, 2".into())
        .unwrap();
    backing
        .set(&format!("{}broken", keys.settings_prefix), "42".into())
        .unwrap();

    let mut store = DatasetStore::new(backing);
    assert!(store.list().is_empty());
    assert!(store.get("broken").is_none());
    assert!(store.get_settings("broken").is_none());

    // 壊れたカタログは新しいカタログで上書きされる
    let id = store.add("fresh", &sample()).unwrap();
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].id, id);
}

#[test]
fn test_quota_failure_leaves_no_partial_entry() {
    let encoded = serde_json::to_string(&sample()).unwrap();
    // データは入るがカタログは入らない容量
    let capacity = "data_viz_data_dataset_".len() + 20 + encoded.len() + 10;
    let mut store = DatasetStore::new(MemoryStore::with_capacity_bytes(capacity));

    let err = store.add("sales", &sample()).unwrap_err();
    assert!(matches!(
        err,
        Error::Storage(StorageError::QuotaExceeded { .. })
    ));
    assert!(store.list().is_empty());
    assert!(store.store().is_empty());
}

#[test]
fn test_quota_failure_on_rows() {
    let mut store = DatasetStore::new(MemoryStore::with_capacity_bytes(16));
    assert!(store.add("sales", &sample()).is_err());
    assert!(store.store().is_empty());
}

#[test]
fn test_custom_key_layout() {
    let keys = StorageConfig {
        list_key: "catalogue".into(),
        data_prefix: "rows.".into(),
        settings_prefix: "chart.".into(),
    };
    let mut store = DatasetStore::with_config(MemoryStore::new(), keys);
    let id = store.add("sales", &sample()).unwrap();

    let backing = store.into_inner();
    assert!(backing.get("catalogue").unwrap().is_some());
    assert!(backing.get(&format!("rows.{}", id)).unwrap().is_some());
}

#[test]
fn test_file_store_catalogue() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let mut store = DatasetStore::new(FileStore::open(dir.path()).unwrap());
        let id = store.add("sales", &sample()).unwrap();
        store.put_settings(&id, &ChartSettings::default()).unwrap();
        id
    };

    // 開き直しても内容が残っている
    let store = DatasetStore::new(FileStore::open(dir.path()).unwrap());
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.get(&id).unwrap(), sample());
    assert_eq!(store.get_settings(&id), Some(ChartSettings::default()));
    assert!(dir.path().join(format!("data_viz_data_{}.json", id)).exists());
}
