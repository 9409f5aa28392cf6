use arrangements::core::store::{
    ArrangementRegister, RegisterError, RegisterSnapshotV1, SNAPSHOT_FORMAT_VERSION,
};

fn sample() -> ArrangementRegister {
    let mut register = ArrangementRegister::new();
    register.add_new(1, 20240510, 1900, "Opening", "Hall", "Kari", "Concert");
    register.add_new(2, 20240510, 1200, "Lunch talk", "Library", "Ola", "Talk");
    register.add_new(3, 20240509, 2000, "Warmup", "Hall", "Per", "Concert");
    register
}

#[test]
fn snapshot_json_restores_identical_queries() {
    let register = sample();
    let json = serde_json::to_string(&register.export_snapshot()).expect("serialize");
    assert!(json.contains("\"type\":\"Concert\""));

    let snapshot: RegisterSnapshotV1 = serde_json::from_str(&json).expect("deserialize");
    let restored = ArrangementRegister::from_snapshot(snapshot).expect("restore");

    assert_eq!(restored.all_cloned(), register.all_cloned());
    assert_eq!(restored.at_place_cloned("Hall"), register.at_place_cloned("Hall"));
    assert_eq!(restored.on_date_cloned(20240510), register.on_date_cloned(20240510));
    assert_eq!(restored.grouped_and_sorted(), register.grouped_and_sorted());
}

#[test]
fn unknown_snapshot_version_is_rejected() {
    let mut snapshot = sample().export_snapshot();
    assert_eq!(snapshot.format_version, SNAPSHOT_FORMAT_VERSION);

    snapshot.format_version = 2;
    let err = ArrangementRegister::from_snapshot(snapshot).expect_err("must reject");
    assert_eq!(err, RegisterError::UnsupportedSnapshotVersion(2));
}
