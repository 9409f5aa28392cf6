use std::time::Duration;

use arrangements::{
    arrangement::Arrangement,
    core::store::ArrangementRegister,
    runtime::{
        events::RegisterEvent,
        handle::{spawn_register, RuntimeConfig, RuntimeError},
    },
};

#[tokio::test]
async fn runtime_add_query_and_events_ordered() {
    let handle = spawn_register(ArrangementRegister::new(), RuntimeConfig::default());
    let mut sub = handle.subscribe();

    let first = handle
        .add(Arrangement::new(1, 100, 900, "A", "X", "H", "Talk"))
        .await
        .expect("add");
    let second = handle
        .add_new(2, 100, 800, "B", "X", "H", "Talk")
        .await
        .expect("add");
    assert_eq!((first, second), (0, 1));

    for (id, position) in [(1, 0), (2, 1)] {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        assert_eq!(evt, RegisterEvent::Added { id, position });
    }

    let grouped = handle.grouped_and_sorted().await.expect("grouped");
    let ids: Vec<_> = grouped["X"]["Talk"].iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec![2, 1]);

    assert_eq!(handle.at_place("X").await.expect("place").len(), 2);
    assert_eq!(handle.on_date(2459).await.expect("date").len(), 2);
    assert!(handle.on_date(2460).await.expect("date").is_empty());
    assert_eq!(handle.between_times(100, 900, 200, 800).await.expect("span").len(), 2);
    assert_eq!(handle.between_dates(0, 100).await.expect("range").len(), 2);
    assert_eq!(handle.group("X", "Talk").await.expect("group").len(), 2);
    assert_eq!(handle.len().await.expect("len"), 2);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn runtime_matches_direct_register_and_seeds_from_existing() {
    let mut seeded = ArrangementRegister::new();
    seeded.add_new(1, 20240510, 1900, "Opening", "Hall", "Kari", "Concert");
    seeded.add_new(2, 20240509, 1200, "Talk", "Library", "Ola", "Talk");
    let expected = seeded.export_snapshot();

    let handle = spawn_register(seeded, RuntimeConfig::default());
    let clone = handle.clone();

    let snapshot = clone.snapshot().await.expect("snapshot");
    assert_eq!(snapshot, expected);

    let direct = ArrangementRegister::from_snapshot(snapshot).expect("restore");
    assert_eq!(
        handle.between_times(20240510, 0, 20240509, 0).await.expect("span"),
        direct.between_times_cloned(20240510, 0, 20240509, 0)
    );

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn calls_after_shutdown_report_closed_channel() {
    let handle = spawn_register(ArrangementRegister::new(), RuntimeConfig::default());
    handle.shutdown().await.expect("shutdown");

    let mut closed = false;
    for _ in 0..50 {
        match handle.len().await {
            Err(RuntimeError::ChannelClosed) => {
                closed = true;
                break;
            }
            Ok(_) => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }
    assert!(closed, "expected closed channel after shutdown");
}
