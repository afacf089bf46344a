use chrono::NaiveDate;
use tempfile::TempDir;

use postcardlist::{
    core::store::{PostcardStore, StoreSnapshot},
    error::StoreError,
    postcard::{PostcardDraft, PostcardEntry},
};

fn draft(y: i32, m: u32, d: u32, from: &str, to: &str) -> PostcardDraft {
    PostcardDraft::new(NaiveDate::from_ymd_opt(y, m, d).expect("date"), from, to)
}

fn seeded() -> PostcardStore {
    let mut store = PostcardStore::new();
    for d in [
        draft(2009, 12, 12, "Dopey", "Peter"),
        draft(2008, 6, 3, "Goofy", "Pluto"),
        draft(2011, 12, 11, "Daisy", "Goofy"),
        draft(2015, 2, 1, "$crooge", "Snow White"),
    ] {
        store.insert(d).expect("insert");
    }
    store
}

fn drafts(store: &PostcardStore) -> Vec<PostcardDraft> {
    store.entries().iter().map(PostcardEntry::to_draft).collect()
}

#[test]
fn write_full_then_load_full_reproduces_records() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("cards.txt");

    let store = seeded();
    store.write_full(&path).expect("write");

    let text = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(text.lines().count(), 4);
    assert!(text.starts_with("date:2009-12-12; from:Dopey; to:Peter;\n"));
    assert!(text.ends_with("date:2015-02-01; from:$crooge; to:Snow White;\n"));

    let mut reloaded = PostcardStore::new();
    reloaded.load_full(Some(path.as_path())).expect("load");
    assert_eq!(drafts(&reloaded), drafts(&store));
    assert_eq!(reloaded.export_snapshot().entries, store.export_snapshot().entries);
}

#[test]
fn write_full_truncates_previous_content() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("cards.txt");
    std::fs::write(&path, "leftover that is not a record\n".repeat(10)).expect("seed");

    seeded().write_full(&path).expect("write");

    let mut reloaded = PostcardStore::new();
    reloaded.load_full(Some(path.as_path())).expect("load");
    assert_eq!(reloaded.count_entries(), 4);
}

#[test]
fn write_append_repeats_whole_sequence() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("cards.txt");

    let store = seeded();
    store.write_append(&path).expect("append creates");
    store.write_append(&path).expect("append again");

    let mut reloaded = PostcardStore::new();
    reloaded.load_full(Some(path.as_path())).expect("load");
    assert_eq!(reloaded.count_entries(), 8);
    assert_eq!(reloaded.sender_positions("Goofy"), Some(&[1, 5][..]));
    assert_eq!(store.count_entries(), 4);
}

#[test]
fn load_append_continues_positions() {
    let tmp = TempDir::new().expect("tmp");
    let first = tmp.path().join("first.txt");
    let second = tmp.path().join("second.txt");
    seeded().write_full(&first).expect("write first");
    std::fs::write(
        &second,
        "date:2016-10-23; from:Sneezy; to:Hook;\ndate:2009-12-12; from:Dopey; to:Alice;\n",
    )
    .expect("write second");

    let mut store = PostcardStore::new();
    assert_eq!(store.load_full(Some(first.as_path())).expect("full"), 4);
    assert_eq!(store.load_append(Some(second.as_path())).expect("append"), 2);

    assert_eq!(store.count_entries(), 6);
    let positions: Vec<usize> = store.entries().iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(store.sender_positions("Dopey"), Some(&[0, 5][..]));
    assert_eq!(store.receiver_positions("Hook"), Some(&[4][..]));
    assert_eq!(store.file_path(), Some(second.as_path()));
}

#[test]
fn load_append_of_same_file_duplicates() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("cards.txt");
    seeded().write_full(&path).expect("write");

    let mut store = PostcardStore::with_file(&path);
    store.load_full(None).expect("full");
    store.load_append(None).expect("append");

    assert_eq!(store.count_entries(), 8);
    assert_eq!(
        store.query_by_sender("Daisy"),
        vec![
            "date:2011-12-11; from:Daisy; to:Goofy;\n".to_string(),
            "date:2011-12-11; from:Daisy; to:Goofy;\n".to_string(),
        ]
    );

    store.load_full(None).expect("full again");
    assert_eq!(store.count_entries(), 4);
    assert_eq!(store.sender_positions("Daisy"), Some(&[2][..]));
}

#[test]
fn empty_file_loads_nothing() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("empty.txt");
    std::fs::write(&path, "").expect("write");

    let mut store = seeded();
    assert_eq!(store.load_full(Some(path.as_path())).expect("load"), 0);
    assert!(store.is_empty());
    assert!(store.query_by_date_range(NaiveDate::MIN, NaiveDate::MAX).is_empty());
}

#[test]
fn write_into_missing_directory_fails() {
    let tmp = TempDir::new().expect("tmp");
    let path = tmp.path().join("no-such-dir").join("cards.txt");

    let err = seeded().write_full(&path).expect_err("no parent dir");
    assert!(
        matches!(err, StoreError::FileNotFound { .. } | StoreError::Io { .. }),
        "{err:?}"
    );
}

#[test]
fn snapshot_round_trips_through_json_and_rebuilds_indices() {
    let store = seeded();
    let json = serde_json::to_string(&store.export_snapshot()).expect("serialize");
    let snapshot: StoreSnapshot = serde_json::from_str(&json).expect("deserialize");

    let restored = PostcardStore::from_snapshot(snapshot).expect("restore");
    assert_eq!(restored.entries(), store.entries());
    assert_eq!(restored.sender_positions("Goofy"), Some(&[1][..]));
    assert_eq!(restored.receiver_positions("Goofy"), Some(&[2][..]));

    let mut restored = restored;
    let next = restored
        .insert(draft(2020, 1, 1, "Happy", "Grumpy"))
        .expect("insert");
    assert_eq!(next, 4);
}

#[test]
fn snapshot_with_gaps_is_rejected() {
    let mut snapshot = seeded().export_snapshot();
    snapshot.entries.remove(1);

    match PostcardStore::from_snapshot(snapshot) {
        Err(StoreError::InvalidSnapshot { expected, found }) => {
            assert_eq!((expected, found), (1, 2));
        }
        other => panic!("expected InvalidSnapshot, got {other:?}"),
    }
}

#[test]
fn snapshot_with_unwritable_names_is_rejected() {
    let mut empty_sender = seeded().export_snapshot();
    empty_sender.entries[0].sender.clear();
    match PostcardStore::from_snapshot(empty_sender) {
        Err(StoreError::InvalidField { field, value }) => {
            assert_eq!((field, value.as_str()), ("sender", ""));
        }
        other => panic!("expected InvalidField, got {other:?}"),
    }

    let mut split_receiver = seeded().export_snapshot();
    split_receiver.entries[2].receiver = "a;b".to_string();
    match PostcardStore::from_snapshot(split_receiver) {
        Err(StoreError::InvalidField { field, value }) => {
            assert_eq!((field, value.as_str()), ("receiver", "a;b"));
        }
        other => panic!("expected InvalidField, got {other:?}"),
    }

    let mut far_future = seeded().export_snapshot();
    far_future.entries[3].date = NaiveDate::from_ymd_opt(10_000, 1, 1).expect("date");
    assert!(matches!(
        PostcardStore::from_snapshot(far_future),
        Err(StoreError::InvalidField { field: "date", .. })
    ));
}
