//! End-to-end board scenarios over in-memory and file-backed storage.
//!
//! These tests drive the public `Board` API the way a front end does: read a
//! snapshot, send an intent, read the next snapshot.

use anontalk::io::config::{BoardConfig, CorruptPolicy, ThreadLayout};
use anontalk::io::documents::{JOINED_GROUPS_KEY, THREADS_KEY};
use anontalk::io::storage::{FileStore, KeyValueStore};
use anontalk::model::NewThread;
use anontalk::test_support::{TempBoard, memory_board};

/// Create → reply → delete in group "1", checking each snapshot.
#[test]
fn thread_lifecycle_in_one_group() {
    let mut board = memory_board(&BoardConfig::default());

    let thread = board
        .create_thread(NewThread::new("1", "Hi", "World"))
        .expect("create")
        .expect("created");
    let page = board.group_page("1");
    assert_eq!(page.threads.len(), 1);
    assert_eq!(page.threads[0].title, "Hi");
    assert_eq!(page.threads[0].content, "World");
    assert!(page.threads[0].replies.is_empty());

    board.add_reply(&thread.id, "nice").expect("reply");
    let page = board.group_page("1");
    let contents: Vec<&str> = page.threads[0]
        .replies
        .iter()
        .map(|reply| reply.content.as_str())
        .collect();
    assert_eq!(contents, ["nice"]);

    assert!(board.delete_thread(&thread.id).expect("delete"));
    assert!(board.group_page("1").threads.is_empty());
}

#[test]
fn membership_toggles_until_leave() {
    let mut board = memory_board(&BoardConfig::default());
    for group in ["1", "unlisted"] {
        assert!(!board.is_joined(group));
        board.join(group).expect("join");
        board.join(group).expect("join again");
        assert!(board.is_joined(group));
        board.leave(group).expect("leave");
        assert!(!board.is_joined(group));
        board.leave(group).expect("leave again");
        assert!(!board.is_joined(group));
    }
}

#[test]
fn rejected_intents_leave_state_unchanged() {
    let mut board = memory_board(&BoardConfig::default());
    let thread = board
        .create_thread(NewThread::new("1", "t", "c"))
        .expect("create")
        .expect("created");

    assert!(board.create_thread(NewThread::new("1", "", "c")).expect("create").is_none());
    assert!(board.create_thread(NewThread::new("1", "t", "")).expect("create").is_none());
    assert!(board.add_reply(&thread.id, "").expect("reply").is_none());
    assert!(!board.delete_thread("missing").expect("delete"));
    assert!(!board.delete_reply(&thread.id, "missing").expect("delete reply"));

    assert_eq!(board.threads().all().len(), 1);
    assert!(board.threads().all()[0].replies.is_empty());
}

/// State written by one board is visible to the next one opened on the same
/// data directory, in both thread layouts.
#[test]
fn file_backed_board_survives_reopen() {
    for layout in [ThreadLayout::Global, ThreadLayout::PerGroup] {
        let temp = TempBoard::new().expect("temp board");
        temp.write_config(&BoardConfig {
            thread_layout: layout,
            on_corrupt: CorruptPolicy::Fail,
            ..BoardConfig::default()
        })
        .expect("write config");

        let (thread_id, kept_reply) = {
            let mut board = temp.open("a").expect("open");
            board.join("2").expect("join");
            let thread = board
                .create_thread(NewThread::new("2", "Hello", "there").with_image("data:,x"))
                .expect("create")
                .expect("created");
            let dropped = board
                .add_reply(&thread.id, "first")
                .expect("reply")
                .expect("added");
            let kept = board
                .add_reply(&thread.id, "second")
                .expect("reply")
                .expect("added");
            board.delete_reply(&thread.id, &dropped.id).expect("delete reply");
            (thread.id, kept.id)
        };

        let board = temp.open("b").expect("reopen");
        assert!(board.is_joined("2"), "{layout:?}");
        let page = board.group_page("2");
        assert_eq!(page.threads.len(), 1, "{layout:?}");
        let thread = page.threads[0];
        assert_eq!(thread.id, thread_id);
        assert_eq!(thread.image.as_deref(), Some("data:,x"));
        let reply_ids: Vec<&str> = thread.replies.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(reply_ids, [kept_reply.as_str()]);
    }
}

#[test]
fn per_group_layout_uses_group_keys() {
    let temp = TempBoard::new().expect("temp board");
    temp.write_config(&BoardConfig {
        thread_layout: ThreadLayout::PerGroup,
        ..BoardConfig::default()
    })
    .expect("write config");

    let mut board = temp.open("t").expect("open");
    board.create_thread(NewThread::new("1", "a", "b")).expect("create");
    board.create_thread(NewThread::new("3", "c", "d")).expect("create");
    board.join("1").expect("join");
    drop(board);

    let store = FileStore::open(&temp.paths().storage_path).expect("storage");
    assert_eq!(
        store.keys().expect("keys"),
        [JOINED_GROUPS_KEY, "threads-1", "threads-3"]
    );
}

#[test]
fn corrupt_documents_reset_by_default() {
    let temp = TempBoard::new().expect("temp board");
    {
        let mut store = FileStore::open(&temp.paths().storage_path).expect("storage");
        store.set(THREADS_KEY, "[{\"broken\": true}]").expect("set");
        store.set(JOINED_GROUPS_KEY, "\"1\"").expect("set");
    }

    let mut board = temp.open("t").expect("open with reset policy");
    assert!(board.threads().all().is_empty());
    assert!(!board.is_joined("1"));

    board.create_thread(NewThread::new("1", "fresh", "start")).expect("create");
    let reopened = temp.open("u").expect("reopen");
    assert_eq!(reopened.group_page("1").threads[0].title, "fresh");
}

#[test]
fn corrupt_documents_fail_when_configured() {
    let temp = TempBoard::new().expect("temp board");
    temp.write_config(&BoardConfig {
        on_corrupt: CorruptPolicy::Fail,
        ..BoardConfig::default()
    })
    .expect("write config");
    {
        let mut store = FileStore::open(&temp.paths().storage_path).expect("storage");
        store.set(THREADS_KEY, "nope").expect("set");
    }

    let err = temp.open("t").err().expect("open should fail");
    assert!(format!("{err:#}").contains("load threads"));
}
