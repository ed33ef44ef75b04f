use std::sync::Arc;
use std::time::Duration;

use neechat::domain::ChatId;
use neechat::infrastructure::persistence::ChatLocks;

#[tokio::test]
async fn given_held_lock_when_same_chat_locked_then_waits_for_release() {
    let locks = Arc::new(ChatLocks::new());
    let guard = locks.lock(&ChatId::new("abc")).await;

    let contender = {
        let locks = Arc::clone(&locks);
        tokio::spawn(async move {
            let _guard = locks.lock(&ChatId::new("abc")).await;
        })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!contender.is_finished());

    drop(guard);
    tokio::time::timeout(Duration::from_secs(1), contender)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn given_held_lock_when_other_chat_locked_then_proceeds_immediately() {
    let locks = ChatLocks::new();
    let _held = locks.lock(&ChatId::new("abc")).await;

    let other = tokio::time::timeout(Duration::from_millis(100), locks.lock(&ChatId::new("xyz"))).await;

    assert!(other.is_ok());
    assert_eq!(locks.len(), 2);
}

#[test]
fn given_new_locks_when_created_then_empty() {
    assert!(ChatLocks::new().is_empty());
}

#[tokio::test]
async fn given_many_ids_locked_and_released_when_done_then_no_entries_remain() {
    let locks = ChatLocks::new();

    for i in 0..1000 {
        let guard = locks.lock(&ChatId::new(format!("chat-{i}"))).await;
        drop(guard);
    }

    assert!(locks.is_empty());
}

#[tokio::test]
async fn given_waiter_queued_when_holder_releases_then_entry_kept_until_waiter_done() {
    let locks = Arc::new(ChatLocks::new());
    let guard = locks.lock(&ChatId::new("abc")).await;

    let waiter = {
        let locks = Arc::clone(&locks);
        tokio::spawn(async move { locks.lock(&ChatId::new("abc")).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    drop(guard);
    let waiter_guard = waiter.await.unwrap();
    assert_eq!(locks.len(), 1);

    drop(waiter_guard);
    assert!(locks.is_empty());
}
