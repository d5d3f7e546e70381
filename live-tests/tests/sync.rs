use std::time::Duration;

use futures::StreamExt;
use testvectors::blocks::{REFERENCE_HASH, REFERENCE_SLOT};
use utxorpc::models::{BlockRef, NextAction};
use utxorpc::{CancellationToken, ClientConfig, SyncClient};

async fn client() -> SyncClient {
    let _ = tracing_subscriber::fmt().try_init();
    let config = ClientConfig::from_env().unwrap();
    SyncClient::connect(config).await.unwrap()
}

fn reference() -> BlockRef {
    BlockRef::from_hex(REFERENCE_HASH, REFERENCE_SLOT).unwrap()
}

#[ignore = "needs a local server"]
#[tokio::test]
async fn read_tip() {
    let tip = client().await.read_tip(None).await.unwrap().unwrap();

    assert!(tip.slot > REFERENCE_SLOT);
    assert!(!tip.is_origin());
    assert_eq!(tip.hash.unwrap().to_string().len(), 64);
}

#[ignore = "needs a local server"]
#[tokio::test]
async fn fetch_block() {
    let block = client()
        .await
        .fetch_block(&reference(), None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(block.slot(), &Some(REFERENCE_SLOT));
    assert_eq!(block.hash().map(|hash| hash.to_string()).as_deref(), Some(REFERENCE_HASH));
    assert!(block.native_bytes().is_some());
}

#[ignore = "needs a local server"]
#[tokio::test]
async fn dump_history_is_ordered_and_bounded() {
    let max_items = 5;
    let page = client()
        .await
        .dump_history(Some(&reference()), max_items, None)
        .await
        .unwrap();

    assert!(!page.blocks.is_empty());
    assert!(page.blocks.len() <= max_items as usize);
    assert_eq!(page.blocks[0].slot(), &Some(REFERENCE_SLOT));
    assert!(page
        .blocks
        .windows(2)
        .all(|pair| pair[0].slot() < pair[1].slot()));
}

#[ignore = "needs a local server"]
#[tokio::test]
async fn history_walks_several_pages() {
    let cancel = CancellationToken::new();
    let blocks: Vec<_> = client()
        .await
        .history(Some(reference()), 3, None, cancel)
        .take(7)
        .map(|block| block.unwrap())
        .collect()
        .await;

    assert_eq!(blocks.len(), 7);
    assert!(blocks.windows(2).all(|pair| pair[0].slot() < pair[1].slot()));
}

#[ignore = "needs a local server"]
#[tokio::test]
async fn follow_tip_starts_with_a_reset() {
    let cancel = CancellationToken::new();
    let mut events = client()
        .await
        .follow_tip(&[reference()], None, cancel.clone())
        .await
        .unwrap();

    let first = events.next().await.unwrap().unwrap();
    let NextAction::Reset(point) = &first.action else {
        panic!("expected a reset, got {:?}", first.action);
    };
    assert_eq!((point.hash, point.slot), (reference().hash, REFERENCE_SLOT));

    let second = tokio::time::timeout(Duration::from_secs(5), events.next()).await;
    if let Ok(Some(Ok(event))) = second {
        let applied = event.applied().unwrap();
        assert!(applied.slot().unwrap() > REFERENCE_SLOT);
    }

    cancel.cancel();
    assert!(events.next().await.is_none());
}
