use ad_exchange::utils::report;
use ad_exchange::{
    AdDraft, AdRepository, Category, Condition, Direction, ExchangeError, ExchangeService,
    ExchangeState, LocalStateStorage, MemoryCatalog, MemoryProposalStore, ProposalStatus, UserId,
};
use tempfile::TempDir;

fn draft(title: &str) -> AdDraft {
    AdDraft {
        title: title.to_string(),
        description: "state test ad".to_string(),
        category: Category::Clothing,
        condition: Condition::New,
        image_url: None,
    }
}

#[tokio::test]
async fn test_exchange_state_survives_a_save_load_cycle() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStateStorage::new(dir.path().to_str().unwrap().to_string());

    // First "run": post two ads and a proposal, then persist.
    let catalog = MemoryCatalog::new();
    let a = catalog.insert_ad(UserId(1), draft("Coat")).await.unwrap();
    let b = catalog.insert_ad(UserId(2), draft("Boots")).await.unwrap();
    let store = MemoryProposalStore::new();
    let service = ExchangeService::new(catalog.clone(), store.clone());
    let id = service
        .create_proposal(UserId(1), a.id, b.id, Some("even trade".to_string()))
        .await
        .unwrap();

    storage
        .save(&ExchangeState {
            catalog: catalog.snapshot().await,
            proposals: store.snapshot().await,
        })
        .unwrap();

    // Second "run": reload and keep going where the first left off.
    let state = storage.load().unwrap();
    let catalog = MemoryCatalog::from_snapshot(state.catalog);
    let store = MemoryProposalStore::from_snapshot(state.proposals);
    let service = ExchangeService::new(catalog, store);

    let duplicate = service.create_proposal(UserId(1), a.id, b.id, None).await;
    assert!(matches!(duplicate, Err(ExchangeError::DuplicatePair)));

    service
        .update_status(UserId(2), id, ProposalStatus::Accepted)
        .await
        .unwrap();

    let received = service
        .list_proposals(UserId(2), Direction::Received, Some(ProposalStatus::Accepted))
        .await
        .unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].comment.as_deref(), Some("even trade"));
}

#[tokio::test]
async fn test_restored_stores_keep_assigning_fresh_ids() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStateStorage::new(dir.path().to_str().unwrap().to_string());

    let catalog = MemoryCatalog::new();
    let first = catalog.insert_ad(UserId(1), draft("First")).await.unwrap();
    storage
        .save(&ExchangeState {
            catalog: catalog.snapshot().await,
            proposals: MemoryProposalStore::new().snapshot().await,
        })
        .unwrap();

    let state = storage.load().unwrap();
    let catalog = MemoryCatalog::from_snapshot(state.catalog);
    let second = catalog.insert_ad(UserId(1), draft("Second")).await.unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_proposal_export_writes_csv() {
    let dir = TempDir::new().unwrap();

    let catalog = MemoryCatalog::new();
    let a = catalog.insert_ad(UserId(1), draft("Coat")).await.unwrap();
    let b = catalog.insert_ad(UserId(2), draft("Boots")).await.unwrap();
    let service = ExchangeService::new(catalog, MemoryProposalStore::new());
    service
        .create_proposal(UserId(1), a.id, b.id, Some("swap".to_string()))
        .await
        .unwrap();

    let listed = service
        .list_proposals(UserId(1), Direction::Sent, None)
        .await
        .unwrap();

    let export_path = dir.path().join("proposals.csv");
    let file = std::fs::File::create(&export_path).unwrap();
    report::write_proposals_csv(&listed, file).unwrap();

    let content = std::fs::read_to_string(&export_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "id,sender_ad,receiver_ad,status,comment,created_at"
    );
    assert!(lines[1].contains("pending"));
    assert!(lines[1].contains("swap"));
}
