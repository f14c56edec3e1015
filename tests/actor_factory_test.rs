use dex_sync::datasource::{CanisterPoolSource, PriceClient, PriceQuery};
use dex_sync::{ActorError, AnonymousActorFactory};

const ICP_LEDGER: &str = "ryjl3-tyaaa-aaaaa-aaaba-cai";

#[tokio::test]
async fn test_malformed_address_fails_without_building_agent() {
    let factory = AnonymousActorFactory::mainnet();

    for bad in ["", "hello", "xyz-123", "ryjl3_tyaaa"] {
        let result = factory.create_read_only_handle(bad).await;
        assert!(
            matches!(result, Err(ActorError::InvalidAddress(_))),
            "address {:?} should be invalid",
            bad
        );
    }
    assert!(!factory.has_agent());
}

#[tokio::test]
async fn test_unusable_host_is_connection_error() {
    let factory = AnonymousActorFactory::new("::not-a-host::", false);
    let result = factory.create_read_only_handle(ICP_LEDGER).await;
    assert!(matches!(result, Err(ActorError::Connection(_))));
}

#[tokio::test]
async fn test_handles_bind_requested_canister() {
    let factory = AnonymousActorFactory::mainnet();
    let handle = factory.create_read_only_handle(ICP_LEDGER).await.unwrap();
    assert_eq!(handle.canister_id().to_text(), ICP_LEDGER);

    let again = factory.create_read_only_handle(ICP_LEDGER).await.unwrap();
    assert_eq!(again.canister_id(), handle.canister_id());

    // Collaborators accept the handle without touching the network.
    let prices = PriceClient::new(handle.clone(), PriceQuery::AllTokenPrices);
    assert_eq!(prices.query(), PriceQuery::AllTokenPrices);
    let _pools = CanisterPoolSource::with_default_method(handle);
}
