use {
    crate::setup::{Network, chaincode_error, key},
    auction::Error,
    model::{PlaintextBid, Status},
    std::collections::BTreeSet,
    testlib::{Client, recorder::NewTime},
};

/// Organizations named by the record must cover the seller's and every
/// bidder's.
fn assert_organizations_cover_bids(network: &Network, auction_id: &str) {
    let auction = network.auction(auction_id);
    let organizations: BTreeSet<_> = auction.organizations.iter().collect();
    assert!(organizations.contains(&"Org1MSP".to_string()));
    for commitment in auction.private_bids.values() {
        assert!(organizations.contains(&commitment.org));
    }
    for bid in auction.revealed_bids.values() {
        assert!(organizations.contains(&bid.org));
    }
}

#[tokio::test]
async fn cross_org_bidding() {
    let network = Network::new();
    network.create("A2", "painting").await;
    let b = network.place(Client::UB, "A2", 50).await;
    assert_organizations_cover_bids(&network, "A2");
    let c = network.place(Client::UC, "A2", 75).await;
    assert_organizations_cover_bids(&network, "A2");

    assert_eq!(
        network.auction("A2").organizations,
        ["Org1MSP", "Org2MSP", "Org3MSP"]
    );
    assert_eq!(
        network.ledger.policy("A2").unwrap().orgs,
        BTreeSet::from([
            "Org1MSP".to_string(),
            "Org2MSP".to_string(),
            "Org3MSP".to_string()
        ])
    );

    network.close(Client::SELLER, "A2").await.unwrap();
    network
        .reveal(Client::UB, "A2", &b, Client::UB.bid(50))
        .await
        .unwrap();
    network
        .reveal(Client::UC, "A2", &c, Client::UC.bid(75))
        .await
        .unwrap();
    assert_organizations_cover_bids(&network, "A2");

    network.end(Client::SELLER, "A2").await.unwrap();
    let auction = network.auction("A2");
    assert_eq!(auction.winner, Client::UC.identity());
    assert_eq!(auction.price, 75);
    assert_eq!(auction.status, Status::Ended);
}

#[tokio::test]
async fn bid_stores_plaintext_privately() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let before = network.ledger.state("A1");

    let plaintext = br#"{"price":7, "org":"Org2MSP", "bidder":"someone"}"#.to_vec();
    let tx_id = network
        .bid_plaintext(Client::UB, "A1", plaintext.clone())
        .await
        .unwrap();

    assert_eq!(
        network
            .ledger
            .private("_implicit_org_Org2MSP", key("A1", &tx_id).as_str()),
        Some(plaintext)
    );
    assert_eq!(network.ledger.state("A1"), before);
    let bids = network.recorder.bids();
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].tx_id, tx_id);
    assert_eq!(bids[0].org, "Org2MSP");
}

#[tokio::test]
async fn bid_on_foreign_peer_is_rejected() {
    let network = Network::new();
    network.create("A1", "painting").await;

    let tx = network
        .ledger
        .tx(Client::UB)
        .with_bid(Client::UB.bid(50))
        .on_peer("Org1MSP");
    let err = network
        .ledger
        .simulate(&network.contract, &tx, "Bid", &["A1"])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::WrongPeer { client, peer } if client == "Org2MSP" && peer == "Org1MSP"
    ));
    assert!(!tx.has_writes());
    assert!(network.recorder.bids().is_empty());
}

#[tokio::test]
async fn bid_requires_transient_plaintext() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let err = chaincode_error(network.invoke(Client::UB, "Bid", &["A1"]).await);
    assert!(matches!(err, Error::NoTransient("bid")));
}

#[tokio::test]
async fn submit_records_commitment_and_time() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.bid(Client::UB, "A1", 50).await;

    let tx = network.ledger.tx(Client::UB);
    let timestamp = tx.timestamp();
    network
        .ledger
        .submit(&network.contract, tx, "SubmitBid", &["A1", &tx_id])
        .await
        .unwrap();

    let auction = network.auction("A1");
    let commitment = &auction.private_bids[&key("A1", &tx_id)];
    assert_eq!(commitment.org, "Org2MSP");
    assert_eq!(
        commitment.hash,
        hex::encode(model::digest(&Client::UB.bid(50)))
    );
    assert_eq!(commitment.timestamp, timestamp);
    assert_eq!(
        network.recorder.times(),
        [NewTime {
            auction_id: "A1".to_string(),
            org: "Org2MSP".to_string(),
            endorser: "uB".to_string(),
            tx_id: tx_id.clone(),
        }]
    );
}

#[tokio::test]
async fn submit_is_idempotent() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.place(Client::UB, "A1", 50).await;
    let before = network.ledger.state("A1");

    network.submit_bid(Client::UB, "A1", &tx_id).await.unwrap();
    assert_eq!(network.ledger.state("A1"), before);
    assert_eq!(network.auction("A1").private_bids.len(), 1);
    assert_eq!(network.recorder.times().len(), 1);
}

#[tokio::test]
async fn submit_needs_own_private_bid() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.bid(Client::UB, "A1", 50).await;

    // Org3 has no such bid in its collection.
    let err = chaincode_error(network.submit_bid(Client::UC, "A1", &tx_id).await);
    assert!(matches!(err, Error::NoPrivateBid(bid) if bid == key("A1", &tx_id)));
    assert!(network.auction("A1").private_bids.is_empty());
}

#[tokio::test]
async fn submit_requires_open_auction() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.bid(Client::UB, "A1", 50).await;
    network.close(Client::SELLER, "A1").await.unwrap();

    let err = chaincode_error(network.submit_bid(Client::UB, "A1", &tx_id).await);
    assert!(matches!(
        err,
        Error::InvalidStatus {
            expected: Status::Open,
            actual: Status::Closed
        }
    ));
}

#[tokio::test]
async fn submit_fails_with_recorder() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.bid(Client::UB, "A1", 50).await;
    let before = network.ledger.state("A1");

    network.recorder.set_unavailable(true);
    let err = chaincode_error(network.submit_bid(Client::UB, "A1", &tx_id).await);
    assert!(matches!(err, Error::Recorder(_)));
    assert_eq!(network.ledger.state("A1"), before);
    assert_eq!(network.ledger.policy("A1").unwrap().orgs.len(), 1);
}

#[tokio::test]
async fn tampered_reveal() {
    let network = Network::new();
    network.create("A3", "painting").await;
    let tx_id = network.place(Client::UB, "A3", 10).await;
    network.close(Client::SELLER, "A3").await.unwrap();
    let before = network.ledger.state("A3");

    let err = chaincode_error(
        network
            .reveal(Client::UB, "A3", &tx_id, Client::UB.bid(1000))
            .await,
    );
    assert!(matches!(err, Error::HashMismatchLedger { .. }));
    assert_eq!(network.ledger.state("A3"), before);

    // Same content, different bytes.
    let reformatted = serde_json::to_vec_pretty(&PlaintextBid {
        price: 10,
        org: "Org2MSP".to_string(),
        bidder: Client::UB.identity(),
        valid: false,
        timestamp: String::new(),
    })
    .unwrap();
    let err = chaincode_error(network.reveal(Client::UB, "A3", &tx_id, reformatted).await);
    assert!(matches!(err, Error::HashMismatchLedger { .. }));
    assert_eq!(network.ledger.state("A3"), before);
}

#[tokio::test]
async fn wrong_revealer() {
    let network = Network::new();
    network.create("A4", "painting").await;
    let tx_id = network.place(Client::UB, "A4", 30).await;
    network.close(Client::SELLER, "A4").await.unwrap();

    let err = chaincode_error(
        network
            .reveal(Client::UC, "A4", &tx_id, Client::UB.bid(30))
            .await,
    );
    assert!(matches!(err, Error::NotBidder { client } if client == Client::UC.identity()));
    assert!(network.auction("A4").revealed_bids.is_empty());
}

#[tokio::test]
async fn reveal_requires_closed_auction() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.place(Client::UB, "A1", 30).await;

    let err = chaincode_error(
        network
            .reveal(Client::UB, "A1", &tx_id, Client::UB.bid(30))
            .await,
    );
    assert!(matches!(
        err,
        Error::InvalidStatus {
            expected: Status::Closed,
            actual: Status::Open
        }
    ));
}

#[tokio::test]
async fn reveal_requires_commitment() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.bid(Client::UB, "A1", 30).await;
    network.close(Client::SELLER, "A1").await.unwrap();

    let err = chaincode_error(
        network
            .reveal(Client::UB, "A1", &tx_id, Client::UB.bid(30))
            .await,
    );
    assert!(matches!(err, Error::NoCommitment(bid) if bid == key("A1", &tx_id)));
}

#[tokio::test]
async fn reveal_takes_recorded_timestamp() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.place(Client::UB, "A1", 30).await;
    network.close(Client::SELLER, "A1").await.unwrap();
    network
        .reveal(Client::UB, "A1", &tx_id, Client::UB.bid(30))
        .await
        .unwrap();

    let recorded = network.recorder.timestamps_of(&tx_id);
    assert_eq!(recorded.len(), 1);
    let bid = &network.auction("A1").revealed_bids[&key("A1", &tx_id)];
    assert_eq!(
        bid.timestamp,
        model::time::parse_recorder_timestamp(&recorded[0]).unwrap()
    );
    assert!(bid.valid);
    assert_eq!(bid.price, 30);
    assert_eq!(bid.org, "Org2MSP");
    assert_eq!(bid.bidder, Client::UB.identity());
}

#[tokio::test]
async fn reveal_twice_changes_nothing() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.place(Client::UB, "A1", 30).await;
    network.close(Client::SELLER, "A1").await.unwrap();
    network
        .reveal(Client::UB, "A1", &tx_id, Client::UB.bid(30))
        .await
        .unwrap();
    let before = network.ledger.state("A1");

    network
        .reveal(Client::UB, "A1", &tx_id, Client::UB.bid(30))
        .await
        .unwrap();
    assert_eq!(network.ledger.state("A1"), before);
}

#[tokio::test]
async fn reveal_without_timestamps() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.place(Client::UB, "A1", 30).await;
    network.close(Client::SELLER, "A1").await.unwrap();
    network.recorder.set_timestamps(&tx_id, &[]);

    let err = chaincode_error(
        network
            .reveal(Client::UB, "A1", &tx_id, Client::UB.bid(30))
            .await,
    );
    assert!(matches!(err, Error::NoTimestamps(id) if id == tx_id));
    assert!(network.auction("A1").revealed_bids.is_empty());
}

#[tokio::test]
async fn reveal_fails_with_recorder() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.place(Client::UB, "A1", 30).await;
    network.close(Client::SELLER, "A1").await.unwrap();
    network.recorder.set_unavailable(true);

    let err = chaincode_error(
        network
            .reveal(Client::UB, "A1", &tx_id, Client::UB.bid(30))
            .await,
    );
    assert!(matches!(err, Error::Recorder(_)));
    assert!(network.auction("A1").revealed_bids.is_empty());
}

#[tokio::test]
async fn query_own_bid() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.bid(Client::UA, "A1", 30).await;

    let payload = network
        .invoke(Client::UA, "QueryBid", &["A1", &tx_id])
        .await
        .unwrap();
    assert_eq!(payload, Client::UA.bid(30));

    // Same organization, different client.
    let err = chaincode_error(
        network
            .invoke(Client::SELLER, "QueryBid", &["A1", &tx_id])
            .await,
    );
    assert!(matches!(err, Error::NotBidder { .. }));

    let err = chaincode_error(network.invoke(Client::UA, "QueryBid", &["A1", "tx99"]).await);
    assert!(matches!(err, Error::NoPrivateBid(_)));
}
