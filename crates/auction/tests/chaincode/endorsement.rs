use {
    crate::setup::{Network, key},
    std::collections::BTreeSet,
    testlib::{Client, CommitError, Failure},
};

fn orgs(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn policy_follows_organizations() {
    let network = Network::new();
    network.create("A1", "painting").await;
    assert_eq!(network.ledger.policy("A1").unwrap().orgs, orgs(&["Org1MSP"]));

    // A second bid from the seller's organization changes nothing.
    network.place(Client::UA, "A1", 10).await;
    assert_eq!(network.ledger.policy("A1").unwrap().orgs, orgs(&["Org1MSP"]));

    network.place(Client::UB, "A1", 20).await;
    network.place(Client::UB, "A1", 30).await;
    network.place(Client::UC, "A1", 40).await;
    let expected = orgs(&["Org1MSP", "Org2MSP", "Org3MSP"]);
    assert_eq!(network.ledger.policy("A1").unwrap().orgs, expected);
    assert_eq!(
        network
            .auction("A1")
            .organizations
            .into_iter()
            .collect::<BTreeSet<_>>(),
        expected
    );
}

#[tokio::test]
async fn joining_needs_current_and_new_org() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let tx_id = network.bid(Client::UB, "A1", 20).await;

    let tx = network.ledger.tx(Client::UB).endorsed_by(&["Org2MSP"]);
    let err = network
        .ledger
        .submit(&network.contract, tx, "SubmitBid", &["A1", &tx_id])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Failure::Commit(CommitError::EndorsementPolicy { key: ref k, ref org })
            if k == "A1" && org == "Org1MSP"
    ));
    assert!(network.auction("A1").private_bids.is_empty());

    let tx = network
        .ledger
        .tx(Client::UB)
        .endorsed_by(&["Org1MSP", "Org2MSP"]);
    network
        .ledger
        .submit(&network.contract, tx, "SubmitBid", &["A1", &tx_id])
        .await
        .unwrap();
    assert_eq!(network.auction("A1").organizations, ["Org1MSP", "Org2MSP"]);
}

#[tokio::test]
async fn seller_alone_cannot_close_after_others_joined() {
    let network = Network::new();
    network.create("A1", "painting").await;
    network.place(Client::UB, "A1", 20).await;

    let tx = network.ledger.tx(Client::SELLER).endorsed_by(&["Org1MSP"]);
    let err = network
        .ledger
        .submit(&network.contract, tx, "CloseAuction", &["A1"])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Failure::Commit(CommitError::EndorsementPolicy { ref org, .. }) if org == "Org2MSP"
    ));

    let tx = network
        .ledger
        .tx(Client::SELLER)
        .endorsed_by(&["Org1MSP", "Org2MSP"]);
    network
        .ledger
        .submit(&network.contract, tx, "CloseAuction", &["A1"])
        .await
        .unwrap();
}

#[tokio::test]
async fn concurrent_submits_conflict() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let b = network.bid(Client::UB, "A1", 20).await;
    let c = network.bid(Client::UC, "A1", 30).await;

    let first = network.ledger.tx(Client::UB);
    let second = network.ledger.tx(Client::UC);
    network
        .ledger
        .simulate(&network.contract, &first, "SubmitBid", &["A1", &b])
        .await
        .unwrap();
    network
        .ledger
        .simulate(&network.contract, &second, "SubmitBid", &["A1", &c])
        .await
        .unwrap();

    network.ledger.commit(first).unwrap();
    assert!(matches!(
        network.ledger.commit(second),
        Err(CommitError::MvccConflict(ref k)) if k == "A1"
    ));
    let auction = network.auction("A1");
    assert_eq!(auction.private_bids.len(), 1);
    assert!(auction.private_bids.contains_key(&key("A1", &b)));

    // Retrying against the new state succeeds and keeps the first commitment.
    network.submit_bid(Client::UC, "A1", &c).await.unwrap();
    let auction = network.auction("A1");
    assert_eq!(auction.private_bids.len(), 2);
    assert_eq!(auction.organizations, ["Org1MSP", "Org2MSP", "Org3MSP"]);
}

#[tokio::test]
async fn bids_do_not_conflict_with_submits() {
    let network = Network::new();
    network.create("A1", "painting").await;
    let b = network.bid(Client::UB, "A1", 20).await;

    let submit = network.ledger.tx(Client::UB);
    let bid = network.ledger.tx(Client::UC).with_bid(Client::UC.bid(30));
    network
        .ledger
        .simulate(&network.contract, &submit, "SubmitBid", &["A1", &b])
        .await
        .unwrap();
    network
        .ledger
        .simulate(&network.contract, &bid, "Bid", &["A1"])
        .await
        .unwrap();

    network.ledger.commit(bid).unwrap();
    network.ledger.commit(submit).unwrap();
    assert_eq!(network.auction("A1").private_bids.len(), 1);
}
