use {
    auction::Contract,
    model::{Auction, BidKey},
    std::sync::Arc,
    testlib::{Client, Failure, FakeRecorder, Ledger},
};

pub const TIMELIMIT: &str = "2030-01-01T00:00:00.123456789Z";

/// A ledger, the time recorder and the chaincode installed on every peer.
pub struct Network {
    pub ledger: Ledger,
    pub recorder: Arc<FakeRecorder>,
    pub contract: Contract,
}

impl Network {
    pub fn new() -> Self {
        observe::tracing::initialize_reentrant("warn,auction=debug,testlib=debug");
        let recorder = Arc::new(FakeRecorder::default());
        Self {
            ledger: Ledger::new(),
            contract: Contract::new(recorder.clone()),
            recorder,
        }
    }

    pub async fn invoke(
        &self,
        client: Client,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, Failure> {
        let tx = self.ledger.tx(client);
        self.ledger.submit(&self.contract, tx, function, args).await
    }

    pub async fn create(&self, auction_id: &str, item: &str) {
        self.invoke(Client::SELLER, "CreateAuction", &[auction_id, item, TIMELIMIT])
            .await
            .unwrap();
    }

    /// Stores a bid of `price` privately and returns its transaction id.
    pub async fn bid(&self, client: Client, auction_id: &str, price: u64) -> String {
        self.bid_plaintext(client, auction_id, client.bid(price))
            .await
            .unwrap()
    }

    pub async fn bid_plaintext(
        &self,
        client: Client,
        auction_id: &str,
        plaintext: Vec<u8>,
    ) -> Result<String, Failure> {
        let tx = self.ledger.tx(client).with_bid(plaintext);
        let tx_id = self
            .ledger
            .submit(&self.contract, tx, "Bid", &[auction_id])
            .await?;
        Ok(String::from_utf8(tx_id).unwrap())
    }

    pub async fn submit_bid(
        &self,
        client: Client,
        auction_id: &str,
        tx_id: &str,
    ) -> Result<Vec<u8>, Failure> {
        self.invoke(client, "SubmitBid", &[auction_id, tx_id]).await
    }

    pub async fn reveal(
        &self,
        client: Client,
        auction_id: &str,
        tx_id: &str,
        plaintext: Vec<u8>,
    ) -> Result<Vec<u8>, Failure> {
        let tx = self.ledger.tx(client).with_bid(plaintext);
        self.ledger
            .submit(&self.contract, tx, "RevealBid", &[auction_id, tx_id])
            .await
    }

    pub async fn close(&self, client: Client, auction_id: &str) -> Result<Vec<u8>, Failure> {
        self.invoke(client, "CloseAuction", &[auction_id]).await
    }

    pub async fn end(&self, client: Client, auction_id: &str) -> Result<Vec<u8>, Failure> {
        self.invoke(client, "EndAuction", &[auction_id]).await
    }

    /// Bids, submits and returns the transaction id of the bid.
    pub async fn place(&self, client: Client, auction_id: &str, price: u64) -> String {
        let tx_id = self.bid(client, auction_id, price).await;
        self.submit_bid(client, auction_id, &tx_id).await.unwrap();
        tx_id
    }

    pub fn auction(&self, auction_id: &str) -> Auction {
        self.ledger.auction(auction_id).unwrap()
    }
}

pub fn key(auction_id: &str, tx_id: &str) -> BidKey {
    BidKey::new(auction_id, tx_id).unwrap()
}

/// Unwraps the chaincode error of a failed transaction.
pub fn chaincode_error(result: Result<Vec<u8>, Failure>) -> auction::Error {
    match result {
        Err(Failure::Chaincode(err)) => err,
        other => panic!("expected chaincode error, got {other:?}"),
    }
}
