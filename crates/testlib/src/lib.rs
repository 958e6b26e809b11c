//! Test harness for the auction chaincode: an in-memory ledger runtime, a
//! recording fake of the time recorder and client certificates.

pub mod certs;
pub mod ledger;
pub mod recorder;

pub use {
    ledger::{Client, CommitError, Failure, Ledger, Tx},
    recorder::FakeRecorder,
};

/// Organizations of the test network.
pub const ORGS: [&str; 3] = ["Org1MSP", "Org2MSP", "Org3MSP"];
