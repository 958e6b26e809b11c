//! Who submitted a transaction and from which organization.

use {
    crate::{
        error::{Error, Result},
        ledger::Stub,
    },
    regex::bytes::Regex,
    std::sync::LazyLock,
    x509_parser::pem::parse_x509_pem,
};

static CERTIFICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("-----BEGIN CERTIFICATE-----[^ ]+-----END CERTIFICATE-----\n")
        .expect("certificate pattern is valid")
});

/// Identity of the submitting client as read from its certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    /// `x509::<subject>::<issuer>`, unique per client certificate.
    pub id: String,
    pub common_name: String,
}

impl Certificate {
    /// Reads the first PEM certificate in a serialized creator identity.
    pub fn from_creator(creator: &[u8]) -> Result<Self> {
        let pem = CERTIFICATE
            .find(creator)
            .ok_or_else(|| Error::InvalidCertificate("no PEM certificate in creator".into()))?;
        let (_, pem) = parse_x509_pem(pem.as_bytes())
            .map_err(|err| Error::InvalidCertificate(err.to_string()))?;
        let certificate = pem
            .parse_x509()
            .map_err(|err| Error::InvalidCertificate(err.to_string()))?;

        let common_name = certificate
            .subject()
            .iter_common_name()
            .next()
            .and_then(|name| name.as_str().ok())
            .ok_or_else(|| Error::InvalidCertificate("certificate subject has no common name".into()))?
            .to_string();
        Ok(Self {
            id: format!("x509::{}::{}", certificate.subject(), certificate.issuer()),
            common_name,
        })
    }
}

/// Identity of the submitting client.
pub fn submitter_identity(stub: &dyn Stub) -> Result<String> {
    Ok(submitter_certificate(stub)?.id)
}

/// MSP ID of the submitting client's organization.
pub fn submitter_org(stub: &dyn Stub) -> Result<String> {
    stub.client_msp_id().map_err(Error::Ledger)
}

/// Common name from the subject of the submitter's certificate.
pub fn endorser_common_name(stub: &dyn Stub) -> Result<String> {
    Ok(submitter_certificate(stub)?.common_name)
}

/// Private data may only be written on a peer of the client's own
/// organization.
pub fn verify_client_org_matches_peer_org(stub: &dyn Stub) -> Result<()> {
    let client = submitter_org(stub)?;
    let peer = stub.peer_msp_id().map_err(Error::Ledger)?;
    if client != peer {
        return Err(Error::WrongPeer { client, peer });
    }
    Ok(())
}

fn submitter_certificate(stub: &dyn Stub) -> Result<Certificate> {
    let creator = stub.creator().map_err(Error::Ledger)?;
    Certificate::from_creator(&creator)
}
