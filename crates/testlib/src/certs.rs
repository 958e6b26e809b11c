//! Self-signed client certificates, one per test user.
//!
//! Subjects are `C=US, O=<org>, OU=client, CN=<user>`.

pub const SELLER: &str = "\
-----BEGIN CERTIFICATE-----\n\
MIIB0zCCAXmgAwIBAgIUJWneN6M0I1VR37s3PV1RzevPOY8wCgYIKoZIzj0EAwIw\n\
PjELMAkGA1UEBhMCVVMxDTALBgNVBAoMBE9yZzExDzANBgNVBAsMBmNsaWVudDEP\n\
MA0GA1UEAwwGc2VsbGVyMCAXDTI2MTAxOTA3NDExNloYDzIxMjYwOTI1MDc0MTE2\n\
WjA+MQswCQYDVQQGEwJVUzENMAsGA1UECgwET3JnMTEPMA0GA1UECwwGY2xpZW50\n\
MQ8wDQYDVQQDDAZzZWxsZXIwWTATBgcqhkjOPQIBBggqhkjOPQMBBwNCAASiMXaE\n\
eKpAeVkGhWyaxRNEBNkYuG7mPuFyEROL66DAejQnYPwC9Z9sAYP9SjsorEIEDfUx\n\
JSxqG1Z5r24uksQho1MwUTAdBgNVHQ4EFgQUtnEh4zcXDwkDl0D0pAuuJi+NnPMw\n\
HwYDVR0jBBgwFoAUtnEh4zcXDwkDl0D0pAuuJi+NnPMwDwYDVR0TAQH/BAUwAwEB\n\
/zAKBggqhkjOPQQDAgNIADBFAiEAnZ/GJ7bY0M1fG02imKsq8SjrYPQGEqVRVMHm\n\
mVajOUACIESRjVBEohaSL6QpMmzMcOV9OYrUPEm818wGmKD2q+e3\n\
-----END CERTIFICATE-----\n\
";

pub const UA: &str = "\
-----BEGIN CERTIFICATE-----\n\
MIIBzDCCAXGgAwIBAgIUX9NTjAuJlkXYGCQHWu2jvTyHllYwCgYIKoZIzj0EAwIw\n\
OjELMAkGA1UEBhMCVVMxDTALBgNVBAoMBE9yZzExDzANBgNVBAsMBmNsaWVudDEL\n\
MAkGA1UEAwwCdUEwIBcNMjYxMDE5MDc0MTE2WhgPMjEyNjA5MjUwNzQxMTZaMDox\n\
CzAJBgNVBAYTAlVTMQ0wCwYDVQQKDARPcmcxMQ8wDQYDVQQLDAZjbGllbnQxCzAJ\n\
BgNVBAMMAnVBMFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEu64ro89pfc0h1+17\n\
rxAeE7+I7SXzuASgQJ0ok0fAchmjnDB2R7Ii5BlZW+/LuplwaS2jWfU7WdexkdfA\n\
Jh5DD6NTMFEwHQYDVR0OBBYEFA7tGv4j8lN0+G+nO/jFqm3CIiWYMB8GA1UdIwQY\n\
MBaAFA7tGv4j8lN0+G+nO/jFqm3CIiWYMA8GA1UdEwEB/wQFMAMBAf8wCgYIKoZI\n\
zj0EAwIDSQAwRgIhAIKU8IApva2qfgZMTKFGs+uAkvTkAxgujA6Fc6Bh+8xxAiEA\n\
lEpk44gnU99HSN9doFiz66kGqFpbbmVvkM8ozBodmB4=\n\
-----END CERTIFICATE-----\n\
";

pub const UB: &str = "\
-----BEGIN CERTIFICATE-----\n\
MIIByzCCAXGgAwIBAgIUdTpC4BHH2Zq6uNzn/AIIoup36mwwCgYIKoZIzj0EAwIw\n\
OjELMAkGA1UEBhMCVVMxDTALBgNVBAoMBE9yZzIxDzANBgNVBAsMBmNsaWVudDEL\n\
MAkGA1UEAwwCdUIwIBcNMjYxMDE5MDc0MTE2WhgPMjEyNjA5MjUwNzQxMTZaMDox\n\
CzAJBgNVBAYTAlVTMQ0wCwYDVQQKDARPcmcyMQ8wDQYDVQQLDAZjbGllbnQxCzAJ\n\
BgNVBAMMAnVCMFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAER5NIREQ54sWMeUY9\n\
Sw2JTD78UwxbQC+aZ/+x4+fL2P6PQoMaIWt6dA4mFfZ3dkdRW8pO9v+20+b/WRGT\n\
ZG3QrqNTMFEwHQYDVR0OBBYEFI579gTgadGH9GNyR2gOn8VcPL+NMB8GA1UdIwQY\n\
MBaAFI579gTgadGH9GNyR2gOn8VcPL+NMA8GA1UdEwEB/wQFMAMBAf8wCgYIKoZI\n\
zj0EAwIDSAAwRQIgT/DbUj5R9xNewlmbpxBipaiAsrfFLuN6UkNauZ6KVwcCIQDa\n\
qEJfzICu32eEBQkGaWBTw5ip0hKuOQTZDa63sU6ZYg==\n\
-----END CERTIFICATE-----\n\
";

pub const UC: &str = "\
-----BEGIN CERTIFICATE-----\n\
MIIBzDCCAXGgAwIBAgIURAj6f+pbmsK1R5PyW4/eTLMkbxQwCgYIKoZIzj0EAwIw\n\
OjELMAkGA1UEBhMCVVMxDTALBgNVBAoMBE9yZzMxDzANBgNVBAsMBmNsaWVudDEL\n\
MAkGA1UEAwwCdUMwIBcNMjYxMDE5MDc0MTE2WhgPMjEyNjA5MjUwNzQxMTZaMDox\n\
CzAJBgNVBAYTAlVTMQ0wCwYDVQQKDARPcmczMQ8wDQYDVQQLDAZjbGllbnQxCzAJ\n\
BgNVBAMMAnVDMFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAEaVlZeskyTQ/z4n6+\n\
YKb0I5pRC4nYvdaZsn8ALPbZPYQTl23y0HtU4YMpxyr6AU/P+A1bKDkn0iJ+JitM\n\
mg8lTqNTMFEwHQYDVR0OBBYEFDi7eSDxcEetBHzmUClW643Hi4EFMB8GA1UdIwQY\n\
MBaAFDi7eSDxcEetBHzmUClW643Hi4EFMA8GA1UdEwEB/wQFMAMBAf8wCgYIKoZI\n\
zj0EAwIDSQAwRgIhAP9vYnkmtRiOleiCfeG6IJDYR3P2//yXxyD1GsCKi9nOAiEA\n\
xeDKDWrPBWpCD+STfMSnUv6RHL2Gin6V87BDXu5qIPw=\n\
-----END CERTIFICATE-----\n\
";

/// A serialized creator identity as the ledger hands it to chaincode: the MSP
/// id followed by the PEM certificate.
pub fn creator(msp_id: &str, pem: &str) -> Vec<u8> {
    let mut creator = Vec::with_capacity(msp_id.len() + pem.len() + 4);
    creator.extend_from_slice(b"\n");
    creator.extend_from_slice(msp_id.as_bytes());
    creator.extend_from_slice(b"\x12");
    creator.extend_from_slice(pem.as_bytes());
    creator
}
