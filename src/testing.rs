//! Key material and token helpers shared by the unit tests.

use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::prelude::{BASE64_STANDARD, BASE64_URL_SAFE_NO_PAD};
use base64::Engine;
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use openssl::asn1::Asn1Time;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::{X509NameBuilder, X509};
use serde_json::{json, Value};

use crate::jwk::SigningKey;

// RSA generation is slow enough to share across tests.
static PRIMARY: LazyLock<TestKey> = LazyLock::new(TestKey::generate);
static OTHER: LazyLock<TestKey> = LazyLock::new(TestKey::generate);

pub(crate) struct TestKey {
    pkey: PKey<Private>,
    certificate: X509,
}

impl TestKey {
    pub(crate) fn primary() -> &'static TestKey {
        &PRIMARY
    }

    pub(crate) fn other() -> &'static TestKey {
        &OTHER
    }

    pub(crate) fn generate() -> TestKey {
        let rsa = Rsa::generate(2048).expect("Failed to generate RSA key");
        let pkey = PKey::from_rsa(rsa).expect("Failed to wrap RSA key");

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", "bearer-inspect-test").unwrap();
        let name = name.build();

        let mut builder = X509::builder().unwrap();
        builder.set_version(2).unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        builder.set_pubkey(&pkey).unwrap();
        builder
            .set_not_before(&Asn1Time::days_from_now(0).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::days_from_now(1).unwrap())
            .unwrap();
        builder.sign(&pkey, MessageDigest::sha256()).unwrap();

        TestKey {
            pkey,
            certificate: builder.build(),
        }
    }

    /// Base64 DER of the self-signed certificate, as published in `x5c`.
    pub(crate) fn x5c(&self) -> String {
        BASE64_STANDARD.encode(self.certificate.to_der().unwrap())
    }

    /// Url-safe `n` and `e` of the public key.
    pub(crate) fn rsa_components(&self) -> (String, String) {
        let rsa = self.pkey.rsa().unwrap();
        (
            BASE64_URL_SAFE_NO_PAD.encode(rsa.n().to_vec()),
            BASE64_URL_SAFE_NO_PAD.encode(rsa.e().to_vec()),
        )
    }

    pub(crate) fn jwk(&self, kid: &str) -> Value {
        json!({
            "kid": kid,
            "kty": "RSA",
            "alg": "RS256",
            "use": "sig",
            "x5c": [self.x5c()],
        })
    }

    pub(crate) fn signing_key(&self, kid: &str) -> SigningKey {
        serde_json::from_value(self.jwk(kid)).unwrap()
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        self.signing_key("unused").decoding_key().unwrap()
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        let pem = self.pkey.rsa().unwrap().private_key_to_pem().unwrap();
        EncodingKey::from_rsa_pem(&pem).expect("Failed to create encoding key")
    }

    /// Signs `claims` with RS256, setting `kid` in the header when given.
    pub(crate) fn sign(&self, claims: &Value, kid: Option<&str>) -> String {
        self.sign_with(Algorithm::RS256, claims, kid)
    }

    pub(crate) fn sign_with(&self, alg: Algorithm, claims: &Value, kid: Option<&str>) -> String {
        let mut header = Header::new(alg);
        header.kid = kid.map(str::to_owned);
        encode(&header, claims, &self.encoding_key()).unwrap()
    }
}

pub(crate) fn key_set(entries: &[Value]) -> Value {
    json!({ "keys": entries })
}

pub(crate) fn now_as_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Claims a Keycloak realm would issue for the `apps` client.
pub(crate) fn valid_claims() -> Value {
    let now = now_as_secs();
    json!({
        "exp": now + 3600,
        "iat": now,
        "jti": "7f0c1c1e-3d0b-4a55-9d59-2f1e0d6a1a10",
        "iss": "https://idp.example.com/auth/realms/DominoRealm",
        "aud": "apps",
        "sub": "f1b2c3d4",
        "typ": "Bearer",
        "azp": "apps",
        "preferred_username": "integration-test",
        "realm_access": { "roles": ["offline_access", "uma_authorization"] }
    })
}
