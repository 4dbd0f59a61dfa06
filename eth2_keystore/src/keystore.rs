//! The EIP-2335 envelope itself: `crypto`, `description`, `pubkey`, `path`,
//! `uuid`, `version`.

use crate::crypto::Crypto;
use crate::kdf::Kdf;
use crate::password::Password;
use crate::Error;
use serde_json::{json, Value};
use uuid::Uuid;
use zeroize::Zeroizing;

/// `version`. Only `V4` exists; any other integer is read before this type
/// is ever constructed, so unknown versions surface as
/// `Error::UnsupportedKeystoreVersion` rather than a deserialize failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Version {
    V4 = 4,
}

impl Default for Version {
    fn default() -> Self {
        Version::V4
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystore {
    pub crypto: Crypto,
    pub uuid: Uuid,
    /// EIP-2334 derivation path. Opaque to this crate — carried through
    /// verbatim, never synthesized (deriving real paths is out of scope;
    /// see spec.md §1 Non-goals).
    pub path: String,
    /// 96-char hex BLS12-381 G1 compressed public key. Opaque to this
    /// crate.
    pub pubkey: String,
    pub description: Option<String>,
    pub version: Version,
}

impl Keystore {
    /// Builds a new keystore by encrypting `secret` under `password`,
    /// carrying `pubkey`, `path` and `description` through from the run
    /// that produced `secret` (spec.md §4.7 step 6).
    #[allow(clippy::too_many_arguments)]
    pub fn encrypt(
        secret: &[u8],
        password: &Password,
        kdf: Kdf,
        iv: [u8; 16],
        uuid: Uuid,
        pubkey: String,
        path: String,
        description: Option<String>,
    ) -> Result<Self, Error> {
        let crypto = Crypto::encrypt(password, secret, kdf, iv)?;
        Ok(Keystore {
            crypto,
            uuid,
            path,
            pubkey,
            description,
            version: Version::V4,
        })
    }

    /// Verifies `password` against the embedded checksum and decrypts the
    /// wrapped secret. Does not interpret or validate `pubkey` — that is a
    /// BLS-layer concern outside this crate's scope.
    pub fn decrypt(&self, password: &Password) -> Result<Zeroizing<Vec<u8>>, Error> {
        self.crypto.decrypt(password)
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let v: Value = serde_json::from_str(s).map_err(|e| Error::MalformedJson(e.to_string()))?;
        Self::from_value(&v)
    }

    pub fn from_value(v: &Value) -> Result<Self, Error> {
        let version = v
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::MalformedJson("version missing".into()))?;
        if version != 4 {
            return Err(Error::UnsupportedKeystoreVersion(version));
        }
        let crypto_obj = v
            .get("crypto")
            .ok_or_else(|| Error::MalformedJson("crypto missing".into()))?;
        let crypto = Crypto::from_value(crypto_obj)?;
        let uuid_str = v
            .get("uuid")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedJson("uuid missing".into()))?;
        let uuid =
            Uuid::parse_str(uuid_str).map_err(|e| Error::MalformedJson(format!("uuid: {}", e)))?;
        let path = v
            .get("path")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let pubkey = v
            .get("pubkey")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedJson("pubkey missing".into()))?
            .to_string();
        let description = v
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Keystore {
            crypto,
            uuid,
            path,
            pubkey,
            description,
            version: Version::V4,
        })
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_value())
            .expect("keystore JSON value is always serializable")
    }

    pub fn to_value(&self) -> Value {
        let mut v = json!({
            "crypto": self.crypto.to_value(),
            "uuid": self.uuid.to_string(),
            "path": self.path,
            "pubkey": self.pubkey,
            "version": 4,
        });
        if let Some(description) = &self.description {
            v["description"] = json!(description);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // EIP-2335 scrypt test vector, as carried in the teacher's own
    // `eth2_keystore::lib` test module.
    const SCRYPT_VECTOR: &str = r#"
    {
        "crypto": {
            "kdf": {
                "function": "scrypt",
                "params": {
                    "dklen": 32,
                    "n": 262144,
                    "p": 1,
                    "r": 8,
                    "salt": "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
                },
                "message": ""
            },
            "checksum": {
                "function": "sha256",
                "params": {},
                "message": "149aafa27b041f3523c53d7acba1905fa6b1c90f9fef137568101f44b531a3cb"
            },
            "cipher": {
                "function": "aes-128-ctr",
                "params": {
                    "iv": "264daa3f303d7259501c93d997d84fe6"
                },
                "message": "54ecc8863c0550351eee5720f3be6a5d4a016025aa91cd6436cfec938d6a8d30"
            }
        },
        "pubkey": "9612d7a727c9d0a22e185a1c768478dfe919cada9266988cb32359c11f2b7b27f4ae4040902382ae2910c15e2b420d07",
        "uuid": "1d85ae20-35c5-4611-98e8-aa14a633906f",
        "path": "",
        "version": 4
    }
    "#;

    const PBKDF2_VECTOR: &str = r#"
    {
        "crypto": {
            "kdf": {
                "function": "pbkdf2",
                "params": {
                    "dklen": 32,
                    "c": 262144,
                    "prf": "hmac-sha256",
                    "salt": "d4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"
                },
                "message": ""
            },
            "checksum": {
                "function": "sha256",
                "params": {},
                "message": "18b148af8e52920318084560fd766f9d09587b4915258dec0676cba5b0da09d8"
            },
            "cipher": {
                "function": "aes-128-ctr",
                "params": {
                    "iv": "264daa3f303d7259501c93d997d84fe6"
                },
                "message": "a9249e0ca7315836356e4c7440361ff22b9fe71e2e2ed34fc1eb03976924ed48"
            }
        },
        "pubkey": "9612d7a727c9d0a22e185a1c768478dfe919cada9266988cb32359c11f2b7b27f4ae4040902382ae2910c15e2b420d07",
        "path": "m/12381/60/0/0",
        "uuid": "64625def-3331-4eea-ab6f-782f3ed16a83",
        "version": 4
    }
    "#;

    #[test]
    fn eip2335_test_vectors_decrypt_to_the_reference_secret() {
        let expected = hex!("000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f");
        let password = crate::password::preprocess("testpassword".as_bytes()).unwrap();
        for vector in [SCRYPT_VECTOR, PBKDF2_VECTOR] {
            let keystore = Keystore::from_json_str(vector).unwrap();
            let secret = keystore.decrypt(&password).unwrap();
            assert_eq!(&secret[..], &expected[..]);
        }
    }

    #[test]
    fn rejects_unsupported_version() {
        let bad = SCRYPT_VECTOR.replace("\"version\": 4", "\"version\": 3");
        assert_eq!(
            Keystore::from_json_str(&bad).unwrap_err(),
            Error::UnsupportedKeystoreVersion(3)
        );
    }

    #[test]
    fn round_trips_through_json() {
        let keystore = Keystore::from_json_str(SCRYPT_VECTOR).unwrap();
        let reparsed = Keystore::from_json_str(&keystore.to_json_string()).unwrap();
        assert_eq!(keystore, reparsed);
    }

    #[test]
    fn preserves_description_through_round_trip() {
        let mut keystore = Keystore::from_json_str(PBKDF2_VECTOR).unwrap();
        keystore.description = Some("validator 0".to_string());
        let reparsed = Keystore::from_json_str(&keystore.to_json_string()).unwrap();
        assert_eq!(reparsed.description.as_deref(), Some("validator 0"));
    }
}
