//! The `crypto` subrecord: `kdf`, `checksum`, `cipher`, plus the symmetric
//! encrypt/decrypt operations that tie the three together per spec.md §4.7.

use crate::cipher;
use crate::checksum;
use crate::hex_bytes;
use crate::kdf::Kdf;
use crate::password::Password;
use crate::Error;
use serde_json::{json, Value};
use zeroize::Zeroizing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crypto {
    pub kdf: Kdf,
    /// `crypto.kdf.message`, preserved verbatim — EIP-2335 leaves this
    /// typically empty but does not forbid callers from using it.
    pub kdf_message: Vec<u8>,
    pub checksum_message: [u8; 32],
    pub cipher_iv: [u8; 16],
    pub cipher_message: Vec<u8>,
}

impl Crypto {
    pub fn from_value(v: &Value) -> Result<Self, Error> {
        let kdf_obj = v
            .get("kdf")
            .ok_or_else(|| Error::MalformedJson("crypto.kdf missing".into()))?;
        let kdf_function = kdf_obj
            .get("function")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedJson("crypto.kdf.function missing".into()))?;
        let kdf_params = kdf_obj
            .get("params")
            .ok_or_else(|| Error::MalformedJson("crypto.kdf.params missing".into()))?;
        let kdf = Kdf::from_value(kdf_function, kdf_params)?;
        let kdf_message = hex_bytes::decode(
            kdf_obj.get("message").and_then(Value::as_str).unwrap_or(""),
            "crypto.kdf.message",
        )?;

        let checksum_obj = v
            .get("checksum")
            .ok_or_else(|| Error::MalformedJson("crypto.checksum missing".into()))?;
        let checksum_function = checksum_obj
            .get("function")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedJson("crypto.checksum.function missing".into()))?;
        if checksum_function != checksum::SHA256 {
            return Err(Error::UnsupportedChecksumFunction(
                checksum_function.to_string(),
            ));
        }
        let checksum_message_hex = checksum_obj
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedJson("crypto.checksum.message missing".into()))?;
        let checksum_message_bytes = hex_bytes::decode(checksum_message_hex, "crypto.checksum.message")?;
        if checksum_message_bytes.len() != 32 {
            return Err(Error::InvalidChecksumLength {
                len: checksum_message_bytes.len(),
            });
        }
        let mut checksum_message = [0u8; 32];
        checksum_message.copy_from_slice(&checksum_message_bytes);

        let cipher_obj = v
            .get("cipher")
            .ok_or_else(|| Error::MalformedJson("crypto.cipher missing".into()))?;
        let cipher_function = cipher_obj
            .get("function")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedJson("crypto.cipher.function missing".into()))?;
        if cipher_function != cipher::AES_128_CTR {
            return Err(Error::UnsupportedCipherFunction(cipher_function.to_string()));
        }
        let cipher_params = cipher_obj
            .get("params")
            .ok_or_else(|| Error::MalformedJson("crypto.cipher.params missing".into()))?;
        let iv_hex = cipher_params
            .get("iv")
            .and_then(Value::as_str)
            .ok_or(Error::MissingCipherParams("iv"))?;
        let iv_bytes = hex_bytes::decode(iv_hex, "crypto.cipher.params.iv")?;
        if iv_bytes.len() != cipher::IV_LEN {
            return Err(Error::MissingCipherParams("iv"));
        }
        let mut cipher_iv = [0u8; 16];
        cipher_iv.copy_from_slice(&iv_bytes);
        let cipher_message_hex = cipher_obj
            .get("message")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedJson("crypto.cipher.message missing".into()))?;
        let cipher_message = hex_bytes::decode(cipher_message_hex, "crypto.cipher.message")?;

        Ok(Crypto {
            kdf,
            kdf_message,
            checksum_message,
            cipher_iv,
            cipher_message,
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "kdf": {
                "function": self.kdf.function_name(),
                "params": self.kdf.params_to_value(),
                "message": hex_bytes::encode(&self.kdf_message),
            },
            "checksum": {
                "function": checksum::SHA256,
                "params": {},
                "message": hex_bytes::encode(&self.checksum_message),
            },
            "cipher": {
                "function": cipher::AES_128_CTR,
                "params": {
                    "iv": hex_bytes::encode(&self.cipher_iv),
                },
                "message": hex_bytes::encode(&self.cipher_message),
            },
        })
    }

    /// Encrypts `secret` under a freshly derived key, drawing the checksum
    /// from the same derivation. `kdf` and `iv` are supplied by the caller
    /// so salts/IVs come from a single CSPRNG call site (spec.md §4.7 step
    /// 6, §5).
    pub fn encrypt(password: &Password, secret: &[u8], kdf: Kdf, iv: [u8; 16]) -> Result<Self, Error> {
        let dk = Zeroizing::new(kdf.derive(password.as_bytes())?);
        let cipher_message = cipher::apply(&dk[0..16], &iv, secret);
        let checksum_message = checksum::compute(&dk[16..32], &cipher_message);
        Ok(Crypto {
            kdf,
            kdf_message: Vec::new(),
            checksum_message,
            cipher_iv: iv,
            cipher_message,
        })
    }

    /// Verifies the password via the checksum, then decrypts the secret.
    /// Returns `Error::BadPassword` on checksum mismatch without revealing
    /// any secret material.
    pub fn decrypt(&self, password: &Password) -> Result<Zeroizing<Vec<u8>>, Error> {
        let dk = Zeroizing::new(self.kdf.derive(password.as_bytes())?);
        checksum::verify(&dk[16..32], &self.cipher_message, &self.checksum_message)?;
        let secret = cipher::apply(&dk[0..16], &self.cipher_iv, &self.cipher_message);
        Ok(Zeroizing::new(secret))
    }
}
