//! The `crypto.kdf` variant: `scrypt` and `pbkdf2`, each with its own,
//! disjoint parameter schema. Modeled as a tagged sum rather than an
//! untagged merge of optional fields, so `Kdf::from_value` is the single
//! place that decides which schema applies, driven by the `function` key.

use crate::Error;
use hmac::Hmac;
use serde_json::{json, Value};
use sha2::Sha256;
use zeroize::Zeroize;

pub const PBKDF2: &str = "pbkdf2";
pub const SCRYPT: &str = "scrypt";
const HMAC_SHA256: &str = "hmac-sha256";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pbkdf2Params {
    pub dklen: u32,
    pub c: u32,
    pub salt: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScryptParams {
    pub dklen: u32,
    pub n: u32,
    pub r: u32,
    pub p: u32,
    pub salt: Vec<u8>,
}

/// `crypto.kdf.params`, tagged by the sibling `crypto.kdf.function` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kdf {
    Pbkdf2(Pbkdf2Params),
    Scrypt(ScryptParams),
}

impl Kdf {
    /// Builds a `pbkdf2` KDF with the standard 32-byte `dklen`, validating
    /// `c` against the same rules `from_value` enforces on parsed keystores.
    pub fn new_pbkdf2(c: u32, salt: Vec<u8>) -> Result<Self, Error> {
        let params = Pbkdf2Params {
            dklen: 32,
            c,
            salt,
        };
        validate_pbkdf2(&params)?;
        Ok(Kdf::Pbkdf2(params))
    }

    /// Builds a `scrypt` KDF with the standard 32-byte `dklen`.
    pub fn new_scrypt(n: u32, r: u32, p: u32, salt: Vec<u8>) -> Result<Self, Error> {
        let params = ScryptParams {
            dklen: 32,
            n,
            r,
            p,
            salt,
        };
        validate_scrypt(&params)?;
        Ok(Kdf::Scrypt(params))
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            Kdf::Pbkdf2(_) => PBKDF2,
            Kdf::Scrypt(_) => SCRYPT,
        }
    }

    pub fn dklen(&self) -> u32 {
        match self {
            Kdf::Pbkdf2(p) => p.dklen,
            Kdf::Scrypt(p) => p.dklen,
        }
    }

    pub fn salt(&self) -> &[u8] {
        match self {
            Kdf::Pbkdf2(p) => &p.salt,
            Kdf::Scrypt(p) => &p.salt,
        }
    }

    /// Reads `function` first, then projects `params` into the matching
    /// schema. Fails with `UnsupportedKdfFunction` for any tag outside
    /// `{scrypt, pbkdf2}`, and `MissingKdfParams`/`InvalidHex` if the
    /// matching schema's fields are absent or malformed.
    pub fn from_value(function: &str, params: &Value) -> Result<Self, Error> {
        match function {
            PBKDF2 => {
                let dklen = req_u32(params, "dklen")?;
                let c = req_u32(params, "c")?;
                let prf = req_str(params, "prf")?;
                if prf != HMAC_SHA256 {
                    return Err(Error::InvalidKdfParameters("prf must be hmac-sha256"));
                }
                let salt = crate::hex_bytes::decode(req_str(params, "salt")?, "kdf.params.salt")?;
                let params = Pbkdf2Params { dklen, c, salt };
                validate_pbkdf2(&params)?;
                Ok(Kdf::Pbkdf2(params))
            }
            SCRYPT => {
                let dklen = req_u32(params, "dklen")?;
                let n = req_u32(params, "n")?;
                let r = req_u32(params, "r")?;
                let p = req_u32(params, "p")?;
                let salt = crate::hex_bytes::decode(req_str(params, "salt")?, "kdf.params.salt")?;
                let params = ScryptParams {
                    dklen,
                    n,
                    r,
                    p,
                    salt,
                };
                validate_scrypt(&params)?;
                Ok(Kdf::Scrypt(params))
            }
            other => Err(Error::UnsupportedKdfFunction(other.to_string())),
        }
    }

    pub fn params_to_value(&self) -> Value {
        match self {
            Kdf::Pbkdf2(p) => json!({
                "dklen": p.dklen,
                "c": p.c,
                "prf": HMAC_SHA256,
                "salt": crate::hex_bytes::encode(&p.salt),
            }),
            Kdf::Scrypt(p) => json!({
                "dklen": p.dklen,
                "n": p.n,
                "r": p.r,
                "p": p.p,
                "salt": crate::hex_bytes::encode(&p.salt),
            }),
        }
    }

    /// Derives a `dklen`-byte key from `password`. The returned buffer is
    /// the caller's responsibility to zeroize.
    pub fn derive(&self, password: &[u8]) -> Result<Vec<u8>, Error> {
        let dklen = self.dklen() as usize;
        if dklen < 32 {
            return Err(Error::DerivedKeyTooShort { dklen });
        }
        let mut dk = vec![0u8; dklen];
        match self {
            Kdf::Pbkdf2(p) => {
                pbkdf2::pbkdf2::<Hmac<Sha256>>(password, &p.salt, p.c, &mut dk)
                    .map_err(|_| Error::InvalidKdfParameters("pbkdf2 output length"))?;
            }
            Kdf::Scrypt(p) => {
                let log_n = (p.n as f64).log2();
                if log_n.fract() != 0.0 || p.n < 2 {
                    return Err(Error::InvalidKdfParameters("n must be a power of two >= 2"));
                }
                let scrypt_params = scrypt::Params::new(log_n as u8, p.r, p.p, dklen)
                    .map_err(|_| Error::InvalidKdfParameters("scrypt parameters out of range"))?;
                scrypt::scrypt(password, &p.salt, &scrypt_params, &mut dk).map_err(|_| {
                    dk.zeroize();
                    Error::InvalidKdfParameters("scrypt output length")
                })?;
            }
        }
        Ok(dk)
    }
}

fn validate_pbkdf2(p: &Pbkdf2Params) -> Result<(), Error> {
    if p.dklen < 32 {
        return Err(Error::DerivedKeyTooShort {
            dklen: p.dklen as usize,
        });
    }
    if p.c < 1 {
        return Err(Error::InvalidKdfParameters("c must be >= 1"));
    }
    Ok(())
}

fn validate_scrypt(p: &ScryptParams) -> Result<(), Error> {
    if p.dklen < 32 {
        return Err(Error::DerivedKeyTooShort {
            dklen: p.dklen as usize,
        });
    }
    if p.n < 2 || !p.n.is_power_of_two() {
        return Err(Error::InvalidKdfParameters("n must be a power of two >= 2"));
    }
    if p.r < 1 {
        return Err(Error::InvalidKdfParameters("r must be >= 1"));
    }
    if p.p < 1 {
        return Err(Error::InvalidKdfParameters("p must be >= 1"));
    }
    Ok(())
}

fn req_u32(v: &Value, field: &'static str) -> Result<u32, Error> {
    v.get(field)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(Error::MissingKdfParams(field))
}

fn req_str<'a>(v: &'a Value, field: &'static str) -> Result<&'a str, Error> {
    v.get(field)
        .and_then(Value::as_str)
        .ok_or(Error::MissingKdfParams(field))
}
