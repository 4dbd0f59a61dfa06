use std::fmt;

/// Errors produced while parsing, verifying, decrypting or re-encrypting an
/// EIP-2335 keystore.
///
/// Never carries secret bytes (password, derived key or plaintext secret) in
/// any variant; callers may safely `Display` or log these.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The `version` field was present but not `4`.
    UnsupportedKeystoreVersion(u64),
    /// `crypto.kdf.function` was neither `scrypt` nor `pbkdf2`.
    UnsupportedKdfFunction(String),
    /// `crypto.cipher.function` was not `aes-128-ctr`.
    UnsupportedCipherFunction(String),
    /// `crypto.checksum.function` was not `sha256`.
    UnsupportedChecksumFunction(String),
    /// `crypto.kdf.params` was missing a key required by the declared
    /// `function`.
    MissingKdfParams(&'static str),
    /// `crypto.cipher.params` was missing a key required by `aes-128-ctr`.
    MissingCipherParams(&'static str),
    /// A hex field had odd length or a non-hex-digit byte.
    InvalidHex(&'static str),
    /// The JSON document did not parse, or was missing a required field.
    MalformedJson(String),
    /// `dklen`, `c`, `n`, `r` or `p` fell outside the range §3 requires.
    InvalidKdfParameters(&'static str),
    /// The KDF was asked to derive fewer than 32 bytes.
    DerivedKeyTooShort { dklen: usize },
    /// The decoded `checksum.message` was not 32 bytes.
    InvalidChecksumLength { len: usize },
    /// The checksum did not match; the supplied password is wrong.
    BadPassword,
    /// The password file's bytes were not valid UTF-8.
    BadPasswordEncoding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedKeystoreVersion(v) => {
                write!(f, "unsupported keystore version: {}", v)
            }
            Error::UnsupportedKdfFunction(s) => write!(f, "unsupported kdf function: {}", s),
            Error::UnsupportedCipherFunction(s) => {
                write!(f, "unsupported cipher function: {}", s)
            }
            Error::UnsupportedChecksumFunction(s) => {
                write!(f, "unsupported checksum function: {}", s)
            }
            Error::MissingKdfParams(field) => write!(f, "missing kdf param: {}", field),
            Error::MissingCipherParams(field) => write!(f, "missing cipher param: {}", field),
            Error::InvalidHex(field) => write!(f, "invalid hex in field: {}", field),
            Error::MalformedJson(msg) => write!(f, "malformed keystore json: {}", msg),
            Error::InvalidKdfParameters(why) => write!(f, "invalid kdf parameters: {}", why),
            Error::DerivedKeyTooShort { dklen } => {
                write!(f, "derived key too short: dklen = {} (need >= 32)", dklen)
            }
            Error::InvalidChecksumLength { len } => {
                write!(f, "invalid checksum length: {} bytes (need 32)", len)
            }
            Error::BadPassword => write!(f, "incorrect password"),
            Error::BadPasswordEncoding => write!(f, "password file is not valid UTF-8"),
        }
    }
}

impl std::error::Error for Error {}
