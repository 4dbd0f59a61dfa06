//! The conversion pipeline: parse, verify, decrypt, re-encrypt, write. One
//! pair is one transaction — its failure never touches another pair's
//! output (spec.md §4.7, §7).

use crate::naming::{NamingMode, Pair};
use crate::{validate, Error};
use eth2_keystore::{random_iv, Kdf, Keystore};
use slog::{info, o, warn};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// Which KDF function newly-written keystores should use. The run selects
/// one; both sets of strength parameters are carried in `Config` regardless,
/// since an operator may switch `kdf_function` without re-specifying every
/// flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfFunction {
    Pbkdf2,
    Scrypt,
}

impl Default for KdfFunction {
    fn default() -> Self {
        KdfFunction::Pbkdf2
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub src_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub password_dir: PathBuf,
    pub mode: NamingMode,
    pub kdf_function: KdfFunction,
    pub pbkdf2_count: u32,
    pub scrypt_n: u32,
    pub scrypt_p: u32,
    pub scrypt_r: u32,
}

impl Config {
    /// True if every KDF strength parameter is still at its CLI default —
    /// used by the binary to print the production-strength warning spec.md
    /// §9 flags as an open policy gap.
    pub fn uses_placeholder_kdf_strength(&self) -> bool {
        self.pbkdf2_count == 1 && self.scrypt_n == 2 && self.scrypt_p == 1 && self.scrypt_r == 8
    }
}

/// Outcome of a full run: which pairs succeeded, and which failed with
/// which error. The binary picks its exit code from this.
#[derive(Debug, Default)]
pub struct Summary {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, Error)>,
}

impl Summary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Validates the source/password/destination directories, resolves pairs
/// per `config.mode`, then converts each pair independently. A directory-
/// level validation failure aborts before any pair is processed; a single
/// pair's failure does not stop the run (spec.md §7).
pub fn run(config: &Config, log: &slog::Logger) -> Result<Summary, Error> {
    validate::ensure_readable_dir(&config.src_dir, false)?;
    validate::ensure_readable_dir(&config.password_dir, true)?;
    validate::ensure_writable_dir_created(&config.dest_dir)?;

    let pairs = crate::naming::resolve(config.mode, &config.src_dir, &config.password_dir, log)?;
    if pairs.is_empty() {
        warn!(log, "source directory yielded no keystore/password pairs");
    }

    let mut summary = Summary::default();
    for pair in pairs {
        let pair_log = log.new(o!("pk" => pair.pk.clone()));
        match convert_pair(&pair, config) {
            Ok(()) => {
                info!(pair_log, "converted keystore");
                summary.succeeded.push(pair.pk);
            }
            Err(e) => {
                warn!(pair_log, "failed to convert keystore"; "error" => %e);
                summary.failed.push((pair.pk, e));
            }
        }
    }
    Ok(summary)
}

/// Converts a single `(keystore, password)` pair end to end, per spec.md
/// §4.7's eight steps. Secrets are scoped to this function and zeroized on
/// every path via `eth2_keystore`'s `Zeroizing` buffers, which drop at the
/// end of this call regardless of success or failure.
fn convert_pair(pair: &Pair, config: &Config) -> Result<(), Error> {
    let keystore_bytes = fs::read(&pair.keystore_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingKeystoreFile(pair.keystore_path.clone())
        } else {
            Error::ReadFailed {
                path: pair.keystore_path.clone(),
                source: e,
            }
        }
    })?;
    let password_bytes = fs::read(&pair.password_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingPasswordFile(pair.password_path.clone())
        } else {
            Error::ReadFailed {
                path: pair.password_path.clone(),
                source: e,
            }
        }
    })?;

    let keystore_str = String::from_utf8(keystore_bytes).map_err(|_| {
        Error::Keystore(eth2_keystore::Error::MalformedJson(
            "keystore file is not valid UTF-8".to_string(),
        ))
    })?;
    let keystore = Keystore::from_json_str(&keystore_str)?;
    let password = eth2_keystore::preprocess(&password_bytes)?;

    let secret = keystore.decrypt(&password)?;

    let salt = random_salt();
    let iv = random_iv();
    let kdf = build_kdf(config, salt)?;
    let new_keystore = Keystore::encrypt(
        &secret,
        &password,
        kdf,
        iv,
        Uuid::new_v4(),
        keystore.pubkey.clone(),
        keystore.path.clone(),
        keystore.description.clone(),
    )?;

    let serialized = new_keystore.to_json_string();
    write_atomically(&output_path(pair, config), serialized.as_bytes())?;
    Ok(())
}

fn build_kdf(config: &Config, salt: [u8; 32]) -> Result<Kdf, eth2_keystore::Error> {
    match config.kdf_function {
        KdfFunction::Pbkdf2 => Kdf::new_pbkdf2(config.pbkdf2_count, salt.to_vec()),
        KdfFunction::Scrypt => {
            Kdf::new_scrypt(config.scrypt_n, config.scrypt_r, config.scrypt_p, salt.to_vec())
        }
    }
}

fn random_salt() -> [u8; 32] {
    use rand::RngCore;
    let mut salt = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

fn output_path(pair: &Pair, config: &Config) -> PathBuf {
    match config.mode {
        NamingMode::Web3Signer => config.dest_dir.join(format!("{}.json", pair.pk)),
        NamingMode::Nimbus => config.dest_dir.join(&pair.pk).join("keystore.json"),
    }
}

/// Buffers the serialized keystore fully in memory (already done by
/// `to_json_string`) and writes it in one syscall, so a write failure never
/// leaves a partial file behind.
fn write_atomically(path: &PathBuf, contents: &[u8]) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::WriteFailed {
            path: path.clone(),
            source: e,
        })?;
    }
    fs::write(path, contents).map_err(|e| Error::WriteFailed {
        path: path.clone(),
        source: e,
    })
}
