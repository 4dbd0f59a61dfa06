//! Enumerates a source directory for `(pk, keystore_path, password_path)`
//! triples, per one of the two on-disk naming conventions used across the
//! staking ecosystem. `pk` is carried through verbatim and is opaque here.

use crate::Error;
use slog::debug;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingMode {
    Web3Signer,
    Nimbus,
}

impl std::str::FromStr for NamingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WEB3SIGNER" => Ok(NamingMode::Web3Signer),
            "NIMBUS" => Ok(NamingMode::Nimbus),
            other => Err(format!("unknown naming mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pair {
    pub pk: String,
    pub keystore_path: PathBuf,
    pub password_path: PathBuf,
}

/// Yields one `Pair` per discovered keystore, in the order the underlying
/// directory iterator returns entries (not contractually stable, per
/// spec.md §5).
pub fn resolve(
    mode: NamingMode,
    src_dir: &Path,
    password_dir: &Path,
    log: &slog::Logger,
) -> Result<Vec<Pair>, Error> {
    match mode {
        NamingMode::Web3Signer => resolve_web3signer(src_dir, password_dir, log),
        NamingMode::Nimbus => resolve_nimbus(src_dir, password_dir, log),
    }
}

fn resolve_web3signer(
    src_dir: &Path,
    password_dir: &Path,
    log: &slog::Logger,
) -> Result<Vec<Pair>, Error> {
    let mut pairs = Vec::new();
    for entry in read_dir(src_dir)? {
        let entry = entry.map_err(|e| Error::ReadFailed {
            path: src_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            debug!(log, "skipping non-json entry"; "path" => %path.display());
            continue;
        }
        let pk = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let password_path = password_dir.join(format!("{}.txt", pk));
        pairs.push(Pair {
            pk,
            keystore_path: path,
            password_path,
        });
    }
    Ok(pairs)
}

fn resolve_nimbus(
    src_dir: &Path,
    password_dir: &Path,
    log: &slog::Logger,
) -> Result<Vec<Pair>, Error> {
    let mut pairs = Vec::new();
    for entry in read_dir(src_dir)? {
        let entry = entry.map_err(|e| Error::ReadFailed {
            path: src_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            debug!(log, "skipping non-directory entry"; "path" => %path.display());
            continue;
        }
        let pk = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let keystore_path = path.join("keystore.json");
        let password_path = password_dir.join(&pk);
        pairs.push(Pair {
            pk,
            keystore_path,
            password_path,
        });
    }
    Ok(pairs)
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, Error> {
    fs::read_dir(dir).map_err(|_| Error::InvalidSourceDirectory(dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, File};
    use tempfile::tempdir;

    fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    #[test]
    fn web3signer_pairs_json_with_txt() {
        let src = tempdir().unwrap();
        let passwords = tempdir().unwrap();
        File::create(src.path().join("0xabc.json")).unwrap();
        File::create(src.path().join("notes.txt")).unwrap();
        let pairs = resolve_web3signer(src.path(), passwords.path(), &test_logger()).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].pk, "0xabc");
        assert_eq!(
            pairs[0].password_path,
            passwords.path().join("0xabc.txt")
        );
    }

    #[test]
    fn nimbus_pairs_subdirectory_with_bare_password_file() {
        let src = tempdir().unwrap();
        let passwords = tempdir().unwrap();
        create_dir_all(src.path().join("0xdef")).unwrap();
        File::create(src.path().join("0xdef").join("keystore.json")).unwrap();
        File::create(src.path().join("not_a_dir.json")).unwrap();
        let pairs = resolve_nimbus(src.path(), passwords.path(), &test_logger()).unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].pk, "0xdef");
        assert_eq!(
            pairs[0].keystore_path,
            src.path().join("0xdef").join("keystore.json")
        );
        assert_eq!(pairs[0].password_path, passwords.path().join("0xdef"));
    }

    #[test]
    fn naming_mode_parses_case_insensitively() {
        assert_eq!(
            "web3signer".parse::<NamingMode>().unwrap(),
            NamingMode::Web3Signer
        );
        assert_eq!("NIMBUS".parse::<NamingMode>().unwrap(), NamingMode::Nimbus);
        assert!("bogus".parse::<NamingMode>().is_err());
    }
}
