use std::fmt;
use std::path::PathBuf;

/// Errors raised by the conversion pipeline, the naming-mode resolver and
/// the path validator. Wraps `eth2_keystore::Error` for failures that
/// originate in the core codec/crypto layer.
#[derive(Debug)]
pub enum Error {
    InvalidSourceDirectory(PathBuf),
    InvalidPasswordDirectory(PathBuf),
    InvalidDestinationDirectory { path: PathBuf, reason: String },
    MissingPasswordFile(PathBuf),
    MissingKeystoreFile(PathBuf),
    ReadFailed { path: PathBuf, source: std::io::Error },
    WriteFailed { path: PathBuf, source: std::io::Error },
    Keystore(eth2_keystore::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSourceDirectory(p) => {
                write!(f, "source directory is not readable: {}", p.display())
            }
            Error::InvalidPasswordDirectory(p) => {
                write!(f, "password directory is not readable: {}", p.display())
            }
            Error::InvalidDestinationDirectory { path, reason } => write!(
                f,
                "destination directory {} is not writable: {}",
                path.display(),
                reason
            ),
            Error::MissingPasswordFile(p) => {
                write!(f, "missing password file: {}", p.display())
            }
            Error::MissingKeystoreFile(p) => {
                write!(f, "missing keystore file: {}", p.display())
            }
            Error::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Error::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Error::Keystore(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<eth2_keystore::Error> for Error {
    fn from(e: eth2_keystore::Error) -> Self {
        Error::Keystore(e)
    }
}
