//! Directory existence/permission checks consumed by the CLI before the
//! pipeline ever touches a keystore (spec.md §6).

use crate::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub fn ensure_readable_dir(dir: &Path, is_password_dir: bool) -> Result<(), Error> {
    let meta = fs::metadata(dir).map_err(|_| classify(dir, is_password_dir))?;
    if !meta.is_dir() {
        return Err(classify(dir, is_password_dir));
    }
    fs::read_dir(dir)
        .map(|_| ())
        .map_err(|_| classify(dir, is_password_dir))
}

fn classify(dir: &Path, is_password_dir: bool) -> Error {
    if is_password_dir {
        Error::InvalidPasswordDirectory(dir.to_path_buf())
    } else {
        Error::InvalidSourceDirectory(dir.to_path_buf())
    }
}

/// Creates `dir` (with parents) if missing, then proves write access by
/// creating and deleting a uniquely-named probe file.
pub fn ensure_writable_dir_created(dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(|e| Error::InvalidDestinationDirectory {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let probe = probe_path(dir);
    fs::write(&probe, b"").map_err(|e| Error::InvalidDestinationDirectory {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let _ = fs::remove_file(&probe);
    Ok(())
}

fn probe_path(dir: &Path) -> PathBuf {
    let unique = uuid::Uuid::new_v4();
    dir.join(format!(".write_probe_{}", unique))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_source_directory_is_invalid() {
        let missing = std::env::temp_dir().join("definitely-does-not-exist-12345");
        assert!(matches!(
            ensure_readable_dir(&missing, false),
            Err(Error::InvalidSourceDirectory(_))
        ));
    }

    #[test]
    fn missing_password_directory_is_invalid_password_directory() {
        let missing = std::env::temp_dir().join("definitely-does-not-exist-pw-12345");
        assert!(matches!(
            ensure_readable_dir(&missing, true),
            Err(Error::InvalidPasswordDirectory(_))
        ));
    }

    #[test]
    fn existing_directory_is_readable() {
        let dir = tempdir().unwrap();
        assert!(ensure_readable_dir(dir.path(), false).is_ok());
    }

    #[test]
    fn destination_is_created_with_parents_and_probed() {
        let base = tempdir().unwrap();
        let dest = base.path().join("a").join("b").join("c");
        ensure_writable_dir_created(&dest).unwrap();
        assert!(dest.is_dir());
        // probe file must not be left behind
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
    }
}
