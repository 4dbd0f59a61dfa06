//! `H = SHA-256(DK[16:32] ‖ cipher.message)`, compared constant-time against
//! the stored `checksum.message`. A mismatch means the password is wrong —
//! not that the keystore is corrupt — per EIP-2335, the checksum's sole
//! purpose is password validation.

use crate::Error;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub const SHA256: &str = "sha256";

pub fn compute(checksum_key: &[u8], cipher_message: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(checksum_key);
    hasher.update(cipher_message);
    hasher.finalize().into()
}

/// Validates that `stored` decodes to exactly 32 bytes, then compares it
/// constant-time against the freshly computed checksum.
pub fn verify(checksum_key: &[u8], cipher_message: &[u8], stored: &[u8]) -> Result<(), Error> {
    if stored.len() != 32 {
        return Err(Error::InvalidChecksumLength { len: stored.len() });
    }
    let computed = compute(checksum_key, cipher_message);
    if computed.ct_eq(stored).into() {
        Ok(())
    } else {
        Err(Error::BadPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_is_bad_password_not_corruption() {
        let key = [0u8; 16];
        let message = b"ciphertext";
        let wrong = [0xffu8; 32];
        assert_eq!(
            verify(&key, message, &wrong),
            Err(Error::BadPassword)
        );
    }

    #[test]
    fn wrong_length_is_invalid_checksum_length() {
        let key = [0u8; 16];
        let message = b"ciphertext";
        let short = [0u8; 16];
        assert_eq!(
            verify(&key, message, &short),
            Err(Error::InvalidChecksumLength { len: 16 })
        );
    }

    #[test]
    fn matching_checksum_verifies() {
        let key = [7u8; 16];
        let message = b"ciphertext";
        let good = compute(&key, message);
        assert!(verify(&key, message, &good).is_ok());
    }
}
