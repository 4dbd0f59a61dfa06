//! AES-128-CTR, keyed by `DK[0:16]` with the counter initialized from
//! `cipher.params.iv`. CTR is its own inverse, so the same function
//! encrypts and decrypts.

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;

pub const AES_128_CTR: &str = "aes-128-ctr";
pub const IV_LEN: usize = 16;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// Applies AES-128-CTR to `data`, returning a new buffer. `key` must be 16
/// bytes and `iv` must be 16 bytes; callers have already validated this
/// against the keystore invariants before reaching here.
pub fn apply(key: &[u8], iv: &[u8], data: &[u8]) -> Vec<u8> {
    let mut buf = data.to_vec();
    let mut cipher = Aes128Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(&mut buf);
    buf
}

/// Draws a fresh, cryptographically random 16-byte IV.
pub fn random_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);
    iv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctr_is_its_own_inverse() {
        let key = [1u8; 16];
        let iv = [2u8; 16];
        let plaintext = b"the quick brown fox 123456789012";
        let ciphertext = apply(&key, &iv, plaintext);
        assert_ne!(ciphertext, plaintext);
        let recovered = apply(&key, &iv, &ciphertext);
        assert_eq!(recovered, plaintext);
    }
}
