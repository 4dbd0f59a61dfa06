//! EIP-2335 ("BLS12-381 Keystore") encryption and decryption.
//!
//! This crate is the hard, study-worthy core of the batch keystore
//! converter: password preprocessing, KDF dispatch, checksum verification,
//! AES-128-CTR encryption, and the keystore JSON codec. It does no file
//! I/O, takes no CLI arguments, and does no logging — those are
//! `account_manager`'s and `keystore_convert`'s job.

mod checksum;
mod cipher;
mod crypto;
mod error;
mod hex_bytes;
mod kdf;
mod keystore;
mod password;

pub use crate::cipher::{random_iv, IV_LEN};
pub use crate::crypto::Crypto;
pub use crate::error::Error;
pub use crate::kdf::{Kdf, Pbkdf2Params, ScryptParams};
pub use crate::keystore::{Keystore, Version};
pub use crate::password::{preprocess, Password};
pub use hex_bytes::{decode as hex_decode, encode as hex_encode};
