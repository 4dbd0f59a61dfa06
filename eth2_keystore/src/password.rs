//! Password preprocessing per EIP-2335's "Password requirements" section:
//! NFKD normalization followed by stripping the C0, Delete and C1 control
//! ranges. Leading/trailing whitespace is deliberately *not* stripped.

use crate::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Canonical, NFKD-normalized, control-code-stripped password bytes, ready
/// to be fed to a KDF.
///
/// Zeroized on drop. `Debug` is redacted so a password can never end up in a
/// log line or panic message by accident.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(Vec<u8>);

impl Password {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"<redacted>").finish()
    }
}

/// Runs the EIP-2335 password preprocessing algorithm over raw password-file
/// bytes.
///
/// `char::is_control` is used for the C0/Delete/C1 filter: Unicode's `Cc`
/// (control) general category is defined as exactly U+0000–U+001F,
/// U+007F–U+009F, which is precisely the set EIP-2335 names.
pub fn preprocess(raw: &[u8]) -> Result<Password, Error> {
    let s = std::str::from_utf8(raw).map_err(|_| Error::BadPasswordEncoding)?;
    let filtered: String = s.nfkd().filter(|c| !c.is_control()).collect();
    Ok(Password(filtered.into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraktur_test_password_with_key_emoji() {
        // "𝔱𝔢𝔰𝔱𝔭𝔞𝔰𝔰𝔴𝔬𝔯𝔡🔑" — Fraktur "testpassword" followed by U+1F511.
        let input = "\u{1d531}\u{1d522}\u{1d530}\u{1d531}\u{1d52d}\u{1d51e}\u{1d530}\u{1d530}\u{1d534}\u{1d52c}\u{1d52f}\u{1d521}\u{1f511}";
        let out = preprocess(input.as_bytes()).unwrap();
        let expected: &[u8] = &[
            0x74, 0x65, 0x73, 0x74, 0x70, 0x61, 0x73, 0x73, 0x77, 0x6f, 0x72, 0x64, 0xf0, 0x9f,
            0x94, 0x91,
        ];
        assert_eq!(out.as_bytes(), expected);
    }

    #[test]
    fn idempotent() {
        let input = "p\u{0041}\u{030A}ssw\u{0000}ord\u{007f}\u{0085}!";
        let once = preprocess(input.as_bytes()).unwrap();
        let twice = preprocess(once.as_bytes()).unwrap();
        assert_eq!(once.as_bytes(), twice.as_bytes());
    }

    #[test]
    fn empty_result_is_permitted() {
        let input = "\u{0000}\u{001f}\u{007f}\u{0080}\u{009f}";
        let out = preprocess(input.as_bytes()).unwrap();
        assert_eq!(out.as_bytes(), &[] as &[u8]);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let raw: &[u8] = &[0xff, 0xfe, 0x00];
        assert!(matches!(preprocess(raw), Err(Error::BadPasswordEncoding)));
    }

    #[test]
    fn does_not_strip_leading_trailing_whitespace() {
        let input = "  password  ";
        let out = preprocess(input.as_bytes()).unwrap();
        assert_eq!(out.as_bytes(), input.as_bytes());
    }
}
