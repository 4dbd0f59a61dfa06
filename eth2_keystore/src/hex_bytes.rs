//! Lower-case, no-`0x`-prefix hex encoding, as used throughout the keystore
//! JSON envelope (salts, IVs, ciphertexts, checksums, public keys).

use crate::Error;

/// Encodes `bytes` as lower-case hex with no `0x` prefix.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes a hex string, accepting either case, into raw bytes.
///
/// `field` is used only to name the offending field in the returned error.
pub fn decode(s: &str, field: &'static str) -> Result<Vec<u8>, Error> {
    hex::decode(s).map_err(|_| Error::InvalidHex(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let bytes = [0u8, 1, 2, 0xff, 0xab, 0x10];
        let s = encode(&bytes);
        assert_eq!(s, "000102ffab10");
        assert_eq!(decode(&s, "test").unwrap(), bytes.to_vec());
    }

    #[test]
    fn decode_is_case_insensitive_but_encode_is_lower() {
        let upper = "AABBCC";
        let decoded = decode(upper, "test").unwrap();
        assert_eq!(encode(&decoded), "aabbcc");
    }

    #[test]
    fn odd_length_is_invalid_hex() {
        assert_eq!(decode("abc", "salt"), Err(Error::InvalidHex("salt")));
    }

    #[test]
    fn non_hex_digit_is_invalid_hex() {
        assert_eq!(decode("zz", "salt"), Err(Error::InvalidHex("salt")));
    }
}
