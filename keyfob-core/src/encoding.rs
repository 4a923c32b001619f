//! Decoders for the textual secret formats that host applications hand over.

use data_encoding::{BASE32, BASE32_NOPAD, HEXLOWER_PERMISSIVE};

use crate::{Error, Key};

/// Decode a secret given as RFC 4648 Base32 text into a [`Key`].
///
/// The input is normalized first: ASCII whitespace is stripped and letters are upper-cased, as
/// secrets are commonly displayed in lowercase and grouped with spaces. Trailing `=` padding is
/// accepted but not required.
pub fn decode_base32(text: &str) -> Result<Key, Error> {
    let normalized = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect::<String>();

    if normalized.is_empty() {
        return Err(Error::EmptySecret);
    }

    let decoded = if normalized.contains('=') {
        BASE32.decode(normalized.as_bytes())
    } else {
        BASE32_NOPAD.decode(normalized.as_bytes())
    }
    .map_err(Error::MalformedEncoding)?;

    if decoded.is_empty() {
        return Err(Error::EmptySecret);
    }

    Ok(Key::new(decoded))
}

/// Decode a secret given as hexadecimal text into a [`Key`].
///
/// Both letter cases are accepted. An odd amount of digits is tolerated by assuming a leading
/// zero nibble, so values that lost a leading zero still decode to the right byte count.
pub fn decode_hex(text: &str) -> Result<Key, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptySecret);
    }

    let mut padded = String::with_capacity(trimmed.len() + 1);
    if trimmed.len() % 2 == 1 {
        padded.push('0');
    }
    padded.push_str(trimmed);

    HEXLOWER_PERMISSIVE
        .decode(padded.as_bytes())
        .map(Key::new)
        .map_err(Error::MalformedEncoding)
}

#[cfg(test)]
mod tests {
    use super::{decode_base32, decode_hex};
    use crate::{Error, Key};

    #[test]
    fn base32_plain() {
        assert_eq!(
            Key::new(b"12345678901234567890".to_vec()),
            decode_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap()
        );
    }

    #[test]
    fn base32_normalizes_spaces_and_case() {
        assert_eq!(
            Key::new(b"12345678901234567890".to_vec()),
            decode_base32("gezd gnbv gy3t qojq gezd gnbv gy3t qojq").unwrap()
        );
    }

    #[test]
    fn base32_various_lengths() {
        assert_eq!(Key::new(b"1234567890".to_vec()), decode_base32("GEZDGNBVGY3TQOJQ").unwrap());
        assert_eq!(Key::new(b"12345".to_vec()), decode_base32("GEZDGNBV").unwrap());
        assert_eq!(Key::new(b"1234".to_vec()), decode_base32("GEZDGNA=").unwrap());
    }

    #[test]
    fn base32_invalid_characters() {
        assert!(matches!(
            decode_base32("GEZD1NBV").unwrap_err(),
            Error::MalformedEncoding(_)
        ));
    }

    #[test]
    fn base32_misplaced_padding() {
        assert!(matches!(
            decode_base32("GE=DGNBV").unwrap_err(),
            Error::MalformedEncoding(_)
        ));
    }

    #[test]
    fn base32_empty_input() {
        assert!(matches!(decode_base32("").unwrap_err(), Error::EmptySecret));
        assert!(matches!(decode_base32("   ").unwrap_err(), Error::EmptySecret));
    }

    #[test]
    fn hex_reference_seed() {
        assert_eq!(
            Key::new(b"12345678901234567890".to_vec()),
            decode_hex("3132333435363738393031323334353637383930").unwrap()
        );
    }

    #[test]
    fn hex_mixed_case() {
        assert_eq!(Key::new(vec![0xab, 0xcd]), decode_hex("ABcd").unwrap());
    }

    #[test]
    fn hex_odd_length_assumes_leading_zero() {
        assert_eq!(Key::new(vec![0x0f, 0xff]), decode_hex("fff").unwrap());
        assert_eq!(Key::new(vec![0x01]), decode_hex("1").unwrap());
    }

    #[test]
    fn hex_invalid_characters() {
        assert!(matches!(
            decode_hex("12g4").unwrap_err(),
            Error::MalformedEncoding(_)
        ));
    }

    #[test]
    fn hex_empty_input() {
        assert!(matches!(decode_hex("").unwrap_err(), Error::EmptySecret));
    }
}
