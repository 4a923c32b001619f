//! # Keyfob Core
//!
//! Core component of **Keyfob** that is shared between all other components and serves as
//! building block. It carries the protected [`Key`], the [`Algorithm`] selection and the decoders
//! that turn textual secrets into raw key bytes.

#![deny(rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use std::{fmt, str::FromStr};

pub use key::Key;
pub use secrecy::ExposeSecret;

pub mod encoding;
mod key;

/// Errors that can occur when preparing the inputs for OTP generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The secret was empty, either as given or after decoding.
    #[error("the secret must not be empty")]
    EmptySecret,
    /// The textual secret contained invalid characters or padding.
    #[error("the secret is not valid encoded data")]
    MalformedEncoding(#[source] data_encoding::DecodeError),
    /// The algorithm name didn't describe any of the supported algorithms.
    #[error("unknown hash algorithm `{0}`")]
    UnsupportedAlgorithm(String),
}

/// Algorithm used in the OTP generation to create the final code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// SHA-1 algorithm, most common.
    Sha1,
    /// SHA(2)-256 algorithm.
    Sha256,
    /// SHA(2)-512 algorithm.
    Sha512,
}

impl Algorithm {
    /// Canonical name of the algorithm.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }

    /// Length of the keyed-hash output in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    /// Parse an algorithm name, accepting both the bare hash names and the `Hmac`-prefixed
    /// spelling that Java-based hosts send, in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = match name.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("hmac") => &name[4..],
            _ => name,
        };

        if name.eq_ignore_ascii_case("sha1") {
            Ok(Self::Sha1)
        } else if name.eq_ignore_ascii_case("sha256") {
            Ok(Self::Sha256)
        } else if name.eq_ignore_ascii_case("sha512") {
            Ok(Self::Sha512)
        } else {
            Err(Error::UnsupportedAlgorithm(s.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, Error};

    #[test]
    fn parse_bare_names() {
        assert_eq!(Algorithm::Sha1, "SHA1".parse().unwrap());
        assert_eq!(Algorithm::Sha256, "sha256".parse().unwrap());
        assert_eq!(Algorithm::Sha512, "Sha512".parse().unwrap());
    }

    #[test]
    fn parse_hmac_prefixed_names() {
        assert_eq!(Algorithm::Sha1, "HmacSHA1".parse().unwrap());
        assert_eq!(Algorithm::Sha256, "HmacSHA256".parse().unwrap());
        assert_eq!(Algorithm::Sha512, "hmacsha512".parse().unwrap());
    }

    #[test]
    fn parse_unknown_name() {
        assert!(matches!(
            "md5".parse::<Algorithm>().unwrap_err(),
            Error::UnsupportedAlgorithm(name) if name == "md5"
        ));
    }

    #[test]
    fn output_lengths() {
        assert_eq!(20, Algorithm::Sha1.output_len());
        assert_eq!(32, Algorithm::Sha256.output_len());
        assert_eq!(64, Algorithm::Sha512.output_len());
    }
}
