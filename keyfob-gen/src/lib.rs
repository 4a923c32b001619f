//! # Keyfob Gen(erator)
//!
//! Generator and verifier component of **Keyfob**. It computes HMAC-based (RFC 4226) and
//! time-based (RFC 6238) one-time passwords from a [`Key`] provided by the [`keyfob_core`]
//! component, and checks supplied codes against the expected value.

#![deny(rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::cast_possible_truncation)]

use std::{
    fmt::{self, Display},
    time::{SystemTimeError, UNIX_EPOCH},
};

use hmac::{digest::InvalidLength, Hmac, Mac};
use keyfob_core::ExposeSecret;
pub use keyfob_core::{Algorithm, Key};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Most common amount of digits for OTPs.
pub const DEFAULT_DIGITS: u8 = 6;
/// Step duration of the time-based scheme as defined by the standard.
pub const DEFAULT_STEP_SECONDS: u64 = 30;

/// Modulus lookup for 0 to 8 digits. Codes with more digits are not supported as the truncated
/// value only carries 31 bits.
const DIGITS_POWER: [u32; 9] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
];

/// Errors that can occur when generating an OTP.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to get a timestamp from the system.
    #[error("failed to get time since unix epoch")]
    Time(#[from] SystemTimeError),
    /// The requested amount of digits lies outside the supported range.
    #[error("amount of digits must be between 1 and 8, got {0}")]
    UnsupportedDigitCount(u8),
    /// A step duration of zero can not describe any time step.
    #[error("step duration must be greater than zero")]
    ZeroStepDuration,
    /// The underlying mac primitive rejected its input.
    #[error("failed to initialize the keyed hash")]
    Internal(#[from] InvalidLength),
}

/// Errors that can occur when verifying a supplied OTP code.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// No code was supplied to compare against.
    #[error("no code was supplied to compare against")]
    EmptyCode,
    /// The supplied code differs from the expected one.
    #[error("the supplied code does not match the expected one")]
    Mismatch,
    /// The expected code could not be generated.
    #[error(transparent)]
    Generate(#[from] Error),
}

/// Amount of whole time steps that passed between the unix epoch and `epoch_millis`, with one
/// step lasting `step_seconds`.
pub fn steps(epoch_millis: u64, step_seconds: u64) -> Result<u64, Error> {
    if step_seconds == 0 {
        return Err(Error::ZeroStepDuration);
    }

    Ok(epoch_millis / 1000 / step_seconds)
}

/// Create a new counter based OTP from the given `key`, as defined in RFC 4226.
///
/// The counter is used as-is; keeping it in sync with the other party is the caller's concern.
pub fn hotp(key: &Key, counter: u64, digits: u8, algorithm: Algorithm) -> Result<OtpCode, Error> {
    if digits == 0 || usize::from(digits) >= DIGITS_POWER.len() {
        return Err(Error::UnsupportedDigitCount(digits));
    }

    let digest = mac(algorithm, key.expose_secret(), counter)?;

    Ok(OtpCode {
        value: truncate(&digest, digits),
        digits,
    })
}

/// Create a new time based OTP from the given `key`, as defined in RFC 6238.
///
/// The moving factor is the amount of whole `step_seconds` long steps that passed between the
/// unix epoch and `epoch_millis`. All timestamps within the same step produce the same code.
pub fn totp(
    key: &Key,
    epoch_millis: u64,
    step_seconds: u64,
    digits: u8,
    algorithm: Algorithm,
) -> Result<OtpCode, Error> {
    hotp(key, steps(epoch_millis, step_seconds)?, digits, algorithm)
}

/// Same as [`totp`], but for the current system time.
pub fn totp_now(
    key: &Key,
    step_seconds: u64,
    digits: u8,
    algorithm: Algorithm,
) -> Result<OtpCode, Error> {
    let now = UNIX_EPOCH.elapsed()?;
    totp(key, now.as_millis() as u64, step_seconds, digits, algorithm)
}

/// Check a supplied code against the expected one for the given point in time.
///
/// The comparison is an exact match over the full, zero-padded code string. Only the single step
/// that contains `epoch_millis` is accepted; callers that need tolerance for clock drift can call
/// this for a small set of adjacent steps instead.
pub fn verify(
    key: &Key,
    epoch_millis: u64,
    step_seconds: u64,
    digits: u8,
    algorithm: Algorithm,
    supplied: &str,
) -> Result<(), VerifyError> {
    if supplied.is_empty() {
        return Err(VerifyError::EmptyCode);
    }

    let expected = totp(key, epoch_millis, step_seconds, digits, algorithm)?;

    if expected.to_string() == supplied {
        Ok(())
    } else {
        Err(VerifyError::Mismatch)
    }
}

fn mac(algorithm: Algorithm, key: &[u8], counter: u64) -> Result<Vec<u8>, Error> {
    let message = counter.to_be_bytes();

    Ok(match algorithm {
        Algorithm::Sha1 => {
            let mut mac = Hmac::<Sha1>::new_from_slice(key)?;
            mac.update(&message);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key)?;
            mac.update(&message);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key)?;
            mac.update(&message);
            mac.finalize().into_bytes().to_vec()
        }
    })
}

/// Dynamic truncation as defined in RFC 4226. The low nibble of the last digest byte selects the
/// offset of a 31-bit big-endian value, which is then reduced to the wanted amount of digits.
///
/// Any digest of at least 20 bytes covers offset 15 plus 4 bytes, so all supported algorithms
/// satisfy the bounds.
fn truncate(digest: &[u8], digits: u8) -> u32 {
    let offset = usize::from(digest[digest.len() - 1] & 0xf);
    let binary = (u32::from(digest[offset]) & 0x7f) << 24
        | u32::from(digest[offset + 1]) << 16
        | u32::from(digest[offset + 2]) << 8
        | u32::from(digest[offset + 3]);

    binary % DIGITS_POWER[usize::from(digits)]
}

/// A generated OTP code that can be used to verify identity against a service.
///
/// The truncated value may have fewer decimal digits than requested and must be shifted with
/// zeroes in the final representation. Call `to_string()` on an instance to get the final code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OtpCode {
    /// Truncated code value, always below `10^digits`.
    pub value: u32,
    /// The desired width of the code in decimal digits.
    pub digits: u8,
}

impl Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:01$}", self.value, usize::from(self.digits))
    }
}
