//! Field validators.
//!
//! Pure functions, run by the client as the user types and again by the
//! server before anything touches the store.

use crate::error::{ErrorKind, Field, FieldError};
use std::ops::RangeInclusive;

/// Accepted wallet address length, in characters.
pub const WALLET_ADDRESS_LENGTH: RangeInclusive<usize> = 32..=44;

/// Accepted handle length, in characters.
pub const HANDLE_LENGTH: RangeInclusive<usize> = 4..=15;

/// Whether `c` belongs to the base-58 alphabet (no `0`, `I`, `O` or `l`).
fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

fn is_handle_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Validate a base-58 wallet address.
///
/// The alphabet is checked before the length, so `"0"` is a format error
/// rather than a length error.
pub fn validate_wallet_address(address: &str) -> Result<(), ErrorKind> {
    if address.is_empty() {
        return Err(ErrorKind::Required);
    }

    if !address.chars().all(is_base58_char) {
        return Err(ErrorKind::InvalidFormat);
    }

    // Every character is ASCII at this point
    if !WALLET_ADDRESS_LENGTH.contains(&address.len()) {
        return Err(ErrorKind::InvalidLength);
    }

    Ok(())
}

/// Validate a social handle: `[A-Za-z0-9_]{4,15}`.
pub fn validate_handle(handle: &str) -> Result<(), ErrorKind> {
    if handle.is_empty() {
        return Err(ErrorKind::Required);
    }

    if !HANDLE_LENGTH.contains(&handle.chars().count()) || !handle.chars().all(is_handle_char) {
        return Err(ErrorKind::InvalidFormat);
    }

    Ok(())
}

/// Validate both fields, reporting the first failure.
pub fn validate_submission(wallet_address: &str, handle: &str) -> Result<(), FieldError> {
    validate_wallet_address(wallet_address)
        .map_err(|kind| FieldError::new(Field::WalletAddress, kind))?;
    validate_handle(handle).map_err(|kind| FieldError::new(Field::SocialHandle, kind))
}
