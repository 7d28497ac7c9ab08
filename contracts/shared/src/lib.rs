//! Shared utilities and data structures for Stellarcade contracts.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::contracttype;

/// Arithmetic error codes returned by the basis-point helpers.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MathError {
    InvalidAmount = 1,
    InvalidBps = 2,
    Overflow = 3,
}

/// Constant for basis points divisor.
pub const BASIS_POINTS_DIVISOR: u32 = 10_000;

/// `amount * bps / 10_000`, truncated toward zero.
///
/// `bps` is not capped here so the same helper serves growth rates above
/// 100%; use [`calculate_fee`] when the rate is a fee.
pub fn bps_of(amount: i128, bps: u32) -> Result<i128, MathError> {
    if amount < 0 {
        return Err(MathError::InvalidAmount);
    }
    amount
        .checked_mul(bps as i128)
        .and_then(|v| v.checked_div(BASIS_POINTS_DIVISOR as i128))
        .ok_or(MathError::Overflow)
}

/// Helper to calculate fee based on amount and basis points.
pub fn calculate_fee(amount: i128, fee_bps: u32) -> Result<i128, MathError> {
    if fee_bps > BASIS_POINTS_DIVISOR {
        return Err(MathError::InvalidBps);
    }
    bps_of(amount, fee_bps)
}

/// Splits a gross amount into `(fee, net)`. The truncated remainder stays
/// with the net amount.
pub fn split_fee(amount: i128, fee_bps: u32) -> Result<(i128, i128), MathError> {
    let fee = calculate_fee(amount, fee_bps)?;
    let net = amount.checked_sub(fee).ok_or(MathError::Overflow)?;
    Ok((fee, net))
}

/// Compounds `amount` by `rate_bps` once: `amount + amount * rate / 10_000`.
pub fn grow_by_bps(amount: i128, rate_bps: u32) -> Result<i128, MathError> {
    let growth = bps_of(amount, rate_bps)?;
    amount.checked_add(growth).ok_or(MathError::Overflow)
}

/// Splits `amount` into two halves; the odd unit goes to the second half.
pub fn split_half(amount: i128) -> Result<(i128, i128), MathError> {
    if amount < 0 {
        return Err(MathError::InvalidAmount);
    }
    let first = amount / 2;
    Ok((first, amount - first))
}
