//! SOL/lamport conversion.
//!
//! The scale factor lives here and nowhere else, so unit-confusion bugs
//! cannot be duplicated across call sites.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::wallet::types::{WalletError, WalletResult};

/// Lamports per SOL. The on-chain atomic unit is 10^-9 SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert a human SOL amount to lamports, rounding to the nearest lamport.
///
/// Fails with `InvalidAmount` when the amount is not strictly positive,
/// rounds to zero lamports, or does not fit in `u64`.
pub fn to_lamports(sol: Decimal) -> WalletResult<u64> {
    if sol <= Decimal::ZERO {
        return Err(WalletError::InvalidAmount(
            "amount must be greater than 0".to_string(),
        ));
    }

    let scaled = sol
        .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .ok_or_else(|| WalletError::InvalidAmount("amount too large".to_string()))?;

    let lamports = scaled
        .round()
        .to_u64()
        .ok_or_else(|| WalletError::InvalidAmount("amount too large".to_string()))?;

    if lamports == 0 {
        return Err(WalletError::InvalidAmount(
            "amount rounds to zero lamports".to_string(),
        ));
    }

    Ok(lamports)
}

/// Convert lamports to SOL. Exact; lamports come from trusted responses.
pub fn to_sol(lamports: u64) -> Decimal {
    (Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL)).normalize()
}
