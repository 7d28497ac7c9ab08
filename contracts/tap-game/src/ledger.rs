//! Calls out to the SEP-41 ledgers the game settles through.
//!
//! Debits propagate failures to the caller. Payouts report success as a
//! `bool` so each call site can pick its own failure policy: defer (automatic
//! prize payout) or fail the whole call (manual claims, fee withdrawal).

use soroban_sdk::{contractclient, token::TokenClient, Address, Env};

use crate::types::DataKey;
use crate::Error;

/// Minimum interval between successful maintenance triggers.
pub const MAINTENANCE_COOLDOWN_SECS: u64 = 3_600;

/// Background maintenance exposed by the asset ledger (fee swap and
/// distribution). Consumed best-effort only.
#[contractclient(name = "MaintenanceClient")]
pub trait MaintenanceHook {
    /// Balance the ledger must hold before maintenance is worth running.
    fn swap_threshold(env: Env) -> i128;
    fn trigger_maintenance(env: Env);
}

/// Pull `amount` of `token` from `from` into the contract through the
/// allowance `from` granted the contract.
pub(crate) fn collect(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }

    let client = TokenClient::new(env, token);
    let this = env.current_contract_address();

    if client.balance(from) < amount {
        return Err(Error::InsufficientFunds);
    }
    if client.allowance(from, &this) < amount {
        return Err(Error::InsufficientAuthorization);
    }

    match client.try_transfer_from(&this, from, &this, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Pull `amount` of `token` from `from`, authorized by `from` directly.
pub(crate) fn receive(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), Error> {
    let client = TokenClient::new(env, token);
    match client.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Destroy `amount` of the contract's own `token` balance.
pub(crate) fn burn(env: &Env, token: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }
    let client = TokenClient::new(env, token);
    match client.try_burn(&env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Send `amount` of `token` from the contract to `to`. Returns whether the
/// transfer went through; a failed transfer leaves no ledger-side effects.
pub(crate) fn pay(env: &Env, token: &Address, to: &Address, amount: i128) -> bool {
    let client = TokenClient::new(env, token);
    matches!(
        client.try_transfer(&env.current_contract_address(), to, &amount),
        Ok(Ok(()))
    )
}

/// Ask the asset ledger to run its background maintenance if the cool-down
/// has elapsed and its held balance reached the swap threshold.
///
/// Every failure is swallowed: a broken or missing hook never blocks a tap.
pub(crate) fn poke_maintenance(env: &Env, ledger: &Address, now: u64) {
    let last: Option<u64> = env.storage().instance().get(&DataKey::LastMaintenance);
    if let Some(last) = last {
        if now < last.saturating_add(MAINTENANCE_COOLDOWN_SECS) {
            return;
        }
    }

    let hook = MaintenanceClient::new(env, ledger);
    let threshold = match hook.try_swap_threshold() {
        Ok(Ok(threshold)) => threshold,
        _ => return,
    };
    let held = match TokenClient::new(env, ledger).try_balance(ledger) {
        Ok(Ok(held)) => held,
        _ => return,
    };
    if held < threshold {
        return;
    }

    if let Ok(Ok(())) = hook.try_trigger_maintenance() {
        env.storage()
            .instance()
            .set(&DataKey::LastMaintenance, &now);
    }
}
