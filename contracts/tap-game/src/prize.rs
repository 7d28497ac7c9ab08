//! Prize ledger: native-value intake, the per-round native prize, and the
//! protocol fee accumulator.

use soroban_sdk::{Address, Env};

use crate::events::{PrizeClaimed, PrizeDeferred, RoundEnded};
use crate::storage::{read_record, set_claimed, write_pools, write_record};
use crate::types::{GameConfig, Pools, PrizeKind, Round, RoundRecord};
use crate::{ledger, Error};

/// Protocol fee taken from every native-value intake (5%).
pub const PROTOCOL_FEE_BPS: u32 = 500;

/// Split an incoming payment into fee and net, crediting the net amount to
/// the live pool while the live round runs and to the pending pool once it
/// has expired. Returns the net amount.
pub(crate) fn intake(
    pools: &mut Pools,
    live: &Round,
    now: u64,
    gross: i128,
) -> Result<i128, Error> {
    let (fee, net) = shared::split_fee(gross, PROTOCOL_FEE_BPS)?;

    pools.fee_balance = pools.fee_balance.checked_add(fee).ok_or(Error::Overflow)?;
    if live.is_over(now) {
        pools.pending_prize_pool = pools
            .pending_prize_pool
            .checked_add(net)
            .ok_or(Error::Overflow)?;
    } else {
        pools.prize_pool = pools.prize_pool.checked_add(net).ok_or(Error::Overflow)?;
    }
    Ok(net)
}

/// Record the expired live round's native prize: the whole current pool goes
/// to the round record and the pool is zeroed. Returns the recorded amount,
/// or `None` when the round is still running or the prize was already
/// recorded.
///
/// Pools are written before returning so the caller may transfer right away.
pub(crate) fn lock_prize_if_due(
    env: &Env,
    live: &Round,
    pools: &mut Pools,
    now: u64,
) -> Result<Option<i128>, Error> {
    if !live.is_over(now) {
        return Ok(None);
    }
    let Some(winner) = live.leader.clone() else {
        return Ok(None);
    };

    let mut record = read_record(env, live.number).unwrap_or_else(RoundRecord::empty);
    if record.prize_finalized {
        return Ok(None);
    }

    let amount = pools.prize_pool;
    pools.prize_pool = 0;

    if record.winner.is_none() {
        record.winner = Some(winner.clone());
    }
    record.prize = amount;
    record.prize_finalized = true;

    write_record(env, live.number, &record);
    write_pools(env, pools);

    RoundEnded {
        round: live.number,
        winner,
        prize: amount,
        timestamp: now,
    }
    .publish(env);

    Ok(Some(amount))
}

/// Pay a freshly recorded prize to the round leader as part of a tap.
///
/// Never fails the tap: if the transfer is rejected the claim marker stays
/// unset, the amount joins the pending pool, and the winner can still
/// collect it later with `claim_prize`.
pub(crate) fn auto_payout(
    env: &Env,
    config: &GameConfig,
    live: &Round,
    amount: i128,
    pools: &mut Pools,
) {
    if amount <= 0 {
        return;
    }
    let Some(winner) = live.leader.clone() else {
        return;
    };

    set_claimed(env, live.number, &winner, PrizeKind::Native, true);

    if ledger::pay(env, &config.native_token, &winner, amount) {
        PrizeClaimed {
            round: live.number,
            winner,
            amount,
        }
        .publish(env);
        return;
    }

    set_claimed(env, live.number, &winner, PrizeKind::Native, false);
    pools.pending_prize_pool = pools.pending_prize_pool.saturating_add(amount);
    write_pools(env, pools);

    PrizeDeferred {
        round: live.number,
        winner,
        amount,
    }
    .publish(env);
}

/// Resolve who won `round` and how much, treating an expired live round
/// whose prize is not yet recorded exactly like a finalized one.
///
/// Records the prize on the way through when the round is in limbo.
pub(crate) fn resolve_claim(
    env: &Env,
    round: u64,
    live: &Round,
    pools: &mut Pools,
    now: u64,
) -> Result<(Address, i128), Error> {
    if round == live.number {
        lock_prize_if_due(env, live, pools, now)?;
    }

    let record = read_record(env, round)
        .filter(|r| r.prize_finalized)
        .ok_or(Error::RoundNotFinalized)?;
    let winner = record.winner.ok_or(Error::RoundNotFinalized)?;
    Ok((winner, record.prize))
}
