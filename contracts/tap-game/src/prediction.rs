//! Prediction market: per-round choices, correct-predictor counts, and the
//! bonus-pool split.

use soroban_sdk::{Address, Env};

use crate::events::BonusRolledOver;
use crate::storage::{
    read_choice_count, read_record, write_choice_count, write_pools, write_prediction,
    write_record,
};
use crate::types::{Pools, Round, RoundRecord};
use crate::Error;

/// Round a new prediction applies to: the live round while it runs, the
/// next one as soon as the live round has expired.
pub(crate) fn target_round(live: &Round, now: u64) -> Result<u64, Error> {
    if live.is_over(now) {
        live.number.checked_add(1).ok_or(Error::Overflow)
    } else {
        Ok(live.number)
    }
}

pub(crate) fn record_choice(
    env: &Env,
    round: u64,
    chooser: &Address,
    candidate: &Address,
) -> Result<(), Error> {
    write_prediction(env, round, chooser, candidate);
    let count = read_choice_count(env, round, candidate)
        .checked_add(1)
        .ok_or(Error::Overflow)?;
    write_choice_count(env, round, candidate, count);
    Ok(())
}

/// Lock the bonus side of `round` if it is the live round, it has expired,
/// and nobody has locked it yet. Earlier rounds were locked by the tap that
/// retired them, so this is a no-op for anything but the live round.
///
/// With no correct predictor the whole bonus moves to the pending pool.
pub(crate) fn finalize_bonus_if_due(
    env: &Env,
    round: u64,
    live: &Round,
    pools: &mut Pools,
    now: u64,
) -> Result<(), Error> {
    if round != live.number || !live.is_over(now) {
        return Ok(());
    }
    let Some(winner) = live.leader.clone() else {
        return Ok(());
    };

    let mut record = read_record(env, round).unwrap_or_else(RoundRecord::empty);
    if record.bonus_finalized {
        return Ok(());
    }

    let bonus = pools.bonus_pool;
    pools.bonus_pool = 0;
    let correct = read_choice_count(env, round, &winner);

    if record.winner.is_none() {
        record.winner = Some(winner);
    }
    record.bonus_pool = bonus;
    record.correct_count = correct;
    record.bonus_finalized = true;

    if correct == 0 && bonus > 0 {
        pools.pending_bonus_pool = pools
            .pending_bonus_pool
            .checked_add(bonus)
            .ok_or(Error::Overflow)?;
        BonusRolledOver { round, amount: bonus }.publish(env);
    }

    write_record(env, round, &record);
    write_pools(env, pools);
    Ok(())
}

/// Bonus owed to each correct predictor. Division dust stays in the contract.
pub fn share_per_winner(bonus_pool: i128, correct_count: u32) -> i128 {
    if correct_count == 0 {
        return 0;
    }
    bonus_pool / correct_count as i128
}

/// Whether `prediction` named the recorded winner of the round.
pub(crate) fn is_correct(prediction: Option<&Address>, winner: Option<&Address>) -> bool {
    matches!((prediction, winner), (Some(p), Some(w)) if p == w)
}
