//! Round controller: timer and cost schedule, expiry, and the transition
//! from one round to the next.

use soroban_sdk::{Address, Env};

use crate::events::RoundStarted;
use crate::types::{GameConfig, Pools, Round, RoundPhase, RoundRecord};
use crate::{prediction, prize, Error};

/// Per-tap duration decrement after the first tap of a round.
pub const DURATION_STEP_SECS: u64 = 5;
/// Duration never drops below this.
pub const MIN_DURATION_SECS: u64 = 10;

impl Round {
    /// A round waiting for its first tap.
    pub fn opening(number: u64, config: &GameConfig) -> Self {
        Round {
            number,
            start_time: 0,
            end_time: 0,
            cost: config.base_cost,
            duration: config.base_duration,
            tap_count: 0,
            leader: None,
        }
    }

    /// A round is over once it has a leader and its deadline has passed.
    /// A round nobody tapped never expires.
    pub fn is_over(&self, now: u64) -> bool {
        self.tap_count > 0 && now >= self.end_time
    }

    pub fn time_remaining(&self, now: u64) -> u64 {
        if self.tap_count == 0 {
            return 0;
        }
        self.end_time.saturating_sub(now)
    }

    /// Apply a paid tap: new leader, shorter timer, higher cost.
    pub(crate) fn record_tap(
        &mut self,
        player: &Address,
        now: u64,
        config: &GameConfig,
    ) -> Result<(), Error> {
        self.leader = Some(player.clone());
        self.tap_count = self.tap_count.checked_add(1).ok_or(Error::Overflow)?;

        if self.tap_count == 1 {
            self.start_time = now;
            self.duration = config.base_duration;
        } else {
            self.duration = next_duration(self.duration);
        }

        self.end_time = now.checked_add(self.duration).ok_or(Error::Overflow)?;
        self.cost = shared::grow_by_bps(self.cost, config.growth_bps)?;
        Ok(())
    }
}

pub fn next_duration(current: u64) -> u64 {
    current
        .saturating_sub(DURATION_STEP_SECS)
        .max(MIN_DURATION_SECS)
}

/// Where `round` stands relative to the live round at `now`.
pub fn phase(round: u64, live: &Round, record: Option<&RoundRecord>, now: u64) -> RoundPhase {
    if round > live.number {
        return RoundPhase::Upcoming;
    }
    if round < live.number {
        return RoundPhase::Finalized;
    }
    if !live.is_over(now) {
        return RoundPhase::Active;
    }
    match record {
        Some(r) if r.prize_finalized && r.bonus_finalized => RoundPhase::Finalized,
        _ => RoundPhase::Limbo,
    }
}

/// Record both prize sides of the expired live round. Each side is a no-op
/// if an earlier claim or prediction already recorded it.
pub(crate) fn retire(
    env: &Env,
    config: &GameConfig,
    live: &Round,
    pools: &mut Pools,
    now: u64,
) -> Result<(), Error> {
    if let Some(amount) = prize::lock_prize_if_due(env, live, pools, now)? {
        prize::auto_payout(env, config, live, amount, pools);
    }
    prediction::finalize_bonus_if_due(env, live.number, live, pools, now)?;
    Ok(())
}

/// Open the round after `retired`, moving pending funds into the live pools.
pub(crate) fn begin_next(
    env: &Env,
    config: &GameConfig,
    retired: &Round,
    pools: &mut Pools,
    now: u64,
) -> Result<Round, Error> {
    let number = retired.number.checked_add(1).ok_or(Error::Overflow)?;

    pools.prize_pool = pools
        .prize_pool
        .checked_add(pools.pending_prize_pool)
        .ok_or(Error::Overflow)?;
    pools.pending_prize_pool = 0;
    pools.bonus_pool = pools
        .bonus_pool
        .checked_add(pools.pending_bonus_pool)
        .ok_or(Error::Overflow)?;
    pools.pending_bonus_pool = 0;

    RoundStarted {
        round: number,
        prize_pool: pools.prize_pool,
        bonus_pool: pools.bonus_pool,
        timestamp: now,
    }
    .publish(env);

    Ok(Round::opening(number, config))
}
