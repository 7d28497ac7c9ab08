//! Stellarcade Tap Game Contract
//!
//! A continuous last-tap-wins game. Each tap pays an escalating cost in the
//! asset token to become the round leader and resets a shrinking countdown.
//! When the countdown expires the leader wins the native-value prize pool.
//! Alongside, anyone may pay a fixed fee to predict the eventual leader and
//! share the round's bonus pool with the other correct predictors.
//!
//! ## Round Lifecycle
//! `Active` → `Limbo` → `Finalized`, derived on every read from the clock,
//! the live round, and the round record (see [`round::phase`]). Only `tap`
//! opens a new round. Between expiry and the next tap the round sits in
//! limbo; claims and predictions treat a limbo round exactly like a
//! finalized one and record whichever prize side they need on the way.
//!
//! ## Tap Cost
//! Each tap costs `cost`; afterwards `cost += cost * growth_bps / 10000`.
//! Half of every tap is burned, the other half funds the bonus pool.
//!
//! ## Failure Policy
//! - The automatic prize payout made by `tap` never fails the tap: a rejected
//!   transfer moves the prize to the pending pool and leaves it claimable.
//! - Manual claims and fee withdrawal fail as a whole when the transfer fails,
//!   rolling back every marker and pool write of the call.
//! - The asset ledger's maintenance hook is best-effort; its errors are dropped.
//!
//! ## Storage Strategy
//! - `instance()`: Admin, Config, LastMaintenance, reentrancy flag.
//! - `persistent()`: live Round, Pools, and per-round / per-participant
//!   entries, TTL bumped on every write.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, Vec};

mod events;
mod guard;
mod ledger;
mod prediction;
mod prize;
mod round;
mod storage;
mod types;

pub use events::*;
pub use ledger::{MaintenanceClient, MaintenanceHook, MAINTENANCE_COOLDOWN_SECS};
pub use prediction::share_per_winner;
pub use prize::PROTOCOL_FEE_BPS;
pub use round::{DURATION_STEP_SECS, MIN_DURATION_SECS};
pub use storage::PERSISTENT_BUMP_LEDGERS;
pub use types::*;

use guard::ReentrancyGuard;
use storage::{
    is_claimed, is_initialized, read_admin, read_choice_count, read_config, read_player_taps,
    read_pools, read_prediction, read_record, read_round, set_claimed, write_player_taps,
    write_pools, write_round,
};

// ---------------------------------------------------------------------------
// Error Types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized        = 1,
    NotInitialized            = 2,
    NotAuthorized             = 3,
    InvalidConfig             = 4,
    InvalidAmount             = 5,
    InsufficientFunds         = 6,
    InsufficientAuthorization = 7,
    InvalidCandidate          = 8,
    AlreadyPredicted          = 9,
    NotWinner                 = 10,
    NothingToClaim            = 11,
    AlreadyClaimed            = 12,
    RoundNotFinalized         = 13,
    RoundNotFound             = 14,
    NoWinningsToClaimInBatch  = 15,
    TransferFailed            = 16,
    Reentrant                 = 17,
    Overflow                  = 18,
}

impl From<shared::MathError> for Error {
    fn from(err: shared::MathError) -> Self {
        match err {
            shared::MathError::InvalidAmount => Error::InvalidAmount,
            shared::MathError::InvalidBps => Error::InvalidConfig,
            shared::MathError::Overflow => Error::Overflow,
        }
    }
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct TapGame;

#[contractimpl]
impl TapGame {
    // -----------------------------------------------------------------------
    // init
    // -----------------------------------------------------------------------

    /// Initialize the game and open round 1. May only be called once.
    ///
    /// `native_token` holds the prize pool; `asset_token` is the ledger taps
    /// and prediction fees are paid in. Every numeric parameter must be
    /// non-zero and `base_duration` at least [`MIN_DURATION_SECS`].
    pub fn init(
        env: Env,
        admin: Address,
        native_token: Address,
        asset_token: Address,
        base_duration: u64,
        base_cost: i128,
        growth_bps: u32,
        prediction_fee: i128,
    ) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if base_duration < MIN_DURATION_SECS
            || base_cost <= 0
            || growth_bps == 0
            || prediction_fee <= 0
        {
            return Err(Error::InvalidConfig);
        }

        let config = GameConfig {
            native_token: native_token.clone(),
            asset_token: asset_token.clone(),
            base_duration,
            base_cost,
            growth_bps,
            prediction_fee,
        };

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Config, &config);

        write_round(&env, &Round::opening(1, &config));
        write_pools(&env, &Pools::default());

        Initialized {
            admin,
            native_token,
            asset_token,
        }
        .publish(&env);
        RoundStarted {
            round: 1,
            prize_pool: 0,
            bonus_pool: 0,
            timestamp: env.ledger().timestamp(),
        }
        .publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // tap
    // -----------------------------------------------------------------------

    /// Pay the current cost to become the round leader.
    ///
    /// The only call that moves the game to a new round: if the live round
    /// has expired it is settled first (prize paid out or deferred, bonus
    /// locked) and the next round opens with this tap as its first.
    ///
    /// `player` must have approved this contract for at least the cost on
    /// the asset token.
    pub fn tap(env: Env, player: Address) -> Result<(), Error> {
        let config = read_config(&env)?;
        player.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;

        let now = env.ledger().timestamp();
        let mut live = read_round(&env)?;
        let mut pools = read_pools(&env);

        if live.is_over(now) {
            round::retire(&env, &config, &live, &mut pools, now)?;
            live = round::begin_next(&env, &config, &live, &mut pools, now)?;
        }

        let cost = live.cost;
        ledger::collect(&env, &config.asset_token, &player, cost)?;

        let (burned, bonus) = shared::split_half(cost)?;
        ledger::burn(&env, &config.asset_token, burned)?;
        pools.bonus_pool = pools.bonus_pool.checked_add(bonus).ok_or(Error::Overflow)?;

        live.record_tap(&player, now, &config)?;

        let taps = read_player_taps(&env, &player)
            .checked_add(1)
            .ok_or(Error::Overflow)?;

        write_round(&env, &live);
        write_pools(&env, &pools);
        write_player_taps(&env, &player, taps);

        ledger::poke_maintenance(&env, &config.asset_token, now);

        Tapped {
            round: live.number,
            player,
            cost,
            end_time: live.end_time,
            timestamp: now,
        }
        .publish(&env);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // add_funds
    // -----------------------------------------------------------------------

    /// Contribute native value to the prize pool, less the protocol fee.
    ///
    /// The net amount funds the live round while it runs and the next round
    /// once the live one has expired. Returns the net amount credited.
    pub fn add_funds(env: Env, sender: Address, amount: i128) -> Result<i128, Error> {
        let config = read_config(&env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        sender.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;

        ledger::receive(&env, &config.native_token, &sender, amount)?;

        let now = env.ledger().timestamp();
        let live = read_round(&env)?;
        let mut pools = read_pools(&env);
        let net = prize::intake(&mut pools, &live, now, amount)?;
        write_pools(&env, &pools);

        FundsAdded {
            sender,
            gross: amount,
            net,
        }
        .publish(&env);

        Ok(net)
    }

    // -----------------------------------------------------------------------
    // choose_winner
    // -----------------------------------------------------------------------

    /// Pay the prediction fee to back `candidate` as the round winner.
    ///
    /// Applies to the live round while it runs, otherwise to the next round.
    /// If the live round has expired its bonus side is locked first so the
    /// prediction count it settles on can no longer move. Returns the round
    /// the prediction was recorded for.
    pub fn choose_winner(env: Env, chooser: Address, candidate: Address) -> Result<u64, Error> {
        let config = read_config(&env)?;
        chooser.require_auth();

        if candidate == env.current_contract_address() {
            return Err(Error::InvalidCandidate);
        }

        let _guard = ReentrancyGuard::acquire(&env)?;

        let now = env.ledger().timestamp();
        let live = read_round(&env)?;
        let mut pools = read_pools(&env);

        let target = prediction::target_round(&live, now)?;
        if read_prediction(&env, target, &chooser).is_some() {
            return Err(Error::AlreadyPredicted);
        }

        prediction::finalize_bonus_if_due(&env, target.saturating_sub(1), &live, &mut pools, now)?;

        let fee = config.prediction_fee;
        ledger::collect(&env, &config.asset_token, &chooser, fee)?;

        if target == live.number {
            pools.bonus_pool = pools.bonus_pool.checked_add(fee).ok_or(Error::Overflow)?;
        } else {
            pools.pending_bonus_pool = pools
                .pending_bonus_pool
                .checked_add(fee)
                .ok_or(Error::Overflow)?;
        }

        prediction::record_choice(&env, target, &chooser, &candidate)?;
        write_pools(&env, &pools);

        PredictionMade {
            round: target,
            chooser,
            candidate,
            fee,
        }
        .publish(&env);

        Ok(target)
    }

    // -----------------------------------------------------------------------
    // claim_prize
    // -----------------------------------------------------------------------

    /// Collect the native prize of `round` as its winner.
    ///
    /// Works the same for a finalized round and for the live round in limbo;
    /// in the latter case the prize is recorded by this call. A failed
    /// transfer fails the call and undoes every write it made.
    pub fn claim_prize(env: Env, winner: Address, round: u64) -> Result<i128, Error> {
        let config = read_config(&env)?;
        winner.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;

        let now = env.ledger().timestamp();
        let live = read_round(&env)?;
        let mut pools = read_pools(&env);

        let (recorded_winner, amount) = prize::resolve_claim(&env, round, &live, &mut pools, now)?;

        if recorded_winner != winner {
            return Err(Error::NotWinner);
        }
        if amount <= 0 {
            return Err(Error::NothingToClaim);
        }
        if is_claimed(&env, round, &winner, PrizeKind::Native) {
            return Err(Error::AlreadyClaimed);
        }

        set_claimed(&env, round, &winner, PrizeKind::Native, true);

        if !ledger::pay(&env, &config.native_token, &winner, amount) {
            return Err(Error::TransferFailed);
        }

        PrizeClaimed {
            round,
            winner,
            amount,
        }
        .publish(&env);

        Ok(amount)
    }

    // -----------------------------------------------------------------------
    // claim_token_winnings
    // -----------------------------------------------------------------------

    /// Collect bonus-pool shares for every listed round the claimant
    /// predicted correctly, in one transfer.
    ///
    /// Rounds already claimed, still running, or predicted wrongly contribute
    /// nothing; the call fails with `NoWinningsToClaimInBatch` only if the
    /// whole batch comes to zero. Returns the total paid.
    pub fn claim_token_winnings(
        env: Env,
        claimant: Address,
        rounds: Vec<u64>,
    ) -> Result<i128, Error> {
        let config = read_config(&env)?;
        claimant.require_auth();
        let _guard = ReentrancyGuard::acquire(&env)?;

        let now = env.ledger().timestamp();
        let live = read_round(&env)?;
        let mut pools = read_pools(&env);

        let mut total: i128 = 0;
        for round in rounds.iter() {
            if is_claimed(&env, round, &claimant, PrizeKind::Token) {
                continue;
            }

            prediction::finalize_bonus_if_due(&env, round, &live, &mut pools, now)?;

            let Some(record) = read_record(&env, round) else {
                continue;
            };
            if !record.bonus_finalized {
                continue;
            }

            let amount = share_per_winner(record.bonus_pool, record.correct_count);
            let predicted = read_prediction(&env, round, &claimant);
            if amount <= 0 || !prediction::is_correct(predicted.as_ref(), record.winner.as_ref()) {
                continue;
            }

            set_claimed(&env, round, &claimant, PrizeKind::Token, true);
            total = total.checked_add(amount).ok_or(Error::Overflow)?;

            TokenWinningsClaimed {
                round,
                claimant: claimant.clone(),
                amount,
            }
            .publish(&env);
        }

        if total == 0 {
            return Err(Error::NoWinningsToClaimInBatch);
        }

        if !ledger::pay(&env, &config.asset_token, &claimant, total) {
            return Err(Error::TransferFailed);
        }

        Ok(total)
    }

    // -----------------------------------------------------------------------
    // withdraw_fees
    // -----------------------------------------------------------------------

    /// Drain the protocol fee balance to `recipient`. Admin only.
    pub fn withdraw_fees(env: Env, admin: Address, recipient: Address) -> Result<i128, Error> {
        let config = read_config(&env)?;
        require_admin(&env, &admin)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let mut pools = read_pools(&env);
        let amount = pools.fee_balance;
        if amount <= 0 {
            return Err(Error::NothingToClaim);
        }

        pools.fee_balance = 0;
        write_pools(&env, &pools);

        // The Err return restores the accumulator.
        if !ledger::pay(&env, &config.native_token, &recipient, amount) {
            return Err(Error::TransferFailed);
        }

        FeesWithdrawn { recipient, amount }.publish(&env);

        Ok(amount)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get_config(env: Env) -> Result<GameConfig, Error> {
        read_config(&env)
    }

    /// Snapshot of the live round.
    ///
    /// Once the live round has expired and its prize has already been
    /// claimed, the snapshot describes the upcoming round instead: it is
    /// what the next tap will play into. Its bonus pool includes the
    /// expired round's bonus when that side is still open and nobody
    /// predicted the leader, since it will roll over on the next tap.
    pub fn get_round(env: Env) -> Result<RoundSnapshot, Error> {
        let config = read_config(&env)?;
        let live = read_round(&env)?;
        let pools = read_pools(&env);
        let now = env.ledger().timestamp();

        let record = read_record(&env, live.number);
        let prize_recorded = record.as_ref().is_some_and(|r| r.prize_finalized);
        if live.is_over(now) && prize_recorded {
            let bonus_open = !record.as_ref().is_some_and(|r| r.bonus_finalized);
            let rolling_bonus = match &live.leader {
                Some(leader) if bonus_open && read_choice_count(&env, live.number, leader) == 0 => {
                    pools.bonus_pool
                }
                _ => 0,
            };
            return Ok(RoundSnapshot {
                round: live.number.saturating_add(1),
                started: false,
                end_time: 0,
                time_remaining: 0,
                leader: None,
                prize_pool: pools.prize_pool.saturating_add(pools.pending_prize_pool),
                cost: config.base_cost,
                tap_count: 0,
                bonus_pool: pools.pending_bonus_pool.saturating_add(rolling_bonus),
            });
        }

        Ok(RoundSnapshot {
            round: live.number,
            started: live.tap_count > 0,
            end_time: live.end_time,
            time_remaining: live.time_remaining(now),
            leader: live.leader,
            prize_pool: pools.prize_pool,
            cost: live.cost,
            tap_count: live.tap_count,
            bonus_pool: pools.bonus_pool,
        })
    }

    pub fn get_round_record(env: Env, round: u64) -> Result<RoundRecord, Error> {
        read_record(&env, round).ok_or(Error::RoundNotFound)
    }

    pub fn get_round_phase(env: Env, round: u64) -> Result<RoundPhase, Error> {
        if round == 0 {
            return Err(Error::RoundNotFound);
        }
        let live = read_round(&env)?;
        let record = read_record(&env, round);
        Ok(round::phase(round, &live, record.as_ref(), env.ledger().timestamp()))
    }

    pub fn get_prediction(env: Env, round: u64, participant: Address) -> PredictionStatus {
        PredictionStatus {
            candidate: read_prediction(&env, round, &participant),
            prize_claimed: is_claimed(&env, round, &participant, PrizeKind::Native),
            winnings_claimed: is_claimed(&env, round, &participant, PrizeKind::Token),
        }
    }

    pub fn get_player_taps(env: Env, player: Address) -> u32 {
        read_player_taps(&env, &player)
    }

    pub fn get_pools(env: Env) -> Result<Pools, Error> {
        if !is_initialized(&env) {
            return Err(Error::NotInitialized);
        }
        Ok(read_pools(&env))
    }

    /// Where `participant` stands in `round` as a potential winner and as a
    /// predictor. A round in limbo is evaluated against the live leader and
    /// live pools without recording anything.
    pub fn get_round_status(
        env: Env,
        round: u64,
        participant: Address,
    ) -> Result<RoundStatus, Error> {
        if round == 0 {
            return Err(Error::RoundNotFound);
        }
        let live = read_round(&env)?;
        let pools = read_pools(&env);
        let now = env.ledger().timestamp();
        let record = read_record(&env, round);
        let limbo = round == live.number && live.is_over(now);

        let winner = record
            .as_ref()
            .and_then(|r| r.winner.clone())
            .or_else(|| if limbo { live.leader.clone() } else { None });

        let prize = match &record {
            Some(r) if r.prize_finalized => r.prize,
            _ if limbo => pools.prize_pool,
            _ => 0,
        };

        let (bonus_pool, correct_count) = match (&record, &winner) {
            (Some(r), _) if r.bonus_finalized => (r.bonus_pool, r.correct_count),
            (_, Some(w)) if limbo => (pools.bonus_pool, read_choice_count(&env, round, w)),
            _ => (0, 0),
        };

        let candidate = read_prediction(&env, round, &participant);
        let is_winner = winner.as_ref() == Some(&participant);
        let predicted_correctly = prediction::is_correct(candidate.as_ref(), winner.as_ref());

        Ok(RoundStatus {
            phase: round::phase(round, &live, record.as_ref(), now),
            is_winner,
            prize: if is_winner { prize } else { 0 },
            prize_claimed: is_claimed(&env, round, &participant, PrizeKind::Native),
            candidate,
            predicted_correctly,
            winnings: if predicted_correctly {
                share_per_winner(bonus_pool, correct_count)
            } else {
                0
            },
            winnings_claimed: is_claimed(&env, round, &participant, PrizeKind::Token),
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Verify that `caller` is the stored admin and has signed the invocation.
fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin = read_admin(env)?;
    caller.require_auth();
    if caller != &admin {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
