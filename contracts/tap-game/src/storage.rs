use soroban_sdk::{Address, Env};

use crate::types::{DataKey, GameConfig, Pools, PrizeKind, Round, RoundRecord};
use crate::Error;

/// Persistent storage TTL in ledgers (~30 days at 5 s/ledger).
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

pub(crate) fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub(crate) fn read_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub(crate) fn read_config(env: &Env) -> Result<GameConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub(crate) fn read_round(env: &Env) -> Result<Round, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Round)
        .ok_or(Error::NotInitialized)
}

pub(crate) fn write_round(env: &Env, round: &Round) {
    set_persistent(env, DataKey::Round, round);
}

pub(crate) fn read_pools(env: &Env) -> Pools {
    env.storage()
        .persistent()
        .get(&DataKey::Pools)
        .unwrap_or_default()
}

pub(crate) fn write_pools(env: &Env, pools: &Pools) {
    set_persistent(env, DataKey::Pools, pools);
}

pub(crate) fn read_record(env: &Env, round: u64) -> Option<RoundRecord> {
    env.storage().persistent().get(&DataKey::Record(round))
}

pub(crate) fn write_record(env: &Env, round: u64, record: &RoundRecord) {
    set_persistent(env, DataKey::Record(round), record);
}

pub(crate) fn read_prediction(env: &Env, round: u64, participant: &Address) -> Option<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::Prediction(round, participant.clone()))
}

pub(crate) fn write_prediction(env: &Env, round: u64, participant: &Address, candidate: &Address) {
    set_persistent(
        env,
        DataKey::Prediction(round, participant.clone()),
        candidate,
    );
}

pub(crate) fn read_choice_count(env: &Env, round: u64, candidate: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ChoiceCount(round, candidate.clone()))
        .unwrap_or(0)
}

pub(crate) fn write_choice_count(env: &Env, round: u64, candidate: &Address, count: u32) {
    set_persistent(env, DataKey::ChoiceCount(round, candidate.clone()), &count);
}

pub(crate) fn is_claimed(env: &Env, round: u64, participant: &Address, kind: PrizeKind) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Claimed(round, participant.clone(), kind))
        .unwrap_or(false)
}

pub(crate) fn set_claimed(
    env: &Env,
    round: u64,
    participant: &Address,
    kind: PrizeKind,
    claimed: bool,
) {
    set_persistent(
        env,
        DataKey::Claimed(round, participant.clone(), kind),
        &claimed,
    );
}

pub(crate) fn read_player_taps(env: &Env, player: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::PlayerTaps(player.clone()))
        .unwrap_or(0)
}

pub(crate) fn write_player_taps(env: &Env, player: &Address, taps: u32) {
    set_persistent(env, DataKey::PlayerTaps(player.clone()), &taps);
}

/// Write a value to persistent storage and extend its TTL in one step.
fn set_persistent<V>(env: &Env, key: DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(&key, value);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}
