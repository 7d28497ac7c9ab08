use soroban_sdk::{contracttype, Address};

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

/// Instance keys (Admin, Config, LastMaintenance, Locked): fixed-size config
/// and call-scoped flags, one ledger entry.
/// Persistent keys: the live round, the accumulators, and every per-round or
/// per-participant entry, each with its own TTL bumped on write.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // --- instance() ---
    Admin,
    Config,
    /// Timestamp of the last successful asset-ledger maintenance trigger.
    LastMaintenance,
    /// Reentrancy flag; present only while a guarded call is running.
    Locked,
    // --- persistent() ---
    Round,
    Pools,
    Record(u64),
    /// Candidate chosen by a participant for a round.
    Prediction(u64, Address),
    /// Number of participants who chose a candidate for a round.
    ChoiceCount(u64, Address),
    Claimed(u64, Address, PrizeKind),
    PlayerTaps(Address),
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrizeKind {
    Native = 0,
    Token = 1,
}

/// Derived lifecycle position of a round. Never stored.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundPhase {
    /// Later than the live round; only predictions can reference it.
    Upcoming = 0,
    Active = 1,
    /// Expired with a leader, at least one prize side not yet recorded.
    Limbo = 2,
    Finalized = 3,
}

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Immutable game parameters written once by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameConfig {
    /// SEP-41 token holding the native-value prize (e.g. the XLM SAC).
    pub native_token: Address,
    /// Asset ledger: taps and prediction fees are paid in it, bonuses paid out of it.
    pub asset_token: Address,
    pub base_duration: u64,
    pub base_cost: i128,
    pub growth_bps: u32,
    pub prediction_fee: i128,
}

/// The single live round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    pub number: u64,
    pub start_time: u64,
    pub end_time: u64,
    /// Cost of the next tap.
    pub cost: i128,
    pub duration: u64,
    pub tap_count: u32,
    pub leader: Option<Address>,
}

/// Value accumulators. `pending_*` holds funds that arrived while the live
/// round was already expired; they move into the current pools when the next
/// round starts.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pools {
    pub prize_pool: i128,
    pub pending_prize_pool: i128,
    pub bonus_pool: i128,
    pub pending_bonus_pool: i128,
    pub fee_balance: i128,
}

/// Outcome of a finished round. The prize side and the bonus side are
/// recorded independently, each at most once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundRecord {
    pub winner: Option<Address>,
    pub prize: i128,
    pub prize_finalized: bool,
    pub bonus_pool: i128,
    pub correct_count: u32,
    pub bonus_finalized: bool,
}

impl RoundRecord {
    pub fn empty() -> Self {
        RoundRecord {
            winner: None,
            prize: 0,
            prize_finalized: false,
            bonus_pool: 0,
            correct_count: 0,
            bonus_finalized: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Query views
// ---------------------------------------------------------------------------

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundSnapshot {
    pub round: u64,
    pub started: bool,
    pub end_time: u64,
    pub time_remaining: u64,
    pub leader: Option<Address>,
    pub prize_pool: i128,
    pub cost: i128,
    pub tap_count: u32,
    pub bonus_pool: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PredictionStatus {
    pub candidate: Option<Address>,
    pub prize_claimed: bool,
    pub winnings_claimed: bool,
}

/// Combined view of one participant's position in one round.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundStatus {
    pub phase: RoundPhase,
    pub is_winner: bool,
    /// Native prize owed to the participant as winner (0 if not the winner).
    pub prize: i128,
    pub prize_claimed: bool,
    pub candidate: Option<Address>,
    pub predicted_correctly: bool,
    /// Bonus share for a correct prediction, whether claimed or not.
    pub winnings: i128,
    pub winnings_claimed: bool,
}
