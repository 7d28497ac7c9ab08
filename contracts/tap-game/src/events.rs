use soroban_sdk::{contractevent, Address};

#[contractevent]
pub struct Initialized {
    pub admin: Address,
    pub native_token: Address,
    pub asset_token: Address,
}

#[contractevent]
pub struct RoundStarted {
    #[topic]
    pub round: u64,
    pub prize_pool: i128,
    pub bonus_pool: i128,
    pub timestamp: u64,
}

#[contractevent]
pub struct Tapped {
    #[topic]
    pub round: u64,
    #[topic]
    pub player: Address,
    pub cost: i128,
    pub end_time: u64,
    pub timestamp: u64,
}

#[contractevent]
pub struct RoundEnded {
    #[topic]
    pub round: u64,
    #[topic]
    pub winner: Address,
    pub prize: i128,
    pub timestamp: u64,
}

/// Automatic payout failed; the prize moved to the pending pool and stays
/// claimable through `claim_prize`.
#[contractevent]
pub struct PrizeDeferred {
    #[topic]
    pub round: u64,
    #[topic]
    pub winner: Address,
    pub amount: i128,
}

#[contractevent]
pub struct PrizeClaimed {
    #[topic]
    pub round: u64,
    #[topic]
    pub winner: Address,
    pub amount: i128,
}

#[contractevent]
pub struct FundsAdded {
    #[topic]
    pub sender: Address,
    pub gross: i128,
    pub net: i128,
}

#[contractevent]
pub struct PredictionMade {
    #[topic]
    pub round: u64,
    #[topic]
    pub chooser: Address,
    pub candidate: Address,
    pub fee: i128,
}

#[contractevent]
pub struct BonusRolledOver {
    #[topic]
    pub round: u64,
    pub amount: i128,
}

#[contractevent]
pub struct TokenWinningsClaimed {
    #[topic]
    pub round: u64,
    #[topic]
    pub claimant: Address,
    pub amount: i128,
}

#[contractevent]
pub struct FeesWithdrawn {
    #[topic]
    pub recipient: Address,
    pub amount: i128,
}
