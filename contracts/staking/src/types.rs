use soroban_sdk::{contracttype, Address, Env, Map};
use stakeledger_shared::StakeKind;

// Storage Keys
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    Pool,
    Stakers,
    Account(Address),
}

/// Pool policy parameters, set at initialisation and replaced by upgrades.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolParams {
    pub reward_rate: u32,    // Basis points per year
    pub min_stake: i128,
    pub max_stake: i128,
    pub withdrawal_fee: u32, // Basis points
    pub compound_frequency: u64,
    pub slash_rate: u32,     // Basis points
    pub cooldown_period: u64,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PositionCounters {
    pub compound_count: u32,
    pub reward_count: u32,
    pub unstake_count: u32,
    pub delegate_count: u32,
    pub beneficiary_count: u32,
    pub slash_count: u32,
    pub cooldown_count: u32,
}

/// One stake lot. Never removed once created; a fully withdrawn lot is
/// kept with `is_active == false`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub stake_id: u64,
    pub amount: i128,
    pub rewards: i128, // Accrued, unclaimed
    pub kind: StakeKind,
    pub lock_period: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub last_claim: u64,
    pub last_compound: u64,
    pub is_active: bool,
    pub is_locked: bool,
    pub is_fixed: bool,
    pub is_delegated: bool,
    pub delegate: Option<Address>,
    pub has_beneficiary: bool,
    pub beneficiary: Option<Address>,
    pub is_slashed: bool,
    pub in_cooldown: bool,
    pub cooldown_end: u64,
    pub apy: u32, // Stored for reporting, not used by accrual
    pub counters: PositionCounters,
}

impl StakePosition {
    pub fn new(
        stake_id: u64,
        amount: i128,
        kind: StakeKind,
        lock_period: u64,
        apy: u32,
        now: u64,
    ) -> Self {
        Self {
            stake_id,
            amount,
            rewards: 0,
            kind,
            lock_period,
            start_time: now,
            end_time: now.saturating_add(lock_period),
            last_claim: now,
            last_compound: now,
            is_active: true,
            is_locked: kind == StakeKind::Locked,
            is_fixed: kind == StakeKind::Fixed,
            is_delegated: false,
            delegate: None,
            has_beneficiary: false,
            beneficiary: None,
            is_slashed: false,
            in_cooldown: false,
            cooldown_end: 0,
            apy,
            counters: PositionCounters::default(),
        }
    }

    pub fn is_lock_elapsed(&self, now: u64) -> bool {
        !self.is_locked || now >= self.end_time
    }

    pub fn is_cooling_down(&self, now: u64) -> bool {
        self.in_cooldown && now < self.cooldown_end
    }
}

/// Per-account aggregate plus every stake lot the account ever opened.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountLedger {
    pub positions: Map<u64, StakePosition>,
    pub total_staked: i128,
    pub total_unclaimed: i128,
    pub total_claimed: i128,
    pub total_compounded: i128,
    pub total_delegated: i128,
    pub beneficiary_count: u32,
    pub last_claim: u64,
    pub last_compound: u64,
    pub last_delegate: u64,
    pub last_beneficiary: u64,
    pub has_delegated: bool,
    pub has_beneficiary: bool,
    pub cooldown_end: u64,
    pub created_at: u64,
}

impl AccountLedger {
    pub fn new(env: &Env, now: u64) -> Self {
        Self {
            positions: Map::new(env),
            total_staked: 0,
            total_unclaimed: 0,
            total_claimed: 0,
            total_compounded: 0,
            total_delegated: 0,
            beneficiary_count: 0,
            last_claim: 0,
            last_compound: 0,
            last_delegate: 0,
            last_beneficiary: 0,
            has_delegated: false,
            has_beneficiary: false,
            cooldown_end: 0,
            created_at: now,
        }
    }

    pub fn active_position_count(&self) -> u32 {
        self.positions.values().iter().filter(|p| p.is_active).count() as u32
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KindCounters {
    pub flexible: u64,
    pub locked: u64,
    pub fixed: u64,
}

impl KindCounters {
    pub fn record(&mut self, kind: StakeKind) {
        match kind {
            StakeKind::Flexible => self.flexible += 1,
            StakeKind::Locked => self.locked += 1,
            StakeKind::Fixed => self.fixed += 1,
        }
    }
}

/// Published events, by kind.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EventCounters {
    pub stake: u64,
    pub unstake: u64,
    pub reward: u64,
    pub delegate: u64,
    pub beneficiary: u64,
    pub emergency: u64,
    pub upgrade: u64,
    pub funded: u64,
    pub admin: u64,
}

/// The global pool aggregate. Registered stakers are kept under
/// `DataKey::Stakers` so the pool record stays a fixed size.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub stake_token: Address,
    pub params: PoolParams,
    pub total_staked: i128,
    pub last_reward_update: u64,
    pub total_rewards: i128, // Cumulative pot handed out by accrual
    pub total_claimed: i128,
    pub total_compounded: i128,
    pub total_fees: i128,
    pub total_funded: i128,
    pub total_slashed: i128,
    pub total_stake_ids: u64,
    pub total_holders: u32,
    pub compound_count: u64,
    pub delegation_count: u64,
    pub beneficiary_count: u64,
    pub kinds: KindCounters,
    pub events: EventCounters,
    pub created_at: u64,
}

impl PoolState {
    pub fn new(stake_token: Address, params: PoolParams, now: u64) -> Self {
        Self {
            stake_token,
            params,
            total_staked: 0,
            last_reward_update: now,
            total_rewards: 0,
            total_claimed: 0,
            total_compounded: 0,
            total_fees: 0,
            total_funded: 0,
            total_slashed: 0,
            total_stake_ids: 0,
            total_holders: 0,
            compound_count: 0,
            delegation_count: 0,
            beneficiary_count: 0,
            kinds: KindCounters::default(),
            events: EventCounters::default(),
            created_at: now,
        }
    }

    /// Funded liquidity and retained fees not yet paid out or compounded.
    /// Custody always holds `total_staked + reward_reserve()`.
    pub fn reward_reserve(&self) -> i128 {
        self.total_funded
            .saturating_add(self.total_fees)
            .saturating_sub(self.total_claimed)
            .saturating_sub(self.total_compounded)
    }
}

/// Access control and versioning for the pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminCapability {
    pub admin: Address,
    pub version: u32,
    pub paused: bool,
    pub emergency: bool,
    pub upgrade_cooldown: u64,
    pub last_upgrade: Option<u64>,
}

// Query Types
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolStats {
    pub total_staked: i128,
    pub reward_rate: u32,
    pub last_reward_update: u64,
    pub total_rewards: i128,
    pub total_claimed: i128,
    pub total_compounded: i128,
    pub total_fees: i128,
    pub total_funded: i128,
    pub total_slashed: i128,
    pub staker_count: u32,
    pub total_holders: u32,
    pub total_stake_ids: u64,
    pub compound_count: u64,
    pub delegation_count: u64,
    pub beneficiary_count: u64,
    pub kinds: KindCounters,
    pub events: EventCounters,
    pub version: u32,
    pub paused: bool,
    pub emergency: bool,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserStats {
    pub total_staked: i128,
    pub total_unclaimed: i128,
    pub total_claimed: i128,
    pub total_compounded: i128,
    pub total_delegated: i128,
    pub beneficiary_count: u32,
    pub position_count: u32,
    pub active_positions: u32,
    pub last_claim: u64,
    pub last_compound: u64,
    pub last_delegate: u64,
    pub last_beneficiary: u64,
    pub has_delegated: bool,
    pub has_beneficiary: bool,
    pub cooldown_end: u64,
}

impl From<&AccountLedger> for UserStats {
    fn from(ledger: &AccountLedger) -> Self {
        Self {
            total_staked: ledger.total_staked,
            total_unclaimed: ledger.total_unclaimed,
            total_claimed: ledger.total_claimed,
            total_compounded: ledger.total_compounded,
            total_delegated: ledger.total_delegated,
            beneficiary_count: ledger.beneficiary_count,
            position_count: ledger.positions.len(),
            active_positions: ledger.active_position_count(),
            last_claim: ledger.last_claim,
            last_compound: ledger.last_compound,
            last_delegate: ledger.last_delegate,
            last_beneficiary: ledger.last_beneficiary,
            has_delegated: ledger.has_delegated,
            has_beneficiary: ledger.has_beneficiary,
            cooldown_end: ledger.cooldown_end,
        }
    }
}
