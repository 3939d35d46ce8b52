#![no_std]
//! # StakeLedger Staking Pool
//!
//! Tracks deposits of a single token into flexible, locked or fixed stake
//! lots and distributes a pool-wide, time-proportional reward across every
//! active lot. Every mutating operation follows the same order:
//! policy check, operation-specific validation, reward accrual on the
//! pre-operation totals, then the operation's own state transition.

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Vec};
use stakeledger_shared::{
    apply_basis_points, validate_basis_points, validate_positive_amount, StakeKind,
    ACTION_EMERGENCY_OFF, ACTION_EMERGENCY_ON, ACTION_PAUSE, ACTION_UNPAUSE,
};

pub mod accrual;
pub mod errors;
pub mod events;
mod policy;
mod storage;
pub mod types;

pub use errors::StakingError;
use events::{
    AdminTransferredEvent, BeneficiaryEvent, DelegateEvent, EmergencyEvent, FundedEvent,
    InitializedEvent, RewardEvent, StakeEvent, UnstakeEvent, UpgradeEvent,
};
pub use types::{
    AccountLedger, AdminCapability, EventCounters, KindCounters, PoolParams, PoolState,
    PoolStats, PositionCounters, StakePosition, UserStats,
};

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    /// Initialize the pool with its policy parameters and admin.
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        params: PoolParams,
        upgrade_cooldown: u64,
    ) -> Result<(), StakingError> {
        if storage::is_initialized(&env) {
            return Err(StakingError::AlreadyInitialized);
        }

        admin.require_auth();
        policy::validate_params(&params)?;

        let now = env.ledger().timestamp();
        let reward_rate = params.reward_rate;
        let pool = PoolState::new(stake_token.clone(), params, now);
        let cap = AdminCapability {
            admin: admin.clone(),
            version: 1,
            paused: false,
            emergency: false,
            upgrade_cooldown,
            last_upgrade: None,
        };

        storage::set_pool(&env, &pool);
        storage::set_admin(&env, &cap);

        events::publish_initialized(
            &env,
            InitializedEvent {
                admin: admin.clone(),
                stake_token,
                reward_rate,
                timestamp: now,
            },
        );

        log!(&env, "Staking pool initialized by admin: {}", admin);

        Ok(())
    }

    /// Open a new stake lot. Returns its stake id.
    ///
    /// `kind` is a stake kind code: 0 = Flexible, 1 = Locked, 2 = Fixed.
    pub fn stake(
        env: Env,
        account: Address,
        amount: i128,
        kind: u32,
        lock_period: u64,
        apy: u32,
    ) -> Result<u64, StakingError> {
        account.require_auth();

        let cap = storage::get_admin(&env)?;
        policy::check(&cap)?;
        let mut pool = storage::get_pool(&env)?;

        if !validate_positive_amount(amount) {
            return Err(StakingError::InvalidAmount);
        }
        if amount < pool.params.min_stake {
            return Err(StakingError::BelowMinStake);
        }
        if amount > pool.params.max_stake {
            return Err(StakingError::AboveMaxStake);
        }
        let kind = StakeKind::from_code(kind).ok_or(StakingError::InvalidStakeType)?;
        if !validate_basis_points(apy) {
            return Err(StakingError::InvalidApy);
        }
        let new_total = pool
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::NumericOverflow)?;
        let stake_id = pool
            .total_stake_ids
            .checked_add(1)
            .ok_or(StakingError::NumericOverflow)?;

        let now = env.ledger().timestamp();
        accrual::accrue(&env, &mut pool, now);

        token::Client::new(&env, &pool.stake_token).transfer(
            &account,
            &env.current_contract_address(),
            &amount,
        );

        let mut ledger = match storage::get_ledger(&env, &account) {
            Some(ledger) => ledger,
            None => {
                pool.total_holders = pool.total_holders.saturating_add(1);
                AccountLedger::new(&env, now)
            }
        };
        ledger.positions.set(
            stake_id,
            StakePosition::new(stake_id, amount, kind, lock_period, apy, now),
        );
        ledger.total_staked = ledger
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::NumericOverflow)?;
        storage::set_ledger(&env, &account, &ledger);
        storage::register_staker(&env, &account);

        pool.total_staked = new_total;
        pool.total_stake_ids = stake_id;
        pool.kinds.record(kind);

        events::publish_stake(
            &env,
            &mut pool.events,
            StakeEvent {
                account: account.clone(),
                stake_id,
                amount,
                kind,
                lock_period,
                timestamp: now,
            },
        );
        storage::set_pool(&env, &pool);

        log!(&env, "User {} staked {} as stake {}", account, amount, stake_id);

        Ok(stake_id)
    }

    /// Withdraw `amount` from a stake lot. Returns the amount paid out after
    /// the withdrawal fee.
    pub fn unstake(
        env: Env,
        account: Address,
        stake_id: u64,
        amount: i128,
        force: bool,
    ) -> Result<i128, StakingError> {
        account.require_auth();

        let cap = storage::get_admin(&env)?;
        policy::check(&cap)?;
        let mut pool = storage::get_pool(&env)?;

        if !validate_positive_amount(amount) {
            return Err(StakingError::InvalidAmount);
        }

        let now = env.ledger().timestamp();
        let position = Self::active_position(&env, &account, stake_id)?;
        if amount > position.amount {
            return Err(StakingError::InsufficientBalance);
        }
        if !force && !position.is_lock_elapsed(now) {
            return Err(StakingError::LockPeriodNotElapsed);
        }
        if position.is_cooling_down(now) {
            return Err(StakingError::CooldownActive);
        }
        let fee = apply_basis_points(amount, pool.params.withdrawal_fee)
            .ok_or(StakingError::NumericOverflow)?;
        let payout = amount - fee;

        accrual::accrue(&env, &mut pool, now);

        let (mut ledger, mut position) = Self::load_position(&env, &account, stake_id)?;
        position.amount -= amount;
        position.counters.unstake_count += 1;
        pool.total_staked -= amount;
        pool.total_fees = pool.total_fees.saturating_add(fee);

        // A closed lot cannot be claimed from, so its rewards are settled now.
        // Whatever the reserve cannot cover goes back to the pool.
        let mut settled = 0i128;
        let mut settle_to = account.clone();
        if position.amount == 0 {
            position.is_active = false;
            position.in_cooldown = false;
            let residual = position.rewards;
            if residual > 0 {
                settled = residual.min(pool.reward_reserve().max(0));
                position.rewards = 0;
                ledger.total_unclaimed = ledger.total_unclaimed.saturating_sub(residual);
                if settled > 0 {
                    settle_to = position
                        .beneficiary
                        .clone()
                        .unwrap_or_else(|| account.clone());
                    position.last_claim = now;
                    position.counters.reward_count += 1;
                    ledger.total_claimed = ledger.total_claimed.saturating_add(settled);
                    ledger.last_claim = now;
                    pool.total_claimed = pool.total_claimed.saturating_add(settled);
                }
            }
        } else if pool.params.cooldown_period > 0 {
            position.in_cooldown = true;
            position.cooldown_end = now.saturating_add(pool.params.cooldown_period);
            position.counters.cooldown_count += 1;
            ledger.cooldown_end = ledger.cooldown_end.max(position.cooldown_end);
        }
        let deactivated = !position.is_active;
        ledger.positions.set(stake_id, position);
        ledger.total_staked -= amount;
        storage::set_ledger(&env, &account, &ledger);
        if ledger.total_staked == 0 {
            storage::unregister_staker(&env, &account);
        }

        let token_client = token::Client::new(&env, &pool.stake_token);
        if payout > 0 {
            token_client.transfer(&env.current_contract_address(), &account, &payout);
        }
        if settled > 0 {
            token_client.transfer(&env.current_contract_address(), &settle_to, &settled);
            events::publish_reward(
                &env,
                &mut pool.events,
                RewardEvent {
                    account: account.clone(),
                    stake_id,
                    amount: settled,
                    compounded: false,
                    recipient: settle_to,
                    timestamp: now,
                },
            );
        }

        events::publish_unstake(
            &env,
            &mut pool.events,
            UnstakeEvent {
                account: account.clone(),
                stake_id,
                amount,
                fee,
                timestamp: now,
            },
        );
        storage::set_pool(&env, &pool);

        log!(
            &env,
            "User {} unstaked {} from stake {} (fee {}, closed {})",
            account,
            amount,
            stake_id,
            fee,
            deactivated
        );

        Ok(payout)
    }

    /// Claim the accrued rewards of a stake lot, either paid out or
    /// compounded into its principal. Returns the reward amount.
    pub fn claim_rewards(
        env: Env,
        account: Address,
        stake_id: u64,
        compound: bool,
    ) -> Result<i128, StakingError> {
        account.require_auth();

        let cap = storage::get_admin(&env)?;
        policy::check(&cap)?;
        let mut pool = storage::get_pool(&env)?;

        let now = env.ledger().timestamp();
        let position = Self::active_position(&env, &account, stake_id)?;
        let pending = position
            .rewards
            .saturating_add(accrual::pending_share(&pool, &position, now));
        if pending <= 0 {
            return Err(StakingError::NoRewardsAvailable);
        }
        if compound
            && now < position
                .last_compound
                .saturating_add(pool.params.compound_frequency)
        {
            return Err(StakingError::CompoundTooFrequent);
        }
        if pending > pool.reward_reserve() {
            return Err(StakingError::InsufficientRewards);
        }

        accrual::accrue(&env, &mut pool, now);

        let (mut ledger, mut position) = Self::load_position(&env, &account, stake_id)?;
        let rewards = position.rewards;
        position.rewards = 0;
        ledger.total_unclaimed = ledger.total_unclaimed.saturating_sub(rewards);

        let recipient = if compound {
            account.clone()
        } else {
            position
                .beneficiary
                .clone()
                .unwrap_or_else(|| account.clone())
        };

        if compound {
            position.amount = position
                .amount
                .checked_add(rewards)
                .ok_or(StakingError::NumericOverflow)?;
            position.last_compound = now;
            position.counters.compound_count += 1;
            ledger.total_staked = ledger
                .total_staked
                .checked_add(rewards)
                .ok_or(StakingError::NumericOverflow)?;
            ledger.total_compounded = ledger.total_compounded.saturating_add(rewards);
            ledger.last_compound = now;
            pool.total_staked = pool
                .total_staked
                .checked_add(rewards)
                .ok_or(StakingError::NumericOverflow)?;
            pool.total_compounded = pool.total_compounded.saturating_add(rewards);
            pool.compound_count += 1;
        } else {
            position.last_claim = now;
            position.counters.reward_count += 1;
            ledger.total_claimed = ledger.total_claimed.saturating_add(rewards);
            ledger.last_claim = now;
            pool.total_claimed = pool.total_claimed.saturating_add(rewards);
        }
        ledger.positions.set(stake_id, position);
        storage::set_ledger(&env, &account, &ledger);

        if !compound {
            token::Client::new(&env, &pool.stake_token).transfer(
                &env.current_contract_address(),
                &recipient,
                &rewards,
            );
        }

        events::publish_reward(
            &env,
            &mut pool.events,
            RewardEvent {
                account: account.clone(),
                stake_id,
                amount: rewards,
                compounded: compound,
                recipient,
                timestamp: now,
            },
        );
        storage::set_pool(&env, &pool);

        log!(
            &env,
            "User {} claimed {} from stake {} (compound {})",
            account,
            rewards,
            stake_id,
            compound
        );

        Ok(rewards)
    }

    /// Delegate a stake lot. A lot can be delegated once.
    pub fn delegate_stake(
        env: Env,
        account: Address,
        stake_id: u64,
        delegate: Address,
    ) -> Result<(), StakingError> {
        account.require_auth();

        let cap = storage::get_admin(&env)?;
        policy::check(&cap)?;
        let mut pool = storage::get_pool(&env)?;

        if delegate == account || delegate == env.current_contract_address() {
            return Err(StakingError::InvalidDelegate);
        }
        let position = Self::active_position(&env, &account, stake_id)?;
        if position.is_delegated {
            return Err(StakingError::AlreadyDelegated);
        }

        let now = env.ledger().timestamp();
        accrual::accrue(&env, &mut pool, now);

        let (mut ledger, mut position) = Self::load_position(&env, &account, stake_id)?;
        let amount = position.amount;
        position.is_delegated = true;
        position.delegate = Some(delegate.clone());
        position.counters.delegate_count += 1;
        ledger.positions.set(stake_id, position);
        ledger.total_delegated = ledger.total_delegated.saturating_add(amount);
        ledger.has_delegated = true;
        ledger.last_delegate = now;
        storage::set_ledger(&env, &account, &ledger);

        pool.delegation_count += 1;

        events::publish_delegate(
            &env,
            &mut pool.events,
            DelegateEvent {
                delegator: account.clone(),
                delegate: delegate.clone(),
                stake_id,
                amount,
                timestamp: now,
            },
        );
        storage::set_pool(&env, &pool);

        log!(&env, "User {} delegated stake {} to {}", account, stake_id, delegate);

        Ok(())
    }

    /// Name the beneficiary of a stake lot's reward payouts. Set once.
    pub fn set_beneficiary(
        env: Env,
        account: Address,
        stake_id: u64,
        beneficiary: Address,
    ) -> Result<(), StakingError> {
        account.require_auth();

        let cap = storage::get_admin(&env)?;
        policy::check(&cap)?;
        let mut pool = storage::get_pool(&env)?;

        if beneficiary == account || beneficiary == env.current_contract_address() {
            return Err(StakingError::InvalidBeneficiary);
        }
        let position = Self::active_position(&env, &account, stake_id)?;
        if position.has_beneficiary {
            return Err(StakingError::BeneficiaryAlreadySet);
        }

        let now = env.ledger().timestamp();
        accrual::accrue(&env, &mut pool, now);

        let (mut ledger, mut position) = Self::load_position(&env, &account, stake_id)?;
        position.has_beneficiary = true;
        position.beneficiary = Some(beneficiary.clone());
        position.counters.beneficiary_count += 1;
        ledger.positions.set(stake_id, position);
        ledger.beneficiary_count += 1;
        ledger.has_beneficiary = true;
        ledger.last_beneficiary = now;
        storage::set_ledger(&env, &account, &ledger);

        pool.beneficiary_count += 1;

        events::publish_beneficiary(
            &env,
            &mut pool.events,
            BeneficiaryEvent {
                account: account.clone(),
                beneficiary: beneficiary.clone(),
                stake_id,
                timestamp: now,
            },
        );
        storage::set_pool(&env, &pool);

        log!(&env, "User {} set beneficiary {} on stake {}", account, beneficiary, stake_id);

        Ok(())
    }

    /// Move reward liquidity into pool custody.
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<(), StakingError> {
        funder.require_auth();

        let cap = storage::get_admin(&env)?;
        policy::check(&cap)?;
        let mut pool = storage::get_pool(&env)?;

        if !validate_positive_amount(amount) {
            return Err(StakingError::InvalidAmount);
        }

        token::Client::new(&env, &pool.stake_token).transfer(
            &funder,
            &env.current_contract_address(),
            &amount,
        );

        let now = env.ledger().timestamp();
        pool.total_funded = pool
            .total_funded
            .checked_add(amount)
            .ok_or(StakingError::NumericOverflow)?;

        events::publish_funded(
            &env,
            &mut pool.events,
            FundedEvent {
                funder: funder.clone(),
                amount,
                timestamp: now,
            },
        );
        storage::set_pool(&env, &pool);

        log!(&env, "Reward reserve funded with {} by {}", amount, funder);

        Ok(())
    }

    // Admin

    /// Admin function to pause/unpause the pool
    pub fn emergency_pause(env: Env, admin: Address, paused: bool) -> Result<(), StakingError> {
        admin.require_auth();

        let mut cap = storage::get_admin(&env)?;
        policy::require_admin(&cap, &admin)?;
        let mut pool = storage::get_pool(&env)?;

        cap.paused = paused;
        storage::set_admin(&env, &cap);

        let action_code = if paused { ACTION_PAUSE } else { ACTION_UNPAUSE };
        events::publish_emergency(
            &env,
            &mut pool.events,
            EmergencyEvent {
                admin,
                action_code,
                timestamp: env.ledger().timestamp(),
            },
        );
        storage::set_pool(&env, &pool);

        log!(&env, "Pause set to: {}", paused);

        Ok(())
    }

    /// Admin function to switch emergency mode on or off
    pub fn emergency_mode(env: Env, admin: Address, enabled: bool) -> Result<(), StakingError> {
        admin.require_auth();

        let mut cap = storage::get_admin(&env)?;
        policy::require_admin(&cap, &admin)?;
        let mut pool = storage::get_pool(&env)?;

        cap.emergency = enabled;
        storage::set_admin(&env, &cap);

        let action_code = if enabled {
            ACTION_EMERGENCY_ON
        } else {
            ACTION_EMERGENCY_OFF
        };
        events::publish_emergency(
            &env,
            &mut pool.events,
            EmergencyEvent {
                admin,
                action_code,
                timestamp: env.ledger().timestamp(),
            },
        );
        storage::set_pool(&env, &pool);

        log!(&env, "Emergency mode set to: {}", enabled);

        Ok(())
    }

    /// Replace the pool policy parameters. Rewards up to now are accrued at
    /// the old rate first. Returns the new version.
    pub fn upgrade_pool(env: Env, admin: Address, params: PoolParams) -> Result<u32, StakingError> {
        admin.require_auth();

        let mut cap = storage::get_admin(&env)?;
        policy::require_admin(&cap, &admin)?;

        let now = env.ledger().timestamp();
        policy::check_upgrade_window(&cap, now)?;
        policy::validate_params(&params)?;

        let mut pool = storage::get_pool(&env)?;
        accrual::accrue(&env, &mut pool, now);
        pool.params = params;

        cap.version = cap.version.saturating_add(1);
        cap.last_upgrade = Some(now);
        storage::set_admin(&env, &cap);

        events::publish_upgrade(
            &env,
            &mut pool.events,
            UpgradeEvent {
                admin,
                version: cap.version,
                timestamp: now,
            },
        );
        storage::set_pool(&env, &pool);

        log!(&env, "Pool upgraded to version {}", cap.version);

        Ok(cap.version)
    }

    /// Hand the admin capability to `new_admin`.
    pub fn transfer_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), StakingError> {
        admin.require_auth();

        let mut cap = storage::get_admin(&env)?;
        policy::require_admin(&cap, &admin)?;
        let mut pool = storage::get_pool(&env)?;

        cap.admin = new_admin.clone();
        storage::set_admin(&env, &cap);

        events::publish_admin_transferred(
            &env,
            &mut pool.events,
            AdminTransferredEvent {
                old_admin: admin.clone(),
                new_admin: new_admin.clone(),
                timestamp: env.ledger().timestamp(),
            },
        );
        storage::set_pool(&env, &pool);

        log!(&env, "Admin transferred: {} -> {}", admin, new_admin);

        Ok(())
    }

    // Queries

    pub fn get_staked_amount(env: Env, account: Address) -> i128 {
        storage::get_ledger(&env, &account).map_or(0, |ledger| ledger.total_staked)
    }

    /// Unclaimed rewards as of the last accrual pass.
    pub fn get_pending_rewards(env: Env, account: Address) -> i128 {
        storage::get_ledger(&env, &account).map_or(0, |ledger| ledger.total_unclaimed)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        storage::get_pool(&env).map_or(0, |pool| pool.total_staked)
    }

    pub fn get_pool_stats(env: Env) -> Result<PoolStats, StakingError> {
        let pool = storage::get_pool(&env)?;
        let cap = storage::get_admin(&env)?;
        Ok(PoolStats {
            total_staked: pool.total_staked,
            reward_rate: pool.params.reward_rate,
            last_reward_update: pool.last_reward_update,
            total_rewards: pool.total_rewards,
            total_claimed: pool.total_claimed,
            total_compounded: pool.total_compounded,
            total_fees: pool.total_fees,
            total_funded: pool.total_funded,
            total_slashed: pool.total_slashed,
            staker_count: storage::get_stakers(&env).len(),
            total_holders: pool.total_holders,
            total_stake_ids: pool.total_stake_ids,
            compound_count: pool.compound_count,
            delegation_count: pool.delegation_count,
            beneficiary_count: pool.beneficiary_count,
            kinds: pool.kinds,
            events: pool.events,
            version: cap.version,
            paused: cap.paused,
            emergency: cap.emergency,
        })
    }

    pub fn get_pool_params(env: Env) -> Result<PoolParams, StakingError> {
        storage::get_pool(&env).map(|pool| pool.params)
    }

    pub fn get_user_stats(env: Env, account: Address) -> UserStats {
        storage::get_ledger(&env, &account)
            .as_ref()
            .map(UserStats::from)
            .unwrap_or_default()
    }

    pub fn get_stake_info(env: Env, account: Address, stake_id: u64) -> Option<StakePosition> {
        storage::get_ledger(&env, &account).and_then(|ledger| ledger.positions.get(stake_id))
    }

    pub fn get_admin_info(env: Env) -> Result<AdminCapability, StakingError> {
        storage::get_admin(&env)
    }

    pub fn get_stakers(env: Env) -> Vec<Address> {
        storage::get_stakers(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    // Internal helper functions
    fn load_position(
        env: &Env,
        account: &Address,
        stake_id: u64,
    ) -> Result<(AccountLedger, StakePosition), StakingError> {
        let ledger = storage::get_ledger(env, account).ok_or(StakingError::StakeNotActive)?;
        let position = ledger
            .positions
            .get(stake_id)
            .ok_or(StakingError::StakeNotActive)?;
        Ok((ledger, position))
    }

    fn active_position(
        env: &Env,
        account: &Address,
        stake_id: u64,
    ) -> Result<StakePosition, StakingError> {
        let (_, position) = Self::load_position(env, account, stake_id)?;
        if !position.is_active {
            return Err(StakingError::StakeNotActive);
        }
        Ok(position)
    }
}
