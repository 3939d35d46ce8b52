//! Time-proportional reward accrual.
//!
//! Every pass computes one pool-wide pot for the time elapsed since the last
//! pass and splits it across all active positions in proportion to their
//! principal, using the total staked *before* the triggering operation applies
//! its own delta. All division rounds down, so the credited shares never sum
//! to more than the pot; the remainder stays with the pool.

use soroban_sdk::{log, Env};
use stakeledger_shared::{elapsed_seconds, MAX_BASIS_POINTS, SECONDS_PER_YEAR};

use crate::storage;
use crate::types::{AccountLedger, PoolState, StakePosition};

/// Result of one accrual pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AccrualOutcome {
    pub elapsed: u64,
    pub pot: i128,
    pub credited: i128,
}

/// Pool-wide reward for `elapsed` seconds:
/// `floor(reward_rate * total_staked * elapsed / (10000 * SECONDS_PER_YEAR))`.
///
/// Saturates instead of overflowing.
pub fn reward_pot(reward_rate: u32, total_staked: i128, elapsed: u64) -> i128 {
    if total_staked <= 0 || elapsed == 0 {
        return 0;
    }
    let numerator = (reward_rate as i128)
        .saturating_mul(total_staked)
        .saturating_mul(elapsed as i128);
    numerator / (MAX_BASIS_POINTS * SECONDS_PER_YEAR as i128)
}

/// Proportional share of `pot` for a position holding `amount` out of `total_staked`.
pub fn share_of(amount: i128, pot: i128, total_staked: i128) -> i128 {
    if total_staked <= 0 || amount <= 0 || pot <= 0 {
        return 0;
    }
    amount.saturating_mul(pot) / total_staked
}

/// Credit every active position of `ledger` with its share of `pot`.
/// Returns the total credited to the ledger.
pub fn credit_ledger(ledger: &mut AccountLedger, pot: i128, total_staked: i128) -> i128 {
    let mut credited = 0i128;
    for stake_id in ledger.positions.keys().iter() {
        let Some(mut position) = ledger.positions.get(stake_id) else {
            continue;
        };
        if !position.is_active {
            continue;
        }
        let share = share_of(position.amount, pot, total_staked);
        if share == 0 {
            continue;
        }
        position.rewards = position.rewards.saturating_add(share);
        ledger.positions.set(stake_id, position);
        credited = credited.saturating_add(share);
    }
    ledger.total_unclaimed = ledger.total_unclaimed.saturating_add(credited);
    credited
}

/// Share the next accrual pass at `now` would credit to `position`,
/// without touching any state.
pub fn pending_share(pool: &PoolState, position: &StakePosition, now: u64) -> i128 {
    if !position.is_active {
        return 0;
    }
    let elapsed = elapsed_seconds(pool.last_reward_update, now);
    let pot = reward_pot(pool.params.reward_rate, pool.total_staked, elapsed);
    share_of(position.amount, pot, pool.total_staked)
}

/// Bring every registered account up to date at `now`.
///
/// Zero elapsed time or an empty pool is a no-op: nothing is written and
/// the clock is left where it was.
pub fn accrue(env: &Env, pool: &mut PoolState, now: u64) -> AccrualOutcome {
    let elapsed = elapsed_seconds(pool.last_reward_update, now);
    if elapsed == 0 || pool.total_staked <= 0 {
        return AccrualOutcome::default();
    }

    let total_staked = pool.total_staked;
    let pot = reward_pot(pool.params.reward_rate, total_staked, elapsed);

    let mut credited = 0i128;
    if pot > 0 {
        for account in storage::get_stakers(env).iter() {
            let Some(mut ledger) = storage::get_ledger(env, &account) else {
                continue;
            };
            let amount = credit_ledger(&mut ledger, pot, total_staked);
            if amount > 0 {
                storage::set_ledger(env, &account, &ledger);
                credited = credited.saturating_add(amount);
            }
        }
        log!(env, "Accrued pot {} over {}s, credited {}", pot, elapsed, credited);
    }

    pool.last_reward_update = now;
    pool.total_rewards = pool.total_rewards.saturating_add(pot);

    AccrualOutcome {
        elapsed,
        pot,
        credited,
    }
}
