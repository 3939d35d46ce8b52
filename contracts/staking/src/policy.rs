use soroban_sdk::Address;
use stakeledger_shared::validate_basis_points;

use crate::errors::StakingError;
use crate::types::{AdminCapability, PoolParams};

/// Gate for every non-admin mutating operation.
pub fn check(cap: &AdminCapability) -> Result<(), StakingError> {
    if cap.paused {
        return Err(StakingError::PoolPaused);
    }
    if cap.emergency {
        return Err(StakingError::EmergencyActive);
    }
    Ok(())
}

pub fn require_admin(cap: &AdminCapability, caller: &Address) -> Result<(), StakingError> {
    if cap.admin != *caller {
        return Err(StakingError::Unauthorized);
    }
    Ok(())
}

/// The first upgrade is never throttled; later ones wait out `upgrade_cooldown`.
pub fn check_upgrade_window(cap: &AdminCapability, now: u64) -> Result<(), StakingError> {
    match cap.last_upgrade {
        Some(last) if now < last.saturating_add(cap.upgrade_cooldown) => {
            Err(StakingError::UpgradeCooldownActive)
        }
        _ => Ok(()),
    }
}

pub fn validate_params(params: &PoolParams) -> Result<(), StakingError> {
    if !validate_basis_points(params.reward_rate) {
        return Err(StakingError::RewardRateOutOfRange);
    }
    if !validate_basis_points(params.withdrawal_fee) {
        return Err(StakingError::WithdrawalFeeOutOfRange);
    }
    if !validate_basis_points(params.slash_rate) {
        return Err(StakingError::SlashRateOutOfRange);
    }
    if params.min_stake <= 0 || params.max_stake < params.min_stake {
        return Err(StakingError::StakeBoundsOutOfRange);
    }
    Ok(())
}
