#![no_std]
//! Shared data types used across the StakeLedger contracts.
//! Keeps the on-chain representation of stake kinds and basis-point maths in one place.

use soroban_sdk::contracttype;

// ============================================================================
// Core Business Types
// ============================================================================

/// How a stake lot may be withdrawn.
///
/// Crosses the contract boundary as a numeric code (see [`StakeKind::from_code`])
/// so that an unknown kind is a recoverable validation error rather than a
/// decoding trap.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StakeKind {
    Flexible,
    Locked,
    Fixed,
}

impl StakeKind {
    pub const FLEXIBLE_CODE: u32 = 0;
    pub const LOCKED_CODE: u32 = 1;
    pub const FIXED_CODE: u32 = 2;

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            Self::FLEXIBLE_CODE => Some(StakeKind::Flexible),
            Self::LOCKED_CODE => Some(StakeKind::Locked),
            Self::FIXED_CODE => Some(StakeKind::Fixed),
            _ => None,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            StakeKind::Flexible => Self::FLEXIBLE_CODE,
            StakeKind::Locked => Self::LOCKED_CODE,
            StakeKind::Fixed => Self::FIXED_CODE,
        }
    }
}

// ============================================================================
// Emergency Action Codes
// ============================================================================

pub const ACTION_UNPAUSE: u32 = 0;
pub const ACTION_PAUSE: u32 = 1;
pub const ACTION_EMERGENCY_ON: u32 = 2;
pub const ACTION_EMERGENCY_OFF: u32 = 3;

// ============================================================================
// Utility Functions for Basis Points and Validation
// ============================================================================

/// Portion of `amount` represented by `basis_points`, rounded down.
/// Returns `None` on overflow.
pub fn apply_basis_points(amount: i128, basis_points: u32) -> Option<i128> {
    amount
        .checked_mul(basis_points as i128)?
        .checked_div(MAX_BASIS_POINTS)
}

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: i128) -> bool {
    amount > 0
}

/// Validate that a rate is within valid range (0-100%)
pub fn validate_basis_points(basis_points: u32) -> bool {
    basis_points as i128 <= MAX_BASIS_POINTS
}

/// Seconds between two ledger timestamps, zero if the clock did not advance
pub fn elapsed_seconds(from: u64, to: u64) -> u64 {
    to.saturating_sub(from)
}

// ============================================================================
// Constants
// ============================================================================

/// Basis points representing 100% (10000 basis points = 100%)
pub const MAX_BASIS_POINTS: i128 = 10000;

/// Seconds in a day
pub const SECONDS_PER_DAY: u64 = 86400;

/// Seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;
