use soroban_sdk::contracterror;

/// Error codes returned by the staking pool.
///
/// ## Code Ranges
/// - 1-9: lifecycle
/// - 10-29: input validation
/// - 30-49: stake state
/// - 50-69: pool policy
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StakingError {
    // ========== Lifecycle ==========
    NotInitialized = 1,
    AlreadyInitialized = 2,

    // ========== Validation ==========
    InvalidAmount = 10,
    BelowMinStake = 11,
    AboveMaxStake = 12,
    InvalidStakeType = 13,
    InvalidApy = 14,
    InvalidDelegate = 15,
    InvalidBeneficiary = 16,
    RewardRateOutOfRange = 17,
    WithdrawalFeeOutOfRange = 18,
    SlashRateOutOfRange = 19,
    StakeBoundsOutOfRange = 20,
    NumericOverflow = 21,

    // ========== Stake State ==========
    StakeNotActive = 30,
    InsufficientBalance = 31,
    LockPeriodNotElapsed = 32,
    NoRewardsAvailable = 33,
    AlreadyDelegated = 34,
    BeneficiaryAlreadySet = 35,
    CooldownActive = 36,
    CompoundTooFrequent = 37,
    InsufficientRewards = 38,

    // ========== Policy ==========
    PoolPaused = 50,
    EmergencyActive = 51,
    Unauthorized = 52,
    UpgradeCooldownActive = 53,
}
