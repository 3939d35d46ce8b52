use soroban_sdk::{contracttype, symbol_short, Address, Env};
use stakeledger_shared::StakeKind;

use crate::types::EventCounters;

// Events
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub reward_rate: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakeEvent {
    pub account: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub kind: StakeKind,
    pub lock_period: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeEvent {
    pub account: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub fee: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardEvent {
    pub account: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub compounded: bool,
    pub recipient: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateEvent {
    pub delegator: Address,
    pub delegate: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeneficiaryEvent {
    pub account: Address,
    pub beneficiary: Address,
    pub stake_id: u64,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyEvent {
    pub admin: Address,
    pub action_code: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeEvent {
    pub admin: Address,
    pub version: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferredEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

// Publishers

pub fn publish_initialized(env: &Env, event: InitializedEvent) {
    env.events()
        .publish((symbol_short!("init"), event.admin.clone()), event);
}

pub fn publish_stake(env: &Env, counters: &mut EventCounters, event: StakeEvent) {
    counters.stake += 1;
    env.events()
        .publish((symbol_short!("stake"), event.account.clone()), event);
}

pub fn publish_unstake(env: &Env, counters: &mut EventCounters, event: UnstakeEvent) {
    counters.unstake += 1;
    env.events()
        .publish((symbol_short!("unstake"), event.account.clone()), event);
}

pub fn publish_reward(env: &Env, counters: &mut EventCounters, event: RewardEvent) {
    counters.reward += 1;
    env.events()
        .publish((symbol_short!("reward"), event.account.clone()), event);
}

pub fn publish_delegate(env: &Env, counters: &mut EventCounters, event: DelegateEvent) {
    counters.delegate += 1;
    env.events()
        .publish((symbol_short!("delegate"), event.delegator.clone()), event);
}

pub fn publish_beneficiary(env: &Env, counters: &mut EventCounters, event: BeneficiaryEvent) {
    counters.beneficiary += 1;
    env.events()
        .publish((symbol_short!("benefic"), event.account.clone()), event);
}

pub fn publish_emergency(env: &Env, counters: &mut EventCounters, event: EmergencyEvent) {
    counters.emergency += 1;
    env.events()
        .publish((symbol_short!("emergency"), event.admin.clone()), event);
}

pub fn publish_upgrade(env: &Env, counters: &mut EventCounters, event: UpgradeEvent) {
    counters.upgrade += 1;
    env.events()
        .publish((symbol_short!("upgrade"), event.admin.clone()), event);
}

pub fn publish_funded(env: &Env, counters: &mut EventCounters, event: FundedEvent) {
    counters.funded += 1;
    env.events()
        .publish((symbol_short!("funded"), event.funder.clone()), event);
}

pub fn publish_admin_transferred(
    env: &Env,
    counters: &mut EventCounters,
    event: AdminTransferredEvent,
) {
    counters.admin += 1;
    env.events()
        .publish((symbol_short!("admin"), event.old_admin.clone()), event);
}
