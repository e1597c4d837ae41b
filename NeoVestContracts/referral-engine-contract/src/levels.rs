use crate::accounts::AccountModule;
use crate::bots::BotModule;
use crate::types::{AccountProfile, CommissionIntent, EarningType};
use soroban_sdk::{Env, Vec};

/// Commission rate per upline distance, in basis points of the purchase
/// amount: 2.0%, 0.75%, 0.5%, 0.25%, 0.15%, 0.1%
pub const LEVEL_RATES_BPS: [u32; 6] = [200, 75, 50, 25, 15, 10];

/// How far up the chain commissions reach
pub const MAX_COMMISSION_LEVELS: u32 = 6;

pub struct LevelRateTable;

impl LevelRateTable {
    /// Rate for an upline distance; 0 outside 1..=6
    pub fn commission_bps(level: u32) -> u32 {
        if level == 0 || level > MAX_COMMISSION_LEVELS {
            return 0;
        }
        LEVEL_RATES_BPS[(level - 1) as usize]
    }

    /// Commission owed at a level, truncating division
    pub fn commission_amount(amount: i128, level: u32) -> i128 {
        (amount * Self::commission_bps(level) as i128) / 10_000
    }

    /// Level 1 is the direct-referral bonus, deeper levels are level income
    pub fn earning_type(level: u32) -> EarningType {
        if level == 1 {
            EarningType::DirectReferral
        } else {
            EarningType::LevelIncome
        }
    }
}

/// Compute commission intents for one qualifying purchase: walk the
/// purchaser's upline and keep ancestors holding an active bot. Levels
/// are positional, so an ineligible ancestor still consumes its slot
/// but produces no record. Amounts of zero after truncation are dropped.
pub fn compute_commissions(
    env: &Env,
    purchaser: &AccountProfile,
    amount: i128,
) -> Vec<CommissionIntent> {
    let chain = AccountModule::upline_chain(env, purchaser, MAX_COMMISSION_LEVELS);
    let now = env.ledger().timestamp();
    let mut intents = Vec::new(env);

    let mut level: u32 = 1;
    for ancestor in chain.iter() {
        if BotModule::has_active_bot_at(env, &ancestor, now) {
            let commission = LevelRateTable::commission_amount(amount, level);
            if commission > 0 {
                intents.push_back(CommissionIntent {
                    recipient: ancestor,
                    level,
                    earning_type: LevelRateTable::earning_type(level),
                    amount: commission,
                });
            }
        }
        level += 1;
    }

    intents
}
