use crate::helpers;
use crate::interface::BotOperations;
use crate::types::{BotActivation, BotStatus, BotTier, DataKey, Error, Network};
use soroban_sdk::{Address, Env, String, Symbol, Vec};

/// Earning-window length per tier
const NEO_VALIDITY_SECS: u64 = 180 * 24 * 60 * 60;
const NEURAL_VALIDITY_SECS: u64 = 360 * 24 * 60 * 60;
const ORACLE_VALIDITY_SECS: u64 = 720 * 24 * 60 * 60;

pub struct BotModule;

impl BotOperations for BotModule {
    fn request_bot(
        env: Env,
        account: Address,
        tier: BotTier,
        network: Network,
        deposit_ref: String,
    ) -> Result<u32, Error> {
        helpers::ensure_engine_active(&env)?;
        account.require_auth();

        if !helpers::account_exists(&env, &account) {
            return Err(Error::AccountNotFound);
        }

        let mut bots = Self::read_bots(&env, &account);
        bots.push_back(BotActivation {
            tier: tier.clone(),
            status: BotStatus::Pending,
            network,
            deposit_ref,
            requested_at: env.ledger().timestamp(),
            activated_at: 0,
            expires_at: 0,
        });
        let bot_index = bots.len() - 1;
        env.storage()
            .persistent()
            .set(&DataKey::Bots(account.clone()), &bots);

        env.events().publish(
            (Symbol::new(&env, "bot_requested"), account),
            (bot_index, tier),
        );

        Ok(bot_index)
    }

    fn approve_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error> {
        helpers::require_admin(&env)?;

        let mut bots = Self::read_bots(&env, &account);
        let mut bot = bots.get(bot_index).ok_or(Error::BotNotFound)?;
        if bot.status != BotStatus::Pending {
            return Err(Error::InvalidBotStatus);
        }

        let now = env.ledger().timestamp();
        bot.status = BotStatus::Active;
        bot.activated_at = now;
        bot.expires_at = now + Self::validity_secs(&bot.tier);

        bots.set(bot_index, bot.clone());
        env.storage()
            .persistent()
            .set(&DataKey::Bots(account.clone()), &bots);

        env.events().publish(
            (Symbol::new(&env, "bot_approved"), account),
            (bot_index, bot.tier, bot.expires_at),
        );

        Ok(())
    }

    fn reject_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error> {
        helpers::require_admin(&env)?;

        let mut bots = Self::read_bots(&env, &account);
        let mut bot = bots.get(bot_index).ok_or(Error::BotNotFound)?;
        if bot.status != BotStatus::Pending {
            return Err(Error::InvalidBotStatus);
        }
        bot.status = BotStatus::Rejected;
        bots.set(bot_index, bot);
        env.storage()
            .persistent()
            .set(&DataKey::Bots(account.clone()), &bots);

        env.events()
            .publish((Symbol::new(&env, "bot_rejected"), account), bot_index);

        Ok(())
    }

    fn suspend_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error> {
        helpers::require_admin(&env)?;

        let mut bots = Self::read_bots(&env, &account);
        let mut bot = bots.get(bot_index).ok_or(Error::BotNotFound)?;
        if bot.status != BotStatus::Active {
            return Err(Error::InvalidBotStatus);
        }
        bot.status = BotStatus::Suspended;
        bots.set(bot_index, bot);
        env.storage()
            .persistent()
            .set(&DataKey::Bots(account.clone()), &bots);

        env.events()
            .publish((Symbol::new(&env, "bot_suspended"), account), bot_index);

        Ok(())
    }

    fn expire_bots(env: Env, account: Address) -> Result<u32, Error> {
        let now = env.ledger().timestamp();
        let mut bots = Self::read_bots(&env, &account);
        let mut flipped: u32 = 0;

        for i in 0..bots.len() {
            if let Some(mut bot) = bots.get(i) {
                if bot.status == BotStatus::Active && bot.expires_at <= now {
                    bot.status = BotStatus::Expired;
                    bots.set(i, bot);
                    flipped += 1;
                }
            }
        }

        if flipped > 0 {
            env.storage()
                .persistent()
                .set(&DataKey::Bots(account.clone()), &bots);
            env.events()
                .publish((Symbol::new(&env, "bots_expired"), account), flipped);
        }

        Ok(flipped)
    }

    fn has_active_bot(env: Env, account: Address) -> Result<bool, Error> {
        Ok(Self::has_active_bot_at(
            &env,
            &account,
            env.ledger().timestamp(),
        ))
    }

    fn get_bots(env: Env, account: Address) -> Result<Vec<BotActivation>, Error> {
        if !helpers::account_exists(&env, &account) {
            return Err(Error::AccountNotFound);
        }
        Ok(Self::read_bots(&env, &account))
    }
}

// Helper functions
impl BotModule {
    /// Earning rights at instant `at`: at least one ACTIVE activation
    /// whose window covers it. Status flags that lag behind the clock
    /// (an elapsed window not yet swept) do not grant rights.
    pub fn has_active_bot_at(env: &Env, account: &Address, at: u64) -> bool {
        let bots = Self::read_bots(env, account);
        for bot in bots.iter() {
            if bot.status == BotStatus::Active && bot.activated_at <= at && at < bot.expires_at {
                return true;
            }
        }
        false
    }

    pub fn read_bots(env: &Env, account: &Address) -> Vec<BotActivation> {
        env.storage()
            .persistent()
            .get(&DataKey::Bots(account.clone()))
            .unwrap_or_else(|| Vec::new(env))
    }

    fn validity_secs(tier: &BotTier) -> u64 {
        match tier {
            BotTier::Neo => NEO_VALIDITY_SECS,
            BotTier::Neural => NEURAL_VALIDITY_SECS,
            BotTier::Oracle => ORACLE_VALIDITY_SECS,
        }
    }
}
