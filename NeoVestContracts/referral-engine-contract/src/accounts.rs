use crate::helpers;
use crate::interface::AccountOperations;
use crate::levels::MAX_COMMISSION_LEVELS;
use crate::metrics::MetricsModule;
use crate::types::{AccountProfile, DataKey, Error, Network};
use soroban_sdk::{Address, Env, Symbol, Vec};

pub struct AccountModule;

impl AccountOperations for AccountModule {
    fn register(
        env: Env,
        account: Address,
        referral_code: Symbol,
        referred_by: Option<Symbol>,
    ) -> Result<(), Error> {
        helpers::ensure_engine_active(&env)?;
        account.require_auth();

        if helpers::account_exists(&env, &account) {
            return Err(Error::AlreadyRegistered);
        }
        if env
            .storage()
            .persistent()
            .has(&DataKey::CodeIndex(referral_code.clone()))
        {
            return Err(Error::CodeAlreadyTaken);
        }

        if let Some(code) = &referred_by {
            if *code == referral_code {
                return Err(Error::SelfReferralNotAllowed);
            }
            let referrer: Address = env
                .storage()
                .persistent()
                .get(&DataKey::CodeIndex(code.clone()))
                .ok_or(Error::ReferrerNotFound)?;

            let mut referrer_profile = helpers::get_profile(&env, &referrer)?;
            referrer_profile.direct_referrals += 1;
            env.storage()
                .persistent()
                .set(&DataKey::Profile(referrer), &referrer_profile);
        }

        let profile = AccountProfile {
            address: account.clone(),
            referral_code: referral_code.clone(),
            referred_by: referred_by.clone(),
            joined_at: env.ledger().timestamp(),
            direct_referrals: 0,
        };

        env.storage()
            .persistent()
            .set(&DataKey::Profile(account.clone()), &profile);
        env.storage()
            .persistent()
            .set(&DataKey::CodeIndex(referral_code.clone()), &account);

        MetricsModule::increment_total_accounts(&env);

        env.events().publish(
            (Symbol::new(&env, "account_registered"), account),
            (referral_code, referred_by),
        );

        Ok(())
    }

    fn is_registered(env: Env, account: Address) -> Result<bool, Error> {
        Ok(helpers::account_exists(&env, &account))
    }

    fn get_profile(env: Env, account: Address) -> Result<AccountProfile, Error> {
        helpers::get_profile(&env, &account)
    }

    fn resolve_code(env: Env, referral_code: Symbol) -> Result<Address, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::CodeIndex(referral_code))
            .ok_or(Error::ReferrerNotFound)
    }

    fn get_upline_chain(
        env: Env,
        account: Address,
        max_levels: u32,
    ) -> Result<Vec<Address>, Error> {
        let profile = helpers::get_profile(&env, &account)?;
        Ok(Self::upline_chain(
            &env,
            &profile,
            max_levels.min(MAX_COMMISSION_LEVELS),
        ))
    }

    fn set_payout_wallet(
        env: Env,
        account: Address,
        network: Network,
        wallet: Address,
    ) -> Result<(), Error> {
        helpers::ensure_engine_active(&env)?;
        account.require_auth();

        if !helpers::account_exists(&env, &account) {
            return Err(Error::AccountNotFound);
        }

        env.storage().persistent().set(
            &DataKey::PayoutWallet(account.clone(), network.clone()),
            &wallet,
        );

        env.events().publish(
            (Symbol::new(&env, "payout_wallet_set"), account),
            (network, wallet),
        );

        Ok(())
    }

    fn get_payout_wallet(env: Env, account: Address, network: Network) -> Result<Address, Error> {
        if !helpers::account_exists(&env, &account) {
            return Err(Error::AccountNotFound);
        }
        Self::read_payout_wallet(&env, &account, &network).ok_or(Error::PayoutWalletNotConfigured)
    }
}

// Helper functions
impl AccountModule {
    /// Walk referrer edges up from `start`, nearest ancestor first.
    /// Bounded at `max_levels` hops; a dangling or self-pointing edge
    /// ends the chain without error.
    pub fn upline_chain(env: &Env, start: &AccountProfile, max_levels: u32) -> Vec<Address> {
        let mut chain = Vec::new(env);
        let mut current = start.clone();
        let mut remaining = max_levels;

        while remaining > 0 {
            let code = match current.referred_by.clone() {
                Some(code) => code,
                None => break,
            };
            let ancestor: Address = match env.storage().persistent().get(&DataKey::CodeIndex(code))
            {
                Some(addr) => addr,
                None => break,
            };
            if ancestor == current.address {
                break;
            }
            let ancestor_profile: AccountProfile = match env
                .storage()
                .persistent()
                .get(&DataKey::Profile(ancestor.clone()))
            {
                Some(profile) => profile,
                None => break,
            };

            chain.push_back(ancestor);
            current = ancestor_profile;
            remaining -= 1;
        }

        chain
    }

    pub fn read_payout_wallet(env: &Env, account: &Address, network: &Network) -> Option<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::PayoutWallet(account.clone(), network.clone()))
    }
}
