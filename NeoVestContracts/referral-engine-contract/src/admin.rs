use crate::helpers::require_admin;
use crate::interface::AdminOperations;
use crate::types::{DataKey, Error, Network, SettlementMode};
use soroban_sdk::{Address, Env, Symbol};

pub struct AdminModule;

impl AdminOperations for AdminModule {
    fn initialize(env: Env, admin: Address, settlement_mode: SettlementMode) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::EnginePaused, &false);
        env.storage()
            .instance()
            .set(&DataKey::SettlementMode, &settlement_mode);

        env.events().publish(
            (Symbol::new(&env, "engine_initialized"), admin),
            settlement_mode,
        );

        Ok(())
    }

    fn get_admin(env: Env) -> Result<Address, Error> {
        crate::helpers::read_admin(&env)
    }

    fn transfer_admin(env: Env, new_admin: Address) -> Result<(), Error> {
        require_admin(&env)?;
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        env.events()
            .publish((Symbol::new(&env, "admin_transferred"),), new_admin);
        Ok(())
    }

    fn set_operator(env: Env, operator: Address) -> Result<(), Error> {
        require_admin(&env)?;
        env.storage().instance().set(&DataKey::Operator, &operator);
        env.events()
            .publish((Symbol::new(&env, "operator_set"),), operator);
        Ok(())
    }

    fn get_operator(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Operator)
            .ok_or(Error::NotInitialized)
    }

    fn set_settlement_mode(env: Env, mode: SettlementMode) -> Result<(), Error> {
        require_admin(&env)?;
        env.storage()
            .instance()
            .set(&DataKey::SettlementMode, &mode);
        env.events()
            .publish((Symbol::new(&env, "settlement_mode_set"),), mode);
        Ok(())
    }

    fn get_settlement_mode(env: Env) -> Result<SettlementMode, Error> {
        Self::read_settlement_mode(&env)
    }

    fn set_payout_token(env: Env, network: Network, token: Address) -> Result<(), Error> {
        require_admin(&env)?;
        env.storage()
            .instance()
            .set(&DataKey::PayoutToken(network.clone()), &token);
        env.events()
            .publish((Symbol::new(&env, "payout_token_set"), token), network);
        Ok(())
    }

    fn get_payout_token(env: Env, network: Network) -> Result<Address, Error> {
        crate::helpers::get_payout_token(&env, &network)
    }

    fn pause_engine(env: Env) -> Result<(), Error> {
        require_admin(&env)?;
        env.storage().instance().set(&DataKey::EnginePaused, &true);
        Ok(())
    }

    fn resume_engine(env: Env) -> Result<(), Error> {
        require_admin(&env)?;
        env.storage().instance().set(&DataKey::EnginePaused, &false);
        Ok(())
    }

    fn get_paused_state(env: Env) -> Result<bool, Error> {
        Ok(Self::is_engine_paused(&env))
    }
}

// Helper functions
impl AdminModule {
    pub fn is_engine_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::EnginePaused)
            .unwrap_or(false)
    }

    pub fn read_settlement_mode(env: &Env) -> Result<SettlementMode, Error> {
        env.storage()
            .instance()
            .get(&DataKey::SettlementMode)
            .ok_or(Error::NotInitialized)
    }
}
