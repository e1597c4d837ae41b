use crate::distribution::DistributionModule;
use crate::interface::MetricsOperations;
use crate::types::{DataKey, Error};
use soroban_sdk::{Env, String, Vec};

pub struct MetricsModule;

impl MetricsOperations for MetricsModule {
    fn get_total_accounts(env: Env) -> Result<u32, Error> {
        Ok(env
            .storage()
            .instance()
            .get(&DataKey::TotalAccounts)
            .unwrap_or(0))
    }

    fn get_total_commissions_paid(env: Env) -> Result<i128, Error> {
        Ok(env
            .storage()
            .instance()
            .get(&DataKey::TotalCommissionsPaid)
            .unwrap_or(0))
    }

    fn get_engine_metrics(env: Env) -> Result<Vec<(String, i128)>, Error> {
        let mut metrics = Vec::new(&env);

        let total_accounts = Self::get_total_accounts(env.clone())? as i128;
        metrics.push_back((String::from_str(&env, "total_accounts"), total_accounts));

        let total_commissions = Self::get_total_commissions_paid(env.clone())?;
        metrics.push_back((
            String::from_str(&env, "total_commissions_paid"),
            total_commissions,
        ));

        let open_events = DistributionModule::read_open_events(&env).len() as i128;
        metrics.push_back((String::from_str(&env, "open_events"), open_events));

        let avg_commission = if total_accounts > 0 {
            total_commissions / total_accounts
        } else {
            0
        };
        metrics.push_back((
            String::from_str(&env, "average_commission_per_account"),
            avg_commission,
        ));

        Ok(metrics)
    }
}

// Helper functions
impl MetricsModule {
    pub fn increment_total_accounts(env: &Env) {
        let current: u32 = env
            .storage()
            .instance()
            .get(&DataKey::TotalAccounts)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::TotalAccounts, &(current + 1));
    }

    pub fn add_commissions_paid(env: &Env, amount: i128) {
        let current: i128 = env
            .storage()
            .instance()
            .get(&DataKey::TotalCommissionsPaid)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::TotalCommissionsPaid, &(current + amount));
    }
}
