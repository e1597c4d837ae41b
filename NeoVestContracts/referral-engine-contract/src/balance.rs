use crate::accounts::AccountModule;
use crate::admin::AdminModule;
use crate::helpers;
use crate::interface::BalanceOperations;
use crate::types::{
    BalanceBreakdown, DataKey, EarningStatus, EarningType, EntryStatus, EntryType, Error,
    LedgerEntry, Network, PackageStatus, SettlementMode,
};
use soroban_sdk::{token, Address, Env, Symbol};

pub struct BalanceModule;

impl BalanceOperations for BalanceModule {
    fn get_withdrawable_balance(env: Env, account: Address) -> Result<BalanceBreakdown, Error> {
        Ok(Self::compute_balance(&env, &account))
    }

    fn request_withdrawal(
        env: Env,
        account: Address,
        amount: i128,
        network: Network,
    ) -> Result<u64, Error> {
        helpers::ensure_engine_active(&env)?;
        account.require_auth();

        if !helpers::account_exists(&env, &account) {
            return Err(Error::AccountNotFound);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = Self::compute_balance(&env, &account);
        if amount > balance.total_balance {
            return Err(Error::InsufficientBalance);
        }

        let entry_id = helpers::next_id(&env, &DataKey::NextEntryId);
        let entry = LedgerEntry {
            id: entry_id,
            account: account.clone(),
            entry_type: EntryType::Withdrawal,
            amount,
            status: EntryStatus::Pending,
            network: network.clone(),
            settlement_ref: None,
            created_at: env.ledger().timestamp(),
            settled_at: None,
        };
        env.storage()
            .persistent()
            .set(&DataKey::Entry(entry_id), &entry);
        helpers::push_id(&env, &DataKey::AccountEntries(account.clone()), entry_id);

        env.events().publish(
            (Symbol::new(&env, "withdrawal_requested"), account),
            (entry_id, amount, network),
        );

        Ok(entry_id)
    }

    fn settle_withdrawal(env: Env, entry_id: u64) -> Result<(), Error> {
        helpers::ensure_engine_active(&env)?;
        helpers::require_admin(&env)?;

        let mut entry = helpers::get_entry(&env, entry_id)?;
        if entry.entry_type != EntryType::Withdrawal || entry.status != EntryStatus::Pending {
            return Err(Error::InvalidEntryStatus);
        }

        let now = env.ledger().timestamp();
        let settled = match AdminModule::read_settlement_mode(&env)? {
            SettlementMode::OffChain => {
                entry.status = EntryStatus::Completed;
                true
            }
            SettlementMode::OnChain => {
                let token_id = helpers::get_payout_token(&env, &entry.network)?;
                match AccountModule::read_payout_wallet(&env, &entry.account, &entry.network) {
                    Some(wallet) => {
                        let client = token::Client::new(&env, &token_id);
                        let result = client.try_transfer(
                            &env.current_contract_address(),
                            &wallet,
                            &entry.amount,
                        );
                        match result {
                            Ok(Ok(())) => {
                                entry.status = EntryStatus::Completed;
                                entry.settlement_ref = Some(env.ledger().sequence());
                                true
                            }
                            _ => {
                                entry.status = EntryStatus::Failed;
                                false
                            }
                        }
                    }
                    None => {
                        entry.status = EntryStatus::Failed;
                        false
                    }
                }
            }
        };

        // A failed settlement releases the hold on the funds
        entry.settled_at = Some(now);
        env.storage()
            .persistent()
            .set(&DataKey::Entry(entry_id), &entry);

        let topic = if settled {
            Symbol::new(&env, "withdrawal_settled")
        } else {
            Symbol::new(&env, "withdrawal_failed")
        };
        env.events()
            .publish((topic, entry.account), (entry_id, entry.amount));

        Ok(())
    }
}

// Helper functions
impl BalanceModule {
    /// Recompute the breakdown from ledger state on every read. An
    /// unknown account has empty indexes and falls out zeroed; an
    /// unreadable row degrades to zero instead of failing the query.
    pub fn compute_balance(env: &Env, account: &Address) -> BalanceBreakdown {
        let mut roi_balance: i128 = 0;
        let mut referral_balance: i128 = 0;
        let mut level_balance: i128 = 0;
        let mut total_withdrawn: i128 = 0;
        let mut held: i128 = 0;
        let mut locked_capital: i128 = 0;

        let earning_ids = helpers::get_id_list(env, &DataKey::AccountEarnings(account.clone()));
        for earning_id in earning_ids.iter() {
            if let Ok(earning) = helpers::get_earning(env, earning_id) {
                if matches!(
                    earning.status,
                    EarningStatus::Paid | EarningStatus::PaidOffChain
                ) {
                    match earning.earning_type {
                        EarningType::DirectReferral => referral_balance += earning.amount,
                        EarningType::LevelIncome => level_balance += earning.amount,
                    }
                }
            }
        }

        let entry_ids = helpers::get_id_list(env, &DataKey::AccountEntries(account.clone()));
        for entry_id in entry_ids.iter() {
            if let Ok(entry) = helpers::get_entry(env, entry_id) {
                match entry.entry_type {
                    EntryType::RoiPayout => {
                        if entry.status == EntryStatus::Completed {
                            roi_balance += entry.amount;
                        }
                    }
                    EntryType::Withdrawal => match entry.status {
                        EntryStatus::Completed => total_withdrawn += entry.amount,
                        EntryStatus::Pending => held += entry.amount,
                        EntryStatus::Failed => {}
                    },
                    EntryType::Commission => {}
                }
            }
        }

        let package_ids = helpers::get_id_list(env, &DataKey::AccountPackages(account.clone()));
        for package_id in package_ids.iter() {
            if let Ok(package) = helpers::get_package(env, package_id) {
                if package.status == PackageStatus::Active {
                    locked_capital += package.amount;
                }
            }
        }

        let total_balance =
            roi_balance + referral_balance + level_balance - total_withdrawn - held;

        BalanceBreakdown {
            roi_balance,
            referral_balance,
            level_balance,
            total_withdrawn,
            total_balance,
            locked_capital,
        }
    }
}
