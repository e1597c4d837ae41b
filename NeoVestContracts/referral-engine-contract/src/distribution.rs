use crate::accounts::AccountModule;
use crate::admin::AdminModule;
use crate::bots::BotModule;
use crate::helpers;
use crate::interface::DistributionOperations;
use crate::levels;
use crate::metrics::MetricsModule;
use crate::types::{
    DataKey, DistributionReport, Earning, EarningStatus, EntryStatus, EntryType, Error,
    LedgerEntry, Package, PackageStatus, SettlementMode, SettlementOutcome,
};
use soroban_sdk::{token, Address, Env, Symbol, Vec};

/// Settlement strategy resolved once per distribution run from the
/// configured mode; both variants settle one recipient at a time
enum Strategy {
    OffChain,
    OnChain(Address), // payout token for the event's rail
}

pub struct DistributionModule;

impl DistributionOperations for DistributionModule {
    fn distribute(env: Env, package_id: u64) -> Result<DistributionReport, Error> {
        helpers::ensure_engine_active(&env)?;
        helpers::require_admin(&env)?;
        Self::run(&env, package_id)
    }

    fn retry_distribution(
        env: Env,
        caller: Address,
        package_id: u64,
    ) -> Result<DistributionReport, Error> {
        helpers::ensure_engine_active(&env)?;
        helpers::require_admin_or_operator(&env, &caller)?;
        Self::run(&env, package_id)
    }

    fn retry_earning(
        env: Env,
        caller: Address,
        earning_id: u64,
    ) -> Result<DistributionReport, Error> {
        helpers::ensure_engine_active(&env)?;
        helpers::require_admin_or_operator(&env, &caller)?;
        let earning = helpers::get_earning(&env, earning_id)?;
        Self::run(&env, earning.event_id)
    }

    fn sweep_open_events(
        env: Env,
        caller: Address,
        older_than_secs: u64,
        limit: u32,
    ) -> Result<Vec<DistributionReport>, Error> {
        helpers::ensure_engine_active(&env)?;
        helpers::require_admin_or_operator(&env, &caller)?;

        let now = env.ledger().timestamp();
        let open = Self::read_open_events(&env);
        let mut reports = Vec::new(&env);

        for event_id in open.iter() {
            if reports.len() >= limit {
                break;
            }
            let package = match helpers::get_package(&env, event_id) {
                Ok(package) => package,
                Err(_) => continue,
            };
            if now - package.activated_at < older_than_secs {
                continue;
            }
            // One event's config problem must not stall the rest of the
            // backlog; the event stays open for a targeted retry.
            if let Ok(report) = Self::run(&env, event_id) {
                reports.push_back(report);
            }
        }

        Ok(reports)
    }

    fn get_distribution_report(env: Env, package_id: u64) -> Result<DistributionReport, Error> {
        helpers::get_package(&env, package_id)?;

        let earning_ids = helpers::get_id_list(&env, &DataKey::EventEarnings(package_id));
        let mut success_count: u32 = 0;
        let mut failed_count: u32 = 0;
        let mut skipped_count: u32 = 0;
        let mut details = Vec::new(&env);

        for earning_id in earning_ids.iter() {
            let earning = helpers::get_earning(&env, earning_id)?;
            match earning.status {
                EarningStatus::Paid | EarningStatus::PaidOffChain => success_count += 1,
                EarningStatus::Failed => failed_count += 1,
                EarningStatus::Pending => skipped_count += 1,
            }
            details.push_back(SettlementOutcome {
                earning_id,
                recipient: earning.recipient,
                level: earning.level,
                amount: earning.amount,
                status: earning.status,
            });
        }

        Ok(DistributionReport {
            event_id: package_id,
            success_count,
            failed_count,
            skipped_count,
            details,
        })
    }

    fn get_open_events(env: Env) -> Result<Vec<u64>, Error> {
        Ok(Self::read_open_events(&env))
    }

    fn get_earning(env: Env, earning_id: u64) -> Result<Earning, Error> {
        helpers::get_earning(&env, earning_id)
    }

    fn get_event_earnings(env: Env, package_id: u64) -> Result<Vec<u64>, Error> {
        helpers::get_package(&env, package_id)?;
        Ok(helpers::get_id_list(
            &env,
            &DataKey::EventEarnings(package_id),
        ))
    }

    fn get_account_earnings(env: Env, account: Address) -> Result<Vec<u64>, Error> {
        if !helpers::account_exists(&env, &account) {
            return Err(Error::AccountNotFound);
        }
        Ok(helpers::get_id_list(
            &env,
            &DataKey::AccountEarnings(account),
        ))
    }

    fn get_ledger_entry(env: Env, entry_id: u64) -> Result<LedgerEntry, Error> {
        helpers::get_entry(&env, entry_id)
    }

    fn get_account_entries(env: Env, account: Address) -> Result<Vec<u64>, Error> {
        if !helpers::account_exists(&env, &account) {
            return Err(Error::AccountNotFound);
        }
        Ok(helpers::get_id_list(&env, &DataKey::AccountEntries(account)))
    }
}

// Helper functions
impl DistributionModule {
    /// Engine entry: compute records on first contact with an event,
    /// then settle whatever is still open. Safe to re-enter; settled
    /// records are terminal and never paid twice.
    pub fn run(env: &Env, package_id: u64) -> Result<DistributionReport, Error> {
        let package = helpers::get_package(env, package_id)?;
        if !matches!(
            package.status,
            PackageStatus::Active | PackageStatus::Expired
        ) {
            return Err(Error::InvalidPackageStatus);
        }

        if !env
            .storage()
            .persistent()
            .has(&DataKey::EventEarnings(package_id))
        {
            Self::create_records(env, &package);
        }

        Self::settle_open_records(env, &package)
    }

    /// Persist one (Earning, LedgerEntry) pair per commission intent,
    /// all PENDING, plus the per-event index. An empty chain still
    /// writes the empty index so the event is marked computed.
    fn create_records(env: &Env, package: &Package) {
        let now = env.ledger().timestamp();
        let mut earning_ids: Vec<u64> = Vec::new(env);

        // A missing purchaser profile degrades to an empty chain
        let intents = match helpers::get_profile(env, &package.owner) {
            Ok(purchaser) => levels::compute_commissions(env, &purchaser, package.amount),
            Err(_) => Vec::new(env),
        };

        for intent in intents.iter() {
            let entry_id = helpers::next_id(env, &DataKey::NextEntryId);
            let earning_id = helpers::next_id(env, &DataKey::NextEarningId);

            let entry = LedgerEntry {
                id: entry_id,
                account: intent.recipient.clone(),
                entry_type: EntryType::Commission,
                amount: intent.amount,
                status: EntryStatus::Pending,
                network: package.network.clone(),
                settlement_ref: None,
                created_at: now,
                settled_at: None,
            };
            let earning = Earning {
                id: earning_id,
                recipient: intent.recipient.clone(),
                event_id: package.id,
                earning_type: intent.earning_type.clone(),
                level: intent.level,
                amount: intent.amount,
                status: EarningStatus::Pending,
                entry_id,
                created_at: now,
                settled_at: None,
            };

            env.storage()
                .persistent()
                .set(&DataKey::Entry(entry_id), &entry);
            env.storage()
                .persistent()
                .set(&DataKey::Earning(earning_id), &earning);
            helpers::push_id(
                env,
                &DataKey::AccountEarnings(intent.recipient.clone()),
                earning_id,
            );
            helpers::push_id(
                env,
                &DataKey::AccountEntries(intent.recipient.clone()),
                entry_id,
            );
            earning_ids.push_back(earning_id);

            env.events().publish(
                (
                    Symbol::new(env, "commission_recorded"),
                    intent.recipient.clone(),
                ),
                (package.id, intent.level, intent.amount),
            );
        }

        env.storage()
            .persistent()
            .set(&DataKey::EventEarnings(package.id), &earning_ids);

        if !earning_ids.is_empty() {
            Self::add_open_event(env, package.id);
        }
    }

    fn settle_open_records(env: &Env, package: &Package) -> Result<DistributionReport, Error> {
        let earning_ids = helpers::get_id_list(env, &DataKey::EventEarnings(package.id));

        // On-chain settlement without a token configured for the rail
        // is a configuration error: fail whole, settle nothing
        let strategy = match AdminModule::read_settlement_mode(env)? {
            SettlementMode::OffChain => Strategy::OffChain,
            SettlementMode::OnChain => {
                Strategy::OnChain(helpers::get_payout_token(env, &package.network)?)
            }
        };

        let now = env.ledger().timestamp();
        let mut success_count: u32 = 0;
        let mut failed_count: u32 = 0;
        let mut skipped_count: u32 = 0;
        let mut details = Vec::new(env);

        for earning_id in earning_ids.iter() {
            let mut earning = helpers::get_earning(env, earning_id)?;

            if matches!(
                earning.status,
                EarningStatus::Paid | EarningStatus::PaidOffChain
            ) {
                skipped_count += 1;
                details.push_back(SettlementOutcome {
                    earning_id,
                    recipient: earning.recipient,
                    level: earning.level,
                    amount: earning.amount,
                    status: earning.status,
                });
                continue;
            }

            let settled = Self::settle_one(env, package, &mut earning, &strategy, now)?;
            if settled {
                success_count += 1;
            } else {
                failed_count += 1;
            }
            details.push_back(SettlementOutcome {
                earning_id,
                recipient: earning.recipient.clone(),
                level: earning.level,
                amount: earning.amount,
                status: earning.status.clone(),
            });
        }

        if failed_count > 0 {
            Self::add_open_event(env, package.id);
        } else {
            Self::remove_open_event(env, package.id);
        }

        env.events().publish(
            (Symbol::new(env, "distribution_run"), package.id),
            (success_count, failed_count, skipped_count),
        );

        Ok(DistributionReport {
            event_id: package.id,
            success_count,
            failed_count,
            skipped_count,
            details,
        })
    }

    /// Settle one open record; a false return means the record was
    /// marked FAILED and stays retryable. Per-recipient problems never
    /// abort the run.
    fn settle_one(
        env: &Env,
        package: &Package,
        earning: &mut Earning,
        strategy: &Strategy,
        now: u64,
    ) -> Result<bool, Error> {
        // Eligibility is re-checked against current bot state; a lapse
        // since computation fails the record instead of paying on
        // stale rights
        if !BotModule::has_active_bot_at(env, &earning.recipient, now) {
            Self::mark_failed(env, earning, now)?;
            return Ok(false);
        }

        match strategy {
            Strategy::OffChain => {
                Self::mark_settled(env, earning, EarningStatus::PaidOffChain, None, now)?;
                Ok(true)
            }
            Strategy::OnChain(token_id) => {
                let wallet = match AccountModule::read_payout_wallet(
                    env,
                    &earning.recipient,
                    &package.network,
                ) {
                    Some(wallet) => wallet,
                    None => {
                        Self::mark_failed(env, earning, now)?;
                        return Ok(false);
                    }
                };

                let client = token::Client::new(env, token_id);
                let result = client.try_transfer(
                    &env.current_contract_address(),
                    &wallet,
                    &earning.amount,
                );
                match result {
                    Ok(Ok(())) => {
                        Self::mark_settled(
                            env,
                            earning,
                            EarningStatus::Paid,
                            Some(env.ledger().sequence()),
                            now,
                        )?;
                        Ok(true)
                    }
                    _ => {
                        Self::mark_failed(env, earning, now)?;
                        Ok(false)
                    }
                }
            }
        }
    }

    fn mark_settled(
        env: &Env,
        earning: &mut Earning,
        status: EarningStatus,
        settlement_ref: Option<u32>,
        now: u64,
    ) -> Result<(), Error> {
        earning.status = status;
        earning.settled_at = Some(now);
        env.storage()
            .persistent()
            .set(&DataKey::Earning(earning.id), earning);

        let mut entry = helpers::get_entry(env, earning.entry_id)?;
        entry.status = EntryStatus::Completed;
        entry.settlement_ref = settlement_ref;
        entry.settled_at = Some(now);
        env.storage()
            .persistent()
            .set(&DataKey::Entry(entry.id), &entry);

        MetricsModule::add_commissions_paid(env, earning.amount);

        env.events().publish(
            (
                Symbol::new(env, "commission_settled"),
                earning.recipient.clone(),
            ),
            (earning.id, earning.event_id, earning.level, earning.amount),
        );

        Ok(())
    }

    fn mark_failed(env: &Env, earning: &mut Earning, now: u64) -> Result<(), Error> {
        earning.status = EarningStatus::Failed;
        earning.settled_at = Some(now);
        env.storage()
            .persistent()
            .set(&DataKey::Earning(earning.id), earning);

        let mut entry = helpers::get_entry(env, earning.entry_id)?;
        entry.status = EntryStatus::Failed;
        entry.settled_at = Some(now);
        env.storage()
            .persistent()
            .set(&DataKey::Entry(entry.id), &entry);

        env.events().publish(
            (
                Symbol::new(env, "commission_failed"),
                earning.recipient.clone(),
            ),
            (earning.id, earning.event_id, earning.level),
        );

        Ok(())
    }

    pub fn read_open_events(env: &Env) -> Vec<u64> {
        helpers::get_id_list(env, &DataKey::OpenEvents)
    }

    fn add_open_event(env: &Env, event_id: u64) {
        let mut open = Self::read_open_events(env);
        if !open.contains(&event_id) {
            open.push_back(event_id);
            env.storage().persistent().set(&DataKey::OpenEvents, &open);
        }
    }

    fn remove_open_event(env: &Env, event_id: u64) {
        let mut open = Self::read_open_events(env);
        if let Some(pos) = open.first_index_of(&event_id) {
            open.remove(pos);
            env.storage().persistent().set(&DataKey::OpenEvents, &open);
        }
    }
}
