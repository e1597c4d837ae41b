#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, String, Symbol, Vec};

mod accounts;
mod admin;
mod balance;
mod bots;
mod distribution;
mod helpers;
mod interface;
mod levels;
mod metrics;
mod packages;
mod types;

use accounts::AccountModule;
use admin::AdminModule;
use balance::BalanceModule;
use bots::BotModule;
use distribution::DistributionModule;
use interface::*;
use metrics::MetricsModule;
use packages::PackageModule;
use types::*;

#[contract]
pub struct ReferralEngineContract;

#[contractimpl]
impl ReferralEngineContract {
    /// Initializes the earnings engine with an administrator and the
    /// settlement strategy commissions will be paid under
    ///
    /// # Arguments
    /// * `admin` - The address of the engine administrator
    /// * `settlement_mode` - On-chain token transfers or off-chain ledger credits
    pub fn initialize(
        env: Env,
        admin: Address,
        settlement_mode: SettlementMode,
    ) -> Result<(), Error> {
        AdminModule::initialize(env, admin, settlement_mode)
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, Error> {
        AdminModule::get_admin(env)
    }

    /// Transfers admin rights to a new address
    ///
    /// # Arguments
    /// * `new_admin` - The address of the new administrator
    pub fn transfer_admin(env: Env, new_admin: Address) -> Result<(), Error> {
        AdminModule::transfer_admin(env, new_admin)
    }

    /// Sets the keeper allowed to run retries, sweeps and ROI crediting
    ///
    /// # Arguments
    /// * `operator` - The address of the keeper
    pub fn set_operator(env: Env, operator: Address) -> Result<(), Error> {
        AdminModule::set_operator(env, operator)
    }

    /// Get the configured keeper
    pub fn get_operator(env: Env) -> Result<Address, Error> {
        AdminModule::get_operator(env)
    }

    /// Switches between on-chain and off-chain settlement
    ///
    /// # Arguments
    /// * `mode` - The new settlement strategy
    pub fn set_settlement_mode(env: Env, mode: SettlementMode) -> Result<(), Error> {
        AdminModule::set_settlement_mode(env, mode)
    }

    /// Get the configured settlement strategy
    pub fn get_settlement_mode(env: Env) -> Result<SettlementMode, Error> {
        AdminModule::get_settlement_mode(env)
    }

    /// Configures the stablecoin contract used for payouts on one rail
    ///
    /// # Arguments
    /// * `network` - The settlement rail
    /// * `token` - The address of the stablecoin contract
    pub fn set_payout_token(env: Env, network: Network, token: Address) -> Result<(), Error> {
        AdminModule::set_payout_token(env, network, token)
    }

    /// Get the stablecoin contract for one rail
    pub fn get_payout_token(env: Env, network: Network) -> Result<Address, Error> {
        AdminModule::get_payout_token(env, network)
    }

    /// Pauses all engine operations
    pub fn pause_engine(env: Env) -> Result<(), Error> {
        AdminModule::pause_engine(env)
    }

    /// Resumes engine operations after being paused
    pub fn resume_engine(env: Env) -> Result<(), Error> {
        AdminModule::resume_engine(env)
    }

    /// Check if the engine is paused
    pub fn get_paused_state(env: Env) -> Result<bool, Error> {
        AdminModule::get_paused_state(env)
    }

    /// Registers a new account with a unique referral code and an
    /// optional recruiter code
    ///
    /// # Arguments
    /// * `account` - The address of the new account
    /// * `referral_code` - The unique code the account will hand to recruits
    /// * `referred_by` - The recruiter's referral code, if recruited
    pub fn register(
        env: Env,
        account: Address,
        referral_code: Symbol,
        referred_by: Option<Symbol>,
    ) -> Result<(), Error> {
        AccountModule::register(env, account, referral_code, referred_by)
    }

    /// Checks if an account is registered
    pub fn is_registered(env: Env, account: Address) -> Result<bool, Error> {
        AccountModule::is_registered(env, account)
    }

    /// Retrieves an account's profile
    pub fn get_profile(env: Env, account: Address) -> Result<AccountProfile, Error> {
        AccountModule::get_profile(env, account)
    }

    /// Resolves a referral code to the account owning it
    pub fn resolve_code(env: Env, referral_code: Symbol) -> Result<Address, Error> {
        AccountModule::resolve_code(env, referral_code)
    }

    /// Walks an account's upline chain, nearest ancestor first
    ///
    /// # Arguments
    /// * `account` - The address of the starting account
    /// * `max_levels` - How many ancestors to resolve, capped at six
    pub fn get_upline_chain(
        env: Env,
        account: Address,
        max_levels: u32,
    ) -> Result<Vec<Address>, Error> {
        AccountModule::get_upline_chain(env, account, max_levels)
    }

    /// Sets the caller's payout address for one settlement rail
    ///
    /// # Arguments
    /// * `account` - The account being configured
    /// * `network` - The settlement rail
    /// * `wallet` - The payout address on that rail
    pub fn set_payout_wallet(
        env: Env,
        account: Address,
        network: Network,
        wallet: Address,
    ) -> Result<(), Error> {
        AccountModule::set_payout_wallet(env, account, network, wallet)
    }

    /// Get an account's payout address for one rail
    pub fn get_payout_wallet(
        env: Env,
        account: Address,
        network: Network,
    ) -> Result<Address, Error> {
        AccountModule::get_payout_wallet(env, account, network)
    }

    /// Reports a bot purchase deposit; the activation starts pending
    /// admin approval
    ///
    /// # Arguments
    /// * `account` - The purchasing account
    /// * `tier` - The purchased bot tier
    /// * `network` - The rail the deposit arrived on
    /// * `deposit_ref` - The external deposit transaction hash
    pub fn request_bot(
        env: Env,
        account: Address,
        tier: BotTier,
        network: Network,
        deposit_ref: String,
    ) -> Result<u32, Error> {
        BotModule::request_bot(env, account, tier, network, deposit_ref)
    }

    /// Approves a pending bot activation, opening its earning window
    ///
    /// # Arguments
    /// * `account` - The account that requested the bot
    /// * `bot_index` - The index of the activation in the account's list
    pub fn approve_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error> {
        BotModule::approve_bot(env, account, bot_index)
    }

    /// Rejects a pending bot activation
    ///
    /// # Arguments
    /// * `account` - The account that requested the bot
    /// * `bot_index` - The index of the activation in the account's list
    pub fn reject_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error> {
        BotModule::reject_bot(env, account, bot_index)
    }

    /// Suspends an active bot
    ///
    /// # Arguments
    /// * `account` - The account holding the bot
    /// * `bot_index` - The index of the activation in the account's list
    pub fn suspend_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error> {
        BotModule::suspend_bot(env, account, bot_index)
    }

    /// Marks an account's elapsed active bots expired
    pub fn expire_bots(env: Env, account: Address) -> Result<u32, Error> {
        BotModule::expire_bots(env, account)
    }

    /// Checks if an account currently holds earning rights
    pub fn has_active_bot(env: Env, account: Address) -> Result<bool, Error> {
        BotModule::has_active_bot(env, account)
    }

    /// Retrieves all of an account's bot activations
    pub fn get_bots(env: Env, account: Address) -> Result<Vec<BotActivation>, Error> {
        BotModule::get_bots(env, account)
    }

    /// Reports a package purchase deposit; the package starts pending
    /// admin approval
    ///
    /// # Arguments
    /// * `owner` - The purchasing account
    /// * `kind` - The package kind, fixing the monthly ROI bracket
    /// * `amount` - The deposited principal
    /// * `network` - The rail the deposit arrived on
    /// * `deposit_ref` - The external deposit transaction hash
    pub fn purchase_package(
        env: Env,
        owner: Address,
        kind: PackageKind,
        amount: i128,
        network: Network,
        deposit_ref: String,
    ) -> Result<u64, Error> {
        PackageModule::purchase_package(env, owner, kind, amount, network, deposit_ref)
    }

    /// Approves a pending package; activation is the qualifying
    /// purchase event, so commissions are distributed in the same call
    ///
    /// # Arguments
    /// * `package_id` - The package to approve
    pub fn approve_package(env: Env, package_id: u64) -> Result<DistributionReport, Error> {
        PackageModule::approve_package(env, package_id)
    }

    /// Rejects a pending package
    ///
    /// # Arguments
    /// * `package_id` - The package to reject
    pub fn reject_package(env: Env, package_id: u64) -> Result<(), Error> {
        PackageModule::reject_package(env, package_id)
    }

    /// Closes a package whose term has elapsed, releasing its locked
    /// capital
    ///
    /// # Arguments
    /// * `package_id` - The package to close
    pub fn expire_package(env: Env, package_id: u64) -> Result<(), Error> {
        PackageModule::expire_package(env, package_id)
    }

    /// Credits one due monthly ROI period to the package owner's ledger
    ///
    /// # Arguments
    /// * `caller` - The admin or keeper running the crediting
    /// * `package_id` - The package whose ROI is due
    pub fn credit_roi(env: Env, caller: Address, package_id: u64) -> Result<u64, Error> {
        PackageModule::credit_roi(env, caller, package_id)
    }

    /// Retrieves a package by id
    pub fn get_package(env: Env, package_id: u64) -> Result<Package, Error> {
        PackageModule::get_package(env, package_id)
    }

    /// Retrieves all package ids owned by an account
    pub fn get_account_packages(env: Env, account: Address) -> Result<Vec<u64>, Error> {
        PackageModule::get_account_packages(env, account)
    }

    /// Distributes commissions for an activated package; idempotent,
    /// settled records are never paid twice
    ///
    /// # Arguments
    /// * `package_id` - The purchase event to distribute for
    pub fn distribute(env: Env, package_id: u64) -> Result<DistributionReport, Error> {
        DistributionModule::distribute(env, package_id)
    }

    /// Re-enters distribution for an event with pending or failed
    /// records
    ///
    /// # Arguments
    /// * `caller` - The admin or keeper running the retry
    /// * `package_id` - The purchase event to retry
    pub fn retry_distribution(
        env: Env,
        caller: Address,
        package_id: u64,
    ) -> Result<DistributionReport, Error> {
        DistributionModule::retry_distribution(env, caller, package_id)
    }

    /// Re-enters distribution for the event behind one commission
    /// record
    ///
    /// # Arguments
    /// * `caller` - The admin or keeper running the retry
    /// * `earning_id` - The commission record to retry
    pub fn retry_earning(
        env: Env,
        caller: Address,
        earning_id: u64,
    ) -> Result<DistributionReport, Error> {
        DistributionModule::retry_earning(env, caller, earning_id)
    }

    /// Retries every open event older than the threshold, up to limit
    ///
    /// # Arguments
    /// * `caller` - The admin or keeper running the sweep
    /// * `older_than_secs` - Minimum event age to qualify
    /// * `limit` - Maximum number of events to retry in this call
    pub fn sweep_open_events(
        env: Env,
        caller: Address,
        older_than_secs: u64,
        limit: u32,
    ) -> Result<Vec<DistributionReport>, Error> {
        DistributionModule::sweep_open_events(env, caller, older_than_secs, limit)
    }

    /// Retrieves the per-recipient settlement state for one event
    pub fn get_distribution_report(env: Env, package_id: u64) -> Result<DistributionReport, Error> {
        DistributionModule::get_distribution_report(env, package_id)
    }

    /// Retrieves event ids that still have unsettled commissions
    pub fn get_open_events(env: Env) -> Result<Vec<u64>, Error> {
        DistributionModule::get_open_events(env)
    }

    /// Retrieves a commission record by id
    pub fn get_earning(env: Env, earning_id: u64) -> Result<Earning, Error> {
        DistributionModule::get_earning(env, earning_id)
    }

    /// Retrieves all commission ids created for one event
    pub fn get_event_earnings(env: Env, package_id: u64) -> Result<Vec<u64>, Error> {
        DistributionModule::get_event_earnings(env, package_id)
    }

    /// Retrieves all commission ids credited to an account
    pub fn get_account_earnings(env: Env, account: Address) -> Result<Vec<u64>, Error> {
        DistributionModule::get_account_earnings(env, account)
    }

    /// Retrieves a ledger entry by id
    pub fn get_ledger_entry(env: Env, entry_id: u64) -> Result<LedgerEntry, Error> {
        DistributionModule::get_ledger_entry(env, entry_id)
    }

    /// Retrieves all ledger entry ids touching an account
    pub fn get_account_entries(env: Env, account: Address) -> Result<Vec<u64>, Error> {
        DistributionModule::get_account_entries(env, account)
    }

    /// Recomputes an account's withdrawable balance breakdown from
    /// ledger state; unknown accounts get a zeroed breakdown
    pub fn get_withdrawable_balance(env: Env, account: Address) -> Result<BalanceBreakdown, Error> {
        BalanceModule::get_withdrawable_balance(env, account)
    }

    /// Places a withdrawal on the ledger, holding the funds until it
    /// settles
    ///
    /// # Arguments
    /// * `account` - The withdrawing account
    /// * `amount` - The amount to withdraw
    /// * `network` - The rail the funds should leave on
    pub fn request_withdrawal(
        env: Env,
        account: Address,
        amount: i128,
        network: Network,
    ) -> Result<u64, Error> {
        BalanceModule::request_withdrawal(env, account, amount, network)
    }

    /// Settles a pending withdrawal via the configured strategy; a
    /// failed settlement releases the hold
    ///
    /// # Arguments
    /// * `entry_id` - The pending withdrawal entry
    pub fn settle_withdrawal(env: Env, entry_id: u64) -> Result<(), Error> {
        BalanceModule::settle_withdrawal(env, entry_id)
    }

    /// Gets the total number of registered accounts
    pub fn get_total_accounts(env: Env) -> Result<u32, Error> {
        MetricsModule::get_total_accounts(env)
    }

    /// Gets the sum of all settled commission amounts
    pub fn get_total_commissions_paid(env: Env) -> Result<i128, Error> {
        MetricsModule::get_total_commissions_paid(env)
    }

    /// Gets engine statistics as key-value pairs
    /// total_accounts, total_commissions_paid, open_events,
    /// average_commission_per_account
    pub fn get_engine_metrics(env: Env) -> Result<Vec<(String, i128)>, Error> {
        MetricsModule::get_engine_metrics(env)
    }
}
