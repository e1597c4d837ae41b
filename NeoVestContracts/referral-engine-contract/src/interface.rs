use crate::types::{
    AccountProfile, BalanceBreakdown, BotActivation, BotTier, DistributionReport, Earning, Error,
    LedgerEntry, Network, Package, PackageKind, SettlementMode,
};
use soroban_sdk::{Address, Env, String, Symbol, Vec};

/// Manages account registration and the referral graph
pub trait AccountOperations {
    /// Register a new account with a unique referral code and optional recruiter
    fn register(
        env: Env,
        account: Address,
        referral_code: Symbol,
        referred_by: Option<Symbol>,
    ) -> Result<(), Error>;

    /// Check if an account is registered
    fn is_registered(env: Env, account: Address) -> Result<bool, Error>;

    /// Get an account's profile
    fn get_profile(env: Env, account: Address) -> Result<AccountProfile, Error>;

    /// Resolve a referral code to its owner
    fn resolve_code(env: Env, referral_code: Symbol) -> Result<Address, Error>;

    /// Walk the upline chain, nearest ancestor first, bounded at max_levels
    fn get_upline_chain(env: Env, account: Address, max_levels: u32) -> Result<Vec<Address>, Error>;

    /// Set the account's payout address for one settlement rail
    fn set_payout_wallet(
        env: Env,
        account: Address,
        network: Network,
        wallet: Address,
    ) -> Result<(), Error>;

    /// Get the account's payout address for one settlement rail
    fn get_payout_wallet(env: Env, account: Address, network: Network) -> Result<Address, Error>;
}

/// Manages bot activations, the earning-eligibility gate
pub trait BotOperations {
    /// Report a bot purchase deposit; activation starts PENDING
    fn request_bot(
        env: Env,
        account: Address,
        tier: BotTier,
        network: Network,
        deposit_ref: String,
    ) -> Result<u32, Error>;

    /// Admin approval after off-chain deposit verification; opens the earning window
    fn approve_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error>;

    /// Admin rejection of an unverifiable deposit
    fn reject_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error>;

    /// Admin suspension of an active bot
    fn suspend_bot(env: Env, account: Address, bot_index: u32) -> Result<(), Error>;

    /// Mark elapsed active bots expired; returns how many were flipped
    fn expire_bots(env: Env, account: Address) -> Result<u32, Error>;

    /// Check if the account holds earning rights right now
    fn has_active_bot(env: Env, account: Address) -> Result<bool, Error>;

    /// Get all of an account's bot activations
    fn get_bots(env: Env, account: Address) -> Result<Vec<BotActivation>, Error>;
}

/// Manages investment packages, whose activation is the qualifying purchase event
pub trait PackageOperations {
    /// Report a package purchase deposit; package starts PENDING
    fn purchase_package(
        env: Env,
        owner: Address,
        kind: PackageKind,
        amount: i128,
        network: Network,
        deposit_ref: String,
    ) -> Result<u64, Error>;

    /// Admin approval; activates the package and distributes commissions up the chain
    fn approve_package(env: Env, package_id: u64) -> Result<DistributionReport, Error>;

    /// Admin rejection of an unverifiable deposit
    fn reject_package(env: Env, package_id: u64) -> Result<(), Error>;

    /// Close a package whose term has elapsed, releasing its locked capital
    fn expire_package(env: Env, package_id: u64) -> Result<(), Error>;

    /// Credit one due monthly ROI period to the package owner's ledger
    fn credit_roi(env: Env, caller: Address, package_id: u64) -> Result<u64, Error>;

    /// Get a package by id
    fn get_package(env: Env, package_id: u64) -> Result<Package, Error>;

    /// Get all package ids owned by an account
    fn get_account_packages(env: Env, account: Address) -> Result<Vec<u64>, Error>;
}

/// Runs commission distribution and its retry paths
pub trait DistributionOperations {
    /// Distribute commissions for an activated package; idempotent per event
    fn distribute(env: Env, package_id: u64) -> Result<DistributionReport, Error>;

    /// Re-enter distribution for an event with failed or pending records
    fn retry_distribution(env: Env, caller: Address, package_id: u64)
        -> Result<DistributionReport, Error>;

    /// Re-enter distribution for the event behind one commission record
    fn retry_earning(env: Env, caller: Address, earning_id: u64)
        -> Result<DistributionReport, Error>;

    /// Retry every open event older than the threshold, up to limit
    fn sweep_open_events(
        env: Env,
        caller: Address,
        older_than_secs: u64,
        limit: u32,
    ) -> Result<Vec<DistributionReport>, Error>;

    /// Get the per-recipient settlement state for one event
    fn get_distribution_report(env: Env, package_id: u64) -> Result<DistributionReport, Error>;

    /// Get event ids with unsettled commissions
    fn get_open_events(env: Env) -> Result<Vec<u64>, Error>;

    /// Get a commission record by id
    fn get_earning(env: Env, earning_id: u64) -> Result<Earning, Error>;

    /// Get all commission ids created for one event
    fn get_event_earnings(env: Env, package_id: u64) -> Result<Vec<u64>, Error>;

    /// Get all commission ids credited to an account
    fn get_account_earnings(env: Env, account: Address) -> Result<Vec<u64>, Error>;

    /// Get a ledger entry by id
    fn get_ledger_entry(env: Env, entry_id: u64) -> Result<LedgerEntry, Error>;

    /// Get all ledger entry ids touching an account
    fn get_account_entries(env: Env, account: Address) -> Result<Vec<u64>, Error>;
}

/// Aggregates balances and handles withdrawals
pub trait BalanceOperations {
    /// Recompute the withdrawable balance breakdown; zeroed for unknown accounts
    fn get_withdrawable_balance(env: Env, account: Address) -> Result<BalanceBreakdown, Error>;

    /// Place a withdrawal on the ledger, holding the funds until settled
    fn request_withdrawal(
        env: Env,
        account: Address,
        amount: i128,
        network: Network,
    ) -> Result<u64, Error>;

    /// Admin settlement of a pending withdrawal via the configured strategy
    fn settle_withdrawal(env: Env, entry_id: u64) -> Result<(), Error>;
}

/// Manages administrative operations and engine configuration
pub trait AdminOperations {
    /// Initialize the engine with an admin and settlement strategy
    fn initialize(env: Env, admin: Address, settlement_mode: SettlementMode) -> Result<(), Error>;

    /// Get admin address
    fn get_admin(env: Env) -> Result<Address, Error>;

    /// Transfer admin rights to a new address
    fn transfer_admin(env: Env, new_admin: Address) -> Result<(), Error>;

    /// Set the keeper allowed to run retries and sweeps
    fn set_operator(env: Env, operator: Address) -> Result<(), Error>;

    /// Get the configured keeper
    fn get_operator(env: Env) -> Result<Address, Error>;

    /// Switch between on-chain and off-chain settlement
    fn set_settlement_mode(env: Env, mode: SettlementMode) -> Result<(), Error>;

    /// Get the configured settlement strategy
    fn get_settlement_mode(env: Env) -> Result<SettlementMode, Error>;

    /// Configure the stablecoin contract for one settlement rail
    fn set_payout_token(env: Env, network: Network, token: Address) -> Result<(), Error>;

    /// Get the stablecoin contract for one settlement rail
    fn get_payout_token(env: Env, network: Network) -> Result<Address, Error>;

    /// Pause engine operations (emergency)
    fn pause_engine(env: Env) -> Result<(), Error>;

    /// Resume engine operations
    fn resume_engine(env: Env) -> Result<(), Error>;

    /// Check if the engine is paused
    fn get_paused_state(env: Env) -> Result<bool, Error>;
}

/// Handles system metrics and monitoring
pub trait MetricsOperations {
    /// Get total registered accounts
    fn get_total_accounts(env: Env) -> Result<u32, Error>;

    /// Get the sum of all settled commission amounts
    fn get_total_commissions_paid(env: Env) -> Result<i128, Error>;

    /// Get system statistics as key-value pairs
    fn get_engine_metrics(env: Env) -> Result<Vec<(String, i128)>, Error>;
}
