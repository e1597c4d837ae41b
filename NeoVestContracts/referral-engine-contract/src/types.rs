use soroban_sdk::{contracterror, contracttype, Address, String, Symbol, Vec};

/// Settlement rails supported for deposits and payouts
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Network {
    Bep20, // USDT on BNB Smart Chain
    Trc20, // USDT on Tron
}

/// How commissions are settled once computed
/// Selected once per distribution run from configuration
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SettlementMode {
    OnChain,  // Live token transfer from the engine treasury
    OffChain, // Internal ledger credit only, no transfer
}

/// Bot tiers granting referral-earning rights while active
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum BotTier {
    Neo = 0,    // Entry tier
    Neural = 1, // Mid tier
    Oracle = 2, // Top tier
}

/// Lifecycle of a bot activation
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BotStatus {
    Pending,   // Deposit reported, awaiting approval
    Active,    // Earning rights granted
    Expired,   // Validity window elapsed
    Rejected,  // Deposit could not be verified
    Suspended, // Disabled by admin
}

/// A purchased bot activation for one account
#[contracttype]
#[derive(Clone)]
pub struct BotActivation {
    pub tier: BotTier,      // Purchased tier
    pub status: BotStatus,  // Current lifecycle state
    pub network: Network,   // Rail the deposit arrived on
    pub deposit_ref: String, // External deposit transaction hash
    pub requested_at: u64,  // When the purchase was reported
    pub activated_at: u64,  // Approval time (0 until approved)
    pub expires_at: u64,    // End of earning window (0 until approved)
}

/// Investment package kinds with their monthly ROI brackets
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PackageKind {
    Starter, // 4.0% monthly
    Growth,  // 5.0% monthly
    Premium, // 6.0% monthly
}

/// Lifecycle of an investment package
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PackageStatus {
    Pending,  // Deposit reported, awaiting approval
    Active,   // Deposit verified, capital locked, ROI accruing
    Expired,  // Term elapsed, capital released
    Rejected, // Deposit could not be verified
}

/// A stablecoin investment package; its activation is the purchase
/// event that triggers commission distribution up the referral chain
#[contracttype]
#[derive(Clone)]
pub struct Package {
    pub id: u64,                // Purchase event id
    pub owner: Address,         // Purchasing account
    pub kind: PackageKind,      // ROI bracket
    pub amount: i128,           // Deposited principal
    pub status: PackageStatus,  // Current lifecycle state
    pub network: Network,       // Rail the deposit arrived on
    pub deposit_ref: String,    // External deposit transaction hash
    pub purchased_at: u64,      // When the purchase was reported
    pub activated_at: u64,      // Approval time (0 until approved)
    pub expires_at: u64,        // End of term (0 until approved)
    pub roi_periods_paid: u32,  // Monthly ROI periods already credited
}

/// Commission categories paid up the referral chain
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EarningType {
    DirectReferral, // Level 1 bonus
    LevelIncome,    // Levels 2-6
}

/// Lifecycle of a single commission record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EarningStatus {
    Pending,      // Recorded, not yet settled
    Paid,         // Settled via on-chain transfer
    PaidOffChain, // Settled on the internal ledger only
    Failed,       // Settlement attempt failed, eligible for retry
}

/// One commission row per (recipient, purchase event, level).
/// Never deleted; status only advances, preserving the audit trail.
#[contracttype]
#[derive(Clone)]
pub struct Earning {
    pub id: u64,                  // Commission id
    pub recipient: Address,       // Upline account being paid
    pub event_id: u64,            // Originating package id
    pub earning_type: EarningType, // Direct referral vs level income
    pub level: u32,               // Upline distance 1-6
    pub amount: i128,             // Commission amount
    pub status: EarningStatus,    // Current lifecycle state
    pub entry_id: u64,            // Paired ledger entry
    pub created_at: u64,          // Computation time
    pub settled_at: Option<u64>,  // Set once a settlement attempt lands
}

/// Ledger entry categories
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryType {
    Commission, // Referral or level income payout
    RoiPayout,  // Monthly package ROI credit
    Withdrawal, // Account withdrawal of settled balance
}

/// Lifecycle of a ledger entry
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EntryStatus {
    Pending,   // Awaiting settlement
    Completed, // Settled (transfer landed or off-chain credit recorded)
    Failed,    // Settlement attempt failed
}

/// Durable record of one money movement. Every Earning has exactly one
/// entry, created in the same invocation; the settlement reference is
/// populated only once an on-chain transfer succeeds.
#[contracttype]
#[derive(Clone)]
pub struct LedgerEntry {
    pub id: u64,                     // Entry id
    pub account: Address,            // Affected account
    pub entry_type: EntryType,       // Movement category
    pub amount: i128,                // Moved amount
    pub status: EntryStatus,         // Current lifecycle state
    pub network: Network,            // Settlement rail
    pub settlement_ref: Option<u32>, // Ledger sequence of the on-chain transfer
    pub created_at: u64,             // Creation time
    pub settled_at: Option<u64>,     // Set once a settlement attempt lands
}

/// Registered platform account and its position in the referral forest
#[contracttype]
#[derive(Clone)]
pub struct AccountProfile {
    pub address: Address,            // Account address
    pub referral_code: Symbol,       // Unique code handed to recruits
    pub referred_by: Option<Symbol>, // Recruiter's code, if any
    pub joined_at: u64,              // Registration time
    pub direct_referrals: u32,       // Accounts recruited directly
}

/// One computed commission before it is persisted
#[contracttype]
#[derive(Clone)]
pub struct CommissionIntent {
    pub recipient: Address,        // Eligible upline account
    pub level: u32,                // Upline distance 1-6
    pub earning_type: EarningType, // Tag derived from the level
    pub amount: i128,              // Purchase amount x level rate
}

/// Per-recipient outcome of one distribution run
#[contracttype]
#[derive(Clone)]
pub struct SettlementOutcome {
    pub earning_id: u64,       // Commission acted on
    pub recipient: Address,    // Upline account
    pub level: u32,            // Upline distance
    pub amount: i128,          // Commission amount
    pub status: EarningStatus, // Status after this run
}

/// Aggregate result of one distribution run
#[contracttype]
#[derive(Clone)]
pub struct DistributionReport {
    pub event_id: u64,                    // Package whose activation triggered this
    pub success_count: u32,               // Settled this run
    pub failed_count: u32,                // Failed this run, retryable
    pub skipped_count: u32,               // Already terminal, untouched
    pub details: Vec<SettlementOutcome>,  // Per-recipient breakdown
}

/// Withdrawable balance breakdown, recomputed from ledger state on
/// every read (no cached counters that can drift)
#[contracttype]
#[derive(Clone)]
pub struct BalanceBreakdown {
    pub roi_balance: i128,      // Completed monthly ROI credits
    pub referral_balance: i128, // Settled direct-referral commissions
    pub level_balance: i128,    // Settled level-income commissions
    pub total_withdrawn: i128,  // Completed withdrawals
    pub total_balance: i128,    // Withdrawable now (pending withdrawals held)
    pub locked_capital: i128,   // Principal in active packages, not withdrawable
}

/// Storage keys for contract data
#[contracttype]
pub enum DataKey {
    Admin,                          // Engine administrator
    Operator,                       // Keeper allowed to run retries and sweeps
    EnginePaused,                   // Emergency stop flag
    SettlementMode,                 // On-chain vs off-chain strategy
    PayoutToken(Network),           // Stablecoin contract per rail
    PayoutWallet(Address, Network), // Account payout address per rail
    Profile(Address),               // Account profile
    CodeIndex(Symbol),              // Referral code -> account address
    Bots(Address),                  // Account's bot activations
    Package(u64),                   // Package row
    AccountPackages(Address),       // Account's package ids
    Earning(u64),                   // Commission row
    Entry(u64),                     // Ledger entry row
    EventEarnings(u64),             // Package id -> commission ids
    AccountEarnings(Address),       // Account's commission ids
    AccountEntries(Address),        // Account's ledger entry ids
    OpenEvents,                     // Events with unsettled commissions
    NextPackageId,                  // Package id counter
    NextEarningId,                  // Commission id counter
    NextEntryId,                    // Ledger entry id counter
    TotalAccounts,                  // Registered accounts
    TotalCommissionsPaid,           // Sum of settled commission amounts
}

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,       // Engine already set up
    NotInitialized = 2,           // Engine not set up yet
    Unauthorized = 3,             // Caller lacks permission
    EnginePaused = 4,             // Operations are paused
    AlreadyRegistered = 5,        // Account already exists
    AccountNotFound = 6,          // Account doesn't exist
    CodeAlreadyTaken = 7,         // Referral code is in use
    ReferrerNotFound = 8,         // Recruiter code doesn't resolve
    SelfReferralNotAllowed = 9,   // Account cannot recruit itself
    InvalidAmount = 10,           // Zero or negative amount
    BotNotFound = 11,             // No bot activation at that index
    InvalidBotStatus = 12,        // Transition not allowed from current state
    PackageNotFound = 13,         // Package doesn't exist
    InvalidPackageStatus = 14,    // Transition not allowed from current state
    PackageNotMatured = 15,       // Term has not elapsed yet
    RoiNotDue = 16,               // No ROI period due for the package
    EarningNotFound = 17,         // Commission row doesn't exist
    EntryNotFound = 18,           // Ledger entry doesn't exist
    InvalidEntryStatus = 19,      // Entry is not a pending withdrawal
    PayoutTokenNotConfigured = 20, // No stablecoin configured for the rail
    InsufficientBalance = 21,     // Withdrawal exceeds withdrawable balance
    PayoutWalletNotConfigured = 22, // Account has no payout address on the rail
}
