use crate::distribution::DistributionModule;
use crate::helpers;
use crate::interface::PackageOperations;
use crate::types::{
    DataKey, DistributionReport, EntryStatus, EntryType, Error, LedgerEntry, Network, Package,
    PackageKind, PackageStatus,
};
use soroban_sdk::{Address, Env, String, Symbol, Vec};

/// Package term: twelve 30-day ROI periods
const PACKAGE_TERM_SECS: u64 = 360 * 24 * 60 * 60;
const ROI_PERIOD_SECS: u64 = 30 * 24 * 60 * 60;

/// Monthly ROI per kind, in basis points of the principal
const STARTER_ROI_BPS: u32 = 400;
const GROWTH_ROI_BPS: u32 = 500;
const PREMIUM_ROI_BPS: u32 = 600;

pub struct PackageModule;

impl PackageOperations for PackageModule {
    fn purchase_package(
        env: Env,
        owner: Address,
        kind: PackageKind,
        amount: i128,
        network: Network,
        deposit_ref: String,
    ) -> Result<u64, Error> {
        helpers::ensure_engine_active(&env)?;
        owner.require_auth();

        if !helpers::account_exists(&env, &owner) {
            return Err(Error::AccountNotFound);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let package_id = helpers::next_id(&env, &DataKey::NextPackageId);
        let package = Package {
            id: package_id,
            owner: owner.clone(),
            kind: kind.clone(),
            amount,
            status: PackageStatus::Pending,
            network,
            deposit_ref,
            purchased_at: env.ledger().timestamp(),
            activated_at: 0,
            expires_at: 0,
            roi_periods_paid: 0,
        };

        env.storage()
            .persistent()
            .set(&DataKey::Package(package_id), &package);
        helpers::push_id(&env, &DataKey::AccountPackages(owner.clone()), package_id);

        env.events().publish(
            (Symbol::new(&env, "package_purchased"), owner),
            (package_id, kind, amount),
        );

        Ok(package_id)
    }

    fn approve_package(env: Env, package_id: u64) -> Result<DistributionReport, Error> {
        helpers::ensure_engine_active(&env)?;
        helpers::require_admin(&env)?;

        let mut package = helpers::get_package(&env, package_id)?;
        if package.status != PackageStatus::Pending {
            return Err(Error::InvalidPackageStatus);
        }

        let now = env.ledger().timestamp();
        package.status = PackageStatus::Active;
        package.activated_at = now;
        package.expires_at = now + PACKAGE_TERM_SECS;
        env.storage()
            .persistent()
            .set(&DataKey::Package(package_id), &package);

        env.events().publish(
            (Symbol::new(&env, "package_approved"), package.owner.clone()),
            (package_id, package.amount),
        );

        // Activation is the qualifying purchase event
        DistributionModule::run(&env, package_id)
    }

    fn reject_package(env: Env, package_id: u64) -> Result<(), Error> {
        helpers::require_admin(&env)?;

        let mut package = helpers::get_package(&env, package_id)?;
        if package.status != PackageStatus::Pending {
            return Err(Error::InvalidPackageStatus);
        }
        package.status = PackageStatus::Rejected;
        env.storage()
            .persistent()
            .set(&DataKey::Package(package_id), &package);

        env.events().publish(
            (Symbol::new(&env, "package_rejected"), package.owner),
            package_id,
        );

        Ok(())
    }

    /// Can be run by anyone once the term has elapsed; the transition
    /// only makes storage reflect the clock
    fn expire_package(env: Env, package_id: u64) -> Result<(), Error> {
        let mut package = helpers::get_package(&env, package_id)?;
        if package.status != PackageStatus::Active {
            return Err(Error::InvalidPackageStatus);
        }
        if env.ledger().timestamp() < package.expires_at {
            return Err(Error::PackageNotMatured);
        }

        package.status = PackageStatus::Expired;
        env.storage()
            .persistent()
            .set(&DataKey::Package(package_id), &package);

        env.events().publish(
            (Symbol::new(&env, "package_expired"), package.owner),
            package_id,
        );

        Ok(())
    }

    fn credit_roi(env: Env, caller: Address, package_id: u64) -> Result<u64, Error> {
        helpers::ensure_engine_active(&env)?;
        helpers::require_admin_or_operator(&env, &caller)?;

        let mut package = helpers::get_package(&env, package_id)?;
        if !matches!(
            package.status,
            PackageStatus::Active | PackageStatus::Expired
        ) {
            return Err(Error::InvalidPackageStatus);
        }

        let now = env.ledger().timestamp();
        let total_periods = (PACKAGE_TERM_SECS / ROI_PERIOD_SECS) as u32;
        let elapsed_periods = ((now - package.activated_at) / ROI_PERIOD_SECS) as u32;
        let due_periods = elapsed_periods.min(total_periods);
        if package.roi_periods_paid >= due_periods {
            return Err(Error::RoiNotDue);
        }

        let roi_amount = (package.amount * Self::roi_bps(&package.kind) as i128) / 10_000;

        // Internal ledger credit; funds leave via the withdrawal path
        let entry_id = helpers::next_id(&env, &DataKey::NextEntryId);
        let entry = LedgerEntry {
            id: entry_id,
            account: package.owner.clone(),
            entry_type: EntryType::RoiPayout,
            amount: roi_amount,
            status: EntryStatus::Completed,
            network: package.network.clone(),
            settlement_ref: None,
            created_at: now,
            settled_at: Some(now),
        };
        env.storage()
            .persistent()
            .set(&DataKey::Entry(entry_id), &entry);
        helpers::push_id(
            &env,
            &DataKey::AccountEntries(package.owner.clone()),
            entry_id,
        );

        package.roi_periods_paid += 1;
        env.storage()
            .persistent()
            .set(&DataKey::Package(package_id), &package);

        env.events().publish(
            (Symbol::new(&env, "roi_credited"), package.owner),
            (package_id, entry_id, roi_amount),
        );

        Ok(entry_id)
    }

    fn get_package(env: Env, package_id: u64) -> Result<Package, Error> {
        helpers::get_package(&env, package_id)
    }

    fn get_account_packages(env: Env, account: Address) -> Result<Vec<u64>, Error> {
        if !helpers::account_exists(&env, &account) {
            return Err(Error::AccountNotFound);
        }
        Ok(helpers::get_id_list(
            &env,
            &DataKey::AccountPackages(account),
        ))
    }
}

// Helper functions
impl PackageModule {
    fn roi_bps(kind: &PackageKind) -> u32 {
        match kind {
            PackageKind::Starter => STARTER_ROI_BPS,
            PackageKind::Growth => GROWTH_ROI_BPS,
            PackageKind::Premium => PREMIUM_ROI_BPS,
        }
    }
}
