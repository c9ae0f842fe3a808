//! Credit Ledger: ownership of individually numbered credit units.

use std::collections::BTreeMap;

use carbonreg_types::{Address, UnitId};
use log::debug;

use crate::config::MAX_BASE_ALLOCATION;
use crate::errors::RegistryError;

/// Unit ownership, indexed both ways.
///
/// `holdings` keeps each owner's units in acquisition order; `owners` maps
/// every minted unit back to its holder. Both are updated together.
#[derive(Debug, Clone, Default)]
pub struct CreditLedger {
    minted: u64,
    holdings: BTreeMap<Address, Vec<UnitId>>,
    owners: BTreeMap<UnitId, Address>,
}

impl CreditLedger {
    /// Mints `count` fresh units to `to` and returns their ids.
    ///
    /// Fails with `MintOverflow`, leaving the ledger untouched, when `count`
    /// exceeds [`MAX_BASE_ALLOCATION`] or the id counter would wrap.
    pub fn mint(&mut self, to: &Address, count: u64) -> Result<Vec<UnitId>, RegistryError> {
        let last = self
            .minted
            .checked_add(count)
            .filter(|_| count <= MAX_BASE_ALLOCATION)
            .ok_or(RegistryError::MintOverflow {
                requested: count,
                minted: self.minted,
                max_batch: MAX_BASE_ALLOCATION,
            })?;

        let minted: Vec<UnitId> = (1..=count).map(|i| UnitId::new(self.minted + i)).collect();
        for unit in &minted {
            self.owners.insert(*unit, to.clone());
        }
        self.holdings
            .entry(to.clone())
            .or_default()
            .extend_from_slice(&minted);
        self.minted = last;
        debug!("minted {} units to {}", count, to);
        Ok(minted)
    }

    /// Units held by `owner` in acquisition order.
    pub fn units_of(&self, owner: &Address) -> &[UnitId] {
        self.holdings.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of units held by `owner`.
    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.units_of(owner).len() as u64
    }

    /// Current holder of `unit`, if it was minted.
    pub fn owner_of(&self, unit: UnitId) -> Option<&Address> {
        self.owners.get(&unit)
    }

    /// Number of units ever minted.
    pub fn total_supply(&self) -> u64 {
        self.minted
    }

    /// All non-empty holdings keyed by owner.
    pub fn holdings(&self) -> impl Iterator<Item = (&Address, &[UnitId])> {
        self.holdings
            .iter()
            .filter(|(_, units)| !units.is_empty())
            .map(|(owner, units)| (owner, units.as_slice()))
    }

    /// Picks the `count` oldest units of `owner` without moving them.
    ///
    /// Fails with `NotOwner` if the owner index disagrees with the holdings
    /// for any picked unit.
    pub fn select_oldest(&self, owner: &Address, count: u64) -> Result<Vec<UnitId>, RegistryError> {
        let held = self.units_of(owner);
        let count = usize::try_from(count).map_err(|_| RegistryError::NotOwner)?;
        let picked = held.get(..count).ok_or(RegistryError::NotOwner)?;
        for unit in picked {
            if self.owners.get(unit) != Some(owner) {
                return Err(RegistryError::NotOwner);
            }
        }
        Ok(picked.to_vec())
    }

    /// Moves `units` from `from` to `to`.
    ///
    /// `units` must be a prefix of `from`'s holdings as returned by
    /// [`CreditLedger::select_oldest`].
    pub(crate) fn move_units(&mut self, from: &Address, to: &Address, units: &[UnitId]) {
        if let Some(held) = self.holdings.get_mut(from) {
            held.drain(..units.len());
        }
        self.holdings
            .entry(to.clone())
            .or_default()
            .extend_from_slice(units);
        for unit in units {
            self.owners.insert(*unit, to.clone());
        }
        debug!("moved {} units from {} to {}", units.len(), from, to);
    }
}
