//! Identity Registry: the roster of authorized surveyors.

use carbonreg_types::{Address, DisplayName};
use log::{info, warn};

use crate::call::{Caller, Receipt};
use crate::company::Surveyor;
use crate::config::DuplicateSurveyorPolicy;
use crate::errors::RegistryError;
use crate::registry::Registry;

/// Ordered list of surveyor records.
#[derive(Debug, Clone, Default)]
pub struct SurveyorRoster {
    surveyors: Vec<Surveyor>,
}

impl SurveyorRoster {
    /// Returns true if any record carries `address`.
    pub fn contains(&self, address: &Address) -> bool {
        self.surveyors.iter().any(|s| &s.address == address)
    }

    /// All records in registration order.
    pub fn surveyors(&self) -> &[Surveyor] {
        &self.surveyors
    }

    fn register(
        &mut self,
        surveyor: Surveyor,
        policy: DuplicateSurveyorPolicy,
    ) -> Result<(), RegistryError> {
        if policy == DuplicateSurveyorPolicy::Reject && self.contains(&surveyor.address) {
            return Err(RegistryError::DuplicateSurveyor(surveyor.address));
        }
        self.surveyors.push(surveyor);
        Ok(())
    }
}

impl Registry {
    /// Appends a surveyor to the roster.
    ///
    /// When an administrator is configured, only it may call this.
    pub fn register_surveyor(
        &mut self,
        caller: &Caller,
        address: Address,
        name: DisplayName,
    ) -> Result<Receipt, RegistryError> {
        if let Some(admin) = &self.config.administrator {
            if caller.address() != admin {
                warn!("register_surveyor rejected: {} is not the administrator", caller);
                return Err(RegistryError::NotAdministrator);
            }
        }

        let surveyor = Surveyor {
            address: address.clone(),
            name,
        };
        self.roster
            .register(surveyor, self.config.duplicate_surveyors)
            .inspect_err(|e| warn!("register_surveyor rejected: {}", e))?;

        info!("surveyor {} registered", address);
        Ok(Receipt::SurveyorRegistered { surveyor: address })
    }

    /// Surveyor names, index-aligned with [`Registry::surveyor_addresses`].
    pub fn surveyor_names(&self) -> Vec<DisplayName> {
        self.roster
            .surveyors()
            .iter()
            .map(|s| s.name.clone())
            .collect()
    }

    /// Surveyor addresses, index-aligned with [`Registry::surveyor_names`].
    pub fn surveyor_addresses(&self) -> Vec<Address> {
        self.roster
            .surveyors()
            .iter()
            .map(|s| s.address.clone())
            .collect()
    }
}
