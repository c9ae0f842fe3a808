//! Verification Workflow: company registration and surveyor decisions.

use std::collections::BTreeMap;

use carbonreg_types::Address;
use log::{debug, info, warn};

use crate::call::{Caller, Receipt};
use crate::company::{Company, CompanyRegistration, CompanyStatus};
use crate::config::ResubmissionPolicy;
use crate::errors::RegistryError;
use crate::registry::Registry;

/// Per-surveyor queues of companies awaiting a decision.
#[derive(Debug, Clone, Default)]
pub struct VerificationQueue {
    pending: BTreeMap<Address, Vec<Address>>,
}

impl VerificationQueue {
    /// Companies awaiting `surveyor`'s decision, oldest first.
    pub fn pending_for(&self, surveyor: &Address) -> &[Address] {
        self.pending.get(surveyor).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All non-empty queues keyed by surveyor.
    pub fn queues(&self) -> impl Iterator<Item = (&Address, &[Address])> {
        self.pending
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(surveyor, queue)| (surveyor, queue.as_slice()))
    }

    fn enqueue(&mut self, surveyor: &Address, company: &Address) {
        self.pending
            .entry(surveyor.clone())
            .or_default()
            .push(company.clone());
    }

    fn remove(&mut self, surveyor: &Address, company: &Address) {
        if let Some(queue) = self.pending.get_mut(surveyor) {
            queue.retain(|c| c != company);
        }
    }
}

impl Registry {
    /// Registers a company and queues it for its surveyor's decision.
    ///
    /// A rejected company may register again under [`ResubmissionPolicy::Allow`]
    /// as long as it names the surveyor it was first assigned.
    pub fn register_company(
        &mut self,
        caller: &Caller,
        registration: CompanyRegistration,
    ) -> Result<Receipt, RegistryError> {
        self.check_company_registration(&registration)
            .inspect_err(|e| warn!("register_company rejected: {}", e))?;

        let company = registration.address.clone();
        let surveyor = registration.surveyor.clone();
        self.companies
            .insert(company.clone(), Company::pending(registration));
        self.verification.enqueue(&surveyor, &company);

        info!(
            "company {} registered by {} for surveyor {}",
            company, caller, surveyor
        );
        Ok(Receipt::CompanyRegistered { company, surveyor })
    }

    fn check_company_registration(
        &self,
        registration: &CompanyRegistration,
    ) -> Result<(), RegistryError> {
        if self.config.require_registered_surveyor && !self.roster.contains(&registration.surveyor)
        {
            return Err(RegistryError::UnknownSurveyor(registration.surveyor.clone()));
        }

        let Some(existing) = self.companies.get(&registration.address) else {
            return Ok(());
        };
        match existing.status {
            CompanyStatus::Unregistered => Ok(()),
            CompanyStatus::PendingVerification | CompanyStatus::Verified => Err(
                RegistryError::AlreadyRegistered(registration.address.clone()),
            ),
            CompanyStatus::Rejected => match self.config.resubmission {
                ResubmissionPolicy::Forbid => Err(RegistryError::ResubmissionForbidden(
                    registration.address.clone(),
                )),
                ResubmissionPolicy::Allow if existing.surveyor != registration.surveyor => {
                    Err(RegistryError::SurveyorReassignment {
                        company: registration.address.clone(),
                        assigned: existing.surveyor.clone(),
                    })
                }
                ResubmissionPolicy::Allow => Ok(()),
            },
        }
    }

    /// Companies awaiting `surveyor`'s decision.
    pub fn registration_requests(&self, surveyor: &Address) -> Vec<Address> {
        self.verification.pending_for(surveyor).to_vec()
    }

    /// Approves a pending company: marks it verified and mints its allocation.
    pub fn approve_credit_info(
        &mut self,
        caller: &Caller,
        company: &Address,
    ) -> Result<Receipt, RegistryError> {
        let surveyor = self
            .check_decision(caller, company)
            .inspect_err(|e| warn!("approve_credit_info rejected for {}: {}", company, e))?;

        let minted = self
            .ledger
            .mint(company, self.config.base_allocation)
            .inspect_err(|e| warn!("approve_credit_info rejected for {}: {}", company, e))?;
        self.set_status(company, CompanyStatus::Verified);
        self.verification.remove(&surveyor, company);

        info!(
            "company {} verified by {}; {} units minted",
            company,
            surveyor,
            minted.len()
        );
        Ok(Receipt::CreditInfoApproved {
            company: company.clone(),
            minted,
        })
    }

    /// Rejects a pending company. No units are minted; the record stays.
    pub fn reject_credit_info(
        &mut self,
        caller: &Caller,
        company: &Address,
    ) -> Result<Receipt, RegistryError> {
        let surveyor = self
            .check_decision(caller, company)
            .inspect_err(|e| warn!("reject_credit_info rejected for {}: {}", company, e))?;

        self.set_status(company, CompanyStatus::Rejected);
        self.verification.remove(&surveyor, company);

        info!("company {} rejected by {}", company, surveyor);
        Ok(Receipt::CreditInfoRejected {
            company: company.clone(),
        })
    }

    /// Returns the assigned surveyor if `caller` may decide on `company` now.
    fn check_decision(&self, caller: &Caller, company: &Address) -> Result<Address, RegistryError> {
        let record = self
            .companies
            .get(company)
            .ok_or_else(|| RegistryError::UnknownCompany(company.clone()))?;
        if caller.address() != &record.surveyor {
            return Err(RegistryError::NotAssignedSurveyor);
        }
        if record.status != CompanyStatus::PendingVerification {
            return Err(RegistryError::NotPending(company.clone()));
        }
        Ok(record.surveyor.clone())
    }

    fn set_status(&mut self, company: &Address, status: CompanyStatus) {
        if let Some(record) = self.companies.get_mut(company) {
            debug!("company {} status {:?} -> {:?}", company, record.status, status);
            record.status = status;
        }
    }
}
