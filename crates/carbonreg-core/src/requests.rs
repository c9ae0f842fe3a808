//! Request Queue: quota-limited requests for credit units.

use carbonreg_types::Address;
use log::{info, warn};

use crate::call::{Caller, Receipt};
use crate::company::CreditRequest;
use crate::errors::RegistryError;
use crate::registry::Registry;

impl Registry {
    /// Queues a request for `amount` units on behalf of `company`.
    ///
    /// Checks, in order: the caller is `company` and it is verified, the
    /// amount is positive, and a quota slot is left. Each successful call
    /// consumes exactly one slot whatever the amount.
    pub fn register_receive_request(
        &mut self,
        caller: &Caller,
        company: &Address,
        amount: u64,
        payment: Option<u64>,
    ) -> Result<Receipt, RegistryError> {
        self.check_receive_request(caller, company, amount)
            .inspect_err(|e| warn!("register_receive_request rejected for {}: {}", company, e))?;

        let quota = self.config.request_quota;
        let record = self
            .companies
            .get_mut(company)
            .ok_or(RegistryError::RequesterNotVerified)?;
        let request = CreditRequest {
            requester: company.clone(),
            amount,
            payment: payment.unwrap_or(0),
        };
        record.credit_requests.push(request.clone());
        record.requests_consumed += 1;
        let index = record.credit_requests.len() - 1;
        let requests_remaining = quota.saturating_sub(record.requests_consumed);

        self.settlement.on_request(company, index, &request);
        info!(
            "company {} requested {} units (request {}, {} left)",
            company, amount, index, requests_remaining
        );
        Ok(Receipt::ReceiveRequestRegistered {
            company: company.clone(),
            index,
            amount,
            requests_remaining,
        })
    }

    fn check_receive_request(
        &self,
        caller: &Caller,
        company: &Address,
        amount: u64,
    ) -> Result<(), RegistryError> {
        let record = self
            .companies
            .get(company)
            .filter(|c| caller.address() == company && c.is_verified())
            .ok_or(RegistryError::RequesterNotVerified)?;
        if amount == 0 {
            return Err(RegistryError::InvalidRequestAmount);
        }
        if record.requests_consumed >= self.config.request_quota {
            return Err(RegistryError::QuotaExceeded);
        }
        Ok(())
    }

    /// Pending credit requests of `company` in submission order.
    pub fn credit_requests(&self, company: &Address) -> Vec<CreditRequest> {
        self.companies
            .get(company)
            .map(|c| c.credit_requests.clone())
            .unwrap_or_default()
    }

    /// Receive-request calls `company` may still make.
    pub fn requests_remaining(&self, company: &Address) -> u32 {
        let consumed = self
            .companies
            .get(company)
            .map(|c| c.requests_consumed)
            .unwrap_or(0);
        self.config.request_quota.saturating_sub(consumed)
    }
}
