//! Transfer Engine: surplus-gated hand-off of units against a pending request.

use carbonreg_types::{Address, UnitId};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::call::{Caller, Receipt};
use crate::company::CreditRequest;
use crate::errors::RegistryError;
use crate::registry::Registry;

/// Parameters of a transfer that fulfils a pending request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOrder {
    /// Company whose request is fulfilled.
    pub requester: Address,
    /// Company parting with units; must be the caller.
    pub owner: Address,
    /// Units to move.
    pub amount: u64,
    /// Agreed price, recorded for settlement only.
    pub price: u64,
    /// Position of the fulfilled request in the requester's queue.
    pub request_index: usize,
}

/// Effect of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Receiving company.
    pub requester: Address,
    /// Sending company.
    pub owner: Address,
    /// Units that changed hands, oldest first.
    pub units: Vec<UnitId>,
    /// Recorded price.
    pub price: u64,
    /// Index the fulfilled request had in the requester's queue.
    pub request_index: usize,
    /// The fulfilled request as it was queued.
    pub request: CreditRequest,
}

impl Registry {
    /// Moves `order.amount` of the owner's oldest units to the requester and
    /// clears the fulfilled request.
    ///
    /// Every check runs before anything is mutated, so a failed transfer
    /// leaves holdings and request queues untouched.
    pub fn transfer_credits(
        &mut self,
        caller: &Caller,
        order: &TransferOrder,
    ) -> Result<Receipt, RegistryError> {
        let units = self.check_transfer(caller, order).inspect_err(|e| {
            warn!(
                "transfer_credits rejected ({} -> {}, {} units): {}",
                order.owner, order.requester, order.amount, e
            )
        })?;

        self.ledger.move_units(&order.owner, &order.requester, &units);
        let request = self
            .companies
            .get_mut(&order.requester)
            .map(|c| c.credit_requests.remove(order.request_index))
            .ok_or_else(|| RegistryError::UnknownCompany(order.requester.clone()))?;

        let receipt = TransferReceipt {
            requester: order.requester.clone(),
            owner: order.owner.clone(),
            units,
            price: order.price,
            request_index: order.request_index,
            request,
        };
        self.settlement.on_transfer(&receipt);
        info!(
            "{} units moved from {} to {} at price {}",
            receipt.units.len(),
            receipt.owner,
            receipt.requester,
            receipt.price
        );
        Ok(Receipt::CreditsTransferred(receipt))
    }

    /// Runs the transfer preconditions and returns the units that would move.
    fn check_transfer(
        &self,
        caller: &Caller,
        order: &TransferOrder,
    ) -> Result<Vec<UnitId>, RegistryError> {
        if caller.address() != &order.owner {
            return Err(RegistryError::NotOwner);
        }

        let owner = self
            .companies
            .get(&order.owner)
            .filter(|c| c.is_verified())
            .ok_or(RegistryError::OwnerNotVerified)?;

        let owned = self.ledger.balance_of(&order.owner);
        if order.amount > owned {
            return Err(RegistryError::InsufficientTotal {
                requested: order.amount,
                owned,
            });
        }
        let available = owner.surplus(owned);
        if order.amount > available {
            return Err(RegistryError::InsufficientSurplus {
                requested: order.amount,
                available,
            });
        }
        if order.amount == 0 {
            return Err(RegistryError::InvalidTransferAmount);
        }

        if order.requester == order.owner {
            return Err(RegistryError::SelfTransfer);
        }
        let requester = self
            .companies
            .get(&order.requester)
            .ok_or_else(|| RegistryError::UnknownCompany(order.requester.clone()))?;
        if order.request_index >= requester.credit_requests.len() {
            return Err(RegistryError::UnknownRequest {
                company: order.requester.clone(),
                index: order.request_index,
            });
        }

        self.ledger.select_oldest(&order.owner, order.amount)
    }
}
