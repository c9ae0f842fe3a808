//! Caller identity, replayable calls and their receipts.

use std::fmt;

use carbonreg_types::{Address, DisplayName, UnitId};
use serde::{Deserialize, Serialize};

use crate::company::CompanyRegistration;
use crate::errors::RegistryError;
use crate::registry::Registry;
use crate::transfer::{TransferOrder, TransferReceipt};

/// Identity of the party making a call, supplied by the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Caller(Address);

impl Caller {
    /// Wraps the authenticated address of the caller.
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    /// The caller's address.
    pub fn address(&self) -> &Address {
        &self.0
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A mutating registry call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    /// Add a surveyor to the roster.
    RegisterSurveyor {
        /// Surveyor address.
        address: Address,
        /// Display name.
        name: DisplayName,
    },
    /// Register a company for verification.
    RegisterCompany(CompanyRegistration),
    /// Approve a pending company.
    ApproveCreditInfo {
        /// Company decided on.
        company: Address,
    },
    /// Reject a pending company.
    RejectCreditInfo {
        /// Company decided on.
        company: Address,
    },
    /// Queue a request for credit units.
    RegisterReceiveRequest {
        /// Requesting company.
        company: Address,
        /// Units requested.
        amount: u64,
        /// Optional attached payment.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payment: Option<u64>,
    },
    /// Fulfil a pending request from the owner's surplus.
    TransferCredits(TransferOrder),
}

impl Call {
    /// Operation name as used in journals and logs.
    pub fn op(&self) -> &'static str {
        match self {
            Call::RegisterSurveyor { .. } => "register_surveyor",
            Call::RegisterCompany(_) => "register_company",
            Call::ApproveCreditInfo { .. } => "approve_credit_info",
            Call::RejectCreditInfo { .. } => "reject_credit_info",
            Call::RegisterReceiveRequest { .. } => "register_receive_request",
            Call::TransferCredits(_) => "transfer_credits",
        }
    }
}

/// Effect of a successful call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Receipt {
    /// A surveyor was added.
    SurveyorRegistered {
        /// Surveyor address.
        surveyor: Address,
    },
    /// A company was queued for verification.
    CompanyRegistered {
        /// Company address.
        company: Address,
        /// Surveyor it was queued with.
        surveyor: Address,
    },
    /// A company was verified and received its allocation.
    CreditInfoApproved {
        /// Company address.
        company: Address,
        /// Newly minted units.
        minted: Vec<UnitId>,
    },
    /// A company was rejected.
    CreditInfoRejected {
        /// Company address.
        company: Address,
    },
    /// A credit request was queued.
    ReceiveRequestRegistered {
        /// Requesting company.
        company: Address,
        /// Position of the request in the company's queue.
        index: usize,
        /// Units requested.
        amount: u64,
        /// Quota slots left after this call.
        requests_remaining: u32,
    },
    /// Units moved between companies.
    CreditsTransferred(TransferReceipt),
}

impl Registry {
    /// Dispatches `call` on behalf of `caller`.
    pub fn apply(&mut self, caller: &Caller, call: &Call) -> Result<Receipt, RegistryError> {
        match call {
            Call::RegisterSurveyor { address, name } => {
                self.register_surveyor(caller, address.clone(), name.clone())
            }
            Call::RegisterCompany(registration) => {
                self.register_company(caller, registration.clone())
            }
            Call::ApproveCreditInfo { company } => self.approve_credit_info(caller, company),
            Call::RejectCreditInfo { company } => self.reject_credit_info(caller, company),
            Call::RegisterReceiveRequest {
                company,
                amount,
                payment,
            } => self.register_receive_request(caller, company, *amount, *payment),
            Call::TransferCredits(order) => self.transfer_credits(caller, order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn calls_serialize_with_op_tag() {
        let call = Call::ApproveCreditInfo {
            company: Address::parse("0x0000000000000000000000000000000000000002").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({
                "op": "approve_credit_info",
                "company": "0x0000000000000000000000000000000000000002"
            })
        );
        assert_eq!(call.op(), "approve_credit_info");
    }

    #[test]
    fn newtype_variants_flatten_fields() {
        let value = json!({
            "op": "transfer_credits",
            "requester": "0x0000000000000000000000000000000000000004",
            "owner": "0x0000000000000000000000000000000000000002",
            "amount": 1,
            "price": 475,
            "request_index": 0
        });
        let call: Call = serde_json::from_value(value).unwrap();
        match call {
            Call::TransferCredits(order) => {
                assert_eq!(order.amount, 1);
                assert_eq!(order.price, 475);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn payment_is_optional() {
        let value = json!({
            "op": "register_receive_request",
            "company": "0x0000000000000000000000000000000000000004",
            "amount": 2
        });
        let call: Call = serde_json::from_value(value).unwrap();
        assert_eq!(
            call,
            Call::RegisterReceiveRequest {
                company: Address::parse("0x0000000000000000000000000000000000000004").unwrap(),
                amount: 2,
                payment: None,
            }
        );
    }
}
