//! Request command: queue a request for credit units.

use carbonreg_core::Call;
use carbonreg_types::Address;

use super::{execute, CommandResult};

pub fn run(
    journal: String,
    config: Option<String>,
    from: Address,
    company: Option<Address>,
    amount: u64,
    payment: Option<u64>,
    json: bool,
) -> CommandResult {
    let company = company.unwrap_or_else(|| from.clone());
    let call = Call::RegisterReceiveRequest {
        company,
        amount,
        payment,
    };
    execute(&journal, config.as_deref(), from, call, json)
}
