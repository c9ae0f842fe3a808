//! Approve and reject commands.

use carbonreg_core::Call;
use carbonreg_types::Address;

use super::{execute, CommandResult};

pub fn run(
    journal: String,
    config: Option<String>,
    from: Address,
    company: Address,
    approve: bool,
    json: bool,
) -> CommandResult {
    let call = if approve {
        Call::ApproveCreditInfo { company }
    } else {
        Call::RejectCreditInfo { company }
    };
    execute(&journal, config.as_deref(), from, call, json)
}
