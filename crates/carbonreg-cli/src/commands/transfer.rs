//! Transfer command: fulfil a pending request from the caller's surplus.

use carbonreg_core::{Call, TransferOrder};
use carbonreg_types::Address;

use super::{execute, CommandResult};

/// Arguments of `transfer` beyond the journal and caller.
pub struct TransferArgs {
    pub requester: Address,
    pub owner: Option<Address>,
    pub amount: u64,
    pub price: u64,
    pub index: usize,
}

pub fn run(
    journal: String,
    config: Option<String>,
    from: Address,
    args: TransferArgs,
    json: bool,
) -> CommandResult {
    let order = TransferOrder {
        requester: args.requester,
        owner: args.owner.unwrap_or_else(|| from.clone()),
        amount: args.amount,
        price: args.price,
        request_index: args.index,
    };
    execute(&journal, config.as_deref(), from, Call::TransferCredits(order), json)
}
