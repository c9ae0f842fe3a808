//! Register-surveyor and register-company commands.

use carbonreg_core::{Call, CompanyRegistration};
use carbonreg_types::{Address, DisplayName, RegistrationId};

use super::{execute, CommandResult};

/// Arguments of `register-company` beyond the journal and caller.
pub struct CompanyArgs {
    pub address: Address,
    pub name: DisplayName,
    pub score: u64,
    pub quantity: u64,
    pub registration_id: RegistrationId,
    pub surveyor: Address,
}

pub fn run_surveyor(
    journal: String,
    config: Option<String>,
    from: Address,
    address: Address,
    name: DisplayName,
    json: bool,
) -> CommandResult {
    let call = Call::RegisterSurveyor { address, name };
    execute(&journal, config.as_deref(), from, call, json)
}

pub fn run_company(
    journal: String,
    config: Option<String>,
    from: Address,
    args: CompanyArgs,
    json: bool,
) -> CommandResult {
    let call = Call::RegisterCompany(CompanyRegistration {
        address: args.address,
        name: args.name,
        score: args.score,
        quantity: args.quantity,
        registration_id: args.registration_id,
        surveyor: args.surveyor,
    });
    execute(&journal, config.as_deref(), from, call, json)
}
