//! Read-only queries against the replayed registry.

use carbonreg_core::RegistryError;
use carbonreg_types::Address;
use serde_json::json;

use super::{load_registry, CommandResult};
use crate::output::print_json;

pub fn surveyors(journal: String, config: Option<String>, json: bool) -> CommandResult {
    let registry = load_registry(&journal, config.as_deref())?;
    let addresses = registry.surveyor_addresses();
    let names = registry.surveyor_names();

    if json {
        let rows: Vec<_> = addresses
            .iter()
            .zip(&names)
            .map(|(address, name)| json!({ "address": address, "name": name }))
            .collect();
        print_json(&rows)?;
        return Ok(());
    }
    for (address, name) in addresses.iter().zip(&names) {
        println!("{}  {}", address, name);
    }
    Ok(())
}

pub fn pending(
    journal: String,
    config: Option<String>,
    surveyor: Address,
    json: bool,
) -> CommandResult {
    let registry = load_registry(&journal, config.as_deref())?;
    let companies = registry.registration_requests(&surveyor);

    if json {
        print_json(&companies)?;
        return Ok(());
    }
    for company in companies {
        println!("{}", company);
    }
    Ok(())
}

pub fn tokens(journal: String, config: Option<String>, owner: Address, json: bool) -> CommandResult {
    let registry = load_registry(&journal, config.as_deref())?;
    let units = registry.tokens(&owner);
    let surplus = registry.surplus(&owner);

    if json {
        print_json(&json!({
            "owner": owner,
            "units": units,
            "surplus": surplus,
        }))?;
        return Ok(());
    }
    println!("owner:   {}", owner);
    println!("units:   {}", units.len());
    println!("surplus: {}", surplus);
    if !units.is_empty() {
        let ids: Vec<String> = units.iter().map(|u| u.to_string()).collect();
        println!("ids:     {}", ids.join(" "));
    }
    Ok(())
}

pub fn requests(
    journal: String,
    config: Option<String>,
    company: Address,
    json: bool,
) -> CommandResult {
    let registry = load_registry(&journal, config.as_deref())?;
    let requests = registry.credit_requests(&company);

    if json {
        print_json(&json!({
            "company": company,
            "requests": requests,
            "requests_remaining": registry.requests_remaining(&company),
        }))?;
        return Ok(());
    }
    println!("{:<6} {:<10} {}", "INDEX", "AMOUNT", "PAYMENT");
    for (index, request) in requests.iter().enumerate() {
        println!("{:<6} {:<10} {}", index, request.amount, request.payment);
    }
    println!("requests remaining: {}", registry.requests_remaining(&company));
    Ok(())
}

pub fn company(
    journal: String,
    config: Option<String>,
    address: Address,
    json: bool,
) -> CommandResult {
    let registry = load_registry(&journal, config.as_deref())?;
    let record = registry
        .company(&address)
        .ok_or_else(|| RegistryError::UnknownCompany(address.clone()))?;

    if json {
        print_json(&json!({
            "company": record,
            "units": registry.balance_of(&address),
            "surplus": registry.surplus(&address),
        }))?;
        return Ok(());
    }
    println!("address:         {}", record.address);
    println!("name:            {}", record.name);
    println!("status:          {:?}", record.status);
    println!("score:           {}", record.score);
    println!("quantity:        {}", record.quantity);
    println!("registration id: {}", record.registration_id);
    println!("surveyor:        {}", record.surveyor);
    println!("units:           {}", registry.balance_of(&address));
    println!("surplus:         {}", registry.surplus(&address));
    println!("requests used:   {}", record.requests_consumed);
    Ok(())
}
