//! carbonreg - command-line interface for a journaled carbon credit registry.
//!
//! Every mutating command replays the journal, applies one call as the
//! `--from` identity and appends it only if the registry accepts it.

use carbonreg_types::{Address, DisplayName, RegistrationId};
use clap::{Parser, Subcommand};

mod commands;
mod lock;
mod output;
mod path;

use commands::register::CompanyArgs;
use commands::transfer::TransferArgs;
use commands::{decide, history, query, register, request, transfer, verify};

#[derive(Parser)]
#[command(name = "carbonreg")]
#[command(about = "Permissioned carbon credit registry backed by an append-only journal")]
struct Cli {
    /// Registry config file (JSON)
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a surveyor to the roster
    RegisterSurveyor {
        /// Path to journal file
        journal: String,
        /// Caller address
        #[arg(long)]
        from: Address,
        /// Surveyor address
        #[arg(long)]
        address: Address,
        /// Surveyor display name
        #[arg(long)]
        name: DisplayName,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a company for verification
    RegisterCompany {
        /// Path to journal file
        journal: String,
        /// Caller address
        #[arg(long)]
        from: Address,
        /// Company address
        #[arg(long)]
        address: Address,
        /// Company display name
        #[arg(long)]
        name: DisplayName,
        /// Emissions score
        #[arg(long)]
        score: u64,
        /// Units the company must keep in reserve
        #[arg(long)]
        quantity: u64,
        /// External registration identifier
        #[arg(long)]
        registration_id: RegistrationId,
        /// Surveyor that decides on the company
        #[arg(long)]
        surveyor: Address,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approve a pending company and mint its allocation
    Approve {
        /// Path to journal file
        journal: String,
        /// Caller address (the assigned surveyor)
        #[arg(long)]
        from: Address,
        /// Company to approve
        #[arg(long)]
        company: Address,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reject a pending company
    Reject {
        /// Path to journal file
        journal: String,
        /// Caller address (the assigned surveyor)
        #[arg(long)]
        from: Address,
        /// Company to reject
        #[arg(long)]
        company: Address,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Request credit units
    Request {
        /// Path to journal file
        journal: String,
        /// Caller address
        #[arg(long)]
        from: Address,
        /// Requesting company (default: the caller)
        #[arg(long)]
        company: Option<Address>,
        /// Units requested
        #[arg(long)]
        amount: u64,
        /// Payment attached to the request
        #[arg(long)]
        payment: Option<u64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fulfil a pending request from the caller's surplus
    Transfer {
        /// Path to journal file
        journal: String,
        /// Caller address
        #[arg(long)]
        from: Address,
        /// Company whose request is fulfilled
        #[arg(long)]
        requester: Address,
        /// Company parting with units (default: the caller)
        #[arg(long)]
        owner: Option<Address>,
        /// Units to move
        #[arg(long)]
        amount: u64,
        /// Agreed price
        #[arg(long, default_value_t = 0)]
        price: u64,
        /// Index of the request in the requester's queue
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List registered surveyors
    Surveyors {
        /// Path to journal file
        journal: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List companies awaiting a surveyor's decision
    Pending {
        /// Path to journal file
        journal: String,
        /// Surveyor address
        #[arg(long)]
        surveyor: Address,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the units held by an address
    Tokens {
        /// Path to journal file
        journal: String,
        /// Owner address
        #[arg(long)]
        owner: Address,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List a company's pending credit requests
    Requests {
        /// Path to journal file
        journal: String,
        /// Company address
        #[arg(long)]
        company: Address,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a company record
    Company {
        /// Path to journal file
        journal: String,
        /// Company address
        address: Address,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List journaled calls
    History {
        /// Path to journal file
        journal: String,
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
        /// Stop after N records (default: unlimited)
        #[arg(long)]
        max_records: Option<u64>,
    },
    /// Verify record ids, sequence numbers and re-application
    Verify {
        /// Path to journal file
        journal: String,
        /// Exit with error code if any record fails
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::RegisterSurveyor {
            journal,
            from,
            address,
            name,
            json,
        } => register::run_surveyor(journal, config, from, address, name, json),
        Commands::RegisterCompany {
            journal,
            from,
            address,
            name,
            score,
            quantity,
            registration_id,
            surveyor,
            json,
        } => register::run_company(
            journal,
            config,
            from,
            CompanyArgs {
                address,
                name,
                score,
                quantity,
                registration_id,
                surveyor,
            },
            json,
        ),
        Commands::Approve {
            journal,
            from,
            company,
            json,
        } => decide::run(journal, config, from, company, true, json),
        Commands::Reject {
            journal,
            from,
            company,
            json,
        } => decide::run(journal, config, from, company, false, json),
        Commands::Request {
            journal,
            from,
            company,
            amount,
            payment,
            json,
        } => request::run(journal, config, from, company, amount, payment, json),
        Commands::Transfer {
            journal,
            from,
            requester,
            owner,
            amount,
            price,
            index,
            json,
        } => transfer::run(
            journal,
            config,
            from,
            TransferArgs {
                requester,
                owner,
                amount,
                price,
                index,
            },
            json,
        ),
        Commands::Surveyors { journal, json } => query::surveyors(journal, config, json),
        Commands::Pending {
            journal,
            surveyor,
            json,
        } => query::pending(journal, config, surveyor, json),
        Commands::Tokens {
            journal,
            owner,
            json,
        } => query::tokens(journal, config, owner, json),
        Commands::Requests {
            journal,
            company,
            json,
        } => query::requests(journal, config, company, json),
        Commands::Company {
            journal,
            address,
            json,
        } => query::company(journal, config, address, json),
        Commands::History {
            journal,
            json,
            max_records,
        } => history::run(journal, json, max_records),
        Commands::Verify {
            journal,
            strict,
            json,
        } => verify::run(journal, config, strict, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
