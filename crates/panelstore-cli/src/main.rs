//! panelstore CLI
//!
//! Command-line interface for the solar-panel snapshot store

use clap::{Parser, Subcommand};
use panelstore_core::errors::PsError;
use panelstore_core::logging_facility::{init, Profile};
use panelstore_core_types::RequestId;

mod commands;
mod context;

#[derive(Debug, Parser)]
#[command(name = "panelstore")]
#[command(about = "panelstore - Columnar snapshot store for solar-panel data", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: context::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write synthetic information and location snapshots
    Generate(commands::generate::GenerateArgs),
    /// Rebuild the derived snapshot by joining the two sources
    Create,
    /// Print every record
    List(commands::query::ListArgs),
    /// Print one record by id
    Get(commands::query::GetArgs),
    /// Print one page of records
    Page(commands::query::PageArgs),
    /// Change fields of one record
    Update(commands::mutate::UpdateArgs),
    /// Delete one record
    Delete(commands::mutate::DeleteArgs),
    /// Delete the derived snapshot
    Purge,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init(if cli.global.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let request_id = RequestId::new();
    let span = tracing::info_span!("request", request_id = %request_id);
    let _guard = span.enter();

    let result = context::Context::resolve(&cli.global).and_then(|ctx| match cli.command {
        Commands::Generate(args) => commands::generate::execute(&ctx, args),
        Commands::Create => commands::create::execute(&ctx),
        Commands::List(args) => commands::query::list(&ctx, args),
        Commands::Get(args) => commands::query::get(&ctx, args),
        Commands::Page(args) => commands::query::page(&ctx, args),
        Commands::Update(args) => commands::mutate::update(&ctx, args),
        Commands::Delete(args) => commands::mutate::delete(&ctx, args),
        Commands::Purge => commands::mutate::purge(&ctx),
    });

    if let Err(e) = result {
        match e.downcast::<PsError>() {
            Ok(err) => eprintln!("Error: {}", (*err).with_request_id(request_id)),
            Err(other) => eprintln!("Error: {}", other),
        }
        std::process::exit(1);
    }
}
