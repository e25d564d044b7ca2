//! Synthetic source generation
//!
//! Usage: panelstore generate [--rows N] [--seed S] [--create]

use clap::Args;
use panelstore_store::{generate_sources, GeneratorOptions};
use serde_json::json;

use super::print_json;
use crate::context::{CliResult, Context};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Number of panels to generate
    #[arg(long, default_value_t = 1000)]
    pub rows: usize,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also rebuild the derived snapshot afterwards
    #[arg(long)]
    pub create: bool,
}

pub fn execute(ctx: &Context, args: GenerateArgs) -> CliResult<()> {
    let generated = generate_sources(
        ctx.repo.layout(),
        GeneratorOptions {
            rows: args.rows,
            seed: args.seed,
        },
    )?;

    if args.create {
        let materialized = ctx.repo.create()?;
        print_json(&json!({ "generated": generated, "created": materialized }))
    } else {
        print_json(&json!({ "generated": generated }))
    }
}
