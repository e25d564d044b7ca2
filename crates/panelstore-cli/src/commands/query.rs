//! Read commands
//!
//! Usage:
//!   panelstore list [--online]
//!   panelstore get <ID>
//!   panelstore page [--limit N] [--page P]

use clap::Args;

use super::print_json;
use crate::context::{CliResult, Context};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Join the sources directly instead of reading the derived snapshot
    #[arg(long)]
    pub online: bool,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Records per page
    #[arg(long, default_value_t = 50)]
    pub limit: usize,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

pub fn list(ctx: &Context, args: ListArgs) -> CliResult<()> {
    let records = if args.online {
        ctx.repo.find_all_online()?
    } else {
        ctx.repo.find_all()?
    };
    print_json(&records)
}

pub fn get(ctx: &Context, args: GetArgs) -> CliResult<()> {
    print_json(&ctx.repo.find_one(args.id)?)
}

pub fn page(ctx: &Context, args: PageArgs) -> CliResult<()> {
    print_json(&ctx.repo.find_paginated(args.limit, args.page)?)
}
