//! Derived snapshot rebuild
//!
//! Usage: panelstore create

use super::print_json;
use crate::context::{CliResult, Context};

pub fn execute(ctx: &Context) -> CliResult<()> {
    let report = ctx.repo.create()?;
    print_json(&report)
}
