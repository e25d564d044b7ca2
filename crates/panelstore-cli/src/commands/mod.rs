pub mod create;
pub mod generate;
pub mod mutate;
pub mod query;

use serde::Serialize;

use crate::context::CliResult;

/// Print a value to stdout as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
