//! Write commands
//!
//! Usage:
//!   panelstore update <ID> [--voltage V] [--temperature T] [--status S]
//!                          [--installed-at RFC3339] [--latitude L] [--longitude L]
//!                          [--json PAYLOAD]
//!   panelstore delete <ID>
//!   panelstore purge

use chrono::{DateTime, Utc};
use clap::Args;
use panelstore_core::PanelUpdate;
use serde_json::json;

use super::print_json;
use crate::context::{CliResult, Context};

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    /// JSON object with any record fields; flags below take precedence
    #[arg(long)]
    pub json: Option<String>,

    #[arg(long)]
    pub voltage: Option<f64>,

    #[arg(long)]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub installed_at: Option<DateTime<Utc>>,

    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,
}

impl UpdateArgs {
    fn payload(self) -> CliResult<PanelUpdate> {
        let mut update = match &self.json {
            Some(raw) => serde_json::from_str::<PanelUpdate>(raw)?,
            None => PanelUpdate::default(),
        };
        update.voltage = self.voltage.or(update.voltage);
        update.temperature = self.temperature.or(update.temperature);
        update.status = self.status.or(update.status);
        update.installed_at = self.installed_at.or(update.installed_at);
        update.latitude = self.latitude.or(update.latitude);
        update.longitude = self.longitude.or(update.longitude);
        Ok(update)
    }
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: i64,
}

pub fn update(ctx: &Context, args: UpdateArgs) -> CliResult<()> {
    let id = args.id;
    let payload = args.payload()?;
    if payload.is_empty() {
        return Err("update needs at least one field to change".into());
    }
    print_json(&ctx.repo.update(id, &payload)?)
}

pub fn delete(ctx: &Context, args: DeleteArgs) -> CliResult<()> {
    ctx.repo.remove(args.id)?;
    print_json(&json!({ "deleted": args.id }))
}

pub fn purge(ctx: &Context) -> CliResult<()> {
    let deleted = ctx.repo.remove_all()?;
    print_json(&json!({ "purged": deleted }))
}
