//! Command handlers, one file per report.

pub mod bssid;
pub mod clients;
pub mod content_filter;
pub mod health;
pub mod mx_address;
pub mod ssid_policy;
pub mod wireless_count;

use meraki_api::DashboardClient;
use tokio_util::sync::CancellationToken;

use crate::cli::Command;
use crate::error::CliError;
use crate::output::Console;

/// Per-run context threaded through every handler. No handler touches
/// process-wide state; everything it needs arrives here.
pub struct Context {
    pub api: DashboardClient,
    pub concurrency: usize,
    pub cancel: CancellationToken,
    pub console: Console,
}

/// Route a parsed command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::Clients(args) => clients::handle(ctx, args).await,
        Command::WirelessCount(args) => wireless_count::handle(ctx, args).await,
        Command::HealthAlerts(args) => health::handle(ctx, args).await,
        Command::Bssid(args) => bssid::handle(ctx, args).await,
        Command::ContentFilter(args) => content_filter::handle(ctx, args).await,
        Command::MxAddress(args) => mx_address::handle(ctx, args).await,
        Command::SsidPolicy(args) => ssid_policy::handle(ctx, args).await,
        Command::Completions(_) => unreachable!("handled before client construction"),
    }
}
