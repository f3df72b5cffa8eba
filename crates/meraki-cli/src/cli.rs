//! Clap derive structures for the `meraki` CLI.
//!
//! Defines the command tree, global flags, and shared selector groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use meraki_api::types::ProductType;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// meraki -- reporting CLI for Meraki Dashboard organizations
#[derive(Debug, Parser)]
#[command(
    name = "meraki",
    version,
    about = "Report on Meraki Dashboard organizations from the command line",
    long_about = "Concurrent reporting against the Meraki Dashboard API:\n\
        client inventories, wireless client counts, health alerts, BSSID\n\
        inventories, content filtering, and VLAN addressing.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Dashboard API key
    #[arg(long, env = "APIKEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Dashboard base URL
    #[arg(long, env = "MERAKI_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "MERAKI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Maximum simultaneously outstanding requests
    #[arg(long, env = "MERAKI_CONCURRENCY", global = true)]
    pub concurrency: Option<usize>,

    /// Rate-limit retry budget per request
    #[arg(long, env = "MERAKI_MAX_RETRIES", global = true)]
    pub max_retries: Option<u32>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Shorthand for -vv
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    /// Also write logs to the log/ directory
    #[arg(long, global = true)]
    pub log: bool,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if the terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Shared selector groups ───────────────────────────────────────────

/// Organization selection: exactly one of name or id.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct OrgOpts {
    /// Organization name for operation
    #[arg(short = 'o', long = "org")]
    pub org_name: Option<String>,

    /// Organization ID for operation
    #[arg(short = 'i', long = "org-id")]
    pub org_id: Option<String>,
}

/// Device product families the client report can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClientProduct {
    Switch,
    Wireless,
    Appliance,
}

impl From<ClientProduct> for ProductType {
    fn from(p: ClientProduct) -> Self {
        match p {
            ClientProduct::Switch => ProductType::Switch,
            ClientProduct::Wireless => ProductType::Wireless,
            ClientProduct::Appliance => ProductType::Appliance,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Per-network client inventory report
    #[command(alias = "cl")]
    Clients(ClientsArgs),

    /// Wireless clients per network and band
    #[command(alias = "wc")]
    WirelessCount(WirelessCountArgs),

    /// Network health alert report
    #[command(alias = "health")]
    HealthAlerts(HealthAlertsArgs),

    /// Wireless BSSID inventory report
    Bssid(BssidArgs),

    /// Apply or clear content filtering on tagged networks
    ContentFilter(ContentFilterArgs),

    /// View and rewrite appliance VLAN addressing
    MxAddress(MxAddressArgs),

    /// Map an SSID to an adaptive policy group by SGT
    SsidPolicy(SsidPolicyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Per-command arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ClientsArgs {
    #[command(flatten)]
    pub org: OrgOpts,

    /// Network name for operation
    #[arg(short = 'n', long = "network")]
    pub network: Option<String>,

    /// Tag name for operation (one tag only)
    #[arg(short = 't', long = "tag")]
    pub tag: Option<String>,

    /// Device product types whose networks should be queried
    #[arg(long = "type", value_enum, num_args = 1.., default_value = "switch")]
    pub types: Vec<ClientProduct>,

    /// MAC address to search (fuzzy match)
    #[arg(long)]
    pub mac: Option<String>,

    /// Write a CSV report to output/
    #[arg(long)]
    pub csv: bool,

    /// Turn off terminal output of the client list
    #[arg(long)]
    pub noout: bool,
}

#[derive(Debug, Args)]
pub struct WirelessCountArgs {
    #[command(flatten)]
    pub org: OrgOpts,

    /// Network name for operation
    #[arg(short = 'n', long = "network")]
    pub network: Option<String>,

    /// Timespan in days for the lookback, up to 7
    #[arg(short = 't', long = "days", default_value_t = 1,
          value_parser = clap::value_parser!(u64).range(1..=7))]
    pub days: u64,

    /// Write a CSV report to report/
    #[arg(long)]
    pub csv: bool,
}

#[derive(Debug, Args)]
pub struct HealthAlertsArgs {
    #[command(flatten)]
    pub org: OrgOpts,

    /// Network name for operation
    #[arg(short = 'n', long = "network")]
    pub network: Option<String>,

    /// Skip writing the CSV report
    #[arg(long)]
    pub nocsv: bool,
}

#[derive(Debug, Args)]
pub struct BssidArgs {
    #[command(flatten)]
    pub org: OrgOpts,

    /// Include unconfigured SSIDs
    #[arg(long)]
    pub all: bool,

    /// Skip writing the CSV report
    #[arg(long)]
    pub nocsv: bool,
}

#[derive(Debug, Args)]
pub struct ContentFilterArgs {
    /// Organization name for operation
    #[arg(short = 'o', long = "org")]
    pub org_name: String,

    /// Tag selecting the target networks (one tag only)
    #[arg(short = 't', long = "tag")]
    pub tag: String,

    /// Clear the content filter for targets
    #[arg(short = 'c', long)]
    pub clear: bool,

    /// Directory containing allowlist.txt and blocklist.txt
    #[arg(long, default_value = "filterlists")]
    pub lists_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct MxAddressArgs {
    /// Organization name for operation
    #[arg(short = 'o', long = "org")]
    pub org_name: String,

    /// Network name for operation
    #[arg(short = 'n', long = "network")]
    pub network: String,

    /// Re-write subnet addresses interactively
    #[arg(long)]
    pub rewrite: bool,
}

#[derive(Debug, Args)]
pub struct SsidPolicyArgs {
    #[command(flatten)]
    pub org: OrgOpts,

    /// Network name for operation
    #[arg(short = 'n', long = "network")]
    pub network: String,

    /// SSID name to update
    #[arg(long)]
    pub ssid: String,

    /// SGT number of the adaptive policy group (must already exist)
    #[arg(long)]
    pub sgt: i64,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
