//! Client inventory report handler.

use std::collections::HashMap;
use std::path::Path;

use meraki_api::types::ProductType;
use meraki_core::report::clients::{self as client_report, ClientRow};
use meraki_core::{
    NetworkKey, NetworkSelector, OrgSelector, collect, dispatch, partition_by_products,
    report, resolve_networks, resolve_organization,
};
use tabled::Tabled;

use crate::cli::ClientsArgs;
use crate::commands::Context;
use crate::error::CliError;
use crate::output;

/// Destination directory for CSV output.
const OUTPUT_DIR: &str = "output";

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClientTableRow {
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last seen")]
    last_seen: String,
}

impl From<&ClientRow> for ClientTableRow {
    fn from(row: &ClientRow) -> Self {
        Self {
            network: row.network.clone(),
            device: row.device_name.clone(),
            port: row.switch_port.clone(),
            mac: row.client_mac.clone(),
            ip: row.ip.clone(),
            status: row.status.clone(),
            last_seen: row.last_seen.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: ClientsArgs) -> Result<(), CliError> {
    ctx.console.note("Gathering clients");

    let selector = OrgSelector::from_flags(args.org.org_name.clone(), args.org.org_id.clone())?;
    let org = resolve_organization(&ctx.api, &selector).await?;

    let net_selector = NetworkSelector::excluding_systems_manager()
        .with_name(args.network.clone())
        .with_tag(args.tag.clone());
    let networks = resolve_networks(&ctx.api, &org.id, &net_selector).await?;

    let products: Vec<ProductType> = args.types.iter().copied().map(Into::into).collect();
    let (eligible, skipped) = partition_by_products(&networks, &products);

    for network in &skipped {
        ctx.console.skip(&format!(
            "{}: network does not include the requested product type",
            network.name
        ));
    }
    for network in &eligible {
        ctx.console.network(&network.name);
    }

    let names: HashMap<String, String> = networks
        .iter()
        .map(|n| (n.id.clone(), n.name.clone()))
        .collect();
    let keys: Vec<NetworkKey> = eligible.iter().map(|n| NetworkKey(n.id.clone())).collect();

    let api = ctx.api.clone();
    let mac = args.mac.clone();
    let stream = dispatch(keys, ctx.concurrency, ctx.cancel.clone(), move |key| {
        let api = api.clone();
        let mac = mac.clone();
        async move { api.list_network_clients(&key.0, mac.as_deref()).await }
    });
    let aggregated = collect(stream, &ctx.cancel).await?;

    let display = |key: &NetworkKey| names.get(&key.0).cloned().unwrap_or_else(|| key.0.clone());
    for (key, clients) in aggregated.successes() {
        if clients.is_empty() {
            ctx.console
                .flag(&format!("No clients in network {}", display(key)));
        }
    }
    for (key, failure) in aggregated.failures() {
        ctx.console
            .flag(&format!("{}: {}", display(key), failure.message));
    }

    let rows = client_report::rows(&aggregated, &names);

    if !args.noout && !rows.is_empty() {
        let table: Vec<ClientTableRow> = rows.iter().map(Into::into).collect();
        println!("{}", output::render_table(&table));
    }

    if args.csv {
        match report::write_csv(&rows, Path::new(OUTPUT_DIR), "report")? {
            Some(path) => ctx.console.note(&format!("Wrote {}", path.display())),
            None => ctx.console.flag("Nothing to write"),
        }
    }

    Ok(())
}
