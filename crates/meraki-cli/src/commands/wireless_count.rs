//! Wireless clients-per-band report handler.

use std::collections::HashMap;
use std::path::Path;

use meraki_api::types::ProductType;
use meraki_core::report::wireless as wireless_report;
use meraki_core::{
    Band, BandKey, NetworkSelector, OrgSelector, collect, dispatch, report,
    resolve_networks, resolve_organization,
};

use crate::cli::WirelessCountArgs;
use crate::commands::Context;
use crate::error::CliError;

const REPORT_DIR: &str = "report";

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

pub async fn handle(ctx: &Context, args: WirelessCountArgs) -> Result<(), CliError> {
    let selector = OrgSelector::from_flags(args.org.org_name.clone(), args.org.org_id.clone())?;
    let org = resolve_organization(&ctx.api, &selector).await?;

    // An exact name pins one network; otherwise every wireless-capable
    // network is eligible.
    let net_selector = NetworkSelector::default().with_name(args.network.clone());
    let mut networks = resolve_networks(&ctx.api, &org.id, &net_selector).await?;
    if args.network.is_none() {
        networks.retain(|n| n.has_any_product(&[ProductType::Wireless]));
    }

    let names: HashMap<String, String> = networks
        .iter()
        .map(|n| (n.id.clone(), n.name.clone()))
        .collect();

    let keys: Vec<BandKey> = networks
        .iter()
        .flat_map(|n| {
            Band::ALL.iter().map(|&band| BandKey {
                network_id: n.id.clone(),
                band,
            })
        })
        .collect();

    let timespan = args.days * SECONDS_PER_DAY;
    let api = ctx.api.clone();
    let stream = dispatch(keys, ctx.concurrency, ctx.cancel.clone(), move |key| {
        let api = api.clone();
        async move {
            api.get_wireless_connection_stats(&key.network_id, &key.band.to_string(), timespan)
                .await
        }
    });
    let aggregated = collect(stream, &ctx.cancel).await?;

    for (key, failure) in aggregated.failures() {
        let name = names.get(&key.network_id).unwrap_or(&key.network_id);
        ctx.console
            .flag(&format!("{name} ({}GHz): {}", key.band, failure.message));
    }

    let rows = wireless_report::rows(&aggregated, &names);

    let mut current: Option<&str> = None;
    for row in &rows {
        if current != Some(row.network.as_str()) {
            if current.is_some() {
                println!();
            }
            println!("Network: {}", row.network);
            println!("Clients by band");
            current = Some(row.network.as_str());
        }
        println!("{:>3}GHz: {}", row.band, row.clients);
    }
    if !rows.is_empty() {
        println!();
    }

    if args.csv {
        match report::write_csv(&rows, Path::new(REPORT_DIR), "wireless")? {
            Some(path) => ctx.console.note(&format!("Wrote {}", path.display())),
            None => ctx.console.flag("Nothing to write"),
        }
    }

    Ok(())
}
