//! Network health alert report handler.

use std::collections::HashMap;
use std::path::Path;

use meraki_core::report::health as health_report;
use meraki_core::{
    NetworkKey, NetworkSelector, OrgSelector, collect, dispatch, report, resolve_networks,
    resolve_organization,
};

use crate::cli::HealthAlertsArgs;
use crate::commands::Context;
use crate::error::CliError;

const REPORT_DIR: &str = "report";

pub async fn handle(ctx: &Context, args: HealthAlertsArgs) -> Result<(), CliError> {
    ctx.console.note("Gathering health alerts");

    let selector = OrgSelector::from_flags(args.org.org_name.clone(), args.org.org_id.clone())?;
    let org = resolve_organization(&ctx.api, &selector).await?;

    let net_selector = NetworkSelector::excluding_systems_manager()
        .with_name(args.network.clone());
    let networks = resolve_networks(&ctx.api, &org.id, &net_selector).await?;

    let names: HashMap<String, String> = networks
        .iter()
        .map(|n| (n.id.clone(), n.name.clone()))
        .collect();
    let keys: Vec<NetworkKey> = networks.iter().map(|n| NetworkKey(n.id.clone())).collect();

    let api = ctx.api.clone();
    let stream = dispatch(keys, ctx.concurrency, ctx.cancel.clone(), move |key| {
        let api = api.clone();
        async move { api.get_network_health_alerts(&key.0).await }
    });
    let aggregated = collect(stream, &ctx.cancel).await?;

    let display = |key: &NetworkKey| names.get(&key.0).cloned().unwrap_or_else(|| key.0.clone());
    for (key, alerts) in aggregated.successes() {
        if alerts.is_empty() {
            ctx.console.note(&format!("{} has no alerts", display(key)));
        } else {
            ctx.console
                .note(&format!("Processing network alerts: {}", display(key)));
        }
    }
    for (key, failure) in aggregated.failures() {
        ctx.console
            .flag(&format!("{}: {}", display(key), failure.message));
    }

    if args.nocsv {
        return Ok(());
    }

    let rows = health_report::rows(&aggregated, &names);
    match report::write_csv(&rows, Path::new(REPORT_DIR), "alerts")? {
        Some(path) => ctx.console.note(&format!("Wrote {}", path.display())),
        None => ctx.console.flag("Nothing to write"),
    }

    Ok(())
}
