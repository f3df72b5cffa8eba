//! Wireless BSSID inventory report handler.

use std::collections::HashMap;
use std::path::Path;

use meraki_api::types::{Device, ProductType};
use meraki_core::report::bssid as bssid_report;
use meraki_core::{
    NetworkSelector, OrgSelector, SerialKey, collect, dispatch, report, resolve_networks,
    resolve_organization,
};

use crate::cli::BssidArgs;
use crate::commands::Context;
use crate::error::CliError;

const REPORT_DIR: &str = "report";

pub async fn handle(ctx: &Context, args: BssidArgs) -> Result<(), CliError> {
    ctx.console.note("Gathering wireless device status");

    let selector = OrgSelector::from_flags(args.org.org_name.clone(), args.org.org_id.clone())?;
    let org = resolve_organization(&ctx.api, &selector).await?;

    // All networks feed the id -> name map; the device inventory itself
    // is already filtered to wireless hardware by the Dashboard.
    let networks = resolve_networks(&ctx.api, &org.id, &NetworkSelector::default()).await?;
    let names: HashMap<String, String> = networks
        .into_iter()
        .map(|n| (n.id, n.name))
        .collect();

    let devices = ctx
        .api
        .list_organization_devices(&org.id, &[ProductType::Wireless])
        .await?;
    let by_serial: HashMap<String, Device> = devices
        .into_iter()
        .map(|d| (d.serial.clone(), d))
        .collect();
    let keys: Vec<SerialKey> = by_serial.keys().cloned().map(SerialKey).collect();

    let api = ctx.api.clone();
    let stream = dispatch(keys, ctx.concurrency, ctx.cancel.clone(), move |key| {
        let api = api.clone();
        async move { api.get_device_wireless_status(&key.0).await }
    });
    let aggregated = collect(stream, &ctx.cancel).await?;

    for (key, failure) in aggregated.failures() {
        ctx.console.flag(&format!("{}: {}", key.0, failure.message));
    }

    if args.nocsv {
        return Ok(());
    }

    let rows = bssid_report::rows(&aggregated, &by_serial, &names, args.all);
    match report::write_csv(&rows, Path::new(REPORT_DIR), "report")? {
        Some(path) => ctx.console.note(&format!("Wrote {}", path.display())),
        None => ctx.console.flag("Nothing to write"),
    }

    Ok(())
}
