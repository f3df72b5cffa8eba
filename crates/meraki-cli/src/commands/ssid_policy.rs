//! SSID adaptive-policy mapping: attach an existing adaptive policy
//! group, looked up by SGT number, to a named SSID.

use meraki_core::{NetworkSelector, OrgSelector, resolve_networks, resolve_organization};

use crate::cli::SsidPolicyArgs;
use crate::commands::Context;
use crate::error::CliError;

pub async fn handle(ctx: &Context, args: SsidPolicyArgs) -> Result<(), CliError> {
    let selector = OrgSelector::from_flags(args.org.org_name.clone(), args.org.org_id.clone())?;
    let org = resolve_organization(&ctx.api, &selector).await?;

    let net_selector = NetworkSelector::default().with_name(Some(args.network.clone()));
    let networks = resolve_networks(&ctx.api, &org.id, &net_selector).await?;
    let network = networks.first().ok_or_else(|| CliError::NetworkNotFound {
        identifier: args.network.clone(),
    })?;

    let groups = ctx
        .api
        .list_organization_adaptive_policy_groups(&org.id)
        .await?;
    let group = groups
        .iter()
        .find(|g| g.sgt == args.sgt)
        .ok_or_else(|| CliError::NotFound {
            resource: "adaptive policy group".into(),
            identifier: format!("SGT {}", args.sgt),
        })?;
    ctx.console.note(&format!(
        "Matched adaptive policy group {} (id {})",
        group.name, group.group_id
    ));

    let ssids = ctx.api.list_wireless_ssids(&network.id).await?;
    let mut ssid = ssids
        .into_iter()
        .find(|s| s.name == args.ssid)
        .ok_or_else(|| CliError::NotFound {
            resource: "SSID".into(),
            identifier: args.ssid.clone(),
        })?;

    // The Dashboard reports this field as null on unconfigured SSIDs but
    // rejects null on update.
    if ssid.wifi_personal_network_enabled.is_none() {
        ssid.wifi_personal_network_enabled = Some(false);
    }
    ssid.adaptive_policy_group_id = Some(group.group_id.clone());

    let updated = ctx
        .api
        .update_wireless_ssid(&network.id, ssid.number, &ssid)
        .await?;

    ctx.console.success(&format!(
        "SSID '{}' now maps to adaptive policy group {} (SGT {})",
        updated.name, group.group_id, group.sgt
    ));

    Ok(())
}
